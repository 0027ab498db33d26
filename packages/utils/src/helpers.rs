use std::str::FromStr;

use cosmos_sdk_proto::cosmos::base::v1beta1::Coin as ProtoCoin;
use cosmwasm_std::{BlockInfo, Coin, OverflowError, StdResult, Uint128};

pub trait Expirable {
    fn is_expired(&self, block: &BlockInfo) -> bool;
    fn is_not_expired(&self, block: &BlockInfo) -> bool {
        !self.is_expired(block)
    }
}

/// Drops zero amounts, merges duplicate denoms and sorts the result by denom.
/// Errors when the merged amount of a denom does not fit in a `Uint128`.
pub fn normalize_coins(coins: Vec<Coin>) -> Result<Vec<Coin>, OverflowError> {
    let mut normalized: Vec<Coin> = vec![];
    for coin in filter_empty_coins(coins) {
        match normalized.iter_mut().find(|c| c.denom == coin.denom) {
            Some(existing) => existing.amount = existing.amount.checked_add(coin.amount)?,
            None => normalized.push(coin),
        }
    }
    normalized.sort_by(|a, b| a.denom.cmp(&b.denom));
    Ok(normalized)
}

pub fn filter_empty_coins(coins: Vec<Coin>) -> Vec<Coin> {
    coins
        .into_iter()
        .filter(|Coin { amount, .. }| !amount.is_zero())
        .collect()
}

/// True when the coins are strictly sorted by denom, have no blank denoms and no zero amounts.
/// An empty list is considered a valid (empty) set.
pub fn is_valid_coin_set(coins: &[Coin]) -> bool {
    coins
        .iter()
        .all(|c| !c.denom.trim().is_empty() && !c.amount.is_zero())
        && coins.windows(2).all(|w| w[0].denom < w[1].denom)
}

/// Returns the amount of the given denom in the set, zero if it is absent
pub fn amount_of(coins: &[Coin], denom: &str) -> Uint128 {
    coins
        .iter()
        .find(|c| c.denom == denom)
        .map(|c| c.amount)
        .unwrap_or_default()
}

/// The total of every denom in `spend` is covered by an equal or larger amount of that denom in `limit`
pub fn is_all_lte(spend: &[Coin], limit: &[Coin]) -> bool {
    match normalize_coins(spend.to_vec()) {
        Ok(spend) => spend
            .iter()
            .all(|c| c.amount <= amount_of(limit, &c.denom)),
        // a total past Uint128::MAX exceeds any limit
        Err(_) => false,
    }
}

/// Subtracts `spend` from `have`, returning None when any denom would go negative.
/// Duplicate denoms on either side are added up first, zero balances are dropped from the result.
pub fn safe_sub(have: &[Coin], spend: &[Coin]) -> Option<Vec<Coin>> {
    let have = normalize_coins(have.to_vec()).ok()?;
    let spend = normalize_coins(spend.to_vec()).ok()?;
    if !is_all_lte(&spend, &have) {
        return None;
    }

    let remaining = have
        .into_iter()
        .map(|c| {
            Some(Coin {
                amount: c.amount.checked_sub(amount_of(&spend, &c.denom)).ok()?,
                denom: c.denom,
            })
        })
        .collect::<Option<Vec<_>>>()?;

    Some(filter_empty_coins(remaining))
}

/// Every denom in `subset` also appears in `superset`
pub fn denoms_subset_of(subset: &[Coin], superset: &[Coin]) -> bool {
    subset
        .iter()
        .all(|c| superset.iter().any(|s| s.denom == c.denom))
}

/// Converts protobuf coins (string amounts) into cosmwasm coins, normalizing the result
pub fn proto_coins_to_coins(coins: &[ProtoCoin]) -> StdResult<Vec<Coin>> {
    let coins = coins
        .iter()
        .map(|ProtoCoin { denom, amount }| {
            Ok(Coin {
                denom: denom.clone(),
                amount: Uint128::from_str(amount)?,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(normalize_coins(coins)?)
}

pub fn coins_to_proto_coins(coins: &[Coin]) -> Vec<ProtoCoin> {
    coins
        .iter()
        .map(|coin| ProtoCoin {
            denom: coin.denom.clone(),
            amount: coin.amount.to_string(),
        })
        .collect()
}
