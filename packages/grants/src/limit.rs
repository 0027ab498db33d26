use authzpp_utils::helpers::{is_all_lte, is_valid_coin_set, safe_sub};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::Coin;

use crate::context::GrantContext;
use crate::msg::ExecuteContract;
use crate::GrantError;

#[cw_serde]
#[derive(Eq)]
pub enum GrantLimit {
    MaxCalls {
        /// Remaining number that is decremented on each execution
        remaining: u64,
    },
    MaxFunds {
        /// Amounts is the maximal amount of tokens transferable to the contract.
        amounts: Vec<Coin>,
    },
    Combined {
        /// Remaining number that is decremented on each execution
        calls_remaining: u64,
        /// Amounts is the maximal amount of tokens transferable to the contract.
        amounts: Vec<Coin>,
    },
    /// Placeholder for limit kinds this version does not know how to evaluate
    Undefined {},
}

/// Outcome of running an execution against a limit.
/// When accepted, at most one of `update_limit` and `delete_limit` is set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LimitAcceptResult {
    pub accepted: bool,
    pub update_limit: Option<GrantLimit>,
    pub delete_limit: bool,
}

impl LimitAcceptResult {
    pub fn rejected() -> Self {
        LimitAcceptResult::default()
    }

    pub fn updated(limit: GrantLimit) -> Self {
        LimitAcceptResult {
            accepted: true,
            update_limit: Some(limit),
            delete_limit: false,
        }
    }

    pub fn exhausted() -> Self {
        LimitAcceptResult {
            accepted: true,
            update_limit: None,
            delete_limit: true,
        }
    }
}

impl GrantLimit {
    pub fn max_calls(remaining: u64) -> Self {
        GrantLimit::MaxCalls { remaining }
    }

    pub fn max_funds(amounts: Vec<Coin>) -> Self {
        GrantLimit::MaxFunds { amounts }
    }

    pub fn combined(calls_remaining: u64, amounts: Vec<Coin>) -> Self {
        GrantLimit::Combined {
            calls_remaining,
            amounts,
        }
    }

    pub fn validate_basic(&self) -> Result<(), GrantError> {
        match self {
            GrantLimit::MaxCalls { remaining } => validate_calls(*remaining),
            GrantLimit::MaxFunds { amounts } => validate_amounts(amounts),
            GrantLimit::Combined {
                calls_remaining,
                amounts,
            } => {
                validate_calls(*calls_remaining)?;
                validate_amounts(amounts)
            }
            GrantLimit::Undefined {} => Err(GrantError::UndefinedVariant("limit".to_string())),
        }
    }

    /// Checks the execution against the remaining capacity and computes the limit that
    /// should replace this one. `self` is never modified.
    pub fn accept(
        &self,
        ctx: &mut GrantContext,
        exec: &ExecuteContract,
    ) -> Result<LimitAcceptResult, GrantError> {
        match self {
            GrantLimit::MaxCalls { remaining } => {
                // a calls only limit does not permit moving any value
                if exec.has_funds() {
                    return Ok(LimitAcceptResult::rejected());
                }

                Ok(match remaining {
                    0 => LimitAcceptResult::rejected(),
                    1 => LimitAcceptResult::exhausted(),
                    n => LimitAcceptResult::updated(GrantLimit::max_calls(n - 1)),
                })
            }
            GrantLimit::MaxFunds { amounts } => {
                let Some(remaining_amounts) = spend_funds(ctx, amounts, &exec.funds)? else {
                    return Ok(LimitAcceptResult::rejected());
                };

                if remaining_amounts.is_empty() {
                    return Ok(LimitAcceptResult::exhausted());
                }
                Ok(LimitAcceptResult::updated(GrantLimit::max_funds(
                    remaining_amounts,
                )))
            }
            GrantLimit::Combined {
                calls_remaining,
                amounts,
            } => {
                if *calls_remaining == 0 {
                    return Ok(LimitAcceptResult::rejected());
                }
                let Some(remaining_amounts) = spend_funds(ctx, amounts, &exec.funds)? else {
                    return Ok(LimitAcceptResult::rejected());
                };

                let calls_remaining = calls_remaining - 1;
                // either dimension running dry ends the grant
                if calls_remaining == 0 || remaining_amounts.is_empty() {
                    return Ok(LimitAcceptResult::exhausted());
                }
                Ok(LimitAcceptResult::updated(GrantLimit::combined(
                    calls_remaining,
                    remaining_amounts,
                )))
            }
            GrantLimit::Undefined {} => Err(GrantError::UndefinedVariant("limit".to_string())),
        }
    }
}

fn validate_calls(remaining: u64) -> Result<(), GrantError> {
    if remaining == 0 {
        return Err(GrantError::InvalidLimit(
            "remaining calls must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn validate_amounts(amounts: &[Coin]) -> Result<(), GrantError> {
    if amounts.is_empty() {
        return Err(GrantError::InvalidLimit(
            "amounts must not be empty".to_string(),
        ));
    }
    if !is_valid_coin_set(amounts) {
        return Err(GrantError::InvalidCoins(format!(
            "amounts must be sorted by denom, unique and positive: {:?}",
            amounts
        )));
    }
    Ok(())
}

/// Returns the amounts left after spending `funds`, or None when any denom is over budget
fn spend_funds(
    ctx: &mut GrantContext,
    amounts: &[Coin],
    funds: &[Coin],
) -> Result<Option<Vec<Coin>>, GrantError> {
    ctx.charge_iterations(funds.len(), "contract authorization funds")?;

    if !is_all_lte(funds, amounts) {
        return Ok(None);
    }
    Ok(safe_sub(amounts, funds))
}
