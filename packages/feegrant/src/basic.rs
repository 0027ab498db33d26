use authzpp_grants::any::UnpackInterfaces;
use authzpp_grants::context::GrantContext;
use authzpp_grants::GrantError;
use authzpp_utils::helpers::{is_valid_coin_set, safe_sub};
use cosmos_sdk_proto::Any;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Api, Coin, Timestamp};

use crate::allowance::{AllowanceUpdate, FeeAllowance, FeeAllowanceI};

/// One-time grant of tokens that optionally expires.
/// The grantee can use up to `spend_limit` to cover fees, an empty limit means no cap.
#[cw_serde]
#[derive(Eq, Default)]
pub struct BasicAllowance {
    pub spend_limit: Vec<Coin>,
    pub expiration: Option<Timestamp>,
}

impl BasicAllowance {
    pub fn new(spend_limit: Vec<Coin>, expiration: Option<Timestamp>) -> Self {
        BasicAllowance {
            spend_limit,
            expiration,
        }
    }

    pub fn is_expired_at(&self, time: Timestamp) -> bool {
        matches!(self.expiration, Some(expiration) if expiration < time)
    }
}

impl FeeAllowanceI for BasicAllowance {
    fn accept(
        &self,
        ctx: &mut GrantContext,
        fee: &[Coin],
        _msgs: &[Any],
    ) -> Result<AllowanceUpdate, GrantError> {
        if self.is_expired_at(ctx.block_time()) {
            return Err(GrantError::FeeLimitExpired);
        }

        if self.spend_limit.is_empty() {
            return Ok(AllowanceUpdate::Updated(FeeAllowance::Basic(self.clone())));
        }

        let left = safe_sub(&self.spend_limit, fee)
            .ok_or_else(|| GrantError::FeeLimitExceeded("basic allowance".to_string()))?;
        if left.is_empty() {
            return Ok(AllowanceUpdate::Exhausted);
        }

        Ok(AllowanceUpdate::Updated(FeeAllowance::Basic(BasicAllowance {
            spend_limit: left,
            expiration: self.expiration,
        })))
    }

    fn validate_basic(&self, _api: &dyn Api) -> Result<(), GrantError> {
        if !is_valid_coin_set(&self.spend_limit) {
            return Err(GrantError::InvalidCoins(format!(
                "spend limit must be sorted by denom, unique and positive: {:?}",
                self.spend_limit
            )));
        }
        Ok(())
    }

    fn expires_at(&self) -> Result<Option<Timestamp>, GrantError> {
        Ok(self.expiration)
    }
}

impl UnpackInterfaces for BasicAllowance {
    fn unpack_interfaces(&self) -> Result<(), GrantError> {
        Ok(())
    }
}
