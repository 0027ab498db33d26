use authzpp_grants::any::UnpackInterfaces;
use authzpp_grants::context::GrantContext;
use authzpp_grants::GrantError;
use authzpp_utils::helpers::{denoms_subset_of, is_valid_coin_set, safe_sub};
use cosmos_sdk_proto::Any;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Api, Coin, Timestamp};

use crate::allowance::{AllowanceUpdate, FeeAllowance, FeeAllowanceI};
use crate::basic::BasicAllowance;

/// Extends a basic allowance with a cap on how much may be spent per period
#[cw_serde]
#[derive(Eq)]
pub struct PeriodicAllowance {
    /// absolute limit and expiration
    pub basic: BasicAllowance,
    /// length of a period in seconds
    pub period_seconds: u64,
    /// maximum that can be spent within a single period
    pub period_spend_limit: Vec<Coin>,
    /// what is left to spend before `period_reset`
    pub period_can_spend: Vec<Coin>,
    /// when the current period ends. zero means no period has started yet
    pub period_reset: Timestamp,
}

impl PeriodicAllowance {
    pub fn new(basic: BasicAllowance, period_seconds: u64, period_spend_limit: Vec<Coin>) -> Self {
        PeriodicAllowance {
            basic,
            period_seconds,
            period_can_spend: period_spend_limit.clone(),
            period_spend_limit,
            period_reset: Timestamp::from_nanos(0),
        }
    }

    /// Starts the first period at `now` if it has not been started yet
    pub fn update_period_reset(self, now: Timestamp) -> Self {
        if self.period_reset.nanos() != 0 {
            return self;
        }
        PeriodicAllowance {
            period_reset: now.plus_seconds(self.period_seconds),
            ..self
        }
    }

    /// Refills the period allowance once the current period has passed
    fn try_reset_period(&mut self, now: Timestamp) {
        if now < self.period_reset {
            return;
        }

        // the period can never allow more than what is left of the absolute limit
        let basic_below_period = !self.basic.spend_limit.is_empty()
            && safe_sub(&self.basic.spend_limit, &self.period_spend_limit).is_none();
        self.period_can_spend = if basic_below_period {
            self.basic.spend_limit.clone()
        } else {
            self.period_spend_limit.clone()
        };

        // stepping from the previous reset keeps a steady cadence, unless we are more than a period behind
        self.period_reset = self.period_reset.plus_seconds(self.period_seconds);
        if now > self.period_reset {
            self.period_reset = now.plus_seconds(self.period_seconds);
        }
    }
}

impl FeeAllowanceI for PeriodicAllowance {
    fn accept(
        &self,
        ctx: &mut GrantContext,
        fee: &[Coin],
        _msgs: &[Any],
    ) -> Result<AllowanceUpdate, GrantError> {
        let now = ctx.block_time();
        if self.basic.is_expired_at(now) {
            return Err(GrantError::FeeLimitExpired);
        }

        let mut next = self.clone();
        next.try_reset_period(now);

        next.period_can_spend = safe_sub(&next.period_can_spend, fee)
            .ok_or_else(|| GrantError::FeeLimitExceeded("period limit".to_string()))?;

        if !next.basic.spend_limit.is_empty() {
            next.basic.spend_limit = safe_sub(&next.basic.spend_limit, fee)
                .ok_or_else(|| GrantError::FeeLimitExceeded("absolute limit".to_string()))?;
            if next.basic.spend_limit.is_empty() {
                return Ok(AllowanceUpdate::Exhausted);
            }
        }

        Ok(AllowanceUpdate::Updated(FeeAllowance::Periodic(next)))
    }

    fn validate_basic(&self, api: &dyn Api) -> Result<(), GrantError> {
        self.basic.validate_basic(api)?;

        if self.period_spend_limit.is_empty() || !is_valid_coin_set(&self.period_spend_limit) {
            return Err(GrantError::InvalidCoins(format!(
                "period spend limit must be non-empty, sorted by denom, unique and positive: {:?}",
                self.period_spend_limit
            )));
        }
        if !is_valid_coin_set(&self.period_can_spend) {
            return Err(GrantError::InvalidCoins(format!(
                "period can spend must be sorted by denom, unique and positive: {:?}",
                self.period_can_spend
            )));
        }
        if !self.basic.spend_limit.is_empty()
            && !denoms_subset_of(&self.period_spend_limit, &self.basic.spend_limit)
        {
            return Err(GrantError::InvalidCoins(
                "period spend limit has different currency than basic spend limit".to_string(),
            ));
        }
        if self.period_seconds == 0 {
            return Err(GrantError::InvalidAllowance(
                "period must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    fn expires_at(&self) -> Result<Option<Timestamp>, GrantError> {
        Ok(self.basic.expiration)
    }
}

impl UnpackInterfaces for PeriodicAllowance {
    fn unpack_interfaces(&self) -> Result<(), GrantError> {
        Ok(())
    }
}
