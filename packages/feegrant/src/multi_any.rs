use authzpp_grants::any::UnpackInterfaces;
use authzpp_grants::context::GrantContext;
use authzpp_grants::GrantError;
use cosmos_sdk_proto::Any;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Api, Coin, Timestamp};
use itertools::Itertools;
use tracing::debug;

use crate::allowance::{AllowanceUpdate, FeeAllowance, FeeAllowanceI};

/// Tries each allowance in order and pays with the first one that accepts the fee
#[cw_serde]
#[derive(Eq)]
pub struct MultiAnyAllowance {
    pub allowances: Vec<FeeAllowance>,
}

impl MultiAnyAllowance {
    pub fn new(allowances: Vec<FeeAllowance>) -> Self {
        MultiAnyAllowance { allowances }
    }

    /// Swaps in the accepting member's new state, dropping it when it is used up
    fn replace_member(&self, index: usize, update: AllowanceUpdate) -> AllowanceUpdate {
        let mut allowances = self.allowances.clone();
        match update {
            AllowanceUpdate::Exhausted => {
                debug!(index, "allowance exhausted, removing it");
                allowances.remove(index);
            }
            AllowanceUpdate::Updated(inner) => allowances[index] = inner,
        }

        if allowances.is_empty() {
            return AllowanceUpdate::Exhausted;
        }
        AllowanceUpdate::Updated(FeeAllowance::MultiAny(MultiAnyAllowance { allowances }))
    }
}

impl FeeAllowanceI for MultiAnyAllowance {
    fn accept(
        &self,
        ctx: &mut GrantContext,
        fee: &[Coin],
        msgs: &[Any],
    ) -> Result<AllowanceUpdate, GrantError> {
        let mut last_err = None;

        for (index, allowance) in self.allowances.iter().enumerate() {
            ctx.charge_iterations(1, "multi any allowance")?;

            match allowance.accept(ctx, fee, msgs) {
                Ok(update) => return Ok(self.replace_member(index, update)),
                Err(err @ GrantError::OutOfGas { .. }) => return Err(err),
                Err(err) => {
                    debug!(index, error = %err, "allowance declined fee, trying the next one");
                    last_err = Some(err);
                }
            }
        }

        Err(last_err.unwrap_or(GrantError::NoValidAllowances))
    }

    fn validate_basic(&self, api: &dyn Api) -> Result<(), GrantError> {
        if self.allowances.is_empty() {
            return Err(GrantError::InvalidAllowance(
                "at least one allowance is required".to_string(),
            ));
        }
        for allowance in &self.allowances {
            allowance.validate_basic(api)?;
        }

        let expirations = self
            .allowances
            .iter()
            .map(FeeAllowance::expires_at)
            .collect::<Result<Vec<_>, _>>()?;
        if !expirations.into_iter().flatten().all_equal() {
            return Err(GrantError::InconsistentExpiry);
        }
        Ok(())
    }

    fn expires_at(&self) -> Result<Option<Timestamp>, GrantError> {
        for allowance in &self.allowances {
            if let Some(expiration) = allowance.expires_at()? {
                return Ok(Some(expiration));
            }
        }
        Ok(None)
    }
}

impl UnpackInterfaces for MultiAnyAllowance {
    fn unpack_interfaces(&self) -> Result<(), GrantError> {
        self.allowances
            .iter()
            .try_for_each(FeeAllowance::unpack_interfaces)
    }
}
