use authzpp_grants::GrantError;
use cosmwasm_std::{Addr, Api};

use crate::allowance::{FeeAllowance, FeeAllowanceI};

pub fn validate_address(api: &dyn Api, address: &str) -> Result<Addr, GrantError> {
    api.addr_validate(address)
        .map_err(|_| GrantError::InvalidAddress(address.to_string()))
}

/// The wrapped allowance a wrapper delegates to when evaluating fees
pub fn resolved_inner<'a>(
    allowance: &'a Option<Box<FeeAllowance>>,
    wrapper: &str,
) -> Result<&'a FeeAllowance, GrantError> {
    allowance
        .as_deref()
        .ok_or_else(|| GrantError::UnresolvedPayload(format!("inner allowance of {}", wrapper)))
}

/// Creation time check that a wrapper carries a valid inner allowance
pub fn validate_inner(
    api: &dyn Api,
    allowance: &Option<Box<FeeAllowance>>,
    wrapper: &str,
) -> Result<(), GrantError> {
    match allowance {
        Some(inner) => inner.validate_basic(api),
        None => Err(GrantError::InvalidAllowance(format!(
            "{} must wrap an allowance",
            wrapper
        ))),
    }
}
