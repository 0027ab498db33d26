use authzpp_feegrant::FeeAllowance;
use authzpp_grants::authorization::CodeIdExecutionAuthorization;
use authzpp_utils::helpers::Expirable;
use cosmwasm_std::{Addr, BlockInfo, Order, Storage};

use crate::{
    state::{ALLOWANCES, AUTHORIZATIONS},
    KeeperError,
};

pub fn query_authorization(
    storage: &dyn Storage,
    granter: &Addr,
    grantee: &Addr,
    msg_type_url: &str,
) -> Result<CodeIdExecutionAuthorization, KeeperError> {
    AUTHORIZATIONS
        .may_load(storage, (granter, grantee, msg_type_url))?
        .ok_or_else(|| KeeperError::AuthorizationNotFound {
            granter: granter.to_string(),
            grantee: grantee.to_string(),
            msg_type_url: msg_type_url.to_string(),
        })
}

pub fn query_allowance(
    storage: &dyn Storage,
    granter: &Addr,
    grantee: &Addr,
) -> Result<FeeAllowance, KeeperError> {
    ALLOWANCES
        .may_load(storage, (granter, grantee))?
        .ok_or_else(|| KeeperError::AllowanceNotFound {
            granter: granter.to_string(),
            grantee: grantee.to_string(),
        })
}

/// returns the unexpired allowances given to the grantee, keyed by granter
pub fn query_allowances_by_grantee(
    storage: &dyn Storage,
    block: &BlockInfo,
    grantee: &Addr,
) -> Result<Vec<(Addr, FeeAllowance)>, KeeperError> {
    let mut allowances = vec![];

    for item in ALLOWANCES.range(storage, None, None, Order::Ascending) {
        let ((granter, allowance_grantee), allowance) = item?;
        if allowance_grantee == *grantee && allowance.is_not_expired(block) {
            allowances.push((granter, allowance));
        }
    }
    Ok(allowances)
}
