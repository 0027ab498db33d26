use authzpp_feegrant::FeeAllowance;
use authzpp_grants::{authorization::CodeIdExecutionAuthorization, context::ContractInfo};
use cosmwasm_std::Addr;
use cw_storage_plus::Map;

// map from Granter, Grantee & message type url to the authorization
pub const AUTHORIZATIONS: Map<(&Addr, &Addr, &str), CodeIdExecutionAuthorization> =
    Map::new("authorizations");

// map from Granter & Grantee addresses to the fee allowance
pub const ALLOWANCES: Map<(&Addr, &Addr), FeeAllowance> = Map::new("allowances");

// instantiated contracts, keyed by contract address
pub const CONTRACTS: Map<&Addr, ContractInfo> = Map::new("contracts");
