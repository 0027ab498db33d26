
use std::collections::BTreeMap;

use authzpp_grants::context::ContractInfo;
use authzpp_utils::msg_gen::execute_contract_msg;
use cosmos_sdk_proto::Any;
use cosmwasm_std::{coins, testing::mock_env, Addr, BlockInfo, Timestamp};

use crate::{basic::BasicAllowance, FeeAllowance};

pub const GRANTER: &str = "granter";
pub const GRANTEE: &str = "grantee";
pub const DENOM: &str = "ujuno";

pub fn block_at(seconds: u64) -> BlockInfo {
    let mut block = mock_env().block;
    block.time = Timestamp::from_seconds(seconds);
    block
}

/// fee allowances never look up contracts
pub fn no_contracts() -> BTreeMap<Addr, ContractInfo> {
    BTreeMap::new()
}

pub fn basic(amount: u128) -> FeeAllowance {
    FeeAllowance::Basic(BasicAllowance::new(coins(amount, DENOM), None))
}

pub fn basic_expiring(amount: u128, seconds: u64) -> FeeAllowance {
    FeeAllowance::Basic(BasicAllowance::new(
        coins(amount, DENOM),
        Some(Timestamp::from_seconds(seconds)),
    ))
}

pub fn contract_exec(contract: &str) -> Any {
    execute_contract_msg(GRANTER, contract, br#"{"claim":{}}"#.to_vec(), &[])
}
