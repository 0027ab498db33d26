mod authorization_tests;

use authzpp_grants::{
    authorization::CodeIdExecutionAuthorization, context::ContractInfo, filter::GrantFilter,
    grant::CodeIdGrant, limit::GrantLimit,
};
use authzpp_utils::msg_gen::{exec_msg, execute_contract_msg};
use cosmos_sdk_proto::Any;
use cosmwasm_std::{testing::mock_env, Addr, BlockInfo, Storage, Timestamp};

use crate::contracts::register_contract;

pub const GRANTER: &str = "granter";
pub const GRANTEE: &str = "grantee";
pub const CODE_ID: u64 = 12;
pub const CONTRACT: &str = "contract1";
pub const DENOM: &str = "ujuno";

pub fn granter() -> Addr {
    Addr::unchecked(GRANTER)
}

pub fn grantee() -> Addr {
    Addr::unchecked(GRANTEE)
}

pub fn block_at(seconds: u64) -> BlockInfo {
    let mut block = mock_env().block;
    block.time = Timestamp::from_seconds(seconds);
    block
}

/// registers `contract1` under `CODE_ID`
pub fn setup_contracts(storage: &mut dyn Storage) {
    register_contract(
        storage,
        &Addr::unchecked(CONTRACT),
        &ContractInfo {
            code_id: CODE_ID,
            creator: Addr::unchecked("creator"),
            admin: None,
            label: "vault".to_string(),
        },
    )
    .unwrap();
}

/// authorization allowing `calls` executions of `{"claim":{}}` on contracts of `CODE_ID`
pub fn claim_authorization(calls: u64) -> Any {
    CodeIdExecutionAuthorization::new(vec![CodeIdGrant::new(
        CODE_ID,
        GrantLimit::max_calls(calls),
        GrantFilter::accepted_keys(vec!["claim"]),
    )])
    .to_any()
    .unwrap()
}

/// `MsgExec` from `grantee` executing `msg` on `contract` as `sender`
pub fn exec_as(grantee: &str, sender: &str, contract: &str, msg: &str) -> Any {
    exec_msg(
        grantee,
        vec![execute_contract_msg(sender, contract, msg.as_bytes().to_vec(), &[])],
    )
}

/// `MsgExec` from `grantee` executing each of `msgs` on `contract` as `sender`
pub fn exec_batch(grantee: &str, sender: &str, contract: &str, msgs: &[&str]) -> Any {
    exec_msg(
        grantee,
        msgs.iter()
            .map(|msg| execute_contract_msg(sender, contract, msg.as_bytes().to_vec(), &[]))
            .collect(),
    )
}
