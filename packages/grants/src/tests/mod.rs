mod limit_tests;

use std::collections::BTreeMap;

use authzpp_utils::msg_gen::execute_contract_msg;
use cosmos_sdk_proto::Any;
use cosmwasm_std::{Addr, Binary, Coin};

use crate::context::ContractInfo;
use crate::msg::ExecuteContract;

pub const GRANTER: &str = "granter";
pub const CODE_ID: u64 = 7;
pub const OTHER_CODE_ID: u64 = 8;
pub const CONTRACT: &str = "contract1";
pub const OTHER_CONTRACT: &str = "contract2";

/// registry with `contract1` on code 7 and `contract2` on code 8
pub fn registry() -> BTreeMap<Addr, ContractInfo> {
    BTreeMap::from([
        (
            Addr::unchecked(CONTRACT),
            ContractInfo {
                code_id: CODE_ID,
                creator: Addr::unchecked("creator"),
                admin: None,
                label: "first".to_string(),
            },
        ),
        (
            Addr::unchecked(OTHER_CONTRACT),
            ContractInfo {
                code_id: OTHER_CODE_ID,
                creator: Addr::unchecked("creator"),
                admin: Some(Addr::unchecked("admin")),
                label: "second".to_string(),
            },
        ),
    ])
}

pub fn execute_any(contract: &str, msg: &str, funds: &[Coin]) -> Any {
    execute_contract_msg(GRANTER, contract, msg.as_bytes().to_vec(), funds)
}

pub fn execute(msg: &str, funds: Vec<Coin>) -> ExecuteContract {
    ExecuteContract {
        sender: GRANTER.to_string(),
        contract: Addr::unchecked(CONTRACT),
        msg: Binary::from(msg.as_bytes()),
        funds,
    }
}
