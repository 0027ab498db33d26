use cosmos_sdk_proto::cosmos::authz::v1beta1::MsgExec;
use cosmos_sdk_proto::cosmos::bank::v1beta1::MsgSend;
use cosmos_sdk_proto::cosmwasm::wasm::v1::MsgExecuteContract;
use cosmos_sdk_proto::traits::Message;
use cosmos_sdk_proto::Any;
use cosmwasm_std::Coin;

use crate::helpers::coins_to_proto_coins;

pub const MSG_EXEC_TYPE_URL: &str = "/cosmos.authz.v1beta1.MsgExec";
pub const MSG_EXECUTE_CONTRACT_TYPE_URL: &str = "/cosmwasm.wasm.v1.MsgExecuteContract";
pub const MSG_SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgSend";

/// Creates a MsgExec message wrapping the given messages for the grantee
pub fn exec_msg(grantee: impl Into<String>, any_msgs: Vec<Any>) -> Any {
    let exec = MsgExec {
        grantee: grantee.into(),
        msgs: any_msgs,
    };

    Any {
        type_url: MSG_EXEC_TYPE_URL.to_string(),
        value: exec.encode_to_vec(),
    }
}

/// Creates a MsgExecuteContract message with the given raw json payload
pub fn execute_contract_msg(
    sender: impl Into<String>,
    contract: impl Into<String>,
    msg: impl Into<Vec<u8>>,
    funds: &[Coin],
) -> Any {
    let execute = MsgExecuteContract {
        sender: sender.into(),
        contract: contract.into(),
        msg: msg.into(),
        funds: coins_to_proto_coins(funds),
    };

    Any {
        type_url: MSG_EXECUTE_CONTRACT_TYPE_URL.to_string(),
        value: execute.encode_to_vec(),
    }
}

/// Creates a bank MsgSend message
pub fn send_msg(from: impl Into<String>, to: impl Into<String>, amount: &[Coin]) -> Any {
    let send = MsgSend {
        from_address: from.into(),
        to_address: to.into(),
        amount: coins_to_proto_coins(amount),
    };

    Any {
        type_url: MSG_SEND_TYPE_URL.to_string(),
        value: send.encode_to_vec(),
    }
}
