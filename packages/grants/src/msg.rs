use authzpp_utils::helpers::proto_coins_to_coins;
use authzpp_utils::msg_gen::{MSG_EXECUTE_CONTRACT_TYPE_URL, MSG_EXEC_TYPE_URL};
use cosmos_sdk_proto::cosmos::authz::v1beta1::MsgExec;
use cosmos_sdk_proto::cosmwasm::wasm::v1::MsgExecuteContract;
use cosmos_sdk_proto::traits::Message;
use cosmos_sdk_proto::Any;
use cosmwasm_std::{Addr, Binary, Coin};

use crate::GrantError;

/// A decoded `MsgExecuteContract` with its funds normalized into a coin set
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecuteContract {
    pub sender: String,
    pub contract: Addr,
    pub msg: Binary,
    pub funds: Vec<Coin>,
}

impl ExecuteContract {
    /// Decodes a contract execution message, rejecting any other message type, an undecodable value
    /// or an empty payload
    pub fn from_any(any: &Any) -> Result<Self, GrantError> {
        if any.type_url != MSG_EXECUTE_CONTRACT_TYPE_URL {
            return Err(GrantError::invalid_type(
                MSG_EXECUTE_CONTRACT_TYPE_URL,
                &any.type_url,
            ));
        }

        let MsgExecuteContract {
            sender,
            contract,
            msg,
            funds,
        } = MsgExecuteContract::decode(any.value.as_slice()).map_err(|err| {
            GrantError::invalid_type(
                MSG_EXECUTE_CONTRACT_TYPE_URL,
                format!("undecodable message: {}", err),
            )
        })?;

        if msg.is_empty() {
            return Err(GrantError::invalid_type(
                "non-empty contract message",
                "empty contract message",
            ));
        }

        Ok(ExecuteContract {
            sender,
            contract: Addr::unchecked(contract),
            msg: Binary::from(msg),
            funds: proto_coins_to_coins(&funds)
                .map_err(|err| GrantError::InvalidCoins(err.to_string()))?,
        })
    }

    pub fn has_funds(&self) -> bool {
        !self.funds.is_empty()
    }
}

/// Decodes a delegated execution envelope
pub fn decode_msg_exec(any: &Any) -> Result<MsgExec, GrantError> {
    if any.type_url != MSG_EXEC_TYPE_URL {
        return Err(GrantError::invalid_type(MSG_EXEC_TYPE_URL, &any.type_url));
    }

    MsgExec::decode(any.value.as_slice()).map_err(|err| {
        GrantError::invalid_type(MSG_EXEC_TYPE_URL, format!("undecodable message: {}", err))
    })
}
