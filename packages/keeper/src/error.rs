use authzpp_grants::GrantError;
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeeperError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Grant(#[from] GrantError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Granter and grantee cannot be the same address: {0}")]
    SelfGrant(String),

    #[error("MsgExec carries no messages")]
    EmptyExec {},

    #[error("No authorization for granter: {granter}, grantee: {grantee}, msg type: {msg_type_url}.")]
    AuthorizationNotFound {
        granter: String,
        grantee: String,
        msg_type_url: String,
    },

    #[error("No fee allowance for granter: {granter}, grantee: {grantee}.")]
    AllowanceNotFound { granter: String, grantee: String },

    #[error("Fee allowance already granted by: {granter} to: {grantee}.")]
    AllowanceExists { granter: String, grantee: String },

    #[error("Fee allowance is already expired")]
    AllowanceExpired {},
}
