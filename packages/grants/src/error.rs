use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrantError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid grant: {0}")]
    InvalidGrant(String),

    #[error("Invalid coins: {0}")]
    InvalidCoins(String),

    #[error("Authorization must contain at least one grant")]
    EmptyGrants,

    #[error("{0} is not a valid address.")]
    InvalidAddress(String),

    #[error("Invalid allowance: {0}")]
    InvalidAllowance(String),

    #[error("All allowances that define an expiration must expire at the same time")]
    InconsistentExpiry,

    #[error("Invalid json: {0}")]
    InvalidJson(String),

    #[error("Undefined {0} can not be evaluated")]
    UndefinedVariant(String),

    #[error("Invalid type: expected {expected}, got {got}")]
    InvalidType { expected: String, got: String },

    #[error("Message type {0} is not allowed by this allowance")]
    MessageNotAllowed(String),

    #[error("Grantee mismatch: expected {expected}, got {got}")]
    GranteeMismatch { expected: String, got: String },

    #[error("Contract {0} is not in the allowed contract list")]
    ContractNotAllowed(String),

    #[error("No contract info found for {0}")]
    ContractNotFound(String),

    #[error("Payload could not be resolved: {0}")]
    UnresolvedPayload(String),

    #[error("Unknown type url {0}")]
    UnknownTypeUrl(String),

    #[error("Fee limit exceeded: {0}")]
    FeeLimitExceeded(String),

    #[error("Fee allowance expired")]
    FeeLimitExpired,

    #[error("No valid allowances")]
    NoValidAllowances,

    #[error("Out of gas in {descriptor}: limit {limit}, wanted {wanted}")]
    OutOfGas {
        descriptor: String,
        limit: u64,
        wanted: u64,
    },
}

impl GrantError {
    pub fn invalid_type(expected: impl Into<String>, got: impl Into<String>) -> Self {
        GrantError::InvalidType {
            expected: expected.into(),
            got: got.into(),
        }
    }
}
