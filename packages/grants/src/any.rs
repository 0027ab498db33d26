use cosmos_sdk_proto::Any;
use cosmwasm_std::{from_slice, to_vec, StdResult};
use serde::{de::DeserializeOwned, Serialize};

use crate::GrantError;

pub const CODE_ID_EXECUTION_AUTHORIZATION_TYPE_URL: &str =
    "/authzpp.grants.v1.CodeIdExecutionAuthorization";

/// Implemented by every value that nests generically stored payloads.
/// Called after loading to make sure every inner payload resolved to a known variant.
pub trait UnpackInterfaces {
    fn unpack_interfaces(&self) -> Result<(), GrantError>;
}

/// Packs a value into an `Any` whose value is the json encoding of the payload
pub fn pack_any<T: Serialize>(type_url: &str, value: &T) -> StdResult<Any> {
    Ok(Any {
        type_url: type_url.to_string(),
        value: to_vec(value)?,
    })
}

/// Resolves an `Any` into the concrete type registered under `type_url`
pub fn unpack_any<T>(type_url: &str, any: &Any) -> Result<T, GrantError>
where
    T: DeserializeOwned + UnpackInterfaces,
{
    if any.type_url != type_url {
        return Err(GrantError::UnknownTypeUrl(any.type_url.clone()));
    }

    let value: T = from_slice(&any.value)?;
    value.unpack_interfaces()?;
    Ok(value)
}
