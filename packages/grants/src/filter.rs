use cosmwasm_schema::cw_serde;
use cosmwasm_std::Binary;
use itertools::Itertools;
use serde_json::Value;

use crate::context::GrantContext;
use crate::GrantError;

const FILTER_GAS_DESCRIPTOR: &str = "contract authorization";

#[cw_serde]
#[derive(Eq)]
pub enum GrantFilter {
    /// Wildcard that allows any json object or array as contract payload
    AllowAll {},
    /// Accepts only payloads whose single top level json key is in the list
    AcceptedMessageKeys {
        /// Keys is a list of keys.
        keys: Vec<String>,
    },
    /// Accepts only payloads that are byte for byte equal to one of the raw messages
    AcceptedMessages {
        /// Messages is a list of raw messages.
        messages: Vec<Binary>,
    },
    /// Placeholder for filter kinds this version does not know how to evaluate
    Undefined {},
}

impl GrantFilter {
    pub fn accepted_keys(keys: Vec<impl Into<String>>) -> Self {
        GrantFilter::AcceptedMessageKeys {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn accepted_messages(messages: Vec<impl Into<Binary>>) -> Self {
        GrantFilter::AcceptedMessages {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn validate_basic(&self) -> Result<(), GrantError> {
        match self {
            GrantFilter::AllowAll {} => Ok(()),
            GrantFilter::AcceptedMessageKeys { keys } => {
                if keys.is_empty() {
                    return Err(GrantError::InvalidFilter("empty keys".to_string()));
                }
                if keys.iter().any(|key| key.trim().is_empty()) {
                    return Err(GrantError::InvalidFilter("blank key".to_string()));
                }
                if !keys.iter().all_unique() {
                    return Err(GrantError::InvalidFilter("duplicate key".to_string()));
                }
                Ok(())
            }
            GrantFilter::AcceptedMessages { messages } => {
                if messages.is_empty() {
                    return Err(GrantError::InvalidFilter("empty messages".to_string()));
                }
                for message in messages {
                    if !is_json_document(&parse_json(message)?) {
                        return Err(GrantError::InvalidFilter(
                            "messages must be json objects or arrays".to_string(),
                        ));
                    }
                }
                if !messages.iter().all_unique() {
                    return Err(GrantError::InvalidFilter("duplicate message".to_string()));
                }
                Ok(())
            }
            GrantFilter::Undefined {} => Err(GrantError::UndefinedVariant("filter".to_string())),
        }
    }

    /// Returns whether the raw contract payload passes the filter.
    /// A payload that can not be evaluated at all is an error rather than a rejection.
    pub fn accept(&self, ctx: &mut GrantContext, msg: &[u8]) -> Result<bool, GrantError> {
        match self {
            GrantFilter::AllowAll {} => {
                ctx.charge_bytes(msg.len(), FILTER_GAS_DESCRIPTOR)?;

                if !is_json_document(&parse_json(msg)?) {
                    return Err(GrantError::InvalidJson(
                        "contract message must be a json object or array".to_string(),
                    ));
                }
                Ok(true)
            }
            GrantFilter::AcceptedMessageKeys { keys } => {
                ctx.charge_bytes(msg.len(), FILTER_GAS_DESCRIPTOR)?;

                // arrays and other non object payloads simply do not match
                let Value::Object(object) = parse_json(msg)? else {
                    return Ok(false);
                };
                let Some((key, _)) = object.iter().exactly_one().ok() else {
                    return Err(GrantError::InvalidJson(format!(
                        "contract message is not a json object with exactly one top-level key, got {}",
                        object.len()
                    )));
                };

                for allowed in keys {
                    ctx.charge_iterations(1, FILTER_GAS_DESCRIPTOR)?;
                    if allowed == key {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            GrantFilter::AcceptedMessages { messages } => {
                ctx.charge_bytes(msg.len(), FILTER_GAS_DESCRIPTOR)?;

                for allowed in messages {
                    ctx.charge_iterations(1, FILTER_GAS_DESCRIPTOR)?;
                    if allowed.as_slice() == msg {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            GrantFilter::Undefined {} => Err(GrantError::UndefinedVariant("filter".to_string())),
        }
    }
}

fn parse_json(raw: &[u8]) -> Result<Value, GrantError> {
    serde_json::from_slice(raw).map_err(|err| GrantError::InvalidJson(err.to_string()))
}

fn is_json_document(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}
