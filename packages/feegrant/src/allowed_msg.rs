use std::collections::BTreeSet;

use authzpp_grants::any::UnpackInterfaces;
use authzpp_grants::context::GrantContext;
use authzpp_grants::GrantError;
use cosmos_sdk_proto::Any;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Api, Coin, Timestamp};

use crate::allowance::{AllowanceUpdate, FeeAllowance, FeeAllowanceI};
use crate::helpers::{resolved_inner, validate_inner};

const WRAPPER: &str = "allowed msg allowance";

/// Restricts the wrapped allowance to transactions made only of the listed message types
#[cw_serde]
#[derive(Eq)]
pub struct AllowedMsgAllowance {
    pub allowance: Option<Box<FeeAllowance>>,
    /// type urls of the messages the allowance may pay for
    pub allowed_messages: Vec<String>,
}

impl AllowedMsgAllowance {
    pub fn new(allowance: FeeAllowance, allowed_messages: Vec<impl Into<String>>) -> Self {
        AllowedMsgAllowance {
            allowance: Some(Box::new(allowance)),
            allowed_messages: allowed_messages.into_iter().map(Into::into).collect(),
        }
    }
}

impl FeeAllowanceI for AllowedMsgAllowance {
    fn accept(
        &self,
        ctx: &mut GrantContext,
        fee: &[Coin],
        msgs: &[Any],
    ) -> Result<AllowanceUpdate, GrantError> {
        ctx.charge_iterations(self.allowed_messages.len(), WRAPPER)?;
        let allowed: BTreeSet<&str> = self.allowed_messages.iter().map(String::as_str).collect();

        for msg in msgs {
            ctx.charge_iterations(1, WRAPPER)?;
            if !allowed.contains(msg.type_url.as_str()) {
                return Err(GrantError::MessageNotAllowed(msg.type_url.clone()));
            }
        }

        let update = resolved_inner(&self.allowance, WRAPPER)?.accept(ctx, fee, msgs)?;
        Ok(update.map_updated(|inner| {
            FeeAllowance::AllowedMsg(AllowedMsgAllowance {
                allowance: Some(Box::new(inner)),
                allowed_messages: self.allowed_messages.clone(),
            })
        }))
    }

    fn validate_basic(&self, api: &dyn Api) -> Result<(), GrantError> {
        validate_inner(api, &self.allowance, WRAPPER)?;
        if self.allowed_messages.is_empty() {
            return Err(GrantError::InvalidAllowance(
                "allowed messages shouldn't be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn expires_at(&self) -> Result<Option<Timestamp>, GrantError> {
        resolved_inner(&self.allowance, WRAPPER)?.expires_at()
    }
}

impl UnpackInterfaces for AllowedMsgAllowance {
    fn unpack_interfaces(&self) -> Result<(), GrantError> {
        self.allowance
            .as_deref()
            .map_or(Ok(()), FeeAllowance::unpack_interfaces)
    }
}
