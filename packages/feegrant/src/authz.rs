use authzpp_grants::any::UnpackInterfaces;
use authzpp_grants::context::GrantContext;
use authzpp_grants::msg::decode_msg_exec;
use authzpp_grants::GrantError;
use cosmos_sdk_proto::Any;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Api, Coin, Timestamp};

use crate::allowance::{AllowanceUpdate, FeeAllowance, FeeAllowanceI};
use crate::helpers::{resolved_inner, validate_address, validate_inner};

const WRAPPER: &str = "authz allowance";

/// Only pays fees for transactions made entirely of `MsgExec` envelopes sent by `authz_grantee`.
/// The wrapped allowance is evaluated against the messages inside the envelopes.
#[cw_serde]
#[derive(Eq)]
pub struct AuthzAllowance {
    pub allowance: Option<Box<FeeAllowance>>,
    pub authz_grantee: String,
}

impl AuthzAllowance {
    pub fn new(allowance: FeeAllowance, authz_grantee: impl Into<String>) -> Self {
        AuthzAllowance {
            allowance: Some(Box::new(allowance)),
            authz_grantee: authz_grantee.into(),
        }
    }
}

impl FeeAllowanceI for AuthzAllowance {
    fn accept(
        &self,
        ctx: &mut GrantContext,
        fee: &[Coin],
        msgs: &[Any],
    ) -> Result<AllowanceUpdate, GrantError> {
        let mut unwrapped = vec![];

        for msg in msgs {
            ctx.charge_iterations(1, WRAPPER)?;

            let exec = decode_msg_exec(msg)?;
            if exec.grantee != self.authz_grantee {
                return Err(GrantError::GranteeMismatch {
                    expected: self.authz_grantee.clone(),
                    got: exec.grantee,
                });
            }
            unwrapped.extend(exec.msgs);
        }

        let update = resolved_inner(&self.allowance, WRAPPER)?.accept(ctx, fee, &unwrapped)?;
        Ok(update.map_updated(|inner| {
            FeeAllowance::Authz(AuthzAllowance {
                allowance: Some(Box::new(inner)),
                authz_grantee: self.authz_grantee.clone(),
            })
        }))
    }

    fn validate_basic(&self, api: &dyn Api) -> Result<(), GrantError> {
        validate_inner(api, &self.allowance, WRAPPER)?;
        validate_address(api, &self.authz_grantee)?;
        Ok(())
    }

    fn expires_at(&self) -> Result<Option<Timestamp>, GrantError> {
        resolved_inner(&self.allowance, WRAPPER)?.expires_at()
    }
}

impl UnpackInterfaces for AuthzAllowance {
    fn unpack_interfaces(&self) -> Result<(), GrantError> {
        self.allowance
            .as_deref()
            .map_or(Ok(()), FeeAllowance::unpack_interfaces)
    }
}
