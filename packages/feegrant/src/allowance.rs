use authzpp_grants::any::{pack_any, unpack_any, UnpackInterfaces};
use authzpp_grants::context::GrantContext;
use authzpp_grants::GrantError;
use authzpp_utils::helpers::Expirable;
use cosmos_sdk_proto::Any;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Api, BlockInfo, Coin, Timestamp};

use crate::allowed_msg::AllowedMsgAllowance;
use crate::authz::AuthzAllowance;
use crate::basic::BasicAllowance;
use crate::contracts::ContractsAllowance;
use crate::multi_any::MultiAnyAllowance;
use crate::periodic::PeriodicAllowance;

pub const BASIC_ALLOWANCE_TYPE_URL: &str = "/authzpp.feegrant.v1.BasicAllowance";
pub const PERIODIC_ALLOWANCE_TYPE_URL: &str = "/authzpp.feegrant.v1.PeriodicAllowance";
pub const ALLOWED_MSG_ALLOWANCE_TYPE_URL: &str = "/authzpp.feegrant.v1.AllowedMsgAllowance";
pub const AUTHZ_ALLOWANCE_TYPE_URL: &str = "/authzpp.feegrant.v1.AuthzAllowance";
pub const CONTRACTS_ALLOWANCE_TYPE_URL: &str = "/authzpp.feegrant.v1.ContractsAllowance";
pub const MULTI_ANY_ALLOWANCE_TYPE_URL: &str = "/authzpp.feegrant.v1.MultiAnyAllowance";

/// Host facing interface of a fee allowance
pub trait FeeAllowanceI {
    /// Checks whether the fee may be paid for the given messages.
    /// Implementations never modify `self`, the value to persist is returned instead.
    fn accept(
        &self,
        ctx: &mut GrantContext,
        fee: &[Coin],
        msgs: &[Any],
    ) -> Result<AllowanceUpdate, GrantError>;

    fn validate_basic(&self, api: &dyn Api) -> Result<(), GrantError>;

    fn expires_at(&self) -> Result<Option<Timestamp>, GrantError>;
}

/// What the caller has to do with the stored allowance after a successful accept
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllowanceUpdate {
    /// The allowance is used up and must be deleted
    Exhausted,
    /// The allowance must be replaced by this value
    Updated(FeeAllowance),
}

impl AllowanceUpdate {
    /// Re-wraps an updated inner allowance, passing exhaustion through
    pub fn map_updated(self, wrap: impl FnOnce(FeeAllowance) -> FeeAllowance) -> Self {
        match self {
            AllowanceUpdate::Exhausted => AllowanceUpdate::Exhausted,
            AllowanceUpdate::Updated(inner) => AllowanceUpdate::Updated(wrap(inner)),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, AllowanceUpdate::Exhausted)
    }
}

#[cw_serde]
#[derive(Eq)]
pub enum FeeAllowance {
    Basic(BasicAllowance),
    Periodic(PeriodicAllowance),
    AllowedMsg(AllowedMsgAllowance),
    Authz(AuthzAllowance),
    Contracts(ContractsAllowance),
    MultiAny(MultiAnyAllowance),
    /// Placeholder for allowance kinds this version does not know how to evaluate
    Undefined {},
}

impl FeeAllowance {
    pub fn type_url(&self) -> Option<&'static str> {
        match self {
            FeeAllowance::Basic(_) => Some(BASIC_ALLOWANCE_TYPE_URL),
            FeeAllowance::Periodic(_) => Some(PERIODIC_ALLOWANCE_TYPE_URL),
            FeeAllowance::AllowedMsg(_) => Some(ALLOWED_MSG_ALLOWANCE_TYPE_URL),
            FeeAllowance::Authz(_) => Some(AUTHZ_ALLOWANCE_TYPE_URL),
            FeeAllowance::Contracts(_) => Some(CONTRACTS_ALLOWANCE_TYPE_URL),
            FeeAllowance::MultiAny(_) => Some(MULTI_ANY_ALLOWANCE_TYPE_URL),
            FeeAllowance::Undefined {} => None,
        }
    }

    pub fn to_any(&self) -> Result<Any, GrantError> {
        let any = match self {
            FeeAllowance::Basic(a) => pack_any(BASIC_ALLOWANCE_TYPE_URL, a),
            FeeAllowance::Periodic(a) => pack_any(PERIODIC_ALLOWANCE_TYPE_URL, a),
            FeeAllowance::AllowedMsg(a) => pack_any(ALLOWED_MSG_ALLOWANCE_TYPE_URL, a),
            FeeAllowance::Authz(a) => pack_any(AUTHZ_ALLOWANCE_TYPE_URL, a),
            FeeAllowance::Contracts(a) => pack_any(CONTRACTS_ALLOWANCE_TYPE_URL, a),
            FeeAllowance::MultiAny(a) => pack_any(MULTI_ANY_ALLOWANCE_TYPE_URL, a),
            FeeAllowance::Undefined {} => {
                return Err(GrantError::UndefinedVariant("fee allowance".to_string()))
            }
        };
        Ok(any?)
    }

    /// Resolves a packed allowance into its concrete variant
    pub fn from_any(any: &Any) -> Result<Self, GrantError> {
        let url = any.type_url.as_str();
        match url {
            BASIC_ALLOWANCE_TYPE_URL => unpack_any(url, any).map(FeeAllowance::Basic),
            PERIODIC_ALLOWANCE_TYPE_URL => unpack_any(url, any).map(FeeAllowance::Periodic),
            ALLOWED_MSG_ALLOWANCE_TYPE_URL => unpack_any(url, any).map(FeeAllowance::AllowedMsg),
            AUTHZ_ALLOWANCE_TYPE_URL => unpack_any(url, any).map(FeeAllowance::Authz),
            CONTRACTS_ALLOWANCE_TYPE_URL => unpack_any(url, any).map(FeeAllowance::Contracts),
            MULTI_ANY_ALLOWANCE_TYPE_URL => unpack_any(url, any).map(FeeAllowance::MultiAny),
            _ => Err(GrantError::UnknownTypeUrl(any.type_url.clone())),
        }
    }

    /// Starts the first period of every periodic allowance that has not been started yet
    pub fn update_period_reset(self, now: Timestamp) -> Self {
        let wrap = |inner: Option<Box<FeeAllowance>>| {
            inner.map(|inner| Box::new((*inner).update_period_reset(now)))
        };

        match self {
            FeeAllowance::Periodic(periodic) => {
                FeeAllowance::Periodic(periodic.update_period_reset(now))
            }
            FeeAllowance::AllowedMsg(a) => FeeAllowance::AllowedMsg(AllowedMsgAllowance {
                allowance: wrap(a.allowance),
                ..a
            }),
            FeeAllowance::Authz(a) => FeeAllowance::Authz(AuthzAllowance {
                allowance: wrap(a.allowance),
                ..a
            }),
            FeeAllowance::Contracts(a) => FeeAllowance::Contracts(ContractsAllowance {
                allowance: wrap(a.allowance),
                ..a
            }),
            FeeAllowance::MultiAny(a) => FeeAllowance::MultiAny(MultiAnyAllowance {
                allowances: a
                    .allowances
                    .into_iter()
                    .map(|inner| inner.update_period_reset(now))
                    .collect(),
            }),
            other => other,
        }
    }
}

impl FeeAllowanceI for FeeAllowance {
    fn accept(
        &self,
        ctx: &mut GrantContext,
        fee: &[Coin],
        msgs: &[Any],
    ) -> Result<AllowanceUpdate, GrantError> {
        match self {
            FeeAllowance::Basic(a) => a.accept(ctx, fee, msgs),
            FeeAllowance::Periodic(a) => a.accept(ctx, fee, msgs),
            FeeAllowance::AllowedMsg(a) => a.accept(ctx, fee, msgs),
            FeeAllowance::Authz(a) => a.accept(ctx, fee, msgs),
            FeeAllowance::Contracts(a) => a.accept(ctx, fee, msgs),
            FeeAllowance::MultiAny(a) => a.accept(ctx, fee, msgs),
            FeeAllowance::Undefined {} => {
                Err(GrantError::UndefinedVariant("fee allowance".to_string()))
            }
        }
    }

    fn validate_basic(&self, api: &dyn Api) -> Result<(), GrantError> {
        match self {
            FeeAllowance::Basic(a) => a.validate_basic(api),
            FeeAllowance::Periodic(a) => a.validate_basic(api),
            FeeAllowance::AllowedMsg(a) => a.validate_basic(api),
            FeeAllowance::Authz(a) => a.validate_basic(api),
            FeeAllowance::Contracts(a) => a.validate_basic(api),
            FeeAllowance::MultiAny(a) => a.validate_basic(api),
            FeeAllowance::Undefined {} => {
                Err(GrantError::UndefinedVariant("fee allowance".to_string()))
            }
        }
    }

    fn expires_at(&self) -> Result<Option<Timestamp>, GrantError> {
        match self {
            FeeAllowance::Basic(a) => a.expires_at(),
            FeeAllowance::Periodic(a) => a.expires_at(),
            FeeAllowance::AllowedMsg(a) => a.expires_at(),
            FeeAllowance::Authz(a) => a.expires_at(),
            FeeAllowance::Contracts(a) => a.expires_at(),
            FeeAllowance::MultiAny(a) => a.expires_at(),
            FeeAllowance::Undefined {} => {
                Err(GrantError::UndefinedVariant("fee allowance".to_string()))
            }
        }
    }
}

impl UnpackInterfaces for FeeAllowance {
    fn unpack_interfaces(&self) -> Result<(), GrantError> {
        match self {
            FeeAllowance::Basic(a) => a.unpack_interfaces(),
            FeeAllowance::Periodic(a) => a.unpack_interfaces(),
            FeeAllowance::AllowedMsg(a) => a.unpack_interfaces(),
            FeeAllowance::Authz(a) => a.unpack_interfaces(),
            FeeAllowance::Contracts(a) => a.unpack_interfaces(),
            FeeAllowance::MultiAny(a) => a.unpack_interfaces(),
            FeeAllowance::Undefined {} => {
                Err(GrantError::UnresolvedPayload("fee allowance".to_string()))
            }
        }
    }
}

impl Expirable for FeeAllowance {
    fn is_expired(&self, block: &BlockInfo) -> bool {
        matches!(self.expires_at(), Ok(Some(expiration)) if expiration < block.time)
    }
}
