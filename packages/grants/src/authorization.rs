use authzpp_utils::msg_gen::MSG_EXECUTE_CONTRACT_TYPE_URL;
use cosmos_sdk_proto::Any;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::StdResult;
use tracing::debug;

use crate::any::{pack_any, unpack_any, UnpackInterfaces, CODE_ID_EXECUTION_AUTHORIZATION_TYPE_URL};
use crate::context::GrantContext;
use crate::grant::CodeIdGrant;
use crate::limit::LimitAcceptResult;
use crate::msg::ExecuteContract;
use crate::GrantError;

/// Host facing interface of a stored authz authorization
pub trait Authorization: Sized {
    /// Type url of the message this authorization applies to
    fn msg_type_url(&self) -> &'static str;

    fn accept(&self, ctx: &mut GrantContext, msg: &Any) -> Result<AcceptResponse<Self>, GrantError>;

    fn validate_basic(&self) -> Result<(), GrantError>;
}

/// Decision on a delegated message.
/// `updated` carries the authorization that must replace the stored one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcceptResponse<A> {
    pub accept: bool,
    pub delete: bool,
    pub updated: Option<A>,
}

impl<A> AcceptResponse<A> {
    pub fn rejected() -> Self {
        AcceptResponse {
            accept: false,
            delete: false,
            updated: None,
        }
    }

    pub fn deleted() -> Self {
        AcceptResponse {
            accept: true,
            delete: true,
            updated: None,
        }
    }

    pub fn updated(authorization: A) -> Self {
        AcceptResponse {
            accept: true,
            delete: false,
            updated: Some(authorization),
        }
    }
}

/// Authorizes contract executions based on the code id the target contract was instantiated from
#[cw_serde]
#[derive(Eq)]
pub struct CodeIdExecutionAuthorization {
    pub grants: Vec<CodeIdGrant>,
}

impl CodeIdExecutionAuthorization {
    pub fn new(grants: Vec<CodeIdGrant>) -> Self {
        CodeIdExecutionAuthorization { grants }
    }

    pub fn to_any(&self) -> StdResult<Any> {
        pack_any(CODE_ID_EXECUTION_AUTHORIZATION_TYPE_URL, self)
    }

    pub fn from_any(any: &Any) -> Result<Self, GrantError> {
        unpack_any(CODE_ID_EXECUTION_AUTHORIZATION_TYPE_URL, any)
    }

    /// Builds the response for the grant at `index` having accepted the execution
    fn consume_grant(&self, index: usize, result: LimitAcceptResult) -> AcceptResponse<Self> {
        let mut grants = self.grants.clone();

        match result {
            LimitAcceptResult {
                delete_limit: true, ..
            } => {
                debug!(code_id = grants[index].code_id, "grant limit exhausted, removing grant");
                grants.remove(index);
            }
            LimitAcceptResult {
                update_limit: Some(limit),
                ..
            } => {
                grants[index] = grants[index].with_new_limits(limit);
            }
            _ => {}
        }

        if grants.is_empty() {
            return AcceptResponse::deleted();
        }
        AcceptResponse::updated(CodeIdExecutionAuthorization { grants })
    }
}

impl Authorization for CodeIdExecutionAuthorization {
    fn msg_type_url(&self) -> &'static str {
        MSG_EXECUTE_CONTRACT_TYPE_URL
    }

    fn accept(&self, ctx: &mut GrantContext, msg: &Any) -> Result<AcceptResponse<Self>, GrantError> {
        let exec = ExecuteContract::from_any(msg)?;
        let contract_info = ctx.contract_info(&exec.contract)?;

        for (index, grant) in self.grants.iter().enumerate() {
            ctx.charge_iterations(1, "code id grant scan")?;
            if grant.code_id != contract_info.code_id {
                continue;
            }

            let result = grant.limit.accept(ctx, &exec)?;
            if !result.accepted {
                debug!(code_id = grant.code_id, index, "limit rejected execution, continuing scan");
                continue;
            }
            if !grant.filter.accept(ctx, &exec.msg)? {
                debug!(code_id = grant.code_id, index, "filter rejected execution, continuing scan");
                continue;
            }

            return Ok(self.consume_grant(index, result));
        }

        debug!(
            contract = exec.contract.as_str(),
            code_id = contract_info.code_id,
            "no grant accepted execution"
        );
        Ok(AcceptResponse::rejected())
    }

    fn validate_basic(&self) -> Result<(), GrantError> {
        if self.grants.is_empty() {
            return Err(GrantError::EmptyGrants);
        }
        self.grants.iter().try_for_each(CodeIdGrant::validate_basic)
    }
}

impl UnpackInterfaces for CodeIdExecutionAuthorization {
    fn unpack_interfaces(&self) -> Result<(), GrantError> {
        self.grants
            .iter()
            .try_for_each(CodeIdGrant::unpack_interfaces)
    }
}
