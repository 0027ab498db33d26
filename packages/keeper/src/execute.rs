use std::collections::BTreeMap;

use authzpp_feegrant::{AllowanceUpdate, FeeAllowance, FeeAllowanceI};
use authzpp_grants::{
    authorization::{Authorization, CodeIdExecutionAuthorization},
    context::{ContractRegistry, GrantContext},
    gas::{GasCosts, GasMeter},
    msg::{decode_msg_exec, ExecuteContract},
    GrantError,
};
use authzpp_utils::helpers::Expirable;
use authzpp_utils::msg_gen::MSG_EXECUTE_CONTRACT_TYPE_URL;
use cosmos_sdk_proto::Any;
use cosmwasm_std::{Addr, Api, BlockInfo, Coin, Event, Storage};
use tracing::debug;

use crate::{
    contracts::StoredContracts,
    state::{ALLOWANCES, AUTHORIZATIONS},
    KeeperError,
};

/// Block and gas accounting that grants and allowances are evaluated under
pub struct Evaluation<'a> {
    pub block: BlockInfo,
    pub gas_costs: GasCosts,
    gas_meter: &'a mut dyn GasMeter,
}

impl<'a> Evaluation<'a> {
    pub fn new(block: BlockInfo, gas_meter: &'a mut dyn GasMeter) -> Self {
        Evaluation {
            block,
            gas_costs: GasCosts::default(),
            gas_meter,
        }
    }

    pub fn with_gas_costs(mut self, gas_costs: GasCosts) -> Self {
        self.gas_costs = gas_costs;
        self
    }

    fn context<'b>(&'b mut self, contracts: &'b dyn ContractRegistry) -> GrantContext<'b> {
        GrantContext::new(self.block.clone(), &mut *self.gas_meter, contracts)
            .with_gas_costs(self.gas_costs)
    }
}

pub fn grant_authorization(
    storage: &mut dyn Storage,
    granter: &Addr,
    grantee: &Addr,
    authorization: &Any,
) -> Result<Event, KeeperError> {
    if granter == grantee {
        return Err(KeeperError::SelfGrant(granter.to_string()));
    }

    let authorization = CodeIdExecutionAuthorization::from_any(authorization)?;
    authorization.validate_basic()?;

    let msg_type_url = authorization.msg_type_url();
    AUTHORIZATIONS.save(storage, (granter, grantee, msg_type_url), &authorization)?;

    Ok(Event::new("authzpp_grant")
        .add_attribute("action", "grant_authorization")
        .add_attribute("granter", granter)
        .add_attribute("grantee", grantee)
        .add_attribute("msg_type_url", msg_type_url))
}

pub fn revoke_authorization(
    storage: &mut dyn Storage,
    granter: &Addr,
    grantee: &Addr,
    msg_type_url: &str,
) -> Result<Event, KeeperError> {
    let key = (granter, grantee, msg_type_url);
    if !AUTHORIZATIONS.has(storage, key) {
        return Err(KeeperError::AuthorizationNotFound {
            granter: granter.to_string(),
            grantee: grantee.to_string(),
            msg_type_url: msg_type_url.to_string(),
        });
    }
    AUTHORIZATIONS.remove(storage, key);

    Ok(Event::new("authzpp_grant")
        .add_attribute("action", "revoke_authorization")
        .add_attribute("granter", granter)
        .add_attribute("grantee", grantee)
        .add_attribute("msg_type_url", msg_type_url))
}

/// Authorizations touched by a `MsgExec`, keyed by granter. `None` marks an exhausted authorization.
type StagedAuthorizations = BTreeMap<Addr, Option<CodeIdExecutionAuthorization>>;

/// Runs every message of a `MsgExec` sent by `grantee` against the granters' authorizations.
/// Nothing is written unless every message is authorized.
pub fn dispatch_exec(
    storage: &mut dyn Storage,
    eval: &mut Evaluation,
    grantee: &Addr,
    msg_exec: &Any,
) -> Result<Vec<Event>, KeeperError> {
    let exec = decode_msg_exec(msg_exec)?;
    if exec.grantee != grantee.as_str() {
        return Err(GrantError::GranteeMismatch {
            expected: grantee.to_string(),
            got: exec.grantee,
        }
        .into());
    }
    if exec.msgs.is_empty() {
        return Err(KeeperError::EmptyExec {});
    }

    let mut staged = StagedAuthorizations::new();
    let events = exec
        .msgs
        .iter()
        .map(|msg| dispatch_msg(&*storage, &mut staged, eval, grantee, msg))
        .collect::<Result<Vec<_>, _>>()?;

    for (granter, authorization) in staged {
        let key = (&granter, grantee, MSG_EXECUTE_CONTRACT_TYPE_URL);
        match authorization {
            Some(authorization) => AUTHORIZATIONS.save(storage, key, &authorization)?,
            None => {
                debug!(%granter, %grantee, "authorization exhausted, removing it");
                AUTHORIZATIONS.remove(storage, key);
            }
        }
    }
    Ok(events)
}

fn dispatch_msg(
    storage: &dyn Storage,
    staged: &mut StagedAuthorizations,
    eval: &mut Evaluation,
    grantee: &Addr,
    msg: &Any,
) -> Result<Event, KeeperError> {
    let execute = ExecuteContract::from_any(msg)?;
    // the signer of the inner message is the account being acted for
    let granter = Addr::unchecked(&execute.sender);

    let event = Event::new("authzpp_exec")
        .add_attribute("granter", &granter)
        .add_attribute("grantee", grantee)
        .add_attribute("contract", &execute.contract);

    // acting on your own behalf needs no authorization
    if granter == *grantee {
        return Ok(event.add_attribute("action", "self_exec"));
    }

    // earlier messages of the same batch see the authorization they left behind
    let authorization = match staged.get(&granter) {
        Some(authorization) => authorization.clone(),
        None => AUTHORIZATIONS.may_load(
            storage,
            (&granter, grantee, MSG_EXECUTE_CONTRACT_TYPE_URL),
        )?,
    }
    .ok_or(KeeperError::Unauthorized {})?;

    let response = {
        let contracts = StoredContracts::new(storage);
        let mut ctx = eval.context(&contracts);
        authorization.accept(&mut ctx, msg)?
    };

    if !response.accept {
        debug!(%granter, %grantee, contract = %execute.contract, "no grant accepted the execution");
        return Err(KeeperError::Unauthorized {});
    }

    if response.delete {
        staged.insert(granter, None);
        return Ok(event.add_attribute("action", "exec_exhausted"));
    }
    if let Some(updated) = response.updated {
        staged.insert(granter, Some(updated));
    }
    Ok(event.add_attribute("action", "exec"))
}

pub fn grant_allowance(
    storage: &mut dyn Storage,
    api: &dyn Api,
    block: &BlockInfo,
    granter: &Addr,
    grantee: &Addr,
    allowance: &Any,
) -> Result<Event, KeeperError> {
    if granter == grantee {
        return Err(KeeperError::SelfGrant(granter.to_string()));
    }
    if ALLOWANCES.has(storage, (granter, grantee)) {
        return Err(KeeperError::AllowanceExists {
            granter: granter.to_string(),
            grantee: grantee.to_string(),
        });
    }

    let allowance = FeeAllowance::from_any(allowance)?;
    allowance.validate_basic(api)?;
    if allowance.is_expired(block) {
        return Err(KeeperError::AllowanceExpired {});
    }

    let allowance = allowance.update_period_reset(block.time);
    ALLOWANCES.save(storage, (granter, grantee), &allowance)?;

    Ok(Event::new("authzpp_feegrant")
        .add_attribute("action", "grant_allowance")
        .add_attribute("granter", granter)
        .add_attribute("grantee", grantee))
}

pub fn revoke_allowance(
    storage: &mut dyn Storage,
    granter: &Addr,
    grantee: &Addr,
) -> Result<Event, KeeperError> {
    if !ALLOWANCES.has(storage, (granter, grantee)) {
        return Err(KeeperError::AllowanceNotFound {
            granter: granter.to_string(),
            grantee: grantee.to_string(),
        });
    }
    ALLOWANCES.remove(storage, (granter, grantee));

    Ok(Event::new("authzpp_feegrant")
        .add_attribute("action", "revoke_allowance")
        .add_attribute("granter", granter)
        .add_attribute("grantee", grantee))
}

/// Charges `fee` for `msgs` against the allowance `granter` gave `grantee`
pub fn use_granted_fees(
    storage: &mut dyn Storage,
    eval: &mut Evaluation,
    granter: &Addr,
    grantee: &Addr,
    fee: &[Coin],
    msgs: &[Any],
) -> Result<Event, KeeperError> {
    let allowance = ALLOWANCES
        .may_load(storage, (granter, grantee))?
        .ok_or_else(|| KeeperError::AllowanceNotFound {
            granter: granter.to_string(),
            grantee: grantee.to_string(),
        })?;

    let update = {
        let contracts = StoredContracts::new(&*storage);
        let mut ctx = eval.context(&contracts);
        allowance.accept(&mut ctx, fee, msgs)?
    };

    let event = Event::new("authzpp_feegrant")
        .add_attribute("granter", granter)
        .add_attribute("grantee", grantee);

    match update {
        AllowanceUpdate::Exhausted => {
            debug!(%granter, %grantee, "fee allowance exhausted, removing it");
            ALLOWANCES.remove(storage, (granter, grantee));
            Ok(event.add_attribute("action", "use_feegrant_exhausted"))
        }
        AllowanceUpdate::Updated(updated) => {
            ALLOWANCES.save(storage, (granter, grantee), &updated)?;
            Ok(event.add_attribute("action", "use_feegrant"))
        }
    }
}
