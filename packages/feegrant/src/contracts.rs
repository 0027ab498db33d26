use std::collections::BTreeSet;

use authzpp_grants::any::UnpackInterfaces;
use authzpp_grants::context::GrantContext;
use authzpp_grants::msg::ExecuteContract;
use authzpp_grants::GrantError;
use cosmos_sdk_proto::Any;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Api, Coin, Timestamp};
use itertools::Itertools;

use crate::allowance::{AllowanceUpdate, FeeAllowance, FeeAllowanceI};
use crate::helpers::{resolved_inner, validate_address, validate_inner};

const WRAPPER: &str = "contracts allowance";

/// Only pays fees for transactions that exclusively execute contracts on the allowlist
#[cw_serde]
#[derive(Eq)]
pub struct ContractsAllowance {
    pub allowance: Option<Box<FeeAllowance>>,
    pub contract_addresses: Vec<String>,
}

impl ContractsAllowance {
    pub fn new(allowance: FeeAllowance, contract_addresses: Vec<impl Into<String>>) -> Self {
        ContractsAllowance {
            allowance: Some(Box::new(allowance)),
            contract_addresses: contract_addresses.into_iter().map(Into::into).collect(),
        }
    }
}

impl FeeAllowanceI for ContractsAllowance {
    fn accept(
        &self,
        ctx: &mut GrantContext,
        fee: &[Coin],
        msgs: &[Any],
    ) -> Result<AllowanceUpdate, GrantError> {
        ctx.charge_iterations(self.contract_addresses.len(), WRAPPER)?;
        let allowed: BTreeSet<&str> = self.contract_addresses.iter().map(String::as_str).collect();

        for msg in msgs {
            ctx.charge_iterations(1, WRAPPER)?;
            let exec = ExecuteContract::from_any(msg)?;
            if !allowed.contains(exec.contract.as_str()) {
                return Err(GrantError::ContractNotAllowed(exec.contract.to_string()));
            }
        }

        let update = resolved_inner(&self.allowance, WRAPPER)?.accept(ctx, fee, msgs)?;
        Ok(update.map_updated(|inner| {
            FeeAllowance::Contracts(ContractsAllowance {
                allowance: Some(Box::new(inner)),
                contract_addresses: self.contract_addresses.clone(),
            })
        }))
    }

    fn validate_basic(&self, api: &dyn Api) -> Result<(), GrantError> {
        validate_inner(api, &self.allowance, WRAPPER)?;

        if self.contract_addresses.is_empty() {
            return Err(GrantError::InvalidAllowance(
                "at least one contract address is required".to_string(),
            ));
        }
        for address in &self.contract_addresses {
            validate_address(api, address)?;
        }
        if !self.contract_addresses.iter().all_unique() {
            return Err(GrantError::InvalidAllowance(
                "duplicate contract address".to_string(),
            ));
        }
        Ok(())
    }

    fn expires_at(&self) -> Result<Option<Timestamp>, GrantError> {
        resolved_inner(&self.allowance, WRAPPER)?.expires_at()
    }
}

impl UnpackInterfaces for ContractsAllowance {
    fn unpack_interfaces(&self) -> Result<(), GrantError> {
        self.allowance
            .as_deref()
            .map_or(Ok(()), FeeAllowance::unpack_interfaces)
    }
}
