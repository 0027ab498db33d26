use authzpp_grants::{
    context::{ContractInfo, ContractRegistry},
    GrantError,
};
use cosmwasm_std::{Addr, StdResult, Storage};

use crate::state::CONTRACTS;

/// Contract registry backed by the keeper's own storage
pub struct StoredContracts<'a> {
    storage: &'a dyn Storage,
}

impl<'a> StoredContracts<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        StoredContracts { storage }
    }
}

impl ContractRegistry for StoredContracts<'_> {
    fn contract_info(&self, contract: &Addr) -> Result<Option<ContractInfo>, GrantError> {
        Ok(CONTRACTS.may_load(self.storage, contract)?)
    }
}

/// Records a contract instantiation so authorizations can resolve its code id
pub fn register_contract(
    storage: &mut dyn Storage,
    contract: &Addr,
    info: &ContractInfo,
) -> StdResult<()> {
    CONTRACTS.save(storage, contract, info)
}
