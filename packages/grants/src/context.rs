use std::collections::BTreeMap;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, BlockInfo, Timestamp};

use crate::gas::{Gas, GasCosts, GasMeter};
use crate::GrantError;

/// The subset of a contract's registry entry that grant evaluation needs
#[cw_serde]
pub struct ContractInfo {
    pub code_id: u64,
    pub creator: Addr,
    pub admin: Option<Addr>,
    pub label: String,
}

/// Read access to the host's contract registry
pub trait ContractRegistry {
    fn contract_info(&self, contract: &Addr) -> Result<Option<ContractInfo>, GrantError>;
}

/// In memory registry, handy for simulations
impl ContractRegistry for BTreeMap<Addr, ContractInfo> {
    fn contract_info(&self, contract: &Addr) -> Result<Option<ContractInfo>, GrantError> {
        Ok(self.get(contract).cloned())
    }
}

/// Everything an `accept` call may read from the host while evaluating a grant or allowance.
/// All gas charged during evaluation goes through the wrapped meter.
pub struct GrantContext<'a> {
    pub block: BlockInfo,
    pub gas_costs: GasCosts,
    gas_meter: &'a mut dyn GasMeter,
    contracts: &'a dyn ContractRegistry,
}

impl<'a> GrantContext<'a> {
    pub fn new(
        block: BlockInfo,
        gas_meter: &'a mut dyn GasMeter,
        contracts: &'a dyn ContractRegistry,
    ) -> Self {
        GrantContext {
            block,
            gas_costs: GasCosts::default(),
            gas_meter,
            contracts,
        }
    }

    pub fn with_gas_costs(mut self, gas_costs: GasCosts) -> Self {
        self.gas_costs = gas_costs;
        self
    }

    pub fn block_time(&self) -> Timestamp {
        self.block.time
    }

    pub fn gas_consumed(&self) -> Gas {
        self.gas_meter.gas_consumed()
    }

    pub fn consume_gas(&mut self, amount: Gas, descriptor: &str) -> Result<(), GrantError> {
        self.gas_meter.consume_gas(amount, descriptor)
    }

    /// Charges for scanning `len` bytes of payload
    pub fn charge_bytes(&mut self, len: usize, descriptor: &str) -> Result<(), GrantError> {
        let amount = self.gas_costs.per_byte.saturating_mul(len as Gas);
        self.consume_gas(amount, descriptor)
    }

    /// Charges for visiting `count` entries of a list
    pub fn charge_iterations(&mut self, count: usize, descriptor: &str) -> Result<(), GrantError> {
        let amount = self.gas_costs.per_iteration.saturating_mul(count as Gas);
        self.consume_gas(amount, descriptor)
    }

    /// Looks up the registry entry for the contract, erroring if the contract is unknown
    pub fn contract_info(&self, contract: &Addr) -> Result<ContractInfo, GrantError> {
        self.contracts
            .contract_info(contract)?
            .ok_or_else(|| GrantError::ContractNotFound(contract.to_string()))
    }
}
