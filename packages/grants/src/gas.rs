use cosmwasm_schema::cw_serde;

use crate::GrantError;

pub type Gas = u64;

pub const DEFAULT_GAS_PER_BYTE: Gas = 1;
pub const DEFAULT_GAS_PER_ITERATION: Gas = 10;

/// Gas prices charged while evaluating grants and allowances
#[cw_serde]
#[derive(Copy, Eq)]
pub struct GasCosts {
    /// charged for every byte of a message payload that gets scanned
    pub per_byte: Gas,
    /// charged for every grant, key, address or allow list entry that gets visited
    pub per_iteration: Gas,
}

impl Default for GasCosts {
    fn default() -> Self {
        GasCosts {
            per_byte: DEFAULT_GAS_PER_BYTE,
            per_iteration: DEFAULT_GAS_PER_ITERATION,
        }
    }
}

/// Metering seam for the host's gas meter
pub trait GasMeter {
    fn consume_gas(&mut self, amount: Gas, descriptor: &str) -> Result<(), GrantError>;
    fn gas_consumed(&self) -> Gas;
    /// None for meters without an upper bound
    fn limit(&self) -> Option<Gas>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LimitedGasMeter {
    limit: Gas,
    consumed: Gas,
}

impl LimitedGasMeter {
    pub fn new(limit: Gas) -> Self {
        LimitedGasMeter { limit, consumed: 0 }
    }
}

impl GasMeter for LimitedGasMeter {
    fn consume_gas(&mut self, amount: Gas, descriptor: &str) -> Result<(), GrantError> {
        let wanted = self.consumed.saturating_add(amount);
        self.consumed = wanted;

        if wanted > self.limit {
            return Err(GrantError::OutOfGas {
                descriptor: descriptor.to_string(),
                limit: self.limit,
                wanted,
            });
        }
        Ok(())
    }

    fn gas_consumed(&self) -> Gas {
        self.consumed
    }

    fn limit(&self) -> Option<Gas> {
        Some(self.limit)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InfiniteGasMeter {
    consumed: Gas,
}

impl InfiniteGasMeter {
    pub fn new() -> Self {
        InfiniteGasMeter::default()
    }
}

impl GasMeter for InfiniteGasMeter {
    fn consume_gas(&mut self, amount: Gas, _descriptor: &str) -> Result<(), GrantError> {
        self.consumed = self.consumed.saturating_add(amount);
        Ok(())
    }

    fn gas_consumed(&self) -> Gas {
        self.consumed
    }

    fn limit(&self) -> Option<Gas> {
        None
    }
}
