use cosmwasm_schema::cw_serde;

use crate::any::UnpackInterfaces;
use crate::filter::GrantFilter;
use crate::limit::GrantLimit;
use crate::GrantError;

/// Permission to execute contracts instantiated from a single code id
#[cw_serde]
#[derive(Eq)]
pub struct CodeIdGrant {
    pub code_id: u64,
    /// Limit defines execution limits that are enforced and updated when the grant
    /// is applied. When the limit lapsed the grant is removed.
    pub limit: GrantLimit,
    /// Filter define more fine-grained control on the message payload passed
    /// to the contract in the operation. When no filter applies on execution, the
    /// operation is prohibited.
    pub filter: GrantFilter,
}

impl CodeIdGrant {
    pub fn new(code_id: u64, limit: GrantLimit, filter: GrantFilter) -> Self {
        CodeIdGrant {
            code_id,
            limit,
            filter,
        }
    }

    /// Copy of this grant with the limit swapped out
    pub fn with_new_limits(&self, limit: GrantLimit) -> Self {
        CodeIdGrant {
            code_id: self.code_id,
            limit,
            filter: self.filter.clone(),
        }
    }

    pub fn validate_basic(&self) -> Result<(), GrantError> {
        if self.code_id == 0 {
            return Err(GrantError::InvalidGrant("code id must not be zero".to_string()));
        }
        self.limit.validate_basic()?;
        self.filter.validate_basic()
    }
}

impl UnpackInterfaces for CodeIdGrant {
    fn unpack_interfaces(&self) -> Result<(), GrantError> {
        if let GrantLimit::Undefined {} = self.limit {
            return Err(GrantError::UnresolvedPayload(format!(
                "limit of grant for code id {}",
                self.code_id
            )));
        }
        if let GrantFilter::Undefined {} = self.filter {
            return Err(GrantError::UnresolvedPayload(format!(
                "filter of grant for code id {}",
                self.code_id
            )));
        }
        Ok(())
    }
}
