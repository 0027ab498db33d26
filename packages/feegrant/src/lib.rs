pub mod allowance;
pub mod allowed_msg;
pub mod authz;
pub mod basic;
pub mod contracts;
mod helpers;
pub mod multi_any;
pub mod periodic;

#[cfg(test)]
mod tests;

pub use crate::allowance::{AllowanceUpdate, FeeAllowance, FeeAllowanceI};
