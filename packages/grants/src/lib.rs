pub mod any;
pub mod authorization;
pub mod context;
mod error;
pub mod filter;
pub mod gas;
pub mod grant;
pub mod limit;
pub mod msg;

#[cfg(test)]
mod tests;

pub use crate::error::GrantError;
