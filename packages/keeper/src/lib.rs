pub mod contracts;
mod error;
pub mod execute;
pub mod queries;
pub mod state;

#[cfg(test)]
mod tests;

pub use crate::error::KeeperError;
