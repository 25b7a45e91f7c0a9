//! SQLite backend for the FMS case-file register.
//!
//! Every operation opens its own connection through the [`gateway::Gateway`],
//! runs inside one transaction, and closes the connection before returning.

mod encode;
mod statement;
mod store;

pub mod error;
pub mod gateway;

pub use error::{Error, Result};
pub use store::SqliteStore;
