//! Core types and the store trait for the FMS case-file register.
//!
//! This crate has no database dependencies. It declares the
//! record categories and their schemas, the shapes records and result sets
//! take, the date filters, and the [`store::RecordStore`] trait that storage
//! backends implement.

pub mod category;
pub mod error;
pub mod query;
pub mod record;
pub mod schema;
pub mod store;

pub use error::{Error, Result};
