//! GPU Inventory common types, units, and errors.
//!
//! This crate provides foundational types shared across gi-core modules:
//! - Unified error type with stable error codes
//! - Memory unit vocabulary and conversion
//! - Output format specifications
//! - Schema versioning for JSON output

pub mod error;
pub mod output;
pub mod schema;
pub mod units;

pub use error::{Error, Result};
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
pub use units::MemUnit;
