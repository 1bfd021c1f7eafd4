//! GPU Inventory probe configuration.
//!
//! This crate provides:
//! - The [`GpuVendor`] selection value and [`ProbeConfig`] carrier
//! - Vendor resolution (CLI → env → config file → defaults)
//! - Validation with hard errors for malformed config files
//!
//! The vendor is an explicit value handed to the probe at construction.
//! There is no process-wide vendor flag; tests and callers can override
//! it per probe.

pub mod resolve;
pub mod vendor;

pub use resolve::{resolve_vendor, ConfigPaths, VENDOR_ENV_VAR};
pub use vendor::{GpuVendor, ProbeConfig};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
