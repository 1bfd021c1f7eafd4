//! GPU Inventory core: command runner, vendor parsers, and probe facade.
//!
//! Probes the local host for installed GPUs (NVIDIA or AMD) by invoking
//! the vendor CLI tools and normalizing their incompatible output
//! formats (CSV from `nvidia-smi`, JSON from `rocm-smi`, free-text
//! agent blocks from `rocminfo`) into one stable record shape.
//!
//! Layering, leaves first:
//! - [`runner`]: external tool invocation behind a trait, so parsing can
//!   be driven from canned output
//! - [`parse`]: one parser per (vendor, tool) pair
//! - [`probe`]: vendor dispatch, degradation policy, snapshots
//!
//! # Degradation policy
//! Absence of hardware or tooling is normal and yields empty results.
//! Broken tool output degrades to partial data with warnings. A tool
//! that is present but fails to run is a hard error.

pub mod exit_codes;
pub mod parse;
pub mod probe;
pub mod runner;

pub use probe::types::{GpuInventory, GpuRecord, ProbeSnapshot};
pub use probe::GpuProbe;
pub use runner::{CommandRunner, RawToolOutput, SystemRunner};
