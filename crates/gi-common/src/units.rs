//! Memory unit vocabulary and conversion.
//!
//! All memory values in a [`crate::error::Result`]-bearing query are
//! normalized to a single caller-requested unit. Vendor tools disagree on
//! how they denominate memory (nvidia-smi reports `"<value> MiB"` rows,
//! rocm-smi reports raw byte counts), so conversion and validation both
//! live here.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary memory unit accepted by the memory queries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema, ValueEnum,
)]
pub enum MemUnit {
    /// Kibibytes (1024 bytes).
    #[serde(rename = "KiB")]
    #[value(name = "KiB")]
    KiB,
    /// Mebibytes (1024^2 bytes). The default across the public surface.
    #[default]
    #[serde(rename = "MiB")]
    #[value(name = "MiB")]
    MiB,
    /// Gibibytes (1024^3 bytes).
    #[serde(rename = "GiB")]
    #[value(name = "GiB")]
    GiB,
}

impl MemUnit {
    /// The unit label as vendor tools print it.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemUnit::KiB => "KiB",
            MemUnit::MiB => "MiB",
            MemUnit::GiB => "GiB",
        }
    }

    /// Number of bytes in one unit.
    pub fn bytes(&self) -> u64 {
        match self {
            MemUnit::KiB => 1024,
            MemUnit::MiB => 1024 * 1024,
            MemUnit::GiB => 1024 * 1024 * 1024,
        }
    }

    /// Floor-convert a raw byte count into this unit.
    pub fn from_bytes(&self, bytes: u64) -> u64 {
        bytes / self.bytes()
    }

    /// Parse a unit label as printed by vendor tools.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "KiB" => Some(MemUnit::KiB),
            "MiB" => Some(MemUnit::MiB),
            "GiB" => Some(MemUnit::GiB),
            _ => None,
        }
    }
}

impl fmt::Display for MemUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
