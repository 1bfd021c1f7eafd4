//! GPU vendor selection types.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// GPU hardware vendor a probe is directed at.
///
/// The probe never auto-detects the vendor; callers pick one explicitly
/// (or let the resolution chain in [`crate::resolve`] pick it from the
/// environment).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum GpuVendor {
    /// NVIDIA GPU, probed via nvidia-smi (CSV output).
    #[default]
    Nvidia,
    /// AMD GPU, probed via rocm-smi (JSON) and rocminfo (text blocks).
    Amd,
}

impl GpuVendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            GpuVendor::Nvidia => "nvidia",
            GpuVendor::Amd => "amd",
        }
    }

    /// Parse a vendor name as accepted in env vars and config files.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nvidia" => Some(GpuVendor::Nvidia),
            "amd" => Some(GpuVendor::Amd),
            _ => None,
        }
    }
}

impl fmt::Display for GpuVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration handed to a probe at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbeConfig {
    /// Which vendor's tools the probe invokes.
    pub vendor: GpuVendor,
}

impl ProbeConfig {
    pub fn new(vendor: GpuVendor) -> Self {
        Self { vendor }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_any_case() {
        assert_eq!(GpuVendor::parse("nvidia"), Some(GpuVendor::Nvidia));
        assert_eq!(GpuVendor::parse("AMD"), Some(GpuVendor::Amd));
        assert_eq!(GpuVendor::parse("  Nvidia "), Some(GpuVendor::Nvidia));
        assert_eq!(GpuVendor::parse("intel"), None);
        assert_eq!(GpuVendor::parse(""), None);
    }

    #[test]
    fn test_display_matches_config_spelling() {
        assert_eq!(GpuVendor::Nvidia.to_string(), "nvidia");
        assert_eq!(GpuVendor::Amd.to_string(), "amd");
    }
}
