//! Vendor resolution: CLI flag → env var → config file → default.
//!
//! A missing config file is normal and falls through to the default; a
//! config file that exists but cannot be read or parsed is a hard error,
//! so misconfiguration never silently probes the wrong vendor.

use crate::vendor::GpuVendor;
use gi_common::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Environment variable consulted when no CLI vendor is given.
pub const VENDOR_ENV_VAR: &str = "GI_VENDOR";

/// Config file name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.json";

/// Subdirectory under the platform config dir.
const CONFIG_SUBDIR: &str = "gpu-inventory";

/// Where to look for the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Explicit config directory override (`--config`). When unset, the
    /// platform config dir (e.g. `~/.config/gpu-inventory/`) is used.
    pub config_dir: Option<PathBuf>,
}

impl ConfigPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the config directory.
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    fn config_file(&self) -> Option<PathBuf> {
        let dir = self
            .config_dir
            .clone()
            .or_else(|| dirs::config_dir().map(|d| d.join(CONFIG_SUBDIR)))?;
        Some(dir.join(CONFIG_FILE_NAME))
    }
}

/// On-disk config file shape. All fields optional so partial files stay
/// forward-compatible.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    #[allow(dead_code)]
    schema_version: Option<String>,
    #[serde(default)]
    vendor: Option<String>,
}

/// Resolve the active vendor.
///
/// Precedence: explicit CLI value, then [`VENDOR_ENV_VAR`], then the
/// `vendor` field of `config.json`, then [`GpuVendor::default`].
pub fn resolve_vendor(cli: Option<GpuVendor>, paths: &ConfigPaths) -> Result<GpuVendor> {
    let env = std::env::var(VENDOR_ENV_VAR).ok();
    resolve_from(cli, env, paths)
}

fn resolve_from(
    cli: Option<GpuVendor>,
    env: Option<String>,
    paths: &ConfigPaths,
) -> Result<GpuVendor> {
    if let Some(vendor) = cli {
        return Ok(vendor);
    }

    if let Some(raw) = env {
        return GpuVendor::parse(&raw).ok_or(Error::UnknownVendor(raw));
    }

    if let Some(path) = paths.config_file() {
        if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("failed to read {}: {e}", path.display()))
            })?;
            let parsed: ConfigFile = serde_json::from_str(&raw).map_err(|e| {
                Error::Config(format!("invalid config file {}: {e}", path.display()))
            })?;
            if let Some(raw_vendor) = parsed.vendor {
                return GpuVendor::parse(&raw_vendor).ok_or(Error::UnknownVendor(raw_vendor));
            }
        }
    }

    Ok(GpuVendor::default())
}
