//! GPU probe facade: vendor dispatch and degradation policy.
//!
//! A probe is one-shot and synchronous: each query performs its external
//! tool invocation(s), waits for completion, and returns a fresh result.
//! Nothing is cached between calls, and the vendor selection is an
//! injected configuration value rather than process-wide state.
//!
//! # Degradation policy
//! - Tool absent from the search path: empty result, debug log, no error.
//! - Tool present but exits non-zero: hard error with captured stderr.
//! - Tool present but output malformed: warning in provenance, partial
//!   or empty result.

pub mod types;

use crate::parse::{nvidia, rocm_json, rocminfo};
use crate::runner::{CommandRunner, RawToolOutput, RunnerError, SystemRunner};
use gi_common::{Error, MemUnit, Result};
use gi_config::{GpuVendor, ProbeConfig};
use tracing::{debug, warn};
use types::{GpuInventory, ParseWarning, ProbeProvenance, ProbeSnapshot, ProbeSource};

const NVIDIA_SMI: &str = "nvidia-smi";
const ROCM_SMI: &str = "rocm-smi";
const ROCMINFO: &str = "rocminfo";

const ROCM_SMI_VRAM_ARGS: [&str; 3] = ["--showmeminfo", "vram", "--json"];

/// GPU inventory probe over an injected command runner.
pub struct GpuProbe<R: CommandRunner> {
    runner: R,
    config: ProbeConfig,
}

impl GpuProbe<SystemRunner> {
    /// Probe using the real tools on the search path.
    pub fn with_system_runner(config: ProbeConfig) -> Self {
        Self::new(SystemRunner::new(), config)
    }
}

impl<R: CommandRunner> GpuProbe<R> {
    pub fn new(runner: R, config: ProbeConfig) -> Self {
        Self { runner, config }
    }

    pub fn vendor(&self) -> GpuVendor {
        self.config.vendor
    }

    /// Host GPU identifiers, in tool order.
    ///
    /// NVIDIA ids are the reported indices. AMD ids are the rocm-smi
    /// JSON keys (`card0`, ...); when rocm-smi is absent but rocminfo
    /// exists, sequential agent indices stand in.
    pub fn gpu_ids(&self) -> Result<Vec<String>> {
        match self.config.vendor {
            GpuVendor::Nvidia => {
                let Some(raw) = self.run_tool(NVIDIA_SMI, &["--query-gpu=index", "--format=csv"])?
                else {
                    return Ok(Vec::new());
                };
                Ok(nvidia::parse_index_csv(&raw.stdout))
            }
            GpuVendor::Amd => {
                if let Some(raw) = self.run_tool(ROCM_SMI, &ROCM_SMI_VRAM_ARGS)? {
                    let report = rocm_json::parse_vram_json(&raw.stdout);
                    log_warnings(&report.warnings);
                    return Ok(report.cards.into_iter().map(|card| card.id).collect());
                }
                let Some(raw) = self.run_tool(ROCMINFO, &[])? else {
                    return Ok(Vec::new());
                };
                Ok(rocminfo::gpu_agent_indices(&raw.stdout)
                    .iter()
                    .map(u32::to_string)
                    .collect())
            }
        }
    }

    /// Total memory per GPU in the requested unit, in tool order.
    pub fn gpu_memory_total(&self, unit: MemUnit) -> Result<Vec<u64>> {
        match self.config.vendor {
            GpuVendor::Nvidia => self.nvidia_memory_query("memory.total", unit),
            GpuVendor::Amd => Ok(self
                .amd_vram_cards()?
                .iter()
                .map(|card| unit.from_bytes(card.total_bytes))
                .collect()),
        }
    }

    /// Free memory per GPU in the requested unit, in tool order.
    pub fn gpu_memory_free(&self, unit: MemUnit) -> Result<Vec<u64>> {
        match self.config.vendor {
            GpuVendor::Nvidia => self.nvidia_memory_query("memory.free", unit),
            GpuVendor::Amd => Ok(self
                .amd_vram_cards()?
                .iter()
                .map(|card| unit.from_bytes(card.free_bytes()))
                .collect()),
        }
    }

    /// Full per-device snapshot.
    pub fn snapshot(&self) -> Result<ProbeSnapshot> {
        match self.config.vendor {
            GpuVendor::Nvidia => self.nvidia_snapshot(),
            GpuVendor::Amd => self.amd_snapshot(),
        }
    }

    fn nvidia_memory_query(&self, field: &str, unit: MemUnit) -> Result<Vec<u64>> {
        let query = format!("--query-gpu={field}");
        let Some(raw) = self.run_tool(NVIDIA_SMI, &[&query, "--format=csv"])? else {
            return Ok(Vec::new());
        };
        nvidia::parse_memory_csv(&raw.stdout, unit)
    }

    fn amd_vram_cards(&self) -> Result<Vec<rocm_json::VramCard>> {
        let Some(raw) = self.run_tool(ROCM_SMI, &ROCM_SMI_VRAM_ARGS)? else {
            return Ok(Vec::new());
        };
        let report = rocm_json::parse_vram_json(&raw.stdout);
        log_warnings(&report.warnings);
        Ok(report.cards)
    }

    fn nvidia_snapshot(&self) -> Result<ProbeSnapshot> {
        let Some(raw) = self.run_tool(
            NVIDIA_SMI,
            &[
                "--query-gpu=index,name,uuid,memory.total,memory.free",
                "--format=csv,noheader,nounits",
            ],
        )?
        else {
            return Ok(ProbeSnapshot::new(
                GpuVendor::Nvidia,
                Vec::new(),
                ProbeProvenance::default(),
            ));
        };
        let devices = nvidia::parse_device_csv(&raw.stdout);
        Ok(ProbeSnapshot::new(
            GpuVendor::Nvidia,
            devices,
            ProbeProvenance {
                source: ProbeSource::NvidiaSmi,
                warnings: Vec::new(),
            },
        ))
    }

    /// AMD snapshots combine both tools: rocminfo contributes the
    /// structured records (name, uuid, node), rocm-smi the memory
    /// values, merged positionally. Whichever tool is present wins;
    /// neither present yields an empty snapshot.
    fn amd_snapshot(&self) -> Result<ProbeSnapshot> {
        let mut source = ProbeSource::None;
        let mut warnings: Vec<ParseWarning> = Vec::new();

        let mut devices: GpuInventory = match self.run_tool(ROCMINFO, &[])? {
            Some(raw) => {
                source = ProbeSource::Rocminfo;
                rocminfo::parse_agent_blocks(&raw.stdout)
            }
            None => Vec::new(),
        };

        if let Some(raw) = self.run_tool(ROCM_SMI, &ROCM_SMI_VRAM_ARGS)? {
            source = ProbeSource::RocmSmi;
            let report = rocm_json::parse_vram_json(&raw.stdout);
            log_warnings(&report.warnings);
            warnings.extend(report.warnings);

            if devices.is_empty() {
                devices = report.cards.iter().map(rocm_json::VramCard::to_record).collect();
            } else {
                for (device, card) in devices.iter_mut().zip(report.cards.iter()) {
                    device.memory_total_mib = Some(MemUnit::MiB.from_bytes(card.total_bytes));
                    device.memory_free_mib = Some(MemUnit::MiB.from_bytes(card.free_bytes()));
                }
            }
        }

        Ok(ProbeSnapshot::new(
            GpuVendor::Amd,
            devices,
            ProbeProvenance { source, warnings },
        ))
    }

    /// Run one tool. Absence maps to `Ok(None)`; a non-zero exit is a
    /// hard error carrying the captured stderr.
    fn run_tool(&self, tool: &str, args: &[&str]) -> Result<Option<RawToolOutput>> {
        match self.runner.run(tool, args) {
            Ok(output) => Ok(Some(output)),
            Err(RunnerError::ToolNotFound(t)) => {
                debug!(tool = %t, "tool not found on search path, reporting no GPUs");
                Ok(None)
            }
            Err(RunnerError::Execution { tool, code, stderr }) => {
                Err(Error::ToolExecution { tool, code, stderr })
            }
            Err(RunnerError::Io { tool, source }) => Err(Error::Io(std::io::Error::new(
                source.kind(),
                format!("{tool}: {source}"),
            ))),
        }
    }
}

fn log_warnings(warnings: &[ParseWarning]) {
    for w in warnings {
        warn!(tool = %w.tool, message = %w.message, raw = %w.raw, "degraded parse");
    }
}
