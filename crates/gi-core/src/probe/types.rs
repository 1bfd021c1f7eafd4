//! Normalized probe result types.

use gi_common::SCHEMA_VERSION;
use gi_config::GpuVendor;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One GPU as reported by a vendor tool, normalized.
///
/// Memory values are always MiB; a record never mixes units. When both
/// memory fields are present, free never exceeds total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GpuRecord {
    /// Identifier unique within one probe result. Depending on the
    /// vendor and tool this is the reported index (`"0"`), the JSON key
    /// (`"card0"`), or a sequential position.
    pub id: String,
    /// Device name when the tool reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Total VRAM in MiB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_total_mib: Option<u64>,
    /// Free VRAM in MiB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_free_mib: Option<u64>,
    /// GPU UUID if available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Topology node if available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
}

/// Ordered GPU records, in the order the underlying tool reported them.
/// Never re-sorted.
pub type GpuInventory = Vec<GpuRecord>;

/// Which tool produced the probe data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProbeSource {
    /// Data from nvidia-smi.
    NvidiaSmi,
    /// Data from rocm-smi.
    RocmSmi,
    /// Data from rocminfo.
    Rocminfo,
    /// No probe tool was available.
    #[default]
    None,
}

/// Non-fatal parse failure, preserved with the offending output so
/// callers can inspect failures without scraping logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParseWarning {
    /// Tool whose output failed to parse.
    pub tool: String,
    /// What went wrong.
    pub message: String,
    /// The raw output that failed to parse.
    pub raw: String,
}

impl ParseWarning {
    pub fn new(
        tool: impl Into<String>,
        message: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            message: message.into(),
            raw: raw.into(),
        }
    }
}

/// Provenance for one probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProbeProvenance {
    /// Which tool provided the data.
    pub source: ProbeSource,
    /// Non-fatal issues encountered during the probe.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ParseWarning>,
}

/// One-shot snapshot of the host's GPUs.
///
/// Constructed fresh on every probe call, never cached, never mutated
/// after construction.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProbeSnapshot {
    /// Schema version of this JSON shape.
    pub schema_version: String,
    /// RFC 3339 timestamp of when the probe ran.
    pub generated_at: String,
    /// Vendor the probe was directed at.
    pub vendor: GpuVendor,
    /// Whether any GPU was detected.
    pub has_gpu: bool,
    /// Detected devices, in tool order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub devices: GpuInventory,
    /// Provenance tracking.
    pub provenance: ProbeProvenance,
}

impl ProbeSnapshot {
    /// Build a snapshot, stamping schema version and probe time.
    pub fn new(vendor: GpuVendor, devices: GpuInventory, provenance: ProbeProvenance) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            vendor,
            has_gpu: !devices.is_empty(),
            devices,
            provenance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> GpuRecord {
        GpuRecord {
            id: id.to_string(),
            name: Some("gfx1030".into()),
            memory_total_mib: Some(16384),
            memory_free_mib: Some(12288),
            uuid: None,
            node: None,
        }
    }

    #[test]
    fn test_snapshot_has_gpu_tracks_devices() {
        let empty = ProbeSnapshot::new(GpuVendor::Amd, Vec::new(), ProbeProvenance::default());
        assert!(!empty.has_gpu);

        let one = ProbeSnapshot::new(
            GpuVendor::Amd,
            vec![record("card0")],
            ProbeProvenance::default(),
        );
        assert!(one.has_gpu);
        assert_eq!(one.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_snapshot_serde_roundtrip() {
        let snap = ProbeSnapshot::new(
            GpuVendor::Amd,
            vec![record("card0"), record("card1")],
            ProbeProvenance {
                source: ProbeSource::RocmSmi,
                warnings: vec![ParseWarning::new("rocm-smi", "truncated", "{...")],
            },
        );
        let json = serde_json::to_string(&snap).unwrap();
        let restored: ProbeSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.devices.len(), 2);
        assert_eq!(restored.provenance.source, ProbeSource::RocmSmi);
        assert_eq!(restored.provenance.warnings.len(), 1);
    }

    #[test]
    fn test_optional_fields_are_omitted_from_json() {
        let bare = GpuRecord {
            id: "0".into(),
            name: None,
            memory_total_mib: None,
            memory_free_mib: None,
            uuid: None,
            node: None,
        };
        let json = serde_json::to_string(&bare).unwrap();
        assert_eq!(json, r#"{"id":"0"}"#);
    }

    #[test]
    fn test_probe_source_serde_spelling() {
        assert_eq!(
            serde_json::to_string(&ProbeSource::NvidiaSmi).unwrap(),
            "\"nvidia_smi\""
        );
        assert_eq!(
            serde_json::to_string(&ProbeSource::Rocminfo).unwrap(),
            "\"rocminfo\""
        );
    }
}
