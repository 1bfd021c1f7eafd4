//! rocm-smi JSON VRAM report parsing.
//!
//! `rocm-smi --showmeminfo vram --json` emits an object keyed by device
//! id, with byte-denominated fields:
//!
//! ```json
//! {
//!   "card0": {
//!     "VRAM Total Memory (B)": "68719476736",
//!     "VRAM Total Used Memory (B)": "17179869184"
//!   }
//! }
//! ```
//!
//! Device ids keep the object's insertion order as emitted by the tool.
//! Byte fields are kept raw here; unit conversion happens at the probe
//! layer so any requested unit converts from the exact byte count.
//!
//! # Graceful Degradation
//! Malformed or non-JSON input never fails the probe: the parser reports
//! a [`ParseWarning`] carrying the raw output and returns an empty
//! result.

use crate::probe::types::{GpuRecord, ParseWarning};
use gi_common::MemUnit;
use regex::Regex;
use std::sync::LazyLock;

const TOTAL_KEY: &str = "VRAM Total Memory (B)";
const USED_KEY: &str = "VRAM Total Used Memory (B)";

/// Device keys look like "card0", "card1", etc. Other keys (some
/// rocm-smi versions emit a "system" block) are skipped.
static CARD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^card\d+$").expect("card regex"));

/// One device's VRAM accounting, in raw bytes. Absent fields default to
/// zero, matching the tool's own "no data" encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VramCard {
    /// JSON key, e.g. "card0".
    pub id: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
}

impl VramCard {
    /// Free bytes, clamped so free never exceeds total.
    pub fn free_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.used_bytes)
    }

    /// Normalize into a [`GpuRecord`] (memory in MiB).
    pub fn to_record(&self) -> GpuRecord {
        GpuRecord {
            id: self.id.clone(),
            name: None,
            memory_total_mib: Some(MemUnit::MiB.from_bytes(self.total_bytes)),
            memory_free_mib: Some(MemUnit::MiB.from_bytes(self.free_bytes())),
            uuid: None,
            node: None,
        }
    }
}

/// Outcome of parsing one rocm-smi JSON payload.
#[derive(Debug, Default)]
pub struct VramReport {
    /// Devices in the tool's reporting order.
    pub cards: Vec<VramCard>,
    /// Non-fatal parse failures.
    pub warnings: Vec<ParseWarning>,
}

/// Parse a rocm-smi VRAM report.
pub fn parse_vram_json(raw: &str) -> VramReport {
    let mut report = VramReport::default();

    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            report.warnings.push(ParseWarning::new(
                "rocm-smi",
                format!("JSON parse error: {e}"),
                raw,
            ));
            return report;
        }
    };

    let Some(object) = value.as_object() else {
        report.warnings.push(ParseWarning::new(
            "rocm-smi",
            "expected a JSON object keyed by device id",
            raw,
        ));
        return report;
    };

    for (key, card) in object {
        if !CARD_RE.is_match(key) {
            continue;
        }
        report.cards.push(VramCard {
            id: key.clone(),
            total_bytes: byte_field(card, TOTAL_KEY).unwrap_or(0),
            used_bytes: byte_field(card, USED_KEY).unwrap_or(0),
        });
    }

    report
}

/// rocm-smi encodes byte counts as strings; some versions emit numbers.
fn byte_field(card: &serde_json::Value, key: &str) -> Option<u64> {
    let value = card.get(key)?;
    value
        .as_str()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .or_else(|| value.as_u64())
}
