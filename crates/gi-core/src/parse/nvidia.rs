//! nvidia-smi CSV output parsing.
//!
//! `nvidia-smi --query-gpu=<field> --format=csv` emits a header row
//! followed by one row per GPU. Memory queries produce `"<value> <unit>"`
//! rows; index queries produce bare integers. The snapshot path uses a
//! combined query with `csv,noheader,nounits` instead, one device per
//! row.

use super::{non_empty, parse_u64_opt};
use crate::probe::types::GpuRecord;
use gi_common::{Error, MemUnit, Result};

/// Parse a memory query (`memory.total` / `memory.free`) in header CSV
/// format.
///
/// Each data row is `"<integer> <unit>"`. The reported unit must equal
/// the requested one; there is no implicit conversion, and a mismatch is
/// a hard [`Error::UnitMismatch`]. Rows that are structurally not a
/// memory value (blank, missing unit, non-integer) are skipped. Empty
/// input yields an empty vector.
pub fn parse_memory_csv(raw: &str, unit: MemUnit) -> Result<Vec<u64>> {
    let mut values = Vec::new();
    for line in raw.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let (Some(value), Some(reported)) = (parts.next(), parts.next()) else {
            continue;
        };
        if reported != unit.as_str() {
            return Err(Error::UnitMismatch {
                requested: unit.as_str().to_string(),
                reported: reported.to_string(),
            });
        }
        if let Some(v) = parse_u64_opt(value) {
            values.push(v);
        }
    }
    Ok(values)
}

/// Parse an index query in header CSV format. Each data row is a bare
/// GPU index, used as the record identifier. Non-numeric rows are
/// skipped.
pub fn parse_index_csv(raw: &str) -> Vec<String> {
    raw.lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.chars().all(|c| c.is_ascii_digit()))
        .map(String::from)
        .collect()
}

/// Parse the combined device query used for snapshots:
/// `--query-gpu=index,name,uuid,memory.total,memory.free` with
/// `--format=csv,noheader,nounits`. Memory fields arrive as bare MiB
/// integers. Short or unparsable rows are skipped.
pub fn parse_device_csv(raw: &str) -> Vec<GpuRecord> {
    let mut records = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 5 {
            continue;
        }
        let memory_total_mib = parse_u64_opt(fields[3]);
        // Clamp so free never exceeds total, whatever the tool reports
        let memory_free_mib = match (memory_total_mib, parse_u64_opt(fields[4])) {
            (Some(total), Some(free)) => Some(free.min(total)),
            (_, free) => free,
        };
        records.push(GpuRecord {
            id: fields[0].to_string(),
            name: non_empty(fields[1]),
            memory_total_mib,
            memory_free_mib,
            uuid: non_empty(fields[2]),
            node: None,
        });
    }
    records
}
