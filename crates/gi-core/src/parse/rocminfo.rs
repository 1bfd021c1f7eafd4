//! rocminfo free-text agent parsing.
//!
//! `rocminfo` (no arguments) describes every HSA agent, CPUs and GPUs
//! alike, as a block of indented `Key: Value` lines, with blocks
//! delimited by lines of asterisks:
//!
//! ```text
//! *******
//! Agent 2
//! *******
//!   Name:                    gfx1030
//!   Uuid:                    GPU-364a3ea545a3b8bd
//!   Marketing Name:          AMD Radeon RX 6800 XT
//!   Node:                    1
//!   Device Type:             GPU
//! ```
//!
//! There is no grammar and no escaping: block boundaries and the GPU/CPU
//! distinction are inferred from the text. The parser is a two-state
//! machine over lines ([`State`] is the transition table's single source
//! of truth) and never fails: unrecognized lines are ignored, and
//! partial blocks keep whatever fields they had.

use crate::probe::types::GpuRecord;
use regex::Regex;
use std::sync::LazyLock;

/// A block separator is a line of nothing but asterisks.
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\*+\s*$").expect("separator regex"));

/// Parser states. A separator both ends the current block and opens the
/// next one, so after the first separator the parser stays `InBlock`
/// until the input runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the first separator: preamble (runtime version, system
    /// attributes) that belongs to no agent.
    Scanning,
    /// Inside an agent block, accumulating labeled lines.
    InBlock,
}

/// Accumulator for the block currently being read.
#[derive(Debug, Default)]
struct AgentBlock {
    name: Option<String>,
    uuid: Option<String>,
    node: Option<String>,
    /// Sticky: set when any `Name:` value looks like a GPU, never
    /// cleared within a block.
    is_gpu: bool,
}

impl AgentBlock {
    fn observe(&mut self, line: &str) {
        if let Some(value) = value_after(line, "Name:") {
            if value.contains("gfx") || value.contains("Radeon") {
                self.is_gpu = true;
            }
            self.name = Some(value);
        } else if let Some(value) = value_after(line, "Uuid:") {
            self.uuid = Some(value);
        } else if let Some(value) = value_after(line, "Node:") {
            self.node = Some(value);
        }
    }
}

/// Everything after the marker, trimmed. Matches anywhere in the line,
/// so `Marketing Name:` and `Vendor Name:` lines also hit the `Name:`
/// marker; the last match wins for the block's name, which is how the
/// `Radeon` marketing string can flag a block.
fn value_after(line: &str, marker: &str) -> Option<String> {
    line.find(marker)
        .map(|idx| line[idx + marker.len()..].trim().to_string())
}

/// Parse agent blocks into structured GPU records.
///
/// A block is emitted iff one of its `Name:` values contains `gfx` or
/// `Radeon` (case-sensitive, matching observed tool output). Emitted
/// records get sequential ids starting at `"0"`. The final block is
/// flushed at end of input since no trailing separator follows it.
pub fn parse_agent_blocks(raw: &str) -> Vec<GpuRecord> {
    let mut state = State::Scanning;
    let mut block = AgentBlock::default();
    let mut records = Vec::new();

    for line in raw.lines() {
        if SEPARATOR_RE.is_match(line) {
            flush(&mut block, &mut records);
            state = State::InBlock;
            continue;
        }
        if state == State::InBlock {
            block.observe(line);
        }
    }
    flush(&mut block, &mut records);

    records
}

fn flush(block: &mut AgentBlock, records: &mut Vec<GpuRecord>) {
    let done = std::mem::take(block);
    if done.is_gpu {
        records.push(GpuRecord {
            id: records.len().to_string(),
            name: done.name,
            memory_total_mib: None,
            memory_free_mib: None,
            uuid: done.uuid,
            node: done.node,
        });
    }
}

/// Identifier-only view: sequential integer ids (from 0) for every block
/// whose name contains `gfx`, `radeon`, or `gpu` case-insensitively.
///
/// This classifier is deliberately looser than [`parse_agent_blocks`]'s:
/// it ignores case and also accepts `gpu`, so the two views can disagree
/// on which blocks qualify (a block named `GFX90A` is counted here but
/// not emitted as a structured record). Both predicates ship as observed
/// in the wild; callers must not assume they agree.
pub fn gpu_agent_indices(raw: &str) -> Vec<u32> {
    const NEEDLES: [&str; 3] = ["gfx", "radeon", "gpu"];

    let mut state = State::Scanning;
    let mut qualifies = false;
    let mut indices = Vec::new();

    let close_block = |qualifies: &mut bool, indices: &mut Vec<u32>| {
        if *qualifies {
            indices.push(indices.len() as u32);
        }
        *qualifies = false;
    };

    for line in raw.lines() {
        if SEPARATOR_RE.is_match(line) {
            close_block(&mut qualifies, &mut indices);
            state = State::InBlock;
            continue;
        }
        if state == State::InBlock {
            if let Some(value) = value_after(line, "Name:") {
                let lower = value.to_ascii_lowercase();
                if NEEDLES.iter().any(|needle| lower.contains(needle)) {
                    qualifies = true;
                }
            }
        }
    }
    close_block(&mut qualifies, &mut indices);

    indices
}
