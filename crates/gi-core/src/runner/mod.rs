//! External tool invocation.
//!
//! The probe shells out to vendor CLI tools and parses their output.
//! This module owns the process boundary: the [`CommandRunner`] trait so
//! the parsing and dispatch layers can be exercised against canned
//! output, and [`SystemRunner`], the production implementation over
//! `std::process::Command`.
//!
//! No timeout is applied to the child process; a hung tool blocks the
//! calling thread. Callers needing responsiveness must run probes on a
//! worker they can abandon.

use thiserror::Error;
use tracing::debug;

/// Captured output of one tool invocation. Produced once per probe and
/// consumed by exactly one parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToolOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Errors from invoking an external tool.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The executable is not resolvable on the search path. The probe
    /// treats this as "no GPUs", never as a caller-visible error.
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// The tool ran but exited non-zero.
    #[error("{tool} exited with code {code}: {stderr}")]
    Execution {
        tool: String,
        code: i32,
        stderr: String,
    },

    /// Spawning or capturing failed for another reason.
    #[error("I/O error running {tool}: {source}")]
    Io {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}

/// Abstraction over external tool invocation.
///
/// `run` is deterministic given the same tool, arguments, and
/// environment. It returns `Ok` only when the tool exists and exits
/// zero; stdout is then the payload.
pub trait CommandRunner {
    fn run(&self, tool: &str, args: &[&str]) -> Result<RawToolOutput, RunnerError>;
}

/// Production runner over `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, tool: &str, args: &[&str]) -> Result<RawToolOutput, RunnerError> {
        debug!(tool, ?args, "invoking external tool");
        let output = std::process::Command::new(tool)
            .args(args)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RunnerError::ToolNotFound(tool.to_string())
                } else {
                    RunnerError::Io {
                        tool: tool.to_string(),
                        source: e,
                    }
                }
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let exit_code = output.status.code().unwrap_or(-1);

        if !output.status.success() {
            return Err(RunnerError::Execution {
                tool: tool.to_string(),
                code: exit_code,
                stderr,
            });
        }

        Ok(RawToolOutput {
            exit_code,
            stdout,
            stderr,
        })
    }
}
