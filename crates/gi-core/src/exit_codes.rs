//! Exit codes for the gi-core CLI.
//!
//! Exit codes communicate operation outcome without requiring output
//! parsing. "No GPUs found" is a clean exit, not an error.

use gi_common::Error;

/// Exit codes for gi-core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Probe completed, including the no-GPU case
    Clean = 0,

    /// Configuration error
    ConfigError = 10,

    /// Probe error (tool invocation failed, or unit mismatch)
    ProbeError = 11,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }

    /// Check if this exit code indicates an error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Map a probe error to the exit code the CLI reports for it.
pub fn exit_code_for(error: &Error) -> ExitCode {
    match error {
        Error::Config(_) | Error::UnknownVendor(_) => ExitCode::ConfigError,
        Error::ToolExecution { .. } | Error::UnitMismatch { .. } => ExitCode::ProbeError,
        Error::Io(_) => ExitCode::IoError,
        Error::Json(_) => ExitCode::InternalError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_map_to_exit_codes() {
        assert_eq!(
            exit_code_for(&Error::Config("bad".into())),
            ExitCode::ConfigError
        );
        assert_eq!(
            exit_code_for(&Error::UnitMismatch {
                requested: "MiB".into(),
                reported: "GiB".into()
            }),
            ExitCode::ProbeError
        );
    }

    #[test]
    fn test_success_and_error_predicates() {
        assert!(ExitCode::Clean.is_success());
        assert!(!ExitCode::Clean.is_error());
        assert!(ExitCode::ConfigError.is_error());
        assert!(!ExitCode::ProbeError.is_success());
    }
}
