//! Error types for GPU Inventory.

use thiserror::Error;

/// Result type alias for GPU Inventory operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for GPU Inventory.
///
/// Tool absence is deliberately not represented here: a missing probe
/// tool yields an empty result, not an error (see `gi-core`'s runner).
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown GPU vendor: {0}")]
    UnknownVendor(String),

    // Probe errors (20-29)
    #[error("{tool} exited with code {code}: {stderr}")]
    ToolExecution {
        tool: String,
        code: i32,
        stderr: String,
    },

    #[error("memory unit mismatch: requested {requested}, tool reported {reported}")]
    UnitMismatch { requested: String, reported: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::UnknownVendor(_) => 11,
            Error::ToolExecution { .. } => 20,
            Error::UnitMismatch { .. } => 21,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_context() {
        let e = Error::ToolExecution {
            tool: "nvidia-smi".into(),
            code: 6,
            stderr: "No devices were found".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("nvidia-smi"));
        assert!(msg.contains("No devices were found"));

        let e = Error::UnitMismatch {
            requested: "MiB".into(),
            reported: "GiB".into(),
        };
        assert!(e.to_string().contains("GiB"));
    }

    #[test]
    fn test_error_codes_are_grouped() {
        assert_eq!(Error::Config("x".into()).code(), 10);
        assert_eq!(
            Error::UnitMismatch {
                requested: "MiB".into(),
                reported: "GiB".into()
            }
            .code(),
            21
        );
    }
}
