//! Exit codes following sysexits.h conventions.

use std::io;

/// Successful execution.
pub const SUCCESS: u8 = 0;

/// General error (catch-all).
pub const GENERAL_ERROR: u8 = 1;

/// Cannot open input file.
/// Maps to EX_NOINPUT from sysexits.h.
pub const INPUT_ERROR: u8 = 66;

/// Exit code plus the message printed to stderr.
#[derive(Debug)]
pub struct ExitStatus {
    pub code: u8,
    pub message: String,
}

impl ExitStatus {
    /// Classify an error by the first I/O error in its chain.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let code = if err.chain().any(|cause| cause.downcast_ref::<io::Error>().is_some()) {
            INPUT_ERROR
        } else {
            GENERAL_ERROR
        };

        Self {
            code,
            message: format!("{err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_io_errors_map_to_input_error() {
        let err = std::fs::read("/definitely/not/here")
            .context("Failed to read file: /definitely/not/here")
            .unwrap_err();
        let status = ExitStatus::from_anyhow(&err);

        assert_eq!(status.code, INPUT_ERROR);
        assert!(status.message.starts_with("Failed to read file"));
    }

    #[test]
    fn test_other_errors_are_general() {
        let err = anyhow::anyhow!("Failed to serialize result");
        assert_eq!(ExitStatus::from_anyhow(&err).code, GENERAL_ERROR);
    }
}
