//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: color error (unparseable color, unknown gamut or strategy)
//! - 12: input error (non-finite numbers, zero gradient steps)
//! - 13: serialization error

use okgamut_core::ColorError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A color-level error (bad hex or components, unknown name).
    Color(ColorError),
    /// A user input error outside color parsing.
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Color(_) => 10,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Color(e) => write!(f, "{e}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<ColorError> for CliError {
    fn from(e: ColorError) -> Self {
        CliError::Color(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_error_exit_code_is_10() {
        let err = CliError::Color(ColorError::UnknownGamut("rec2020".into()));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        let err = CliError::Input("steps must be at least 1".into());
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        let err = CliError::Serialization("json fail".into());
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn from_color_error_keeps_message() {
        let cli_err = CliError::from(ColorError::InvalidColor("#zzz".into()));
        assert_eq!(cli_err.exit_code(), 10);
        assert!(cli_err.to_string().contains("#zzz"));
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }
}
