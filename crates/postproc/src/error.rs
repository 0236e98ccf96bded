// ABOUTME: Recoverable error types for loading annotated HTML and configuration.
// ABOUTME: Pass precondition violations are not represented here; they panic.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while loading documents or configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// A `data-parsoid` attribute did not hold a valid annotation record.
    #[error("invalid data-parsoid on <{tag}>: {source}")]
    InvalidDataParsoid {
        tag: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration data was malformed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A configuration or input file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn invalid_data_parsoid(tag: impl Into<String>, source: serde_json::Error) -> Self {
        Error::InvalidDataParsoid {
            tag: tag.into(),
            source,
        }
    }

    /// Creates a Config error from any displayable cause.
    pub fn config(err: impl fmt::Display) -> Self {
        Error::Config(err.to_string())
    }

    pub fn io(path: &Path, source: io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    pub fn is_invalid_data_parsoid(&self) -> bool {
        matches!(self, Error::InvalidDataParsoid { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. })
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::invalid_data_parsoid("td", bad);
        assert!(err.is_invalid_data_parsoid());
        assert!(err.to_string().starts_with("invalid data-parsoid on <td>: "));

        let err = Error::config("bad widths");
        assert_eq!(err.to_string(), "invalid configuration: bad widths");

        let err = Error::io(
            Path::new("/nope/widths.json"),
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.is_io());
        assert_eq!(err.to_string(), "failed to read /nope/widths.json: missing");
    }
}
