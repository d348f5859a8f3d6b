//! Error types for schema loading and validator construction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading a schema document.
///
/// A load failure never destroys store state: the failure message is
/// surfaced and the last-good schema (if any) stays in place.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Document errors
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("document does not match the form schema model: {source}")]
    InvalidSchema {
        #[source]
        source: serde_json::Error,
    },
}

/// Errors while building validators from a validation rule.
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_display() {
        let err = LoadError::FileNotFound {
            path: PathBuf::from("forms/signup.json"),
        };
        assert_eq!(err.to_string(), "file not found: forms/signup.json");
    }

    #[test]
    fn validator_error_display() {
        let source = regex::Regex::new("[").unwrap_err();
        let err = ValidatorError::InvalidPattern {
            pattern: "[".into(),
            source,
        };
        assert!(err.to_string().starts_with("invalid pattern \"[\""));
    }
}
