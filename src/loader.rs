//! Schema document loading from files, strings, and HTTP URLs.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::LoadError;
use crate::linter::{lint_schema, Severity};
use crate::schema::FormSchema;

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Load a schema document from a file path.
///
/// # Errors
///
/// Returns [`LoadError::FileNotFound`] if the file doesn't exist,
/// [`LoadError::InvalidJson`] if it isn't valid JSON, or
/// [`LoadError::InvalidSchema`] if the JSON doesn't match the form model.
pub fn load_schema(path: &Path) -> Result<FormSchema, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    parse_schema(&content)
}

/// Load a schema document from a JSON string.
pub fn load_schema_str(content: &str) -> Result<FormSchema, LoadError> {
    parse_schema(content)
}

/// Load a schema document from an HTTP/HTTPS URL.
///
/// Requires the `remote` feature (enabled by default).
///
/// # Errors
///
/// Returns [`LoadError::NetworkError`] if the request fails or the server
/// answers with an error status.
#[cfg(feature = "remote")]
pub fn load_schema_url(url: &str) -> Result<FormSchema, LoadError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|source| LoadError::NetworkError {
            url: url.to_string(),
            source,
        })?;

    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|source| LoadError::NetworkError {
            url: url.to_string(),
            source,
        })?;

    let body = response.text().map_err(|source| LoadError::NetworkError {
        url: url.to_string(),
        source,
    })?;

    parse_schema(&body)
}

/// Load a schema from a file path or URL, detected by prefix.
///
/// URL loading requires the `remote` feature.
pub fn load_schema_auto(source: &str) -> Result<FormSchema, LoadError> {
    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_schema_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(LoadError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_schema(Path::new(source))
    }
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Parse and lint a schema document.
///
/// Lint findings do not fail the load; invariant violations are logged so
/// a malformed document is visible before it drives a form.
fn parse_schema(content: &str) -> Result<FormSchema, LoadError> {
    let schema: FormSchema =
        serde_json::from_str(content).map_err(|source| match source.classify() {
            serde_json::error::Category::Data => LoadError::InvalidSchema { source },
            _ => LoadError::InvalidJson { source },
        })?;

    let report = lint_schema(&schema);
    for diagnostic in &report.diagnostics {
        match diagnostic.severity {
            Severity::Error => warn!(
                schema = %schema.id,
                field = %diagnostic.field,
                code = diagnostic.code,
                "{}",
                diagnostic.message
            ),
            Severity::Warning => debug!(
                schema = %schema.id,
                field = %diagnostic.field,
                code = diagnostic.code,
                "{}",
                diagnostic.message
            ),
        }
    }

    Ok(schema)
}
