//! Client for the remote preview service, with local fallback.
//!
//! The service is an alternate producer of the exact [`ImportResult`] shape
//! the local pipeline emits. Callers try it first and fall back to parsing
//! locally on any failure (network error, non-success status, shape
//! mismatch), so consumers never branch on which producer ran beyond a
//! cosmetic indicator.

use std::io::Read;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::importer::{SourceFormat, parse_str};
use crate::result::ImportResult;

/// Default timeout for preview requests (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur talking to the preview service.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP error {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Response did not match the import result shape: {0}")]
    Shape(#[from] serde_json::Error),
}

impl From<ureq::Error> for RemoteError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => RemoteError::HttpStatus {
                status: code,
                message: format!("Server returned status {code}"),
            },
            _ => RemoteError::Network(err.to_string()),
        }
    }
}

/// Which producer generated an import result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Producer {
    /// The remote preview service validated the file.
    Server,
    /// The local pipeline parsed the file.
    Local,
}

#[derive(Serialize)]
struct PreviewRequest<'a> {
    content: &'a str,
    format: SourceFormat,
}

/// Ask the preview service to parse the given content.
///
/// POSTs the content and declared format as JSON and deserializes the
/// service's `ImportResult`. Every failure mode is an error; use
/// [`parse_with_fallback`] for the standard try-remote-then-local flow.
pub fn parse_remote(
    url: &str,
    content: &str,
    format: SourceFormat,
) -> Result<ImportResult, RemoteError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(RemoteError::InvalidUrl(format!(
            "URL must start with http:// or https://: {url}"
        )));
    }

    let body = serde_json::to_string(&PreviewRequest { content, format })?;

    let config = ureq::Agent::config_builder()
        .timeout_global(Some(DEFAULT_TIMEOUT))
        .build();
    let agent = ureq::Agent::new_with_config(config);

    let response = agent
        .post(url)
        .header("Content-Type", "application/json")
        .send(&body)?;

    let mut reader = response.into_body().into_reader();
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    Ok(serde_json::from_str::<ImportResult>(&text)?)
}

/// Try the preview service, falling back to the local pipeline.
///
/// Both producers emit the same result shape; the returned [`Producer`]
/// only feeds the "validated by server / parsed locally" indicator.
pub fn parse_with_fallback(
    url: &str,
    content: &str,
    format: SourceFormat,
) -> (ImportResult, Producer) {
    match parse_remote(url, content, format) {
        Ok(result) => (result, Producer::Server),
        Err(e) => {
            log::warn!("remote preview failed, parsing locally: {e}");
            (parse_str(content, format), Producer::Local)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_url() {
        let err = parse_remote("ftp://example.com", "text\nq?\n", SourceFormat::Csv);
        assert!(matches!(err, Err(RemoteError::InvalidUrl(_))));
    }

    #[test]
    fn test_fallback_parses_locally() {
        let (result, producer) =
            parse_with_fallback("not-a-url", "text\nWhat is your name?\n", SourceFormat::Csv);
        assert_eq!(producer, Producer::Local);
        assert!(result.is_previewable());
        assert_eq!(result.questions.len(), 1);
    }
}
