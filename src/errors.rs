//! Typed errors for loading engagements.
//!
//! Classification itself is total and has no error type; everything that
//! can fail happens while fetching or decoding the engagement list.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from an [`EngagementSource`](crate::source::EngagementSource).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("No API token configured. Set PIPELINE_API_TOKEN or [api].token in triage.toml")]
    MissingToken,

    #[error("Request to {url} was rejected with status {status}; check the API token")]
    Unauthorized { url: String, status: u16 },

    #[error("Request to {url} failed with status {status}: {body}")]
    Http {
        url: String,
        status: u16,
        body: String,
    },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode engagements from {origin}: {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read engagements from {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_error_unauthorized_carries_status() {
        let err = SourceError::Unauthorized {
            url: "https://api.example/engagements".to_string(),
            status: 401,
        };
        match &err {
            SourceError::Unauthorized { status, .. } => assert_eq!(*status, 401),
            _ => panic!("Expected Unauthorized"),
        }
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("check the API token"));
    }

    #[test]
    fn source_error_file_read_carries_path() {
        let path = PathBuf::from("/tmp/engagements.json");
        let err = SourceError::FileRead {
            path: path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        match &err {
            SourceError::FileRead { path: p, source } => {
                assert_eq!(p, &path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected FileRead"),
        }
    }

    #[test]
    fn source_error_decode_exposes_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SourceError::Decode {
            origin: "stdin".to_string(),
            source: json_err,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("Failed to decode engagements from stdin"));
    }

    #[test]
    fn source_error_missing_token_mentions_env_var() {
        assert!(
            SourceError::MissingToken
                .to_string()
                .contains("PIPELINE_API_TOKEN")
        );
    }
}
