use std::path::PathBuf;
use thiserror::Error;

/// Error taxonomy for the acquire pipeline.
///
/// Every failure a target can hit maps onto one of three kinds, so callers
/// can match on what went wrong without inspecting message text.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// Network failure, timeout, or non-2xx response.
    #[error("fetch failed for {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A URL or service response was not in the expected shape.
    #[error("could not resolve '{target}': {reason}")]
    Resolution { target: String, reason: String },

    /// Local filesystem failure while writing the output file.
    #[error("could not write {}", path.display())]
    Download {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AcquireError {
    pub(crate) fn fetch(url: &str, source: reqwest::Error) -> Self {
        Self::Fetch {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn resolution(target: &str, reason: impl Into<String>) -> Self {
        Self::Resolution {
            target: target.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn download(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Download {
            path: path.into(),
            source,
        }
    }
}
