//! HTTP GET capability used by the archive loop.
//!
//! The loop only needs "fetch this URL into memory or fail", so it is written
//! against the [`Fetch`] trait. [`CurlFetcher`] is the libcurl-backed
//! implementation; tests substitute an in-memory one.

mod http;
mod status;

pub use http::{CurlFetcher, FetchOptions};
pub use status::reason_from_status_line;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Request never produced a response (DNS, connect, read, bad URL).
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },
    /// Response arrived with a status other than 200; its body was discarded.
    #[error("GET {url}: unexpected status {status}")]
    Status { url: String, code: u32, status: String },
}

impl FetchError {
    pub fn transport(url: &str, source: impl Into<BoxError>) -> Self {
        FetchError::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }

    /// HTTP status code, if the failure was a non-200 response.
    pub fn status_code(&self) -> Option<u32> {
        match self {
            FetchError::Status { code, .. } => Some(*code),
            FetchError::Transport { .. } => None,
        }
    }
}

/// Blocking GET returning the full response body on HTTP 200.
///
/// Any other status is an error and the body is never handed to the caller.
pub trait Fetch {
    fn fetch(&mut self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<F: Fetch + ?Sized> Fetch for &mut F {
    fn fetch(&mut self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url)
    }
}
