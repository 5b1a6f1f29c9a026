//! libcurl-backed [`Fetch`] implementation.

use super::{reason_from_status_line, Fetch, FetchError};
use std::str;
use std::time::Duration;

/// Redirect hop limit, matching common HTTP client defaults.
const MAX_REDIRECTS: u32 = 10;

/// Transport knobs. Defaults leave every timeout to libcurl.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub user_agent: Option<String>,
    pub connect_timeout: Option<Duration>,
}

/// Sequential GETs over a single reused curl `Easy` handle.
pub struct CurlFetcher {
    easy: curl::easy::Easy,
}

impl CurlFetcher {
    pub fn new(opts: &FetchOptions) -> Result<Self, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        if let Some(ua) = &opts.user_agent {
            easy.useragent(ua)?;
        }
        if let Some(t) = opts.connect_timeout {
            easy.connect_timeout(t)?;
        }
        Ok(Self { easy })
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&mut self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut body = Vec::new();
        // Last status line seen; earlier ones belong to redirects.
        let mut status_line: Option<String> = None;

        self.easy
            .url(url)
            .map_err(|e| FetchError::transport(url, e))?;
        {
            let mut transfer = self.easy.transfer();
            transfer
                .header_function(|data| {
                    if let Ok(s) = str::from_utf8(data) {
                        if s.starts_with("HTTP/") {
                            status_line = Some(s.trim_end().to_string());
                        }
                    }
                    true
                })
                .map_err(|e| FetchError::transport(url, e))?;
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(|e| FetchError::transport(url, e))?;
            transfer
                .perform()
                .map_err(|e| FetchError::transport(url, e))?;
        }

        let code = self
            .easy
            .response_code()
            .map_err(|e| FetchError::transport(url, e))?;
        if code != 200 {
            let status = reason_from_status_line(status_line.as_deref(), code);
            tracing::debug!(url, code, discarded = body.len(), "non-200 response");
            return Err(FetchError::Status {
                url: url.to_string(),
                code,
                status,
            });
        }
        Ok(body)
    }
}
