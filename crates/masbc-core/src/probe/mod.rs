//! HTTP HEAD existence probes.
//!
//! Uses the curl crate (libcurl) to ask the run archive whether a file
//! exists without transferring it. The status code decides; headers are
//! kept for logging.

mod parse;

use crate::config::Timeouts;
use anyhow::{Context, Result};
use std::str;

/// Outcome of a HEAD request that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    /// Final HTTP status after redirects.
    pub status: u32,
    /// Size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
    /// `Last-Modified` value if present.
    pub last_modified: Option<String>,
}

impl ProbeResponse {
    /// Statuses below 400 count as "the file is there".
    pub fn exists(&self) -> bool {
        self.status < 400
    }
}

/// Anything that can answer a HEAD request. `Err` means the request never
/// produced a status (DNS, refused connection, timeout).
pub trait Prober {
    fn head(&self, url: &str) -> Result<ProbeResponse>;
}

/// Blocking libcurl prober.
#[derive(Debug, Clone, Default)]
pub struct CurlProber {
    timeouts: Timeouts,
}

impl CurlProber {
    pub fn new(timeouts: Timeouts) -> Self {
        Self { timeouts }
    }
}

impl Prober for CurlProber {
    /// Follows redirects. Runs in the current thread.
    fn head(&self, url: &str) -> Result<ProbeResponse> {
        let mut headers: Vec<String> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.nobody(true)?; // HEAD request
        easy.follow_location(true)?;
        easy.connect_timeout(self.timeouts.connect())?;
        easy.timeout(self.timeouts.probe())?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.perform().context("HEAD request failed")?;
        }

        let status = easy.response_code().context("no response code")?;
        Ok(parse::parse_headers(status, &headers))
    }
}
