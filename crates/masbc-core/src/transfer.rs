//! Single-stream HTTP GET of one boundary file into the cache.

use crate::config::Timeouts;
use crate::error::BoundaryError;
use crate::storage::StorageWriter;
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

/// Downloads `url` to `dest`, replacing any previous copy only on success.
pub trait Transfer {
    /// Returns the number of bytes written.
    fn download(&self, url: &str, dest: &Path) -> Result<u64, BoundaryError>;
}

/// Blocking libcurl downloader.
#[derive(Debug, Clone, Default)]
pub struct CurlTransfer {
    timeouts: Timeouts,
}

impl CurlTransfer {
    pub fn new(timeouts: Timeouts) -> Self {
        Self { timeouts }
    }

    fn download_into(&self, url: &str, storage: &mut StorageWriter) -> Result<()> {
        let mut write_error: Option<anyhow::Error> = None;

        let mut easy = curl::easy::Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.timeouts.connect())?;
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(Duration::from_secs(60))?;
        easy.timeout(self.timeouts.download())?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match storage.write(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    write_error = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };
        if let Some(e) = write_error {
            return Err(e);
        }
        performed.context("GET request failed")?;

        let code = easy.response_code().context("no response code")?;
        if !(200..300).contains(&code) {
            anyhow::bail!("GET {} returned HTTP {}", url, code);
        }
        Ok(())
    }
}

impl Transfer for CurlTransfer {
    fn download(&self, url: &str, dest: &Path) -> Result<u64, BoundaryError> {
        let mut storage =
            StorageWriter::create(dest).map_err(|e| BoundaryError::download(url, format!("{e:#}")))?;

        match self.download_into(url, &mut storage) {
            Ok(()) => storage
                .finalize()
                .map_err(|e| BoundaryError::download(url, format!("{e:#}"))),
            Err(e) => {
                storage.discard();
                Err(BoundaryError::download(url, format!("{e:#}")))
            }
        }
    }
}
