// HTTP download helper: a small blocking client that streams a remote
// file to disk. The body goes to a temporary file next to the destination
// and is only renamed into place once it has been fully written, so a
// failed download never leaves a truncated file behind.

use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tempfile::NamedTempFile;

use crate::error::ActionError;

pub trait Fetcher {
    /// Download `url` into `dest`, returning the number of bytes written.
    fn fetch_to(&self, url: &str, dest: &Path) -> Result<u64, ActionError>;
}

/// Fetcher over a reqwest blocking client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new() -> Result<Self> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpFetcher { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_to(&self, url: &str, dest: &Path) -> Result<u64, ActionError> {
        let network = |source| ActionError::Network {
            url: url.to_string(),
            source,
        };
        let file_error = |source| ActionError::FileSystem {
            path: dest.to_path_buf(),
            source,
        };

        log::debug!("GET {url}");
        let mut res = self.client.get(url).send().map_err(network)?;
        if !res.status().is_success() {
            let status = res.status();
            log::warn!("GET {url} returned {status}");
            return Err(ActionError::Status {
                url: url.to_string(),
                status,
            });
        }

        let dir = match dest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(file_error)?;
        let written = stream_body(url, &mut res, &mut tmp, dest)?;
        tmp.flush().map_err(file_error)?;
        tmp.persist(dest).map_err(|err| file_error(err.error))?;

        log::debug!("wrote {written} bytes to {}", dest.display());
        Ok(written)
    }
}

/// Copy `body` into `out`, keeping read failures (the transfer) apart from
/// write failures (the local file).
fn stream_body<R: Read, W: Write>(
    url: &str,
    body: &mut R,
    out: &mut W,
    dest: &Path,
) -> Result<u64, ActionError> {
    let mut buf = [0u8; 8 * 1024];
    let mut written = 0u64;
    loop {
        let n = match body.read(&mut buf) {
            Ok(0) => return Ok(written),
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(ActionError::Transfer {
                    url: url.to_string(),
                    source,
                })
            }
        };
        out.write_all(&buf[..n])
            .map_err(|source| ActionError::FileSystem {
                path: dest.to_path_buf(),
                source,
            })?;
        written += n as u64;
    }
}
