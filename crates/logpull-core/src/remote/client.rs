//! Blocking HTTP client for the log server.

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use log::debug;
use log::info;
use reqwest::blocking::Client;
use reqwest::blocking::Response;

use super::listing::RemoteLog;
use super::listing::parse_listing;
use crate::LogpullError;
use crate::ProgressCallback;
use crate::RemoteConfig;
use crate::Result;
use crate::Timestamp;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;

/// Client for listing and downloading a device's log files.
///
/// Every request uses the configured timeout for both connecting and reading.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: String,
}

impl RemoteClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`LogpullError::Http`] if the HTTP client cannot be
    /// initialized.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Returns the listing URL for `device_id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use logpull_core::RemoteConfig;
    /// use logpull_core::remote::RemoteClient;
    ///
    /// let client = RemoteClient::new(&RemoteConfig::new("http://host:8080/logs/")).unwrap();
    /// assert_eq!(client.device_url("2060900675"), "http://host:8080/logs/2060900675");
    /// ```
    #[must_use]
    pub fn device_url(&self, device_id: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), device_id.trim())
    }

    /// Fetches the listing for `device_id` and returns the logs not older
    /// than `since`.
    ///
    /// # Errors
    ///
    /// Returns [`LogpullError::Http`] if the request fails or the server
    /// answers with a non-success status.
    pub fn list_logs(&self, device_id: &str, since: Timestamp) -> Result<Vec<RemoteLog>> {
        let url = self.device_url(device_id);
        info!("listing {url}");

        let body = self.get(&url)?.text()?;
        let logs = parse_listing(&body, &url, since);
        debug!("{} logs at or after {since}", logs.len());

        Ok(logs)
    }

    /// Downloads `logs` into `folder`, one file per log named after
    /// [`RemoteLog::file_name`].
    ///
    /// The folder is created if missing. Existing files with the same name
    /// are overwritten. Stops at the first failure; files already
    /// downloaded stay in place.
    ///
    /// # Errors
    ///
    /// Returns [`LogpullError::Http`] on request failure or non-success
    /// status, and [`LogpullError::Io`] if a file cannot be written.
    pub fn download(
        &self,
        logs: &[RemoteLog],
        folder: &Path,
        progress: &mut dyn ProgressCallback,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(folder)?;

        let mut copy_buffer = CopyBuffer::new();
        let mut written = Vec::with_capacity(logs.len());

        for (index, log) in logs.iter().enumerate() {
            let path = folder.join(&log.file_name);
            progress.on_entry_start(Path::new(&log.file_name), logs.len(), index + 1);
            debug!("downloading {} to {}", log.url, path.display());

            let mut response = self.get(&log.url)?;
            let mut writer = BufWriter::new(File::create(&path)?);
            let bytes = copy_with_buffer(&mut response, &mut writer, &mut copy_buffer)?;
            writer.flush()?;

            progress.on_bytes_written(bytes);
            progress.on_entry_complete(Path::new(&log.file_name));
            written.push(path);
        }

        progress.on_complete();
        info!("downloaded {} files into {}", written.len(), folder.display());

        Ok(written)
    }

    fn get(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send()?;
        let status = response.status();

        if !status.is_success() {
            return Err(LogpullError::Http(format!("GET {url} returned {status}")));
        }

        Ok(response)
    }
}
