//! Dataset Fetcher Module
//! Downloads the raw XML export with a single blocking GET.

use log::{error, info};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Error downloading the XML file. Status code: {}", .0.as_u16())]
    Status(StatusCode),
}

impl NetworkError {
    /// HTTP status of a rejected request, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            NetworkError::Status(code) => Some(*code),
            NetworkError::Transport(e) => e.status(),
        }
    }
}

/// Blocking HTTP fetcher. No timeout and no retry: a stalled server stalls the run.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(None)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// GET `url`; only `200 OK` counts as success.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, NetworkError> {
        info!("Downloading {}", url);
        let response = self.client.get(url).send()?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("Download rejected with status {}", status.as_u16());
            return Err(NetworkError::Status(status));
        }

        let body = response.bytes()?;
        info!("Downloaded {} bytes", body.len());
        Ok(body.to_vec())
    }
}
