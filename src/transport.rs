use async_trait::async_trait;
use thiserror::Error;

use crate::traits::{FetchOptions, Transport};

const USER_AGENT: &str = concat!("sparkcast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to download appcast: {0}")]
    Request(#[source] reqwest::Error),

    #[error("appcast download failed with HTTP {status}{body_snippet}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body_snippet: String,
    },

    #[error("failed to read appcast file: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP(S) transport backed by a shared reqwest client.
#[derive(Default, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str, options: FetchOptions) -> Result<Vec<u8>, TransportError> {
        let mut request = self.client.get(url).header("User-Agent", USER_AGENT);
        if options.bypass_cache {
            request = request
                .header("Pragma", "no-cache")
                .header("Cache-Control", "no-cache");
        }

        let response = request.send().await.map_err(TransportError::Request)?;

        if !response.status().is_success() {
            let status = response.status();
            let body_snippet = response
                .text()
                .await
                .ok()
                .map(|body| response_snippet(&body, 160))
                .unwrap_or_default();
            return Err(TransportError::HttpStatus {
                status,
                body_snippet,
            });
        }

        let bytes = response.bytes().await.map_err(TransportError::Request)?;
        Ok(bytes.to_vec())
    }
}

fn response_snippet(body: &str, max_chars: usize) -> String {
    let snippet: String = body.chars().take(max_chars).collect();
    if snippet.is_empty() {
        String::new()
    } else {
        format!(": {snippet}")
    }
}

/// Reads the appcast from a local path; handy for development and tests.
#[derive(Default, Clone, Copy)]
pub struct FileTransport;

#[async_trait]
impl Transport for FileTransport {
    async fn fetch(&self, url: &str, _options: FetchOptions) -> Result<Vec<u8>, TransportError> {
        Ok(tokio::fs::read(url).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_transport_reads_local_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("appcast.xml");
        std::fs::write(&path, b"<rss/>").expect("write fixture");

        let bytes = FileTransport
            .fetch(path.to_str().expect("utf-8 path"), FetchOptions::default())
            .await
            .expect("fetch succeeds");
        assert_eq!(bytes, b"<rss/>");
    }

    #[tokio::test]
    async fn file_transport_reports_missing_files() {
        let result = FileTransport
            .fetch("/nonexistent/appcast.xml", FetchOptions::default())
            .await;
        assert!(matches!(result, Err(TransportError::Io(_))));
    }
}
