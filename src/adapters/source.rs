use crate::domain::ports::DatasetSource;
use crate::utils::error::{MapError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_DATASET_PATH: &str = "hospitals.csv";

/// Dataset served over HTTP at `base_url/dataset_path`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
    client: Client,
}

impl HttpSource {
    pub fn new(base_url: &str, dataset_path: &str) -> Result<Self> {
        Ok(Self {
            url: dataset_url(base_url, dataset_path)?,
            client: Client::new(),
        })
    }

    pub fn from_url(url: Url) -> Self {
        Self {
            url,
            client: Client::new(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

pub fn dataset_url(base_url: &str, dataset_path: &str) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        dataset_path.trim_start_matches('/')
    );
    Ok(Url::parse(&joined)?)
}

#[async_trait]
impl DatasetSource for HttpSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn fetch_text(&self) -> Result<String> {
        let response = self.client.get(self.url.clone()).send().await?;
        tracing::debug!("Dataset response status: {}", response.status());

        if !response.status().is_success() {
            return Err(MapError::FetchStatus {
                url: self.url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Dataset read from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_text(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_url_joins_without_double_slash() {
        let url = dataset_url("https://example.org/app/", "/hospitals.csv").unwrap();
        assert_eq!(url.as_str(), "https://example.org/app/hospitals.csv");

        let url = dataset_url("https://example.org", DEFAULT_DATASET_PATH).unwrap();
        assert_eq!(url.as_str(), "https://example.org/hospitals.csv");
    }

    #[test]
    fn test_dataset_url_rejects_relative_base() {
        assert!(dataset_url("not a url", "x.csv").is_err());
    }

    #[tokio::test]
    async fn test_file_source_reads_text() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "Name\nA,1,2,E,C\n").unwrap();

        let text = FileSource::new(&path).fetch_text().await.unwrap();
        assert!(text.starts_with("Name"));
    }
}
