use common::DecorativeImage;
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::ImageSource;

/// Entry of a thecatapi/thedogapi search response.
#[derive(Debug, Deserialize)]
struct ImageRecord {
    url: String,
}

/// Fetches the decorative images shown beside the charts.
///
/// Failures never propagate: whatever goes wrong, the image is simply absent.
#[derive(Debug, Clone)]
pub struct ImageClient {
    client: Client,
    sources: Vec<ImageSource>,
}

impl ImageClient {
    pub fn new(sources: Vec<ImageSource>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, sources })
    }

    pub fn sources(&self) -> &[ImageSource] {
        &self.sources
    }

    /// Fetches every configured image concurrently, keeping configuration order.
    pub async fn fetch_all(&self) -> Vec<DecorativeImage> {
        join_all(self.sources.iter().map(|source| self.fetch(source))).await
    }

    #[instrument(skip(self), fields(url = %source.url))]
    pub async fn fetch(&self, source: &ImageSource) -> DecorativeImage {
        DecorativeImage {
            caption: source.caption.clone(),
            url: self.lookup(&source.url).await,
        }
    }

    async fn lookup(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Image request failed: {}", e);
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            warn!("Image API answered {}", response.status());
            return None;
        }

        match response.json::<Vec<ImageRecord>>().await {
            Ok(records) => {
                let url = records.into_iter().next().map(|record| record.url);
                if url.is_none() {
                    warn!("Image API returned no results");
                }
                debug!(?url, "Image resolved");
                url
            }
            Err(e) => {
                warn!("Malformed image API response: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::spawn_image_stub;
    use axum::http::StatusCode as AxumStatus;

    fn client(sources: Vec<ImageSource>) -> ImageClient {
        ImageClient::new(sources, Duration::from_secs(2)).unwrap()
    }

    fn source(caption: &str, url: String) -> ImageSource {
        ImageSource {
            caption: caption.to_string(),
            url,
        }
    }

    #[tokio::test]
    async fn test_first_result_url_is_used() {
        let url = spawn_image_stub(
            AxumStatus::OK,
            r#"[{"id":"a","url":"https://cdn.example/cat.gif"},{"url":"https://cdn.example/other.gif"}]"#,
        )
        .await;

        let image = client(vec![]).fetch(&source("Random Cat GIF", url)).await;
        assert_eq!(image.caption, "Random Cat GIF");
        assert_eq!(image.url.as_deref(), Some("https://cdn.example/cat.gif"));
    }

    #[tokio::test]
    async fn test_non_200_means_no_image() {
        let url = spawn_image_stub(
            AxumStatus::SERVICE_UNAVAILABLE,
            r#"[{"url":"https://cdn.example/cat.gif"}]"#,
        )
        .await;

        let image = client(vec![]).fetch(&source("Random Cat GIF", url)).await;
        assert_eq!(image.caption, "Random Cat GIF");
        assert!(image.url.is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_and_empty_list_mean_no_image() {
        let garbage = spawn_image_stub(AxumStatus::OK, "not json").await;
        let empty = spawn_image_stub(AxumStatus::OK, "[]").await;
        let images = client(vec![source("a", garbage), source("b", empty)])
            .fetch_all()
            .await;

        assert_eq!(images.len(), 2);
        assert!(images.iter().all(|image| image.url.is_none()));
    }

    #[tokio::test]
    async fn test_unreachable_host_means_no_image() {
        let image = client(vec![])
            .fetch(&source("Random Dog GIF", "http://127.0.0.1:9/images".to_string()))
            .await;
        assert!(image.url.is_none());
    }

    #[tokio::test]
    async fn test_fetch_all_keeps_order() {
        let cat =
            spawn_image_stub(AxumStatus::OK, r#"[{"url":"https://cdn.example/cat.gif"}]"#).await;
        let dog = spawn_image_stub(AxumStatus::NOT_FOUND, "").await;
        let images = client(vec![source("Random Cat GIF", cat), source("Random Dog GIF", dog)])
            .fetch_all()
            .await;

        assert_eq!(images[0].caption, "Random Cat GIF");
        assert!(images[0].url.is_some());
        assert_eq!(images[1].caption, "Random Dog GIF");
        assert!(images[1].url.is_none());
    }
}
