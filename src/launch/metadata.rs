use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::error::LaunchError;

/// Textual fields describing the token being launched, as collected from
/// the browser form (or AI suggestions upstream of the relay).
#[derive(Debug, Clone)]
pub struct TokenProfile {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IpfsMetadata {
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Response from the platform's metadata-ingestion endpoint: the pinned
/// metadata record plus its content-addressed URI. Immutable once pinned.
#[derive(Debug, Clone, Deserialize)]
pub struct IpfsResponse {
    pub metadata: IpfsMetadata,
    #[serde(rename = "metadataUri")]
    pub metadata_uri: String,
}

/// Uploads token images and metadata to the token-creation platform's own
/// IPFS ingestion endpoint (the canonical path; the legacy Pinata proxy is
/// not used here).
#[derive(Debug, Clone)]
pub struct MetadataClient {
    client: Client,
    base_url: String,
}

impl MetadataClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolves the image reference to raw bytes. Direct uploads arrive from
    /// the browser as `data:` URIs; anything else is fetched server-side.
    async fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>, LaunchError> {
        if let Some(encoded) = image_url.strip_prefix("data:") {
            let payload = encoded
                .split_once(',')
                .map(|(_, data)| data)
                .ok_or_else(|| LaunchError::ImageFetch("Malformed data URI".to_string()))?;
            return STANDARD
                .decode(payload)
                .map_err(|e| LaunchError::ImageFetch(format!("Invalid data URI payload: {}", e)));
        }

        let response = self
            .client
            .get(image_url)
            .send()
            .await
            .map_err(|e| LaunchError::ImageFetch(format!("Request to {} failed: {}", image_url, e)))?;

        if !response.status().is_success() {
            return Err(LaunchError::ImageFetch(format!(
                "Image fetch from {} returned status {}",
                image_url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LaunchError::ImageFetch(format!("Failed to read image body: {}", e)))?;
        debug!("Fetched image: {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    /// Fetches the image, packages it with the textual fields as multipart
    /// form data, and pins the result. Terminal on failure; no retry.
    pub async fn upload(
        &self,
        image_url: &str,
        profile: &TokenProfile,
    ) -> Result<IpfsResponse, LaunchError> {
        let image_bytes = self.fetch_image(image_url).await?;

        let file_part = Part::bytes(image_bytes)
            .file_name("image.png")
            .mime_str("image/png")
            .map_err(|e| LaunchError::MetadataUpload(format!("Invalid image part: {}", e)))?;

        let form = Form::new()
            .part("file", file_part)
            .text("name", profile.name.clone())
            .text(
                "description",
                format!("{} - {}", profile.name, profile.description),
            )
            .text("symbol", profile.symbol.clone())
            .text("twitter", profile.twitter.clone().unwrap_or_default())
            .text("telegram", profile.telegram.clone().unwrap_or_default())
            .text("website", profile.website.clone().unwrap_or_default())
            .text("showName", "true");

        let url = format!("{}/api/ipfs", self.base_url);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| LaunchError::MetadataUpload(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Metadata upload failed: status {}, body: {}", status, body);
            return Err(LaunchError::MetadataUpload(format!(
                "Upload endpoint returned status {}: {}",
                status, body
            )));
        }

        let ipfs: IpfsResponse = response
            .json()
            .await
            .map_err(|e| LaunchError::MetadataUpload(format!("Failed to parse response: {}", e)))?;

        info!("Metadata pinned at {}", ipfs.metadata_uri);
        Ok(ipfs)
    }
}
