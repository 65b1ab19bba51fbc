//! Off-chain token metadata retrieval.

use crate::consts::cli_consts::http;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

const USER_AGENT: &str = concat!("creator-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("unsupported URI scheme: {0}")]
    UnsupportedUri(String),

    #[error("request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Http(u16),

    #[error("malformed metadata document: {0}")]
    Malformed(String),
}

/// Display attributes of a token, validated on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataDocument {
    pub image: String,
    pub name: String,
    pub description: String,
}

#[derive(Deserialize)]
struct RawDocument {
    image: String,
    name: String,
    description: String,
}

impl MetadataDocument {
    /// Parses and validates a metadata JSON body.
    ///
    /// `name`, `image` and `description` must all be strings; `name` and
    /// `image` must be non-empty. Extra fields are ignored.
    pub fn from_json(body: &[u8]) -> Result<Self, MetadataError> {
        let raw: RawDocument =
            serde_json::from_slice(body).map_err(|e| MetadataError::Malformed(e.to_string()))?;
        if raw.name.trim().is_empty() {
            return Err(MetadataError::Malformed("name is empty".to_string()));
        }
        if raw.image.trim().is_empty() {
            return Err(MetadataError::Malformed("image is empty".to_string()));
        }
        Ok(Self {
            image: raw.image,
            name: raw.name,
            description: raw.description,
        })
    }
}

/// Fetches metadata documents by token URI.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch(&self, uri: &str) -> Result<MetadataDocument, MetadataError>;
}

/// Maps a token URI onto an HTTP URL, rewriting `ipfs://` through `gateway`.
pub fn resolve_uri(uri: &str, gateway: &str) -> Result<String, MetadataError> {
    let uri = uri.trim();
    if let Some(path) = uri.strip_prefix("ipfs://") {
        let path = path.strip_prefix("ipfs/").unwrap_or(path);
        return Ok(format!(
            "{}/{}",
            gateway.trim_end_matches('/'),
            path.trim_start_matches('/')
        ));
    }
    if uri.starts_with("https://") || uri.starts_with("http://") {
        return Ok(uri.to_string());
    }
    Err(MetadataError::UnsupportedUri(uri.to_string()))
}

/// reqwest-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpMetadataClient {
    client: Client,
    ipfs_gateway: String,
}

impl HttpMetadataClient {
    pub fn new(ipfs_gateway: impl Into<String>) -> Result<Self, MetadataError> {
        let client = ClientBuilder::new()
            .connect_timeout(http::connect_timeout())
            .timeout(http::request_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            ipfs_gateway: ipfs_gateway.into(),
        })
    }
}

#[async_trait::async_trait]
impl MetadataFetcher for HttpMetadataClient {
    async fn fetch(&self, uri: &str) -> Result<MetadataDocument, MetadataError> {
        let url = resolve_uri(uri, &self.ipfs_gateway)?;
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(MetadataError::Http(response.status().as_u16()));
        }
        let body = response.bytes().await?;
        MetadataDocument::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GATEWAY: &str = "https://ipfs.io/ipfs/";

    #[test]
    fn rewrites_ipfs_uris_through_gateway() {
        assert_eq!(
            resolve_uri("ipfs://QmHash/1.json", GATEWAY).unwrap(),
            "https://ipfs.io/ipfs/QmHash/1.json"
        );
        assert_eq!(
            resolve_uri("ipfs://ipfs/QmHash", "https://gw.example/ipfs").unwrap(),
            "https://gw.example/ipfs/QmHash"
        );
    }

    #[test]
    fn passes_http_uris_through() {
        let uri = "https://ipfs.infura.io/ipfs/QmHash";
        assert_eq!(resolve_uri(uri, GATEWAY).unwrap(), uri);
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(matches!(
            resolve_uri("ar://tx", GATEWAY),
            Err(MetadataError::UnsupportedUri(_))
        ));
        assert!(resolve_uri("", GATEWAY).is_err());
    }

    #[test]
    fn parses_complete_document() {
        let doc = MetadataDocument::from_json(
            br#"{"name":"Sunset","description":"","image":"ipfs://img","attributes":[]}"#,
        )
        .unwrap();
        assert_eq!(doc.name, "Sunset");
        assert_eq!(doc.description, "");
        assert_eq!(doc.image, "ipfs://img");
    }

    #[test]
    fn rejects_missing_or_mistyped_fields() {
        assert!(MetadataDocument::from_json(br#"{"name":"a","image":"b"}"#).is_err());
        assert!(
            MetadataDocument::from_json(br#"{"name":1,"image":"b","description":"c"}"#).is_err()
        );
        assert!(MetadataDocument::from_json(b"<html>").is_err());
    }

    #[test]
    fn rejects_empty_name_or_image() {
        let err =
            MetadataDocument::from_json(br#"{"name":" ","image":"b","description":"c"}"#)
                .unwrap_err();
        assert_eq!(err.to_string(), "malformed metadata document: name is empty");
        assert!(
            MetadataDocument::from_json(br#"{"name":"a","image":"","description":"c"}"#).is_err()
        );
    }

    #[tokio::test]
    #[ignore] // Requires network access to a public IPFS gateway.
    async fn test_live_gateway_fetch() {
        let client = HttpMetadataClient::new(GATEWAY).unwrap();
        let result = client
            .fetch("ipfs://bafkreiabag3ztnhe5pg7js4bj6sxuvkz3sdf76cjvcuqjoidvnfjz7vwrq")
            .await;
        println!("Fetched: {:?}", result);
    }
}
