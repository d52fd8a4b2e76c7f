use super::{error::ResolveError, types::RawMetadata};
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    /// Human-readable name of the extractor
    fn name(&self) -> &'static str;

    /// Fetch the raw stream metadata for a page URL, giving up after `timeout`
    async fn fetch_metadata(&self, url: &str, timeout: Duration)
        -> Result<RawMetadata, ResolveError>;

    /// Test if the extractor backend is available on the system
    async fn test_availability(&self) -> bool;
}
