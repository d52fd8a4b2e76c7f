mod error;
mod extractor;
mod resolver;
mod types;
mod ytdlp;

pub use error::ResolveError;
pub use extractor::MetadataExtractor;
pub use types::{ResolvedStream, StreamType};

use crate::config::ExtractorConfig;
use resolver::resolve;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info};
use url::Url;
use ytdlp::YtDlpExtractor;

/// Runs one page URL through the extractor and the resolver.
#[derive(Clone)]
pub struct MediaResolver {
    extractor: Arc<dyn MetadataExtractor>,
    timeout: Duration,
}

impl MediaResolver {
    pub fn new(config: &ExtractorConfig) -> Self {
        info!(
            "Media resolver initialized - using {} with a {}s timeout",
            config.binary, config.timeout_secs
        );
        Self::with_extractor(Arc::new(YtDlpExtractor::new(config)), config.timeout())
    }

    pub fn with_extractor(extractor: Arc<dyn MetadataExtractor>, timeout: Duration) -> Self {
        Self { extractor, timeout }
    }

    pub async fn resolve(&self, url: &str) -> Result<ResolvedStream, ResolveError> {
        let url = validate_url(url)?;
        info!("Processing URL: {}", url);

        debug!("Fetching metadata with {}", self.extractor.name());
        let raw = self.extractor.fetch_metadata(url, self.timeout).await?;

        let stream = resolve(raw)?;
        info!(
            "Resolved {} stream for {}: {}",
            stream_type_name(stream.stream_type),
            url,
            stream.direct_url
        );
        Ok(stream)
    }

    pub async fn test_setup(&self) -> anyhow::Result<()> {
        info!("Testing metadata extractor setup...");

        if self.extractor.test_availability().await {
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "{} is not available. Please install it or set extractor.binary.",
                self.extractor.name()
            ))
        }
    }
}

fn stream_type_name(stream_type: StreamType) -> &'static str {
    match stream_type {
        StreamType::Live => "live",
        StreamType::Recorded => "recorded",
        StreamType::Unknown => "unknown",
    }
}

/// Anything non-empty goes to the extractor, which also understands bare
/// `host/path` inputs. Hierarchical URLs with a scheme other than http(s)
/// (`file://`, `ftp://`) are refused.
fn validate_url(url: &str) -> Result<&str, ResolveError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ResolveError::InvalidRequest(
            "Missing 'url' field".to_string(),
        ));
    }

    if let Ok(parsed) = Url::parse(url) {
        let scheme = parsed.scheme();
        if !parsed.cannot_be_a_base() && scheme != "http" && scheme != "https" {
            return Err(ResolveError::InvalidRequest(format!(
                "Invalid 'url' field: unsupported scheme '{scheme}'"
            )));
        }
    }

    Ok(url)
}
