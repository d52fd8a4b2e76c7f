use super::{
    error::ResolveError, extractor::MetadataExtractor, resolver::parse_metadata,
    types::RawMetadata,
};
use crate::config::ExtractorConfig;
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

pub struct YtDlpExtractor {
    binary: String,
    extra_args: Vec<String>,
}

impl YtDlpExtractor {
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            extra_args: config.extra_args.clone(),
        }
    }

    fn metadata_command(&self, url: &str) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg("-J")
            .arg("--no-warnings")
            .args(&self.extra_args)
            // Keep a page URL starting with '-' from being read as an option
            .arg("--")
            .arg(url)
            .kill_on_drop(true);
        command
    }
}

#[async_trait]
impl MetadataExtractor for YtDlpExtractor {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn fetch_metadata(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<RawMetadata, ResolveError> {
        debug!("Extracting metadata with yt-dlp for: {}", url);

        let output = tokio::time::timeout(timeout, self.metadata_command(url).output())
            .await
            .map_err(|_| ResolveError::ExtractionTimeout(timeout))?
            .with_context(|| format!("Failed to run {}", self.binary))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ResolveError::ExtractionFailed(error));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        debug!("yt-dlp JSON output: {} bytes", json_str.len());

        parse_metadata(&json_str)
    }

    async fn test_availability(&self) -> bool {
        match Command::new(&self.binary).arg("--version").output().await {
            Ok(output) => {
                if output.status.success() {
                    let version = String::from_utf8_lossy(&output.stdout);
                    info!("✅ yt-dlp is available, version: {}", version.trim());
                    true
                } else {
                    warn!("❌ yt-dlp command failed");
                    false
                }
            }
            Err(e) => {
                warn!("❌ yt-dlp not found at {}: {}", self.binary, e);
                false
            }
        }
    }
}
