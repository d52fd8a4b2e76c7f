use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Metadata document as dumped by `yt-dlp -J`. Only the fields the resolver
/// looks at are modelled, everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMetadata {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    /// Seconds, kept as the extractor wrote it (integer or float)
    pub duration: Option<Number>,
    pub url: Option<String>,
    pub is_live: Option<bool>,
    pub formats: Option<Vec<FormatCandidate>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatCandidate {
    pub url: Option<String>,
    pub ext: Option<String>,
    pub acodec: Option<String>,
}

impl FormatCandidate {
    /// yt-dlp reports `acodec: "none"` for video-only formats.
    pub fn has_audio(&self) -> bool {
        self.acodec.as_deref() != Some("none")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamType {
    Live,
    Recorded,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStream {
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    pub direct_url: String,
    #[serde(rename = "type")]
    pub stream_type: StreamType,
    pub duration: Option<Number>,
    /// The extractor's `is_live` flag, also set when an HLS format was picked
    /// from the format list. A top-level HLS url yields `type: live` without
    /// touching this flag, so it can be `false` for a live stream.
    pub is_live: bool,
}
