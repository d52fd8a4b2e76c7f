use super::{
    error::ResolveError,
    types::{FormatCandidate, RawMetadata, ResolvedStream, StreamType},
};

const HLS_MARKER: &str = ".m3u8";
const MP4_MARKER: &str = ".mp4";

/// Outcome of scanning the format list.
enum FormatPick {
    /// First format whose URL is an HLS manifest.
    Adaptive(String),
    /// Last mp4 format with an audio track, if any.
    Progressive(Option<String>),
}

/// Parses a `yt-dlp -J` document.
pub fn parse_metadata(json: &str) -> Result<RawMetadata, ResolveError> {
    Ok(serde_json::from_str(json)?)
}

/// Picks a single playable URL out of the extractor's metadata and classifies it.
///
/// The top-level `url` wins when it is clearly HLS or mp4. Otherwise the format
/// list is scanned: the first HLS manifest stops the scan, and failing that the
/// last mp4 with audio is used. Format lists tend to be sorted by ascending
/// quality, which is the only reason "last" means "best" here.
pub fn resolve(raw: RawMetadata) -> Result<ResolvedStream, ResolveError> {
    let mut direct_url = raw.url.unwrap_or_default();
    let mut is_live = raw.is_live.unwrap_or(false);

    let stream_type = if direct_url.contains(HLS_MARKER) {
        StreamType::Live
    } else if direct_url.contains(MP4_MARKER) {
        StreamType::Recorded
    } else {
        match scan_formats(raw.formats.unwrap_or_default()) {
            FormatPick::Adaptive(url) => {
                direct_url = url;
                is_live = true;
                StreamType::Live
            }
            FormatPick::Progressive(Some(url)) if direct_url.is_empty() => {
                direct_url = url;
                StreamType::Recorded
            }
            FormatPick::Progressive(_) => StreamType::Unknown,
        }
    };

    if direct_url.is_empty() {
        return Err(ResolveError::NoUsableStream);
    }

    Ok(ResolvedStream {
        title: raw.title,
        thumbnail: raw.thumbnail,
        direct_url,
        stream_type,
        duration: raw.duration,
        is_live,
    })
}

fn scan_formats(formats: Vec<FormatCandidate>) -> FormatPick {
    let mut best_mp4 = None;

    for format in formats {
        let qualifies = format.ext.as_deref() == Some("mp4") && format.has_audio();
        let url = format.url.unwrap_or_default();

        if url.contains(HLS_MARKER) {
            return FormatPick::Adaptive(url);
        }

        // A qualifying entry without a URL still replaces the previous pick.
        if qualifies {
            best_mp4 = Some(url);
        }
    }

    FormatPick::Progressive(best_mp4.filter(|url| !url.is_empty()))
}
