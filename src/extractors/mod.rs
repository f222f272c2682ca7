use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

pub mod direct;
pub mod local;
pub mod ytdlp;

use crate::Result;

/// Information about a media source, gathered before any download begins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Download locator; scheme-tagged for sources that need a dedicated
    /// tool (`yt-dlp://...`, `local-file://...`) or a plain URL otherwise
    pub download_url: String,

    /// Duration in seconds, if the source reports one
    pub duration: Option<f64>,

    /// Title or description of the media
    pub title: Option<String>,

    /// Container format of the artifact the download will produce
    pub format: MediaFormat,

    /// File size in bytes if available
    pub file_size: Option<u64>,

    /// Original path or URL as the user supplied it
    pub original_source: String,
}

/// Supported media container formats
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum MediaFormat {
    Mp3,
    M4a,
    Wav,
    Flac,
    Ogg,
    Webm,
    Mp4,
}

impl MediaFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaFormat::Mp3 => "mp3",
            MediaFormat::M4a => "m4a",
            MediaFormat::Wav => "wav",
            MediaFormat::Flac => "flac",
            MediaFormat::Ogg => "ogg",
            MediaFormat::Webm => "webm",
            MediaFormat::Mp4 => "mp4",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mp3" => Some(MediaFormat::Mp3),
            "m4a" | "aac" => Some(MediaFormat::M4a),
            "wav" => Some(MediaFormat::Wav),
            "flac" => Some(MediaFormat::Flac),
            "ogg" => Some(MediaFormat::Ogg),
            "webm" => Some(MediaFormat::Webm),
            "mp4" | "mkv" | "mov" | "avi" => Some(MediaFormat::Mp4),
            _ => None,
        }
    }
}

/// Trait for gathering media information from different source kinds
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Extract media information from a URL
    async fn extract_media_info(&self, url: &str) -> Result<MediaInfo>;

    /// Check if this extractor supports the given URL
    fn supports_url(&self, url: &str) -> bool;

    /// Get the name of this source kind
    fn platform_name(&self) -> &'static str;
}

/// Registry routing inputs to the extractor that understands them
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn MediaExtractor>>,
}

impl ExtractorRegistry {
    /// Create a new registry with default extractors. Direct media URLs are
    /// matched before the yt-dlp catch-all.
    pub fn new() -> Self {
        Self {
            extractors: vec![
                Box::new(direct::DirectExtractor::new()),
                Box::new(ytdlp::YtDlpExtractor::new()),
            ],
        }
    }

    /// Check if input is a local file path rather than a URL
    pub fn is_local_file(&self, input: &str) -> bool {
        if input.starts_with("http://") || input.starts_with("https://") {
            return false;
        }

        let path = Path::new(input);
        if path.exists() {
            return true;
        }

        // Looks like a file path even if it does not exist yet
        path.extension().is_some()
            || input.contains('/')
            || input.contains('\\')
            || input.starts_with("./")
    }

    /// Extract media info using the appropriate extractor
    pub async fn extract_media_info(&self, input: &str) -> Result<MediaInfo> {
        if self.is_local_file(input) {
            return local::LocalFileExtractor::new()
                .extract_media_info(input)
                .await;
        }

        let extractor = self
            .extractors
            .iter()
            .find(|extractor| extractor.supports_url(input))
            .ok_or_else(|| anyhow::anyhow!("No extractor found for URL: {}", input))?;

        tracing::debug!("Routing {} to the {} extractor", input, extractor.platform_name());
        extractor.extract_media_info(input).await
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate and parse a URL
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|_| anyhow::anyhow!("Invalid URL format: {}", url))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("URL must use HTTP or HTTPS protocol");
    }

    Ok(parsed)
}
