use async_trait::async_trait;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::Path;

use super::{validate_url, MediaExtractor, MediaFormat, MediaInfo};
use crate::Result;

const MEDIA_EXTENSIONS: &[&str] = &[
    "mp3", "m4a", "aac", "wav", "flac", "ogg", "webm", "mp4", "mkv", "mov", "avi",
];

/// Direct HTTP(S) links to media files, downloaded with a plain GET
pub struct DirectExtractor;

impl DirectExtractor {
    pub fn new() -> Self {
        Self
    }

    fn url_extension(url: &str) -> Option<String> {
        let parsed = validate_url(url).ok()?;
        let path = parsed.path();
        let (_, ext) = path.rsplit_once('.')?;
        Some(ext.to_lowercase())
    }

    /// Stream the media to `output_path`, with a progress bar on stderr.
    pub async fn download(&self, media_info: &MediaInfo, output_path: &Path) -> Result<()> {
        let response = reqwest::get(&media_info.download_url).await?;

        if !response.status().is_success() {
            anyhow::bail!("Failed to download media: HTTP {}", response.status());
        }

        let total_size = response
            .content_length()
            .or(media_info.file_size)
            .unwrap_or(0);
        let progress = ProgressBar::new(total_size);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                .unwrap(),
        );
        progress.set_message("Downloading media...");

        let mut file = fs_err::File::create(output_path)?;
        let mut downloaded = 0u64;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)?;
            downloaded += chunk.len() as u64;
            progress.set_position(downloaded);
        }

        progress.finish_with_message("Download complete");
        Ok(())
    }
}

#[async_trait]
impl MediaExtractor for DirectExtractor {
    async fn extract_media_info(&self, url: &str) -> Result<MediaInfo> {
        let parsed = validate_url(url)?;

        let title = parsed
            .path_segments()
            .and_then(|segments| segments.last())
            .and_then(|name| name.rsplit_once('.').map(|(stem, _)| stem.to_string()))
            .filter(|stem| !stem.is_empty());

        let format = Self::url_extension(url)
            .and_then(|ext| MediaFormat::from_extension(&ext))
            .unwrap_or(MediaFormat::Mp4);

        Ok(MediaInfo {
            download_url: url.to_string(),
            duration: None,
            title,
            format,
            file_size: None,
            original_source: url.to_string(),
        })
    }

    fn supports_url(&self, url: &str) -> bool {
        Self::url_extension(url)
            .map(|ext| MEDIA_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    fn platform_name(&self) -> &'static str {
        "Direct URL"
    }
}

impl Default for DirectExtractor {
    fn default() -> Self {
        Self::new()
    }
}
