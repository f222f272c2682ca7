use async_trait::async_trait;
use serde_json::Value;
use std::process::Stdio;
use tokio::process::Command;

use super::{validate_url, MediaExtractor, MediaFormat, MediaInfo};
use crate::Result;

/// Video platform extractor backed by yt-dlp.
///
/// Any HTTP(S) URL that is not a direct media file is handed to yt-dlp, which
/// knows the platform-specific extraction rules. Metadata comes from
/// `--dump-json`; the audio itself is fetched by [`download_audio_direct`],
/// which lets yt-dlp write straight to the working directory.
///
/// [`download_audio_direct`]: YtDlpExtractor::download_audio_direct
pub struct YtDlpExtractor {
    yt_dlp_path: String,
}

impl YtDlpExtractor {
    pub fn new() -> Self {
        Self {
            yt_dlp_path: "yt-dlp".to_string(),
        }
    }

    /// Check if yt-dlp is available
    pub async fn check_availability(&self) -> Result<bool> {
        let output = Command::new(&self.yt_dlp_path)
            .arg("--version")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        Ok(matches!(output, Ok(out) if out.status.success()))
    }

    /// Get media information using yt-dlp
    async fn get_media_info(&self, url: &str) -> Result<Value> {
        tracing::debug!("Extracting media info for: {}", url);

        let output = Command::new(&self.yt_dlp_path)
            .args(["--dump-json", "--no-playlist", url])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("yt-dlp failed: {}", error);
        }

        let info: Value = serde_json::from_slice(&output.stdout)?;
        Ok(info)
    }

    /// Download the audio track of a platform URL into `output_path` as MP3.
    pub async fn download_audio_direct(
        &self,
        url: &str,
        output_path: &std::path::Path,
    ) -> Result<MediaFormat> {
        tracing::debug!("Downloading audio for: {}", url);

        let output = Command::new(&self.yt_dlp_path)
            .args([
                "--output",
                &output_path.to_string_lossy(),
                "--extract-audio",
                "--audio-format",
                "mp3",
                "--format",
                "bestaudio/best",
                "--no-playlist",
                "--newline",
                url,
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Failed to download audio: {}", error);
        }

        Ok(MediaFormat::Mp3)
    }
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    async fn extract_media_info(&self, url: &str) -> Result<MediaInfo> {
        if !self.check_availability().await? {
            anyhow::bail!(
                "yt-dlp is not available. Please install it: https://github.com/yt-dlp/yt-dlp"
            );
        }

        let info = self.get_media_info(url).await?;

        let title = info["title"].as_str().map(|s| s.to_string());
        let duration = info["duration"].as_f64();

        Ok(MediaInfo {
            download_url: format!("yt-dlp://{}", url),
            duration,
            title,
            format: MediaFormat::Mp3,
            file_size: None,
            original_source: url.to_string(),
        })
    }

    fn supports_url(&self, url: &str) -> bool {
        // Catch-all for platform URLs; direct media URLs are matched earlier
        // in the registry.
        validate_url(url).is_ok()
    }

    fn platform_name(&self) -> &'static str {
        "yt-dlp"
    }
}

impl Default for YtDlpExtractor {
    fn default() -> Self {
        Self::new()
    }
}
