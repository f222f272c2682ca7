use async_trait::async_trait;
use std::path::Path;
use tokio::fs;
use tokio::process::Command;

use super::{MediaExtractor, MediaFormat, MediaInfo};
use crate::{Result, VoxscribeError};

/// Local audio/video files, probed with ffprobe
pub struct LocalFileExtractor;

impl LocalFileExtractor {
    pub fn new() -> Self {
        Self
    }

    async fn validate_file(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            anyhow::bail!("File does not exist: {}", path.display());
        }

        if !path.is_file() {
            anyhow::bail!("Path is not a file: {}", path.display());
        }

        let metadata = fs::metadata(path).await?;
        if metadata.len() == 0 {
            anyhow::bail!("File is empty: {}", path.display());
        }

        Ok(())
    }

    /// Probe duration and audio presence with ffprobe
    async fn probe(&self, path: &Path) -> Result<Option<f64>> {
        let info = ffprobe_json(path).await?;

        let empty_vec = vec![];
        let streams = info["streams"].as_array().unwrap_or(&empty_vec);
        let has_audio = streams
            .iter()
            .any(|stream| stream["codec_type"].as_str() == Some("audio"));
        if !has_audio {
            return Err(VoxscribeError::UnsupportedInput(format!(
                "File does not contain any audio streams: {}",
                path.display()
            ))
            .into());
        }

        Ok(extract_duration(&info))
    }
}

#[async_trait]
impl MediaExtractor for LocalFileExtractor {
    async fn extract_media_info(&self, path: &str) -> Result<MediaInfo> {
        let file_path = Path::new(path);

        self.validate_file(file_path).await?;
        let duration = self.probe(file_path).await?;

        let title = file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Local File")
            .to_string();

        let format = file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(MediaFormat::from_extension)
            .unwrap_or(MediaFormat::Mp4);

        let absolute_path = file_path
            .canonicalize()
            .unwrap_or_else(|_| file_path.to_path_buf());

        Ok(MediaInfo {
            download_url: format!("local-file://{}", absolute_path.display()),
            duration,
            title: Some(title),
            format,
            file_size: fs::metadata(file_path).await.ok().map(|m| m.len()),
            original_source: path.to_string(),
        })
    }

    fn supports_url(&self, _url: &str) -> bool {
        // Local files are routed separately by the registry
        false
    }

    fn platform_name(&self) -> &'static str {
        "Local File"
    }
}

impl Default for LocalFileExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Probe a media file's duration in seconds, tolerating probe failure.
pub async fn probe_duration(path: &Path) -> Option<f64> {
    match ffprobe_json(path).await {
        Ok(info) => extract_duration(&info),
        Err(err) => {
            tracing::debug!("ffprobe failed for {}: {}", path.display(), err);
            None
        }
    }
}

async fn ffprobe_json(path: &Path) -> Result<serde_json::Value> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
            &path.to_string_lossy(),
        ])
        .output()
        .await?;

    if !output.status.success() {
        let error = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("Failed to analyze file with ffprobe: {}", error);
    }

    Ok(serde_json::from_slice(&output.stdout)?)
}

fn extract_duration(info: &serde_json::Value) -> Option<f64> {
    info["format"]["duration"]
        .as_str()
        .and_then(|d| d.parse::<f64>().ok())
}

/// Extract the audio track into a 16 kHz mono PCM WAV, the input whisper-cli
/// expects. Works for both audio-only and video sources.
pub async fn extract_wav(source: &Path, target: &Path) -> Result<()> {
    tracing::debug!(
        "Extracting audio: {} -> {}",
        source.display(),
        target.display()
    );

    let output = Command::new("ffmpeg")
        .args([
            "-i",
            &source.to_string_lossy(),
            "-vn",
            "-acodec",
            "pcm_s16le",
            "-ar",
            "16000",
            "-ac",
            "1",
            "-y",
            &target.to_string_lossy(),
        ])
        .output()
        .await?;

    if !output.status.success() {
        let error = String::from_utf8_lossy(&output.stderr);
        return Err(VoxscribeError::AudioExtractionFailed(format!("ffmpeg: {}", error)).into());
    }

    Ok(())
}
