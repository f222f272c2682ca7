use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::context::ProcessingContext;
use crate::extractors::{direct::DirectExtractor, local, ytdlp::YtDlpExtractor, ExtractorRegistry, MediaInfo};
use crate::models::{self, ModelInfo};
use crate::utils;
use crate::Result;

pub mod whisper;

use whisper::WhisperBackend;

/// One timed unit of transcribed speech.
///
/// Segments are immutable once produced by the engine and keep the engine's
/// ordering. The `id` is a 0-based ordinal assigned by rendering order; SRT
/// block numbering is independent of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: usize,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Segment text, preserved verbatim
    pub text: String,
}

/// Descriptive record accompanying a transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptMetadata {
    /// Display name, derived from the source
    pub title: String,
    /// Original path or URL; the stdout emitter substitutes a sentinel
    pub source: String,
    /// Total duration in seconds
    pub duration: f64,
    /// Name of the whisper model used
    pub model: String,
    /// Detected or forced language code
    pub language: String,
}

/// Transcription result with metadata
#[derive(Debug, Clone)]
pub struct TranscriptionResult {
    /// Ordered transcript segments
    pub segments: Vec<Segment>,

    /// Transcript metadata
    pub metadata: TranscriptMetadata,

    /// Path to the preserved audio file, if requested
    pub audio_path: Option<PathBuf>,
}

/// Main transcription pipeline: acquire media into the working directory,
/// extract a WAV track, run the whisper engine, and assemble the result.
pub struct TranscriptionPipeline {
    config: Config,
    registry: ExtractorRegistry,
    backend: WhisperBackend,
    context: Arc<ProcessingContext>,
}

impl TranscriptionPipeline {
    pub fn new(config: Config, context: Arc<ProcessingContext>) -> Self {
        Self {
            config,
            registry: ExtractorRegistry::new(),
            backend: WhisperBackend::new(),
            context,
        }
    }

    /// Transcribe a local file or URL into timed segments plus metadata.
    pub async fn run(
        &self,
        input: &str,
        model: &ModelInfo,
        language: Option<&str>,
        keep_audio: bool,
        output_dir: &Path,
    ) -> Result<TranscriptionResult> {
        let model_path = models::model_file(&self.config.models_dir(), model.name);
        if !model_path.exists() {
            anyhow::bail!(
                "Model file not found: {}. Download the GGML weights for '{}' into the models \
                 directory (see whisper.cpp's download-ggml-model.sh).",
                model_path.display(),
                model.name
            );
        }

        tracing::info!("Extracting media information from: {}", input);
        let media_info = self.registry.extract_media_info(input).await?;

        let media_path = self.acquire_media(&media_info).await?;

        let wav_path = self
            .context
            .workdir()
            .join(format!("audio_{}.wav", short_id()));
        local::extract_wav(&media_path, &wav_path)
            .await
            .context("Audio extraction failed")?;

        let transcription = self
            .backend
            .transcribe(&wav_path, &model_path, language, self.context.workdir())
            .await?;

        let duration = match media_info.duration {
            Some(duration) => duration,
            None => local::probe_duration(&media_path)
                .await
                .or_else(|| transcription.segments.last().map(|segment| segment.end))
                .unwrap_or(0.0),
        };
        tracing::info!(
            "Transcribed {} segments covering {}",
            transcription.segments.len(),
            utils::format_duration(duration)
        );

        let title = media_info
            .title
            .clone()
            .unwrap_or_else(|| derive_title(input));

        let audio_path = if keep_audio && media_path.starts_with(self.context.workdir()) {
            Some(
                self.preserve_audio_file(&media_path, &title, output_dir)
                    .await?,
            )
        } else {
            None
        };

        Ok(TranscriptionResult {
            segments: transcription.segments,
            metadata: TranscriptMetadata {
                title,
                source: input.to_string(),
                duration,
                model: model.name.to_string(),
                language: transcription.language,
            },
            audio_path,
        })
    }

    /// Get the media onto local disk: local files are used in place, remote
    /// sources are downloaded into the working directory.
    async fn acquire_media(&self, media_info: &MediaInfo) -> Result<PathBuf> {
        if let Some(path) = media_info.download_url.strip_prefix("local-file://") {
            return Ok(PathBuf::from(path));
        }

        let filename = format!("media_{}.{}", short_id(), media_info.format.as_str());
        let target = self.context.workdir().join(filename);

        if let Some(url) = media_info.download_url.strip_prefix("yt-dlp://") {
            YtDlpExtractor::new()
                .download_audio_direct(url, &target)
                .await?;
        } else {
            DirectExtractor::new().download(media_info, &target).await?;
        }

        Ok(target)
    }

    /// Copy the downloaded audio next to the transcripts before the working
    /// directory is removed.
    async fn preserve_audio_file(
        &self,
        media_path: &Path,
        title: &str,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let extension = media_path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("mp3");

        let sanitized = utils::sanitize_filename(title);
        let filename = if sanitized.is_empty() {
            format!(
                "audio_{}.{}",
                chrono::Utc::now().format("%Y%m%d_%H%M%S"),
                extension
            )
        } else {
            format!("{}.{}", sanitized, extension)
        };

        fs_err::create_dir_all(output_dir)?;
        let output_path = output_dir.join(filename);
        fs_err::copy(media_path, &output_path)?;

        tracing::info!("Audio saved to {}", output_path.display());
        Ok(output_path)
    }
}

fn short_id() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}

/// Fall back to the input's file stem (or the input itself) as a title.
fn derive_title(input: &str) -> String {
    Path::new(input)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.to_string())
        .unwrap_or_else(|| input.to_string())
}
