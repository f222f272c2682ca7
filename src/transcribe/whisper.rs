use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use super::Segment;
use crate::{Result, VoxscribeError};

/// Speech-to-text boundary: whisper.cpp's `whisper-cli` invoked as a
/// subprocess. The engine is a black box to the rest of the crate: it takes
/// a 16 kHz mono WAV plus a GGML model file and produces timed text segments
/// and a detected language.
pub struct WhisperBackend {
    binary: String,
}

/// What the engine produced for one run
pub struct WhisperTranscription {
    pub segments: Vec<Segment>,
    pub language: String,
}

#[derive(Deserialize)]
struct WhisperJson {
    result: WhisperResult,
    transcription: Vec<WhisperJsonSegment>,
}

#[derive(Deserialize)]
struct WhisperResult {
    language: String,
}

#[derive(Deserialize)]
struct WhisperJsonSegment {
    offsets: WhisperOffsets,
    text: String,
}

/// Millisecond offsets as whisper-cli reports them
#[derive(Deserialize)]
struct WhisperOffsets {
    from: u64,
    to: u64,
}

impl WhisperBackend {
    pub fn new() -> Self {
        Self {
            binary: "whisper-cli".to_string(),
        }
    }

    /// Run the engine over `audio` and parse its JSON output.
    pub async fn transcribe(
        &self,
        audio: &Path,
        model_file: &Path,
        language: Option<&str>,
        workdir: &Path,
    ) -> Result<WhisperTranscription> {
        let output_prefix = workdir.join("transcript");

        tracing::info!("Transcribing {} with {}", audio.display(), self.binary);

        let output = Command::new(&self.binary)
            .args([
                "-m",
                &model_file.to_string_lossy(),
                "-f",
                &audio.to_string_lossy(),
                "-l",
                language.unwrap_or("auto"),
                "--output-json",
                "--output-file",
                &output_prefix.to_string_lossy(),
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(
                VoxscribeError::TranscriptionFailed(format!("{} failed: {}", self.binary, error))
                    .into(),
            );
        }

        let json_path = output_prefix.with_extension("json");
        let content = fs_err::read_to_string(&json_path)?;
        parse_whisper_json(&content)
    }
}

impl Default for WhisperBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse whisper-cli's JSON output into ordered segments with 0-based ids.
///
/// Segments the engine emitted with empty text are dropped; ids are assigned
/// by rendering order after that filter.
fn parse_whisper_json(content: &str) -> Result<WhisperTranscription> {
    let parsed: WhisperJson = serde_json::from_str(content)
        .map_err(|err| VoxscribeError::TranscriptionFailed(format!("invalid engine output: {err}")))?;

    let segments = parsed
        .transcription
        .into_iter()
        .filter(|segment| !segment.text.is_empty())
        .enumerate()
        .map(|(id, segment)| Segment {
            id,
            start: segment.offsets.from as f64 / 1000.0,
            end: segment.offsets.to as f64 / 1000.0,
            text: segment.text,
        })
        .collect();

    Ok(WhisperTranscription {
        segments,
        language: parsed.result.language,
    })
}
