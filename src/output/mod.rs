//! Output formats and emission.
//!
//! The four transcript formats form a closed set: each is a variant of
//! [`TranscriptFormat`], resolved by name through [`TranscriptFormat::from_name`]
//! and rendered through the shared [`FormatWriter`] trait. Emission decides the
//! destination (files vs stdout) and threads the metadata substitution for the
//! `source` field explicitly: file mode carries the real path or URL, stdout
//! mode carries the [`STDOUT_SOURCE`] sentinel since no durable path exists.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::transcribe::{Segment, TranscriptMetadata, TranscriptionResult};
use crate::{Result, VoxscribeError};

pub mod json;
pub mod srt;
pub mod timecode;
pub mod txt;
pub mod vtt;

/// Sentinel substituted for the real source path in stdout mode.
pub const STDOUT_SOURCE: &str = "unknown";

/// Renders a transcript to an abstract byte sink.
///
/// File and stdout emission share a single render path per format; the only
/// permitted difference between modes is the `source` value inside `metadata`,
/// which the caller substitutes before rendering.
pub trait FormatWriter {
    fn render(
        &self,
        segments: &[Segment],
        metadata: &TranscriptMetadata,
        sink: &mut dyn Write,
    ) -> Result<()>;
}

/// The closed set of supported transcript formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptFormat {
    Txt,
    Json,
    Srt,
    Vtt,
}

impl TranscriptFormat {
    pub const ALL: &'static [TranscriptFormat] = &[
        TranscriptFormat::Txt,
        TranscriptFormat::Json,
        TranscriptFormat::Srt,
        TranscriptFormat::Vtt,
    ];

    /// Resolve a format name to its variant.
    ///
    /// An unrecognized name is a configuration error naming the requested
    /// value and the supported set; it must surface to the caller before any
    /// long-running work starts.
    pub fn from_name(name: &str) -> std::result::Result<Self, VoxscribeError> {
        match name {
            "txt" => Ok(TranscriptFormat::Txt),
            "json" => Ok(TranscriptFormat::Json),
            "srt" => Ok(TranscriptFormat::Srt),
            "vtt" => Ok(TranscriptFormat::Vtt),
            other => Err(VoxscribeError::UnknownFormat {
                requested: other.to_string(),
                supported: supported_formats().join(", "),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TranscriptFormat::Txt => "txt",
            TranscriptFormat::Json => "json",
            TranscriptFormat::Srt => "srt",
            TranscriptFormat::Vtt => "vtt",
        }
    }

    /// File extension, identical to the format name.
    pub fn extension(&self) -> &'static str {
        self.name()
    }

    fn writer(&self) -> &'static dyn FormatWriter {
        match self {
            TranscriptFormat::Txt => &txt::TxtWriter,
            TranscriptFormat::Json => &json::JsonWriter,
            TranscriptFormat::Srt => &srt::SrtWriter,
            TranscriptFormat::Vtt => &vtt::VttWriter,
        }
    }
}

impl std::fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Names of all supported formats, in registry order.
pub fn supported_formats() -> Vec<&'static str> {
    TranscriptFormat::ALL.iter().map(|f| f.name()).collect()
}

/// Parse a comma-separated format list (`txt,json,srt,vtt`), preserving
/// request order. Each entry resolves independently; the first unknown name
/// fails the whole request. Empty entries are rejected rather than skipped,
/// so a blank spec cannot resolve to a run that produces no output.
pub fn parse_format_list(spec: &str) -> std::result::Result<Vec<TranscriptFormat>, VoxscribeError> {
    spec.split(',')
        .map(str::trim)
        .map(TranscriptFormat::from_name)
        .collect()
}

/// Write the transcript to one file per requested format.
///
/// Files land in `output_dir` as `<name>.<ext>`, created or truncated, UTF-8
/// encoded. Every format renders against the same segment/metadata pair.
/// Returns the written paths in request order.
pub fn write_to_files(
    result: &TranscriptionResult,
    formats: &[TranscriptFormat],
    name: &str,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs_err::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let path = output_dir.join(format!("{}.{}", name, format.extension()));
        let file = fs_err::File::create(&path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        let mut sink = BufWriter::new(file);

        format
            .writer()
            .render(&result.segments, &result.metadata, &mut sink)?;
        sink.flush()?;

        tracing::info!("Wrote {} transcript to {}", format, path.display());
        written.push(path);
    }
    Ok(written)
}

/// Write the transcript to standard output, one render per requested format
/// in request order.
///
/// Only transcript content goes to stdout; status and diagnostics stay on
/// stderr so piped output is a clean transcript. The metadata `source` is
/// replaced with the sentinel because no durable file path exists.
pub fn write_to_stdout(result: &TranscriptionResult, formats: &[TranscriptFormat]) -> Result<()> {
    let metadata = TranscriptMetadata {
        source: STDOUT_SOURCE.to_string(),
        ..result.metadata.clone()
    };

    let stdout = io::stdout();
    let mut sink = stdout.lock();
    for format in formats {
        format.writer().render(&result.segments, &metadata, &mut sink)?;
    }
    sink.flush()?;
    Ok(())
}
