//! Voxscribe - A Rust CLI tool for transcribing internet videos and local media files
//!
//! This library turns an audio/video source (local file or URL) into a timestamped
//! transcript, rendered as plain text, JSON, SRT or WebVTT. Media acquisition is
//! handled by yt-dlp/ffmpeg and speech-to-text by whisper.cpp's whisper-cli.

pub mod cli;
pub mod config;
pub mod context;
pub mod extractors;
pub mod models;
pub mod output;
pub mod signals;
pub mod transcribe;
pub mod utils;

pub use cli::Cli;
pub use config::Config;
pub use context::ProcessingContext;
pub use output::TranscriptFormat;
pub use transcribe::{Segment, TranscriptMetadata, TranscriptionPipeline, TranscriptionResult};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to voxscribe
#[derive(thiserror::Error, Debug)]
pub enum VoxscribeError {
    #[error("Unknown format '{requested}'. Supported formats: {supported}")]
    UnknownFormat { requested: String, supported: String },

    #[error("Unknown model '{requested}'. Available models: {available}")]
    UnknownModel { requested: String, available: String },

    #[error("Audio extraction failed: {0}")]
    AudioExtractionFailed(String),

    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),
}
