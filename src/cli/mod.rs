use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "voxscribe",
    about = "Transcribe internet videos and local media files into timestamped text",
    version,
    long_about = "A CLI tool for transcribing audio from local files, direct media URLs and \
                  video platforms into txt, json, srt or vtt transcripts, using whisper.cpp \
                  for speech-to-text."
)]
pub struct Cli {
    /// Media source: a local audio/video file, a direct media URL, or a video platform URL
    #[arg(value_name = "FILE_OR_URL", required_unless_present = "list_models")]
    pub input: Option<String>,

    /// Output format(s), comma-separated: txt, json, srt, vtt
    #[arg(short = 'f', long, value_name = "FORMAT[,FORMAT...]")]
    pub format: Option<String>,

    /// Base name for output files (defaults to the media title)
    #[arg(short = 'n', long, value_name = "NAME", conflicts_with = "stdout")]
    pub name: Option<String>,

    /// Directory for output files
    #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Write the transcript to stdout instead of files (diagnostics go to stderr)
    #[arg(long)]
    pub stdout: bool,

    /// Whisper model to use (see --list-models)
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// List available whisper models and exit
    #[arg(long)]
    pub list_models: bool,

    /// Language code for transcription (auto-detect if not specified)
    #[arg(short = 'l', long, value_name = "LANG")]
    pub language: Option<String>,

    /// Keep the downloaded audio file next to the transcripts
    #[arg(short = 'k', long, conflicts_with = "stdout")]
    pub keep_audio: bool,

    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}
