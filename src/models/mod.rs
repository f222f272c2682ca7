//! Whisper model selection.
//!
//! The set of known models is a fixed, statically-constructed table: it is
//! enumerable for `--list-models` and exhaustively checkable for `--model`
//! validation. Model weights are GGML files resolved as
//! `<models_dir>/ggml-<name>.bin`, the naming convention whisper.cpp uses.

use std::path::{Path, PathBuf};

use crate::VoxscribeError;

/// Model used when neither the CLI nor the config names one.
pub const DEFAULT_MODEL: &str = "small";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl ModelFamily {
    pub fn label(&self) -> &'static str {
        match self {
            ModelFamily::Tiny => "Tiny Models",
            ModelFamily::Base => "Base Models",
            ModelFamily::Small => "Small Models",
            ModelFamily::Medium => "Medium Models",
            ModelFamily::Large => "Large Models",
        }
    }

    const ALL: &'static [ModelFamily] = &[
        ModelFamily::Tiny,
        ModelFamily::Base,
        ModelFamily::Small,
        ModelFamily::Medium,
        ModelFamily::Large,
    ];
}

#[derive(Debug, Clone, Copy)]
pub struct ModelInfo {
    pub name: &'static str,
    pub family: ModelFamily,
    pub description: &'static str,
}

pub const MODELS: &[ModelInfo] = &[
    ModelInfo {
        name: "tiny",
        family: ModelFamily::Tiny,
        description: "Fastest, lowest accuracy",
    },
    ModelInfo {
        name: "tiny.en",
        family: ModelFamily::Tiny,
        description: "Fastest, English-only",
    },
    ModelInfo {
        name: "base",
        family: ModelFamily::Base,
        description: "Fast, modest accuracy",
    },
    ModelInfo {
        name: "base.en",
        family: ModelFamily::Base,
        description: "Fast, English-only",
    },
    ModelInfo {
        name: "small",
        family: ModelFamily::Small,
        description: "Good balance of speed and accuracy (default)",
    },
    ModelInfo {
        name: "small.en",
        family: ModelFamily::Small,
        description: "Good balance, English-only",
    },
    ModelInfo {
        name: "medium",
        family: ModelFamily::Medium,
        description: "High accuracy, slower",
    },
    ModelInfo {
        name: "medium.en",
        family: ModelFamily::Medium,
        description: "High accuracy, English-only",
    },
    ModelInfo {
        name: "large-v2",
        family: ModelFamily::Large,
        description: "Highest accuracy, previous generation",
    },
    ModelInfo {
        name: "large-v3",
        family: ModelFamily::Large,
        description: "Highest accuracy",
    },
    ModelInfo {
        name: "large-v3-turbo",
        family: ModelFamily::Large,
        description: "Near large-v3 accuracy at much higher speed",
    },
];

/// Resolve a model name against the table.
///
/// Unknown names are configuration errors, reported before any long-running
/// work starts.
pub fn validate_model(name: &str) -> Result<&'static ModelInfo, VoxscribeError> {
    MODELS
        .iter()
        .find(|model| model.name == name)
        .ok_or_else(|| VoxscribeError::UnknownModel {
            requested: name.to_string(),
            available: model_names().join(", "),
        })
}

pub fn model_names() -> Vec<&'static str> {
    MODELS.iter().map(|model| model.name).collect()
}

/// Path of the GGML weights file for a model.
pub fn model_file(models_dir: &Path, name: &str) -> PathBuf {
    models_dir.join(format!("ggml-{}.bin", name))
}

/// Print the grouped model table with usage examples. Goes to stdout since
/// this is the command's output, not a diagnostic.
pub fn print_model_listing() {
    println!("🎤 Available Whisper Models:");
    println!();
    for family in ModelFamily::ALL {
        println!("📂 {}:", family.label());
        for model in MODELS.iter().filter(|model| model.family == *family) {
            println!("  {:<16} {}", model.name, model.description);
        }
        println!();
    }
    println!("💡 Usage examples:");
    println!("  voxscribe --model small video.mp4      # Good balance (default)");
    println!("  voxscribe --model tiny video.mp4       # Fastest");
    println!("  voxscribe --model large-v3 video.mp4   # Highest accuracy");
}
