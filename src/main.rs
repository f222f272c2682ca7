use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voxscribe::{
    models, output, signals, utils, Cli, Config, ProcessingContext, TranscriptionPipeline,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // All diagnostics go to stderr so that --stdout yields a clean transcript.
    let default_filter = match cli.verbose {
        0 => "voxscribe=info",
        1 => "voxscribe=debug",
        _ => "voxscribe=trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.list_models {
        models::print_model_listing();
        return Ok(());
    }

    let config = Config::load()?;

    // Configuration errors must surface before any long-running work starts
    // and must leave no partial output behind.
    let format_spec = cli
        .format
        .clone()
        .unwrap_or_else(|| config.app.default_format.clone());
    let formats = output::parse_format_list(&format_spec)?;

    let model_name = cli
        .model
        .clone()
        .unwrap_or_else(|| config.transcription.default_model.clone());
    let model = models::validate_model(&model_name)?;

    let input = cli
        .input
        .clone()
        .ok_or_else(|| anyhow::anyhow!("No input file or URL given"))?;

    let language = cli
        .language
        .clone()
        .or_else(|| config.transcription.default_language.clone());
    let keep_audio = (cli.keep_audio || config.app.keep_audio) && !cli.stdout;

    let missing_deps = utils::check_dependencies().await;
    if !missing_deps.is_empty() {
        eprintln!("⚠️  Dependency check warnings:");
        for dep in missing_deps {
            eprintln!("   • {}", dep);
        }
    }

    let context = ProcessingContext::create()?;
    signals::install()?;

    let pipeline = TranscriptionPipeline::new(config, Arc::clone(&context));
    let outcome = run(
        &pipeline, &cli, &input, model, language.as_deref(), keep_audio, &formats,
    )
    .await;

    context.cleanup();
    outcome
}

async fn run(
    pipeline: &TranscriptionPipeline,
    cli: &Cli,
    input: &str,
    model: &models::ModelInfo,
    language: Option<&str>,
    keep_audio: bool,
    formats: &[output::TranscriptFormat],
) -> Result<()> {
    let result = pipeline
        .run(input, model, language, keep_audio, &cli.output_dir)
        .await?;

    if cli.stdout {
        output::write_to_stdout(&result, formats)?;
    } else {
        let name = cli.name.clone().unwrap_or_else(|| {
            let sanitized = utils::sanitize_filename(&result.metadata.title);
            if sanitized.is_empty() {
                "transcript".to_string()
            } else {
                sanitized
            }
        });

        let written = output::write_to_files(&result, formats, &name, &cli.output_dir)?;
        for path in written {
            println!("Transcript saved to: {}", path.display());
        }
        if let Some(audio_path) = &result.audio_path {
            println!("Audio saved to: {}", audio_path.display());
        }
    }

    Ok(())
}
