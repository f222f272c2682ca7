/// Sanitize a media title for safe filesystem usage
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            match c {
                // Keep alphanumeric characters, spaces, hyphens, underscores, and dots
                c if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' || c == '.' => c,
                // Replace everything else with underscore
                _ => '_',
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Format a duration in human-readable form for status messages
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Check whether the external tools this run may need are on PATH.
/// Returns human-readable descriptions of whatever is missing.
pub async fn check_dependencies() -> Vec<String> {
    let mut missing = Vec::new();

    if !check_command_available("ffmpeg", "-version").await {
        missing.push("ffmpeg - required for audio extraction".to_string());
    }

    if !check_command_available("yt-dlp", "--version").await {
        missing.push("yt-dlp - required for video platform URLs".to_string());
    }

    if !check_command_available("whisper-cli", "--help").await {
        missing.push("whisper-cli - required for transcription (whisper.cpp)".to_string());
    }

    missing
}

/// Check if a command is available in PATH
async fn check_command_available(command: &str, probe_arg: &str) -> bool {
    use tokio::process::Command;

    Command::new(command)
        .arg(probe_arg)
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}
