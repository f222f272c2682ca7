//! End-to-end signal behavior: an interrupted run must remove its working
//! directory and exit with the conventional code for the signal it received.
//!
//! External tools are stubbed with shell scripts so the run reaches audio
//! extraction and blocks there until the signal arrives. TMPDIR is pointed
//! at a scratch directory so the working directory's removal is observable.
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

fn write_stub(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    fs_err::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs_err::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs_err::set_permissions(&path, perms).unwrap();
}

fn wait_for(path: &Path, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if path.exists() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    false
}

fn workdirs_in(tmp: &Path) -> Vec<String> {
    fs_err::read_dir(tmp)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("voxscribe-"))
        .collect()
}

fn run_and_signal(signal: &str, expected_code: i32) {
    let scratch = tempfile::tempdir().unwrap();
    let root = scratch.path();

    let bin_dir = root.join("bin");
    fs_err::create_dir_all(&bin_dir).unwrap();
    let marker = root.join("extraction-started");
    write_stub(
        &bin_dir,
        "ffprobe",
        r#"echo '{"format":{"duration":"5.0"},"streams":[{"codec_type":"audio"}]}'"#,
    );
    // The version probe must answer quickly; the real invocation signals
    // that extraction started, then blocks until killed.
    write_stub(
        &bin_dir,
        "ffmpeg",
        &format!(
            "if [ \"$1\" = \"-version\" ]; then echo ffmpeg; exit 0; fi\ntouch '{}'\nsleep 30",
            marker.display()
        ),
    );
    write_stub(&bin_dir, "yt-dlp", "echo yt-dlp 2026.01.01");
    write_stub(&bin_dir, "whisper-cli", "echo usage");

    // Model validation runs before extraction; satisfy it with a dummy file.
    let models_dir = root.join("models");
    fs_err::create_dir_all(&models_dir).unwrap();
    fs_err::write(models_dir.join("ggml-small.bin"), b"ggml").unwrap();

    let work = root.join("work");
    fs_err::create_dir_all(&work).unwrap();
    fs_err::write(
        work.join("config.yaml"),
        format!("transcription:\n  models_dir: {}\n", models_dir.display()),
    )
    .unwrap();

    let input = root.join("clip.mp3");
    fs_err::write(&input, b"not really audio").unwrap();

    let tmp = root.join("tmp");
    fs_err::create_dir_all(&tmp).unwrap();

    let path_var = format!(
        "{}:{}",
        bin_dir.display(),
        std::env::var("PATH").unwrap_or_default()
    );

    let mut child = Command::new(assert_cmd::cargo::cargo_bin("voxscribe"))
        .arg(&input)
        .current_dir(&work)
        .env("PATH", path_var)
        .env("TMPDIR", &tmp)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    assert!(
        wait_for(&marker, Duration::from_secs(15)),
        "run never reached audio extraction"
    );
    assert_eq!(
        workdirs_in(&tmp).len(),
        1,
        "working directory should exist while the run is in flight"
    );

    let kill = Command::new("kill")
        .args([signal, &child.id().to_string()])
        .status()
        .unwrap();
    assert!(kill.success());

    let status = child.wait().unwrap();
    assert_eq!(status.code(), Some(expected_code));
    assert!(
        workdirs_in(&tmp).is_empty(),
        "working directory survived the signal"
    );
}

#[test]
fn sigint_exits_130_and_removes_workdir() {
    run_and_signal("-INT", 130);
}

#[test]
fn sigterm_exits_143_and_removes_workdir() {
    run_and_signal("-TERM", 143);
}
