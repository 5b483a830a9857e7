//! End-to-end tests of the `clipix` binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Test utilities
mod test_utils {
    use super::*;

    pub const TRANSCRIPT: &str = r#"{
        "text": "Hi There",
        "language": "en",
        "segments": [
            {"start": 0.0, "end": 2.0, "text": " Hi"},
            {"start": 2.0, "end": 5.0, "text": "There "}
        ],
        "duration": 5.0
    }"#;

    /// `clipix` command isolated from the caller's environment and config
    pub fn clipix(workdir: &Path) -> Command {
        let mut cmd = Command::cargo_bin("clipix").unwrap();
        cmd.current_dir(workdir)
            .env_remove("CLIPIX_CONFIG")
            .env_remove("CLIPIX_UPLOAD_DIR")
            .env_remove("CLIPIX_LOG_LEVEL")
            .env_remove("CLIPIX_LOG_FORMAT")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn write_transcript(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("talk.json");
        fs::write(&path, TRANSCRIPT).unwrap();
        path
    }

    /// Whether ffmpeg and ffprobe are on PATH
    pub fn ffmpeg_available() -> bool {
        ["ffmpeg", "ffprobe"].iter().all(|tool| {
            std::process::Command::new(tool)
                .arg("-version")
                .output()
                .map(|o| o.status.success())
                .unwrap_or(false)
        })
    }
}

use test_utils::*;

#[test]
fn test_render_srt_to_file() {
    let dir = TempDir::new().unwrap();
    let transcript = write_transcript(dir.path());
    let output = dir.path().join("talk.srt");

    clipix(dir.path())
        .args(["render", "--format", "srt", "--transcript"])
        .arg(&transcript)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("render completed"));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "1\n00:00:00,000 --> 00:00:02,000\nHi\n\n2\n00:00:02,000 --> 00:00:05,000\nThere\n\n"
    );
}

#[test]
fn test_render_vtt_to_stdout() {
    let dir = TempDir::new().unwrap();
    let transcript = write_transcript(dir.path());

    clipix(dir.path())
        .args(["render", "--format", "vtt", "--output", "-", "--transcript"])
        .arg(&transcript)
        .assert()
        .success()
        .stdout("WEBVTT\n\n00:00:00.000 --> 00:00:02.000\nHi\n\n00:00:02.000 --> 00:00:05.000\nThere\n\n");
}

#[test]
fn test_render_json_report() {
    let dir = TempDir::new().unwrap();
    let transcript = write_transcript(dir.path());

    let assert = clipix(dir.path())
        .args(["--json", "render", "--format", "webvtt", "--output", "out.vtt", "--transcript"])
        .arg(&transcript)
        .assert()
        .success();

    let report: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["operation"], "render");
    assert_eq!(report["outputs"][0], "out.vtt");
    assert!(dir.path().join("out.vtt").is_file());
}

#[test]
fn test_render_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let transcript = write_transcript(dir.path());

    clipix(dir.path())
        .args(["render", "--format", "ass", "--output", "x", "--transcript"])
        .arg(&transcript)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid subtitle format"));
}

#[test]
fn test_render_reports_malformed_transcript() {
    let dir = TempDir::new().unwrap();
    let transcript = dir.path().join("broken.json");
    fs::write(&transcript, "{not json").unwrap();

    clipix(dir.path())
        .args(["render", "--format", "srt", "--output", "x.srt", "--transcript"])
        .arg(&transcript)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid transcript"));
}

#[test]
fn test_cut_rejects_reversed_segment() {
    let dir = TempDir::new().unwrap();

    clipix(dir.path())
        .args(["cut", "--input", "in.mp4", "--segment", "10-5", "--output", "o.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be less than end"));
}

#[test]
fn test_trim_missing_input_fails_without_ffmpeg() {
    let dir = TempDir::new().unwrap();

    clipix(dir.path())
        .args(["--upload-dir", "uploads", "--log-level", "error"])
        .args(["trim", "--input", "missing.mp4", "--start", "0", "--end", "1", "--output", "t.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file does not exist"));
}

#[test]
fn test_invalid_log_level_is_reported() {
    let dir = TempDir::new().unwrap();

    clipix(dir.path())
        .args(["--log-level", "chatty", "probe", "--input", "in.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log level"));
}

#[test]
fn test_explicit_missing_config_fails() {
    let dir = TempDir::new().unwrap();

    clipix(dir.path())
        .args(["--config", "nope.toml", "probe", "--input", "in.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

/// Needs ffmpeg and ffprobe on PATH
#[test]
#[ignore]
fn test_real_ffmpeg_cut_probe_and_thumbnail() {
    if !ffmpeg_available() {
        eprintln!("ffmpeg not available, skipping");
        return;
    }

    let dir = TempDir::new().unwrap();
    let source = dir.path().join("source.mp4");
    let status = std::process::Command::new("ffmpeg")
        .args([
            "-hide_banner", "-y", "-f", "lavfi", "-i", "testsrc=duration=10:size=320x240:rate=30",
            "-f", "lavfi", "-i", "sine=frequency=1000:duration=10", "-c:v", "libx264",
            "-g", "30", "-c:a", "aac", "-shortest",
        ])
        .arg(&source)
        .status()
        .unwrap();
    assert!(status.success());

    clipix(dir.path())
        .args(["--upload-dir", "uploads", "cut", "--segment", "0-2", "--segment", "5-7", "--output", "joined.mp4", "--input"])
        .arg(&source)
        .assert()
        .success();

    let joined = dir.path().join("uploads/joined.mp4");
    let assert = clipix(dir.path())
        .args(["--json", "--upload-dir", "uploads", "probe", "--input"])
        .arg(&joined)
        .assert()
        .success();
    let info: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let duration = info["duration"].as_f64().unwrap();
    assert!(duration > 3.0 && duration < 5.0, "duration {}", duration);
    assert_eq!(info["has_audio"], true);

    clipix(dir.path())
        .args(["--upload-dir", "uploads", "thumbnail", "--at", "1.5", "--output", "thumb.jpg", "--input"])
        .arg(&source)
        .assert()
        .success();
    assert!(dir.path().join("uploads/thumb.jpg").is_file());

    let leftovers: Vec<_> = fs::read_dir(dir.path().join("uploads"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| {
            ["temp_segment_", "concat_", "staging_"]
                .iter()
                .any(|prefix| name.starts_with(prefix))
        })
        .collect();
    assert!(leftovers.is_empty(), "{:?}", leftovers);
}
