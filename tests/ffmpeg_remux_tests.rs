//! Runs the real ffmpeg remux. Needs `ffmpeg` and `ffprobe` on PATH:
//! `cargo test --test ffmpeg_remux_tests -- --ignored`

use std::path::Path;

use tokio::process::Command;

use redub::config::Config;
use redub::media::{MediaProcessorImpl, MediaProcessorTrait};

const VIDEO_SECS: f64 = 3.0;
const SPEECH_SECS: f64 = 1.0;

async fn run(binary: &str, args: &[&str]) -> String {
    let output = Command::new(binary).args(args).output().await.unwrap();
    assert!(
        output.status.success(),
        "{} {:?} failed: {}",
        binary,
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

async fn duration_secs(path: &Path) -> f64 {
    let out = run(
        "ffprobe",
        &["-v", "error", "-show_entries", "format=duration", "-of", "csv=p=0", path.to_str().unwrap()],
    )
    .await;
    out.trim().parse().unwrap()
}

/// Size and hash of every video packet, read without decoding.
async fn video_packet_hashes(path: &Path) -> Vec<String> {
    let out = run(
        "ffmpeg",
        &["-v", "error", "-i", path.to_str().unwrap(), "-map", "0:v:0", "-c", "copy", "-f", "framemd5", "-"],
    )
    .await;
    out.lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            format!("{} {}", fields[fields.len() - 2], fields[fields.len() - 1])
        })
        .collect()
}

async fn ffmpeg_available() -> bool {
    Command::new("ffmpeg").arg("-version").output().await.is_ok()
        && Command::new("ffprobe").arg("-version").output().await.is_ok()
}

#[tokio::test]
#[ignore = "needs ffmpeg and ffprobe on PATH"]
async fn test_remux_keeps_video_and_stops_at_shorter_stream() {
    if !ffmpeg_available().await {
        eprintln!("ffmpeg not found, skipping");
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("input.mp4");
    let speech = dir.path().join("speech.wav");
    let output = dir.path().join("output.mp4");

    run(
        "ffmpeg",
        &[
            "-v", "error", "-y",
            "-f", "lavfi", "-i", &format!("testsrc=duration={VIDEO_SECS}:size=160x120:rate=25"),
            "-f", "lavfi", "-i", &format!("sine=frequency=220:duration={VIDEO_SECS}"),
            "-map", "0:v", "-map", "1:a",
            "-c:v", "mpeg4", "-g", "1", "-c:a", "aac",
            video.to_str().unwrap(),
        ],
    )
    .await;
    run(
        "ffmpeg",
        &[
            "-v", "error", "-y",
            "-f", "lavfi", "-i", &format!("sine=frequency=440:duration={SPEECH_SECS}"),
            speech.to_str().unwrap(),
        ],
    )
    .await;

    let media = MediaProcessorImpl::new(Config::default().media);
    media.replace_audio(&video, &speech, &output).await.unwrap();

    let dubbed = duration_secs(&output).await;
    assert!(
        (dubbed - SPEECH_SECS.min(VIDEO_SECS)).abs() < 0.5,
        "output lasts {dubbed}s"
    );

    let source_packets = video_packet_hashes(&video).await;
    let dubbed_packets = video_packet_hashes(&output).await;
    assert!(!dubbed_packets.is_empty());
    assert!(dubbed_packets.len() < source_packets.len());
    assert_eq!(dubbed_packets[..], source_packets[..dubbed_packets.len()]);
}
