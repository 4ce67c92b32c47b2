use assert_fs::prelude::*;

use redub::config::Config;
use redub::error::RedubError;

#[test]
fn test_saved_config_loads_back() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("redub.toml");

    let mut config = Config::default();
    config.media.binary_path = "/usr/local/bin/ffmpeg".to_string();
    config.media.extract_sample_rate = Some(16000);
    config.save_to_file(file.path()).unwrap();

    let loaded = Config::from_file(file.path()).unwrap();
    assert_eq!(loaded.media.binary_path, "/usr/local/bin/ffmpeg");
    assert_eq!(loaded.media.extract_sample_rate, Some(16000));
    assert_eq!(loaded.languages.default_target, "hi");
    assert!(loaded.transcriber.api_key.is_none());
}

#[test]
fn test_missing_timeouts_use_defaults() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("redub.toml");
    file.write_str(
        r#"
[media]
binary_path = "ffmpeg"
remux_audio_codec = "aac"

[transcriber]
endpoint = "https://stt.example/v1/listen"
model = "nova-2"
api_key_env = "STT_KEY"

[translate]
endpoint = "https://mt.example/translate"
api_key_env = "MT_KEY"

[synthesis]
binary_path = "gtts-cli"
args = ["--lang", "{lang}", "--output", "{output}", "--", "{text}"]

[languages]
supported = ["en", "hi"]
default_target = "hi"

[workspace]
prefix = "job-"

[server]
bind = "127.0.0.1:8080"
"#,
    )
    .unwrap();

    let mut config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.transcriber.timeout_secs, 300);
    assert_eq!(config.server.max_upload_bytes, 100 * 1024 * 1024);

    config.apply_env_with(|key| (key == "STT_KEY").then(|| "from-env".to_string()));
    assert_eq!(config.require_transcriber_key().unwrap(), "from-env");
}

#[test]
fn test_malformed_config_is_config_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("redub.toml");
    file.write_str("[media\nbinary_path = ").unwrap();

    let err = Config::from_file(file.path()).unwrap_err();
    assert!(matches!(err, RedubError::Config(_)));
}
