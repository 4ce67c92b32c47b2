mod common;

use base64::{Engine as _, engine::general_purpose};

use redub::error::RedubError;
use redub::workflow::JobRequest;

#[tokio::test]
async fn test_english_clip_dubbed_into_hindi() {
    let h = common::harness(true);

    let result = h
        .workflow
        .translate(
            JobRequest::new(b"five-second-clip".to_vec())
                .with_file_name("hello.mp4")
                .with_target("hi"),
        )
        .await
        .unwrap();

    assert_eq!(result.languages.source, "en");
    assert_eq!(result.languages.target, "hi");
    assert_eq!(
        h.calls(),
        vec![
            "extract input.mp4",
            "transcribe audio.wav en",
            "translate hello en hi",
            "synthesize नमस्ते hi",
            "remux input.mp4 speech.mp3 output.mp4",
        ]
    );

    let url = result.to_data_url();
    let payload = url.strip_prefix("data:video/mp4;base64,").unwrap();
    assert_eq!(general_purpose::STANDARD.decode(payload).unwrap(), b"dubbed-video");

    assert_eq!(h.leftover_workspaces(), 0);
}

#[tokio::test]
async fn test_omitted_target_defaults_to_hindi() {
    let h = common::harness(true);

    let result = tokio_test::assert_ok!(h.workflow.translate(JobRequest::new(b"clip".to_vec())).await);

    assert_eq!(result.languages.target, "hi");
    assert_eq!(result.languages.source, "en");
}

#[tokio::test]
async fn test_hindi_clip_dubbed_into_english() {
    let h = common::harness(true);

    let result = h
        .workflow
        .translate(JobRequest::new(b"clip".to_vec()).with_target("en"))
        .await
        .unwrap();

    assert_eq!(result.languages.source, "hi");
    assert!(h.calls().contains(&"transcribe audio.wav hi".to_string()));
}

#[tokio::test]
async fn test_video_without_audio_track_fails_extraction() {
    let h = common::harness(false);

    let err = tokio_test::assert_err!(
        h.workflow
            .translate(JobRequest::new(b"silent-clip".to_vec()).with_file_name("silent.mov"))
            .await
    );

    assert!(matches!(err, RedubError::MediaExtraction(_)), "got {:?}", err);
    assert_eq!(h.calls(), vec!["extract input.mov"]);
    assert_eq!(h.leftover_workspaces(), 0);
}

#[tokio::test]
async fn test_container_extension_carries_through() {
    let h = common::harness(true);

    let result = h
        .workflow
        .translate(JobRequest::new(b"clip".to_vec()).with_file_name("holiday.MOV"))
        .await
        .unwrap();

    assert_eq!(result.mime_type, "video/quicktime");
    assert!(h.calls().contains(&"remux input.mov speech.mp3 output.mov".to_string()));
}

#[tokio::test]
async fn test_unknown_extension_is_remuxed_as_mp4() {
    let h = common::harness(true);

    let result = h
        .workflow
        .translate(JobRequest::new(b"clip".to_vec()).with_file_name("clip.bin"))
        .await
        .unwrap();

    assert_eq!(result.mime_type, "video/mp4");
    assert!(h.calls().contains(&"remux input.mp4 speech.mp3 output.mp4".to_string()));
}
