use thiserror::Error;

#[derive(Error, Debug)]
pub enum RedubError {
    #[error("No video file provided")]
    InputMissing,

    #[error("Missing required configuration: {0}")]
    ConfigurationMissing(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Audio extraction failed: {0}")]
    MediaExtraction(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Translation failed: {0}")]
    Translation(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("Remux failed: {0}")]
    Remux(String),

    #[error("Processing failed: {0}")]
    Unclassified(String),
}

impl RedubError {
    /// Short machine-readable tag for the failure cause.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InputMissing => "input_missing",
            Self::ConfigurationMissing(_) => "configuration_missing",
            Self::Config(_) => "config",
            Self::UnsupportedLanguage(_) => "unsupported_language",
            Self::MediaExtraction(_) => "media_extraction_failed",
            Self::Transcription(_) => "transcription_failed",
            Self::Translation(_) => "translation_failed",
            Self::Synthesis(_) => "synthesis_failed",
            Self::Remux(_) => "remux_failed",
            Self::Unclassified(_) => "unclassified",
        }
    }

    /// HTTP status the upload boundary answers with for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InputMissing | Self::UnsupportedLanguage(_) => 400,
            _ => 500,
        }
    }
}

impl From<std::io::Error> for RedubError {
    fn from(e: std::io::Error) -> Self {
        Self::Unclassified(format!("IO error: {}", e))
    }
}

impl From<serde_json::Error> for RedubError {
    fn from(e: serde_json::Error) -> Self {
        Self::Unclassified(format!("JSON error: {}", e))
    }
}

impl From<toml::de::Error> for RedubError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(format!("TOML parsing error: {}", e))
    }
}

impl From<reqwest::Error> for RedubError {
    fn from(e: reqwest::Error) -> Self {
        Self::Unclassified(format!("HTTP request error: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, RedubError>;
