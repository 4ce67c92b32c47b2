use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::error::{Result, RedubError};

fn default_timeout_secs() -> u64 {
    300
}

fn default_max_upload_bytes() -> usize {
    100 * 1024 * 1024
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub media: MediaConfig,
    pub transcriber: TranscriberConfig,
    pub translate: TranslateConfig,
    pub synthesis: SynthesisConfig,
    pub languages: LanguageConfig,
    pub workspace: WorkspaceConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Path to ffmpeg binary
    pub binary_path: String,
    /// Force a sample rate on the extracted waveform (source rate when unset)
    pub extract_sample_rate: Option<u32>,
    /// Force a channel count on the extracted waveform (source layout when unset)
    pub extract_channels: Option<u32>,
    /// Codec used for the synthesized audio track in the remuxed output
    pub remux_audio_codec: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    /// Speech-to-text endpoint (Deepgram prerecorded API shape)
    pub endpoint: String,
    /// Recognition model requested from the service
    pub model: String,
    /// Environment variable holding the service key
    pub api_key_env: String,
    /// Service key; filled from `api_key_env`, never written to disk
    #[serde(skip)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Translation endpoint (LibreTranslate API shape)
    pub endpoint: String,
    /// Environment variable holding an optional translation key
    pub api_key_env: String,
    #[serde(skip)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// TTS command, e.g. gtts-cli
    pub binary_path: String,
    /// Argument template; `{text}`, `{lang}` and `{output}` are substituted
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Closed set of languages known to every stage
    pub supported: Vec<String>,
    /// Target used when the request names none
    pub default_target: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Parent directory for per-job workspaces (system temp dir when unset)
    pub root: Option<PathBuf>,
    /// Prefix of each workspace directory name
    pub prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            media: MediaConfig {
                binary_path: "ffmpeg".to_string(),
                extract_sample_rate: None,
                extract_channels: None,
                remux_audio_codec: "aac".to_string(),
            },
            transcriber: TranscriberConfig {
                endpoint: "https://api.deepgram.com/v1/listen".to_string(),
                model: "nova-2".to_string(),
                api_key_env: "DEEPGRAM_API_KEY".to_string(),
                api_key: None,
                timeout_secs: default_timeout_secs(),
            },
            translate: TranslateConfig {
                endpoint: "http://localhost:5000/translate".to_string(),
                api_key_env: "LIBRETRANSLATE_API_KEY".to_string(),
                api_key: None,
                timeout_secs: default_timeout_secs(),
            },
            synthesis: SynthesisConfig {
                binary_path: "gtts-cli".to_string(),
                args: vec![
                    "--lang".to_string(),
                    "{lang}".to_string(),
                    "--output".to_string(),
                    "{output}".to_string(),
                    "--".to_string(),
                    "{text}".to_string(),
                ],
            },
            languages: LanguageConfig {
                supported: vec!["en".to_string(), "hi".to_string()],
                default_target: "hi".to_string(),
            },
            workspace: WorkspaceConfig {
                root: None,
                prefix: "redub-".to_string(),
            },
            server: ServerConfig {
                bind: "0.0.0.0:3000".to_string(),
                max_upload_bytes: default_max_upload_bytes(),
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RedubError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| RedubError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RedubError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| RedubError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Pull credentials from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Same as [`Config::apply_env`] with an injectable lookup.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(&self.transcriber.api_key_env).filter(|k| !k.trim().is_empty()) {
            self.transcriber.api_key = Some(key);
        }
        if let Some(key) = lookup(&self.translate.api_key_env).filter(|k| !k.trim().is_empty()) {
            self.translate.api_key = Some(key);
        }
    }

    /// The speech-to-text key, or `ConfigurationMissing` naming the variable to set.
    pub fn require_transcriber_key(&self) -> Result<&str> {
        self.transcriber
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| RedubError::ConfigurationMissing(self.transcriber.api_key_env.clone()))
    }
}
