//! Source/target language resolution over the configured closed set.

use crate::config::LanguageConfig;
use crate::error::{Result, RedubError};

/// Resolved language direction for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    /// Resolve the direction of a job.
    ///
    /// The target falls back to the configured default. Without an explicit
    /// source, the source is the other member of the supported set, which is
    /// only well defined while exactly two languages are configured.
    pub fn resolve(
        config: &LanguageConfig,
        target: Option<&str>,
        source: Option<&str>,
    ) -> Result<Self> {
        let target = normalize(target).unwrap_or_else(|| config.default_target.to_lowercase());
        ensure_supported(config, &target)?;

        let source = match normalize(source) {
            Some(source) => {
                ensure_supported(config, &source)?;
                source
            }
            None => infer_source(config, &target)?,
        };

        if source == target {
            return Err(RedubError::UnsupportedLanguage(format!(
                "source and target language are both '{}'",
                target
            )));
        }

        Ok(Self { source, target })
    }
}

/// Human-readable name for log lines.
pub fn language_name(code: &str) -> &str {
    match code {
        "en" => "English",
        "hi" => "Hindi",
        "ja" => "Japanese",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        _ => code,
    }
}

fn normalize(code: Option<&str>) -> Option<String> {
    code.map(|c| c.trim().to_lowercase()).filter(|c| !c.is_empty())
}

fn ensure_supported(config: &LanguageConfig, code: &str) -> Result<()> {
    if config.supported.iter().any(|s| s.eq_ignore_ascii_case(code)) {
        Ok(())
    } else {
        Err(RedubError::UnsupportedLanguage(format!(
            "'{}' is not one of [{}]",
            code,
            config.supported.join(", ")
        )))
    }
}

fn infer_source(config: &LanguageConfig, target: &str) -> Result<String> {
    if config.supported.len() != 2 {
        return Err(RedubError::UnsupportedLanguage(format!(
            "cannot infer the source language for '{}' among {} configured languages; pass it explicitly",
            target,
            config.supported.len()
        )));
    }

    config
        .supported
        .iter()
        .map(|s| s.to_lowercase())
        .find(|s| s != target)
        .ok_or_else(|| {
            RedubError::UnsupportedLanguage(format!("no source language differs from '{}'", target))
        })
}
