//! Supported output languages and locale normalization.

use serde::{Deserialize, Serialize};

/// Output language for prompt text and localized option listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    /// Normalize an incoming locale code ("zh-CN", "EN", ...) to a supported
    /// language. Anything that is not a Chinese locale falls back to English.
    pub fn from_code(code: &str) -> Self {
        if code.trim().to_lowercase().starts_with("zh") {
            Language::Zh
        } else {
            Language::En
        }
    }

    /// Language code as used in catalog `name_i18n` tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}
