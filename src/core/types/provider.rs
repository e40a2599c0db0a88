//! Provider identity tags

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend provider family an endpoint talks to
///
/// The tag is used for usage accounting, cost lookup and log fields. Two
/// endpoints may share the same tag (e.g. two OpenAI accounts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[serde(rename = "openai")]
    OpenAI,
    Anthropic,
    Azure,
    Gemini,
    Groq,
    Mistral,
    #[serde(rename = "deepseek")]
    DeepSeek,
    /// On-device or self-hosted model, also used for the local fallback path
    Local,
}

impl ProviderKind {
    /// All known provider tags
    pub const ALL: [ProviderKind; 8] = [
        ProviderKind::OpenAI,
        ProviderKind::Anthropic,
        ProviderKind::Azure,
        ProviderKind::Gemini,
        ProviderKind::Groq,
        ProviderKind::Mistral,
        ProviderKind::DeepSeek,
        ProviderKind::Local,
    ];

    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Azure => "azure",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Groq => "groq",
            ProviderKind::Mistral => "mistral",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Local => "local",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        ProviderKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| format!("Unknown provider: {}", s))
    }
}
