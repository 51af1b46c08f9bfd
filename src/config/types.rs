//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/solaudit/) and project (solaudit.toml) level
//! configuration plus CLI overrides.

use serde::{Deserialize, Serialize};

use crate::types::{AuditError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider settings
    pub llm: LlmSettings,
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `AuditError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(AuditError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(AuditError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_tokens == 0 {
            return Err(AuditError::Config(
                "LLM max_tokens must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Provider Kind
// =============================================================================

/// Supported hosted LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    #[default]
    Anthropic,
}

impl ProviderKind {
    /// All supported providers
    pub const ALL: [ProviderKind; 2] = [ProviderKind::OpenAi, ProviderKind::Anthropic];

    /// Environment variable holding the API credential
    pub fn credential_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Model used when none is requested explicitly
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "gpt-4o",
            ProviderKind::Anthropic => "claude-3-5-sonnet-20241022",
        }
    }

    /// Models accepted for this provider. An explicitly requested model
    /// outside this list is a configuration error.
    pub fn allowed_models(&self) -> &'static [&'static str] {
        match self {
            ProviderKind::OpenAi => &["gpt-4o", "gpt-4o-mini"],
            ProviderKind::Anthropic => &[
                "claude-3-5-sonnet-20241022",
                "claude-3-opus-20240229",
                "claude-3-haiku-20240229",
            ],
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            _ => Err(format!(
                "Unsupported provider: {}. Valid values: openai, anthropic",
                s
            )),
        }
    }
}

// =============================================================================
// LLM Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Provider to use for all generation calls
    pub provider: ProviderKind,

    /// Model name. None means the provider's default model.
    pub model: Option<String>,

    /// Temperature for LLM generation (0.0 = deterministic)
    pub temperature: f32,

    /// Maximum tokens to generate per call
    pub max_tokens: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Sampling seed carried in the resolved configuration. Neither
    /// provider transmits it on the wire.
    pub seed: u64,

    /// API base URL override (for proxies and compatible endpoints)
    pub api_base: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Anthropic,
            model: None,
            temperature: 0.0,
            max_tokens: 1000,
            timeout_secs: 600,
            seed: 42,
            api_base: None,
        }
    }
}

// =============================================================================
// CLI Overrides
// =============================================================================

/// Provider selection overrides supplied on the command line.
/// Applied on top of file and environment configuration at resolution time.
#[derive(Debug, Clone, Default)]
pub struct LlmOverrides {
    pub provider: Option<ProviderKind>,
    pub model: Option<String>,
}

// =============================================================================
// Tests
// =============================================================================
