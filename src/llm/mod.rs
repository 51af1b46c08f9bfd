//! LLM Provider Abstraction
//!
//! Defines the LlmProvider trait for free-text generation against hosted
//! model APIs, plus resolution from declarative settings into a ready-to-use
//! `ProviderConfig` with the credential embedded.
//!
//! ## Modules
//!
//! - `openai`: OpenAI Chat Completions backend
//! - `anthropic`: Anthropic Messages backend

mod anthropic;
mod openai;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;

use async_trait::async_trait;
use secrecy::SecretString;
use std::sync::Arc;
use tracing::debug;

use crate::config::{LlmOverrides, LlmSettings, ProviderKind};
use crate::types::{AuditError, Result};

/// Shared LLM provider type, handed to every agent in the pipeline.
pub type SharedProvider = Arc<dyn LlmProvider + Send + Sync>;

// =============================================================================
// Provider Configuration (resolved)
// =============================================================================

/// Fully resolved provider configuration
///
/// Produced once per run by [`ProviderConfig::resolve`]; everything needed to
/// talk to the API is already present, including the credential. Values are
/// immutable after resolution, so sharing the derived provider across agents
/// cannot change it mid-audit.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Which hosted API to talk to
    pub provider: ProviderKind,
    /// Model name, validated against the provider's catalog
    pub model: String,
    /// API key - never exposed in logs or debug output
    pub api_key: SecretString,
    /// API base URL override. None means the provider's default endpoint.
    pub api_base: Option<String>,
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum tokens to generate per call
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Sampling seed. Carried for the run configuration; not transmitted.
    pub seed: u64,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("seed", &self.seed)
            .finish()
    }
}

impl ProviderConfig {
    /// Resolve settings and CLI overrides against the process environment.
    pub fn resolve(settings: &LlmSettings, overrides: &LlmOverrides) -> Result<Self> {
        Self::resolve_with_env(settings, overrides, |name| std::env::var(name).ok())
    }

    /// Resolve with an injected credential lookup.
    ///
    /// Order mirrors the configuration contract: provider first, then the
    /// credential (so a missing key surfaces before model validation), then
    /// the model against the provider's catalog, then the endpoint override.
    /// Resolution is pure given the same inputs and environment.
    pub fn resolve_with_env(
        settings: &LlmSettings,
        overrides: &LlmOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let provider = overrides.provider.unwrap_or(settings.provider);

        let env_var = provider.credential_env();
        let api_key = env(env_var)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AuditError::Config(format!("{} not found", env_var)))?;

        let requested = overrides.model.as_deref().or(settings.model.as_deref());
        let model = match requested {
            Some(name) => {
                if !provider.allowed_models().contains(&name) {
                    return Err(AuditError::Config(format!(
                        "Invalid {} model: {}",
                        provider, name
                    )));
                }
                name.to_string()
            }
            None => provider.default_model().to_string(),
        };

        let api_base = match settings.api_base.as_deref() {
            Some(base) => {
                let validated = validate_api_base(base)?;
                debug!("Using custom API base for {}: {}", provider, validated);
                Some(validated)
            }
            None => None,
        };

        Ok(Self {
            provider,
            model,
            api_key: SecretString::from(api_key),
            api_base,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            timeout_secs: settings.timeout_secs,
            seed: settings.seed,
        })
    }
}

/// Validate an API base override.
///
/// Only allows http/https schemes; trailing slash is removed so providers
/// can append paths uniformly.
fn validate_api_base(endpoint: &str) -> Result<String> {
    let url = url::Url::parse(endpoint)
        .map_err(|e| AuditError::Config(format!("Invalid API base URL '{}': {}", endpoint, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AuditError::Config(format!(
            "API base must use http or https scheme, got: {}",
            url.scheme()
        )));
    }

    let mut result = url.to_string();
    if result.ends_with('/') {
        result.pop();
    }
    Ok(result)
}

// =============================================================================
// LLM Provider Trait
// =============================================================================

/// LLM Provider trait for free-text generation
///
/// One call is one request: a system instruction plus a user message in,
/// the model's text out. No retries, no streaming, no output parsing.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for the given system instruction and user message
    async fn generate(&self, system_prompt: &str, user_message: &str) -> Result<String>;

    /// Provider name for logging and error context
    fn name(&self) -> &'static str;

    /// Model name currently in use
    fn model(&self) -> &str;
}

/// Create a shared provider from a resolved configuration.
///
/// Dispatch happens exactly once here; the returned provider is bound to its
/// backend for its whole lifetime.
pub fn create_provider(config: &ProviderConfig) -> Result<SharedProvider> {
    match config.provider {
        ProviderKind::OpenAi => Ok(Arc::new(OpenAiProvider::new(config.clone())?)),
        ProviderKind::Anthropic => Ok(Arc::new(AnthropicProvider::new(config.clone())?)),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn settings() -> LlmSettings {
        LlmSettings::default()
    }

    fn env_with(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn lookup(map: &HashMap<String, String>) -> impl Fn(&str) -> Option<String> + '_ {
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_resolve_defaults_to_anthropic() {
        let env = env_with(&[("ANTHROPIC_API_KEY", "sk-ant-test")]);
        let config =
            ProviderConfig::resolve_with_env(&settings(), &LlmOverrides::default(), lookup(&env))
                .unwrap();

        assert_eq!(config.provider, ProviderKind::Anthropic);
        assert_eq!(config.model, "claude-3-5-sonnet-20241022");
        assert_eq!(config.api_key.expose_secret(), "sk-ant-test");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.timeout_secs, 600);
        assert_eq!(config.seed, 42);
        assert_eq!(config.api_base, None);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let env = env_with(&[("OPENAI_API_KEY", "sk-test")]);
        let overrides = LlmOverrides {
            provider: Some(ProviderKind::OpenAi),
            model: Some("gpt-4o-mini".to_string()),
        };

        let first =
            ProviderConfig::resolve_with_env(&settings(), &overrides, lookup(&env)).unwrap();
        let second =
            ProviderConfig::resolve_with_env(&settings(), &overrides, lookup(&env)).unwrap();

        assert_eq!(first.provider, second.provider);
        assert_eq!(first.model, second.model);
        assert_eq!(
            first.api_key.expose_secret(),
            second.api_key.expose_secret()
        );
        assert_eq!(first.api_base, second.api_base);
        assert_eq!(first.temperature, second.temperature);
        assert_eq!(first.max_tokens, second.max_tokens);
        assert_eq!(first.timeout_secs, second.timeout_secs);
        assert_eq!(first.seed, second.seed);
    }

    #[test]
    fn test_resolve_missing_credential_fails() {
        let env: HashMap<String, String> = HashMap::new();

        for (kind, var) in [
            (ProviderKind::OpenAi, "OPENAI_API_KEY"),
            (ProviderKind::Anthropic, "ANTHROPIC_API_KEY"),
        ] {
            let overrides = LlmOverrides {
                provider: Some(kind),
                model: None,
            };
            let err = ProviderConfig::resolve_with_env(&settings(), &overrides, lookup(&env))
                .unwrap_err();
            match err {
                AuditError::Config(msg) => {
                    assert_eq!(msg, format!("{} not found", var));
                }
                other => panic!("expected Config error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_resolve_empty_credential_fails() {
        let env = env_with(&[("ANTHROPIC_API_KEY", "")]);
        let err =
            ProviderConfig::resolve_with_env(&settings(), &LlmOverrides::default(), lookup(&env))
                .unwrap_err();
        assert!(matches!(err, AuditError::Config(_)));
    }

    #[test]
    fn test_resolve_rejects_unknown_model() {
        let env = env_with(&[("OPENAI_API_KEY", "sk-test"), ("ANTHROPIC_API_KEY", "sk-ant")]);

        let overrides = LlmOverrides {
            provider: Some(ProviderKind::OpenAi),
            model: Some("gpt-5".to_string()),
        };
        let err =
            ProviderConfig::resolve_with_env(&settings(), &overrides, lookup(&env)).unwrap_err();
        match err {
            AuditError::Config(msg) => assert_eq!(msg, "Invalid openai model: gpt-5"),
            other => panic!("expected Config error, got {:?}", other),
        }

        let mut s = settings();
        s.model = Some("claude-2".to_string());
        let err = ProviderConfig::resolve_with_env(&s, &LlmOverrides::default(), lookup(&env))
            .unwrap_err();
        match err {
            AuditError::Config(msg) => assert_eq!(msg, "Invalid anthropic model: claude-2"),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_missing_credential_wins_over_bad_model() {
        let env: HashMap<String, String> = HashMap::new();
        let overrides = LlmOverrides {
            provider: Some(ProviderKind::OpenAi),
            model: Some("gpt-5".to_string()),
        };
        let err =
            ProviderConfig::resolve_with_env(&settings(), &overrides, lookup(&env)).unwrap_err();
        match err {
            AuditError::Config(msg) => assert_eq!(msg, "OPENAI_API_KEY not found"),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_override_precedence() {
        let env = env_with(&[("OPENAI_API_KEY", "sk-test")]);
        let mut s = settings();
        s.provider = ProviderKind::Anthropic;
        s.model = Some("claude-3-haiku-20240229".to_string());

        let overrides = LlmOverrides {
            provider: Some(ProviderKind::OpenAi),
            model: Some("gpt-4o-mini".to_string()),
        };
        let config = ProviderConfig::resolve_with_env(&s, &overrides, lookup(&env)).unwrap();
        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn test_resolve_validates_api_base() {
        let env = env_with(&[("ANTHROPIC_API_KEY", "sk-ant")]);

        let mut s = settings();
        s.api_base = Some("https://proxy.internal/anthropic/".to_string());
        let config =
            ProviderConfig::resolve_with_env(&s, &LlmOverrides::default(), lookup(&env)).unwrap();
        assert_eq!(
            config.api_base.as_deref(),
            Some("https://proxy.internal/anthropic")
        );

        s.api_base = Some("ftp://proxy.internal".to_string());
        let err = ProviderConfig::resolve_with_env(&s, &LlmOverrides::default(), lookup(&env))
            .unwrap_err();
        assert!(matches!(err, AuditError::Config(_)));

        s.api_base = Some("not a url".to_string());
        let err = ProviderConfig::resolve_with_env(&s, &LlmOverrides::default(), lookup(&env))
            .unwrap_err();
        assert!(matches!(err, AuditError::Config(_)));
    }

    #[test]
    fn test_provider_config_debug_redacts_key() {
        let env = env_with(&[("ANTHROPIC_API_KEY", "sk-ant-secret")]);
        let config =
            ProviderConfig::resolve_with_env(&settings(), &LlmOverrides::default(), lookup(&env))
                .unwrap();

        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk-ant-secret"));
    }

    #[test]
    fn test_create_provider_selects_backend() {
        let env = env_with(&[("OPENAI_API_KEY", "sk-test"), ("ANTHROPIC_API_KEY", "sk-ant")]);

        for (kind, name, model) in [
            (ProviderKind::OpenAi, "openai", "gpt-4o"),
            (
                ProviderKind::Anthropic,
                "anthropic",
                "claude-3-5-sonnet-20241022",
            ),
        ] {
            let overrides = LlmOverrides {
                provider: Some(kind),
                model: None,
            };
            let config =
                ProviderConfig::resolve_with_env(&settings(), &overrides, lookup(&env)).unwrap();
            let provider = create_provider(&config).unwrap();
            assert_eq!(provider.name(), name);
            assert_eq!(provider.model(), model);
        }
    }
}
