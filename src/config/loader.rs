//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/solaudit/config.toml)
//! 3. Project config (./solaudit.toml)
//! 4. Environment variables (SOLAUDIT_* prefix)
//!
//! Credentials are never part of this chain; API keys come only from the
//! provider-specific environment variables at resolution time.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::Config;
use crate::types::{AuditError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge project config
        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // Merge environment variables (e.g., SOLAUDIT_LLM_MODEL -> llm.model)
        figment = figment.merge(Env::prefixed("SOLAUDIT_").split('_').lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| AuditError::Config(format!("Configuration error: {}", e)))?;

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| AuditError::Config(format!("Configuration error: {}", e)))
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/solaudit/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("solaudit"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from("solaudit.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::ProviderKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_empty_file_gives_defaults() {
        let file = NamedTempFile::new().unwrap();
        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.llm.provider, ProviderKind::Anthropic);
        assert_eq!(config.llm.max_tokens, 1000);
        assert_eq!(config.llm.timeout_secs, 600);
    }

    #[test]
    fn test_load_from_file_merges_over_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[llm]\nprovider = \"openai\"\nmodel = \"gpt-4o-mini\"\ntemperature = 0.2"
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.llm.provider, ProviderKind::OpenAi);
        assert_eq!(config.llm.model.as_deref(), Some("gpt-4o-mini"));
        assert!((config.llm.temperature - 0.2).abs() < f32::EPSILON);
        // Untouched fields keep their defaults
        assert_eq!(config.llm.seed, 42);
        assert_eq!(config.llm.max_tokens, 1000);
    }

    #[test]
    fn test_env_override() {
        // SAFETY: This test runs in isolation
        unsafe {
            std::env::set_var("SOLAUDIT_LLM_PROVIDER", "openai");
        }
        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.llm.provider, ProviderKind::OpenAi);
        unsafe {
            std::env::remove_var("SOLAUDIT_LLM_PROVIDER");
        }
    }
}
