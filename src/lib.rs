//! SolAudit - Multi-Agent Smart Contract Security Auditor
//!
//! Sends Solidity source through five specialized LLM security agents
//! (reentrancy, access control, business logic, gas optimization, integer
//! overflow) and synthesizes their findings into one prioritized report
//! with a final coordinator call.
//!
//! ## Core Features
//!
//! - **Specialized Agents**: one parameterized agent type, five domain
//!   instructions, fixed run order
//! - **Provider Abstraction**: OpenAI and Anthropic backends behind one
//!   trait; backend chosen once at startup
//! - **Deterministic Defaults**: temperature 0, fixed model catalog,
//!   configuration resolved into an immutable value before the first call
//!
//! ## Quick Start
//!
//! ```ignore
//! use solaudit::agent::Coordinator;
//! use solaudit::config::{LlmOverrides, LlmSettings};
//! use solaudit::llm::{ProviderConfig, create_provider};
//!
//! let config = ProviderConfig::resolve(&LlmSettings::default(), &LlmOverrides::default())?;
//! let provider = create_provider(&config)?;
//! let report = Coordinator::new(provider).audit_contract(&source).await?;
//! ```
//!
//! ## Modules
//!
//! - [`agent`]: the five security agents and the audit coordinator
//! - [`llm`]: provider trait, resolution, and the two HTTP backends
//! - [`config`]: file/env configuration and CLI overrides
//! - [`cli`]: the audit command and console output helpers

pub mod agent;
pub mod cli;
pub mod config;
pub mod llm;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, LlmOverrides, LlmSettings, ProviderKind};

// Error Types
pub use types::error::{AuditError, Result};

// Audit Pipeline
pub use agent::{AuditDomain, Coordinator, Finding, Findings, SecurityAgent};

// Providers
pub use llm::{LlmProvider, ProviderConfig, SharedProvider, create_provider};
