//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Design Principles
//!
//! - Single unified error type (AuditError) for the entire application
//! - Structured variants with context for better debugging
//! - Failures surface unmodified to the caller; nothing retries or
//!   swallows errors on the way up

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    /// Invalid or incomplete configuration: unsupported provider, missing
    /// credential, model outside the provider's catalog, bad endpoint.
    /// Raised during resolution, before any network activity.
    #[error("Config error: {0}")]
    Config(String),

    /// A generation call failed: transport, non-success status, or a
    /// response with no usable content.
    #[error("{provider} provider error: {message}")]
    Provider {
        provider: &'static str,
        message: String,
    },

    /// The contract source could not be read. Terminal at the entry point;
    /// nothing else runs after this.
    #[error("Failed to read contract {}: {}", .path.display(), .source)]
    ContractRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AuditError {
    /// Create a provider error (convenience wrapper)
    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

// =============================================================================
// Tests
// =============================================================================
