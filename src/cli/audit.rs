//! Audit Command
//!
//! Reads the contract source, resolves the provider configuration, runs the
//! multi-agent audit, and emits the final report to stdout or a file.
//!
//! The contract is read before anything else; an unreadable path means no
//! configuration work and no network activity.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::output::Output;
use crate::agent::Coordinator;
use crate::config::{ConfigLoader, LlmOverrides};
use crate::llm::{ProviderConfig, create_provider};
use crate::types::{AuditError, Result};

/// Options collected from the command line
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Path to the Solidity contract file
    pub contract: PathBuf,
    /// Report destination. None prints to stdout.
    pub output: Option<PathBuf>,
    /// Provider/model overrides applied on top of file and env configuration
    pub overrides: LlmOverrides,
}

pub async fn run(options: AuditOptions) -> Result<()> {
    let ui = Output::new();

    let contract_code =
        fs::read_to_string(&options.contract).map_err(|source| AuditError::ContractRead {
            path: options.contract.clone(),
            source,
        })?;

    let config = ConfigLoader::load()?;
    let provider_config = ProviderConfig::resolve(&config.llm, &options.overrides)?;
    debug!("Resolved provider configuration: {:?}", provider_config);

    let provider = create_provider(&provider_config)?;
    let coordinator = Coordinator::new(provider);

    ui.info("Starting contract audit...");
    let report = coordinator.audit_contract(&contract_code).await?;

    emit_report(&ui, &report, options.output.as_deref())?;

    println!();
    ui.success("Audit complete!");

    Ok(())
}

/// Write the report to the requested file, or print it under the banner.
fn emit_report(ui: &Output, report: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, report)?;
            ui.success(&format!("Report written to {}", path.display()));
        }
        None => {
            println!("\n=== FINAL AUDIT REPORT ===\n");
            println!("{}", report);
        }
    }

    Ok(())
}
