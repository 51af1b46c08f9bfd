//! Audit Coordinator
//!
//! Runs the specialized agents over the contract strictly in order,
//! collects their findings, and issues one final synthesis call that
//! produces the consolidated report. The first agent failure aborts the
//! whole audit; there is no partial report and no retry.

use std::sync::Arc;

use tracing::info;

use super::{AuditDomain, SecurityAgent, prompts};
use crate::llm::SharedProvider;
use crate::types::Result;

// =============================================================================
// Findings
// =============================================================================

/// One agent's analysis, tagged with its domain.
#[derive(Debug, Clone)]
pub struct Finding {
    pub domain: AuditDomain,
    pub text: String,
}

/// Findings collected during a single audit, in agent run order.
#[derive(Debug, Clone, Default)]
pub struct Findings {
    entries: Vec<Finding>,
}

impl Findings {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, domain: AuditDomain, text: String) {
        self.entries.push(Finding { domain, text });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Coordinator
// =============================================================================

/// Orchestrates the fan-out over the specialized agents and the final
/// synthesis call. All agents share one immutable provider.
pub struct Coordinator {
    agents: Vec<SecurityAgent>,
    provider: SharedProvider,
}

impl Coordinator {
    /// Build the five specialized agents in their fixed run order.
    pub fn new(provider: SharedProvider) -> Self {
        let agents = AuditDomain::ALL
            .into_iter()
            .map(|domain| SecurityAgent::new(domain, Arc::clone(&provider)))
            .collect();

        Self { agents, provider }
    }

    /// Audit the contract: one generation call per agent, sequentially,
    /// then one synthesis call over the collected findings.
    ///
    /// Exactly six calls are issued on the success path. The findings
    /// collection is built fresh on every invocation.
    pub async fn audit_contract(&self, contract_code: &str) -> Result<String> {
        let mut findings = Findings::new();

        for agent in &self.agents {
            info!("Running {} analysis", agent.domain());
            let text = agent.analyze(contract_code).await?;
            findings.push(agent.domain(), text);
        }

        let summary_prompt = build_synthesis_prompt(&findings);
        info!("Synthesizing final report from {} findings", findings.len());

        self.provider
            .generate(prompts::COORDINATOR, &summary_prompt)
            .await
    }
}

/// Assemble the coordinator's user message: the fixed preamble followed by
/// one uppercase-headed block per finding, in collection order.
fn build_synthesis_prompt(findings: &Findings) -> String {
    let mut prompt = String::from(prompts::SYNTHESIS_PREAMBLE);

    for finding in findings.iter() {
        prompt.push_str(&format!(
            "=== {} ANALYSIS ===\n{}\n\n",
            finding.domain.label().to_uppercase(),
            finding.text
        ));
    }

    prompt
}

// =============================================================================
// Tests
// =============================================================================
