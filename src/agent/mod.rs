//! Security Analysis Agents
//!
//! One parameterized agent type covers the five audit domains; each agent is
//! its domain's instruction template bound to a shared LLM provider. The
//! coordinator fans the contract out over all of them and synthesizes the
//! final report.

mod coordinator;
pub mod prompts;

pub use coordinator::{Coordinator, Finding, Findings};

use crate::llm::SharedProvider;
use crate::types::Result;

// =============================================================================
// Audit Domains
// =============================================================================

/// The security domains swept during an audit, in their fixed run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditDomain {
    Reentrancy,
    AccessControl,
    BusinessLogic,
    GasOptimization,
    Overflow,
}

impl AuditDomain {
    /// Every domain, in the order agents run and findings are reported.
    pub const ALL: [AuditDomain; 5] = [
        AuditDomain::Reentrancy,
        AuditDomain::AccessControl,
        AuditDomain::BusinessLogic,
        AuditDomain::GasOptimization,
        AuditDomain::Overflow,
    ];

    /// Human-readable domain name, used in report section headers
    pub fn label(&self) -> &'static str {
        match self {
            AuditDomain::Reentrancy => "Reentrancy",
            AuditDomain::AccessControl => "Access Control",
            AuditDomain::BusinessLogic => "Business Logic",
            AuditDomain::GasOptimization => "Gas Optimization",
            AuditDomain::Overflow => "Overflow",
        }
    }

    /// The system instruction conditioning this domain's agent
    pub fn instruction(&self) -> &'static str {
        match self {
            AuditDomain::Reentrancy => prompts::REENTRANCY,
            AuditDomain::AccessControl => prompts::ACCESS_CONTROL,
            AuditDomain::BusinessLogic => prompts::BUSINESS_LOGIC,
            AuditDomain::GasOptimization => prompts::GAS_OPTIMIZATION,
            AuditDomain::Overflow => prompts::OVERFLOW,
        }
    }
}

impl std::fmt::Display for AuditDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// Security Agent
// =============================================================================

/// A specialized security agent: one audit domain bound to a provider.
///
/// The contract source passes through untouched as the user message; the
/// agent adds nothing but its instruction.
pub struct SecurityAgent {
    domain: AuditDomain,
    provider: SharedProvider,
}

impl SecurityAgent {
    pub fn new(domain: AuditDomain, provider: SharedProvider) -> Self {
        Self { domain, provider }
    }

    pub fn domain(&self) -> AuditDomain {
        self.domain
    }

    /// Analyze the contract source within this agent's domain.
    pub async fn analyze(&self, contract_code: &str) -> Result<String> {
        self.provider
            .generate(self.domain.instruction(), contract_code)
            .await
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct EchoProvider;

    #[async_trait]
    impl crate::llm::LlmProvider for EchoProvider {
        async fn generate(&self, system_prompt: &str, user_message: &str) -> Result<String> {
            Ok(format!("{}|{}", system_prompt, user_message))
        }

        fn name(&self) -> &'static str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-model"
        }
    }

    #[test]
    fn test_domain_order_and_labels() {
        let labels: Vec<&str> = AuditDomain::ALL.iter().map(|d| d.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Reentrancy",
                "Access Control",
                "Business Logic",
                "Gas Optimization",
                "Overflow"
            ]
        );
    }

    #[test]
    fn test_domain_instructions_are_distinct() {
        for a in AuditDomain::ALL {
            assert!(!a.instruction().is_empty());
            for b in AuditDomain::ALL {
                if a != b {
                    assert_ne!(a.instruction(), b.instruction());
                }
            }
        }
    }

    #[tokio::test]
    async fn test_agent_passes_contract_through_unchanged() {
        let agent = SecurityAgent::new(AuditDomain::Reentrancy, Arc::new(EchoProvider));
        let contract = "contract Vault { function withdraw() public {} }";

        let result = agent.analyze(contract).await.unwrap();
        assert_eq!(result, format!("{}|{}", prompts::REENTRANCY, contract));
    }

    #[tokio::test]
    async fn test_agent_accepts_empty_source() {
        let agent = SecurityAgent::new(AuditDomain::Overflow, Arc::new(EchoProvider));
        let result = agent.analyze("").await.unwrap();
        assert_eq!(result, format!("{}|", prompts::OVERFLOW));
    }
}
