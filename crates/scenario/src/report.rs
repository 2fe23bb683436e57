//! Scenario reports
//!
//! What a run produced: the outcome of every step and the final state of
//! every declared account.

use crate::error::ScenarioResult;
use crate::scenario::Step;
use banco_core::Account;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Outcome of a single step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Applied,
    /// The core refused the step; balances did not change
    Rejected { reason: String },
}

impl StepOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, StepOutcome::Applied)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// 1-based position in the scenario
    pub index: usize,
    #[serde(flatten)]
    pub step: Step,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// Result of running a scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// Bank name at the end of the run
    pub bank: String,
    /// Owners registered with the bank, in registration order
    pub registered: Vec<String>,
    pub steps: Vec<StepReport>,
    /// Final accounts, in declaration order
    pub accounts: Vec<Account>,
    pub generated_at: DateTime<Utc>,
}

impl ScenarioReport {
    pub fn applied_count(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome.is_applied()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.steps.len() - self.applied_count()
    }

    pub fn account(&self, owner: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.owner() == owner)
    }

    pub fn balance_of(&self, owner: &str) -> Option<Decimal> {
        self.account(owner).map(Account::balance)
    }

    pub fn to_json_pretty(&self) -> ScenarioResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bank = if self.bank.is_empty() { "(unnamed)" } else { self.bank.as_str() };
        writeln!(f, "Bank: {}", bank)?;
        writeln!(f, "Registered: {}", self.registered.join(", "))?;
        writeln!(f)?;

        writeln!(
            f,
            "Steps ({} applied, {} rejected):",
            self.applied_count(),
            self.rejected_count()
        )?;
        for report in &self.steps {
            match &report.outcome {
                StepOutcome::Applied => {
                    writeln!(f, "  {:>3}. {} ... ok", report.index, report.step)?
                }
                StepOutcome::Rejected { reason } => writeln!(
                    f,
                    "  {:>3}. {} ... rejected: {}",
                    report.index, report.step, reason
                )?,
            }
        }
        writeln!(f)?;

        writeln!(f, "Balances:")?;
        for account in &self.accounts {
            writeln!(f, "  {}", account)?;
        }
        Ok(())
    }
}
