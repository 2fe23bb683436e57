//! Scenario types
//!
//! A scenario is plain data: the accounts to open, which of them to register
//! with the bank, and the steps to replay. It loads from JSON or is put
//! together with [`ScenarioBuilder`].

use crate::error::ScenarioResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// An account to open before the steps run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSpec {
    pub owner: String,
    pub balance: Decimal,
}

impl AccountSpec {
    pub fn new(owner: &str, balance: Decimal) -> Self {
        Self {
            owner: owner.to_string(),
            balance,
        }
    }
}

// ============================================================================
// Steps
// ============================================================================

/// One operation of a scenario. Accounts are referred to by owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Debit {
        account: String,
        amount: Decimal,
    },
    Credit {
        account: String,
        amount: Decimal,
    },
    Transfer {
        from: String,
        to: String,
        amount: Decimal,
    },
    Rename {
        name: String,
    },
}

impl Step {
    pub fn description(&self) -> String {
        match self {
            Step::Debit { account, amount } => format!("Debit {} from {}", amount, account),
            Step::Credit { account, amount } => format!("Credit {} to {}", amount, account),
            Step::Transfer { from, to, amount } => {
                format!("Transfer {} from {} to {}", amount, from, to)
            }
            Step::Rename { name } => format!("Rename bank to '{}'", name),
        }
    }

    /// Owners this step refers to.
    pub fn owners(&self) -> Vec<&str> {
        match self {
            Step::Debit { account, .. } | Step::Credit { account, .. } => vec![account.as_str()],
            Step::Transfer { from, to, .. } => vec![from.as_str(), to.as_str()],
            Step::Rename { .. } => Vec::new(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

// ============================================================================
// Scenario
// ============================================================================

/// A complete bank session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Initial bank name; empty when absent
    #[serde(default)]
    pub bank: Option<String>,
    pub accounts: Vec<AccountSpec>,
    /// Owners to register with the bank, in order
    #[serde(default)]
    pub register: Vec<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn builder() -> ScenarioBuilder {
        ScenarioBuilder::new()
    }

    pub fn from_json(json: &str) -> ScenarioResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON scenario from disk.
    pub fn load(path: impl AsRef<Path>) -> ScenarioResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> ScenarioResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Owners declared more than once.
    pub fn duplicate_owners(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.accounts
            .iter()
            .map(|spec| spec.owner.as_str())
            .filter(|owner| !seen.insert(*owner))
            .collect()
    }
}

/// Builder for constructing scenarios
#[derive(Debug, Default)]
pub struct ScenarioBuilder {
    scenario: Scenario,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bank(mut self, name: &str) -> Self {
        self.scenario.bank = Some(name.to_string());
        self
    }

    pub fn account(mut self, owner: &str, balance: Decimal) -> Self {
        self.scenario.accounts.push(AccountSpec::new(owner, balance));
        self
    }

    pub fn register(mut self, owner: &str) -> Self {
        self.scenario.register.push(owner.to_string());
        self
    }

    pub fn debit(mut self, account: &str, amount: Decimal) -> Self {
        self.scenario.steps.push(Step::Debit {
            account: account.to_string(),
            amount,
        });
        self
    }

    pub fn credit(mut self, account: &str, amount: Decimal) -> Self {
        self.scenario.steps.push(Step::Credit {
            account: account.to_string(),
            amount,
        });
        self
    }

    pub fn transfer(mut self, from: &str, to: &str, amount: Decimal) -> Self {
        self.scenario.steps.push(Step::Transfer {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        });
        self
    }

    pub fn rename(mut self, name: &str) -> Self {
        self.scenario.steps.push(Step::Rename {
            name: name.to_string(),
        });
        self
    }

    pub fn build(self) -> Scenario {
        self.scenario
    }
}
