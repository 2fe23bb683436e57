//! Scenario runner
//!
//! Opens the declared accounts, registers the listed owners with a fresh
//! [`Bank`], then replays every step through the core API.

use crate::error::{ScenarioError, ScenarioResult};
use crate::report::{ScenarioReport, StepOutcome, StepReport};
use crate::scenario::{Scenario, Step};
use banco_core::{Account, AccountId, Bank, CoreResult};
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Where an owner's account lives during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Registered with the bank
    Bank(AccountId),
    /// Opened but never registered
    Loose(usize),
}

/// Runs scenarios against banco-core.
pub struct ScenarioRunner;

impl ScenarioRunner {
    /// Run `scenario` to completion.
    ///
    /// Steps refused for insufficient funds are recorded as
    /// [`StepOutcome::Rejected`] and the run goes on. Any other core error
    /// stops the run. A step naming an undeclared owner is caught before any
    /// step runs.
    pub fn run(scenario: &Scenario) -> ScenarioResult<ScenarioReport> {
        let mut session = Session::open(scenario)?;
        session.check_owners(&scenario.steps)?;
        info!(
            bank = %session.bank.name(),
            accounts = scenario.accounts.len(),
            registered = session.bank.len(),
            steps = scenario.steps.len(),
            "scenario started"
        );

        let mut steps = Vec::with_capacity(scenario.steps.len());
        for (position, step) in scenario.steps.iter().enumerate() {
            let outcome = session.apply(step)?;
            debug!(index = position + 1, step = %step, applied = outcome.is_applied(), "step done");
            steps.push(StepReport {
                index: position + 1,
                step: step.clone(),
                outcome,
            });
        }

        let report = session.into_report(scenario, steps)?;
        info!(
            applied = report.applied_count(),
            rejected = report.rejected_count(),
            "scenario finished"
        );
        Ok(report)
    }
}

/// Mutable state of one run.
struct Session {
    bank: Bank,
    loose: Vec<Account>,
    slots: HashMap<String, Slot>,
    registered: Vec<String>,
}

impl Session {
    fn open(scenario: &Scenario) -> ScenarioResult<Self> {
        if let Some(owner) = scenario.duplicate_owners().first() {
            return Err(ScenarioError::DuplicateAccount(owner.to_string()));
        }

        let mut specs: HashMap<&str, Decimal> = scenario
            .accounts
            .iter()
            .map(|spec| (spec.owner.as_str(), spec.balance))
            .collect();

        let mut bank = Bank::new();
        if let Some(name) = &scenario.bank {
            bank.set_name(name.as_str());
        }

        let mut slots = HashMap::new();
        for owner in &scenario.register {
            if slots.contains_key(owner) {
                return Err(ScenarioError::AlreadyRegistered(owner.clone()));
            }
            let balance = specs
                .remove(owner.as_str())
                .ok_or_else(|| ScenarioError::unknown_account(owner))?;
            let id = bank.add_account(Account::new(owner.as_str(), balance));
            slots.insert(owner.clone(), Slot::Bank(id));
        }

        let mut loose = Vec::new();
        for spec in &scenario.accounts {
            if !slots.contains_key(&spec.owner) {
                slots.insert(spec.owner.clone(), Slot::Loose(loose.len()));
                loose.push(Account::new(spec.owner.as_str(), spec.balance));
            }
        }

        Ok(Self {
            bank,
            loose,
            slots,
            registered: scenario.register.clone(),
        })
    }

    /// Every owner named by `steps` must have an account.
    fn check_owners(&self, steps: &[Step]) -> ScenarioResult<()> {
        match steps
            .iter()
            .flat_map(Step::owners)
            .find(|owner| !self.slots.contains_key(*owner))
        {
            Some(owner) => Err(ScenarioError::unknown_account(owner)),
            None => Ok(()),
        }
    }

    fn slot(&self, owner: &str) -> ScenarioResult<Slot> {
        self.slots
            .get(owner)
            .copied()
            .ok_or_else(|| ScenarioError::unknown_account(owner))
    }

    fn account(&self, owner: &str) -> ScenarioResult<&Account> {
        match self.slot(owner)? {
            Slot::Bank(id) => self.bank.account(id),
            Slot::Loose(index) => self.loose.get(index),
        }
        .ok_or_else(|| ScenarioError::unknown_account(owner))
    }

    fn account_mut(&mut self, owner: &str) -> ScenarioResult<&mut Account> {
        match self.slot(owner)? {
            Slot::Bank(id) => self.bank.account_mut(id),
            Slot::Loose(index) => self.loose.get_mut(index),
        }
        .ok_or_else(|| ScenarioError::unknown_account(owner))
    }

    fn apply(&mut self, step: &Step) -> ScenarioResult<StepOutcome> {
        let result = match step {
            Step::Debit { account, amount } => self.account_mut(account)?.debit(*amount),
            Step::Credit { account, amount } => self.account_mut(account)?.credit(*amount),
            Step::Transfer { from, to, amount } => self.transfer(from, to, *amount)?,
            Step::Rename { name } => {
                self.bank.set_name(name.as_str());
                Ok(())
            }
        };

        match result {
            Ok(()) => Ok(StepOutcome::Applied),
            Err(err) if err.is_insufficient_funds() => {
                warn!(step = %step, "step rejected: {}", err);
                Ok(StepOutcome::Rejected {
                    reason: err.to_string(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Outer result: the scenario itself is broken. Inner result: the core
    /// refused the transfer.
    fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> ScenarioResult<CoreResult<()>> {
        let source = self.slot(from)?;
        let target = self.slot(to)?;

        let result = match (source, target) {
            (Slot::Bank(a), Slot::Bank(b)) => self.bank.transfer_between(a, b, amount),
            (Slot::Loose(a), Slot::Loose(b)) if a == b => {
                let account = self.account_mut(from)?;
                account.debit(amount).and_then(|()| account.credit(amount))
            }
            (Slot::Loose(a), Slot::Loose(b)) => {
                let (source, target) = pair_mut(&mut self.loose, a, b)
                    .ok_or_else(|| ScenarioError::unknown_account(from))?;
                self.bank.transfer(source, target, amount)
            }
            (Slot::Loose(a), Slot::Bank(b)) => {
                let source = self
                    .loose
                    .get_mut(a)
                    .ok_or_else(|| ScenarioError::unknown_account(from))?;
                let target = self
                    .bank
                    .account_mut(b)
                    .ok_or_else(|| ScenarioError::unknown_account(to))?;
                banco_core::transfer_funds(source, target, amount)
            }
            (Slot::Bank(a), Slot::Loose(b)) => {
                let source = self
                    .bank
                    .account_mut(a)
                    .ok_or_else(|| ScenarioError::unknown_account(from))?;
                let target = self
                    .loose
                    .get_mut(b)
                    .ok_or_else(|| ScenarioError::unknown_account(to))?;
                banco_core::transfer_funds(source, target, amount)
            }
        };
        Ok(result)
    }

    fn into_report(
        self,
        scenario: &Scenario,
        steps: Vec<StepReport>,
    ) -> ScenarioResult<ScenarioReport> {
        let accounts = scenario
            .accounts
            .iter()
            .map(|spec| self.account(&spec.owner).cloned())
            .collect::<ScenarioResult<Vec<_>>>()?;

        Ok(ScenarioReport {
            bank: self.bank.name(),
            registered: self.registered,
            steps,
            accounts,
            generated_at: Utc::now(),
        })
    }
}

/// Two distinct mutable elements of a slice, or `None` if the indices are
/// equal or out of bounds.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> Option<(&mut T, &mut T)> {
    if a == b || a.max(b) >= items.len() {
        return None;
    }
    if a < b {
        let (left, right) = items.split_at_mut(b);
        Some((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = items.split_at_mut(a);
        Some((&mut right[0], &mut left[b]))
    }
}
