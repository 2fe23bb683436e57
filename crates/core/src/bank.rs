//! # Bank Module
//!
//! A Bank has a name and an ordered list of registered accounts, and moves
//! money between accounts.
//!
//! A transfer is debit first, credit second. The debit is the step that can
//! be refused, so a refused transfer leaves both accounts exactly as they
//! were. The credit is checked for overflow before the debit runs.

use crate::account::Account;
use crate::error::{CoreError, CoreResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::info;

/// Position of an account inside a [`Bank`], in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(usize);

impl AccountId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bank data shared with the accounts that point back at it.
#[derive(Debug, Default)]
struct BankProfile {
    name: RefCell<String>,
}

/// Non-owning link from an account to the bank it was registered with.
///
/// Holding a `BankRef` does not keep the bank alive; once the bank is dropped
/// [`BankRef::name`] returns `None`.
#[derive(Clone)]
pub struct BankRef(Weak<BankProfile>);

impl BankRef {
    /// Current name of the bank, including renames made after registration.
    pub fn name(&self) -> Option<String> {
        self.0.upgrade().map(|profile| profile.name.borrow().clone())
    }

    /// Whether the bank still exists.
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    pub fn is_linked_to(&self, bank: &Bank) -> bool {
        std::ptr::eq(self.0.as_ptr(), Rc::as_ptr(&bank.profile))
    }
}

impl fmt::Debug for BankRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BankRef").field(&self.name()).finish()
    }
}

/// A named bank holding registered accounts.
///
/// Accounts are kept in insertion order and never deduplicated. Registration
/// and transfer are independent: [`Bank::transfer`] works on any two
/// accounts, registered here or not.
#[derive(Debug, Default)]
pub struct Bank {
    profile: Rc<BankProfile>,
    accounts: Vec<Account>,
}

impl Bank {
    /// Empty bank with an empty name.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        let mut bank = Self::new();
        bank.set_name(name);
        bank
    }

    pub fn name(&self) -> String {
        self.profile.name.borrow().clone()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        *self.profile.name.borrow_mut() = name.into();
    }

    /// Register an account: it is appended to the list and linked back to
    /// this bank.
    pub fn add_account(&mut self, mut account: Account) -> AccountId {
        account.link(BankRef(Rc::downgrade(&self.profile)));
        let id = AccountId(self.accounts.len());
        info!(bank = %self.name(), owner = account.owner(), %id, "account registered");
        self.accounts.push(account);
        id
    }

    /// Registered accounts in registration order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(id.0)
    }

    pub fn account_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.get_mut(id.0)
    }

    /// First registered account owned by `owner`.
    pub fn find_by_owner(&self, owner: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.owner() == owner)
    }

    /// Id of the first registered account owned by `owner`.
    pub fn position_of(&self, owner: &str) -> Option<AccountId> {
        self.accounts
            .iter()
            .position(|account| account.owner() == owner)
            .map(AccountId)
    }

    pub fn contains_owner(&self, owner: &str) -> bool {
        self.accounts.iter().any(|account| account.owner() == owner)
    }

    /// Sum of all registered balances.
    pub fn total_balance(&self) -> CoreResult<Decimal> {
        self.accounts.iter().try_fold(Decimal::ZERO, |total, account| {
            total
                .checked_add(account.balance())
                .ok_or_else(|| CoreError::overflow(total, account.balance()))
        })
    }

    /// Move `amount` from `from` to `to`.
    ///
    /// # Errors
    /// [`CoreError::InsufficientFunds`] when `from` cannot cover the amount;
    /// neither account changes in that case.
    pub fn transfer(
        &self,
        from: &mut Account,
        to: &mut Account,
        amount: Decimal,
    ) -> CoreResult<()> {
        transfer_funds(from, to, amount)?;
        info!(
            bank = %self.name(),
            from = from.owner(),
            to = to.owner(),
            %amount,
            "transfer completed"
        );
        Ok(())
    }

    /// Same as [`Bank::transfer`], for two accounts registered with this bank.
    ///
    /// Both ids are checked before anything moves. When `from == to` the
    /// debit and the credit hit the same account.
    pub fn transfer_between(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> CoreResult<()> {
        for id in [from, to] {
            if id.0 >= self.accounts.len() {
                return Err(CoreError::AccountNotFound(id));
            }
        }

        if from == to {
            let account = &mut self.accounts[from.0];
            account.debit(amount)?;
            account.credit(amount)?;
        } else {
            let (source, target) = pair_mut(&mut self.accounts, from.0, to.0);
            transfer_funds(source, target, amount)?;
        }

        info!(bank = %self.name(), %from, %to, %amount, "transfer completed");
        Ok(())
    }
}

/// Debit `from`, then credit `to`.
///
/// Usable without a bank; [`Bank::transfer`] goes through here. A source that
/// cannot cover the amount is refused with [`CoreError::InsufficientFunds`]
/// before the target is looked at.
pub fn transfer_funds(from: &mut Account, to: &mut Account, amount: Decimal) -> CoreResult<()> {
    // the credit must not be able to fail once the debit has landed
    if from.can_debit(amount) {
        to.balance_after_credit(amount)?;
    }
    from.debit(amount)?;
    to.credit(amount)
}

/// Two distinct mutable elements of a slice. Indices must be in bounds and
/// different.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
