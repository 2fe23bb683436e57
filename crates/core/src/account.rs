//! # Account Module
//!
//! An Account holds an owner and an exact decimal balance. The balance only
//! changes through [`Account::debit`] and [`Account::credit`], and a debit
//! that would take it below zero is rejected before anything is touched.

use crate::bank::BankRef;
use crate::error::{CoreError, CoreResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::{debug, warn};

/// A single owner's account.
///
/// Equality and hashing look at `(owner, balance)` only: two separately built
/// accounts with the same owner and the same amount are equal, whichever bank
/// (if any) they are registered with. Decimal comparison is numeric, so
/// `1000.741` and `1000.7410` are the same balance.
///
/// # Examples
/// ```
/// use banco_core::Account;
/// use rust_decimal_macros::dec;
///
/// let mut account = Account::new("Rocio", dec!(1000.12345));
/// account.debit(dec!(100)).unwrap();
/// assert_eq!(account.balance().to_string(), "900.12345");
///
/// let err = account.debit(dec!(1500)).unwrap_err();
/// assert_eq!(err.to_string(), "Dinero insuficiente");
/// assert_eq!(account.balance(), dec!(900.12345));
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct Account {
    owner: String,
    balance: Decimal,
    /// Set when the account is registered with a bank
    #[serde(skip)]
    bank: Option<BankRef>,
}

impl Account {
    /// Create an account. The initial balance is taken as given, negative
    /// values included.
    pub fn new(owner: impl Into<String>, balance: Decimal) -> Self {
        Self {
            owner: owner.into(),
            balance,
            bank: None,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Current balance, with the scale it was built with.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// The bank this account was registered with, if any.
    pub fn bank(&self) -> Option<&BankRef> {
        self.bank.as_ref()
    }

    pub(crate) fn link(&mut self, bank: BankRef) {
        self.bank = Some(bank);
    }

    /// Whether `debit(amount)` would succeed right now.
    pub fn can_debit(&self, amount: Decimal) -> bool {
        matches!(self.balance.checked_sub(amount), Some(rest) if rest >= Decimal::ZERO)
    }

    /// Take `amount` out of the account.
    ///
    /// # Errors
    /// - [`CoreError::InsufficientFunds`] if the balance would go below zero.
    ///   The balance is left untouched.
    /// - [`CoreError::Overflow`] if the result does not fit in a Decimal.
    pub fn debit(&mut self, amount: Decimal) -> CoreResult<()> {
        let rest = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| CoreError::overflow(self.balance, amount))?;

        if rest < Decimal::ZERO {
            warn!(
                owner = %self.owner,
                %amount,
                balance = %self.balance,
                "debit rejected: insufficient funds"
            );
            return Err(CoreError::insufficient_funds(amount, self.balance));
        }

        self.balance = rest;
        debug!(owner = %self.owner, %amount, balance = %self.balance, "debit applied");
        Ok(())
    }

    /// Add `amount` to the account. There is no upper bound other than the
    /// Decimal range.
    pub fn credit(&mut self, amount: Decimal) -> CoreResult<()> {
        self.balance = self.balance_after_credit(amount)?;
        debug!(owner = %self.owner, %amount, balance = %self.balance, "credit applied");
        Ok(())
    }

    /// Balance a credit of `amount` would produce, without applying it.
    pub(crate) fn balance_after_credit(&self, amount: Decimal) -> CoreResult<Decimal> {
        self.balance
            .checked_add(amount)
            .ok_or_else(|| CoreError::overflow(self.balance, amount))
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.balance == other.balance
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        // Decimal hashes its normalized form, matching its numeric Eq
        self.balance.hash(state);
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("owner", &self.owner)
            .field("balance", &self.balance)
            .field("bank", &self.bank.as_ref().and_then(BankRef::name))
            .finish()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.owner, self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;
    use std::collections::HashSet;

    #[fixture]
    fn account() -> Account {
        Account::new("Rocio", dec!(1000.12345))
    }

    #[rstest]
    fn test_owner(account: Account) {
        assert_eq!(account.owner(), "Rocio");
        assert!(account.bank().is_none());
    }

    #[rstest]
    fn test_balance_keeps_scale(account: Account) {
        assert_eq!(account.balance(), dec!(1000.12345));
        assert_eq!(account.balance().scale(), 5);
        assert!(account.balance() > Decimal::ZERO);
    }

    #[rstest]
    fn test_debit(mut account: Account) {
        account.debit(dec!(100)).unwrap();
        assert_eq!(account.balance().trunc(), dec!(900));
        assert_eq!(account.balance().to_string(), "900.12345");
    }

    #[rstest]
    fn test_credit(mut account: Account) {
        account.credit(dec!(100)).unwrap();
        assert_eq!(account.balance().trunc(), dec!(1100));
        assert_eq!(account.balance().to_string(), "1100.12345");
    }

    #[rstest]
    fn test_debit_insufficient_funds(mut account: Account) {
        let err = account.debit(dec!(1500)).unwrap_err();

        assert_eq!(err.to_string(), "Dinero insuficiente");
        assert_eq!(
            err,
            CoreError::InsufficientFunds {
                needed: dec!(1500),
                available: dec!(1000.12345),
            }
        );
        assert_eq!(account.balance(), dec!(1000.12345));
    }

    #[rstest]
    #[case::hundred(dec!(100))]
    #[case::two_hundred(dec!(200))]
    #[case::three_hundred(dec!(300))]
    #[case::thousand(dec!(1000))]
    fn test_debit_leaves_positive_balance(mut account: Account, #[case] amount: Decimal) {
        account.debit(amount).unwrap();
        assert!(account.balance() > Decimal::ZERO);
        assert_eq!(account.balance(), dec!(1000.12345) - amount);
    }

    #[rstest]
    fn test_debit_whole_balance(mut account: Account) {
        account.debit(dec!(1000.12345)).unwrap();
        assert!(account.balance().is_zero());
        assert!(!account.can_debit(dec!(0.00001)));
    }

    #[rstest]
    fn test_repeated_debits_compound(mut account: Account) {
        for _ in 0..5 {
            account.debit(dec!(100)).unwrap();
        }
        assert_eq!(account.balance().to_string(), "500.12345");
    }

    #[rstest]
    fn test_debit_then_credit_restores_balance(mut account: Account) {
        account.debit(dec!(250.5)).unwrap();
        account.credit(dec!(250.5)).unwrap();
        assert_eq!(account.balance(), dec!(1000.12345));
    }

    #[rstest]
    fn test_can_debit(account: Account) {
        assert!(account.can_debit(dec!(1000.12345)));
        assert!(!account.can_debit(dec!(1000.12346)));
    }

    #[test]
    fn test_negative_initial_balance_is_accepted() {
        let mut account = Account::new("Deudor", dec!(-10));
        assert_eq!(account.balance(), dec!(-10));
        assert!(account.debit(dec!(0)).unwrap_err().is_insufficient_funds());

        account.credit(dec!(15)).unwrap();
        assert_eq!(account.balance(), dec!(5));
    }

    #[rstest]
    #[case::negative_debit_adds(dec!(10), dec!(-5), dec!(15))]
    #[case::negative_debit_from_zero(dec!(0), dec!(-0.5), dec!(0.5))]
    fn test_negative_debit_acts_as_credit(
        #[case] start: Decimal,
        #[case] amount: Decimal,
        #[case] expected: Decimal,
    ) {
        let mut account = Account::new("Rocio", start);
        account.debit(amount).unwrap();
        assert_eq!(account.balance(), expected);
    }

    #[rstest]
    #[case::below_zero(dec!(15), dec!(-20), dec!(-5))]
    #[case::to_zero(dec!(15), dec!(-15), dec!(0))]
    fn test_negative_credit_acts_as_debit(
        #[case] start: Decimal,
        #[case] amount: Decimal,
        #[case] expected: Decimal,
    ) {
        let mut account = Account::new("Rocio", start);
        assert!(account.credit(amount).is_ok());
        assert_eq!(account.balance(), expected);
    }

    #[test]
    fn test_negative_amounts_in_sequence() {
        let mut account = Account::new("Rocio", dec!(10));
        account.debit(dec!(-5)).unwrap();
        assert_eq!(account.balance(), dec!(15));

        account.credit(dec!(-20)).unwrap();
        assert_eq!(account.balance(), dec!(-5));

        // a balance driven below zero still refuses ordinary debits
        assert!(account.debit(dec!(1)).unwrap_err().is_insufficient_funds());
        assert_eq!(account.balance(), dec!(-5));
    }

    #[test]
    fn test_credit_overflow_is_reported() {
        let mut account = Account::new("Max", Decimal::MAX);
        let err = account.credit(dec!(1)).unwrap_err();
        assert!(matches!(err, CoreError::Overflow { .. }));
        assert_eq!(account.balance(), Decimal::MAX);
    }

    #[test]
    fn test_equality_by_value() {
        let a = Account::new("Dafne", dec!(1000.741));
        let b = Account::new("Dafne", dec!(1000.741));
        assert_eq!(a, b);

        // numeric comparison ignores trailing zeros
        assert_eq!(a, Account::new("Dafne", dec!(1000.7410)));

        assert_ne!(a, Account::new("Rocio", dec!(1000.741)));
        assert_ne!(a, Account::new("Dafne", dec!(1000.74)));
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        let mut set = HashSet::new();
        set.insert(Account::new("Dafne", dec!(1000.741)));
        set.insert(Account::new("Dafne", dec!(1000.7410)));
        set.insert(Account::new("Rocio", dec!(1000.741)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display() {
        let account = Account::new("Dafne", dec!(1500.8989));
        assert_eq!(account.to_string(), "Dafne: 1500.8989");
    }

    #[test]
    fn test_serde_skips_bank_link() {
        let account = Account::new("Rocio", dec!(1000.12345));
        let json = serde_json::to_string(&account).unwrap();
        assert_eq!(json, r#"{"owner":"Rocio","balance":"1000.12345"}"#);

        let back: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(back, account);
        assert!(back.bank().is_none());
    }
}
