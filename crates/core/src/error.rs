//! # Error Module
//!
//! Domain errors for accounts and banks, built with thiserror.

use crate::bank::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Core domain errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A debit asked for more than the account holds. The message is fixed.
    #[error("Dinero insuficiente")]
    InsufficientFunds { needed: Decimal, available: Decimal },

    #[error("Amount overflow: cannot apply {amount} to {balance}")]
    Overflow { balance: Decimal, amount: Decimal },

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),
}

/// Result type alias with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create insufficient funds error
    pub fn insufficient_funds(needed: Decimal, available: Decimal) -> Self {
        Self::InsufficientFunds { needed, available }
    }

    /// Create overflow error
    pub fn overflow(balance: Decimal, amount: Decimal) -> Self {
        Self::Overflow { balance, amount }
    }

    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, CoreError::InsufficientFunds { .. })
    }

    /// How much was missing to cover the rejected debit.
    pub fn shortfall(&self) -> Option<Decimal> {
        match self {
            CoreError::InsufficientFunds { needed, available } => needed.checked_sub(*available),
            _ => None,
        }
    }
}
