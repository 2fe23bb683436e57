//! Scenario errors

use banco_core::CoreError;
use thiserror::Error;

/// Errors that stop a scenario from loading or running.
///
/// A debit refused for insufficient funds is not one of them: the runner
/// records it in the report and carries on.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Scenario parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Scenario IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown account in scenario: {0}")]
    UnknownAccount(String),

    #[error("Duplicate account in scenario: {0}")]
    DuplicateAccount(String),

    #[error("Account registered twice: {0}")]
    AlreadyRegistered(String),
}

/// Result type alias for scenario operations
pub type ScenarioResult<T> = Result<T, ScenarioError>;

impl ScenarioError {
    pub fn unknown_account(owner: &str) -> Self {
        Self::UnknownAccount(owner.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_core_error_wrapped() {
        let err: ScenarioError = CoreError::insufficient_funds(dec!(2), dec!(1)).into();
        assert_eq!(err.to_string(), "Core error: Dinero insuficiente");
    }

    #[test]
    fn test_unknown_account() {
        let err = ScenarioError::unknown_account("Nadie");
        assert!(err.to_string().contains("Nadie"));
    }
}
