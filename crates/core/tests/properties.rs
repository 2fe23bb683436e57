//! Property tests for the balance laws of Account and Bank.

use banco_core::{transfer_funds, Account};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Non-negative decimals with up to 8 fractional digits.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000_000, 0u32..=8).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

proptest! {
    #[test]
    fn debit_within_balance_is_exact(balance in amount(), cut in amount()) {
        prop_assume!(cut <= balance);
        let mut account = Account::new("Rocio", balance);

        account.debit(cut).unwrap();
        prop_assert_eq!(account.balance(), balance - cut);
        prop_assert!(account.balance() >= Decimal::ZERO);
    }

    #[test]
    fn debit_over_balance_changes_nothing(balance in amount(), extra in amount()) {
        prop_assume!(!extra.is_zero());
        let mut account = Account::new("Rocio", balance);

        let err = account.debit(balance + extra).unwrap_err();
        prop_assert!(err.is_insufficient_funds());
        prop_assert_eq!(err.to_string(), "Dinero insuficiente");
        prop_assert_eq!(account.balance(), balance);
    }

    #[test]
    fn credit_adds_exactly(balance in amount(), add in amount()) {
        let mut account = Account::new("Rocio", balance);
        account.credit(add).unwrap();
        prop_assert_eq!(account.balance(), balance + add);
    }

    #[test]
    fn debit_then_credit_round_trips(balance in amount(), cut in amount()) {
        prop_assume!(cut <= balance);
        let mut account = Account::new("Rocio", balance);

        account.debit(cut).unwrap();
        account.credit(cut).unwrap();
        prop_assert_eq!(account.balance(), balance);
    }

    #[test]
    fn transfer_conserves_total(a in amount(), b in amount(), moved in amount()) {
        let mut from = Account::new("Dafne", a);
        let mut to = Account::new("Rocio", b);

        let result = transfer_funds(&mut from, &mut to, moved);
        prop_assert_eq!(from.balance() + to.balance(), a + b);
        if moved <= a {
            prop_assert!(result.is_ok());
            prop_assert_eq!(to.balance(), b + moved);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(from.balance(), a);
            prop_assert_eq!(to.balance(), b);
        }
    }
}
