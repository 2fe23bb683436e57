//! # Banco Core
//!
//! Domain model for a tiny bank: [`Account`] keeps an owner and an exact
//! decimal balance, [`Bank`] keeps a name plus the accounts registered with it
//! and moves money between accounts.
//!
//! ## Example
//!
//! ```
//! use banco_core::{Account, Bank};
//! use rust_decimal_macros::dec;
//!
//! let mut rocio = Account::new("Rocio", dec!(2500));
//! let mut dafne = Account::new("Dafne", dec!(1500.8989));
//!
//! let bank = Bank::named("BNA");
//! bank.transfer(&mut dafne, &mut rocio, dec!(500)).unwrap();
//!
//! assert_eq!(dafne.balance().to_string(), "1000.8989");
//! assert_eq!(rocio.balance().to_string(), "3000");
//! ```
//!
//! Both types are single-threaded: the account-to-bank link is `Rc`-based,
//! so neither `Account` nor `Bank` is `Send`. Callers that need concurrent
//! access must serialize it per account themselves.

pub mod account;
pub mod bank;
pub mod error;

pub use account::Account;
pub use bank::{transfer_funds, AccountId, Bank, BankRef};
pub use error::{CoreError, CoreResult};
