//! # Banco Scenario
//!
//! Describe a bank session as data (accounts, which of them are
//! registered, then a list of debits, credits, transfers and renames) and
//! replay it against `banco-core`.
//!
//! ## Example
//!
//! ```
//! use banco_scenario::{ScenarioBuilder, ScenarioRunner};
//! use rust_decimal_macros::dec;
//!
//! let scenario = ScenarioBuilder::new()
//!     .account("Rocio", dec!(2500))
//!     .account("Dafne", dec!(1500.8989))
//!     .register("Rocio")
//!     .register("Dafne")
//!     .rename("BNA")
//!     .transfer("Dafne", "Rocio", dec!(500))
//!     .build();
//!
//! let report = ScenarioRunner::run(&scenario).unwrap();
//! assert_eq!(report.balance_of("Dafne"), Some(dec!(1000.8989)));
//! assert_eq!(report.balance_of("Rocio"), Some(dec!(3000)));
//! ```

pub mod error;
pub mod report;
pub mod runner;
pub mod scenario;

pub use error::{ScenarioError, ScenarioResult};
pub use report::{ScenarioReport, StepOutcome, StepReport};
pub use runner::ScenarioRunner;
pub use scenario::{AccountSpec, Scenario, ScenarioBuilder, Step};
