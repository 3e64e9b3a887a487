//! An in-memory personal finance ledger.
//!
//! Account holders own an ordered list of income/outcome transactions; the
//! ledger enforces identity and uniqueness rules and computes balances.

pub mod engine;

pub use engine::*;
