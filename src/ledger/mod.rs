//! Ledger module: chart of accounts, the append-only store, voucher
//! posting rules, and the orchestrating facade

pub mod account;
pub mod core;
pub mod store;
pub mod voucher;

pub use self::account::*;
pub use self::core::*;
pub use self::store::*;
pub use self::voucher::*;
