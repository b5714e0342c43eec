//! # Retail Ledger
//!
//! The double-entry accounting ledger and financial reporting engine of a
//! retail/warehouse operations platform.
//!
//! ## Features
//!
//! - **Double-entry bookkeeping**: every voucher posts a balanced set of
//!   immutable ledger rows, validated before anything is written
//! - **Six voucher kinds**: payments, receipts, free-form journals,
//!   two-phase credit/debit notes, and bank transfers behind one tagged
//!   voucher type
//! - **On-demand reporting**: trial balance, balance sheet, profit & loss,
//!   day book, cash flow, ageing, and statements of account, always
//!   recomputed from the raw rows
//! - **Bank reconciliation**: post-dated cheque listing with explicit
//!   clearing
//! - **Storage abstraction**: database-agnostic design with trait-based
//!   storage and atomic voucher-plus-rows commits
//!
//! ## Quick Start
//!
//! ```rust
//! use retail_ledger::{Ledger, MemoryStorage, NewAccount, AccountType};
//!
//! # async fn demo() -> retail_ledger::LedgerResult<()> {
//! let mut ledger = Ledger::new(MemoryStorage::new());
//! let cash = ledger
//!     .create_account(NewAccount::new("1001", "Bank Cash", AccountType::Asset))
//!     .await?;
//! # let _ = cash;
//! # Ok(())
//! # }
//! ```

pub mod ledger;
pub mod reconciliation;
pub mod reports;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use ledger::*;
pub use reconciliation::*;
pub use reports::*;
pub use traits::*;
pub use types::*;
pub use utils::memory_storage::MemoryStorage;
