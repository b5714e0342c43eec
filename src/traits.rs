//! Storage abstraction for the ledger engine
//!
//! The engine works against any backend (PostgreSQL, MySQL, a document
//! store, in-memory) that can implement these methods. The contract that
//! matters is atomicity: a voucher record and its ledger rows are written
//! and removed as one unit, so the double-entry invariants can never be
//! observed half-applied.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::*;

/// Storage abstraction for accounts, vouchers, and ledger rows.
///
/// Entry queries must return rows sorted ascending by `(date, seq)`;
/// `seq` is a monotonic insertion sequence the backend assigns inside
/// `commit_voucher`, never derived from wall-clock time.
#[async_trait]
pub trait LedgerStorage: Send + Sync {
    /// Save an account. The registry is responsible for uniqueness checks;
    /// storage treats this as an upsert by id.
    async fn save_account(&mut self, account: &Account) -> LedgerResult<()>;

    /// Get an account by id
    async fn get_account(&self, account_id: &str) -> LedgerResult<Option<Account>>;

    /// Get an account by its business code
    async fn get_account_by_code(&self, code: &str) -> LedgerResult<Option<Account>>;

    /// List all accounts, optionally filtered by type
    async fn list_accounts(&self, account_type: Option<AccountType>) -> LedgerResult<Vec<Account>>;

    /// Commit a voucher together with its ledger rows as a single atomic
    /// unit: either the voucher record and every row are written, or
    /// nothing is. Assigns the voucher's document number (when still 0)
    /// from a storage-backed per-kind sequence and each row's `seq`, id,
    /// and timestamps. Returns the stored voucher and rows.
    ///
    /// Also used to confirm a draft note: the updated voucher record and
    /// its freshly built rows commit in the same unit. A backend that
    /// retries on storage failure must retry the whole unit, never
    /// individual rows.
    async fn commit_voucher(
        &mut self,
        voucher: &Voucher,
        drafts: &[EntryDraft],
    ) -> LedgerResult<(Voucher, Vec<LedgerEntry>)>;

    /// Write a voucher record alone, without touching ledger rows. Used
    /// for draft notes (which have no rows yet) and cheque status
    /// transitions. Assigns the document number when still 0.
    async fn save_voucher(&mut self, voucher: &Voucher) -> LedgerResult<Voucher>;

    /// Remove a voucher and exactly the ledger rows tagged with
    /// `(voucher_id, kind)`, atomically. Idempotent: removing a voucher
    /// that does not exist is not an error.
    async fn remove_voucher(&mut self, voucher_id: &str, kind: VoucherKind) -> LedgerResult<()>;

    /// Get a voucher by id
    async fn get_voucher(&self, voucher_id: &str) -> LedgerResult<Option<Voucher>>;

    /// List vouchers, optionally filtered by kind and business-date range,
    /// sorted ascending by `(date, creation order)`
    async fn list_vouchers(
        &self,
        kind: Option<VoucherKind>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<Vec<Voucher>>;

    /// Ledger rows for one account within an inclusive date range,
    /// sorted ascending by `(date, seq)`
    async fn entries_for_account(
        &self,
        account_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<Vec<LedgerEntry>>;

    /// All ledger rows within an inclusive date range, sorted ascending
    /// by `(date, seq)`
    async fn entries_in_range(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<Vec<LedgerEntry>>;

    /// Ledger rows owned by one voucher
    async fn entries_for_voucher(
        &self,
        voucher_id: &str,
        kind: VoucherKind,
    ) -> LedgerResult<Vec<LedgerEntry>>;
}
