//! Core types and data structures for the ledger engine

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Account types following standard accounting principles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Assets - what the business owns (Cash, Inventory, Receivables, etc.)
    Asset,
    /// Liabilities - what the business owes (Loans, Accounts Payable, etc.)
    Liability,
    /// Equity - owner's interest in the business (Capital, Retained Earnings, etc.)
    Equity,
    /// Income/Revenue - money earned by the business
    Income,
    /// Expenses - costs incurred by the business
    Expense,
}

impl AccountType {
    /// Returns the normal balance side for this account type.
    /// Assets and Expenses normally carry debit balances;
    /// Liabilities, Equity, and Income normally carry credit balances.
    pub fn normal_balance(&self) -> EntryType {
        match self {
            AccountType::Asset | AccountType::Expense => EntryType::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Income => EntryType::Credit,
        }
    }
}

/// The two sides of double-entry bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    /// Debit - increases Assets and Expenses, decreases the rest
    Debit,
    /// Credit - increases Liabilities, Equity, and Income, decreases the rest
    Credit,
}

/// An account in the chart of accounts.
///
/// Balances are never stored on the account; every balance is recomputed
/// from the ledger rows that reference it, so concurrent postings cannot
/// produce a lost update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: String,
    /// Unique, never-reused business code (e.g. "1001")
    pub code: String,
    /// Human-readable account name
    pub name: String,
    /// Type of account (Asset, Liability, etc.)
    pub account_type: AccountType,
    /// Finer-grained grouping within the type (e.g. "Current Asset")
    pub sub_type: Option<String>,
    /// Free-form classification label used by report consumers
    pub classification: Option<String>,
    /// When the account was created
    pub created_at: NaiveDateTime,
    /// When the account was last updated
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// Create a new account with a generated id
    pub fn new(code: String, name: String, account_type: AccountType) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            code,
            name,
            account_type,
            sub_type: None,
            classification: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields for registering a new account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub sub_type: Option<String>,
    pub classification: Option<String>,
}

impl NewAccount {
    pub fn new(code: impl Into<String>, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            account_type,
            sub_type: None,
            classification: None,
        }
    }
}

/// The six kinds of voucher that can produce ledger rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoucherKind {
    Payment,
    Receipt,
    Journal,
    CreditNote,
    DebitNote,
    Transfer,
}

impl std::fmt::Display for VoucherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VoucherKind::Payment => "payment",
            VoucherKind::Receipt => "receipt",
            VoucherKind::Journal => "journal",
            VoucherKind::CreditNote => "credit-note",
            VoucherKind::DebitNote => "debit-note",
            VoucherKind::Transfer => "transfer",
        };
        f.write_str(name)
    }
}

/// One immutable row in the append-only ledger.
///
/// Exactly one of `debit`/`credit` is normally nonzero. Rows are created
/// only through voucher posting and deleted only as a unit with their
/// owning voucher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier for the row
    pub id: String,
    /// Monotonic insertion sequence assigned at commit time; the tie-break
    /// for same-date ordering, never derived from wall-clock
    pub seq: u64,
    /// Business date of the row
    pub date: NaiveDate,
    /// Account being affected
    pub account_id: String,
    /// Debit amount (>= 0)
    pub debit: BigDecimal,
    /// Credit amount (>= 0)
    pub credit: BigDecimal,
    /// Row narration
    pub narration: String,
    /// Owning voucher id
    pub voucher_id: String,
    /// Owning voucher kind
    pub voucher_kind: VoucherKind,
    /// Who posted the owning voucher
    pub created_by: String,
    /// When the row was committed
    pub created_at: NaiveDateTime,
}

impl LedgerEntry {
    /// Net effect of the row, debit minus credit
    pub fn signed_amount(&self) -> BigDecimal {
        &self.debit - &self.credit
    }
}

/// A ledger row waiting to be committed as part of a voucher post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub account_id: String,
    pub debit: BigDecimal,
    pub credit: BigDecimal,
    pub narration: String,
}

impl EntryDraft {
    /// Create a debit draft
    pub fn debit(
        account_id: impl Into<String>,
        amount: BigDecimal,
        narration: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            debit: amount,
            credit: BigDecimal::from(0),
            narration: narration.into(),
        }
    }

    /// Create a credit draft
    pub fn credit(
        account_id: impl Into<String>,
        amount: BigDecimal,
        narration: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            debit: BigDecimal::from(0),
            credit: amount,
            narration: narration.into(),
        }
    }
}

/// Opaque reference to a row in the external bank master
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRef {
    /// Bank identifier in the external master
    pub id: String,
    /// Display name, used as the cash-flow category key
    pub name: String,
    /// The GL account this bank posts against
    pub gl_account_id: String,
}

/// Whether a partner is a customer or a vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartnerType {
    Customer,
    Vendor,
}

/// Opaque partner reference; used only as a grouping key, no partner
/// master is owned by this crate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerRef {
    pub name: String,
    pub kind: PartnerType,
}

impl PartnerRef {
    pub fn customer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PartnerType::Customer,
        }
    }

    pub fn vendor(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PartnerType::Vendor,
        }
    }
}

/// Clearing state of a cheque
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChequeStatus {
    Pending,
    Cleared,
}

/// Cheque metadata carried by payments and receipts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cheque {
    pub number: String,
    /// Cheque date; may be post-dated
    pub date: NaiveDate,
    pub status: ChequeStatus,
    pub cleared_date: Option<NaiveDate>,
}

impl Cheque {
    pub fn pending(number: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            date,
            status: ChequeStatus::Pending,
            cleared_date: None,
        }
    }
}

/// Lifecycle state of a credit/debit note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteStatus {
    /// Created but not yet posted to the ledger
    Draft,
    /// Posted; terminal state
    Confirmed,
}

/// VAT component of a note, posted as its own ledger line so the tax
/// stays traceable to its account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatSplit {
    pub account_id: String,
    pub amount: BigDecimal,
}

/// Payment voucher fields: money going out to a party through a bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetail {
    pub party_account_id: String,
    pub partner: PartnerRef,
    pub bank: BankRef,
    pub amount: BigDecimal,
    pub cheque: Option<Cheque>,
}

/// Receipt voucher fields: money coming in from a source account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptDetail {
    pub from_account_id: String,
    pub partner: PartnerRef,
    pub bank: BankRef,
    pub amount: BigDecimal,
    pub cheque: Option<Cheque>,
}

/// One free-form line of a journal voucher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalLine {
    pub account_id: String,
    pub debit: BigDecimal,
    pub credit: BigDecimal,
    /// Partner the line belongs to, for statement-of-account grouping
    pub partner: Option<String>,
    pub narration: Option<String>,
}

impl JournalLine {
    pub fn debit(account_id: impl Into<String>, amount: BigDecimal) -> Self {
        Self {
            account_id: account_id.into(),
            debit: amount,
            credit: BigDecimal::from(0),
            partner: None,
            narration: None,
        }
    }

    pub fn credit(account_id: impl Into<String>, amount: BigDecimal) -> Self {
        Self {
            account_id: account_id.into(),
            debit: BigDecimal::from(0),
            credit: amount,
            partner: None,
            narration: None,
        }
    }

    pub fn for_partner(mut self, partner: impl Into<String>) -> Self {
        self.partner = Some(partner.into());
        self
    }
}

/// Journal voucher fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalDetail {
    pub lines: Vec<JournalLine>,
}

/// Credit/debit note fields. Notes start in `Draft` and only post to the
/// ledger on confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDetail {
    /// The receivable/payable account of the party
    pub party_account_id: String,
    /// The returns/adjustment account the note value posts against
    pub contra_account_id: String,
    pub partner: PartnerRef,
    pub amount: BigDecimal,
    pub vat: Option<VatSplit>,
    pub status: NoteStatus,
}

/// Bank transfer voucher fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferDetail {
    pub from_bank: BankRef,
    pub to_bank: BankRef,
    pub amount: BigDecimal,
}

/// Kind-specific fields of a voucher, dispatched through a single tagged
/// union rather than parallel per-kind code paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VoucherDetail {
    Payment(PaymentDetail),
    Receipt(ReceiptDetail),
    Journal(JournalDetail),
    CreditNote(NoteDetail),
    DebitNote(NoteDetail),
    Transfer(TransferDetail),
}

/// A business event that, when posted, produces a balanced set of ledger
/// rows tagged with this voucher's `(id, kind)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    /// Unique identifier
    pub id: String,
    /// Per-kind document number, assigned at commit time from a
    /// storage-backed sequence (0 until assigned)
    pub number: u64,
    /// Business date
    pub date: NaiveDate,
    /// Voucher narration
    pub narration: String,
    /// Who created the voucher
    pub created_by: String,
    /// When the voucher was created
    pub created_at: NaiveDateTime,
    /// Kind-specific fields
    pub detail: VoucherDetail,
}

impl Voucher {
    /// Create a new unposted voucher with a generated id
    pub fn new(
        date: NaiveDate,
        narration: impl Into<String>,
        created_by: impl Into<String>,
        detail: VoucherDetail,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            number: 0,
            date,
            narration: narration.into(),
            created_by: created_by.into(),
            created_at: chrono::Utc::now().naive_utc(),
            detail,
        }
    }

    pub fn payment(
        date: NaiveDate,
        narration: impl Into<String>,
        created_by: impl Into<String>,
        detail: PaymentDetail,
    ) -> Self {
        Self::new(date, narration, created_by, VoucherDetail::Payment(detail))
    }

    pub fn receipt(
        date: NaiveDate,
        narration: impl Into<String>,
        created_by: impl Into<String>,
        detail: ReceiptDetail,
    ) -> Self {
        Self::new(date, narration, created_by, VoucherDetail::Receipt(detail))
    }

    pub fn journal(
        date: NaiveDate,
        narration: impl Into<String>,
        created_by: impl Into<String>,
        lines: Vec<JournalLine>,
    ) -> Self {
        Self::new(
            date,
            narration,
            created_by,
            VoucherDetail::Journal(JournalDetail { lines }),
        )
    }

    pub fn credit_note(
        date: NaiveDate,
        narration: impl Into<String>,
        created_by: impl Into<String>,
        detail: NoteDetail,
    ) -> Self {
        Self::new(date, narration, created_by, VoucherDetail::CreditNote(detail))
    }

    pub fn debit_note(
        date: NaiveDate,
        narration: impl Into<String>,
        created_by: impl Into<String>,
        detail: NoteDetail,
    ) -> Self {
        Self::new(date, narration, created_by, VoucherDetail::DebitNote(detail))
    }

    pub fn transfer(
        date: NaiveDate,
        narration: impl Into<String>,
        created_by: impl Into<String>,
        detail: TransferDetail,
    ) -> Self {
        Self::new(date, narration, created_by, VoucherDetail::Transfer(detail))
    }

    /// The voucher's kind tag
    pub fn kind(&self) -> VoucherKind {
        match &self.detail {
            VoucherDetail::Payment(_) => VoucherKind::Payment,
            VoucherDetail::Receipt(_) => VoucherKind::Receipt,
            VoucherDetail::Journal(_) => VoucherKind::Journal,
            VoucherDetail::CreditNote(_) => VoucherKind::CreditNote,
            VoucherDetail::DebitNote(_) => VoucherKind::DebitNote,
            VoucherDetail::Transfer(_) => VoucherKind::Transfer,
        }
    }

    /// Cheque metadata, when the voucher carries one
    pub fn cheque(&self) -> Option<&Cheque> {
        match &self.detail {
            VoucherDetail::Payment(p) => p.cheque.as_ref(),
            VoucherDetail::Receipt(r) => r.cheque.as_ref(),
            _ => None,
        }
    }

    /// Partner the voucher is tied to, when any
    pub fn partner(&self) -> Option<&PartnerRef> {
        match &self.detail {
            VoucherDetail::Payment(p) => Some(&p.partner),
            VoucherDetail::Receipt(r) => Some(&r.partner),
            VoucherDetail::CreditNote(n) | VoucherDetail::DebitNote(n) => Some(&n.partner),
            _ => None,
        }
    }
}

/// Errors that can occur in the ledger system
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Voucher is not balanced: debits = {debits}, credits = {credits}")]
    ImbalancedVoucher {
        debits: BigDecimal,
        credits: BigDecimal,
    },
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(BigDecimal),
    #[error("Account code already exists: {0}")]
    DuplicateAccountCode(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Voucher not found: {0}")]
    VoucherNotFound(String),
    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },
    #[error("Note already confirmed: {0}")]
    AlreadyConfirmed(String),
    #[error("Transfer must be between two different banks")]
    InvalidTransfer,
    #[error("Report cancelled before completion")]
    Cancelled,
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
