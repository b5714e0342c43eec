//! Main ledger orchestrator that coordinates accounts, vouchers, and
//! reports

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::ledger::account::AccountRegistry;
use crate::ledger::store::{AccountSummary, LedgerStore};
use crate::ledger::voucher::PostedVoucher;
use crate::reconciliation::{BankReconciliation, PdcEntry};
use crate::reports::{
    AgeingSummary, BalanceSheet, CashFlow, DayBook, ProfitLoss, ReportEngine, SoaReportType,
    StatementOfAccount, TrialBalance,
};
use crate::traits::*;
use crate::types::*;
use crate::utils::validation;

/// The ledger engine: one entry point wiring the chart of accounts, the
/// append-only ledger store, the report engine, and the reconciliation
/// view over a shared storage backend.
pub struct Ledger<S: LedgerStorage> {
    registry: AccountRegistry<S>,
    store: LedgerStore<S>,
    reports: ReportEngine<S>,
    reconciliation: BankReconciliation<S>,
}

impl<S: LedgerStorage + Clone> Ledger<S> {
    /// Create a new ledger over the given storage backend
    pub fn new(storage: S) -> Self {
        Self {
            registry: AccountRegistry::new(storage.clone()),
            store: LedgerStore::new(storage.clone()),
            reports: ReportEngine::new(storage.clone()),
            reconciliation: BankReconciliation::new(storage),
        }
    }

    /// Attach a caller-supplied cancellation token to the report engine
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.reports = self.reports.with_cancellation(token);
        self
    }

    // Account operations

    /// Register a new account
    pub async fn create_account(&mut self, new: NewAccount) -> LedgerResult<Account> {
        self.registry.create(new).await
    }

    /// Get an account by id
    pub async fn get_account(&self, account_id: &str) -> LedgerResult<Option<Account>> {
        self.registry.get(account_id).await
    }

    /// Get an account by its business code
    pub async fn get_account_by_code(&self, code: &str) -> LedgerResult<Option<Account>> {
        self.registry.get_by_code(code).await
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> LedgerResult<Vec<Account>> {
        self.registry.list().await
    }

    /// List accounts of one type
    pub async fn list_accounts_by_type(
        &self,
        account_type: AccountType,
    ) -> LedgerResult<Vec<Account>> {
        self.registry.list_by_type(account_type).await
    }

    /// Seed a starter chart of accounts for a retail/warehouse business
    pub async fn setup_standard_chart_of_accounts(
        &mut self,
    ) -> LedgerResult<HashMap<String, Account>> {
        crate::ledger::account::utils::create_standard_chart(&mut self.registry).await
    }

    // Voucher operations

    /// Validate and post a voucher.
    ///
    /// Credit and debit notes are stored in `Draft` and post no ledger
    /// rows until [`confirm_note`](Self::confirm_note); every other kind
    /// commits its voucher record and balanced rows in one atomic unit.
    /// All validation happens before anything is written.
    pub async fn post_voucher(&mut self, mut voucher: Voucher) -> LedgerResult<PostedVoucher> {
        validation::validate_narration(&voucher.narration)?;
        voucher.detail.validate()?;

        match &mut voucher.detail {
            VoucherDetail::CreditNote(note) | VoucherDetail::DebitNote(note) => {
                // Notes always enter the world as drafts
                note.status = NoteStatus::Draft;
                let stored = self.store.storage.save_voucher(&voucher).await?;
                info!(voucher_id = %stored.id, kind = %stored.kind(), "draft note created");
                Ok(PostedVoucher {
                    voucher: stored,
                    entries: Vec::new(),
                })
            }
            _ => {
                let lines = voucher.posting_lines()?;
                let (stored, entries) = self.store.post(&voucher, &lines).await?;
                info!(
                    voucher_id = %stored.id,
                    kind = %stored.kind(),
                    number = stored.number,
                    "voucher posted"
                );
                Ok(PostedVoucher {
                    voucher: stored,
                    entries,
                })
            }
        }
    }

    /// Confirm a draft credit/debit note, posting its ledger rows.
    ///
    /// `Draft -> Confirmed` is the only transition and it is terminal;
    /// the status flip and the rows commit atomically.
    pub async fn confirm_note(&mut self, voucher_id: &str) -> LedgerResult<PostedVoucher> {
        let mut voucher = self
            .store
            .storage
            .get_voucher(voucher_id)
            .await?
            .ok_or_else(|| LedgerError::VoucherNotFound(voucher_id.to_string()))?;

        match &mut voucher.detail {
            VoucherDetail::CreditNote(note) | VoucherDetail::DebitNote(note) => {
                if note.status == NoteStatus::Confirmed {
                    return Err(LedgerError::AlreadyConfirmed(voucher_id.to_string()));
                }
                note.status = NoteStatus::Confirmed;
            }
            _ => {
                return Err(LedgerError::Validation(format!(
                    "Voucher '{voucher_id}' is not a credit or debit note"
                )));
            }
        }

        let lines = voucher.posting_lines()?;
        let (stored, entries) = self.store.post(&voucher, &lines).await?;
        info!(voucher_id = %stored.id, kind = %stored.kind(), "note confirmed");
        Ok(PostedVoucher {
            voucher: stored,
            entries,
        })
    }

    /// Get a voucher by id
    pub async fn get_voucher(&self, voucher_id: &str) -> LedgerResult<Option<Voucher>> {
        self.store.storage.get_voucher(voucher_id).await
    }

    /// Delete a voucher and exactly the ledger rows it owns.
    ///
    /// This is a hard delete, mirroring the platform's established
    /// contract; no compensating reversal entry is written.
    pub async fn delete_voucher(&mut self, voucher_id: &str, kind: VoucherKind) -> LedgerResult<()> {
        let exists = self
            .store
            .storage
            .get_voucher(voucher_id)
            .await?
            .is_some_and(|v| v.kind() == kind);
        if !exists {
            return Err(LedgerError::VoucherNotFound(voucher_id.to_string()));
        }

        self.store.remove(voucher_id, kind).await?;
        info!(voucher_id = %voucher_id, kind = %kind, "voucher deleted");
        Ok(())
    }

    // Balance and reporting operations

    /// Summarize one account over an inclusive date range
    pub async fn account_summary(
        &self,
        account_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<AccountSummary> {
        self.store.summarize(account_id, from, to).await
    }

    /// Trial balance over a date range
    pub async fn trial_balance(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<TrialBalance> {
        self.reports.trial_balance(from, to).await
    }

    /// Balance sheet over a date range
    pub async fn balance_sheet(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<BalanceSheet> {
        self.reports.balance_sheet(from, to).await
    }

    /// Profit & loss over a date range
    pub async fn profit_loss(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<ProfitLoss> {
        self.reports.profit_loss(from, to).await
    }

    /// Day book for a date range
    pub async fn day_book(&self, from: NaiveDate, to: NaiveDate) -> LedgerResult<DayBook> {
        self.reports.day_book(from, to).await
    }

    /// Cash flow for a date range
    pub async fn cash_flow(&self, from: NaiveDate, to: NaiveDate) -> LedgerResult<CashFlow> {
        self.reports.cash_flow(from, to).await
    }

    /// Ageing summary for one partner type as of a date
    pub async fn ageing_summary(
        &self,
        partner_type: PartnerType,
        as_on_date: NaiveDate,
    ) -> LedgerResult<AgeingSummary> {
        self.reports.ageing_summary(partner_type, as_on_date).await
    }

    /// Statement of account for one partner
    pub async fn statement_of_account(
        &self,
        partner: &str,
        partner_type: PartnerType,
        from: NaiveDate,
        to: NaiveDate,
        report_type: SoaReportType,
    ) -> LedgerResult<StatementOfAccount> {
        self.reports
            .statement_of_account(partner, partner_type, from, to, report_type)
            .await
    }

    // Reconciliation operations

    /// List cheque-bearing payments and receipts
    pub async fn pdc_list(
        &self,
        status: Option<ChequeStatus>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<Vec<PdcEntry>> {
        self.reconciliation.pdc_list(status, from, to).await
    }

    /// Mark a cheque-bearing voucher as cleared
    pub async fn clear_bank_transaction(
        &mut self,
        voucher_id: &str,
        kind: VoucherKind,
        cleared_date: NaiveDate,
    ) -> LedgerResult<Voucher> {
        self.reconciliation
            .clear(voucher_id, kind, cleared_date)
            .await
    }

    /// Validate the integrity of the ledger over a date range
    pub async fn validate_integrity(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<LedgerIntegrityReport> {
        let trial_balance = self.trial_balance(from, to).await?;

        let mut issues = Vec::new();
        if trial_balance.difference != BigDecimal::from(0) {
            issues.push(format!(
                "Trial balance is not balanced: debits = {}, credits = {}",
                trial_balance.total_debit, trial_balance.total_credit
            ));
        }

        Ok(LedgerIntegrityReport {
            from_date: from,
            to_date: to,
            is_valid: issues.is_empty(),
            issues,
            total_debit: trial_balance.total_debit,
            total_credit: trial_balance.total_credit,
            difference: trial_balance.difference,
        })
    }
}

/// Report on ledger integrity and validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerIntegrityReport {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub total_debit: BigDecimal,
    pub total_credit: BigDecimal,
    pub difference: BigDecimal,
}
