//! The append-only ledger store: posting, removal, and balance queries

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::traits::*;
use crate::types::*;
use crate::utils::validation;

/// One ledger row of an account summary, annotated with the balance
/// after applying it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizedEntry {
    pub entry: LedgerEntry,
    pub running_balance: BigDecimal,
}

/// Result of summarizing one account over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub account_id: String,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    /// Net balance of everything dated strictly before `from_date`
    /// (zero when `from_date` is omitted)
    pub opening_balance: BigDecimal,
    /// Rows in range, sorted by `(date, seq)`, with running balances
    pub entries: Vec<SummarizedEntry>,
    pub total_debit: BigDecimal,
    pub total_credit: BigDecimal,
    /// `opening_balance + total_debit - total_credit`
    pub closing_balance: BigDecimal,
}

/// Check that a set of drafts obeys the double-entry law.
///
/// The single choke point for the balance invariant: every voucher kind
/// routes its rows through this check before anything is written.
pub fn validate_balanced(drafts: &[EntryDraft]) -> LedgerResult<()> {
    let debits: BigDecimal = drafts.iter().map(|d| &d.debit).sum();
    let credits: BigDecimal = drafts.iter().map(|d| &d.credit).sum();
    if debits != credits {
        return Err(LedgerError::ImbalancedVoucher { debits, credits });
    }
    Ok(())
}

/// Store over the append-only debit/credit rows.
///
/// The only writers are [`post`](LedgerStore::post) and
/// [`remove`](LedgerStore::remove); rows are never updated in place, and
/// every balance is recomputed from the full row history.
pub struct LedgerStore<S: LedgerStorage> {
    pub(crate) storage: S,
}

impl<S: LedgerStorage> LedgerStore<S> {
    /// Create a new store over the given storage
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Commit a voucher and its rows as one atomic unit.
    ///
    /// Preconditions checked here, before any write: drafts non-empty,
    /// no negative amounts, balanced, and every referenced account exists.
    pub async fn post(
        &mut self,
        voucher: &Voucher,
        drafts: &[EntryDraft],
    ) -> LedgerResult<(Voucher, Vec<LedgerEntry>)> {
        if drafts.is_empty() {
            return Err(LedgerError::Validation(
                "Voucher must produce at least one ledger row".to_string(),
            ));
        }

        for draft in drafts {
            validation::validate_non_negative_amount(&draft.debit)?;
            validation::validate_non_negative_amount(&draft.credit)?;
            if self.storage.get_account(&draft.account_id).await?.is_none() {
                return Err(LedgerError::InvalidReference(format!(
                    "account '{}' does not exist",
                    draft.account_id
                )));
            }
        }

        validate_balanced(drafts)?;

        let (stored, rows) = self.storage.commit_voucher(voucher, drafts).await?;
        debug!(
            voucher_id = %stored.id,
            kind = %stored.kind(),
            rows = rows.len(),
            "posted ledger rows"
        );
        Ok((stored, rows))
    }

    /// Remove the rows tagged `(voucher_id, kind)` together with the
    /// voucher record. Idempotent: removing an absent voucher is a no-op.
    pub async fn remove(&mut self, voucher_id: &str, kind: VoucherKind) -> LedgerResult<()> {
        self.storage.remove_voucher(voucher_id, kind).await?;
        debug!(voucher_id = %voucher_id, kind = %kind, "removed ledger rows");
        Ok(())
    }

    /// Summarize one account over an inclusive date range.
    ///
    /// The opening balance covers everything dated strictly before
    /// `from`. In-range rows are walked in `(date, seq)` order to build
    /// running balances; the range totals are folded independently of the
    /// walk so the two paths stay cross-checkable, and the closing
    /// balance is derived from opening + totals.
    pub async fn summarize(
        &self,
        account_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<AccountSummary> {
        validation::validate_date_range(from, to)?;

        if self.storage.get_account(account_id).await?.is_none() {
            return Err(LedgerError::AccountNotFound(account_id.to_string()));
        }

        let all = self.storage.entries_for_account(account_id, None, None).await?;

        let zero = BigDecimal::from(0);
        let mut opening_balance = zero.clone();
        let mut in_range = Vec::new();
        for entry in all {
            if from.is_some_and(|f| entry.date < f) {
                opening_balance += entry.signed_amount();
            } else if to.is_none_or(|t| entry.date <= t) {
                in_range.push(entry);
            }
        }

        let total_debit: BigDecimal = in_range.iter().map(|e| &e.debit).sum();
        let total_credit: BigDecimal = in_range.iter().map(|e| &e.credit).sum();

        let mut running = opening_balance.clone();
        let entries = in_range
            .into_iter()
            .map(|entry| {
                running += entry.signed_amount();
                SummarizedEntry {
                    running_balance: running.clone(),
                    entry,
                }
            })
            .collect();

        let closing_balance = &opening_balance + &total_debit - &total_credit;

        Ok(AccountSummary {
            account_id: account_id.to_string(),
            from_date: from,
            to_date: to,
            opening_balance,
            entries,
            total_debit,
            total_credit,
            closing_balance,
        })
    }
}
