//! In-memory storage implementation for testing and development

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// Every table lives behind one lock so that a voucher record and its
/// ledger rows commit and disappear as a single unit. Real backends map
/// `commit_voucher`/`remove_voucher` to a multi-row transaction instead.
#[derive(Debug, Default)]
struct State {
    accounts: HashMap<String, Account>,
    /// code -> account id
    code_index: HashMap<String, String>,
    vouchers: HashMap<String, Voucher>,
    entries: Vec<LedgerEntry>,
    /// Monotonic insertion sequence for ledger rows
    next_seq: u64,
    /// Per-kind voucher document numbers
    voucher_numbers: HashMap<VoucherKind, u64>,
}

impl State {
    fn assign_number(&mut self, voucher: &Voucher) -> u64 {
        if voucher.number != 0 {
            return voucher.number;
        }
        let counter = self.voucher_numbers.entry(voucher.kind()).or_insert(0);
        *counter += 1;
        *counter
    }
}

/// In-memory [`LedgerStorage`] implementation
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    state: Arc<RwLock<State>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        *self.state.write().unwrap() = State::default();
    }

    /// Total number of ledger rows currently stored
    pub fn entry_count(&self) -> usize {
        self.state.read().unwrap().entries.len()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn in_range(date: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    if let Some(from) = from {
        if date < from {
            return false;
        }
    }
    if let Some(to) = to {
        if date > to {
            return false;
        }
    }
    true
}

#[async_trait]
impl LedgerStorage for MemoryStorage {
    async fn save_account(&mut self, account: &Account) -> LedgerResult<()> {
        let mut state = self.state.write().unwrap();
        state
            .code_index
            .insert(account.code.clone(), account.id.clone());
        state.accounts.insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn get_account(&self, account_id: &str) -> LedgerResult<Option<Account>> {
        Ok(self.state.read().unwrap().accounts.get(account_id).cloned())
    }

    async fn get_account_by_code(&self, code: &str) -> LedgerResult<Option<Account>> {
        let state = self.state.read().unwrap();
        Ok(state
            .code_index
            .get(code)
            .and_then(|id| state.accounts.get(id))
            .cloned())
    }

    async fn list_accounts(&self, account_type: Option<AccountType>) -> LedgerResult<Vec<Account>> {
        let state = self.state.read().unwrap();
        let mut accounts: Vec<Account> = state
            .accounts
            .values()
            .filter(|account| account_type.is_none_or(|t| account.account_type == t))
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(accounts)
    }

    async fn commit_voucher(
        &mut self,
        voucher: &Voucher,
        drafts: &[EntryDraft],
    ) -> LedgerResult<(Voucher, Vec<LedgerEntry>)> {
        let mut state = self.state.write().unwrap();

        let mut stored = voucher.clone();
        stored.number = state.assign_number(voucher);

        let now = chrono::Utc::now().naive_utc();
        let mut rows = Vec::with_capacity(drafts.len());
        for draft in drafts {
            state.next_seq += 1;
            rows.push(LedgerEntry {
                id: uuid::Uuid::new_v4().to_string(),
                seq: state.next_seq,
                date: stored.date,
                account_id: draft.account_id.clone(),
                debit: draft.debit.clone(),
                credit: draft.credit.clone(),
                narration: draft.narration.clone(),
                voucher_id: stored.id.clone(),
                voucher_kind: stored.kind(),
                created_by: stored.created_by.clone(),
                created_at: now,
            });
        }

        state.vouchers.insert(stored.id.clone(), stored.clone());
        state.entries.extend(rows.iter().cloned());

        Ok((stored, rows))
    }

    async fn save_voucher(&mut self, voucher: &Voucher) -> LedgerResult<Voucher> {
        let mut state = self.state.write().unwrap();
        let mut stored = voucher.clone();
        stored.number = state.assign_number(voucher);
        state.vouchers.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn remove_voucher(&mut self, voucher_id: &str, kind: VoucherKind) -> LedgerResult<()> {
        let mut state = self.state.write().unwrap();
        state
            .entries
            .retain(|e| !(e.voucher_id == voucher_id && e.voucher_kind == kind));
        if state
            .vouchers
            .get(voucher_id)
            .is_some_and(|v| v.kind() == kind)
        {
            state.vouchers.remove(voucher_id);
        }
        Ok(())
    }

    async fn get_voucher(&self, voucher_id: &str) -> LedgerResult<Option<Voucher>> {
        Ok(self.state.read().unwrap().vouchers.get(voucher_id).cloned())
    }

    async fn list_vouchers(
        &self,
        kind: Option<VoucherKind>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<Vec<Voucher>> {
        let state = self.state.read().unwrap();
        let mut vouchers: Vec<Voucher> = state
            .vouchers
            .values()
            .filter(|v| kind.is_none_or(|k| v.kind() == k) && in_range(v.date, from, to))
            .cloned()
            .collect();
        vouchers.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(vouchers)
    }

    async fn entries_for_account(
        &self,
        account_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<Vec<LedgerEntry>> {
        let state = self.state.read().unwrap();
        let mut entries: Vec<LedgerEntry> = state
            .entries
            .iter()
            .filter(|e| e.account_id == account_id && in_range(e.date, from, to))
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.seq.cmp(&b.seq)));
        Ok(entries)
    }

    async fn entries_in_range(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<Vec<LedgerEntry>> {
        let state = self.state.read().unwrap();
        let mut entries: Vec<LedgerEntry> = state
            .entries
            .iter()
            .filter(|e| in_range(e.date, from, to))
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.seq.cmp(&b.seq)));
        Ok(entries)
    }

    async fn entries_for_voucher(
        &self,
        voucher_id: &str,
        kind: VoucherKind,
    ) -> LedgerResult<Vec<LedgerEntry>> {
        let state = self.state.read().unwrap();
        Ok(state
            .entries
            .iter()
            .filter(|e| e.voucher_id == voucher_id && e.voucher_kind == kind)
            .cloned()
            .collect())
    }
}
