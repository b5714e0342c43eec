//! Result structures for the report engine

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::*;

/// One account's period summary inside a trial balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub account: Account,
    pub opening_balance: BigDecimal,
    /// Total debits in range
    pub debit: BigDecimal,
    /// Total credits in range
    pub credit: BigDecimal,
    pub closing_balance: BigDecimal,
}

/// Trial balance over a date range, grouped by account type.
///
/// With no date filter the ledger-wide `difference` must be zero; a
/// nonzero value is surfaced (not raised) so operators can detect
/// bookkeeping corruption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub groups: HashMap<AccountType, Vec<TrialBalanceRow>>,
    pub total_debit: BigDecimal,
    pub total_credit: BigDecimal,
    pub difference: BigDecimal,
}

/// One account and its computed balance in a statement-style report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub account: Account,
    pub balance: BigDecimal,
}

/// Balance sheet: assets against liabilities plus equity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub assets: Vec<ReportRow>,
    pub liabilities: Vec<ReportRow>,
    pub equity: Vec<ReportRow>,
    /// Sum of asset balances
    pub total_debit: BigDecimal,
    /// Sum of liability and equity balances
    pub total_credit: BigDecimal,
    pub difference: BigDecimal,
}

/// Whether a period closed in profit or loss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetType {
    Profit,
    Loss,
}

/// Profit & loss statement over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitLoss {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub income: Vec<ReportRow>,
    pub expense: Vec<ReportRow>,
    pub total_income: BigDecimal,
    pub total_expense: BigDecimal,
    /// `total_income - total_expense`; sign decides `net_type`
    pub net_result: BigDecimal,
    pub net_type: NetType,
}

/// One transaction line of the day book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBookLine {
    pub date: NaiveDate,
    pub voucher_id: String,
    pub voucher_number: u64,
    pub kind: VoucherKind,
    pub narration: String,
    pub partner: Option<String>,
    pub debit: BigDecimal,
    pub credit: BigDecimal,
}

/// Chronological union of payments, receipts, and journal lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBook {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub entries: Vec<DayBookLine>,
    pub total_debit: BigDecimal,
    pub total_credit: BigDecimal,
    pub difference: BigDecimal,
}

/// Inflow/outflow totals for one cash-flow category (a bank, or
/// "Adjustment" for journal activity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowCategory {
    pub name: String,
    pub inflow: BigDecimal,
    pub outflow: BigDecimal,
    pub net: BigDecimal,
}

/// Cash movement over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub opening_balance: BigDecimal,
    pub total_inflow: BigDecimal,
    pub total_outflow: BigDecimal,
    pub closing_balance: BigDecimal,
    pub categories: Vec<CashFlowCategory>,
}

/// Signed amounts bucketed by transaction age in days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeingBuckets {
    /// 0-30 days (future-dated transactions land here too)
    pub current: BigDecimal,
    pub days_31_60: BigDecimal,
    pub days_61_90: BigDecimal,
    pub days_91_plus: BigDecimal,
}

impl AgeingBuckets {
    pub fn zero() -> Self {
        Self {
            current: BigDecimal::from(0),
            days_31_60: BigDecimal::from(0),
            days_61_90: BigDecimal::from(0),
            days_91_plus: BigDecimal::from(0),
        }
    }

    /// Add a signed amount into the bucket `diff_days` falls in
    pub fn add(&mut self, diff_days: i64, amount: &BigDecimal) {
        match diff_days {
            d if d <= 30 => self.current += amount,
            31..=60 => self.days_31_60 += amount,
            61..=90 => self.days_61_90 += amount,
            _ => self.days_91_plus += amount,
        }
    }

    /// Sum across all four buckets
    pub fn total(&self) -> BigDecimal {
        &self.current + &self.days_31_60 + &self.days_61_90 + &self.days_91_plus
    }
}

/// One partner's aged balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerAgeing {
    pub partner: String,
    pub buckets: AgeingBuckets,
    pub balance: BigDecimal,
}

/// Ageing summary for one partner type as of a date, sorted by balance
/// descending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeingSummary {
    pub partner_type: PartnerType,
    pub as_on_date: NaiveDate,
    pub partners: Vec<PartnerAgeing>,
}

/// How much detail a statement of account carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoaReportType {
    Summary,
    Detailed,
}

/// One transaction on a partner's statement of account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoaTransaction {
    pub date: NaiveDate,
    pub voucher_id: String,
    pub kind: VoucherKind,
    pub narration: String,
    pub debit: BigDecimal,
    pub credit: BigDecimal,
    /// Running balance after this transaction
    pub balance: BigDecimal,
}

/// Headline figures of a statement of account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoaSummary {
    pub opening_balance: BigDecimal,
    /// Sum of debit-side transactions in range
    pub invoiced_amount: BigDecimal,
    /// Sum of credit-side transactions in range
    pub amount_paid: BigDecimal,
    pub closing_balance: BigDecimal,
}

/// Statement of account for one partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementOfAccount {
    pub partner: String,
    pub partner_type: PartnerType,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub summary: SoaSummary,
    /// Populated only for [`SoaReportType::Detailed`]
    pub transactions: Option<Vec<SoaTransaction>>,
}
