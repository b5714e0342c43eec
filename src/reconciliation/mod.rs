//! Bank reconciliation: post-dated cheque listing and explicit clearing

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::traits::*;
use crate::types::*;
use crate::utils::validation;

/// One cheque-bearing payment or receipt in the reconciliation view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdcEntry {
    pub voucher_id: String,
    pub voucher_number: u64,
    pub kind: VoucherKind,
    pub date: NaiveDate,
    pub partner: String,
    pub bank_name: String,
    pub amount: BigDecimal,
    pub cheque_number: String,
    pub cheque_date: NaiveDate,
    pub status: ChequeStatus,
    pub cleared_date: Option<NaiveDate>,
}

/// Reconciliation view over cheque-bearing vouchers.
///
/// Cheques never clear automatically: the only transition is the
/// explicit `Pending -> Cleared` performed by [`clear`](Self::clear).
pub struct BankReconciliation<S: LedgerStorage> {
    storage: S,
}

impl<S: LedgerStorage> BankReconciliation<S> {
    /// Create a new reconciliation view over the given storage
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// List cheque-bearing payments and receipts, optionally filtered by
    /// clearing status and cheque-date range
    pub async fn pdc_list(
        &self,
        status: Option<ChequeStatus>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<Vec<PdcEntry>> {
        validation::validate_date_range(from, to)?;

        let vouchers = self.storage.list_vouchers(None, None, None).await?;
        let mut entries = Vec::new();

        for voucher in &vouchers {
            let (partner, bank, amount, cheque) = match &voucher.detail {
                VoucherDetail::Payment(p) => match &p.cheque {
                    Some(cheque) => (&p.partner, &p.bank, &p.amount, cheque),
                    None => continue,
                },
                VoucherDetail::Receipt(r) => match &r.cheque {
                    Some(cheque) => (&r.partner, &r.bank, &r.amount, cheque),
                    None => continue,
                },
                _ => continue,
            };

            if status.is_some_and(|s| cheque.status != s) {
                continue;
            }
            if from.is_some_and(|f| cheque.date < f) || to.is_some_and(|t| cheque.date > t) {
                continue;
            }

            entries.push(PdcEntry {
                voucher_id: voucher.id.clone(),
                voucher_number: voucher.number,
                kind: voucher.kind(),
                date: voucher.date,
                partner: partner.name.clone(),
                bank_name: bank.name.clone(),
                amount: amount.clone(),
                cheque_number: cheque.number.clone(),
                cheque_date: cheque.date,
                status: cheque.status,
                cleared_date: cheque.cleared_date,
            });
        }

        entries.sort_by(|a, b| a.cheque_date.cmp(&b.cheque_date));
        Ok(entries)
    }

    /// Mark a cheque as cleared, recording the clearing date
    pub async fn clear(
        &mut self,
        voucher_id: &str,
        kind: VoucherKind,
        cleared_date: NaiveDate,
    ) -> LedgerResult<Voucher> {
        let mut voucher = self
            .storage
            .get_voucher(voucher_id)
            .await?
            .filter(|v| v.kind() == kind)
            .ok_or_else(|| LedgerError::VoucherNotFound(voucher_id.to_string()))?;

        let cheque = match &mut voucher.detail {
            VoucherDetail::Payment(p) => p.cheque.as_mut(),
            VoucherDetail::Receipt(r) => r.cheque.as_mut(),
            _ => None,
        }
        .ok_or_else(|| {
            LedgerError::Validation(format!("Voucher '{voucher_id}' carries no cheque"))
        })?;

        if cheque.status == ChequeStatus::Cleared {
            return Err(LedgerError::Validation(format!(
                "Cheque on voucher '{voucher_id}' is already cleared"
            )));
        }

        cheque.status = ChequeStatus::Cleared;
        cheque.cleared_date = Some(cleared_date);

        let stored = self.storage.save_voucher(&voucher).await?;
        info!(voucher_id = %stored.id, %cleared_date, "cheque cleared");
        Ok(stored)
    }
}
