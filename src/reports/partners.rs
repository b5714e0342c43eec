//! Partner-facing views: ageing summary and statement of account

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::reports::types::*;
use crate::reports::ReportEngine;
use crate::traits::LedgerStorage;
use crate::types::*;
use crate::utils::validation;

impl<S: LedgerStorage> ReportEngine<S> {
    /// Ageing summary for one partner type as of a date.
    ///
    /// Customers age their receipts as positive amounts; vendors age
    /// their payments as negative amounts. Each transaction lands in the
    /// bucket its age in days selects, and partners come back sorted by
    /// balance descending.
    pub async fn ageing_summary(
        &self,
        partner_type: PartnerType,
        as_on_date: NaiveDate,
    ) -> LedgerResult<AgeingSummary> {
        let kind = match partner_type {
            PartnerType::Customer => VoucherKind::Receipt,
            PartnerType::Vendor => VoucherKind::Payment,
        };
        let vouchers = self
            .store
            .storage
            .list_vouchers(Some(kind), None, None)
            .await?;

        let mut by_partner: BTreeMap<String, AgeingBuckets> = BTreeMap::new();
        for voucher in &vouchers {
            self.check_cancelled()?;

            let (partner, amount) = match &voucher.detail {
                VoucherDetail::Receipt(r) if r.partner.kind == partner_type => {
                    (r.partner.name.clone(), r.amount.clone())
                }
                VoucherDetail::Payment(p) if p.partner.kind == partner_type => {
                    (p.partner.name.clone(), -p.amount.clone())
                }
                _ => continue,
            };

            let diff_days = (as_on_date - voucher.date).num_days();
            by_partner
                .entry(partner)
                .or_insert_with(AgeingBuckets::zero)
                .add(diff_days, &amount);
        }

        let mut partners: Vec<PartnerAgeing> = by_partner
            .into_iter()
            .map(|(partner, buckets)| {
                let balance = buckets.total();
                PartnerAgeing {
                    partner,
                    buckets,
                    balance,
                }
            })
            .collect();
        partners.sort_by(|a, b| b.balance.cmp(&a.balance));

        Ok(AgeingSummary {
            partner_type,
            as_on_date,
            partners,
        })
    }

    /// Statement of account for one partner: payments (debit side),
    /// receipts (credit side), and matching journal lines merged in date
    /// order with a running balance from the pre-range opening.
    pub async fn statement_of_account(
        &self,
        partner: &str,
        partner_type: PartnerType,
        from: NaiveDate,
        to: NaiveDate,
        report_type: SoaReportType,
    ) -> LedgerResult<StatementOfAccount> {
        validation::validate_date_range(Some(from), Some(to))?;

        let vouchers = self.store.storage.list_vouchers(None, None, None).await?;

        let zero = BigDecimal::from(0);
        let mut opening_balance = zero.clone();
        let mut transactions: Vec<SoaTransaction> = Vec::new();

        // Vouchers arrive date-sorted, so one pass splits pre-range
        // history from the statement body while preserving order
        for voucher in &vouchers {
            self.check_cancelled()?;

            let mut sides: Vec<(BigDecimal, BigDecimal, String)> = Vec::new();
            match &voucher.detail {
                VoucherDetail::Payment(p)
                    if p.partner.name == partner && p.partner.kind == partner_type =>
                {
                    sides.push((p.amount.clone(), zero.clone(), voucher.narration.clone()));
                }
                VoucherDetail::Receipt(r)
                    if r.partner.name == partner && r.partner.kind == partner_type =>
                {
                    sides.push((zero.clone(), r.amount.clone(), voucher.narration.clone()));
                }
                VoucherDetail::Journal(j) => {
                    for line in &j.lines {
                        if line.partner.as_deref() == Some(partner) {
                            sides.push((
                                line.debit.clone(),
                                line.credit.clone(),
                                line.narration
                                    .clone()
                                    .unwrap_or_else(|| voucher.narration.clone()),
                            ));
                        }
                    }
                }
                _ => {}
            }

            for (debit, credit, narration) in sides {
                if voucher.date < from {
                    opening_balance += &debit - &credit;
                } else if voucher.date <= to {
                    transactions.push(SoaTransaction {
                        date: voucher.date,
                        voucher_id: voucher.id.clone(),
                        kind: voucher.kind(),
                        narration,
                        debit,
                        credit,
                        balance: zero.clone(),
                    });
                }
            }
        }

        let invoiced_amount: BigDecimal = transactions.iter().map(|t| &t.debit).sum();
        let amount_paid: BigDecimal = transactions.iter().map(|t| &t.credit).sum();

        let mut running = opening_balance.clone();
        for txn in &mut transactions {
            running += &txn.debit - &txn.credit;
            txn.balance = running.clone();
        }

        let closing_balance = &opening_balance + &invoiced_amount - &amount_paid;

        Ok(StatementOfAccount {
            partner: partner.to_string(),
            partner_type,
            from_date: from,
            to_date: to,
            summary: SoaSummary {
                opening_balance,
                invoiced_amount,
                amount_paid,
                closing_balance,
            },
            transactions: match report_type {
                SoaReportType::Summary => None,
                SoaReportType::Detailed => Some(transactions),
            },
        })
    }
}
