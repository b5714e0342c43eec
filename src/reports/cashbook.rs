//! Voucher-derived views: day book and cash flow

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::reports::types::*;
use crate::reports::ReportEngine;
use crate::traits::LedgerStorage;
use crate::types::*;
use crate::utils::validation;

impl<S: LedgerStorage> ReportEngine<S> {
    /// Day book: payments (debit), receipts (credit), and flattened
    /// journal lines within the range, in date order
    pub async fn day_book(&self, from: NaiveDate, to: NaiveDate) -> LedgerResult<DayBook> {
        validation::validate_date_range(Some(from), Some(to))?;

        let vouchers = self
            .store
            .storage
            .list_vouchers(None, Some(from), Some(to))
            .await?;

        let mut entries = Vec::new();
        for voucher in &vouchers {
            self.check_cancelled()?;

            match &voucher.detail {
                VoucherDetail::Payment(p) => entries.push(DayBookLine {
                    date: voucher.date,
                    voucher_id: voucher.id.clone(),
                    voucher_number: voucher.number,
                    kind: VoucherKind::Payment,
                    narration: voucher.narration.clone(),
                    partner: Some(p.partner.name.clone()),
                    debit: p.amount.clone(),
                    credit: BigDecimal::from(0),
                }),
                VoucherDetail::Receipt(r) => entries.push(DayBookLine {
                    date: voucher.date,
                    voucher_id: voucher.id.clone(),
                    voucher_number: voucher.number,
                    kind: VoucherKind::Receipt,
                    narration: voucher.narration.clone(),
                    partner: Some(r.partner.name.clone()),
                    debit: BigDecimal::from(0),
                    credit: r.amount.clone(),
                }),
                VoucherDetail::Journal(j) => {
                    for line in &j.lines {
                        entries.push(DayBookLine {
                            date: voucher.date,
                            voucher_id: voucher.id.clone(),
                            voucher_number: voucher.number,
                            kind: VoucherKind::Journal,
                            narration: line
                                .narration
                                .clone()
                                .unwrap_or_else(|| voucher.narration.clone()),
                            partner: line.partner.clone(),
                            debit: line.debit.clone(),
                            credit: line.credit.clone(),
                        });
                    }
                }
                _ => {}
            }
        }

        let total_debit: BigDecimal = entries.iter().map(|e| &e.debit).sum();
        let total_credit: BigDecimal = entries.iter().map(|e| &e.credit).sum();
        let difference = &total_debit - &total_credit;

        Ok(DayBook {
            from_date: from,
            to_date: to,
            entries,
            total_debit,
            total_credit,
            difference,
        })
    }

    /// Cash flow: receipts as inflow, payments as outflow, journal lines
    /// by their own side, bucketed by bank name ("Adjustment" for
    /// journals)
    pub async fn cash_flow(&self, from: NaiveDate, to: NaiveDate) -> LedgerResult<CashFlow> {
        validation::validate_date_range(Some(from), Some(to))?;

        let vouchers = self
            .store
            .storage
            .list_vouchers(None, Some(from), Some(to))
            .await?;

        let zero = BigDecimal::from(0);
        // category name -> (inflow, outflow)
        let mut buckets: BTreeMap<String, (BigDecimal, BigDecimal)> = BTreeMap::new();

        for voucher in &vouchers {
            self.check_cancelled()?;

            match &voucher.detail {
                VoucherDetail::Receipt(r) => {
                    let slot = buckets
                        .entry(r.bank.name.clone())
                        .or_insert_with(|| (zero.clone(), zero.clone()));
                    slot.0 += &r.amount;
                }
                VoucherDetail::Payment(p) => {
                    let slot = buckets
                        .entry(p.bank.name.clone())
                        .or_insert_with(|| (zero.clone(), zero.clone()));
                    slot.1 += &p.amount;
                }
                VoucherDetail::Journal(j) => {
                    let slot = buckets
                        .entry("Adjustment".to_string())
                        .or_insert_with(|| (zero.clone(), zero.clone()));
                    for line in &j.lines {
                        slot.0 += &line.debit;
                        slot.1 += &line.credit;
                    }
                }
                _ => {}
            }
        }

        let categories: Vec<CashFlowCategory> = buckets
            .into_iter()
            .map(|(name, (inflow, outflow))| {
                let net = &inflow - &outflow;
                CashFlowCategory {
                    name,
                    inflow,
                    outflow,
                    net,
                }
            })
            .collect();

        let total_inflow: BigDecimal = categories.iter().map(|c| &c.inflow).sum();
        let total_outflow: BigDecimal = categories.iter().map(|c| &c.outflow).sum();
        let opening_balance = zero;
        let closing_balance = &opening_balance + &total_inflow - &total_outflow;

        Ok(CashFlow {
            from_date: from,
            to_date: to,
            opening_balance,
            total_inflow,
            total_outflow,
            closing_balance,
            categories,
        })
    }
}
