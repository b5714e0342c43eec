//! Ledger-derived statements: trial balance, balance sheet, profit & loss

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::warn;

use crate::reports::types::*;
use crate::reports::ReportEngine;
use crate::traits::LedgerStorage;
use crate::types::*;
use crate::utils::validation;

impl<S: LedgerStorage> ReportEngine<S> {
    /// Trial balance: every account's period summary, grouped by type.
    ///
    /// With no date filter, `total_debit` and `total_credit` cover the
    /// whole ledger and must agree; the `difference` field exposes any
    /// divergence instead of failing the report.
    pub async fn trial_balance(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<TrialBalance> {
        validation::validate_date_range(from, to)?;

        let zero = BigDecimal::from(0);
        let mut groups: HashMap<AccountType, Vec<TrialBalanceRow>> = HashMap::new();
        let mut total_debit = zero.clone();
        let mut total_credit = zero.clone();

        for account in self.store.storage.list_accounts(None).await? {
            self.check_cancelled()?;

            let summary = self.store.summarize(&account.id, from, to).await?;
            if summary.opening_balance == zero
                && summary.total_debit == zero
                && summary.total_credit == zero
            {
                continue;
            }

            total_debit += &summary.total_debit;
            total_credit += &summary.total_credit;
            groups
                .entry(account.account_type)
                .or_default()
                .push(TrialBalanceRow {
                    account,
                    opening_balance: summary.opening_balance,
                    debit: summary.total_debit,
                    credit: summary.total_credit,
                    closing_balance: summary.closing_balance,
                });
        }

        let difference = &total_debit - &total_credit;
        if difference != zero {
            warn!(%difference, "trial balance does not net to zero");
        }

        Ok(TrialBalance {
            from_date: from,
            to_date: to,
            groups,
            total_debit,
            total_credit,
            difference,
        })
    }

    /// Balance sheet restricted to Asset, Liability, and Equity accounts.
    /// Asset balances are debit minus credit; the other two are credit
    /// minus debit.
    pub async fn balance_sheet(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<BalanceSheet> {
        validation::validate_date_range(from, to)?;

        let assets = self.statement_rows(AccountType::Asset, from, to).await?;
        let liabilities = self
            .statement_rows(AccountType::Liability, from, to)
            .await?;
        let equity = self.statement_rows(AccountType::Equity, from, to).await?;

        let total_debit: BigDecimal = assets.iter().map(|r| &r.balance).sum();
        let total_credit: BigDecimal = liabilities
            .iter()
            .chain(equity.iter())
            .map(|r| &r.balance)
            .sum();
        let difference = &total_debit - &total_credit;

        Ok(BalanceSheet {
            from_date: from,
            to_date: to,
            assets,
            liabilities,
            equity,
            total_debit,
            total_credit,
            difference,
        })
    }

    /// Profit & loss restricted to Income and Expense accounts
    pub async fn profit_loss(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<ProfitLoss> {
        validation::validate_date_range(from, to)?;

        let income = self.statement_rows(AccountType::Income, from, to).await?;
        let expense = self.statement_rows(AccountType::Expense, from, to).await?;

        let total_income: BigDecimal = income.iter().map(|r| &r.balance).sum();
        let total_expense: BigDecimal = expense.iter().map(|r| &r.balance).sum();
        let net_result = &total_income - &total_expense;
        let net_type = if net_result >= BigDecimal::from(0) {
            NetType::Profit
        } else {
            NetType::Loss
        };

        Ok(ProfitLoss {
            from_date: from,
            to_date: to,
            income,
            expense,
            total_income,
            total_expense,
            net_result,
            net_type,
        })
    }

    /// Period balances for every account of one type, signed to the
    /// type's normal side; all-zero rows are dropped
    async fn statement_rows(
        &self,
        account_type: AccountType,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<Vec<ReportRow>> {
        let zero = BigDecimal::from(0);
        let mut rows = Vec::new();

        for account in self.store.storage.list_accounts(Some(account_type)).await? {
            self.check_cancelled()?;

            let summary = self.store.summarize(&account.id, from, to).await?;
            let balance = match account.account_type.normal_balance() {
                EntryType::Debit => &summary.total_debit - &summary.total_credit,
                EntryType::Credit => &summary.total_credit - &summary.total_debit,
            };
            if balance == zero {
                continue;
            }
            rows.push(ReportRow { account, balance });
        }

        Ok(rows)
    }
}
