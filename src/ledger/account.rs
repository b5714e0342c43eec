//! Chart of accounts registry

use std::collections::HashMap;

use crate::traits::*;
use crate::types::*;
use crate::utils::validation;

/// Registry over the chart of accounts.
///
/// Account codes are stable, never-reused keys; every other component
/// treats them as such. There is no delete operation: an account that has
/// ever been referenced by a ledger row must remain resolvable.
pub struct AccountRegistry<S: LedgerStorage> {
    pub(crate) storage: S,
}

impl<S: LedgerStorage> AccountRegistry<S> {
    /// Create a new registry over the given storage
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Register a new account. Rejects reused codes.
    pub async fn create(&mut self, new: NewAccount) -> LedgerResult<Account> {
        validation::validate_account_code(&new.code)?;
        validation::validate_account_name(&new.name)?;

        if self.storage.get_account_by_code(&new.code).await?.is_some() {
            return Err(LedgerError::DuplicateAccountCode(new.code));
        }

        let mut account = Account::new(new.code, new.name, new.account_type);
        account.sub_type = new.sub_type;
        account.classification = new.classification;

        self.storage.save_account(&account).await?;

        Ok(account)
    }

    /// Get an account by id
    pub async fn get(&self, account_id: &str) -> LedgerResult<Option<Account>> {
        self.storage.get_account(account_id).await
    }

    /// Get an account by id, returning an error if not found
    pub async fn get_required(&self, account_id: &str) -> LedgerResult<Account> {
        self.storage
            .get_account(account_id)
            .await?
            .ok_or_else(|| LedgerError::AccountNotFound(account_id.to_string()))
    }

    /// Get an account by its business code
    pub async fn get_by_code(&self, code: &str) -> LedgerResult<Option<Account>> {
        self.storage.get_account_by_code(code).await
    }

    /// List all accounts
    pub async fn list(&self) -> LedgerResult<Vec<Account>> {
        self.storage.list_accounts(None).await
    }

    /// List accounts of one type
    pub async fn list_by_type(&self, account_type: AccountType) -> LedgerResult<Vec<Account>> {
        self.storage.list_accounts(Some(account_type)).await
    }
}

/// Utility functions for seeding a chart of accounts
pub mod utils {
    use super::*;

    /// Create a starter chart of accounts for a retail/warehouse business.
    /// Returns the accounts keyed by a short handle.
    pub async fn create_standard_chart<S: LedgerStorage>(
        registry: &mut AccountRegistry<S>,
    ) -> LedgerResult<HashMap<String, Account>> {
        let chart = [
            ("bank_cash", "1001", "Bank Cash", AccountType::Asset, "Current Asset"),
            ("accounts_receivable", "1200", "Accounts Receivable", AccountType::Asset, "Current Asset"),
            ("inventory", "1300", "Inventory", AccountType::Asset, "Current Asset"),
            ("vat_receivable", "1400", "VAT Receivable", AccountType::Asset, "Current Asset"),
            ("accounts_payable", "2001", "Accounts Payable", AccountType::Liability, "Current Liability"),
            ("vat_payable", "2100", "VAT Payable", AccountType::Liability, "Current Liability"),
            ("owners_equity", "3001", "Owner's Equity", AccountType::Equity, "Capital"),
            ("sales_revenue", "4001", "Sales Revenue", AccountType::Income, "Operating Income"),
            ("sales_returns", "4100", "Sales Returns", AccountType::Income, "Operating Income"),
            ("cost_of_goods_sold", "5001", "Cost of Goods Sold", AccountType::Expense, "Direct Cost"),
            ("freight_expense", "5100", "Freight Expense", AccountType::Expense, "Direct Cost"),
        ];

        let mut accounts = HashMap::new();
        for (handle, code, name, account_type, sub_type) in chart {
            let mut new = NewAccount::new(code, name, account_type);
            new.sub_type = Some(sub_type.to_string());
            let account = registry.create(new).await?;
            accounts.insert(handle.to_string(), account);
        }

        Ok(accounts)
    }
}
