//! Validation utilities

use crate::types::*;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;

/// Validate that an amount is strictly positive
pub fn validate_positive_amount(amount: &BigDecimal) -> LedgerResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(LedgerError::NonPositiveAmount(amount.clone()))
    } else {
        Ok(())
    }
}

/// Validate that an amount is not negative
pub fn validate_non_negative_amount(amount: &BigDecimal) -> LedgerResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(LedgerError::NonPositiveAmount(amount.clone()))
    } else {
        Ok(())
    }
}

/// Validate that an account code is usable as a stable key
pub fn validate_account_code(code: &str) -> LedgerResult<()> {
    if code.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Account code cannot be empty".to_string(),
        ));
    }

    if code.len() > 50 {
        return Err(LedgerError::Validation(
            "Account code cannot exceed 50 characters".to_string(),
        ));
    }

    // Alphanumeric plus dashes and underscores only
    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(LedgerError::Validation(
            "Account code can only contain alphanumeric characters, dashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate that an account name is valid
pub fn validate_account_name(name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Account name cannot be empty".to_string(),
        ));
    }

    if name.len() > 100 {
        return Err(LedgerError::Validation(
            "Account name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a voucher narration is valid
pub fn validate_narration(narration: &str) -> LedgerResult<()> {
    if narration.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Narration cannot be empty".to_string(),
        ));
    }

    if narration.len() > 500 {
        return Err(LedgerError::Validation(
            "Narration cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate an optional inclusive date range before any aggregation runs
pub fn validate_date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> LedgerResult<()> {
    if let (Some(from), Some(to)) = (from, to) {
        if to < from {
            return Err(LedgerError::InvalidDateRange { from, to });
        }
    }
    Ok(())
}
