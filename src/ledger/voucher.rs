//! Voucher kinds and their posting rules
//!
//! Every voucher kind turns into a balanced set of entry drafts through
//! [`Voucher::posting_lines`]; the dispatch lives in one place instead of
//! six parallel code paths.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;
use crate::utils::validation;

/// A voucher together with the ledger rows its posting produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostedVoucher {
    pub voucher: Voucher,
    /// Empty for draft notes, which post nothing until confirmed
    pub entries: Vec<LedgerEntry>,
}

impl VoucherDetail {
    /// Validate the business fields before any write happens
    pub fn validate(&self) -> LedgerResult<()> {
        match self {
            VoucherDetail::Payment(p) => validation::validate_positive_amount(&p.amount),
            VoucherDetail::Receipt(r) => validation::validate_positive_amount(&r.amount),
            VoucherDetail::Journal(j) => validate_journal(j),
            VoucherDetail::CreditNote(n) | VoucherDetail::DebitNote(n) => validate_note(n),
            VoucherDetail::Transfer(t) => {
                validation::validate_positive_amount(&t.amount)?;
                if t.from_bank.id == t.to_bank.id {
                    return Err(LedgerError::InvalidTransfer);
                }
                Ok(())
            }
        }
    }
}

fn validate_journal(journal: &JournalDetail) -> LedgerResult<()> {
    if journal.lines.len() < 2 {
        return Err(LedgerError::Validation(
            "Journal voucher must have at least two lines".to_string(),
        ));
    }
    for line in &journal.lines {
        validation::validate_non_negative_amount(&line.debit)?;
        validation::validate_non_negative_amount(&line.credit)?;
        if line.debit == BigDecimal::from(0) && line.credit == BigDecimal::from(0) {
            return Err(LedgerError::Validation(
                "Journal line must carry a debit or a credit amount".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_note(note: &NoteDetail) -> LedgerResult<()> {
    validation::validate_positive_amount(&note.amount)?;
    if let Some(vat) = &note.vat {
        validation::validate_positive_amount(&vat.amount)?;
    }
    Ok(())
}

impl Voucher {
    /// Build the balanced entry drafts this voucher posts.
    ///
    /// For notes this is the confirm-time posting; calling it on a draft
    /// note is the caller's signal that the note is being confirmed.
    pub fn posting_lines(&self) -> LedgerResult<Vec<EntryDraft>> {
        let narration = self.narration.as_str();
        let lines = match &self.detail {
            VoucherDetail::Payment(p) => vec![
                EntryDraft::debit(p.party_account_id.clone(), p.amount.clone(), narration),
                EntryDraft::credit(p.bank.gl_account_id.clone(), p.amount.clone(), narration),
            ],
            VoucherDetail::Receipt(r) => vec![
                EntryDraft::debit(r.bank.gl_account_id.clone(), r.amount.clone(), narration),
                EntryDraft::credit(r.from_account_id.clone(), r.amount.clone(), narration),
            ],
            VoucherDetail::Journal(j) => j
                .lines
                .iter()
                .map(|line| EntryDraft {
                    account_id: line.account_id.clone(),
                    debit: line.debit.clone(),
                    credit: line.credit.clone(),
                    narration: line.narration.clone().unwrap_or_else(|| narration.to_string()),
                })
                .collect(),
            // A credit note reduces the party's receivable: the note value
            // and its VAT component each get their own row so the tax is
            // traceable, and the party side carries the gross.
            VoucherDetail::CreditNote(n) => {
                let mut lines = vec![EntryDraft::debit(
                    n.contra_account_id.clone(),
                    n.amount.clone(),
                    narration,
                )];
                let mut gross = n.amount.clone();
                if let Some(vat) = &n.vat {
                    lines.push(EntryDraft::debit(
                        vat.account_id.clone(),
                        vat.amount.clone(),
                        narration,
                    ));
                    gross += &vat.amount;
                }
                lines.push(EntryDraft::credit(
                    n.party_account_id.clone(),
                    gross,
                    narration,
                ));
                lines
            }
            // A debit note increases the receivable: mirror image
            VoucherDetail::DebitNote(n) => {
                let mut gross = n.amount.clone();
                if let Some(vat) = &n.vat {
                    gross += &vat.amount;
                }
                let mut lines = vec![EntryDraft::debit(
                    n.party_account_id.clone(),
                    gross,
                    narration,
                )];
                lines.push(EntryDraft::credit(
                    n.contra_account_id.clone(),
                    n.amount.clone(),
                    narration,
                ));
                if let Some(vat) = &n.vat {
                    lines.push(EntryDraft::credit(
                        vat.account_id.clone(),
                        vat.amount.clone(),
                        narration,
                    ));
                }
                lines
            }
            VoucherDetail::Transfer(t) => vec![
                EntryDraft::debit(t.to_bank.gl_account_id.clone(), t.amount.clone(), narration),
                EntryDraft::credit(t.from_bank.gl_account_id.clone(), t.amount.clone(), narration),
            ],
        };
        Ok(lines)
    }
}
