//! Integration tests for retail-ledger

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use retail_ledger::{
    Account, AccountType, BankRef, Cheque, ChequeStatus, JournalLine, Ledger, LedgerError,
    LedgerStorage, MemoryStorage, NoteDetail, NoteStatus, PartnerRef, PartnerType, PaymentDetail,
    ReceiptDetail, SoaReportType, TransferDetail, VatSplit, Voucher, VoucherKind,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn amount(n: i64) -> BigDecimal {
    BigDecimal::from(n)
}

struct Fixture {
    ledger: Ledger<MemoryStorage>,
    storage: MemoryStorage,
    accounts: HashMap<String, Account>,
    hdfc: BankRef,
}

async fn setup() -> Fixture {
    let storage = MemoryStorage::new();
    let mut ledger = Ledger::new(storage.clone());
    let accounts = ledger.setup_standard_chart_of_accounts().await.unwrap();
    let hdfc = BankRef {
        id: "bank-hdfc".to_string(),
        name: "HDFC".to_string(),
        gl_account_id: accounts["bank_cash"].id.clone(),
    };
    Fixture {
        ledger,
        storage,
        accounts,
        hdfc,
    }
}

fn payment(fx: &Fixture, on: NaiveDate, partner: &str, value: i64) -> Voucher {
    Voucher::payment(
        on,
        "Supplier settlement",
        "tester",
        PaymentDetail {
            party_account_id: fx.accounts["accounts_payable"].id.clone(),
            partner: PartnerRef::vendor(partner),
            bank: fx.hdfc.clone(),
            amount: amount(value),
            cheque: None,
        },
    )
}

fn receipt(fx: &Fixture, on: NaiveDate, partner: &str, value: i64) -> Voucher {
    Voucher::receipt(
        on,
        "Customer collection",
        "tester",
        ReceiptDetail {
            from_account_id: fx.accounts["accounts_receivable"].id.clone(),
            partner: PartnerRef::customer(partner),
            bank: fx.hdfc.clone(),
            amount: amount(value),
            cheque: None,
        },
    )
}

#[tokio::test]
async fn payment_posts_balanced_rows() {
    let mut fx = setup().await;

    let posted = fx
        .ledger
        .post_voucher(payment(&fx, date(2025, 1, 10), "Acme Traders", 500))
        .await
        .unwrap();

    assert_eq!(posted.entries.len(), 2);
    let payable = &fx.accounts["accounts_payable"];
    let cash = &fx.accounts["bank_cash"];

    let debit_row = posted
        .entries
        .iter()
        .find(|e| e.account_id == payable.id)
        .unwrap();
    assert_eq!(debit_row.debit, amount(500));
    assert_eq!(debit_row.credit, amount(0));

    let credit_row = posted
        .entries
        .iter()
        .find(|e| e.account_id == cash.id)
        .unwrap();
    assert_eq!(credit_row.credit, amount(500));
    assert_eq!(credit_row.debit, amount(0));

    let tb = fx.ledger.trial_balance(None, None).await.unwrap();
    assert_eq!(tb.difference, amount(0));
}

#[tokio::test]
async fn imbalanced_journal_writes_nothing() {
    let mut fx = setup().await;

    let voucher = Voucher::journal(
        date(2025, 1, 10),
        "Broken adjustment",
        "tester",
        vec![
            JournalLine::debit(fx.accounts["owners_equity"].id.clone(), amount(100)),
            JournalLine::credit(fx.accounts["sales_revenue"].id.clone(), amount(60)),
        ],
    );

    let err = fx.ledger.post_voucher(voucher).await.unwrap_err();
    assert!(matches!(
        err,
        LedgerError::ImbalancedVoucher { debits, credits }
            if debits == amount(100) && credits == amount(60)
    ));
    assert_eq!(fx.storage.entry_count(), 0);
}

#[tokio::test]
async fn summary_reconstructs_opening_balance() {
    let mut fx = setup().await;
    let cash_id = fx.accounts["bank_cash"].id.clone();

    // Opening position established before the reporting window
    let opening = Voucher::journal(
        date(2024, 12, 15),
        "Opening balance",
        "tester",
        vec![
            JournalLine::debit(cash_id.clone(), amount(1000)),
            JournalLine::credit(fx.accounts["owners_equity"].id.clone(), amount(1000)),
        ],
    );
    fx.ledger.post_voucher(opening).await.unwrap();

    fx.ledger
        .post_voucher(receipt(&fx, date(2025, 1, 15), "Retail Mart", 200))
        .await
        .unwrap();
    fx.ledger
        .post_voucher(payment(&fx, date(2025, 1, 20), "Acme Traders", 50))
        .await
        .unwrap();

    let summary = fx
        .ledger
        .account_summary(&cash_id, Some(date(2025, 1, 1)), Some(date(2025, 1, 31)))
        .await
        .unwrap();

    assert_eq!(summary.opening_balance, amount(1000));
    assert_eq!(summary.total_debit, amount(200));
    assert_eq!(summary.total_credit, amount(50));
    assert_eq!(summary.closing_balance, amount(1150));

    // closing = opening + debits - credits, and the running walk
    // lands on the same number
    assert_eq!(
        summary.entries.last().unwrap().running_balance,
        summary.closing_balance
    );
}

#[tokio::test]
async fn vendor_ageing_buckets_payment() {
    let mut fx = setup().await;

    // 45 days before the as-on date
    fx.ledger
        .post_voucher(payment(&fx, date(2025, 1, 15), "Acme Traders", 300))
        .await
        .unwrap();

    let ageing = fx
        .ledger
        .ageing_summary(PartnerType::Vendor, date(2025, 3, 1))
        .await
        .unwrap();

    assert_eq!(ageing.partners.len(), 1);
    let partner = &ageing.partners[0];
    assert_eq!(partner.partner, "Acme Traders");
    assert_eq!(partner.balance, amount(-300));
    assert_eq!(partner.buckets.days_31_60, amount(-300));
    assert_eq!(partner.buckets.current, amount(0));
    assert_eq!(partner.buckets.days_61_90, amount(0));
    assert_eq!(partner.buckets.days_91_plus, amount(0));
}

#[tokio::test]
async fn delete_restores_prior_balances() {
    let mut fx = setup().await;
    let payable_id = fx.accounts["accounts_payable"].id.clone();
    let cash_id = fx.accounts["bank_cash"].id.clone();

    // Unrelated voucher that must survive the delete untouched
    let survivor = fx
        .ledger
        .post_voucher(receipt(&fx, date(2025, 1, 5), "Retail Mart", 700))
        .await
        .unwrap();

    let before_payable = fx
        .ledger
        .account_summary(&payable_id, None, None)
        .await
        .unwrap();
    let before_cash = fx.ledger.account_summary(&cash_id, None, None).await.unwrap();
    let rows_before = fx.storage.entry_count();

    let posted = fx
        .ledger
        .post_voucher(payment(&fx, date(2025, 1, 10), "Acme Traders", 500))
        .await
        .unwrap();

    fx.ledger
        .delete_voucher(&posted.voucher.id, VoucherKind::Payment)
        .await
        .unwrap();

    let after_payable = fx
        .ledger
        .account_summary(&payable_id, None, None)
        .await
        .unwrap();
    let after_cash = fx.ledger.account_summary(&cash_id, None, None).await.unwrap();

    // Exactly the deleted voucher's rows are gone
    assert_eq!(fx.storage.entry_count(), rows_before);
    assert!(fx
        .storage
        .entries_for_voucher(&posted.voucher.id, VoucherKind::Payment)
        .await
        .unwrap()
        .is_empty());
    let survivor_rows = fx
        .storage
        .entries_for_voucher(&survivor.voucher.id, VoucherKind::Receipt)
        .await
        .unwrap();
    assert_eq!(survivor_rows.len(), 2);
    assert_eq!(after_payable.closing_balance, before_payable.closing_balance);
    assert_eq!(after_cash.closing_balance, before_cash.closing_balance);

    let tb = fx.ledger.trial_balance(None, None).await.unwrap();
    assert_eq!(tb.difference, amount(0));
}

#[tokio::test]
async fn global_balance_holds_across_all_voucher_kinds() {
    let mut fx = setup().await;

    // Second bank with its own GL account
    let current = fx
        .ledger
        .create_account(retail_ledger::NewAccount::new(
            "1002",
            "Bank Current",
            AccountType::Asset,
        ))
        .await
        .unwrap();
    let icici = BankRef {
        id: "bank-icici".to_string(),
        name: "ICICI".to_string(),
        gl_account_id: current.id.clone(),
    };

    fx.ledger
        .post_voucher(payment(&fx, date(2025, 2, 1), "Acme Traders", 500))
        .await
        .unwrap();
    fx.ledger
        .post_voucher(receipt(&fx, date(2025, 2, 3), "Retail Mart", 900))
        .await
        .unwrap();

    let journal = Voucher::journal(
        date(2025, 2, 5),
        "Freight accrual",
        "tester",
        vec![
            JournalLine::debit(fx.accounts["freight_expense"].id.clone(), amount(120)),
            JournalLine::credit(fx.accounts["accounts_payable"].id.clone(), amount(120)),
        ],
    );
    fx.ledger.post_voucher(journal).await.unwrap();

    let transfer = Voucher::transfer(
        date(2025, 2, 7),
        "Sweep to current account",
        "tester",
        TransferDetail {
            from_bank: fx.hdfc.clone(),
            to_bank: icici,
            amount: amount(250),
        },
    );
    fx.ledger.post_voucher(transfer).await.unwrap();

    let note = Voucher::credit_note(
        date(2025, 2, 9),
        "Goods returned",
        "tester",
        NoteDetail {
            party_account_id: fx.accounts["accounts_receivable"].id.clone(),
            contra_account_id: fx.accounts["sales_returns"].id.clone(),
            partner: PartnerRef::customer("Retail Mart"),
            amount: amount(80),
            vat: Some(VatSplit {
                account_id: fx.accounts["vat_payable"].id.clone(),
                amount: amount(4),
            }),
            status: NoteStatus::Draft,
        },
    );
    let draft = fx.ledger.post_voucher(note).await.unwrap();
    fx.ledger.confirm_note(&draft.voucher.id).await.unwrap();

    // Everything went through post_voucher, so the ledger nets to zero
    let tb = fx.ledger.trial_balance(None, None).await.unwrap();
    assert_eq!(tb.difference, amount(0));
    assert!(tb.total_debit > amount(0));
}

#[tokio::test]
async fn running_balances_are_deterministic_for_same_day_entries() {
    let mut fx = setup().await;
    let cash_id = fx.accounts["bank_cash"].id.clone();

    for value in [10, 20, 30] {
        fx.ledger
            .post_voucher(receipt(&fx, date(2025, 3, 5), "Retail Mart", value))
            .await
            .unwrap();
    }

    let first = fx.ledger.account_summary(&cash_id, None, None).await.unwrap();
    let second = fx.ledger.account_summary(&cash_id, None, None).await.unwrap();

    let balances: Vec<BigDecimal> = first
        .entries
        .iter()
        .map(|e| e.running_balance.clone())
        .collect();
    assert_eq!(balances, vec![amount(10), amount(30), amount(60)]);
    assert_eq!(first, second);
}

#[tokio::test]
async fn draft_note_posts_nothing_until_confirmed() {
    let mut fx = setup().await;

    let note = Voucher::credit_note(
        date(2025, 2, 9),
        "Goods returned",
        "tester",
        NoteDetail {
            party_account_id: fx.accounts["accounts_receivable"].id.clone(),
            contra_account_id: fx.accounts["sales_returns"].id.clone(),
            partner: PartnerRef::customer("Retail Mart"),
            amount: amount(100),
            vat: Some(VatSplit {
                account_id: fx.accounts["vat_payable"].id.clone(),
                amount: amount(5),
            }),
            status: NoteStatus::Draft,
        },
    );

    let draft = fx.ledger.post_voucher(note).await.unwrap();
    assert!(draft.entries.is_empty());
    assert_eq!(fx.storage.entry_count(), 0);

    let confirmed = fx.ledger.confirm_note(&draft.voucher.id).await.unwrap();
    assert_eq!(confirmed.entries.len(), 3);
    assert_eq!(fx.storage.entry_count(), 3);

    // The receivable was credited with the gross amount
    let ar = fx
        .ledger
        .account_summary(&fx.accounts["accounts_receivable"].id, None, None)
        .await
        .unwrap();
    assert_eq!(ar.closing_balance, amount(-105));

    // Draft -> Confirmed is terminal
    assert!(matches!(
        fx.ledger.confirm_note(&draft.voucher.id).await,
        Err(LedgerError::AlreadyConfirmed(_))
    ));
}

#[tokio::test]
async fn confirm_rejects_non_note_vouchers() {
    let mut fx = setup().await;

    let posted = fx
        .ledger
        .post_voucher(payment(&fx, date(2025, 1, 10), "Acme Traders", 500))
        .await
        .unwrap();

    assert!(matches!(
        fx.ledger.confirm_note(&posted.voucher.id).await,
        Err(LedgerError::Validation(_))
    ));
}

#[tokio::test]
async fn payment_with_unknown_bank_account_writes_nothing() {
    let mut fx = setup().await;

    let voucher = Voucher::payment(
        date(2025, 1, 10),
        "Supplier settlement",
        "tester",
        PaymentDetail {
            party_account_id: fx.accounts["accounts_payable"].id.clone(),
            partner: PartnerRef::vendor("Acme Traders"),
            bank: BankRef {
                id: "bank-ghost".to_string(),
                name: "Ghost Bank".to_string(),
                gl_account_id: "no-such-account".to_string(),
            },
            amount: amount(500),
            cheque: None,
        },
    );

    assert!(matches!(
        fx.ledger.post_voucher(voucher).await,
        Err(LedgerError::InvalidReference(_))
    ));
    assert_eq!(fx.storage.entry_count(), 0);
}

#[tokio::test]
async fn same_bank_transfer_is_rejected() {
    let mut fx = setup().await;

    let transfer = Voucher::transfer(
        date(2025, 2, 7),
        "Pointless sweep",
        "tester",
        TransferDetail {
            from_bank: fx.hdfc.clone(),
            to_bank: fx.hdfc.clone(),
            amount: amount(250),
        },
    );

    assert!(matches!(
        fx.ledger.post_voucher(transfer).await,
        Err(LedgerError::InvalidTransfer)
    ));
}

#[tokio::test]
async fn day_book_unions_payments_receipts_and_journal_lines() {
    let mut fx = setup().await;

    fx.ledger
        .post_voucher(payment(&fx, date(2025, 2, 1), "Acme Traders", 500))
        .await
        .unwrap();
    fx.ledger
        .post_voucher(receipt(&fx, date(2025, 2, 3), "Retail Mart", 900))
        .await
        .unwrap();
    let journal = Voucher::journal(
        date(2025, 2, 2),
        "Freight accrual",
        "tester",
        vec![
            JournalLine::debit(fx.accounts["freight_expense"].id.clone(), amount(120)),
            JournalLine::credit(fx.accounts["accounts_payable"].id.clone(), amount(120)),
        ],
    );
    fx.ledger.post_voucher(journal).await.unwrap();

    let book = fx
        .ledger
        .day_book(date(2025, 2, 1), date(2025, 2, 28))
        .await
        .unwrap();

    assert_eq!(book.entries.len(), 4);
    // Date-ascending: payment, then the two journal lines, then the receipt
    assert_eq!(book.entries[0].kind, VoucherKind::Payment);
    assert_eq!(book.entries[1].kind, VoucherKind::Journal);
    assert_eq!(book.entries[3].kind, VoucherKind::Receipt);
    assert_eq!(book.total_debit, amount(620));
    assert_eq!(book.total_credit, amount(1020));
    assert_eq!(book.difference, amount(-400));
}

#[tokio::test]
async fn cash_flow_buckets_by_bank_and_adjustment() {
    let mut fx = setup().await;

    fx.ledger
        .post_voucher(payment(&fx, date(2025, 2, 1), "Acme Traders", 500))
        .await
        .unwrap();
    fx.ledger
        .post_voucher(receipt(&fx, date(2025, 2, 3), "Retail Mart", 900))
        .await
        .unwrap();
    let journal = Voucher::journal(
        date(2025, 2, 2),
        "Rounding adjustment",
        "tester",
        vec![
            JournalLine::debit(fx.accounts["freight_expense"].id.clone(), amount(30)),
            JournalLine::credit(fx.accounts["accounts_payable"].id.clone(), amount(30)),
        ],
    );
    fx.ledger.post_voucher(journal).await.unwrap();

    let flow = fx
        .ledger
        .cash_flow(date(2025, 2, 1), date(2025, 2, 28))
        .await
        .unwrap();

    assert_eq!(flow.opening_balance, amount(0));
    assert_eq!(flow.total_inflow, amount(930));
    assert_eq!(flow.total_outflow, amount(530));
    assert_eq!(flow.closing_balance, amount(400));

    let adjustment = flow
        .categories
        .iter()
        .find(|c| c.name == "Adjustment")
        .unwrap();
    assert_eq!(adjustment.net, amount(0));

    let hdfc = flow.categories.iter().find(|c| c.name == "HDFC").unwrap();
    assert_eq!(hdfc.inflow, amount(900));
    assert_eq!(hdfc.outflow, amount(500));
    assert_eq!(hdfc.net, amount(400));
}

#[tokio::test]
async fn statement_of_account_walks_running_balance() {
    let mut fx = setup().await;

    // Invoice before the window feeds the opening balance
    let early_invoice = Voucher::journal(
        date(2025, 1, 10),
        "Invoice INV-001",
        "tester",
        vec![
            JournalLine::debit(fx.accounts["accounts_receivable"].id.clone(), amount(400))
                .for_partner("Retail Mart"),
            JournalLine::credit(fx.accounts["sales_revenue"].id.clone(), amount(400)),
        ],
    );
    fx.ledger.post_voucher(early_invoice).await.unwrap();

    let invoice = Voucher::journal(
        date(2025, 2, 5),
        "Invoice INV-002",
        "tester",
        vec![
            JournalLine::debit(fx.accounts["accounts_receivable"].id.clone(), amount(600))
                .for_partner("Retail Mart"),
            JournalLine::credit(fx.accounts["sales_revenue"].id.clone(), amount(600)),
        ],
    );
    fx.ledger.post_voucher(invoice).await.unwrap();

    fx.ledger
        .post_voucher(receipt(&fx, date(2025, 2, 10), "Retail Mart", 500))
        .await
        .unwrap();

    let soa = fx
        .ledger
        .statement_of_account(
            "Retail Mart",
            PartnerType::Customer,
            date(2025, 2, 1),
            date(2025, 2, 28),
            SoaReportType::Detailed,
        )
        .await
        .unwrap();

    assert_eq!(soa.summary.opening_balance, amount(400));
    assert_eq!(soa.summary.invoiced_amount, amount(600));
    assert_eq!(soa.summary.amount_paid, amount(500));
    assert_eq!(soa.summary.closing_balance, amount(500));

    let txns = soa.transactions.unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0].balance, amount(1000));
    assert_eq!(txns[1].balance, amount(500));

    // Summary mode carries no transaction list
    let summary_only = fx
        .ledger
        .statement_of_account(
            "Retail Mart",
            PartnerType::Customer,
            date(2025, 2, 1),
            date(2025, 2, 28),
            SoaReportType::Summary,
        )
        .await
        .unwrap();
    assert!(summary_only.transactions.is_none());
    assert_eq!(summary_only.summary, soa.summary);
}

#[tokio::test]
async fn pdc_clearing_lifecycle() {
    let mut fx = setup().await;

    let detail = ReceiptDetail {
        from_account_id: fx.accounts["accounts_receivable"].id.clone(),
        partner: PartnerRef::customer("Retail Mart"),
        bank: fx.hdfc.clone(),
        amount: amount(350),
        cheque: Some(Cheque::pending("CHQ-1042", date(2025, 3, 15))),
    };

    let posted = fx
        .ledger
        .post_voucher(Voucher::receipt(
            date(2025, 3, 1),
            "Post-dated collection",
            "tester",
            detail,
        ))
        .await
        .unwrap();

    let pending = fx
        .ledger
        .pdc_list(Some(ChequeStatus::Pending), None, None)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].cheque_number, "CHQ-1042");
    assert_eq!(pending[0].cheque_date, date(2025, 3, 15));

    let cleared = fx
        .ledger
        .clear_bank_transaction(&posted.voucher.id, VoucherKind::Receipt, date(2025, 3, 18))
        .await
        .unwrap();
    assert_eq!(cleared.cheque().unwrap().status, ChequeStatus::Cleared);
    assert_eq!(cleared.cheque().unwrap().cleared_date, Some(date(2025, 3, 18)));

    assert!(fx
        .ledger
        .pdc_list(Some(ChequeStatus::Pending), None, None)
        .await
        .unwrap()
        .is_empty());

    // No transition out of Cleared
    assert!(matches!(
        fx.ledger
            .clear_bank_transaction(&posted.voucher.id, VoucherKind::Receipt, date(2025, 3, 19))
            .await,
        Err(LedgerError::Validation(_))
    ));
}

#[tokio::test]
async fn balance_sheet_and_profit_loss_split_account_types() {
    let mut fx = setup().await;

    // A sale on credit and a cost accrual
    let sale = Voucher::journal(
        date(2025, 4, 2),
        "Invoice INV-010",
        "tester",
        vec![
            JournalLine::debit(fx.accounts["accounts_receivable"].id.clone(), amount(1000))
                .for_partner("Retail Mart"),
            JournalLine::credit(fx.accounts["sales_revenue"].id.clone(), amount(1000)),
        ],
    );
    fx.ledger.post_voucher(sale).await.unwrap();

    let cost = Voucher::journal(
        date(2025, 4, 3),
        "COGS for INV-010",
        "tester",
        vec![
            JournalLine::debit(fx.accounts["cost_of_goods_sold"].id.clone(), amount(650)),
            JournalLine::credit(fx.accounts["inventory"].id.clone(), amount(650)),
        ],
    );
    fx.ledger.post_voucher(cost).await.unwrap();

    let pl = fx.ledger.profit_loss(None, None).await.unwrap();
    assert_eq!(pl.total_income, amount(1000));
    assert_eq!(pl.total_expense, amount(650));
    assert_eq!(pl.net_result, amount(350));
    assert_eq!(pl.net_type, retail_ledger::NetType::Profit);

    let bs = fx.ledger.balance_sheet(None, None).await.unwrap();
    // Receivable 1000, inventory -650
    assert_eq!(bs.total_debit, amount(350));
    assert!(bs.liabilities.is_empty());
    // The retained profit is the surfaced difference
    assert_eq!(bs.difference, amount(350));
}

#[tokio::test]
async fn report_output_round_trips_through_json() {
    let mut fx = setup().await;

    fx.ledger
        .post_voucher(payment(&fx, date(2025, 1, 10), "Acme Traders", 500))
        .await
        .unwrap();

    let tb = fx.ledger.trial_balance(None, None).await.unwrap();
    let json = serde_json::to_value(&tb).unwrap();
    let restored: retail_ledger::TrialBalance = serde_json::from_value(json).unwrap();
    assert_eq!(restored, tb);

    let summary = fx
        .ledger
        .account_summary(&fx.accounts["bank_cash"].id, None, None)
        .await
        .unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    let restored: retail_ledger::AccountSummary = serde_json::from_value(json).unwrap();
    assert_eq!(restored.closing_balance, summary.closing_balance);
    assert_eq!(restored.entries.len(), 1);
}

#[tokio::test]
async fn reports_reject_inverted_date_ranges() {
    let fx = setup().await;

    assert!(matches!(
        fx.ledger
            .day_book(date(2025, 2, 28), date(2025, 2, 1))
            .await,
        Err(LedgerError::InvalidDateRange { .. })
    ));
    assert!(matches!(
        fx.ledger
            .trial_balance(Some(date(2025, 2, 28)), Some(date(2025, 2, 1)))
            .await,
        Err(LedgerError::InvalidDateRange { .. })
    ));
}
