//! End-to-end walkthrough of the retail ledger engine

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use retail_ledger::utils::MemoryStorage;
use retail_ledger::{
    BankRef, JournalLine, Ledger, NoteDetail, NoteStatus, PartnerRef, PartnerType, PaymentDetail,
    ReceiptDetail, SoaReportType, VatSplit, Voucher, VoucherKind,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Retail Ledger - End-to-End Example\n");

    // Create a new ledger with in-memory storage
    let storage = MemoryStorage::new();
    let mut ledger = Ledger::new(storage);

    // 1. Set up the chart of accounts
    println!("📊 Setting up Chart of Accounts...");
    let accounts = ledger.setup_standard_chart_of_accounts().await?;

    for account in accounts.values() {
        println!(
            "  ✓ Created account: {} - {} ({:?})",
            account.code, account.name, account.account_type
        );
    }
    println!();

    let hdfc = BankRef {
        id: "bank-hdfc".to_string(),
        name: "HDFC".to_string(),
        gl_account_id: accounts["bank_cash"].id.clone(),
    };

    // 2. Post some business vouchers
    println!("💰 Posting Vouchers...\n");

    // Opening capital
    let opening = Voucher::journal(
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        "Initial owner investment",
        "demo",
        vec![
            JournalLine::debit(accounts["bank_cash"].id.clone(), BigDecimal::from(50000)),
            JournalLine::credit(accounts["owners_equity"].id.clone(), BigDecimal::from(50000)),
        ],
    );
    ledger.post_voucher(opening).await?;
    println!("  ✓ Posted: Opening capital of ₹50,000");

    // Credit sale to a customer
    let sale = Voucher::journal(
        NaiveDate::from_ymd_opt(2025, 1, 8).unwrap(),
        "Invoice INV-001",
        "demo",
        vec![
            JournalLine::debit(
                accounts["accounts_receivable"].id.clone(),
                BigDecimal::from(12000),
            )
            .for_partner("Retail Mart"),
            JournalLine::credit(accounts["sales_revenue"].id.clone(), BigDecimal::from(12000)),
        ],
    );
    ledger.post_voucher(sale).await?;
    println!("  ✓ Posted: Credit sale of ₹12,000 to Retail Mart");

    // Customer pays part of the invoice
    let collection = Voucher::receipt(
        NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
        "Collection against INV-001",
        "demo",
        ReceiptDetail {
            from_account_id: accounts["accounts_receivable"].id.clone(),
            partner: PartnerRef::customer("Retail Mart"),
            bank: hdfc.clone(),
            amount: BigDecimal::from(8000),
            cheque: None,
        },
    );
    ledger.post_voucher(collection).await?;
    println!("  ✓ Posted: Receipt of ₹8,000 from Retail Mart");

    // Pay a supplier
    let settlement = Voucher::payment(
        NaiveDate::from_ymd_opt(2025, 1, 25).unwrap(),
        "Settlement of supplier bill",
        "demo",
        PaymentDetail {
            party_account_id: accounts["accounts_payable"].id.clone(),
            partner: PartnerRef::vendor("Acme Traders"),
            bank: hdfc.clone(),
            amount: BigDecimal::from(3000),
            cheque: None,
        },
    );
    let payment = ledger.post_voucher(settlement).await?;
    println!("  ✓ Posted: Payment of ₹3,000 to Acme Traders");

    // A return from the customer goes through a two-phase credit note
    let note = Voucher::credit_note(
        NaiveDate::from_ymd_opt(2025, 1, 28).unwrap(),
        "Return against INV-001",
        "demo",
        NoteDetail {
            party_account_id: accounts["accounts_receivable"].id.clone(),
            contra_account_id: accounts["sales_returns"].id.clone(),
            partner: PartnerRef::customer("Retail Mart"),
            amount: BigDecimal::from(1000),
            vat: Some(VatSplit {
                account_id: accounts["vat_payable"].id.clone(),
                amount: BigDecimal::from(50),
            }),
            status: NoteStatus::Draft,
        },
    );
    let draft = ledger.post_voucher(note).await?;
    println!(
        "  ✓ Created: Draft credit note ({} ledger rows so far)",
        draft.entries.len()
    );
    let confirmed = ledger.confirm_note(&draft.voucher.id).await?;
    println!(
        "  ✓ Confirmed: Credit note posted {} ledger rows",
        confirmed.entries.len()
    );

    // 3. Generate reports
    println!("\n📈 Generating Reports...\n");

    let trial_balance = ledger.trial_balance(None, None).await?;
    println!("🔍 Trial Balance:");
    println!("  Total Debits:  ₹{}", trial_balance.total_debit);
    println!("  Total Credits: ₹{}", trial_balance.total_credit);
    println!("  Difference:    ₹{}", trial_balance.difference);
    println!();

    let summary = ledger
        .account_summary(&accounts["bank_cash"].id, None, None)
        .await?;
    println!("🏦 Bank Cash ledger:");
    for line in &summary.entries {
        println!(
            "  {} | {:>8} dr | {:>8} cr | balance {:>8}",
            line.entry.date, line.entry.debit, line.entry.credit, line.running_balance
        );
    }
    println!("  Closing balance: ₹{}", summary.closing_balance);
    println!();

    let pl = ledger.profit_loss(None, None).await?;
    println!("💹 Profit & Loss:");
    println!("  Total Income:  ₹{}", pl.total_income);
    println!("  Total Expense: ₹{}", pl.total_expense);
    println!("  {:?}: ₹{}", pl.net_type, pl.net_result);
    println!();

    let book = ledger
        .day_book(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        )
        .await?;
    println!("📒 Day Book for January ({} lines)", book.entries.len());

    let ageing = ledger
        .ageing_summary(
            PartnerType::Customer,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        )
        .await?;
    println!("⏳ Customer ageing:");
    for partner in &ageing.partners {
        println!(
            "  {} | 0-30: {} | 31-60: {} | 61-90: {} | 91+: {} | balance {}",
            partner.partner,
            partner.buckets.current,
            partner.buckets.days_31_60,
            partner.buckets.days_61_90,
            partner.buckets.days_91_plus,
            partner.balance
        );
    }
    println!();

    let soa = ledger
        .statement_of_account(
            "Retail Mart",
            PartnerType::Customer,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            SoaReportType::Summary,
        )
        .await?;
    println!("📄 Statement of Account for Retail Mart:");
    println!("  Opening:  ₹{}", soa.summary.opening_balance);
    println!("  Invoiced: ₹{}", soa.summary.invoiced_amount);
    println!("  Paid:     ₹{}", soa.summary.amount_paid);
    println!("  Closing:  ₹{}", soa.summary.closing_balance);

    // 4. Delete a voucher and verify the ledger stays balanced
    println!("\n🗑  Deleting the supplier payment...");
    ledger
        .delete_voucher(&payment.voucher.id, VoucherKind::Payment)
        .await?;

    let report = ledger.validate_integrity(None, None).await?;
    if report.is_valid {
        println!("  ✅ Ledger integrity check passed!");
    } else {
        for issue in &report.issues {
            println!("  ❌ {}", issue);
        }
    }

    println!("\n🎉 Example completed successfully!");
    Ok(())
}
