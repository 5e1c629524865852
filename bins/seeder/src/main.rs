//! Database seeder for partner ledger development.
//!
//! Seeds a demo partner, the accounts and journals it posts to, and a few
//! months of invoices, bills and payments, then prints a session token for
//! the demo partner.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use portal_ledger_db::entities::{
    accounts, journals, move_lines, moves, partners, sea_orm_active_enums::LedgerAccountType,
};
use portal_ledger_shared::types::{PartnerId, UserId};
use portal_ledger_shared::{AppConfig, JwtConfig, JwtService};

const DEMO_PARTNER_ID: Uuid = Uuid::from_u128(1);
const DEMO_USER_ID: Uuid = Uuid::from_u128(2);

const RECEIVABLE_ID: Uuid = Uuid::from_u128(0x0101);
const PAYABLE_ID: Uuid = Uuid::from_u128(0x0102);
const SALES_ID: Uuid = Uuid::from_u128(0x0103);
const EXPENSES_ID: Uuid = Uuid::from_u128(0x0104);
const BANK_ID: Uuid = Uuid::from_u128(0x0105);

const INVOICES_JOURNAL_ID: Uuid = Uuid::from_u128(0x0201);
const BILLS_JOURNAL_ID: Uuid = Uuid::from_u128(0x0202);
const BANK_JOURNAL_ID: Uuid = Uuid::from_u128(0x0203);

/// A demo move: the partner line and its counterpart.
struct DemoMove {
    name: &'static str,
    days_ago: i64,
    journal_id: Uuid,
    reference: Option<&'static str>,
    partner_account: Uuid,
    counterpart_account: Uuid,
    label: &'static str,
    /// Positive debits the partner line, negative credits it.
    amount: Decimal,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = portal_ledger_db::connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    if partners::Entity::find_by_id(DEMO_PARTNER_ID)
        .one(&db)
        .await?
        .is_some()
    {
        println!("  Demo partner already exists, skipping data...");
    } else {
        println!("Seeding partner...");
        seed_partner(&db).await?;

        println!("Seeding accounts and journals...");
        seed_accounts(&db).await?;
        seed_journals(&db).await?;

        println!("Seeding moves...");
        let count = seed_moves(&db).await?;
        println!("  Inserted {count} moves");
    }

    let jwt_service = JwtService::new(JwtConfig {
        secret: config.session.jwt_secret.clone(),
        token_expires_secs: i64::try_from(config.session.token_expiry_secs)
            .context("session.token_expiry_secs is out of range")?,
    });
    let token = jwt_service.generate_session_token(
        UserId::from_uuid(DEMO_USER_ID),
        PartnerId::from_uuid(DEMO_PARTNER_ID),
        Some(config.portal.default_lang.as_str()),
    )?;

    println!("Seeding complete!");
    println!("Session token for the demo partner:");
    println!("{token}");

    Ok(())
}

async fn seed_partner(db: &DatabaseConnection) -> anyhow::Result<()> {
    partners::ActiveModel {
        id: Set(DEMO_PARTNER_ID),
        name: Set("Deco Addict".to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;

    println!("  Created partner: Deco Addict");
    Ok(())
}

async fn seed_accounts(db: &DatabaseConnection) -> anyhow::Result<()> {
    let data = [
        (RECEIVABLE_ID, "121000", "Account Receivable", LedgerAccountType::Receivable),
        (PAYABLE_ID, "211000", "Account Payable", LedgerAccountType::Payable),
        (SALES_ID, "400000", "Product Sales", LedgerAccountType::Other),
        (EXPENSES_ID, "600000", "Expenses", LedgerAccountType::Other),
        (BANK_ID, "101401", "Bank", LedgerAccountType::Other),
    ];

    for (id, code, name, account_type) in data {
        accounts::ActiveModel {
            id: Set(id),
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            account_type: Set(account_type),
        }
        .insert(db)
        .await?;
    }

    println!("  Inserted {} accounts", data.len());
    Ok(())
}

async fn seed_journals(db: &DatabaseConnection) -> anyhow::Result<()> {
    let data = [
        (INVOICES_JOURNAL_ID, "INV", "Customer Invoices"),
        (BILLS_JOURNAL_ID, "BILL", "Vendor Bills"),
        (BANK_JOURNAL_ID, "BNK1", "Bank"),
    ];

    for (id, code, name) in data {
        journals::ActiveModel {
            id: Set(id),
            code: Set(code.to_string()),
            name: Set(name.to_string()),
        }
        .insert(db)
        .await?;
    }

    println!("  Inserted {} journals", data.len());
    Ok(())
}

fn demo_moves() -> Vec<DemoMove> {
    let invoice = |name, days_ago, reference, label, cents| DemoMove {
        name,
        days_ago,
        journal_id: INVOICES_JOURNAL_ID,
        reference: Some(reference),
        partner_account: RECEIVABLE_ID,
        counterpart_account: SALES_ID,
        label,
        amount: Decimal::new(cents, 2),
    };
    let payment = |name, days_ago, label, cents: i64| DemoMove {
        name,
        days_ago,
        journal_id: BANK_JOURNAL_ID,
        reference: None,
        partner_account: RECEIVABLE_ID,
        counterpart_account: BANK_ID,
        label,
        amount: Decimal::new(-cents, 2),
    };
    let bill = |name, days_ago, reference, label, cents: i64| DemoMove {
        name,
        days_ago,
        journal_id: BILLS_JOURNAL_ID,
        reference: Some(reference),
        partner_account: PAYABLE_ID,
        counterpart_account: EXPENSES_ID,
        label,
        amount: Decimal::new(-cents, 2),
    };

    vec![
        invoice("INV/0001", 120, "SO-1001", "Office chairs", 1_250_000),
        payment("BNK1/0001", 105, "Payment INV/0001", 1_250_000),
        invoice("INV/0002", 90, "SO-1014", "Desk lamps", 48_000),
        bill("BILL/0001", 80, "PO-552", "Showroom rental", 150_000),
        invoice("INV/0003", 60, "SO-1020", "Conference table", 325_050),
        payment("BNK1/0002", 45, "Partial payment INV/0003", 200_000),
        invoice("INV/0004", 20, "SO-1033", "Storage cabinets", 87_500),
        invoice("INV/0005", 5, "SO-1040", "Acoustic panels", 64_000),
    ]
}

fn line(
    move_id: Uuid,
    account_id: Uuid,
    partner_id: Option<Uuid>,
    label: &str,
    amount: Decimal,
    sequence: i32,
) -> move_lines::ActiveModel {
    let (debit, credit) = if amount.is_sign_negative() {
        (Decimal::ZERO, -amount)
    } else {
        (amount, Decimal::ZERO)
    };

    move_lines::ActiveModel {
        id: Set(Uuid::now_v7()),
        move_id: Set(move_id),
        account_id: Set(account_id),
        partner_id: Set(partner_id),
        label: Set(Some(label.to_string())),
        debit: Set(debit),
        credit: Set(credit),
        sequence: Set(sequence),
        // balance is generated by the database
        ..Default::default()
    }
}

async fn seed_moves(db: &DatabaseConnection) -> anyhow::Result<usize> {
    let today: NaiveDate = Utc::now().date_naive();
    let demo = demo_moves();

    for m in &demo {
        let move_id = Uuid::now_v7();
        moves::ActiveModel {
            id: Set(move_id),
            name: Set(m.name.to_string()),
            date: Set(today - Duration::days(m.days_ago)),
            journal_id: Set(m.journal_id),
            reference: Set(m.reference.map(ToString::to_string)),
            created_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await?;

        line(move_id, m.partner_account, Some(DEMO_PARTNER_ID), m.label, m.amount, 1)
            .insert(db)
            .await?;
        line(move_id, m.counterpart_account, None, m.label, -m.amount, 2)
            .insert(db)
            .await?;
    }

    Ok(demo.len())
}
