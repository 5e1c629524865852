//! Initial database migration.
//!
//! Creates the partner ledger schema: partners, languages, the chart of
//! accounts, journals, moves and move lines.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: REFERENCE TABLES
        // ============================================================
        db.execute_unprepared(PARTNERS_SQL).await?;
        db.execute_unprepared(LANGUAGES_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(JOURNALS_SQL).await?;

        // ============================================================
        // PART 3: MOVES & LINES
        // ============================================================
        db.execute_unprepared(MOVES_SQL).await?;
        db.execute_unprepared(MOVE_LINES_SQL).await?;

        // ============================================================
        // PART 4: SEED DATA
        // ============================================================
        db.execute_unprepared(SEED_LANGUAGES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Only receivable and payable accounts show up on a partner ledger
CREATE TYPE ledger_account_type AS ENUM ('receivable', 'payable', 'other');
";

const PARTNERS_SQL: &str = r"
CREATE TABLE partners (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const LANGUAGES_SQL: &str = r"
CREATE TABLE languages (
    code VARCHAR(16) PRIMARY KEY,
    name VARCHAR(64) NOT NULL,
    -- strftime pattern, e.g. %m/%d/%Y
    date_format VARCHAR(64) NOT NULL DEFAULT '%Y-%m-%d'
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(32) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    account_type ledger_account_type NOT NULL
);

CREATE INDEX idx_accounts_type ON accounts(account_type);
";

const JOURNALS_SQL: &str = r"
CREATE TABLE journals (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    code VARCHAR(16) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL
);
";

const MOVES_SQL: &str = r"
CREATE TABLE moves (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(64) NOT NULL,
    date DATE NOT NULL,
    journal_id UUID NOT NULL REFERENCES journals(id),
    reference VARCHAR(255),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_moves_date ON moves(date);
";

const MOVE_LINES_SQL: &str = r"
CREATE TABLE move_lines (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    move_id UUID NOT NULL REFERENCES moves(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    partner_id UUID REFERENCES partners(id),
    label VARCHAR(255),
    debit NUMERIC(19, 4) NOT NULL DEFAULT 0 CHECK (debit >= 0),
    credit NUMERIC(19, 4) NOT NULL DEFAULT 0 CHECK (credit >= 0),
    balance NUMERIC(19, 4) GENERATED ALWAYS AS (debit - credit) STORED,
    sequence INTEGER NOT NULL DEFAULT 10
);

CREATE INDEX idx_move_lines_partner ON move_lines(partner_id);
CREATE INDEX idx_move_lines_move ON move_lines(move_id, sequence);
";

const SEED_LANGUAGES_SQL: &str = r"
INSERT INTO languages (code, name, date_format) VALUES
    ('en_US', 'English (US)', '%m/%d/%Y'),
    ('en_GB', 'English (UK)', '%d/%m/%Y'),
    ('de_DE', 'German', '%d.%m.%Y'),
    ('fr_FR', 'French', '%d/%m/%Y');
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS move_lines CASCADE;
DROP TABLE IF EXISTS moves CASCADE;
DROP TABLE IF EXISTS journals CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
DROP TABLE IF EXISTS languages CASCADE;
DROP TABLE IF EXISTS partners CASCADE;

DROP TYPE IF EXISTS ledger_account_type CASCADE;
";
