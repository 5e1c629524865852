//! Ledger repository for partner ledger queries.
//!
//! Implements [`LedgerStore`] on PostgreSQL. Every query starts from
//! [`scoped_lines`], which joins accounts and moves and restricts lines to
//! one partner's receivable and payable accounts.

use async_trait::async_trait;
use chrono::NaiveDate;
use portal_ledger_core::ledger::{
    LedgerEntry, LedgerError, LedgerFilter, LedgerStore, OpeningScope, Partner,
    TransactionDetail, TransactionLine,
};
use portal_ledger_shared::types::{LedgerEntryId, MoveId, PartnerId};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use tracing::{debug, error};
use uuid::Uuid;

use crate::entities::{
    accounts, journals, languages, move_lines, moves, partners,
    sea_orm_active_enums::LedgerAccountType,
};

/// Ledger line joined with its move, as selected by [`LedgerRepository::search_entries`].
#[derive(Debug, Clone, FromQueryResult)]
struct LedgerLineRow {
    id: Uuid,
    move_id: Uuid,
    date: NaiveDate,
    move_name: String,
    label: Option<String>,
    debit: Decimal,
    credit: Decimal,
    balance: Decimal,
}

impl From<LedgerLineRow> for LedgerEntry {
    fn from(row: LedgerLineRow) -> Self {
        Self {
            id: LedgerEntryId::from_uuid(row.id),
            move_id: MoveId::from_uuid(row.move_id),
            date: row.date,
            move_reference: row.move_name,
            label: row.label,
            debit: row.debit,
            credit: row.credit,
            balance: row.balance,
        }
    }
}

/// Ledger repository backed by SeaORM.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Lines of one partner on receivable/payable accounts, joined with their
/// account and move.
fn scoped_lines(partner_id: PartnerId) -> Select<move_lines::Entity> {
    move_lines::Entity::find()
        .join(JoinType::InnerJoin, move_lines::Relation::Accounts.def())
        .join(JoinType::InnerJoin, move_lines::Relation::Moves.def())
        .filter(move_lines::Column::PartnerId.eq(partner_id.into_inner()))
        .filter(accounts::Column::AccountType.is_in(LedgerAccountType::PARTNER_LEDGER))
}

/// Case-insensitive substring match on the line label or the move name.
fn search_condition(term: &str) -> Condition {
    let pattern = like_pattern(term);
    Condition::any()
        .add(
            Expr::expr(Func::lower(Expr::col((
                move_lines::Entity,
                move_lines::Column::Label,
            ))))
            .like(pattern.clone()),
        )
        .add(
            Expr::expr(Func::lower(Expr::col((moves::Entity, moves::Column::Name))))
                .like(pattern),
        )
}

/// Builds a lowercase `%term%` pattern with LIKE wildcards escaped.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn with_search(
    query: Select<move_lines::Entity>,
    term: Option<&str>,
) -> Select<move_lines::Entity> {
    match term {
        Some(term) => query.filter(search_condition(term)),
        None => query,
    }
}

fn store_error(err: DbErr) -> LedgerError {
    error!(error = %err, "Ledger store query failed");
    LedgerError::Store(err.to_string())
}

#[async_trait]
impl LedgerStore for LedgerRepository {
    async fn find_partner(&self, partner_id: PartnerId) -> Result<Option<Partner>, LedgerError> {
        let partner = partners::Entity::find_by_id(partner_id.into_inner())
            .one(&self.db)
            .await
            .map_err(store_error)?;

        Ok(partner.map(|p| Partner {
            id: PartnerId::from_uuid(p.id),
            name: p.name,
        }))
    }

    async fn date_format(&self, lang: &str) -> Result<Option<String>, LedgerError> {
        let language = languages::Entity::find_by_id(lang.to_string())
            .one(&self.db)
            .await
            .map_err(store_error)?;

        Ok(language.map(|l| l.date_format))
    }

    async fn search_entries(&self, filter: &LedgerFilter) -> Result<Vec<LedgerEntry>, LedgerError> {
        let mut query = with_search(scoped_lines(filter.partner_id), filter.search_term.as_deref());
        if let Some(from) = filter.date_from {
            query = query.filter(moves::Column::Date.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(moves::Column::Date.lte(to));
        }

        let rows = query
            .select_only()
            .column(move_lines::Column::Id)
            .column(move_lines::Column::MoveId)
            .column(moves::Column::Date)
            .column_as(moves::Column::Name, "move_name")
            .column(move_lines::Column::Label)
            .column(move_lines::Column::Debit)
            .column(move_lines::Column::Credit)
            .column(move_lines::Column::Balance)
            .order_by_asc(moves::Column::Date)
            .order_by_asc(move_lines::Column::Id)
            .into_model::<LedgerLineRow>()
            .all(&self.db)
            .await
            .map_err(store_error)?;

        debug!(partner_id = %filter.partner_id, count = rows.len(), "Ledger lines loaded");

        Ok(rows.into_iter().map(LedgerEntry::from).collect())
    }

    async fn opening_balance(&self, scope: OpeningScope<'_>) -> Result<Decimal, LedgerError> {
        let totals: Option<(Option<Decimal>, Option<Decimal>)> = with_search(
            scoped_lines(scope.filter.partner_id),
            scope.filter.search_term.as_deref(),
        )
        .filter(moves::Column::Date.lt(scope.before))
        .select_only()
        .column_as(
            Expr::col((move_lines::Entity, move_lines::Column::Debit)).sum(),
            "total_debit",
        )
        .column_as(
            Expr::col((move_lines::Entity, move_lines::Column::Credit)).sum(),
            "total_credit",
        )
        .into_tuple()
        .one(&self.db)
        .await
        .map_err(store_error)?;

        let (debit, credit) = totals.unwrap_or_default();
        Ok(debit.unwrap_or_default() - credit.unwrap_or_default())
    }

    async fn count_entries(&self, partner_id: PartnerId) -> Result<u64, LedgerError> {
        scoped_lines(partner_id)
            .count(&self.db)
            .await
            .map_err(store_error)
    }

    async fn find_transaction(
        &self,
        partner_id: PartnerId,
        entry_id: LedgerEntryId,
    ) -> Result<Option<TransactionDetail>, LedgerError> {
        let Some(line) = scoped_lines(partner_id)
            .filter(move_lines::Column::Id.eq(entry_id.into_inner()))
            .one(&self.db)
            .await
            .map_err(store_error)?
        else {
            return Ok(None);
        };

        let Some((mv, journal)) = moves::Entity::find_by_id(line.move_id)
            .find_also_related(journals::Entity)
            .one(&self.db)
            .await
            .map_err(store_error)?
        else {
            return Ok(None);
        };

        let lines = move_lines::Entity::find()
            .filter(move_lines::Column::MoveId.eq(mv.id))
            .find_also_related(accounts::Entity)
            .order_by_asc(move_lines::Column::Sequence)
            .order_by_asc(move_lines::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_error)?;

        Ok(Some(TransactionDetail {
            move_id: MoveId::from_uuid(mv.id),
            name: mv.name,
            date: mv.date,
            journal: journal.map(|j| j.name).unwrap_or_default(),
            reference: mv.reference,
            lines: lines
                .into_iter()
                .map(|(l, account)| TransactionLine {
                    account_name: account.map(|a| a.name).unwrap_or_default(),
                    label: l.label,
                    debit: l.debit,
                    credit: l.credit,
                })
                .collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("INV", "%inv%")]
    #[case("  Payment", "%  payment%")]
    #[case("50%", "%50\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("c:\\tmp", "%c:\\\\tmp%")]
    fn test_like_pattern_escapes_wildcards(#[case] term: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(term), expected);
    }

    #[test]
    fn test_row_converts_to_entry() {
        let id = Uuid::new_v4();
        let row = LedgerLineRow {
            id,
            move_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            move_name: "INV/2024/0001".to_string(),
            label: None,
            debit: Decimal::new(10000, 2),
            credit: Decimal::ZERO,
            balance: Decimal::new(10000, 2),
        };

        let entry = LedgerEntry::from(row);
        assert_eq!(entry.id.into_inner(), id);
        assert_eq!(entry.move_reference, "INV/2024/0001");
        assert_eq!(entry.net(), Decimal::new(100, 0));
    }
}
