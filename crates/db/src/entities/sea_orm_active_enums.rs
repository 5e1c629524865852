//! Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `ledger_account_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ledger_account_type")]
pub enum LedgerAccountType {
    /// Trade receivable.
    #[sea_orm(string_value = "receivable")]
    Receivable,
    /// Trade payable.
    #[sea_orm(string_value = "payable")]
    Payable,
    /// Any other account.
    #[sea_orm(string_value = "other")]
    Other,
}

impl LedgerAccountType {
    /// Account types that appear on a partner ledger.
    pub const PARTNER_LEDGER: [Self; 2] = [Self::Receivable, Self::Payable];
}
