//! Filter resolution for ledger queries.
//!
//! Raw request parameters are resolved leniently: a malformed date drops that
//! bound instead of failing the request, and an unknown grouping falls back
//! to no grouping.

use chrono::NaiveDate;
use portal_ledger_shared::types::PartnerId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::entry::{AccountType, LedgerEntry};

/// Wire format of the date inputs.
const PARAM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Grouping granularity applied to the entry list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// Single catch-all group.
    #[default]
    None,
    /// One group per calendar day.
    Day,
    /// One group per calendar month.
    Month,
    /// One group per calendar year.
    Year,
}

impl GroupBy {
    /// All variants, in the order the filter form lists them.
    pub const ALL: [Self; 4] = [Self::None, Self::Day, Self::Month, Self::Year];

    /// Parses a request value. Unknown values resolve to `None`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Self::None,
            "day" => Self::Day,
            "month" => Self::Month,
            "year" => Self::Year,
            other => {
                debug!(group_by = other, "Unknown grouping, falling back to none");
                Self::None
            }
        }
    }

    /// Returns the request value for this grouping.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Returns the label shown in the filter form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Day => "Day",
            Self::Month => "Month",
            Self::Year => "Year",
        }
    }
}

/// Unvalidated filter parameters, as they arrive in a query string or form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Lower date bound, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    /// Upper date bound, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    /// Free-text search on label or move name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    /// Grouping granularity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
}

/// A resolved ledger query.
///
/// Partner and account-type scoping are implicit: every store query built
/// from a filter is restricted to the partner and to receivable/payable
/// accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerFilter {
    /// Partner the ledger belongs to.
    pub partner_id: PartnerId,
    /// Inclusive lower date bound.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub date_to: Option<NaiveDate>,
    /// Trimmed, non-empty search term.
    pub search_term: Option<String>,
    /// Grouping granularity.
    pub group_by: GroupBy,
}

impl LedgerFilter {
    /// Creates an unfiltered query for a partner.
    #[must_use]
    pub const fn for_partner(partner_id: PartnerId) -> Self {
        Self {
            partner_id,
            date_from: None,
            date_to: None,
            search_term: None,
            group_by: GroupBy::None,
        }
    }

    /// Resolves raw parameters into a filter.
    #[must_use]
    pub fn resolve(partner_id: PartnerId, params: &FilterParams) -> Self {
        let date_from = parse_date_param("date_from", params.date_from.as_deref());
        let date_to = parse_date_param("date_to", params.date_to.as_deref());
        let search_term = params
            .search_term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(ToString::to_string);
        let group_by = params
            .group_by
            .as_deref()
            .map_or(GroupBy::None, GroupBy::parse);

        let filter = Self {
            partner_id,
            date_from,
            date_to,
            search_term,
            group_by,
        };

        info!(
            partner_id = %partner_id,
            date_from = ?filter.date_from,
            date_to = ?filter.date_to,
            search_term = ?filter.search_term,
            group_by = filter.group_by.as_str(),
            "Resolved ledger filter"
        );

        filter
    }

    /// Returns the parameters that reproduce this filter.
    ///
    /// Dropped bounds come back as absent, so forms and export links echo
    /// exactly what was applied.
    #[must_use]
    pub fn to_params(&self) -> FilterParams {
        FilterParams {
            date_from: self
                .date_from
                .map(|d| d.format(PARAM_DATE_FORMAT).to_string()),
            date_to: self.date_to.map(|d| d.format(PARAM_DATE_FORMAT).to_string()),
            search_term: self.search_term.clone(),
            group_by: Some(self.group_by.as_str().to_string()),
        }
    }

    /// Returns the same scope (partner, account type, search) restricted to
    /// dates strictly before `date_from`. Used for the opening balance.
    #[must_use]
    pub fn before_period(&self) -> Option<OpeningScope<'_>> {
        self.date_from.map(|before| OpeningScope {
            filter: self,
            before,
        })
    }

    /// Returns true if the search term matches the label or move name,
    /// ignoring case. No term matches everything.
    #[must_use]
    pub fn matches_search(&self, entry: &LedgerEntry) -> bool {
        let Some(term) = &self.search_term else {
            return true;
        };
        let term = term.to_lowercase();
        entry.label_or_empty().to_lowercase().contains(&term)
            || entry.move_reference.to_lowercase().contains(&term)
    }

    /// Returns true if the date lies within the bounds.
    #[must_use]
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        self.date_from.is_none_or(|from| date >= from) && self.date_to.is_none_or(|to| date <= to)
    }

    /// Full predicate for a store record.
    #[must_use]
    pub fn matches(
        &self,
        partner_id: PartnerId,
        account_type: AccountType,
        entry: &LedgerEntry,
    ) -> bool {
        partner_id == self.partner_id
            && account_type.is_partner_ledger()
            && self.matches_date(entry.date)
            && self.matches_search(entry)
    }
}

/// Entries of a filter's scope that precede its period.
#[derive(Debug, Clone, Copy)]
pub struct OpeningScope<'a> {
    /// The period filter.
    pub filter: &'a LedgerFilter,
    /// Exclusive upper date bound.
    pub before: NaiveDate,
}

impl OpeningScope<'_> {
    /// Full predicate for a store record.
    #[must_use]
    pub fn matches(
        &self,
        partner_id: PartnerId,
        account_type: AccountType,
        entry: &LedgerEntry,
    ) -> bool {
        partner_id == self.filter.partner_id
            && account_type.is_partner_ledger()
            && entry.date < self.before
            && self.filter.matches_search(entry)
    }
}

fn parse_date_param(name: &'static str, value: Option<&str>) -> Option<NaiveDate> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    match NaiveDate::parse_from_str(value, PARAM_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(param = name, value, error = %e, "Ignoring malformed date filter");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_ledger_shared::types::{LedgerEntryId, MoveId};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn params(date_from: &str, date_to: &str, search: &str, group_by: &str) -> FilterParams {
        let opt = |s: &str| Some(s.to_string());
        FilterParams {
            date_from: opt(date_from),
            date_to: opt(date_to),
            search_term: opt(search),
            group_by: opt(group_by),
        }
    }

    fn entry(date: &str, move_reference: &str, label: Option<&str>) -> LedgerEntry {
        LedgerEntry {
            id: LedgerEntryId::new(),
            move_id: MoveId::new(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            move_reference: move_reference.to_string(),
            label: label.map(ToString::to_string),
            debit: dec!(10),
            credit: dec!(0),
            balance: dec!(10),
        }
    }

    #[rstest]
    #[case("none", GroupBy::None)]
    #[case("day", GroupBy::Day)]
    #[case("MONTH", GroupBy::Month)]
    #[case(" year ", GroupBy::Year)]
    #[case("", GroupBy::None)]
    #[case("week", GroupBy::None)]
    #[case("quarter", GroupBy::None)]
    fn test_group_by_parse_is_total(#[case] raw: &str, #[case] expected: GroupBy) {
        assert_eq!(GroupBy::parse(raw), expected);
    }

    #[test]
    fn test_resolve_valid_params() {
        let partner = PartnerId::new();
        let filter = LedgerFilter::resolve(
            partner,
            &params("2024-01-01", "2024-12-31", "  inv ", "month"),
        );

        assert_eq!(filter.partner_id, partner);
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(filter.date_to, NaiveDate::from_ymd_opt(2024, 12, 31));
        assert_eq!(filter.search_term.as_deref(), Some("inv"));
        assert_eq!(filter.group_by, GroupBy::Month);
    }

    #[rstest]
    #[case("2024-13-01")]
    #[case("01/02/2024")]
    #[case("yesterday")]
    #[case("2024-02-30")]
    fn test_malformed_date_from_is_same_as_absent(#[case] raw: &str) {
        let partner = PartnerId::new();
        let malformed = LedgerFilter::resolve(partner, &params(raw, "", "", "none"));
        let absent = LedgerFilter::resolve(partner, &FilterParams::default());

        assert_eq!(malformed, absent);
    }

    #[test]
    fn test_blank_values_are_absent() {
        let filter = LedgerFilter::resolve(PartnerId::new(), &params(" ", "", "   ", ""));

        assert_eq!(filter.date_from, None);
        assert_eq!(filter.date_to, None);
        assert_eq!(filter.search_term, None);
        assert_eq!(filter.group_by, GroupBy::None);
    }

    #[test]
    fn test_to_params_echoes_applied_filter_only() {
        let filter = LedgerFilter::resolve(
            PartnerId::new(),
            &params("not-a-date", "2024-06-30", "Payment", "bogus"),
        );

        assert_eq!(
            filter.to_params(),
            FilterParams {
                date_from: None,
                date_to: Some("2024-06-30".to_string()),
                search_term: Some("Payment".to_string()),
                group_by: Some("none".to_string()),
            }
        );
    }

    #[test]
    fn test_search_matches_label_or_move_name_case_insensitively() {
        let mut filter = LedgerFilter::for_partner(PartnerId::new());
        filter.search_term = Some("inv/2024".to_string());

        assert!(filter.matches_search(&entry("2024-01-05", "INV/2024/0001", None)));
        assert!(filter.matches_search(&entry("2024-01-05", "BNK1/7", Some("Ref inv/2024/0001"))));
        assert!(!filter.matches_search(&entry("2024-01-05", "BNK1/7", Some("Payment"))));
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let mut filter = LedgerFilter::for_partner(PartnerId::new());
        filter.date_from = NaiveDate::from_ymd_opt(2024, 1, 5);
        filter.date_to = NaiveDate::from_ymd_opt(2024, 1, 10);

        assert!(filter.matches_date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()));
        assert!(filter.matches_date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()));
        assert!(!filter.matches_date(NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()));
        assert!(!filter.matches_date(NaiveDate::from_ymd_opt(2024, 1, 11).unwrap()));
    }

    #[test]
    fn test_matches_requires_partner_and_ledger_account() {
        let partner = PartnerId::new();
        let filter = LedgerFilter::for_partner(partner);
        let e = entry("2024-01-05", "INV/1", None);

        assert!(filter.matches(partner, AccountType::Receivable, &e));
        assert!(filter.matches(partner, AccountType::Payable, &e));
        assert!(!filter.matches(partner, AccountType::Other, &e));
        assert!(!filter.matches(PartnerId::new(), AccountType::Receivable, &e));
    }

    #[test]
    fn test_opening_scope_is_strictly_before_date_from() {
        let partner = PartnerId::new();
        let mut filter = LedgerFilter::for_partner(partner);
        assert!(filter.before_period().is_none());

        filter.date_from = NaiveDate::from_ymd_opt(2024, 1, 10);
        filter.date_to = NaiveDate::from_ymd_opt(2024, 1, 31);
        let scope = filter.before_period().unwrap();

        assert!(scope.matches(partner, AccountType::Receivable, &entry("2023-06-01", "A", None)));
        assert!(scope.matches(partner, AccountType::Receivable, &entry("2024-01-09", "A", None)));
        assert!(!scope.matches(partner, AccountType::Receivable, &entry("2024-01-10", "A", None)));
    }
}
