//! Grouping of sorted entries by calendar period.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use portal_ledger_shared::types::DateFormat;
use serde::Serialize;

use super::filter::GroupBy;

/// Key of the single group used when grouping is disabled.
pub const CATCH_ALL_KEY: &str = "all";

/// A group of items sharing a period key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group<T> {
    /// Sortable key: `YYYY-MM-DD`, `YYYY-MM`, `YYYY` or `all`.
    pub key: String,
    /// Display label. For day groups this is the date in the user's format.
    pub label: String,
    /// Items in input order.
    pub items: Vec<T>,
}

/// Derives the group key of a date.
#[must_use]
pub fn group_key(date: NaiveDate, group_by: GroupBy) -> String {
    match group_by {
        GroupBy::None => CATCH_ALL_KEY.to_string(),
        GroupBy::Day => date.format("%Y-%m-%d").to_string(),
        GroupBy::Month => date.format("%Y-%m").to_string(),
        GroupBy::Year => date.format("%Y").to_string(),
    }
}

/// Partitions items into groups ordered by ascending key.
///
/// Items keep their relative order inside a group, so a chronologically
/// sorted input yields chronologically sorted groups. An empty input yields
/// no groups.
pub fn group_by_period<T, F>(
    items: Vec<T>,
    group_by: GroupBy,
    date_format: &DateFormat,
    date_of: F,
) -> Vec<Group<T>>
where
    F: Fn(&T) -> NaiveDate,
{
    let mut buckets: BTreeMap<String, (NaiveDate, Vec<T>)> = BTreeMap::new();

    for item in items {
        let date = date_of(&item);
        buckets
            .entry(group_key(date, group_by))
            .or_insert_with(|| (date, Vec::new()))
            .1
            .push(item);
    }

    buckets
        .into_iter()
        .map(|(key, (first_date, items))| {
            let label = match group_by {
                GroupBy::Day => date_format.format(first_date),
                GroupBy::None | GroupBy::Month | GroupBy::Year => key.clone(),
            };
            Group { key, label, items }
        })
        .collect()
}
