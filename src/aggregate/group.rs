// src/aggregate/group.rs

use serde::Serialize;
use std::collections::BTreeMap;

use crate::data::{month_abbrev, Transaction};

/// Field records are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupKey {
    Category,
    Gender,
    Month,
}

/// Field summed within each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueField {
    Quantity,
    TotalAmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    /// Largest value first, ties by key.
    Descending,
    /// Smallest value first, ties by key.
    Ascending,
    /// By month number. Only meaningful for month keys; other keys fall back to key order.
    Chronological,
    KeyAscending,
}

/// Sort key for a group label: month number for months, the label itself otherwise.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Label {
    Month(u32),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupEntry {
    pub key: String,
    pub value: f64,
}

/// Ordered key → aggregate mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedSums {
    pub key: GroupKey,
    pub entries: Vec<GroupEntry>,
}

impl GroupKey {
    fn label(self, r: &Transaction) -> Label {
        match self {
            GroupKey::Category => Label::Text(r.category.clone()),
            GroupKey::Gender => Label::Text(r.gender.clone()),
            GroupKey::Month => Label::Month(r.month_number()),
        }
    }

    /// Order used by the dashboard charts when none is asked for.
    pub fn default_order(self) -> SortOrder {
        match self {
            GroupKey::Month => SortOrder::Chronological,
            GroupKey::Category | GroupKey::Gender => SortOrder::Descending,
        }
    }
}

impl ValueField {
    fn value(self, r: &Transaction) -> f64 {
        match self {
            ValueField::Quantity => r.quantity as f64,
            ValueField::TotalAmount => r.total_amount,
        }
    }
}

impl Label {
    fn into_string(self) -> String {
        match self {
            Label::Month(n) => chrono::Month::try_from(n as u8)
                .map(|m| month_abbrev(m).to_string())
                .unwrap_or_else(|_| n.to_string()),
            Label::Text(s) => s,
        }
    }
}

impl GroupedSums {
    fn from_groups(key: GroupKey, groups: BTreeMap<Label, f64>, order: SortOrder) -> Self {
        let entries: Vec<GroupEntry> = groups
            .into_iter()
            .map(|(label, value)| GroupEntry {
                key: label.into_string(),
                value,
            })
            .collect();
        Self { key, entries }.sorted(order)
    }

    /// Re-order the series.
    pub fn sorted(mut self, order: SortOrder) -> Self {
        match order {
            SortOrder::Descending => self
                .entries
                .sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.key.cmp(&b.key))),
            SortOrder::Ascending => self
                .entries
                .sort_by(|a, b| a.value.total_cmp(&b.value).then_with(|| a.key.cmp(&b.key))),
            SortOrder::Chronological if self.key == GroupKey::Month => {
                self.entries.sort_by_key(|e| {
                    e.key
                        .parse::<chrono::Month>()
                        .map(|m| m.number_from_month())
                        .unwrap_or(u32::MAX)
                })
            }
            SortOrder::Chronological | SortOrder::KeyAscending => {
                self.entries.sort_by(|a, b| a.key.cmp(&b.key))
            }
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.value)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Sum `value` per `key`, ordered by `key.default_order()`.
pub fn group_sum<'a, I>(records: I, key: GroupKey, value: ValueField) -> GroupedSums
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut groups: BTreeMap<Label, f64> = BTreeMap::new();
    for r in records {
        *groups.entry(key.label(r)).or_insert(0.0) += value.value(r);
    }
    GroupedSums::from_groups(key, groups, key.default_order())
}

/// Number of records per `key`, most frequent first.
pub fn group_count<'a, I>(records: I, key: GroupKey) -> GroupedSums
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut groups: BTreeMap<Label, f64> = BTreeMap::new();
    for r in records {
        *groups.entry(key.label(r)).or_insert(0.0) += 1.0;
    }
    GroupedSums::from_groups(key, groups, key.default_order())
}
