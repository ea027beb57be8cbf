// src/data/record.rs

use chrono::{Datelike, Month, NaiveDate};
use serde::Serialize;

use crate::error::ParseError;

/// One transaction row of the retail dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub transaction_id: Option<String>,
    pub customer_id: Option<String>,
    pub date: NaiveDate,
    /// Derived from `date` once at load.
    #[serde(serialize_with = "serialize_month")]
    pub month: Month,
    pub category: String,
    pub quantity: u32,
    pub price_per_unit: Option<f64>,
    pub total_amount: f64,
    pub age: u32,
    pub gender: String,
}

impl Transaction {
    /// Build a record, deriving the month from `date`.
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        quantity: u32,
        total_amount: f64,
        age: u32,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            transaction_id: None,
            customer_id: None,
            date,
            month: month_of(date),
            category: category.into(),
            quantity,
            price_per_unit: None,
            total_amount,
            age,
            gender: gender.into(),
        }
    }

    /// Three-letter month abbreviation, e.g. `"Jan"`.
    pub fn month_label(&self) -> &'static str {
        month_abbrev(self.month)
    }

    /// Month number, 1..=12.
    pub fn month_number(&self) -> u32 {
        self.month.number_from_month()
    }
}

pub fn month_of(date: NaiveDate) -> Month {
    match date.month() {
        1 => Month::January,
        2 => Month::February,
        3 => Month::March,
        4 => Month::April,
        5 => Month::May,
        6 => Month::June,
        7 => Month::July,
        8 => Month::August,
        9 => Month::September,
        10 => Month::October,
        11 => Month::November,
        _ => Month::December,
    }
}

pub fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Parse a month filter label: abbreviation or full English name, any case.
pub fn parse_month_label(label: &str) -> Result<Month, ParseError> {
    let trimmed = label.trim();
    trimmed
        .parse::<Month>()
        .map_err(|_| ParseError::UnknownMonth(trimmed.to_string()))
}

fn serialize_month<S: serde::Serializer>(month: &Month, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(month_abbrev(*month))
}
