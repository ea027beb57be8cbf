// src/data/loader.rs

use csv::{ReaderBuilder, StringRecord, Trim};
use std::{fs::File, io::Read, path::Path, str::FromStr};
use tracing::{debug, info};

use super::{date::parse_date, record::month_of, Transaction};
use crate::error::ParseError;

pub const COL_TRANSACTION_ID: &str = "Transaction ID";
pub const COL_CUSTOMER_ID: &str = "Customer ID";
pub const COL_DATE: &str = "Date";
pub const COL_CATEGORY: &str = "Product Category";
pub const COL_QUANTITY: &str = "Quantity";
pub const COL_PRICE_PER_UNIT: &str = "Price per Unit";
pub const COL_TOTAL_AMOUNT: &str = "Total Amount";
pub const COL_AGE: &str = "Age";
pub const COL_GENDER: &str = "Gender";

/// Positions of the known columns within a header row.
struct ColumnIndex {
    date: usize,
    category: usize,
    quantity: usize,
    total_amount: usize,
    age: usize,
    gender: usize,
    transaction_id: Option<usize>,
    customer_id: Option<usize>,
    price_per_unit: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, ParseError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require =
            |name: &str| find(name).ok_or_else(|| ParseError::MissingColumn(name.to_string()));

        Ok(Self {
            date: require(COL_DATE)?,
            category: require(COL_CATEGORY)?,
            quantity: require(COL_QUANTITY)?,
            total_amount: require(COL_TOTAL_AMOUNT)?,
            age: require(COL_AGE)?,
            gender: require(COL_GENDER)?,
            transaction_id: find(COL_TRANSACTION_ID),
            customer_id: find(COL_CUSTOMER_ID),
            price_per_unit: find(COL_PRICE_PER_UNIT),
        })
    }
}

/// Load every transaction of the CSV file at `path`, in file order.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>, ParseError> {
    let file = File::open(&path).map_err(|source| ParseError::Io {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    let records = load_from_reader(file)?;
    info!(rows = records.len(), "loaded dataset");
    Ok(records)
}

/// Parse transactions from any CSV source with a header row.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<Transaction>, ParseError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let index = ColumnIndex::from_headers(&headers)?;
    debug!(columns = headers.len(), "verified required columns");

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        records.push(parse_row(&row, &index)?);
    }
    Ok(records)
}

fn parse_row(row: &StringRecord, index: &ColumnIndex) -> Result<Transaction, ParseError> {
    let line = row.position().map(|p| p.line()).unwrap_or(0);

    let raw_date = field(row, index.date, COL_DATE, line)?;
    let date = parse_date(raw_date).ok_or_else(|| ParseError::InvalidField {
        line,
        column: COL_DATE,
        value: raw_date.to_string(),
        reason: "not a calendar date".into(),
    })?;

    // an empty price cell is a gap, not a malformed value
    let price_per_unit = match index.price_per_unit {
        Some(i) if row.get(i).is_some_and(|v| !v.is_empty()) => {
            Some(parse_amount(row, i, COL_PRICE_PER_UNIT, line)?)
        }
        _ => None,
    };

    Ok(Transaction {
        transaction_id: optional(row, index.transaction_id),
        customer_id: optional(row, index.customer_id),
        date,
        month: month_of(date),
        category: field(row, index.category, COL_CATEGORY, line)?.to_string(),
        quantity: parse_number(row, index.quantity, COL_QUANTITY, line)?,
        price_per_unit,
        total_amount: parse_amount(row, index.total_amount, COL_TOTAL_AMOUNT, line)?,
        age: parse_number(row, index.age, COL_AGE, line)?,
        gender: field(row, index.gender, COL_GENDER, line)?.to_string(),
    })
}

/// A required, non-empty field.
fn field<'r>(
    row: &'r StringRecord,
    i: usize,
    column: &'static str,
    line: u64,
) -> Result<&'r str, ParseError> {
    match row.get(i) {
        Some(v) if !v.is_empty() => Ok(v),
        other => Err(ParseError::InvalidField {
            line,
            column,
            value: other.unwrap_or_default().to_string(),
            reason: "missing value".into(),
        }),
    }
}

fn optional(row: &StringRecord, i: Option<usize>) -> Option<String> {
    i.and_then(|i| row.get(i))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_number<T>(
    row: &StringRecord,
    i: usize,
    column: &'static str,
    line: u64,
) -> Result<T, ParseError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = field(row, i, column, line)?;
    raw.parse::<T>().map_err(|e| ParseError::InvalidField {
        line,
        column,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Non-negative, finite currency value.
fn parse_amount(
    row: &StringRecord,
    i: usize,
    column: &'static str,
    line: u64,
) -> Result<f64, ParseError> {
    let value: f64 = parse_number(row, i, column, line)?;
    if !value.is_finite() || value < 0.0 {
        return Err(ParseError::InvalidField {
            line,
            column,
            value: row.get(i).unwrap_or_default().to_string(),
            reason: "must be a non-negative finite amount".into(),
        });
    }
    Ok(value)
}
