use chrono::Month;
use std::collections::HashSet;

use crate::data::Transaction;

/// Keep the records whose month is in `selected`, in input order.
/// An empty selection keeps nothing.
pub fn filter_by_months<'a, I>(records: I, selected: &[Month]) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    if selected.is_empty() {
        return Vec::new();
    }
    let wanted: HashSet<Month> = selected.iter().copied().collect();
    records
        .into_iter()
        .filter(|r| wanted.contains(&r.month))
        .collect()
}

/// Distinct months present in `records`, January first.
pub fn available_months<'a, I>(records: I) -> Vec<Month>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut seen = [false; 12];
    for r in records {
        seen[r.month.number_from_month() as usize - 1] = true;
    }
    seen.iter()
        .enumerate()
        .filter(|(_, present)| **present)
        .filter_map(|(i, _)| Month::try_from(i as u8 + 1).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(y: i32, m: u32, d: u32, category: &str) -> Transaction {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        Transaction::new(date, category, 1, 10.0, 30, "Female")
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(2023, 11, 24, "Beauty"),
            tx(2023, 2, 27, "Clothing"),
            tx(2023, 1, 13, "Electronics"),
            tx(2024, 1, 1, "Beauty"),
            tx(2023, 2, 3, "Clothing"),
        ]
    }

    #[test]
    fn test_all_months_keeps_everything_in_order() {
        let records = sample();
        let all = available_months(&records);
        let kept = filter_by_months(&records, &all);
        let expected: Vec<&Transaction> = records.iter().collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn test_empty_selection_is_empty() {
        let records = sample();
        assert!(filter_by_months(&records, &[]).is_empty());
    }

    #[test]
    fn test_subset_preserves_order_across_years() {
        let records = sample();
        let kept = filter_by_months(&records, &[Month::January, Month::February]);
        let dates: Vec<_> = kept.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(
            dates,
            vec!["2023-02-27", "2023-01-13", "2024-01-01", "2023-02-03"]
        );
    }

    #[test]
    fn test_month_not_present_yields_nothing() {
        let records = sample();
        assert!(filter_by_months(&records, &[Month::July]).is_empty());
    }

    #[test]
    fn test_available_months_chronological() {
        let records = sample();
        assert_eq!(
            available_months(&records),
            vec![Month::January, Month::February, Month::November]
        );
        assert!(available_months(&Vec::<Transaction>::new()).is_empty());
    }
}
