use chrono::NaiveDate;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a calendar date. Accepts `YYYY-MM-DD`, `YYYY/MM/DD` and `MM/DD/YYYY`,
/// optionally followed by a time part (`" HH:MM:SS"` or `"THH:MM:SS"`), which is dropped.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim().trim_matches('"');
    let date_part = s.split(['T', ' ']).next().unwrap_or(s);
    if date_part.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}
