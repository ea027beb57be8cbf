// src/report.rs

use prettytable::{format, Cell, Row, Table};
use std::fmt;

use crate::aggregate::GroupedSums;
use crate::dashboard::Dashboard;

/// `1234567.4` → `"1,234,567"`. Rounds to the nearest whole unit.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_currency(symbol: &str, value: f64) -> String {
    format!("{}{}", symbol, format_thousands(value))
}

fn header(titles: &[&str]) -> Row {
    Row::new(titles.iter().map(|t| Cell::new(t).style_spec("bFg")).collect())
}

fn boxed() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table
}

fn series_table(series: &GroupedSums, value_title: &str, money: Option<&str>) -> Table {
    let mut table = boxed();
    let key_title = format!("{:?}", series.key);
    table.add_row(header(&[key_title.as_str(), value_title]));
    for entry in &series.entries {
        let value = match money {
            Some(symbol) => format_currency(symbol, entry.value),
            None => format_thousands(entry.value),
        };
        table.add_row(Row::new(vec![
            Cell::new(&entry.key),
            Cell::new(&value).style_spec("r"),
        ]));
    }
    table
}

/// Render the whole dashboard as plain text tables.
pub fn render(dash: &Dashboard, currency_symbol: &str) -> String {
    Report {
        dash,
        currency_symbol,
    }
    .to_string()
}

/// Text layout of one dashboard snapshot, section by section.
pub struct Report<'a> {
    pub dash: &'a Dashboard,
    pub currency_symbol: &'a str,
}

impl Report<'_> {
    fn money(&self, value: f64) -> String {
        format_currency(self.currency_symbol, value)
    }

    fn key_metrics(&self) -> Table {
        let kpis = &self.dash.kpis;
        let mut table = boxed();
        table.add_row(header(&["Total Revenue", "Total Units Sold", "Top Category"]));
        table.add_row(Row::new(vec![
            Cell::new(&self.money(kpis.total_revenue)).style_spec("r"),
            Cell::new(&format_thousands(kpis.total_units as f64)).style_spec("r"),
            Cell::new(&kpis.top_category),
        ]));
        table
    }

    fn preview(&self) -> Table {
        let mut table = boxed();
        table.add_row(header(&[
            "Date", "Category", "Quantity", "Amount", "Age", "Gender",
        ]));
        for r in &self.dash.overview.preview {
            table.add_row(Row::new(vec![
                Cell::new(&r.date.to_string()),
                Cell::new(&r.category),
                Cell::new(&r.quantity.to_string()).style_spec("r"),
                Cell::new(&self.money(r.total_amount)).style_spec("r"),
                Cell::new(&r.age.to_string()).style_spec("r"),
                Cell::new(&r.gender),
            ]));
        }
        table
    }

    fn basic_information(&self) -> Table {
        let mut table = boxed();
        table.add_row(header(&["Column", "Type", "Missing"]));
        for c in &self.dash.overview.column_info {
            table.add_row(Row::new(vec![
                Cell::new(c.column),
                Cell::new(&format!("{:?}", c.dtype)),
                Cell::new(&c.missing.to_string()).style_spec("r"),
            ]));
        }
        table
    }

    fn statistics(&self) -> Table {
        let mut table = boxed();
        table.add_row(header(&[
            "Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max",
        ]));
        for c in &self.dash.overview.columns {
            let fixed = |v: f64| format!("{:.2}", v);
            let values = [
                fixed(c.mean),
                c.std.map(fixed).unwrap_or_else(|| "-".into()),
                fixed(c.min),
                fixed(c.p25),
                fixed(c.p50),
                fixed(c.p75),
                fixed(c.max),
            ];
            let mut cells = vec![Cell::new(c.column), Cell::new(&c.count.to_string())];
            cells.extend(values.iter().map(|v| Cell::new(v).style_spec("r")));
            table.add_row(Row::new(cells));
        }
        table
    }

    fn ages(&self) -> Table {
        let mut table = boxed();
        table.add_row(header(&["Age range", "Customers"]));
        for bin in &self.dash.overview.age_histogram {
            table.add_row(Row::new(vec![
                Cell::new(&format!("{:.1} - {:.1}", bin.lower, bin.upper)),
                Cell::new(&bin.count.to_string()).style_spec("r"),
            ]));
        }
        table
    }

    fn shares(&self) -> Table {
        let mut table = boxed();
        table.add_row(header(&["Category", "Revenue", "Share"]));
        for s in &self.dash.charts.revenue_share {
            table.add_row(Row::new(vec![
                Cell::new(&s.category),
                Cell::new(&self.money(s.revenue)).style_spec("r"),
                Cell::new(&format!("{:.1}%", s.percent)).style_spec("r"),
            ]));
        }
        table
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dash = self.dash;
        let overview = &dash.overview;
        let charts = &dash.charts;
        let symbol = Some(self.currency_symbol);

        writeln!(f, "--- Monthly Product Sales ---")?;
        writeln!(f, "Months: {}", dash.selected_months.join(", "))?;
        writeln!(f, "Available: {}", dash.available_months.join(", "))?;
        writeln!(f, "\n--- Key Metrics ---\n{}", self.key_metrics())?;

        writeln!(f, "--- Dataset ({} rows) ---\n{}", overview.rows, self.preview())?;
        writeln!(f, "--- Basic Information ---\n{}", self.basic_information())?;
        writeln!(f, "--- Statistical Summary ---\n{}", self.statistics())?;
        writeln!(
            f,
            "--- Transactions per Product Category ---\n{}",
            series_table(&overview.category_counts, "Transactions", None)
        )?;
        writeln!(
            f,
            "--- Customer Gender Distribution ---\n{}",
            series_table(&overview.gender_counts, "Customers", None)
        )?;
        writeln!(f, "--- Customer Age Distribution ---\n{}", self.ages())?;
        writeln!(
            f,
            "--- Total Revenue by Product Category ---\n{}",
            series_table(&overview.revenue_by_category, "Revenue", symbol)
        )?;

        writeln!(
            f,
            "--- Units Sold by Product Category ---\n{}",
            series_table(&charts.units_by_category, "Units Sold", None)
        )?;
        writeln!(
            f,
            "--- Monthly Revenue Trend ---\n{}",
            series_table(&charts.monthly_revenue, "Revenue", symbol)
        )?;
        writeln!(f, "--- Revenue Share by Product Category ---\n{}", self.shares())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::data::Transaction;
    use chrono::{Month, NaiveDate};

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(456000.0), "456,000");
        assert_eq!(format_thousands(1234567.4), "1,234,567");
        assert_eq!(format_thousands(1234567.5), "1,234,568");
        assert_eq!(format_thousands(-2500.0), "-2,500");
        assert_eq!(format_currency("₹", 45600.0), "₹45,600");
    }

    #[test]
    fn test_render_contains_sections() {
        let date = NaiveDate::from_ymd_opt(2023, 3, 4).unwrap();
        let records = vec![
            Transaction::new(date, "Beauty", 2, 1500.0, 30, "Female"),
            Transaction::new(date, "Clothing", 1, 300.0, 45, "Male"),
        ];
        let config = DashboardConfig::default();
        let dash = Dashboard::build(&records, &[Month::March], &config).unwrap();
        let text = render(&dash, &config.currency_symbol);

        assert!(text.contains("Key Metrics"));
        assert!(text.contains("₹1,800"));
        assert!(text.contains("Monthly Revenue Trend"));
        assert!(text.contains("83.3%"));
        assert!(text.contains("Months: Mar"));
        assert!(text.contains("Basic Information"));
        assert!(text.find("Basic Information") < text.find("Statistical Summary"));
    }

    #[test]
    fn test_basic_information_lists_types_and_gaps() {
        let date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let mut priced = Transaction::new(date, "Beauty", 1, 50.0, 30, "Female");
        priced.price_per_unit = Some(50.0);
        let records = vec![priced, Transaction::new(date, "Clothing", 2, 80.0, 41, "Male")];
        let config = DashboardConfig::default();
        let dash = Dashboard::build(&records, &[Month::June], &config).unwrap();
        let text = Report {
            dash: &dash,
            currency_symbol: "$",
        }
        .to_string();

        let price_line = text
            .lines()
            .find(|l| l.contains("Price per Unit") && l.contains("Float"))
            .unwrap();
        assert!(price_line.contains('1'));
        assert!(text
            .lines()
            .any(|l| l.contains("Quantity") && l.contains("Integer")));
        assert_eq!(text, render(&dash, "$"));
    }
}
