use salesboard_core::service::format::format_in_unit;
use salesboard_core::{
    compare, Category, ChangeKind, DailyReport, PeriodReport, SalesField, Store, ValuePair,
};
use tabled::settings::object::{Cell, Rows};
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

// Helper struct for Table Row
#[derive(Tabled)]
struct FigureRow {
    #[tabled(rename = "カテゴリ")]
    category: String,
    #[tabled(rename = "当期")]
    current: String,
    #[tabled(rename = "前年")]
    previous: String,
    #[tabled(rename = "前年比")]
    change: String,
}

const CHANGE_COLUMN: usize = 3;

pub fn show_dates(dates: &[String]) {
    if dates.is_empty() {
        println!("No dates available.");
        return;
    }
    for date in dates {
        println!("{}", date);
    }
}

pub fn show_daily(report: &DailyReport) {
    println!(
        "\n\x1b[1;36m単日比較 {}\x1b[0m (比較対象日: {})",
        report.date,
        report.comparison_date.as_deref().unwrap_or("なし")
    );

    for store in Store::ALL {
        println!("\n\x1b[1m{}\x1b[0m", store);
        if !report.has_data(store) {
            println!("  対象日のデータがありません");
            continue;
        }
        print_store_table(store, |s, f| report.value_pair(s, f));
    }
}

pub fn show_period(report: &PeriodReport) {
    println!(
        "\n\x1b[1;36m期間集計 {} 〜 {}\x1b[0m (比較期間: {} 〜 {})",
        report.start, report.end, report.comparison_start, report.comparison_end
    );

    for store in Store::ALL {
        println!("\n\x1b[1m{} - 期間合計\x1b[0m", store);
        print_store_table(store, |s, f| report.value_pair(s, f));
    }
}

fn print_store_table<F>(store: Store, lookup: F)
where
    F: Fn(Store, SalesField) -> ValuePair,
{
    let mut rows = Vec::new();
    let mut kinds = Vec::new();

    for category in Category::ALL {
        let (row, kind) = figure_row(category.label().to_string(), "¥", lookup(store, category.field()));
        rows.push(row);
        kinds.push(kind);

        for sub in category.sub_items() {
            let (row, kind) = figure_row(format!("  {}", sub.label), sub.unit, lookup(store, sub.field));
            rows.push(row);
            kinds.push(kind);
        }
    }

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color

    // 1行目はヘッダー
    for (i, kind) in kinds.into_iter().enumerate() {
        let color = match kind {
            Some(ChangeKind::Increase) => Color::FG_GREEN,
            Some(ChangeKind::Decrease) => Color::FG_RED,
            _ => continue,
        };
        table.with(Modify::new(Cell::new(i + 1, CHANGE_COLUMN)).with(color));
    }

    println!("{}", table);
}

fn figure_row(label: String, unit: &str, pair: ValuePair) -> (FigureRow, Option<ChangeKind>) {
    let (previous, change, kind) = match pair.previous {
        Some(previous) => {
            let comparison = compare(pair.current, Some(previous));
            (format_in_unit(previous, unit), comparison.label, Some(comparison.kind))
        }
        None => ("-".to_string(), "比較データなし".to_string(), None),
    };

    let row = FigureRow {
        category: label,
        current: format_in_unit(pair.current, unit),
        previous,
        change,
    };
    (row, kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figure_row_without_previous() {
        let (row, kind) = figure_row(
            "サウナ".to_string(),
            "¥",
            ValuePair { current: 1500.0, previous: None },
        );
        assert_eq!(row.current, "¥1,500");
        assert_eq!(row.previous, "-");
        assert_eq!(row.change, "比較データなし");
        assert_eq!(kind, None);
    }

    #[test]
    fn test_figure_row_with_previous() {
        let (row, kind) = figure_row(
            "人数".to_string(),
            "人",
            ValuePair { current: 110.0, previous: Some(100.0) },
        );
        assert_eq!(row.current, "110人");
        assert_eq!(row.previous, "100人");
        assert_eq!(row.change, "+10.0%");
        assert_eq!(kind, Some(ChangeKind::Increase));
    }
}
