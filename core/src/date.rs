use chrono::{Months, NaiveDate};
use std::collections::BTreeSet;

use crate::model::dataset::{AllStoresData, SortOrder};

/// Canonical rendering of a sales date. Zero padding keeps string order
/// equal to chronological order.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// `2025/10/05` または `2025-10-05` を日付として解釈する。
pub fn parse_sales_date(input: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.trim().split(['/', '-']).collect();
    if parts.len() != 3 {
        return None;
    }
    let year: i32 = parts[0].trim().parse().ok()?;
    let month: u32 = parts[1].trim().parse().ok()?;
    let day: u32 = parts[2].trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn format_sales_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Re-renders a user supplied date in the canonical `YYYY/MM/DD` form.
pub fn normalize_date(input: &str) -> Option<String> {
    parse_sales_date(input).map(format_sales_date)
}

/// 前年同日。2/29 は前年の 2/28 に丸める。
pub fn comparison_date(date: &str) -> Option<String> {
    let parsed = parse_sales_date(date)?;
    parsed
        .checked_sub_months(Months::new(12))
        .map(format_sales_date)
}

/// 全店舗に現れる日付を重複なしで返す。
pub fn available_dates(all_data: &AllStoresData, sort_order: SortOrder) -> Vec<String> {
    let unique: BTreeSet<&str> = all_data
        .values()
        .flatten()
        .map(|r| r.date.as_str())
        .filter(|d| !d.is_empty())
        .collect();

    let mut dates: Vec<String> = unique.into_iter().map(str::to_string).collect();
    // 解釈できない日付は先頭にまとめる (None < Some)
    dates.sort_by_cached_key(|d| (parse_sales_date(d), d.clone()));

    if sort_order == SortOrder::Newest {
        dates.reverse();
    }
    dates
}
