use crate::model::dataset::{AllStoresData, DailyStoreData, FieldTotals, PeriodSummary};
use crate::model::field::SalesField;
use crate::model::store::Store;

/// 指定日のレコードを店舗ごとに取り出す。
///
/// Dates are matched as strings, so callers must pass the canonical form.
/// Duplicate rows for the same date resolve to the first one.
pub fn data_by_date(all_data: &AllStoresData, date: &str) -> DailyStoreData {
    Store::ALL
        .into_iter()
        .map(|store| {
            let record = all_data
                .get(&store)
                .and_then(|records| records.iter().find(|r| r.date == date))
                .cloned();
            (store, record)
        })
        .collect()
}

fn is_date_in_range(date: &str, start: &str, end: &str) -> bool {
    date >= start && date <= end
}

/// 期間 [start, end] の合計を店舗ごとに計算する。
///
/// Bounds are compared lexicographically on `YYYY/MM/DD`. A store without
/// matching rows still gets an entry with every field at zero.
pub fn summarize_period(all_data: &AllStoresData, start: &str, end: &str) -> PeriodSummary {
    Store::ALL
        .into_iter()
        .map(|store| {
            let records: Vec<_> = all_data
                .get(&store)
                .map(|rs| rs.iter().filter(|r| is_date_in_range(&r.date, start, end)).collect())
                .unwrap_or_default();

            let totals: FieldTotals = SalesField::SUMMABLE
                .into_iter()
                .map(|field| (field, records.iter().map(|r| r.get(field)).sum::<f64>()))
                .collect();
            (store, totals)
        })
        .collect()
}
