use chrono::NaiveDate;
use log::info;

use crate::date::{available_dates, comparison_date, format_sales_date, parse_sales_date};
use crate::error::{DashboardError, Result};
use crate::model::dataset::{AllStoresData, DailyStoreData, PeriodSummary, SortOrder};
use crate::model::field::SalesField;
use crate::model::store::Store;
use crate::repository::SalesRepository;
use crate::service::aggregate::{data_by_date, summarize_period};
use crate::service::export::{daily_export, period_export, CsvExport, ValuePair};

/// 選択日と前年同日の店舗別データ。
#[derive(Debug, Clone, PartialEq)]
pub struct DailyReport {
    pub date: String,
    pub comparison_date: Option<String>,
    pub current: DailyStoreData,
    pub previous: DailyStoreData,
}

impl DailyReport {
    /// Current falls back to 0; previous stays absent without a prior-year row.
    pub fn value_pair(&self, store: Store, field: SalesField) -> ValuePair {
        let value = |data: &DailyStoreData| {
            data.get(&store)
                .and_then(Option::as_ref)
                .map(|record| record.get(field))
        };
        ValuePair {
            current: value(&self.current).unwrap_or(0.0),
            previous: value(&self.previous),
        }
    }

    pub fn has_data(&self, store: Store) -> bool {
        matches!(self.current.get(&store), Some(Some(_)))
    }

    pub fn csv_export(&self) -> CsvExport {
        daily_export(&self.date, self.comparison_date.as_deref(), |store, field| {
            self.value_pair(store, field)
        })
    }
}

/// 期間合計と前年同期間合計。
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodReport {
    pub start: String,
    pub end: String,
    pub comparison_start: String,
    pub comparison_end: String,
    pub current: PeriodSummary,
    pub previous: PeriodSummary,
}

impl PeriodReport {
    pub fn value_pair(&self, store: Store, field: SalesField) -> ValuePair {
        let value = |summary: &PeriodSummary| {
            summary
                .get(&store)
                .and_then(|totals| totals.get(&field))
                .copied()
        };
        ValuePair {
            current: value(&self.current).unwrap_or(0.0),
            previous: value(&self.previous),
        }
    }

    pub fn csv_export(&self) -> CsvExport {
        period_export(&self.start, &self.end, |store, field| {
            self.value_pair(store, field)
        })
    }
}

/// 読み込み済みスナップショットに対する操作。
///
/// A snapshot is immutable; reloading builds a new `Dashboard`.
#[derive(Debug, Clone)]
pub struct Dashboard {
    data: AllStoresData,
}

impl Dashboard {
    pub fn load<R: SalesRepository + ?Sized>(repo: &R) -> Result<Self> {
        let dashboard = Self::from_data(repo.fetch_all()?);
        if dashboard.available_dates(SortOrder::Newest).is_empty() {
            return Err(DashboardError::NoData);
        }
        Ok(dashboard)
    }

    pub fn from_data(data: AllStoresData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &AllStoresData {
        &self.data
    }

    pub fn available_dates(&self, sort_order: SortOrder) -> Vec<String> {
        available_dates(&self.data, sort_order)
    }

    /// First date in the requested order, i.e. what the dashboard opens on.
    pub fn default_date(&self, sort_order: SortOrder) -> Option<String> {
        self.available_dates(sort_order).into_iter().next()
    }

    pub fn daily(&self, date: &str) -> DailyReport {
        let comparison = comparison_date(date);
        let previous = match &comparison {
            Some(d) => data_by_date(&self.data, d),
            None => Store::ALL.into_iter().map(|s| (s, None)).collect(),
        };
        DailyReport {
            date: date.to_string(),
            comparison_date: comparison,
            current: data_by_date(&self.data, date),
            previous,
        }
    }

    /// `start` / `end` は `YYYY-MM-DD` でも `YYYY/MM/DD` でもよい。
    pub fn period(&self, start: &str, end: &str) -> Result<PeriodReport> {
        let start_date = parse_bound(start)?;
        let end_date = parse_bound(end)?;
        let start = format_sales_date(start_date);
        let end = format_sales_date(end_date);

        if start_date > end_date {
            return Err(DashboardError::InvalidRange { start, end });
        }

        let comparison_start =
            comparison_date(&start).ok_or_else(|| DashboardError::InvalidDate(start.clone()))?;
        let comparison_end =
            comparison_date(&end).ok_or_else(|| DashboardError::InvalidDate(end.clone()))?;

        let current = summarize_period(&self.data, &start, &end);
        let previous = summarize_period(&self.data, &comparison_start, &comparison_end);
        info!(
            "summarized {} - {} against {} - {}",
            start, end, comparison_start, comparison_end
        );

        Ok(PeriodReport {
            start,
            end,
            comparison_start,
            comparison_end,
            current,
            previous,
        })
    }
}

fn parse_bound(input: &str) -> Result<NaiveDate> {
    parse_sales_date(input).ok_or_else(|| DashboardError::InvalidDate(input.to_string()))
}
