use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::field::{Category, SalesField};
use crate::model::store::Store;
use crate::service::comparison::{compare, NOT_APPLICABLE};

/// Excel などで UTF-8 と認識させるための BOM。
const UTF8_BOM: &str = "\u{FEFF}";

/// Current and prior-year value of one figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuePair {
    pub current: f64,
    pub previous: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub store: Store,
    pub label: String,
    pub current: f64,
    pub previous: Option<f64>,
    pub percentage: String,
    pub difference: Option<f64>,
}

impl CsvRow {
    fn new(store: Store, label: String, pair: ValuePair) -> Self {
        Self {
            store,
            label,
            current: pair.current,
            previous: pair.previous,
            percentage: compare(pair.current, pair.previous).label,
            difference: pair.previous.map(|p| pair.current - p),
        }
    }

    pub fn fields(&self) -> Vec<String> {
        let or_na = |v: Option<f64>| v.map_or_else(|| NOT_APPLICABLE.to_string(), |v| v.to_string());
        vec![
            self.store.sheet_name().to_string(),
            self.label.clone(),
            self.current.to_string(),
            or_na(self.previous),
            self.percentage.clone(),
            or_na(self.difference),
        ]
    }
}

/// 店舗 × カテゴリ (+ サブ項目) の行を宣言順に生成する。
///
/// `lookup` decides where values come from, so the same walk serves the
/// single-day export and the period export.
pub fn generate_csv_rows<F>(lookup: F) -> Vec<CsvRow>
where
    F: Fn(Store, SalesField) -> ValuePair,
{
    let mut rows = Vec::new();
    for store in Store::ALL {
        for category in Category::ALL {
            rows.push(CsvRow::new(
                store,
                category.label().to_string(),
                lookup(store, category.field()),
            ));
            for sub in category.sub_items() {
                rows.push(CsvRow::new(
                    store,
                    format!("  - {}", sub.label),
                    lookup(store, sub.field),
                ));
            }
        }
    }
    rows
}

/// Every field is quoted; embedded quotes are doubled.
pub fn render_csv(headers: &[String], rows: &[Vec<String>]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub file_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

impl CsvExport {
    pub fn to_csv_string(&self) -> Result<String> {
        let rows: Vec<Vec<String>> = self.rows.iter().map(CsvRow::fields).collect();
        render_csv(&self.headers, &rows)
    }

    /// UTF-8 bytes with a leading BOM.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut content = String::from(UTF8_BOM);
        content.push_str(&self.to_csv_string()?);
        Ok(content.into_bytes())
    }

    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        fs::write(&path, self.to_bytes()?)?;
        info!("exported {} rows to {}", self.rows.len(), path.display());
        Ok(path)
    }
}

/// 単日CSV。ファイル名の日付は `/` を `-` に置き換える。
pub fn daily_export<F>(date: &str, comparison_date: Option<&str>, lookup: F) -> CsvExport
where
    F: Fn(Store, SalesField) -> ValuePair,
{
    let headers = vec![
        "店舗".to_string(),
        "カテゴリ".to_string(),
        format!("売上 ({})", date),
        format!("前年売上 ({})", comparison_date.unwrap_or(NOT_APPLICABLE)),
        "前年比".to_string(),
        "差額".to_string(),
    ];
    CsvExport {
        file_name: format!("sales_daily_{}.csv", date.replace('/', "-")),
        headers,
        rows: generate_csv_rows(lookup),
    }
}

/// 期間CSV。`start` / `end` は `YYYY/MM/DD`。
pub fn period_export<F>(start: &str, end: &str, lookup: F) -> CsvExport
where
    F: Fn(Store, SalesField) -> ValuePair,
{
    let headers = vec![
        "店舗".to_string(),
        "カテゴリ".to_string(),
        format!("期間合計 ({} - {})", start, end),
        "前年同期間合計".to_string(),
        "前年比".to_string(),
        "差額".to_string(),
    ];
    CsvExport {
        file_name: format!(
            "sales_period_{}_to_{}.csv",
            start.replace('/', "-"),
            end.replace('/', "-")
        ),
        headers,
        rows: generate_csv_rows(lookup),
    }
}
