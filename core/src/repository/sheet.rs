use log::debug;
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;

use crate::error::{DashboardError, Result};
use crate::model::field::{Category, SalesField};
use crate::model::record::SalesRecord;
use crate::model::store::Store;
use crate::repository::traits::SalesRepository;

const DATE_LABEL: &str = "対象日";

/// Google スプレッドシートの gviz エンドポイントから各店舗のシートを読む。
pub struct GoogleSheetRepository {
    spreadsheet_id: String,
    client: Client,
}

impl GoogleSheetRepository {
    pub fn new(spreadsheet_id: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(DashboardError::HttpClient)?;
        Ok(Self {
            spreadsheet_id: spreadsheet_id.into(),
            client,
        })
    }

    fn query_url(&self, sheet: &str) -> Result<Url> {
        let base = format!(
            "https://docs.google.com/spreadsheets/d/{}/gviz/tq",
            self.spreadsheet_id
        );
        Url::parse_with_params(
            &base,
            &[("tqx", "out:json"), ("sheet", sheet), ("tq", "select *")],
        )
        .map_err(|e| DashboardError::SheetQuery(format!("invalid spreadsheet url: {}", e)))
    }
}

impl SalesRepository for GoogleSheetRepository {
    fn fetch_store(&self, store: Store) -> Result<Vec<SalesRecord>> {
        let sheet = store.sheet_name();
        let url = self.query_url(sheet)?;
        debug!("fetching sheet {} from {}", sheet, url);

        let http_err = |source| DashboardError::Http {
            sheet: sheet.to_string(),
            source,
        };
        let response = self.client.get(url).send().map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::HttpStatus {
                sheet: sheet.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().map_err(http_err)?;
        let records = parse_gviz_response(&text)?;
        debug!("sheet {}: {} rows", sheet, records.len());
        Ok(records)
    }
}

#[derive(Deserialize)]
struct GvizResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    errors: Vec<GvizError>,
    table: Option<GvizTable>,
}

#[derive(Deserialize)]
struct GvizError {
    #[serde(default)]
    detailed_message: String,
}

#[derive(Deserialize)]
struct GvizTable {
    cols: Vec<GvizColumn>,
    rows: Vec<GvizRow>,
}

#[derive(Deserialize)]
struct GvizColumn {
    #[serde(default)]
    label: String,
}

#[derive(Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: serde_json::Value,
}

struct Column {
    label: String,
    numeric: bool,
}

impl Column {
    fn new(original: &str) -> Self {
        let label = sanitize_key(original);
        let numeric = Category::ALL.iter().any(|c| c.label() == label)
            || original.contains("人数")
            || original.contains("件数");
        Self { label, numeric }
    }
}

/// 全角英数字を半角に、全角括弧を半角括弧にそろえる。
pub fn sanitize_key(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'Ａ'..='Ｚ' | 'ａ'..='ｚ' | '０'..='９' => {
                char::from_u32(c as u32 - 0xFEE0).unwrap_or(c)
            }
            '（' => '(',
            '）' => ')',
            other => other,
        })
        .collect()
}

/// `Date(2025,9,5)` (月は0始まり) を `2025/10/05` にする。
fn parse_gviz_date(value: &str) -> Option<String> {
    let inner = value.strip_prefix("Date(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(|p| p.trim().parse::<u32>());
    let year = parts.next()?.ok()?;
    let month = parts.next()?.ok()?;
    let day = parts.next()?.ok()?;
    Some(format!("{}/{:02}/{:02}", year, month.checked_add(1)?, day))
}

fn strip_jsonp(text: &str) -> Result<&str> {
    let start = text.find('{');
    let end = text.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(&text[start..=end]),
        _ => Err(DashboardError::MalformedResponse(
            "no JSON payload in response".to_string(),
        )),
    }
}

/// Parses the JSONP body returned by the gviz query endpoint.
///
/// Rows without a date are dropped. Numeric columns fall back to 0 when the
/// cell is empty or not a number.
pub fn parse_gviz_response(text: &str) -> Result<Vec<SalesRecord>> {
    let response: GvizResponse = serde_json::from_str(strip_jsonp(text)?)?;

    if response.status == "error" {
        let message = response
            .errors
            .iter()
            .map(|e| e.detailed_message.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(DashboardError::SheetQuery(message));
    }

    let table = response
        .table
        .ok_or_else(|| DashboardError::MalformedResponse("missing table".to_string()))?;
    let columns: Vec<Column> = table.cols.iter().map(|c| Column::new(&c.label)).collect();

    Ok(table
        .rows
        .into_iter()
        .filter_map(|row| row_to_record(&columns, row))
        .collect())
}

fn row_to_record(columns: &[Column], row: GvizRow) -> Option<SalesRecord> {
    let mut record = SalesRecord::default();
    let mut date = None;

    for (column, cell) in columns.iter().zip(row.c) {
        let value = cell.map(|c| c.v).unwrap_or_default();

        if column.label == DATE_LABEL {
            date = value
                .as_str()
                .map(|s| parse_gviz_date(s).unwrap_or_else(|| s.to_string()));
            continue;
        }

        if column.numeric {
            if let Some(field) = SalesField::from_label(&column.label) {
                record.set(field, value.as_f64().unwrap_or(0.0));
            }
        }
    }

    record.date = date.filter(|d| !d.is_empty())?;
    Some(record)
}
