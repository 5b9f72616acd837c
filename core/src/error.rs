use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("HTTP error fetching sheet {sheet}: {source}")]
    Http {
        sheet: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("HTTP error! status: {status} for sheet: {sheet}")]
    HttpStatus { sheet: String, status: u16 },
    #[error("spreadsheet query failed: {0}")]
    SheetQuery(String),
    #[error("malformed sheet response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("no sales data available")]
    NoData,
    #[error("invalid date: '{0}'")]
    InvalidDate(String),
    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: String, end: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
