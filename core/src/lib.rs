pub mod config;
pub mod date;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod session;
pub mod usecase;

pub use config::Config;
pub use date::{available_dates, comparison_date, normalize_date, parse_sales_date};
pub use error::{DashboardError, Result};
pub use model::dataset::{AllStoresData, DailyStoreData, FieldTotals, PeriodSummary, SortOrder};
pub use model::field::{Category, SalesField, SubItem};
pub use model::record::SalesRecord;
pub use model::store::Store;
pub use repository::{FileSalesRepository, GoogleSheetRepository, SalesRepository};
pub use service::aggregate::{data_by_date, summarize_period};
pub use service::comparison::{compare, ChangeKind, Comparison, NOT_APPLICABLE};
pub use service::export::{generate_csv_rows, render_csv, CsvExport, CsvRow, ValuePair};
pub use session::Session;
pub use usecase::dashboard::{Dashboard, DailyReport, PeriodReport};
