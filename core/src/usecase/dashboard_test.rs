use crate::error::{DashboardError, Result};
use crate::model::dataset::SortOrder;
use crate::model::field::SalesField;
use crate::model::record::SalesRecord;
use crate::model::store::Store;
use crate::repository::SalesRepository;
use crate::service::comparison::{compare, ChangeKind};
use crate::usecase::dashboard::Dashboard;
use pretty_assertions::assert_eq;
use std::collections::HashMap;

struct MockSalesRepo {
    records: HashMap<Store, Vec<SalesRecord>>,
    failing: Option<Store>,
}

impl MockSalesRepo {
    fn new() -> Self {
        Self {
            records: HashMap::new(),
            failing: None,
        }
    }

    fn with(mut self, store: Store, records: Vec<SalesRecord>) -> Self {
        self.records.insert(store, records);
        self
    }
}

impl SalesRepository for MockSalesRepo {
    fn fetch_store(&self, store: Store) -> Result<Vec<SalesRecord>> {
        if self.failing == Some(store) {
            return Err(DashboardError::HttpStatus {
                sheet: store.sheet_name().to_string(),
                status: 500,
            });
        }
        Ok(self.records.get(&store).cloned().unwrap_or_default())
    }
}

fn total(date: &str, value: f64) -> SalesRecord {
    SalesRecord::new(date).with(SalesField::DailyTotal, value)
}

fn sample_repo() -> MockSalesRepo {
    MockSalesRepo::new()
        .with(
            Store::Sakae,
            vec![
                total("2024/10/05", 1000.0).with(SalesField::SaunaVisitors, 40.0),
                total("2025/10/05", 1200.0).with(SalesField::SaunaVisitors, 50.0),
                total("2025/10/06", 800.0),
                total("2024/10/06", 800.0),
            ],
        )
        .with(Store::Imaike, vec![total("2025/10/05", 300.0)])
}

#[test]
fn test_end_to_end_daily_comparison() {
    let dashboard = Dashboard::load(&sample_repo()).unwrap();

    assert_eq!(dashboard.default_date(SortOrder::Newest).as_deref(), Some("2025/10/06"));
    assert_eq!(dashboard.default_date(SortOrder::Oldest).as_deref(), Some("2024/10/05"));

    let report = dashboard.daily("2025/10/05");
    assert_eq!(report.comparison_date.as_deref(), Some("2024/10/05"));
    assert!(report.has_data(Store::Sakae));
    assert!(!report.has_data(Store::Fukuoka));

    let pair = report.value_pair(Store::Sakae, SalesField::DailyTotal);
    assert_eq!(pair.current, 1200.0);
    assert_eq!(pair.previous, Some(1000.0));

    let comparison = compare(pair.current, pair.previous);
    assert_eq!(comparison.kind, ChangeKind::Increase);
    assert_eq!(comparison.label, "+20.0%");

    // 前年データのない店舗は previous が None のまま
    let imaike = report.value_pair(Store::Imaike, SalesField::DailyTotal);
    assert_eq!(imaike.current, 300.0);
    assert_eq!(imaike.previous, None);
}

#[test]
fn test_daily_csv_export() {
    let dashboard = Dashboard::load(&sample_repo()).unwrap();
    let export = dashboard.daily("2025/10/05").csv_export();

    assert_eq!(export.file_name, "sales_daily_2025-10-05.csv");
    let csv = export.to_csv_string().unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        r#""店舗","カテゴリ","売上 (2025/10/05)","前年売上 (2024/10/05)","前年比","差額""#
    );
    assert_eq!(lines[1], r#""栄","売上日計","1200","1000","+20.0%","200""#);
    assert_eq!(lines[3], r#""栄","  - 人数","50","40","+25.0%","10""#);
    // 今池は前年レコードなし
    assert_eq!(lines[11], r#""今池","売上日計","300","N/A","N/A","N/A""#);
}

#[test]
fn test_daily_with_unparseable_date_has_no_comparison() {
    let dashboard = Dashboard::from_data(Default::default());
    let report = dashboard.daily("unknown");
    assert_eq!(report.comparison_date, None);
    assert_eq!(report.previous.len(), Store::ALL.len());
    assert!(report.previous.values().all(Option::is_none));
}

#[test]
fn test_period_report() {
    let dashboard = Dashboard::load(&sample_repo()).unwrap();
    let report = dashboard.period("2025-10-01", "2025-10-15").unwrap();

    assert_eq!(report.start, "2025/10/01");
    assert_eq!(report.end, "2025/10/15");
    assert_eq!(report.comparison_start, "2024/10/01");
    assert_eq!(report.comparison_end, "2024/10/15");

    let sakae = report.value_pair(Store::Sakae, SalesField::DailyTotal);
    assert_eq!(sakae.current, 2000.0);
    assert_eq!(sakae.previous, Some(1800.0));

    // 期間サマリーは全店舗を 0 で埋めるので previous は常にある
    let fukuoka = report.value_pair(Store::Fukuoka, SalesField::Retail);
    assert_eq!(fukuoka.current, 0.0);
    assert_eq!(fukuoka.previous, Some(0.0));
    assert_eq!(compare(fukuoka.current, fukuoka.previous).label, "0%");

    let export = report.csv_export();
    assert_eq!(export.file_name, "sales_period_2025-10-01_to_2025-10-15.csv");
    assert_eq!(export.rows.len(), 30);
}

#[test]
fn test_period_rejects_reversed_range() {
    let dashboard = Dashboard::load(&sample_repo()).unwrap();
    match dashboard.period("2025/10/15", "2025/10/01") {
        Err(DashboardError::InvalidRange { start, end }) => {
            assert_eq!(start, "2025/10/15");
            assert_eq!(end, "2025/10/01");
        }
        other => panic!("unexpected: {:?}", other),
    }
    assert!(matches!(
        dashboard.period("2025/13/01", "2025/10/01"),
        Err(DashboardError::InvalidDate(_))
    ));
}

#[test]
fn test_load_without_dates_is_no_data() {
    let repo = MockSalesRepo::new();
    assert!(matches!(Dashboard::load(&repo), Err(DashboardError::NoData)));
}

#[test]
fn test_load_fails_when_any_store_fails() {
    let mut repo = sample_repo();
    repo.failing = Some(Store::Fukuoka);
    match Dashboard::load(&repo) {
        Err(DashboardError::HttpStatus { sheet, status }) => {
            assert_eq!(sheet, "福岡");
            assert_eq!(status, 500);
        }
        other => panic!("unexpected: {:?}", other.map(|d| d.data().len())),
    }
}
