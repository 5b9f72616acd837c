use std::time::{Duration, Instant};

use chrono::Datelike;
use log::error;
use salesboard_core::{
    parse_sales_date, Config, DailyReport, Dashboard, PeriodReport, SalesRepository, Session,
    SortOrder,
};

const ALERT_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Locked,
    Loading,
    Dashboard,
    PeriodInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Daily,
    Period,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodField {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Warning,
    Error,
}

pub struct Alert {
    pub message: String,
    pub kind: AlertKind,
    shown_at: Instant,
}

pub struct App {
    repo: Box<dyn SalesRepository>,
    config: Config,
    pub session: Session,
    pub screen: Screen,
    pub view: View,
    pub password_input: String,
    pub login_error: Option<String>,
    pub load_error: Option<String>,
    dashboard: Option<Dashboard>,
    pub dates: Vec<String>,
    pub selected: usize,
    pub sort_order: SortOrder,
    pub daily: Option<DailyReport>,
    pub period: Option<PeriodReport>,
    pub start_input: String,
    pub end_input: String,
    pub period_field: PeriodField,
    pub alert: Option<Alert>,
}

impl App {
    pub fn new(repo: Box<dyn SalesRepository>, config: Config, session: Session) -> App {
        let screen = if session.is_authenticated() {
            Screen::Loading
        } else {
            Screen::Locked
        };
        let sort_order = config.sort_order;
        App {
            repo,
            config,
            session,
            screen,
            view: View::Daily,
            password_input: String::new(),
            login_error: None,
            load_error: None,
            dashboard: None,
            dates: Vec::new(),
            selected: 0,
            sort_order,
            daily: None,
            period: None,
            start_input: String::new(),
            end_input: String::new(),
            period_field: PeriodField::Start,
            alert: None,
        }
    }

    // --- Authentication ---

    pub fn input_password_char(&mut self, c: char) {
        self.password_input.push(c);
    }

    pub fn delete_password_char(&mut self) {
        self.password_input.pop();
    }

    pub fn submit_password(&mut self) {
        if self.session.authenticate(&self.password_input) {
            self.login_error = None;
            self.screen = Screen::Loading;
        } else {
            self.login_error =
                Some("アクセスが拒否されました。パスワードが正しくありません。".to_string());
        }
        self.password_input.clear();
    }

    pub fn lock(&mut self) {
        self.session.end();
        self.dashboard = None;
        self.daily = None;
        self.period = None;
        self.dates.clear();
        self.screen = Screen::Locked;
    }

    // --- Data ---

    /// Blocks until every store is fetched. Called once the loading frame is drawn.
    pub fn load_data(&mut self) {
        self.period = None;
        match Dashboard::load(self.repo.as_ref()) {
            Ok(dashboard) => {
                self.load_error = None;
                self.dashboard = Some(dashboard);
                self.refresh_dates();
            }
            Err(e) => {
                error!("failed to load sales data: {}", e);
                self.load_error = Some(e.to_string());
                self.dashboard = None;
                self.dates.clear();
                self.daily = None;
            }
        }
        self.screen = Screen::Dashboard;
    }

    pub fn reload(&mut self) {
        self.screen = Screen::Loading;
    }

    fn refresh_dates(&mut self) {
        if let Some(dashboard) = &self.dashboard {
            self.dates = dashboard.available_dates(self.sort_order);
        }
        self.selected = 0;
        self.refresh_daily();
    }

    fn refresh_daily(&mut self) {
        self.daily = match (&self.dashboard, self.dates.get(self.selected)) {
            (Some(dashboard), Some(date)) => Some(dashboard.daily(date)),
            _ => None,
        };
    }

    pub fn selected_date(&self) -> Option<&str> {
        self.dates.get(self.selected).map(String::as_str)
    }

    pub fn next_date(&mut self) {
        if self.dates.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.dates.len();
        self.refresh_daily();
    }

    pub fn previous_date(&mut self) {
        if self.dates.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.dates.len() - 1
        } else {
            self.selected - 1
        };
        self.refresh_daily();
    }

    pub fn toggle_sort(&mut self) {
        self.sort_order = self.sort_order.toggled();
        self.refresh_dates();
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Daily => View::Period,
            View::Period => View::Daily,
        };
    }

    // --- Period ---

    pub fn open_period_input(&mut self) {
        if self.dashboard.is_none() {
            return;
        }
        if self.start_input.is_empty() || self.end_input.is_empty() {
            // 既定値: 選択日の月初〜選択日
            if let Some(date) = self.selected_date().and_then(parse_sales_date) {
                let month_start = date.with_day(1).unwrap_or(date);
                self.start_input = month_start.format("%Y-%m-%d").to_string();
                self.end_input = date.format("%Y-%m-%d").to_string();
            }
        }
        self.period_field = PeriodField::Start;
        self.screen = Screen::PeriodInput;
    }

    pub fn cancel_period_input(&mut self) {
        self.screen = Screen::Dashboard;
    }

    pub fn switch_period_field(&mut self) {
        self.period_field = match self.period_field {
            PeriodField::Start => PeriodField::End,
            PeriodField::End => PeriodField::Start,
        };
    }

    fn active_period_input(&mut self) -> &mut String {
        match self.period_field {
            PeriodField::Start => &mut self.start_input,
            PeriodField::End => &mut self.end_input,
        }
    }

    pub fn input_period_char(&mut self, c: char) {
        if c.is_ascii_digit() || c == '-' || c == '/' {
            self.active_period_input().push(c);
        }
    }

    pub fn delete_period_char(&mut self) {
        self.active_period_input().pop();
    }

    pub fn submit_period(&mut self) {
        let Some(dashboard) = &self.dashboard else {
            return;
        };
        match dashboard.period(&self.start_input, &self.end_input) {
            Ok(report) => {
                let message = format!("期間集計を完了しました ({}〜{})", report.start, report.end);
                self.period = Some(report);
                self.view = View::Period;
                self.screen = Screen::Dashboard;
                self.show_alert(message, AlertKind::Info);
            }
            Err(salesboard_core::DashboardError::InvalidRange { .. }) => {
                self.show_alert("開始日が終了日より後になっています。", AlertKind::Warning);
            }
            Err(e) => self.show_alert(e.to_string(), AlertKind::Warning),
        }
    }

    // --- Export ---

    pub fn export_daily(&mut self) {
        let Some(report) = &self.daily else {
            self.show_alert("出力するデータがありません。", AlertKind::Warning);
            return;
        };
        let result = report.csv_export().write_to_dir(&self.config.export_dir);
        self.report_export(result);
    }

    pub fn export_period(&mut self) {
        let Some(report) = &self.period else {
            self.show_alert("先に期間集計を実行してください。", AlertKind::Warning);
            return;
        };
        let result = report.csv_export().write_to_dir(&self.config.export_dir);
        self.report_export(result);
    }

    fn report_export(&mut self, result: salesboard_core::Result<std::path::PathBuf>) {
        match result {
            Ok(path) => self.show_alert(format!("CSVを出力しました: {}", path.display()), AlertKind::Info),
            Err(e) => self.show_alert(format!("CSV出力に失敗しました: {}", e), AlertKind::Error),
        }
    }

    // --- Alert ---

    pub fn show_alert(&mut self, message: impl Into<String>, kind: AlertKind) {
        self.alert = Some(Alert {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        });
    }

    /// Drops the alert once it has been visible long enough.
    pub fn tick(&mut self) {
        if self.alert.as_ref().is_some_and(|a| a.shown_at.elapsed() >= ALERT_TTL) {
            self.alert = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesboard_core::{AllStoresData, SalesField, SalesRecord, Store};

    struct StaticRepo(AllStoresData);

    impl SalesRepository for StaticRepo {
        fn fetch_store(&self, store: Store) -> salesboard_core::Result<Vec<SalesRecord>> {
            Ok(self.0.get(&store).cloned().unwrap_or_default())
        }
    }

    fn app() -> App {
        let mut data = AllStoresData::new();
        data.insert(
            Store::Sakae,
            vec![
                SalesRecord::new("2025/10/05").with(SalesField::DailyTotal, 1200.0),
                SalesRecord::new("2025/10/06").with(SalesField::DailyTotal, 900.0),
                SalesRecord::new("2024/10/05").with(SalesField::DailyTotal, 1000.0),
            ],
        );
        let mut config = Config::default();
        config.access_password = "pw".to_string();
        App::new(Box::new(StaticRepo(data)), config, Session::start("pw"))
    }

    #[test]
    fn test_login_then_load() {
        let mut app = app();
        assert_eq!(app.screen, Screen::Locked);

        app.password_input = "nope".to_string();
        app.submit_password();
        assert_eq!(app.screen, Screen::Locked);
        assert!(app.login_error.is_some());
        assert!(app.password_input.is_empty());

        app.password_input = "pw".to_string();
        app.submit_password();
        assert_eq!(app.screen, Screen::Loading);

        app.load_data();
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.selected_date(), Some("2025/10/06"));

        app.toggle_sort();
        assert_eq!(app.selected_date(), Some("2024/10/05"));

        app.lock();
        assert_eq!(app.screen, Screen::Locked);
        assert!(!app.session.is_authenticated());
    }

    #[test]
    fn test_date_navigation_wraps() {
        let mut app = app();
        app.session.authenticate("pw");
        app.load_data();

        app.previous_date();
        assert_eq!(app.selected_date(), Some("2024/10/05"));
        app.next_date();
        assert_eq!(app.selected_date(), Some("2025/10/06"));
        app.next_date();
        assert_eq!(app.daily.as_ref().map(|d| d.date.as_str()), Some("2025/10/05"));
    }

    #[test]
    fn test_period_input_defaults_and_validation() {
        let mut app = app();
        app.session.authenticate("pw");
        app.load_data();
        app.next_date(); // 2025/10/05

        app.open_period_input();
        assert_eq!(app.start_input, "2025-10-01");
        assert_eq!(app.end_input, "2025-10-05");

        app.input_period_char('x');
        assert_eq!(app.start_input, "2025-10-01");

        app.start_input = "2025-10-31".to_string();
        app.submit_period();
        assert_eq!(app.screen, Screen::PeriodInput);
        assert_eq!(app.alert.as_ref().map(|a| a.kind), Some(AlertKind::Warning));

        app.start_input = "2025-10-01".to_string();
        app.submit_period();
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.view, View::Period);
        assert!(app.period.is_some());
    }
}
