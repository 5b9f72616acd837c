use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};
use salesboard_core::service::format::format_in_unit;
use salesboard_core::{compare, Category, ChangeKind, SalesField, Store, ValuePair};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{AlertKind, App, PeriodField, Screen, View};

const TITLE: &str = "店舗別 売上比較ダッシュボード";

pub fn draw(f: &mut Frame, app: &App) {
    match app.screen {
        Screen::Locked => draw_login(f, app),
        Screen::Loading => draw_loading(f),
        Screen::Dashboard => draw_dashboard(f, app),
        Screen::PeriodInput => {
            draw_dashboard(f, app);
            draw_period_popup(f, app);
        }
    }
}

fn draw_login(f: &mut Frame, app: &App) {
    let area = centered_rect(44, 9, f.area());
    f.render_widget(Clear, area);

    let masked = "*".repeat(app.password_input.chars().count());
    let mut lines = vec![
        Line::from(Span::styled(
            "パスワードを入力してください",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(masked),
        ]),
        Line::from(""),
    ];
    if let Some(err) = &app.login_error {
        lines.push(Line::from(Span::styled(err.as_str(), Style::default().fg(Color::Red))));
    }

    let login = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" {} ", TITLE))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(login, area);
}

fn draw_loading(f: &mut Frame) {
    let area = centered_rect(30, 3, f.area());
    let loading = Paragraph::new("データを読み込み中...")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(loading, area);
}

fn draw_dashboard(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Alert
            Constraint::Length(1), // Footer/Help
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);

    if let Some(err) = &app.load_error {
        let error = Paragraph::new(format!("データの読み込みに失敗しました: {}", err))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
        f.render_widget(error, chunks[1]);
    } else {
        match app.view {
            View::Daily => draw_daily(f, app, chunks[1]),
            View::Period => draw_period(f, app, chunks[1]),
        }
    }

    draw_alert(f, app, chunks[2]);

    let help = match app.view {
        View::Daily => "←/→: 日付 | s: 並び順 | Tab: 期間表示 | p: 期間指定 | e: CSV | r: 再読込 | L: ロック | q: 終了",
        View::Period => "Tab: 日別表示 | p: 期間指定 | E: CSV | r: 再読込 | L: ロック | q: 終了",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, chunks[3]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let date = app.selected_date().unwrap_or("-");
    let header = Paragraph::new(Line::from(vec![
        Span::styled(TITLE, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled("日付: ", Style::default().fg(Color::Blue)),
        Span::raw(date),
        Span::raw(format!(" ({}/{})", app.selected + 1, app.dates.len().max(1))),
        Span::raw("   "),
        Span::styled("並び順: ", Style::default().fg(Color::Blue)),
        Span::raw(app.sort_order.label()),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, area);
}

fn store_columns(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(Store::ALL.iter().map(|_| Constraint::Ratio(1, Store::ALL.len() as u32)))
        .split(area)
        .to_vec()
}

fn draw_daily(f: &mut Frame, app: &App, area: Rect) {
    let Some(report) = &app.daily else {
        let empty = Paragraph::new("表示できるデータがありません")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
        f.render_widget(empty, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);
    let comparison = report.comparison_date.as_deref().unwrap_or("N/A");
    f.render_widget(
        Paragraph::new(format!("比較日: {}", comparison))
            .style(Style::default().fg(Color::DarkGray)),
        chunks[0],
    );

    for (store, column) in Store::ALL.iter().zip(store_columns(chunks[1])) {
        if report.has_data(*store) {
            draw_store_card(f, column, *store, |field| report.value_pair(*store, field));
        } else {
            let empty = Paragraph::new("対象日のデータがありません")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(store_block(*store));
            f.render_widget(empty, column);
        }
    }
}

fn draw_period(f: &mut Frame, app: &App, area: Rect) {
    let Some(report) = &app.period else {
        let hint = Paragraph::new("p で期間を指定してください")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
        f.render_widget(hint, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);
    let info = Line::from(vec![
        Span::styled("対象期間: ", Style::default().fg(Color::Blue)),
        Span::raw(format!("{} 〜 {}", report.start, report.end)),
        Span::raw("   "),
        Span::styled("比較期間: ", Style::default().fg(Color::Blue)),
        Span::raw(format!("{} 〜 {}", report.comparison_start, report.comparison_end)),
    ]);
    f.render_widget(Paragraph::new(info), chunks[0]);

    for (store, column) in Store::ALL.iter().zip(store_columns(chunks[1])) {
        draw_store_card(f, column, *store, |field| report.value_pair(*store, field));
    }
}

fn store_block(store: Store) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", store))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

fn draw_store_card<F>(f: &mut Frame, area: Rect, store: Store, lookup: F)
where
    F: Fn(SalesField) -> ValuePair,
{
    let mut rows = Vec::new();
    for category in Category::ALL {
        rows.push(figure_row(category.short_label().to_string(), "¥", lookup(category.field()), true));
        for sub in category.sub_items() {
            rows.push(figure_row(format!("  {}", sub.label), sub.unit, lookup(sub.field), false));
        }
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(10), // Category
            Constraint::Min(8),     // Current
            Constraint::Min(8),     // Previous
            Constraint::Length(12), // Change
        ],
    )
    .header(
        Row::new(vec!["カテゴリ", "当期", "前年", "前年比"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(store_block(store));
    f.render_widget(table, area);
}

fn figure_row(label: String, unit: &str, pair: ValuePair, bold: bool) -> Row<'static> {
    let label_style = if bold {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let (previous, badge) = match pair.previous {
        Some(previous) => {
            let comparison = compare(pair.current, Some(previous));
            let color = match comparison.kind {
                ChangeKind::Increase => Color::Green,
                ChangeKind::Decrease => Color::Red,
                ChangeKind::Same => Color::DarkGray,
            };
            (
                format_in_unit(previous, unit),
                Span::styled(comparison.label, Style::default().fg(color)),
            )
        }
        None => (
            "-".to_string(),
            Span::styled("比較データなし", Style::default().fg(Color::DarkGray)),
        ),
    };

    Row::new(vec![
        Cell::from(Span::styled(label, label_style)),
        Cell::from(format_in_unit(pair.current, unit)),
        Cell::from(Span::styled(previous, Style::default().fg(Color::DarkGray))),
        Cell::from(badge),
    ])
}

fn draw_period_popup(f: &mut Frame, app: &App) {
    let area = centered_rect(40, 8, f.area());
    f.render_widget(Clear, area);

    let field_line = |label: &'static str, value: &str, active: bool| {
        let style = if active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let cursor = if active { "_" } else { "" };
        Line::from(vec![
            Span::styled(label, Style::default().fg(Color::Blue)),
            Span::styled(format!("{}{}", value, cursor), style),
        ])
    };

    let lines = vec![
        field_line("開始日: ", &app.start_input, app.period_field == PeriodField::Start),
        field_line("終了日: ", &app.end_input, app.period_field == PeriodField::End),
        Line::from(""),
        Line::from(Span::styled(
            "Tab: 切替 | Enter: 集計 | Esc: 閉じる",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let popup = Paragraph::new(lines).block(
        Block::default()
            .title(" 期間指定 (YYYY-MM-DD) ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(popup, area);
}

fn draw_alert(f: &mut Frame, app: &App, area: Rect) {
    let Some(alert) = &app.alert else {
        return;
    };
    let (prefix, color) = match alert.kind {
        AlertKind::Info => ("✔ ", Color::Green),
        AlertKind::Warning => ("! ", Color::Yellow),
        AlertKind::Error => ("✖ ", Color::Red),
    };
    let text = format!("{}{}", prefix, alert.message);
    let width = (UnicodeWidthStr::width(text.as_str()) as u16).min(area.width);
    let [line] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
        line,
    );
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(vertical);
    rect
}
