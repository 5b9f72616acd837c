pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use salesboard_core::{Config, SalesRepository, Session};

use crate::tui::app::{App, Screen};

pub fn run(repo: Box<dyn SalesRepository>, config: Config, session: Session) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(repo, config, session);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    app.session.end();

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        // ローディング画面を描画してから取得する
        if app.screen == Screen::Loading {
            app.load_data();
            continue;
        }

        app.tick();

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.screen {
            Screen::Locked => match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.submit_password(),
                KeyCode::Backspace => app.delete_password_char(),
                KeyCode::Char(c) => app.input_password_char(c),
                _ => {}
            },
            Screen::Dashboard => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Down | KeyCode::Char('j') => {
                    app.next_date()
                }
                KeyCode::Left | KeyCode::Char('h') | KeyCode::Up | KeyCode::Char('k') => {
                    app.previous_date()
                }
                KeyCode::Char('s') => app.toggle_sort(),
                KeyCode::Tab => app.toggle_view(),
                KeyCode::Char('p') => app.open_period_input(),
                KeyCode::Char('e') => app.export_daily(),
                KeyCode::Char('E') => app.export_period(),
                KeyCode::Char('r') => app.reload(),
                KeyCode::Char('L') => app.lock(),
                _ => {}
            },
            Screen::PeriodInput => match key.code {
                KeyCode::Esc => app.cancel_period_input(),
                KeyCode::Enter => app.submit_period(),
                KeyCode::Tab => app.switch_period_field(),
                KeyCode::Backspace => app.delete_period_char(),
                KeyCode::Char(c) => app.input_period_char(c),
                _ => {}
            },
            Screen::Loading => {}
        }
    }
}
