mod report;
mod tui;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use salesboard_core::{
    normalize_date, Config, Dashboard, FileSalesRepository, GoogleSheetRepository,
    SalesRepository, Session, SortOrder,
};

#[derive(Parser)]
#[command(name = "salesboard")]
#[command(about = "Per-store sales dashboard with year-over-year comparison", long_about = None)]
struct Cli {
    /// Read sales from a JSON snapshot instead of the spreadsheet
    #[arg(long, global = true)]
    source: Option<PathBuf>,
    /// Config file (defaults to <config dir>/salesboard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Dashboard password; prompted for when omitted
    #[arg(long, env = "SALESBOARD_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every date that has data
    Dates {
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },
    /// Show one day per store against the same day last year
    Daily {
        /// YYYY/MM/DD or YYYY-MM-DD (defaults to the newest date)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show period totals against the same period last year
    Period {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Write a CSV report
    Export {
        #[command(subcommand)]
        target: ExportTarget,
    },
    /// Fetch every store and save a JSON snapshot usable with --source
    Snapshot {
        #[arg(long)]
        out: PathBuf,
    },
    /// Open the Terminal User Interface
    Tui,
}

#[derive(Subcommand)]
enum ExportTarget {
    /// Single-day comparison CSV
    Daily {
        #[arg(long)]
        date: Option<String>,
        /// Output directory (defaults to export_dir from the config)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Period comparison CSV
    Period {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Newest,
    Oldest,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Newest => SortOrder::Newest,
            SortArg::Oldest => SortOrder::Oldest,
        }
    }
}

fn open_repository(cli: &Cli, config: &Config) -> Result<Box<dyn SalesRepository>> {
    Ok(match &cli.source {
        Some(path) => {
            info!("reading sales from snapshot {}", path.display());
            Box::new(FileSalesRepository::new(path))
        }
        None => Box::new(GoogleSheetRepository::new(config.spreadsheet_id.clone())?),
    })
}

fn prompt_password() -> Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end().to_string())
}

fn authenticate(session: &mut Session, password: Option<&str>) -> Result<()> {
    let input = match password {
        Some(p) => p.to_string(),
        None => prompt_password()?,
    };
    if !session.authenticate(&input) {
        bail!("Access denied: incorrect password.");
    }
    Ok(())
}

fn resolve_date(dashboard: &Dashboard, date: Option<&str>, sort_order: SortOrder) -> Result<String> {
    match date {
        Some(d) => normalize_date(d).ok_or_else(|| anyhow!("Invalid date: '{}'", d)),
        None => dashboard
            .default_date(sort_order)
            .ok_or_else(|| anyhow!("No sales data available.")),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let repo = open_repository(&cli, &config)?;
    let mut session = Session::start(config.access_password.clone());

    let command = match &cli.command {
        // TUIはパスワード画面を持つので、ここでは認証しない
        None | Some(Commands::Tui) => {
            if let Some(p) = cli.password.as_deref() {
                session.authenticate(p);
            }
            return tui::run(repo, config, session);
        }
        Some(command) => command,
    };

    authenticate(&mut session, cli.password.as_deref())?;

    match command {
        Commands::Dates { sort } => {
            let dashboard = Dashboard::load(repo.as_ref())?;
            let order = sort.map(SortOrder::from).unwrap_or(config.sort_order);
            report::show_dates(&dashboard.available_dates(order));
        }
        Commands::Daily { date } => {
            let dashboard = Dashboard::load(repo.as_ref())?;
            let date = resolve_date(&dashboard, date.as_deref(), config.sort_order)?;
            report::show_daily(&dashboard.daily(&date));
        }
        Commands::Period { start, end } => {
            let dashboard = Dashboard::load(repo.as_ref())?;
            report::show_period(&dashboard.period(start, end)?);
        }
        Commands::Export { target } => {
            let dashboard = Dashboard::load(repo.as_ref())?;
            let (export, out) = match target {
                ExportTarget::Daily { date, out } => {
                    let date = resolve_date(&dashboard, date.as_deref(), config.sort_order)?;
                    (dashboard.daily(&date).csv_export(), out)
                }
                ExportTarget::Period { start, end, out } => {
                    (dashboard.period(start, end)?.csv_export(), out)
                }
            };
            let dir = out.clone().unwrap_or_else(|| config.export_dir.clone());
            let path = export.write_to_dir(&dir)?;
            println!("CSV written: {}", path.display());
        }
        Commands::Snapshot { out } => {
            let data = repo.fetch_all()?;
            let records: usize = data.values().map(Vec::len).sum();
            let snapshot = FileSalesRepository::new(out);
            snapshot.save(&data)?;
            println!("Snapshot saved: {} ({} records)", snapshot.path().display(), records);
        }
        Commands::Tui => unreachable!("the TUI is dispatched before authentication"),
    }

    session.end();
    Ok(())
}
