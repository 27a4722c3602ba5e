//! Worktime Dashboard - monthly HR attendance views, overtime checks and exports.

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use worktime_dashboard as app;

use app::analytics::{self, Report};
use app::config::{AppConfig, ConfigLoadResult};
use app::filter::{RecordFilter, department_list};
use app::models::ReportPeriod;
use app::notes::{self, ExplanationNotes, NOTE_TEMPLATE};
use app::ui::{dashboard, views};
use app::{AppError, export, logging, source};

/// HR attendance dashboard for one month of work-time records.
#[derive(Parser)]
#[command(name = "worktime-dashboard", version)]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long, global = true)]
    dev: bool,

    /// Explicit config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Month and filter shared by every view.
#[derive(Args, Clone, Default)]
struct ViewArgs {
    /// Month to report, YYYY-MM (default: current month)
    #[arg(long)]
    month: Option<String>,

    /// Case-insensitive search on employee or department name
    #[arg(long)]
    search: Option<String>,

    /// Restrict to one department
    #[arg(long)]
    dept: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// KPI summary
    Summary(ViewArgs),
    /// Counts per day
    Daily(ViewArgs),
    /// Weekday summary per department
    Departments(ViewArgs),
    /// Rows with a missing clock-in or clock-out
    Missing(ViewArgs),
    /// Unexcused absences
    Absent(ViewArgs),
    /// Employee-weeks over 50 hours
    Overtime(ViewArgs),
    /// Normal days worked on weekends
    Weekend(ViewArgs),
    /// Every row with hours and status
    Detail(ViewArgs),
    /// Full report as JSON
    Json(ViewArgs),
    /// Sorted department names present in the month
    DepartmentsList {
        #[arg(long)]
        month: Option<String>,
    },
    /// Edit explanation notes
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
    /// Write report files
    Export {
        #[command(subcommand)]
        format: ExportFormat,
    },
    /// Check that the configured source is reachable
    Check,
    /// Write a default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum NoteAction {
    /// Set the note for an employee and date
    Set {
        #[arg(long)]
        emp: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        text: Option<String>,
    },
    /// Remove a note
    Remove {
        #[arg(long)]
        emp: String,
        #[arg(long)]
        date: String,
    },
    /// Print a note
    Show {
        #[arg(long)]
        emp: String,
        #[arg(long)]
        date: String,
    },
}

#[derive(Subcommand)]
enum ExportFormat {
    /// Missing and absent rows with explanation notes
    Csv {
        #[command(flatten)]
        view: ViewArgs,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Every view in one Excel workbook
    Xlsx {
        #[command(flatten)]
        view: ViewArgs,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None if cli.dev => PathBuf::from("config.toml"),
        None => AppConfig::default_path(),
    };

    if let Command::InitConfig { force } = cli.command {
        return init_config(&config_path, force);
    }

    let (config, missing) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => (config, false),
        ConfigLoadResult::Missing => (AppConfig::default(), true),
        ConfigLoadResult::Invalid(e) => {
            return Err(anyhow::Error::new(e).context(format!("Invalid config {}", config_path.display())));
        }
    };

    // Initialize logging
    let _guard = logging::init(&config.logging);

    tracing::info!("Worktime Dashboard starting...");
    if missing {
        tracing::warn!("Config missing at {:?}, using defaults", config_path);
    } else {
        tracing::info!("Config path: {:?}", config_path);
    }

    let notes_path = notes::resolve_path(&config.report.notes_path, &config_path);
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    match cli.command {
        Command::Summary(args) => {
            let (period, filter, report) = build_report(&rt, &config, &args)?;
            println!("{}", dashboard::show(&report, period, &filter));
        }
        Command::Daily(args) => {
            let (_, _, report) = build_report(&rt, &config, &args)?;
            println!("{}", views::daily(&report));
        }
        Command::Departments(args) => {
            let (_, _, report) = build_report(&rt, &config, &args)?;
            println!("{}", views::departments(&report));
        }
        Command::Missing(args) => {
            let (_, _, report) = build_report(&rt, &config, &args)?;
            let notes = ExplanationNotes::load(&notes_path)?;
            println!("{}", views::missing(&report, &notes));
        }
        Command::Absent(args) => {
            let (_, _, report) = build_report(&rt, &config, &args)?;
            let notes = ExplanationNotes::load(&notes_path)?;
            println!("{}", views::absent(&report, &notes));
        }
        Command::Overtime(args) => {
            let (_, _, report) = build_report(&rt, &config, &args)?;
            println!("{}", views::overtime(&report));
        }
        Command::Weekend(args) => {
            let (_, _, report) = build_report(&rt, &config, &args)?;
            println!("{}", views::weekend(&report));
        }
        Command::Detail(args) => {
            let (_, _, report) = build_report(&rt, &config, &args)?;
            println!("{}", views::detail(&report));
        }
        Command::Json(args) => {
            let (_, _, report) = build_report(&rt, &config, &args)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::DepartmentsList { month } => {
            let period = parse_period(month.as_deref())?;
            let records = rt.block_on(source::load_records(&config, period))?;
            println!("{}", views::department_list(&department_list(&records)));
        }
        Command::Note { action } => run_note(action, &notes_path)?,
        Command::Export { format } => match format {
            ExportFormat::Csv { view, out } => {
                let (period, _, report) = build_report(&rt, &config, &view)?;
                let notes = ExplanationNotes::load(&notes_path)?;
                let path = out.unwrap_or_else(|| config.report.export_dir.join(export::explanation_csv_filename(period)));
                match export::export_explanations_csv(&report, &notes, &path) {
                    Ok(rows) => println!("Exported {rows} rows to {}", path.display()),
                    Err(AppError::NothingToExport) => println!("No missing or absent records to export."),
                    Err(e) => return Err(e.into()),
                }
            }
            ExportFormat::Xlsx { view, out } => {
                let (period, _, report) = build_report(&rt, &config, &view)?;
                let notes = ExplanationNotes::load(&notes_path)?;
                let path = out.unwrap_or_else(|| {
                    config
                        .report
                        .export_dir
                        .join(export::generate_export_filename("attendance", period))
                });
                export::export_report_to_excel(&report, &notes, &path)?;
                println!("Exported report to {}", path.display());
            }
        },
        Command::Check => {
            let message = rt.block_on(source::check_source(&config))?;
            println!("{message}");
        }
        Command::InitConfig { force } => init_config(&config_path, force)?,
    }

    Ok(())
}

fn parse_period(month: Option<&str>) -> anyhow::Result<ReportPeriod> {
    match month {
        Some(month) => Ok(month.parse()?),
        None => Ok(ReportPeriod::current()),
    }
}

/// Load the month, apply the filter, then run the report pass.
fn build_report(
    rt: &tokio::runtime::Runtime,
    config: &AppConfig,
    args: &ViewArgs,
) -> anyhow::Result<(ReportPeriod, RecordFilter, Report)> {
    let period = parse_period(args.month.as_deref())?;
    let records = rt
        .block_on(source::load_records(config, period))
        .with_context(|| format!("Failed to load records for {period}"))?;

    let filter = RecordFilter::new(args.search.clone(), args.dept.clone());
    let selected = filter.apply(&records);
    if !filter.is_empty() {
        tracing::info!("Filter kept {} of {} rows", selected.len(), records.len());
    }

    let report = analytics::analyze(&selected);
    tracing::info!(
        "Report {period}: {} employees, {} missing, {} absent, {} over-limit weeks",
        report.total_employees(),
        report.missing,
        report.absent,
        report.long_work_list.len()
    );
    Ok((period, filter, report))
}

fn run_note(action: NoteAction, notes_path: &Path) -> anyhow::Result<()> {
    let mut notes = ExplanationNotes::load(notes_path)?;

    match action {
        NoteAction::Set { emp, date, text } => {
            let text = text.unwrap_or_else(|| NOTE_TEMPLATE.to_string());
            notes.set(&emp, &date, &text);
            notes.save(notes_path)?;
            tracing::info!("Saved note for {emp} on {date}");
        }
        NoteAction::Remove { emp, date } => {
            if notes.remove(&emp, &date).is_some() {
                notes.save(notes_path)?;
                tracing::info!("Removed note for {emp} on {date}");
            } else {
                println!("No note for {emp} on {date}");
            }
        }
        NoteAction::Show { emp, date } => match notes.get_by_key(&format!("{emp}-{date}")) {
            Some(text) => println!("{text}"),
            None => println!("No note for {emp} on {date}"),
        },
    }
    Ok(())
}

fn init_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        return Err(anyhow!("{} already exists (use --force to overwrite)", path.display()));
    }
    AppConfig::default().save(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
