use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use gym_trainer_client::config::ClientConfig;
use gym_trainer_client::domain::{
    CalendarService, CreateScheduleInput, MonthSchedule, ScheduleError, ScheduleService, WeekdayCode,
    WeekdaySet,
};
use gym_trainer_client::io::RestScheduleGateway;

#[derive(Parser)]
#[command(
    name = "gym-trainer",
    about = "View and manage a trainer's recurring PT schedule",
    version,
    propagate_version = true
)]
struct Cli {
    /// YAML config file (defaults plus GYM_API_* environment variables when omitted)
    #[arg(long, global = true, env = "GYM_TRAINER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month calendar with every PT session on it
    Show {
        /// Month to show, as YYYY-MM (default: the current month)
        #[arg(long)]
        month: Option<String>,
        /// Date to highlight as today, as YYYY-MM-DD
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Create a recurring schedule slot
    Create {
        #[arg(long)]
        customer: Option<String>,
        /// Start date, as YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Weekday token, e.g. "246" or "7CN"
        #[arg(long, default_value = "")]
        weekdays: String,
        #[arg(long)]
        session: Option<String>,
        #[arg(long)]
        zone: Option<String>,
    },

    /// Ask the server whether a weekday/session selection conflicts
    Check {
        #[arg(long)]
        weekdays: String,
        #[arg(long)]
        session: String,
    },

    /// Cancel a schedule slot
    Cancel {
        slot_id: String,
        /// Confirm the cancellation; without it only the warning is printed
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match ClientConfig::load(cli.config.as_deref()) {
        Ok(config) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()))
                .init();
            run(cli.command, config).await
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: ClientConfig) -> Result<()> {
    info!("Using scheduling service at {}", config.api_base_url);
    let gateway = RestScheduleGateway::new(&config).context("Failed to set up the scheduling client")?;
    let service = ScheduleService::new(Arc::new(gateway));
    service.refresh().await.map_err(explain)?;

    match command {
        Commands::Show { month, today } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let calendar = CalendarService::new(today);
            if let Some(month) = month {
                calendar.set_focus_month(parse_month(&month)?);
            }
            let focus = calendar.focus_month();
            let grid = calendar
                .build_grid(focus, today)
                .with_context(|| format!("Month {} is outside the supported calendar", focus.format("%Y-%m")))?;
            println!("{}", calendar.month_title(&grid));
            print_month(&service.month_schedule(&grid));
        }
        Commands::Create {
            customer,
            date,
            weekdays,
            session,
            zone,
        } => {
            let input = CreateScheduleInput {
                customer_id: customer,
                date,
                weekdays: WeekdaySet::decode(&weekdays),
                session_slot_id: session,
                zone_id: zone,
            };
            let outcome = service.create_schedule(input).await.map_err(explain)?;
            println!("{}", outcome.success_message);
        }
        Commands::Check { weekdays, session } => {
            let weekdays = WeekdaySet::decode(&weekdays);
            if service.conflict_warning(weekdays, Some(&session)).await {
                println!("⚠️ Lịch tập có thể bị trùng vào {}", weekdays.labels());
            } else {
                println!("Không phát hiện trùng lịch");
            }
        }
        Commands::Cancel { slot_id, yes } => {
            let Some(prompt) = service.cancel_prompt(&slot_id) else {
                bail!("Không tìm thấy lịch tập đang hoạt động: {}", slot_id);
            };
            println!("{}", prompt.warning);
            if !yes {
                println!("Chạy lại với --yes để xác nhận.");
                return Ok(());
            }
            let outcome = service.cancel_schedule(prompt.confirm()).await.map_err(explain)?;
            println!("{}", outcome.success_message);
        }
    }

    Ok(())
}

fn explain(error: ScheduleError) -> anyhow::Error {
    if error.is_session_expired() {
        anyhow::anyhow!("Phiên đăng nhập đã hết hạn, vui lòng đăng nhập lại ({})", error)
    } else {
        anyhow::Error::new(error)
    }
}

fn parse_month(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month {:?}, expected YYYY-MM", value))
}

fn print_month(month: &MonthSchedule) {
    let header: Vec<String> = WeekdayCode::ALL
        .iter()
        .map(|code| format!("{:>4}", code.code()))
        .collect();
    println!("{}", header.join(""));

    for week in month.weeks() {
        let row: Vec<String> = week
            .iter()
            .map(|cell| {
                let marker = match (cell.day.is_today, cell.entries.is_empty()) {
                    (true, _) => '>',
                    (false, false) => '*',
                    (false, true) => ' ',
                };
                if cell.day.is_current_month {
                    format!("{}{:>3}", marker, cell.day.day)
                } else {
                    "   .".to_string()
                }
            })
            .collect();
        println!("{}", row.join(""));
    }

    println!();
    for cell in month.cells.iter().filter(|cell| cell.day.is_current_month) {
        for entry in &cell.entries {
            println!(
                "{} ({}): {} - {} @ {}",
                cell.day.date.format("%d/%m"),
                cell.day.weekday.label(),
                entry.customer_name,
                entry.session_slot_name,
                entry.zone_name
            );
        }
    }
    println!("{} buổi tập", month.total_occurrences());
}
