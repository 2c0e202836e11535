use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use slot_engine::{
    available_dates, available_slots, group_slots_by_date, to_views, AppointmentType,
    AvailableSlot, ExistingBooking, ScheduleConfig, SlotQuery, SlotView,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "slots", about = "Compute bookable slots from a schedule and existing bookings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print available slots as a JSON array
    Generate(SlotArgs),
    /// Print the distinct dates that have at least one slot
    Dates(SlotArgs),
    /// Print slots grouped by date as a JSON object
    Group(SlotArgs),
}

#[derive(Args)]
struct SlotArgs {
    /// Schedule configuration JSON file
    #[arg(short, long)]
    schedule: PathBuf,

    /// Existing bookings JSON file (array)
    #[arg(short, long)]
    bookings: Option<PathBuf>,

    /// Appointment type JSON file; supplies the default duration and capacity
    #[arg(short, long)]
    appointment_type: Option<PathBuf>,

    /// Appointment length in minutes (overrides the appointment type's)
    #[arg(short, long)]
    duration: Option<i64>,

    /// Restrict to a single date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,

    /// Window start; generation begins on its date (YYYY-MM-DDTHH:MM[:SS])
    #[arg(long, value_parser = parse_timestamp)]
    from: Option<NaiveDateTime>,

    /// Window end, exclusive (YYYY-MM-DDTHH:MM[:SS])
    #[arg(long, value_parser = parse_timestamp)]
    until: Option<NaiveDateTime>,

    /// Reference "now" (defaults to the local clock)
    #[arg(long, value_parser = parse_timestamp)]
    now: Option<NaiveDateTime>,

    /// Emit compact JSON
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            let slots = compute(&args)?;
            emit(&to_views(&slots), args.compact)
        }
        Commands::Dates(args) => {
            let slots = compute(&args)?;
            emit(&available_dates(&slots), args.compact)
        }
        Commands::Group(args) => {
            let slots = compute(&args)?;
            let grouped: BTreeMap<String, Vec<SlotView>> = group_slots_by_date(&slots)
                .into_iter()
                .map(|(date, slots)| (date, to_views(&slots)))
                .collect();
            emit(&grouped, args.compact)
        }
    }
}

fn compute(args: &SlotArgs) -> Result<Vec<AvailableSlot>> {
    let config: ScheduleConfig = read_json(&args.schedule)?;
    let bookings: Vec<ExistingBooking> = match &args.bookings {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    // Without a type file, --duration doubles as the type's default so the
    // override floor still applies to it.
    let appointment_type: AppointmentType = match (&args.appointment_type, args.duration) {
        (Some(path), _) => read_json(path)?,
        (None, Some(duration)) => AppointmentType {
            duration,
            max_capacity: None,
        },
        (None, None) => bail!("either --duration or --appointment-type is required"),
    };
    let query = SlotQuery {
        date: args.date.clone(),
        duration: args.duration,
        from: args.from,
        until: args.until,
    };

    let now = args.now.unwrap_or_else(|| Local::now().naive_local());
    tracing::debug!(%now, bookings = bookings.len(), "loaded inputs");

    Ok(available_slots(
        &config,
        &appointment_type,
        &bookings,
        &query,
        now,
    )?)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn emit<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{out}");
    Ok(())
}

fn parse_timestamp(s: &str) -> std::result::Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .or_else(|_| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|e| format!("invalid timestamp '{s}': {e}"))
}
