//! `sched` CLI — aggregate a planner snapshot and lay it out from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Week schedule around a date (snapshot on stdin → JSON items on stdout)
//! sched items --zoom week --date 2024-01-10 < snapshot.json
//!
//! # Explicit window from a file
//! sched items -i snapshot.json --start 2024-01-01 --end 2024-01-31 --zoom month
//!
//! # Column layout for each day of the week, with a custom visible window
//! sched layout -i snapshot.json --zoom week --date 2024-01-10 --config grid.json
//!
//! # Where the now-indicator sits
//! sched now --at 09:30
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use schedule_engine::{
    get_schedule_items, layout_by_day, now_offset, split_all_day, window_for, LayoutConfig,
    LayoutRecord, ScheduleItem, Snapshot, StyleToken, WeekStart, Zoom,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "sched",
    version,
    about = "Planner schedule aggregation and time-grid layout"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ordered schedule items for a window as JSON
    Items {
        #[command(flatten)]
        window: WindowArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the per-day column layout (day or week zoom) as JSON
    Layout {
        #[command(flatten)]
        window: WindowArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the now-indicator offset in minutes, or "not visible"
    Now {
        /// Time of day as HH:MM (defaults to the current local time)
        #[arg(long)]
        at: Option<String>,
        /// JSON config file with the visible hour window
        #[arg(long)]
        config: Option<String>,
    },
}

#[derive(Args)]
struct WindowArgs {
    /// Snapshot JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Zoom level: day, week, month or year
    #[arg(long, default_value = "week")]
    zoom: Zoom,
    /// Anchor date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<String>,
    /// Explicit window start, overriding the zoom window
    #[arg(long, requires = "end")]
    start: Option<String>,
    /// Explicit window end, overriding the zoom window
    #[arg(long, requires = "start")]
    end: Option<String>,
    /// JSON config file (visible hours, render floor, week start)
    #[arg(long)]
    config: Option<String>,
}

/// Settings read from `--config`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CliConfig {
    #[serde(flatten)]
    layout: LayoutConfig,
    week_start: WeekStart,
}

/// One day column of the layout output.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DayLayout {
    date: NaiveDate,
    all_day: Vec<ScheduleItem>,
    timed: Vec<StyledRecord>,
}

#[derive(Serialize)]
struct StyledRecord {
    #[serde(flatten)]
    record: LayoutRecord,
    style: StyleToken,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Items { window, output } => {
            let config = load_config(window.config.as_deref())?;
            let snapshot = read_snapshot(window.input.as_deref())?;
            let (start, end) = resolve_window(&window, &config)?;
            let items = get_schedule_items(&snapshot, start, end, window.zoom);
            info!("{} items for {}..={}", items.len(), start, end);
            let json = serde_json::to_string_pretty(&items)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Layout { window, output } => {
            if !window.zoom.is_time_grid() {
                anyhow::bail!(
                    "Layout is only available for day and week zoom, not '{}'",
                    window.zoom
                );
            }
            let config = load_config(window.config.as_deref())?;
            let snapshot = read_snapshot(window.input.as_deref())?;
            let (start, end) = resolve_window(&window, &config)?;
            let items = get_schedule_items(&snapshot, start, end, window.zoom);
            let days = build_day_layouts(&items, start, end, &config.layout);
            let json = serde_json::to_string_pretty(&days)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Now { at, config } => {
            let config = load_config(config.as_deref())?;
            let time = match at {
                Some(raw) => schedule_engine::parse::parse_time(&raw)
                    .with_context(|| format!("Invalid --at time: {}", raw))?,
                None => Local::now().time(),
            };
            match now_offset(
                &time,
                config.layout.visible_start_hour,
                config.layout.visible_end_hour,
            ) {
                Some(offset) => println!("{}", offset),
                None => println!("not visible"),
            }
        }
    }

    Ok(())
}

/// One entry per day in the window, including days with nothing scheduled.
fn build_day_layouts(
    items: &[ScheduleItem],
    start: NaiveDate,
    end: NaiveDate,
    layout: &LayoutConfig,
) -> Vec<DayLayout> {
    let (banner, _) = split_all_day(items);
    let mut by_day = layout_by_day(items, layout);

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| DayLayout {
            date,
            all_day: banner
                .iter()
                .filter(|i| i.date == date)
                .map(|i| (*i).clone())
                .collect(),
            timed: by_day
                .remove(&date)
                .unwrap_or_default()
                .into_iter()
                .map(|record| StyledRecord {
                    style: record.item.style(),
                    record,
                })
                .collect(),
        })
        .collect()
}

fn resolve_window(args: &WindowArgs, config: &CliConfig) -> Result<(NaiveDate, NaiveDate)> {
    if let (Some(start), Some(end)) = (args.start.as_deref(), args.end.as_deref()) {
        let start = parse_date_arg("--start", start)?;
        let end = parse_date_arg("--end", end)?;
        if start > end {
            anyhow::bail!("--start {} is after --end {}", start, end);
        }
        return Ok((start, end));
    }

    let anchor = match args.date.as_deref() {
        Some(raw) => parse_date_arg("--date", raw)?,
        None => Local::now().date_naive(),
    };
    let window = window_for(anchor, args.zoom, config.week_start);
    debug!("{} window around {}: {:?}", args.zoom, anchor, window);
    Ok(window)
}

fn parse_date_arg(flag: &str, raw: &str) -> Result<NaiveDate> {
    schedule_engine::parse::parse_date(raw).with_context(|| format!("Invalid {} date: {}", flag, raw))
}

fn load_config(path: Option<&str>) -> Result<CliConfig> {
    let Some(path) = path else {
        return Ok(CliConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path))?;
    let config: CliConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path))?;
    config
        .layout
        .validate()
        .with_context(|| format!("Invalid config file: {}", path))?;
    Ok(config)
}

fn read_snapshot(path: Option<&str>) -> Result<Snapshot> {
    let json = read_input(path)?;
    Snapshot::from_json(&json).context("Failed to parse snapshot JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
