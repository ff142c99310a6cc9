//! habitgrid - habit goal and streak evaluator
//!
//! Loads a habit snapshot and prints its goal line, streak and grid indicators
//! for a given day.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use habitgrid_core::config::validate_grid_weeks;
use habitgrid_core::goals::{summarize, DayCellState, HabitSummary, Streak};
use habitgrid_core::{Config, HabitSnapshot, HabitType};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "habitgrid")]
#[command(about = "Evaluate a habit's goals and streaks")]
#[command(version)]
struct Args {
    /// Habit snapshot file (TOML)
    snapshot: PathBuf,

    /// Day to evaluate as today (format: YYYY-MM-DD, default: current day)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Output format: text (default) or json
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Number of week columns in the grid (default: from config)
    #[arg(long)]
    weeks: Option<u32>,
}

/// Everything printed for one habit.
#[derive(Debug, Serialize)]
struct Report<'a> {
    habit: &'a str,
    habit_type: HabitType,
    qualifying_weeks: usize,
    #[serde(flatten)]
    summary: &'a HabitSummary,
}

fn main() -> Result<()> {
    let args = Args::parse();

    Config::ensure_xdg_env();
    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = habitgrid_core::logging::init(&config.logging).ok();

    tracing::info!(snapshot = %args.snapshot.display(), "habitgrid starting");

    let calendar = config
        .calendar
        .to_calendar()
        .context("invalid calendar configuration")?;

    let weeks = args.weeks.unwrap_or(config.grid.weeks);
    validate_grid_weeks(weeks).context("invalid --weeks")?;

    let snapshot = HabitSnapshot::load_from(&args.snapshot)
        .with_context(|| format!("failed to load snapshot {}", args.snapshot.display()))?;
    let (habit, history) = snapshot
        .evaluation_inputs(&calendar)
        .context("snapshot is not a valid habit")?;

    tracing::info!(
        habit = %snapshot.habit.name,
        completion_records = snapshot.completions.len(),
        tracked_days = history.len(),
        "Snapshot loaded"
    );

    let today = args.today.unwrap_or_else(|| calendar.today());
    let summary = summarize(&habit, &history, today, &calendar, weeks);

    tracing::info!(
        %today,
        streak = ?summary.streak,
        qualifying_weeks = summary.qualifying_week_count(),
        qualifying_months = summary.qualifying_months.len(),
        "Evaluation complete"
    );

    let report = Report {
        habit: &snapshot.habit.name,
        habit_type: habit.habit_type(),
        qualifying_weeks: summary.qualifying_week_count(),
        summary: &summary,
    };

    match args.format.as_str() {
        "json" => print_json(&report)?,
        "text" => print_text(&report),
        other => anyhow::bail!("Unknown format: {}. Use 'text' or 'json'", other),
    }

    Ok(())
}

fn print_text(report: &Report) {
    let summary = report.summary;

    println!("{} ({})", report.habit, report.habit_type.as_str());
    println!("   Goal:     {}", summary.subtitle.goal_text);
    if summary.subtitle.has_secondary() {
        println!(
            "   Status:   {}",
            summary.subtitle.secondary_text.as_deref().unwrap_or_default()
        );
    }
    println!("   Streak:   {}", streak_display(summary.streak));
    println!(
        "   Today:    {} ({})",
        cell_label(summary.today_state),
        summary.today
    );
    if let Some(left) = summary.left_this_period {
        println!("   Left:     {} this period", left);
    }
    println!(
        "   Weeks:    {} of {} met goal",
        report.qualifying_weeks, summary.grid.weeks
    );
    println!("             {}", indicator_strip(&summary.week_indicators));

    let months = if summary.qualifying_months.is_empty() {
        "none".to_string()
    } else {
        summary
            .qualifying_months
            .iter()
            .map(|month| month.format("%b %Y").to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("   Months:   {}", months);
}

fn print_json(report: &Report) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn streak_display(streak: Option<Streak>) -> String {
    match streak {
        Some(streak) => format!(
            "{} {}{}",
            streak.count,
            streak.period.as_str(),
            if streak.count == 1 { "" } else { "s" }
        ),
        None => "none".to_string(),
    }
}

fn cell_label(state: DayCellState) -> &'static str {
    match state {
        DayCellState::Inactive => "inactive",
        DayCellState::Failed => "missed",
        DayCellState::Partial(_) => "partial",
        DayCellState::Completed => "completed",
    }
}

/// One character per week column, oldest first.
fn indicator_strip(indicators: &[bool]) -> String {
    indicators
        .iter()
        .map(|lit| if *lit { '#' } else { '.' })
        .collect()
}
