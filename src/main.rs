use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use casual_pay::calculation::{
    DateWindow, TimelineOptions, build_timeline, calculate_tax, monthly_summaries,
    weekly_earnings, weekly_equivalent,
};
use casual_pay::config::ConfigLoader;
use casual_pay::models::{PayCycle, TaxProfile};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Months of history a timeline covers when no window is given.
const DEFAULT_MONTHS_BACK: u32 = 3;
/// Months ahead a timeline covers when no window is given.
const DEFAULT_MONTHS_AHEAD: u32 = 1;

#[derive(Parser, Debug)]
#[command(
    name = "casual-pay",
    about = "Work out pay, pay dates and withholding for casual shifts",
    version
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute shifts and pay periods and print them as JSON
    Timeline(TimelineArgs),
    /// Print the withholding on a single gross amount
    Tax(TaxArgs),
}

#[derive(Args, Debug)]
struct TimelineArgs {
    /// Reference data directory (award, breaks, rates, holidays)
    #[arg(long, default_value = "config/casual")]
    config: PathBuf,
    /// User profile with employers (YAML or JSON)
    #[arg(long)]
    user: PathBuf,
    /// Shift records (YAML or JSON)
    #[arg(long)]
    shifts: PathBuf,
    /// First date to fill with empty pay periods (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// Last date to fill with empty pay periods (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,
    /// Date the default window is centred on (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Skip the withholding pass
    #[arg(long)]
    no_tax: bool,
    /// Print per-month totals instead of the full timeline
    #[arg(long)]
    monthly: bool,
}

#[derive(Args, Debug)]
struct TaxArgs {
    /// Gross pay for the cycle
    #[arg(long, value_parser = parse_amount)]
    gross: Decimal,
    /// Pay cycle: weekly, fortnightly or monthly
    #[arg(long, default_value = "weekly", value_parser = parse_cycle)]
    cycle: PayCycle,
    /// Do not claim the tax-free threshold
    #[arg(long)]
    no_tax_free_threshold: bool,
    /// No tax file number has been provided
    #[arg(long)]
    no_tfn: bool,
    /// Payee is a foreign resident
    #[arg(long)]
    foreign_resident: bool,
    /// Annual tax offset claimed through withholding
    #[arg(long, default_value = "0", value_parser = parse_amount)]
    offset: Decimal,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Command::Timeline(args) => run_timeline(args),
        Command::Tax(args) => run_tax(args),
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level/filter '{log_level}'"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}

fn run_timeline(args: TimelineArgs) -> Result<()> {
    let loader = ConfigLoader::load(&args.config)
        .with_context(|| format!("loading reference data from {}", args.config.display()))?;
    let profile = ConfigLoader::load_user(&args.user)?;
    let shifts = ConfigLoader::load_shifts(&args.shifts)?;

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let default_window = DateWindow::around(today, DEFAULT_MONTHS_BACK, DEFAULT_MONTHS_AHEAD);
    let window = DateWindow::new(
        args.from.unwrap_or(default_window.start),
        args.to.unwrap_or(default_window.end),
    )?;
    info!(award = %loader.award().code, start = %window.start, end = %window.end, "Building timeline");

    let options = TimelineOptions {
        window: Some(window),
        apply_tax: !args.no_tax,
    };
    let timeline = build_timeline(&shifts, &profile.employers, loader.data(), &options);

    if args.monthly {
        let summaries = monthly_summaries(&timeline.pay_dates);
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&timeline)?);
    }
    Ok(())
}

fn run_tax(args: TaxArgs) -> Result<()> {
    let profile = TaxProfile {
        tax_free_threshold: !args.no_tax_free_threshold,
        has_tfn: !args.no_tfn,
        foreign_resident: args.foreign_resident,
        tax_offset: args.offset,
    };
    let tax = calculate_tax(args.gross, args.cycle, &profile);

    let output = json!({
        "gross": args.gross,
        "cycle": args.cycle,
        "weeklyEarnings": weekly_earnings(weekly_equivalent(args.gross, args.cycle)),
        "tax": tax,
        "netPay": args.gross - tax,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_amount(raw: &str) -> Result<Decimal, String> {
    Decimal::from_str(raw.trim()).map_err(|err| format!("failed to parse '{raw}' as an amount ({err})"))
}

fn parse_cycle(raw: &str) -> Result<PayCycle, String> {
    raw.parse::<PayCycle>().map_err(|err| err.to_string())
}
