//! Bedtime calculation command.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use betterrest_core::error::Result;
use betterrest_core::{calculate_bedtime, BedtimeResult, Config, ModelSource, TimeFormat, WakeTime};

#[derive(Args)]
pub struct BedtimeArgs {
    /// When do you want to wake up? (HH:MM)
    #[arg(long)]
    pub wake: Option<WakeTime>,
    /// Desired amount of sleep in hours (4-12, quarter-hour steps)
    #[arg(long)]
    pub sleep: Option<f64>,
    /// Daily coffee intake in cups (1-20)
    #[arg(long)]
    pub coffee: Option<u32>,
    /// Model artifact to use instead of the configured one
    #[arg(long)]
    pub model: Option<PathBuf>,
    /// Time format: 12h or 24h
    #[arg(long)]
    pub format: Option<TimeFormat>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct BedtimeReport<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    bedtime: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    wake: String,
    sleep_amount: f64,
    coffee_cups: u32,
}

pub fn run(args: BedtimeArgs) -> Result<()> {
    let config = Config::load_or_default();

    let wake = match args.wake {
        Some(wake) => wake,
        None => config.wake_time()?,
    };
    let sleep_amount = args.sleep.unwrap_or(config.defaults.sleep_amount);
    let coffee_cups = args.coffee.unwrap_or(config.defaults.coffee_cups);
    let source = match args.model {
        Some(path) => ModelSource::File(path),
        None => config.model_source(),
    };
    let format = args.format.unwrap_or(config.display.time_format);

    let result = calculate_bedtime(&source, wake, sleep_amount, coffee_cups, format);

    if args.json {
        let report = BedtimeReport {
            ok: result.is_available(),
            bedtime: match &result {
                BedtimeResult::Bedtime(text) => Some(text.as_str()),
                BedtimeResult::Unavailable => None,
            },
            message: match &result {
                BedtimeResult::Bedtime(_) => None,
                BedtimeResult::Unavailable => Some(result.as_str()),
            },
            wake: wake.to_string(),
            sleep_amount,
            coffee_cups,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Your ideal bedtime is:");
        println!("{result}");
    }

    Ok(())
}
