//! Command-line front end: decodes NIC numbers and prints the birth details.

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use sl_nic::{CalendarDate, Explanation, RejectionReason, decode};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nic-decode", version)]
#[command(about = "Discover the birth date, age and sex encoded in Sri Lankan NIC numbers")]
struct Cli {
    /// NIC numbers, e.g. 197419202757 or 996663272V
    #[arg(required = true)]
    nics: Vec<String>,

    /// Reference date for the age, as YYYY-MM-DD (defaults to today, local time)
    #[arg(long, env = "NIC_DECODE_TODAY")]
    today: Option<CalendarDate>,

    /// Explain how each field was derived
    #[arg(long, conflicts_with = "json")]
    explain: bool,

    /// Print one JSON object per NIC
    #[arg(long)]
    json: bool,
}

fn local_today() -> Result<CalendarDate> {
    let now = chrono::Local::now().date_naive();
    let year = u16::try_from(now.year()).context("local year out of range")?;
    let month = u8::try_from(now.month()).context("local month out of range")?;
    let day = u8::try_from(now.day()).context("local day out of range")?;
    Ok(CalendarDate::new(year, month, day)?)
}

fn render(nic: &str, today: &CalendarDate, cli: &Cli) -> Result<bool, RejectionReason> {
    if cli.json {
        let value = match decode(nic, today) {
            Ok(decoded) => serde_json::json!({ "nic": nic, "decoded": decoded }),
            Err(reason) if reason.is_recoverable() => {
                serde_json::json!({ "nic": nic, "error": reason.to_string() })
            }
            Err(reason) => return Err(reason),
        };
        println!("{value}");
        return Ok(value.get("error").is_none());
    }

    let result = if cli.explain {
        Explanation::of(nic, today).map(|exp| exp.to_string())
    } else {
        decode(nic, today).map(|decoded| {
            format!(
                "Date of Birth: {}\nCurrent Age: {} years\nGender: {}",
                decoded.birth_date().long_format(),
                decoded.age(),
                decoded.sex()
            )
        })
    };

    match result {
        Ok(text) => {
            println!("{nic}\n{text}\n");
            Ok(true)
        }
        Err(reason) if reason.is_recoverable() => {
            eprintln!("{nic}: {reason}\n");
            Ok(false)
        }
        Err(reason) => Err(reason),
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sl_nic=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let today = match cli.today {
        Some(date) => date,
        None => local_today()?,
    };
    tracing::debug!(%today, count = cli.nics.len(), "decoding");

    let mut all_valid = true;
    for nic in &cli.nics {
        all_valid &= render(nic, &today, &cli)?;
    }

    Ok(if all_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
