//! Command-line advisor
//!
//! Runs the advice pipeline once and prints the JSON result:
//! `farm-advise cotton Guntur "Andhra Pradesh" healthy`

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use farm_advisor::config::Config;
use farm_advisor::services::{AdviceService, PriceTable, PriceTableError, WeatherService};
use shared::{AdviceRequest, AdviceResponse, ErrorBody};

#[derive(Debug, Parser)]
#[command(name = "farm-advise", about = "Sell/hold advice for a crop in a district")]
struct Args {
    crop_name: String,
    district: String,
    state: String,
    crop_status: String,

    /// Price table to read instead of the configured one
    #[arg(long, env = "FA_PRICES__CSV_PATH")]
    prices: Option<String>,
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize result: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn fail(message: impl Into<String>) -> ExitCode {
    print_json(&ErrorBody::new(message));
    ExitCode::FAILURE
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => return fail(format!("Error processing request: {}", e)),
    };
    if let Some(prices) = args.prices {
        config.prices.csv_path = prices;
    }

    let prices = match PriceTable::load(&config.prices.csv_path) {
        Ok(table) => Some(Arc::new(table)),
        Err(PriceTableError::NotFound(_)) => None,
        Err(e) => return fail(format!("Error processing request: {}", e)),
    };

    let service = AdviceService::new(
        prices,
        config.prices.file_name(),
        WeatherService::new(&config.weather),
    );

    let request = AdviceRequest {
        crop_name: Some(args.crop_name),
        district: Some(args.district),
        state: Some(args.state),
        crop_status: Some(args.crop_status),
    };
    let Some(query) = request.into_query() else {
        return fail(shared::MISSING_ADVICE_FIELDS);
    };

    match service.advise(&query).await {
        response @ AdviceResponse::PriceTableMissing { .. } => {
            print_json(&response);
            ExitCode::FAILURE
        }
        response => print_json(&response),
    }
}
