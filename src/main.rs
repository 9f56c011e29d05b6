use std::env;
use std::process::ExitCode;
use anyhow::{Context, Result};
use log::{error, info};
use crate::config::load_config;
use crate::forecast::get_forecast_by_zip;
use crate::logging::setup_logger;
use crate::manager_openweather::OpenWeather;

mod aggregator;
mod config;
mod errors;
mod forecast;
mod logging;
mod manager_openweather;
mod models;
mod zip_code;

const DEFAULT_CONFIG_FILE: &str = "config.toml";

fn main() -> ExitCode {
    let Some(zip_input) = env::args().nth(1) else {
        eprintln!("usage: zipforecast <ZIP code>");
        return ExitCode::from(2);
    };

    match run(&zip_input) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("An unexpected error occurred. Please try again. ({:#})", e);
            ExitCode::from(2)
        }
    }
}

/// Loads configuration, sets up logging and prints the daily forecast for the given ZIP code.
/// Forecast errors are reported with their user message, anything else is returned as an error.
///
/// # Arguments
///
/// * 'zip_input' - the ZIP code as given on the command line
fn run(zip_input: &str) -> Result<ExitCode> {
    let config_path = env::var("CONFIG_FILE").unwrap_or(DEFAULT_CONFIG_FILE.to_string());
    let config = load_config(&config_path, env::var("OPENWEATHER_API_KEY").ok())
        .with_context(|| format!("loading configuration from {}", config_path))?;

    let _handle = setup_logger(&config.general)?;
    info!("zipforecast version: {}", env!("CARGO_PKG_VERSION"));

    let openweather = OpenWeather::new(&config.openweather);

    match get_forecast_by_zip(&openweather, zip_input) {
        Ok(forecast) => {
            print!("{}", forecast);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("forecast for {:?} failed: {}", zip_input, e);
            eprintln!("{}", e.user_message());
            Ok(ExitCode::from(1))
        }
    }
}
