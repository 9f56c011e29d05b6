use std::io::ErrorKind;
use std::time::Duration;
use log::{debug, info, warn};
use ureq::Agent;
use crate::config::OpenWeatherParameters;
use crate::errors::ForecastError;
use crate::forecast::ForecastSource;
use crate::models::forecast::{ForecastFeed, Reading};
use crate::models::openweather_forecast::FullForecast;
use crate::zip_code::base_zip;

const FORECAST_PATH: &str = "/data/2.5/forecast";

/// Struct for fetching 5 day / 3 hour forecasts from OpenWeatherMap
pub struct OpenWeather {
    agent: Agent,
    api_key: String,
    base_url: String,
    units: String,
    max_response_bytes: u64,
}

impl OpenWeather {
    /// Returns an OpenWeather struct ready for fetching forecasts
    ///
    /// The agent is configured to not treat non-2xx statuses as transport errors
    /// since each status is classified separately.
    ///
    /// # Arguments
    ///
    /// * 'config' - OpenWeatherMap configuration holding api key, endpoint and limits
    pub fn new(config: &OpenWeatherParameters) -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build();

        let agent = agent_config.into();

        Self {
            agent,
            api_key: config.api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            units: config.units.to_string(),
            max_response_bytes: config.max_response_bytes,
        }
    }

    /// Retrieves the forecast for a US ZIP code.
    ///
    /// The response body is capped at the configured size while it is read, so neither a
    /// missing nor an understated Content-Length header gets past the limit.
    ///
    /// # Arguments
    ///
    /// * 'zip_code' - a validated US ZIP code
    pub fn get_forecast(&self, zip_code: &str) -> Result<ForecastFeed, ForecastError> {
        let url = format!("{}{}", self.base_url, FORECAST_PATH);
        let zip_query = format!("{},us", base_zip(zip_code));
        debug!("requesting forecast from {} for zip {}", url, zip_query);

        let mut response = self.agent
            .get(url.as_str())
            .query("zip", &zip_query)
            .query("appid", &self.api_key)
            .query("units", &self.units)
            .call()
            .map_err(|e| transport_error(e, zip_code))?;

        let status = response.status().as_u16();
        if let Err(e) = check_status(status, zip_code) {
            warn!("forecast request for {} failed with http status {}", zip_code, status);
            return Err(e);
        }

        let json = response.body_mut()
            .with_config()
            .limit(self.max_response_bytes)
            .read_to_string()
            .map_err(|e| transport_error(e, zip_code))?;

        let feed = parse_forecast(&json, zip_code)?;
        info!("fetched {} readings for zip {}", feed.readings.len(), zip_code);

        Ok(feed)
    }
}

impl ForecastSource for OpenWeather {
    fn fetch(&self, zip_code: &str) -> Result<ForecastFeed, ForecastError> {
        self.get_forecast(zip_code)
    }
}

/// Parses a forecast document into a feed of readings.
///
/// List items without a parsable timestamp are dropped. An in-band error status is
/// classified as if it were the http status.
///
/// # Arguments
///
/// * 'json' - the response body
/// * 'zip_code' - the ZIP code the forecast was requested for
pub fn parse_forecast(json: &str, zip_code: &str) -> Result<ForecastFeed, ForecastError> {
    let forecast: FullForecast = serde_json::from_str(json)
        .map_err(|e| ForecastError::UpstreamResponseMalformed(e.to_string()))?;

    if let Some(status) = forecast.status_code() {
        if let Err(e) = check_status(status, zip_code) {
            warn!("forecast for {} reported status {}: {}",
                  zip_code, status, forecast.status_message().unwrap_or_default());
            return Err(e);
        }
    }

    let list = forecast.list
        .as_ref()
        .ok_or_else(|| ForecastError::UpstreamResponseMalformed("forecast list is missing".to_string()))?;

    if list.is_empty() {
        return Err(ForecastError::NoUsableData("No forecast data available for this location.".to_string()));
    }

    let readings = list.iter()
        .filter_map(|item| {
            let reading = item.to_reading();
            if reading.is_none() {
                debug!("dropping reading with timestamp {:?}", item.dt_txt);
            }
            reading
        })
        .collect::<Vec<Reading>>();

    Ok(ForecastFeed { location: forecast.location(), readings })
}

/// Classifies an http status, where anything but 2xx is an error
///
/// # Arguments
///
/// * 'status' - the http status code
/// * 'zip_code' - the ZIP code the forecast was requested for
pub fn check_status(status: u16, zip_code: &str) -> Result<(), ForecastError> {
    match status {
        200..=299 => Ok(()),
        404 => Err(ForecastError::LocationNotFound(zip_code.to_string())),
        401 => Err(ForecastError::UpstreamUnavailable("API key is invalid or expired.".to_string())),
        429 => Err(ForecastError::UpstreamUnavailable("API rate limit exceeded. Please try again later.".to_string())),
        _ => Err(ForecastError::UpstreamUnavailable(format!("Error fetching weather data: http status {}", status))),
    }
}

/// Maps transport level errors to forecast errors
///
/// # Arguments
///
/// * 'e' - the error from ureq
/// * 'zip_code' - the ZIP code the forecast was requested for
fn transport_error(e: ureq::Error, zip_code: &str) -> ForecastError {
    warn!("forecast request for {} failed: {}", zip_code, e);
    match e {
        ureq::Error::StatusCode(status) => match check_status(status, zip_code) {
            Err(e) => e,
            Ok(()) => ForecastError::UpstreamUnavailable(format!("Error fetching weather data: http status {}", status)),
        },
        ureq::Error::BodyExceedsLimit(limit) => ForecastError::UpstreamResponseTooLarge(limit),
        ureq::Error::Timeout(_) =>
            ForecastError::UpstreamUnavailable("Weather service request timed out. Please try again.".to_string()),
        ureq::Error::Io(e) if e.kind() == ErrorKind::TimedOut =>
            ForecastError::UpstreamUnavailable("Weather service request timed out. Please try again.".to_string()),
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed =>
            ForecastError::UpstreamUnavailable(
                "Unable to connect to weather service. Please check your internet connection.".to_string()),
        e => ForecastError::UpstreamUnavailable(format!("Error fetching weather data: {}", e)),
    }
}
