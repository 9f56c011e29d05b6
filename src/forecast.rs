use std::fmt;
use std::fmt::Formatter;
use log::info;
use crate::aggregator::aggregate;
use crate::errors::ForecastError;
use crate::models::forecast::{DaySummary, ForecastFeed, Location};
use crate::zip_code::validate_zip_code;

/// Anything that can deliver a forecast feed for a validated ZIP code
pub trait ForecastSource {
    fn fetch(&self, zip_code: &str) -> Result<ForecastFeed, ForecastError>;
}

/// Daily forecast for one ZIP code
pub struct ZipForecast {
    pub zip_code: String,
    pub location: Option<Location>,
    pub reading_count: usize,
    pub days: Vec<DaySummary>,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for ZipForecast {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.location {
            Some(location) => writeln!(f, "Forecast for {} ({}), {} readings", self.zip_code, location, self.reading_count)?,
            None => writeln!(f, "Forecast for {}, {} readings", self.zip_code, self.reading_count)?,
        }
        for day in &self.days {
            writeln!(f, "{}", day)?;
        }

        Ok(())
    }
}

/// Validates the ZIP code, fetches its forecast and aggregates it into daily summaries
///
/// # Arguments
///
/// * 'source' - where to fetch the forecast from
/// * 'zip_input' - the ZIP code as entered by the user
pub fn get_forecast_by_zip<S: ForecastSource>(source: &S, zip_input: &str) -> Result<ZipForecast, ForecastError> {
    let zip_code = validate_zip_code(zip_input)?;

    let feed = source.fetch(&zip_code)?;
    let days = aggregate(&feed.readings);
    if days.is_empty() {
        return Err(ForecastError::NoUsableData("Unable to process forecast data for this location.".to_string()));
    }
    info!("aggregated {} readings into {} days for zip {}", feed.readings.len(), days.len(), zip_code);

    Ok(ZipForecast { zip_code, location: feed.location, reading_count: feed.readings.len(), days })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use chrono::NaiveDateTime;
    use crate::models::forecast::Reading;

    struct StubSource {
        result: fn() -> Result<ForecastFeed, ForecastError>,
        calls: Cell<usize>,
    }

    impl StubSource {
        fn new(result: fn() -> Result<ForecastFeed, ForecastError>) -> Self {
            StubSource { result, calls: Cell::new(0) }
        }
    }

    impl ForecastSource for StubSource {
        fn fetch(&self, _zip_code: &str) -> Result<ForecastFeed, ForecastError> {
            self.calls.set(self.calls.get() + 1);
            (self.result)()
        }
    }

    fn reading(date_time: &str, temp: f64) -> Reading {
        Reading {
            date_time: NaiveDateTime::parse_from_str(date_time, "%Y-%m-%d %H:%M:%S").unwrap(),
            temp: Some(temp),
            temp_min: None,
            temp_max: None,
            description: None,
            rain_3h: None,
            snow_3h: None,
            clouds: None,
        }
    }

    fn three_readings() -> Result<ForecastFeed, ForecastError> {
        Ok(ForecastFeed {
            location: Some(Location { name: "New York".to_string(), country: Some("US".to_string()) }),
            readings: vec![
                reading("2024-03-11 00:00:00", 5.0),
                reading("2024-03-10 00:00:00", 10.0),
                reading("2024-03-10 03:00:00", 14.0),
            ],
        })
    }

    fn no_readings() -> Result<ForecastFeed, ForecastError> {
        Ok(ForecastFeed { location: None, readings: Vec::new() })
    }

    fn not_found() -> Result<ForecastFeed, ForecastError> {
        Err(ForecastError::LocationNotFound("00000".to_string()))
    }

    #[test]
    fn test_forecast_by_zip() {
        let source = StubSource::new(three_readings);
        let forecast = get_forecast_by_zip(&source, " 10001 ").unwrap();

        assert_eq!(forecast.zip_code, "10001");
        assert_eq!(forecast.reading_count, 3);
        let temps = forecast.days.iter()
            .map(|d| (d.date_text(), d.temperature_text()))
            .collect::<Vec<(String, String)>>();
        assert_eq!(temps, vec![
            ("03/10/2024".to_string(), "14/10".to_string()),
            ("03/11/2024".to_string(), "5/5".to_string()),
        ]);

        let text = forecast.to_string();
        assert!(text.starts_with("Forecast for 10001 (New York, US), 3 readings\n"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_invalid_zip_never_fetches() {
        let source = StubSource::new(three_readings);
        let result = get_forecast_by_zip(&source, "1234");

        assert!(matches!(result, Err(ForecastError::InvalidInput(_))));
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn test_no_days_is_no_usable_data() {
        let source = StubSource::new(no_readings);
        let result = get_forecast_by_zip(&source, "10001");

        assert!(matches!(result, Err(ForecastError::NoUsableData(_))));
    }

    #[test]
    fn test_source_errors_pass_through() {
        let source = StubSource::new(not_found);
        let result = get_forecast_by_zip(&source, "00000");

        assert!(matches!(result, Err(ForecastError::LocationNotFound(_))));
        assert_eq!(source.calls.get(), 1);
    }
}
