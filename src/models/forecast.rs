use std::fmt;
use std::fmt::Formatter;
use chrono::{NaiveDate, NaiveDateTime};

/// Placeholder rendered for any value the upstream feed didn't provide
pub const NO_DATA: &str = "No data";

/// One raw 3-hour reading from the forecast feed
#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    pub date_time: NaiveDateTime,
    pub temp: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub description: Option<String>,
    pub rain_3h: Option<f64>,
    pub snow_3h: Option<f64>,
    pub clouds: Option<f64>,
}

/// Location as reported by the forecast provider
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub name: String,
    pub country: Option<String>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{}, {}", self.name, country),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Parsed forecast payload, i.e. all valid readings plus whatever location info came with them
#[derive(Debug)]
pub struct ForecastFeed {
    pub location: Option<Location>,
    pub readings: Vec<Reading>,
}

/// Daily high and low, rounded to whole degrees
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemperatureRange {
    pub high: i64,
    pub low: i64,
}

impl fmt::Display for TemperatureRange {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.high, self.low)
    }
}

/// Notes on data missing from a day's readings
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataNote {
    MissingReadings(usize),
    MissingTemperature(usize),
    MissingPrecipitation(usize),
    MissingCloudData,
}

impl fmt::Display for DataNote {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            DataNote::MissingReadings(n) => write!(f, "Missing {} readings", n),
            DataNote::MissingTemperature(n) => write!(f, "Missing {} temperature readings", n),
            DataNote::MissingPrecipitation(n) => write!(f, "Missing {} precipitation readings", n),
            DataNote::MissingCloudData => write!(f, "Missing cloud data"),
        }
    }
}

/// Summary of all readings sharing one calendar date
#[derive(Clone, Debug, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub temperature: Option<TemperatureRange>,
    pub precipitation: f64,
    pub descriptions: Vec<String>,
    pub sunshine_hours: Option<f64>,
    pub notes: Vec<DataNote>,
}

impl DaySummary {
    /// Returns the date in the US month/day/year form
    pub fn date_text(&self) -> String {
        self.date.format("%m/%d/%Y").to_string()
    }

    /// Returns temperature as "high/low" or the no data placeholder
    pub fn temperature_text(&self) -> String {
        self.temperature.map_or(NO_DATA.to_string(), |t| t.to_string())
    }

    pub fn precipitation_text(&self) -> String {
        format!("{:.1}", self.precipitation)
    }

    pub fn description_text(&self) -> String {
        if self.descriptions.is_empty() {
            NO_DATA.to_string()
        } else {
            self.descriptions.join(", ")
        }
    }

    pub fn sunshine_text(&self) -> String {
        self.sunshine_hours.map_or(NO_DATA.to_string(), |h| format!("{:.1}", h))
    }

    /// Returns all notes joined by "; ", or "Complete data" if nothing is missing
    pub fn notes_text(&self) -> String {
        if self.notes.is_empty() {
            "Complete data".to_string()
        } else {
            self.notes.iter().map(|n| n.to_string()).collect::<Vec<String>>().join("; ")
        }
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for DaySummary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} - Temp {:>7}, Precip {:>5} mm, Sun {:>7} h, {} ({})",
               self.date_text(),
               self.temperature_text(),
               self.precipitation_text(),
               self.sunshine_text(),
               self.description_text(),
               self.notes_text())
    }
}
