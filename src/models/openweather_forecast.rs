use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;
use crate::models::forecast::{Location, Reading};

/// Timestamp format of the `dt_txt` field
pub const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Deserialize)]
pub struct FullMain {
    pub temp: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
}

#[derive(Deserialize)]
pub struct FullWeather {
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct FullVolume {
    #[serde(rename = "3h")]
    pub three_hours: Option<f64>,
}

#[derive(Deserialize)]
pub struct FullClouds {
    pub all: Option<f64>,
}

#[derive(Deserialize)]
pub struct FullListItem {
    pub dt_txt: Option<Value>,
    pub main: Option<FullMain>,
    #[serde(default)]
    pub weather: Vec<FullWeather>,
    pub rain: Option<FullVolume>,
    pub snow: Option<FullVolume>,
    pub clouds: Option<FullClouds>,
}

#[derive(Deserialize)]
pub struct FullCity {
    pub name: Option<String>,
    pub country: Option<String>,
}

#[derive(Deserialize)]
pub struct FullForecast {
    pub cod: Option<Value>,
    pub message: Option<Value>,
    pub list: Option<Vec<FullListItem>>,
    pub city: Option<FullCity>,
}

impl FullForecast {
    /// Returns the in-band status code, which OpenWeatherMap sends either as a string or a number
    pub fn status_code(&self) -> Option<u16> {
        match self.cod.as_ref()? {
            Value::String(s) => s.trim().parse::<u16>().ok(),
            Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            _ => None,
        }
    }

    /// Returns the in-band message, if any, as plain text
    pub fn status_message(&self) -> Option<String> {
        match self.message.as_ref()? {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    pub fn location(&self) -> Option<Location> {
        let city = self.city.as_ref()?;
        let name = city.name.as_ref().filter(|n| !n.is_empty())?;

        Some(Location { name: name.clone(), country: city.country.clone().filter(|c| !c.is_empty()) })
    }
}

impl FullListItem {
    /// Transforms a raw list item to a Reading.
    /// Returns None if the timestamp is missing, not a string or can't be parsed.
    pub fn to_reading(&self) -> Option<Reading> {
        let dt_txt = self.dt_txt.as_ref()?.as_str()?;
        let date_time = NaiveDateTime::parse_from_str(dt_txt, DT_TXT_FORMAT).ok()?;

        let description = self.weather
            .first()
            .and_then(|w| w.description.clone())
            .filter(|d| !d.is_empty());

        Some(Reading {
            date_time,
            temp: self.main.as_ref().and_then(|m| m.temp),
            temp_min: self.main.as_ref().and_then(|m| m.temp_min),
            temp_max: self.main.as_ref().and_then(|m| m.temp_max),
            description,
            rain_3h: self.rain.as_ref().and_then(|v| v.three_hours),
            snow_3h: self.snow.as_ref().and_then(|v| v.three_hours),
            clouds: self.clouds.as_ref().and_then(|c| c.all),
        })
    }
}
