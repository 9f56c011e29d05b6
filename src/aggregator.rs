use std::collections::{BTreeMap, HashSet};
use chrono::NaiveDate;
use crate::models::forecast::{DataNote, DaySummary, Reading, TemperatureRange};

/// Number of readings in a full day given 3-hour resolution
pub const EXPECTED_READINGS: usize = 8;

/// Hours of daylight assumed by the sunshine estimate
const DAYLIGHT_HOURS: f64 = 12.0;

/// Aggregates raw 3-hour readings into one summary per calendar date.
///
/// Days are returned in chronological order and each summary only depends on the
/// readings of its own day. Missing values never fail the aggregation, they end up
/// as `None` in the summary and as a note on what is missing.
///
/// Temperatures are rounded half to even, i.e. 10.5 becomes 10 and 11.5 becomes 12.
/// Sunshine hours are rounded to one decimal from their exact binary value.
///
/// # Arguments
///
/// * 'readings' - readings with valid timestamps, in any order
pub fn aggregate(readings: &[Reading]) -> Vec<DaySummary> {
    let mut days: BTreeMap<NaiveDate, Vec<&Reading>> = BTreeMap::new();
    for r in readings {
        days.entry(r.date_time.date()).or_default().push(r);
    }

    days.into_iter()
        .map(|(date, day)| summarize_day(date, &day))
        .collect::<Vec<DaySummary>>()
}

fn summarize_day(date: NaiveDate, day: &[&Reading]) -> DaySummary {
    let sunshine_hours = sunshine_hours(day);

    DaySummary {
        date,
        temperature: temperature_range(day),
        precipitation: total_precipitation(day),
        descriptions: unique_descriptions(day),
        sunshine_hours,
        notes: completeness_notes(day, sunshine_hours.is_none()),
    }
}

/// Resolves the daily high/low, preferring direct temperatures over min/max fields
///
/// # Arguments
///
/// * 'day' - all readings for one date
fn temperature_range(day: &[&Reading]) -> Option<TemperatureRange> {
    let temps = day.iter().filter_map(|r| r.temp).collect::<Vec<f64>>();
    if !temps.is_empty() {
        return Some(TemperatureRange { high: round_whole(max(&temps)), low: round_whole(min(&temps)) });
    }

    if day.iter().any(|r| r.temp_min.is_some() && r.temp_max.is_some()) {
        let highs = day.iter().filter_map(|r| r.temp_max).collect::<Vec<f64>>();
        let lows = day.iter().filter_map(|r| r.temp_min).collect::<Vec<f64>>();
        return Some(TemperatureRange { high: round_whole(max(&highs)), low: round_whole(min(&lows)) });
    }

    None
}

fn total_precipitation(day: &[&Reading]) -> f64 {
    let rain: f64 = day.iter().map(|r| r.rain_3h.unwrap_or(0.0)).sum();
    let snow: f64 = day.iter().map(|r| r.snow_3h.unwrap_or(0.0)).sum();

    rain + snow
}

/// Returns non-empty descriptions in first seen order without duplicates
fn unique_descriptions(day: &[&Reading]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    day.iter()
        .filter_map(|r| r.description.as_deref())
        .filter(|d| !d.is_empty() && seen.insert(*d))
        .map(|d| d.to_string())
        .collect::<Vec<String>>()
}

/// Estimates hours of sunshine from mean cloud coverage assuming a fixed 12-hour day
///
/// # Arguments
///
/// * 'day' - all readings for one date
fn sunshine_hours(day: &[&Reading]) -> Option<f64> {
    let clouds = day.iter().filter_map(|r| r.clouds).collect::<Vec<f64>>();
    if clouds.is_empty() {
        return None;
    }

    let mean_clouds = clouds.iter().sum::<f64>() / clouds.len() as f64;
    let hours = DAYLIGHT_HOURS * (1.0 - mean_clouds / 100.0);

    // round on the decimal form, scaling by ten first can turn 7.9499.. into a tie
    format!("{:.1}", hours).parse::<f64>().ok()
}

/// Builds notes on missing data, in fixed order.
///
/// A reading holding only temp_min/temp_max still counts as missing its temperature,
/// even when those fields were used to resolve the daily range.
///
/// # Arguments
///
/// * 'day' - all readings for one date
/// * 'no_cloud_data' - whether cloud coverage was absent for the whole day
fn completeness_notes(day: &[&Reading], no_cloud_data: bool) -> Vec<DataNote> {
    let mut notes: Vec<DataNote> = Vec::new();

    let missing_readings = EXPECTED_READINGS.saturating_sub(day.len());
    if missing_readings > 0 {
        notes.push(DataNote::MissingReadings(missing_readings));
    }

    let missing_temp = day.iter().filter(|r| r.temp.is_none()).count();
    if missing_temp > 0 {
        notes.push(DataNote::MissingTemperature(missing_temp));
    }

    let missing_precip = day.iter().filter(|r| r.rain_3h.is_none() && r.snow_3h.is_none()).count();
    if missing_precip > 0 {
        notes.push(DataNote::MissingPrecipitation(missing_precip));
    }

    if no_cloud_data {
        notes.push(DataNote::MissingCloudData);
    }

    notes
}

fn round_whole(value: f64) -> i64 {
    value.round_ties_even() as i64
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}
