//! Query result model structs.
//!
//! All structs derive `Serialize` so the API service can hand them to
//! `serde_json` directly.

use serde::Serialize;

/// One precipitation reading keyed by its date.
///
/// `prcp` is `None` when the station did not report a value that day,
/// which is not the same as a reading of zero inches.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatePrecipitation {
    /// Observation date (`YYYY-MM-DD`).
    pub date: String,
    /// Precipitation in inches.
    pub prcp: Option<f64>,
}

/// One temperature observation keyed by its date.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DateTemperature {
    pub date: String,
    /// Observed temperature in degrees Fahrenheit.
    pub tobs: f64,
}

/// Number of observations recorded by a station.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StationActivity {
    pub station: String,
    pub count: i64,
}

/// Lowest, highest and mean temperature for a single station.
///
/// Every field is `None` when the station has no observations.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct TemperatureSummary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

/// Temperature statistics across all stations for a date range.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct TemperatureStats {
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
}
