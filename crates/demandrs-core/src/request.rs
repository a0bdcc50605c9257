use crate::model::fiterror::{FitError, FitResult};
use crate::model::schema::FeatureSchema;
use crate::utils::normalize_name;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug)]
pub struct ParseSeasonError(String);

impl fmt::Display for ParseSeasonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for ParseSeasonError {}

/// Season selection for a prediction request. Autumn is the omitted one-hot
/// category in the training data, so it maps to all-zero season flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl FromStr for Season {
    type Err = ParseSeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" => Ok(Season::Autumn),
            "fall" => Ok(Season::Autumn),
            "winter" => Ok(Season::Winter),
            other => Err(ParseSeasonError(format!("invalid season: {other}"))),
        }
    }
}

impl Default for Season {
    fn default() -> Self {
        Self::Autumn
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Spring => write!(f, "Spring"),
            Season::Summer => write!(f, "Summer"),
            Season::Autumn => write!(f, "Autumn"),
            Season::Winter => write!(f, "Winter"),
        }
    }
}

impl Season {
    fn spring_flag(&self) -> f64 {
        (*self == Season::Spring) as u8 as f64
    }
    fn summer_flag(&self) -> f64 {
        (*self == Season::Summer) as u8 as f64
    }
    fn winter_flag(&self) -> f64 {
        (*self == Season::Winter) as u8 as f64
    }
}

/// One "what-if" prediction request from the dashboard layer: the weather and
/// calendar covariates for a single hour.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub hour: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub dew_point: f64,
    pub solar_radiation: f64,
    pub rainfall: f64,
    pub snowfall: f64,
    pub holiday: bool,
    pub functioning_day: bool,
    pub season: Season,
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self {
            hour: 0.0,
            temperature: 0.0,
            humidity: 0.0,
            wind_speed: 0.0,
            dew_point: 0.0,
            solar_radiation: 0.0,
            rainfall: 0.0,
            snowfall: 0.0,
            holiday: false,
            functioning_day: true,
            season: Season::default(),
        }
    }
}

impl PredictionRequest {
    /// Build the positional feature vector for a schema. Each schema column is
    /// matched by name, never by blind position, so a reordered or unexpected
    /// training file fails fast instead of silently mispredicting.
    pub fn to_features(&self, schema: &FeatureSchema) -> FitResult<Vec<f64>> {
        schema
            .names()
            .iter()
            .map(|name| {
                self.feature_value(name).ok_or_else(|| FitError::UnknownFeature(name.clone()))
            })
            .collect()
    }

    fn feature_value(&self, name: &str) -> Option<f64> {
        let key = normalize_name(name);
        let value = match key.as_str() {
            "hour" => self.hour,
            k if k.starts_with("temperature") => self.temperature,
            k if k.starts_with("humidity") => self.humidity,
            k if k.starts_with("windspeed") => self.wind_speed,
            k if k.starts_with("dewpointtemperature") => self.dew_point,
            k if k.starts_with("solarradiation") => self.solar_radiation,
            k if k.starts_with("rainfall") => self.rainfall,
            k if k.starts_with("snowfall") => self.snowfall,
            "holiday" => self.holiday as u8 as f64,
            "functioningday" => self.functioning_day as u8 as f64,
            k if k.contains("season") && k.ends_with("spring") => self.season.spring_flag(),
            k if k.contains("season") && k.ends_with("summer") => self.season.summer_flag(),
            k if k.contains("season") && k.ends_with("winter") => self.season.winter_flag(),
            _ => return None,
        };
        Some(value)
    }
}

/// Outcome of a demand prediction.
///
/// `NotOperating` is the defined empty result for a non-functioning day, not
/// an error. A negative point estimate is clamped to `Zero` and carries no
/// interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DemandOutcome {
    NotOperating,
    Zero,
    Estimate { demand: f64, low: f64, high: f64 },
}

impl DemandOutcome {
    /// Demand as a number where one is defined.
    pub fn demand(&self) -> Option<f64> {
        match self {
            DemandOutcome::NotOperating => None,
            DemandOutcome::Zero => Some(0.0),
            DemandOutcome::Estimate { demand, .. } => Some(*demand),
        }
    }
}

impl fmt::Display for DemandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemandOutcome::NotOperating => write!(f, ""),
            DemandOutcome::Zero => write!(f, "0"),
            DemandOutcome::Estimate { demand, low, high } => {
                write!(f, "CI: ({low:.2} , {high:.2})\nMean: {demand:.2}")
            },
        }
    }
}
