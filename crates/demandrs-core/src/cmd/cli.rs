use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::cmd::config::{Action, Config, History as HistoryCfg, Predict, Price as PriceCfg};
use crate::price::CostParams;
use crate::request::{PredictionRequest, Season};

#[derive(Debug, Parser)]
#[command(
    name = "demandrs",
    about = "Bike rental demand model and price suggestion tool",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Path to the model-ready dataset (pre-encoded, visibility-stripped)
    #[arg(
        long = "data",
        value_name = "PATH",
        default_value = "SeoulBikeDataClean.csv",
        global = true
    )]
    pub data_path: PathBuf,

    /// Path to the raw dataset used for the historic-demand view
    #[arg(
        long = "history",
        value_name = "PATH",
        default_value = "SeoulBikeData_utf8.csv",
        global = true
    )]
    pub history_path: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fit the demand model and print its summary
    Fit(FitArgs),

    /// Predict demand for one set of conditions
    Predict(PredictArgs),

    /// Suggest a unit price for one set of conditions and cost inputs
    Price(PriceArgs),

    /// Show mean historic demand per hour for a season
    History(HistoryArgs),
}

#[derive(Debug, Args)]
pub struct FitArgs {
    /// Emit the model summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Hour of day (0-23)
    #[arg(long, default_value_t = 0.0)]
    pub hour: f64,

    /// Air temperature in Celsius
    #[arg(long, default_value_t = 0.0)]
    pub temperature: f64,

    /// Relative humidity in percent
    #[arg(long, default_value_t = 0.0)]
    pub humidity: f64,

    /// Wind speed in m/s
    #[arg(long = "wind-speed", default_value_t = 0.0)]
    pub wind_speed: f64,

    /// Dew point temperature in Celsius
    #[arg(long = "dew-point", default_value_t = 0.0)]
    pub dew_point: f64,

    /// Solar radiation in MJ/m2
    #[arg(long = "solar-radiation", default_value_t = 0.0)]
    pub solar_radiation: f64,

    /// Rainfall in mm
    #[arg(long, default_value_t = 0.0)]
    pub rainfall: f64,

    /// Snowfall in cm
    #[arg(long, default_value_t = 0.0)]
    pub snowfall: f64,

    /// The hour falls on a holiday
    #[arg(long)]
    pub holiday: bool,

    /// The service is not operating that day
    #[arg(long = "non-functioning")]
    pub non_functioning: bool,

    /// Season (spring, summer, autumn, winter)
    #[arg(long, default_value = "autumn")]
    pub season: Season,
}

impl PredictArgs {
    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            hour: self.hour,
            temperature: self.temperature,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            dew_point: self.dew_point,
            solar_radiation: self.solar_radiation,
            rainfall: self.rainfall,
            snowfall: self.snowfall,
            holiday: self.holiday,
            functioning_day: !self.non_functioning,
            season: self.season,
        }
    }
}

#[derive(Debug, Args)]
pub struct PriceArgs {
    #[command(flatten)]
    pub conditions: PredictArgs,

    /// Fixed cost per hour
    #[arg(long = "fixed-cost")]
    pub fixed_cost: f64,

    /// Variable cost per bike
    #[arg(long = "variable-cost")]
    pub variable_cost: f64,

    /// Target profit per bike, as an absolute amount
    #[arg(long, default_value_t = 0.0)]
    pub profitability: f64,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Season to aggregate (spring, summer, autumn, winter)
    pub season: String,
}

impl Cli {
    pub fn into_config(self) -> Config {
        let action = match self.command {
            Commands::Fit(args) => Action::Fit { json: args.json },
            Commands::Predict(args) => Action::Predict(Predict { request: args.to_request() }),
            Commands::Price(args) => Action::Price(PriceCfg {
                request: args.conditions.to_request(),
                costs: CostParams {
                    fixed_cost: args.fixed_cost,
                    variable_cost: args.variable_cost,
                    profitability: args.profitability,
                },
            }),
            Commands::History(args) => Action::History(HistoryCfg { season: args.season }),
        };

        Config { data_path: self.data_path, history_path: self.history_path, action }
    }
}
