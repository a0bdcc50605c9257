use crate::context::{ContextError, DemandContext};
use crate::history::HistoryData;
use crate::model::FitError;
use crate::price::{cost_breakdown, suggest_price, CostParams, PriceOutcome};
use crate::request::{DemandOutcome, PredictionRequest};
use crate::table::DataError;

use std::path::PathBuf;

/* =================== Public configuration types =================== */

#[derive(Debug)]
pub struct Config {
    pub data_path: PathBuf,
    pub history_path: PathBuf,
    pub action: Action,
}

#[derive(Debug, Clone)]
pub enum Action {
    Fit { json: bool },
    Predict(Predict),
    Price(Price),
    History(History),
}

#[derive(Debug, Clone)]
pub struct Predict {
    pub request: PredictionRequest,
}

#[derive(Debug, Clone)]
pub struct Price {
    pub request: PredictionRequest,
    pub costs: CostParams,
}

#[derive(Debug, Clone)]
pub struct History {
    pub season: String,
}

/* =================== Error type (no process::exit) =================== */

#[derive(thiserror::Error, Debug)]
pub enum CmdError {
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("fit error: {0}")]
    Fit(#[from] FitError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Msg(String),
}

impl From<ContextError> for CmdError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Data(e) => CmdError::Data(e),
            ContextError::Fit(e) => CmdError::Fit(e),
        }
    }
}

/* =================== Entry point =================== */

impl Config {
    pub fn run(&self) -> Result<(), CmdError> {
        match &self.action {
            Action::Fit { json } => self.run_fit(*json),
            Action::Predict(p) => self.run_predict(p),
            Action::Price(p) => self.run_price(p),
            Action::History(h) => self.run_history(h),
        }
    }
}

/* =================== Actions =================== */

impl Config {
    fn run_fit(&self, json: bool) -> Result<(), CmdError> {
        let ctx = DemandContext::init(&self.data_path)?;
        let summary = ctx.model().summary();

        if json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }

        println!("Fit on {} rows, held out {}.", summary.n_train, summary.n_test);
        println!("intercept: {:.4}", summary.intercept);
        for (name, coef) in summary.features.iter().zip(summary.coefficients.iter()) {
            println!("{:>28}: {:.4}", name, coef);
        }
        println!("dispersion: {:.4}", summary.dispersion);
        println!("held-out r2: {:.4}, rmse: {:.4}", summary.r2, summary.rmse);
        Ok(())
    }

    fn run_predict(&self, p: &Predict) -> Result<(), CmdError> {
        let ctx = DemandContext::init(&self.data_path)?;
        let outcome = ctx.predict_demand(&p.request)?;
        print_outcome(&outcome);
        Ok(())
    }

    fn run_price(&self, p: &Price) -> Result<(), CmdError> {
        let ctx = DemandContext::init(&self.data_path)?;
        match ctx.predict_demand(&p.request)? {
            DemandOutcome::NotOperating => println!("{}", PriceOutcome::NotOperating),
            DemandOutcome::Zero => println!("{}", PriceOutcome::NonPositiveDemand),
            DemandOutcome::Estimate { demand, .. } => match suggest_price(demand, &p.costs) {
                PriceOutcome::Price(price) => {
                    println!("Suggested price per bike per hour: {:.2}", price);
                    let split = cost_breakdown(demand, &p.costs);
                    println!(
                        "Hour expenses: fixed {:.2}, variable {:.2}",
                        split.fixed, split.variable
                    );
                },
                other => println!("{}", other),
            },
        }
        Ok(())
    }

    fn run_history(&self, h: &History) -> Result<(), CmdError> {
        let data = HistoryData::read_csv(&self.history_path)?;
        let profile = data.hourly_mean(&h.season);
        if profile.is_empty() {
            return Err(CmdError::Msg(format!(
                "No rows for season '{}'. Seasons in data: {}",
                h.season,
                data.seasons().join(", ")
            )));
        }

        println!("Mean demand per hour, {}:", h.season);
        for (hour, mean) in profile {
            println!("{:>4}: {:.1}", hour, mean);
        }
        Ok(())
    }
}

fn print_outcome(outcome: &DemandOutcome) {
    match outcome {
        DemandOutcome::NotOperating => {
            println!("No demand: the service is not operating that day.")
        },
        _ => println!("{}", outcome),
    }
}
