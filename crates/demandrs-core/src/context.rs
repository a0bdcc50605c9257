use crate::history::HistoryData;
use crate::model::{DemandModel, FitError, FitResult};
use crate::price::{suggest_price, CostParams, PriceOutcome};
use crate::request::{DemandOutcome, PredictionRequest};
use crate::table::{DataError, Table};

use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ContextError {
    #[error("failed to load dataset: {0}")]
    Data(#[from] DataError),
    #[error("failed to fit demand model: {0}")]
    Fit(#[from] FitError),
}

/// Everything a request handler needs, built once at startup: the immutable
/// fitted model and, optionally, the display dataset. Requests borrow the
/// context; nothing is re-read or re-fit per request.
#[derive(Debug, Clone)]
pub struct DemandContext {
    model: DemandModel,
    history: Option<HistoryData>,
}

impl DemandContext {
    /// Load the model-ready dataset and fit once. Fails up front rather than
    /// serving with no data.
    pub fn init<P: AsRef<Path>>(data_path: P) -> Result<Self, ContextError> {
        let table = Table::read_csv(data_path)?;
        let model = DemandModel::fit(&table)?;
        Ok(Self { model, history: None })
    }

    pub fn with_history<P: AsRef<Path>>(mut self, history_path: P) -> Result<Self, ContextError> {
        self.history = Some(HistoryData::read_csv(history_path)?);
        Ok(self)
    }

    /// Explicit retrain on a fresh read of the dataset. The old model stays in
    /// place if the new fit fails.
    pub fn refit<P: AsRef<Path>>(&mut self, data_path: P) -> Result<(), ContextError> {
        let table = Table::read_csv(data_path)?;
        self.model = DemandModel::fit(&table)?;
        Ok(())
    }

    pub fn model(&self) -> &DemandModel {
        &self.model
    }

    pub fn history(&self) -> Option<&HistoryData> {
        self.history.as_ref()
    }

    /// Demand for one request. A non-functioning day short-circuits to the
    /// defined empty outcome; a negative estimate is clamped to zero with no
    /// interval.
    pub fn predict_demand(&self, request: &PredictionRequest) -> FitResult<DemandOutcome> {
        if !request.functioning_day {
            return Ok(DemandOutcome::NotOperating);
        }

        let features = request.to_features(self.model.schema())?;
        let demand = self.model.predict(&features)?;

        if demand < 0.0 {
            return Ok(DemandOutcome::Zero);
        }
        let (low, high) = self.model.confidence_interval(demand);
        Ok(DemandOutcome::Estimate { demand, low, high })
    }

    /// Price suggestion for one request: predict, then derive the unit price
    /// from the same estimate.
    pub fn suggest_price(
        &self,
        request: &PredictionRequest,
        costs: &CostParams,
    ) -> FitResult<PriceOutcome> {
        let outcome = match self.predict_demand(request)? {
            DemandOutcome::NotOperating => PriceOutcome::NotOperating,
            DemandOutcome::Zero => PriceOutcome::NonPositiveDemand,
            DemandOutcome::Estimate { demand, .. } => suggest_price(demand, costs),
        };
        Ok(outcome)
    }
}
