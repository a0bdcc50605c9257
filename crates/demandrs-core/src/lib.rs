pub mod cmd;
pub mod context;
pub mod history;
pub mod model;
pub mod model_selection;
pub mod price;
pub mod request;
pub mod stats;
pub mod table;
pub mod utils;

pub use context::{ContextError, DemandContext};
pub use history::HistoryData;
pub use model::{DemandModel, FitError, FitResult, FeatureSchema, INTERVAL_Z};
pub use price::{cost_breakdown, suggest_price, CostBreakdown, CostParams, PriceOutcome};
pub use request::{DemandOutcome, PredictionRequest, Season};
pub use table::{DataError, Table};
