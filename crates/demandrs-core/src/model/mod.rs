pub mod demand;
pub mod fiterror;
pub mod schema;

pub use demand::{nominal_coverage, DemandModel, FitDiagnostics, ModelSummary, INTERVAL_Z};
pub use fiterror::{FitError, FitResult};
pub use schema::FeatureSchema;
