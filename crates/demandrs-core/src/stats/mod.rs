pub mod ols;
pub mod stats;

pub use ols::OlsReg;
pub use stats::{mean, r2_from_predictions, rmse, std_pop};
