use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    MissingColumn(String),
    NoFeatureColumns,
    NotEnoughRows { rows: usize, needed: usize },
    LengthMismatch { expected: usize, got: usize },
    UnknownFeature(String),
    DegenerateDesign,
    NonFiniteDispersion,
    StatError(&'static str),
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::MissingColumn(name) => {
                write!(f, "dataset is missing the '{name}' column")
            },
            FitError::NoFeatureColumns => {
                write!(f, "dataset has no feature columns left after dropping target")
            },
            FitError::NotEnoughRows { rows, needed } => {
                write!(f, "not enough rows to fit: got {rows}, need at least {needed}")
            },
            FitError::LengthMismatch { expected, got } => {
                write!(f, "feature vector has {got} values, schema expects {expected}")
            },
            FitError::UnknownFeature(name) => {
                write!(f, "no value available for feature column '{name}'")
            },
            FitError::DegenerateDesign => {
                write!(f, "design matrix is too ill-conditioned to solve")
            },
            FitError::NonFiniteDispersion => {
                write!(f, "non-finite residual dispersion")
            },
            FitError::StatError(msg) => write!(f, "statistical error: {msg}"),
        }
    }
}

impl std::error::Error for FitError {}

pub type FitResult<T> = Result<T, FitError>;
