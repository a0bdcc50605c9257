use serde::Serialize;
use std::fmt;

/// Cost inputs supplied by the caller alongside a prediction request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostParams {
    pub fixed_cost: f64,
    pub variable_cost: f64,
    /// Target profit added per unit, as an absolute amount.
    pub profitability: f64,
}

/// Outcome of a unit-price suggestion. The formula divides by demand, so a
/// non-positive demand yields an explanatory result instead of a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PriceOutcome {
    NotOperating,
    NonPositiveDemand,
    Price(f64),
}

impl fmt::Display for PriceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceOutcome::NotOperating => {
                write!(f, "The system is not operating on a non-functioning day")
            },
            PriceOutcome::NonPositiveDemand => {
                write!(f, "The predicted demand is 0, the price can not be calculated")
            },
            PriceOutcome::Price(price) => write!(f, "{price:.2}"),
        }
    }
}

/// Suggested price per unit per hour for a given demand estimate:
/// `(fixed + variable * demand) / demand + profitability`.
pub fn suggest_price(demand: f64, costs: &CostParams) -> PriceOutcome {
    if demand <= 0.0 {
        return PriceOutcome::NonPositiveDemand;
    }
    let price = (costs.fixed_cost + costs.variable_cost * demand) / demand + costs.profitability;
    PriceOutcome::Price(price)
}

/// Hourly expense split behind the cost-distribution display: the fixed cost
/// against the demand-scaled variable cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub fixed: f64,
    pub variable: f64,
}

pub fn cost_breakdown(demand: f64, costs: &CostParams) -> CostBreakdown {
    CostBreakdown { fixed: costs.fixed_cost, variable: costs.variable_cost * demand }
}
