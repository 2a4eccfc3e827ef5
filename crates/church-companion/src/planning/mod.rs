pub mod compose;
pub mod cost;
pub mod demographics;
pub mod domain;
pub mod export;
pub mod footprint;
pub mod funnel;
pub mod goals;
mod session;

pub use domain::{BudgetTier, ChurchProfile, EventPlan, FunnelCounts, PlanningError, ZipFootprint};
pub use session::{FootprintSection, PlanRequest, PlanningOutcome, PlanningSession};
