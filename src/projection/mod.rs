//! Projection engine for drawdown and accumulation projections

mod state;
mod engine;
mod records;

pub use state::{Timing, DrawdownState, AccumulationState};
pub use engine::{
    simulate_forward, simulate_compound, Horizon, ProjectionEngine, ProjectionConfig,
    DEFAULT_MAX_YEARS,
};
pub use records::{ProjectionRecord, ProjectionResult, ProjectionSummary};
