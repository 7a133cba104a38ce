//! Drawdown Projection - retirement drawdown and savings accumulation engine
//!
//! This library provides:
//! - The principal required to fund a growing stream of withdrawals
//! - Year-by-year drawdown projections, fixed-length or run to depletion
//! - Monthly-compounded accumulation projections with contributions
//! - Allocation-weighted nominal returns
//! - CSV export of projection records

pub mod annuity;
pub mod allocation;
pub mod error;
pub mod export;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use annuity::{required_principal, max_first_withdrawal};
pub use allocation::{AssetAllocation, Holding};
pub use error::{AllocationError, ExportError, ScenarioFileError};
pub use projection::{
    simulate_forward, simulate_compound, Horizon, ProjectionEngine, ProjectionConfig,
    ProjectionRecord, ProjectionResult, Timing,
};
pub use scenario::{Scenario, ScenarioKind, ScenarioRunner, ScenarioWarning};
