//! Core projection engine for yearly drawdown and accumulation projections

use log::{debug, warn};

use crate::annuity::required_principal;
use crate::scenario::Scenario;
use super::records::{ProjectionRecord, ProjectionResult};
use super::state::{AccumulationState, DrawdownState, Timing};

/// Default ceiling on run-to-depletion projections
pub const DEFAULT_MAX_YEARS: u32 = 200;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Maximum years a run-to-depletion projection may simulate
    pub max_years: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            max_years: DEFAULT_MAX_YEARS,
        }
    }
}

/// Stopping rule for the drawdown recurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    /// Simulate exactly this many years, whatever the principal does
    Fixed(u32),
    /// Simulate until the principal is exhausted or `max_years` is reached
    UntilDepleted { max_years: u32 },
}

/// Project a drawdown forward year by year.
///
/// In [`Horizon::UntilDepleted`] mode the principal is checked before each
/// year, so the year that exhausts it is still recorded. A starting principal
/// that is not a positive finite number yields no records in that mode.
pub fn simulate_forward(
    initial_principal: f64,
    first_expense: f64,
    annual_return: f64,
    growth_rate: f64,
    timing: Timing,
    horizon: Horizon,
) -> Vec<ProjectionRecord> {
    let mut state = DrawdownState::new(
        initial_principal,
        first_expense,
        annual_return,
        growth_rate,
        timing,
    );

    match horizon {
        Horizon::Fixed(years) => {
            let mut records = Vec::with_capacity(years as usize);
            for _ in 0..years {
                records.push(state.advance_year());
            }
            records
        }
        Horizon::UntilDepleted { max_years } => {
            let mut records = Vec::new();
            if !initial_principal.is_finite() || initial_principal <= 0.0 {
                return records;
            }

            while state.year < max_years && state.principal > 0.0 {
                records.push(state.advance_year());
            }

            if state.principal > 0.0 {
                debug!("Principal not depleted within {} years", max_years);
            } else {
                debug!("Principal depleted in year {}", state.year);
            }
            records
        }
    }
}

/// Compound a balance monthly with a fixed contribution, one record per year.
///
/// Produces exactly `years` records (none when `years <= 0`).
pub fn simulate_compound(
    years: i32,
    principal: f64,
    monthly: f64,
    annual_return: f64,
) -> Vec<ProjectionRecord> {
    let years = years.max(0) as u32;
    let mut state = AccumulationState::new(principal, monthly, annual_return);

    (0..years).map(|_| state.advance_year()).collect()
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run the model a scenario targets and collect its records
    pub fn project(&self, scenario: &Scenario) -> ProjectionResult {
        let mut result = ProjectionResult::new(scenario.kind());

        result.warnings = scenario.warnings();
        for warning in &result.warnings {
            warn!("{}", warning);
        }

        match *scenario {
            Scenario::AnnuityTarget {
                first_withdrawal,
                annual_return,
                growth_rate,
                years,
                timing,
            } => {
                let principal =
                    required_principal(first_withdrawal, annual_return, growth_rate, years, timing);
                result.required_principal = Some(principal);

                if years > 0 {
                    result.records = simulate_forward(
                        principal,
                        first_withdrawal,
                        annual_return,
                        growth_rate,
                        timing,
                        Horizon::Fixed(years as u32),
                    );
                }
            }
            Scenario::DepletionTarget {
                initial_principal,
                first_withdrawal,
                annual_return,
                growth_rate,
                timing,
                max_years,
            } => {
                let max_years = max_years.unwrap_or(self.config.max_years);
                result.records = simulate_forward(
                    initial_principal,
                    first_withdrawal,
                    annual_return,
                    growth_rate,
                    timing,
                    Horizon::UntilDepleted { max_years },
                );
            }
            Scenario::AccumulationTarget {
                principal,
                monthly,
                annual_return,
                years,
            } => {
                result.records = simulate_compound(years, principal, monthly, annual_return);
            }
        }

        debug!(
            "Projected {:?} scenario: {} records",
            result.kind,
            result.records.len()
        );
        result
    }
}
