//! Scenario definitions and a runner for single and batch projections
//!
//! A [`Scenario`] carries exactly the parameters its model needs, so the three
//! operating modes never share loosely-typed flags.

use std::fmt;
use std::path::Path;

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::annuity::required_principal;
use crate::error::ScenarioFileError;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, Timing};

/// One projection request, tagged by the model it targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum Scenario {
    /// Solve for the principal that funds `years` growing withdrawals
    #[serde(rename = "principal", alias = "annuity_target")]
    AnnuityTarget {
        first_withdrawal: f64,
        annual_return: f64,
        #[serde(default)]
        growth_rate: f64,
        years: i32,
        #[serde(default)]
        timing: Timing,
    },

    /// Run a principal down until it is exhausted
    #[serde(rename = "years", alias = "depletion_target")]
    DepletionTarget {
        initial_principal: f64,
        first_withdrawal: f64,
        annual_return: f64,
        #[serde(default)]
        growth_rate: f64,
        #[serde(default)]
        timing: Timing,
        /// Overrides the engine's `max_years` when present
        #[serde(default)]
        max_years: Option<u32>,
    },

    /// Compound a balance with monthly contributions
    #[serde(rename = "compound", alias = "accumulation_target")]
    AccumulationTarget {
        #[serde(default)]
        principal: f64,
        monthly: f64,
        annual_return: f64,
        years: i32,
    },
}

/// Model a scenario is evaluated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Annuity,
    Depletion,
    Accumulation,
}

/// Informational notice about scenario inputs; never stops a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioWarning {
    /// Withdrawals grow at least as fast as the principal earns
    ReturnNotAboveInflation { annual_return: f64, growth_rate: f64 },
}

impl fmt::Display for ScenarioWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioWarning::ReturnNotAboveInflation {
                annual_return,
                growth_rate,
            } => write!(
                f,
                "Return {:.2}% does not exceed withdrawal growth {:.2}%",
                annual_return * 100.0,
                growth_rate * 100.0
            ),
        }
    }
}

impl Scenario {
    pub fn kind(&self) -> ScenarioKind {
        match self {
            Scenario::AnnuityTarget { .. } => ScenarioKind::Annuity,
            Scenario::DepletionTarget { .. } => ScenarioKind::Depletion,
            Scenario::AccumulationTarget { .. } => ScenarioKind::Accumulation,
        }
    }

    /// Warnings raised by the inputs alone
    pub fn warnings(&self) -> Vec<ScenarioWarning> {
        let rates = match *self {
            Scenario::AnnuityTarget {
                annual_return,
                growth_rate,
                ..
            }
            | Scenario::DepletionTarget {
                annual_return,
                growth_rate,
                ..
            } => Some((annual_return, growth_rate)),
            Scenario::AccumulationTarget { .. } => None,
        };

        match rates {
            Some((annual_return, growth_rate)) if annual_return <= growth_rate => {
                vec![ScenarioWarning::ReturnNotAboveInflation {
                    annual_return,
                    growth_rate,
                }]
            }
            _ => Vec::new(),
        }
    }

    /// Parse one scenario or an array of scenarios from JSON
    pub fn list_from_json(json: &str) -> Result<Vec<Scenario>, ScenarioFileError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(Scenario),
            Many(Vec<Scenario>),
        }

        Ok(match serde_json::from_str(json)? {
            OneOrMany::One(scenario) => vec![scenario],
            OneOrMany::Many(scenarios) => scenarios,
        })
    }
}

/// Load scenarios from a JSON file holding one scenario or an array of them
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, ScenarioFileError> {
    let json = std::fs::read_to_string(path)?;
    Scenario::list_from_json(&json)
}

/// One cell of a required-principal sensitivity grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepPoint {
    pub annual_return: f64,
    pub growth_rate: f64,
    pub required_principal: f64,
}

/// Runner for single and batch projections sharing one config
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let results = runner.run_batch(&load_scenarios("scenarios.json")?);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with a specific config
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run a single projection
    pub fn run(&self, scenario: &Scenario) -> ProjectionResult {
        self.engine.project(scenario)
    }

    /// Run many independent projections in parallel, results in input order
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<ProjectionResult> {
        info!("Running {} scenarios", scenarios.len());
        scenarios
            .par_iter()
            .map(|scenario| self.engine.project(scenario))
            .collect()
    }

    /// Required principal across a grid of returns and growth rates.
    ///
    /// Points come back row-major: returns outer, growth rates inner.
    pub fn sweep_required_principal(
        &self,
        first_withdrawal: f64,
        years: i32,
        timing: Timing,
        returns: &[f64],
        growth_rates: &[f64],
    ) -> Vec<SweepPoint> {
        let grid: Vec<(f64, f64)> = returns
            .iter()
            .flat_map(|&r| growth_rates.iter().map(move |&g| (r, g)))
            .collect();

        grid.par_iter()
            .map(|&(annual_return, growth_rate)| SweepPoint {
                annual_return,
                growth_rate,
                required_principal: required_principal(
                    first_withdrawal,
                    annual_return,
                    growth_rate,
                    years,
                    timing,
                ),
            })
            .collect()
    }

    pub fn config(&self) -> &ProjectionConfig {
        self.engine.config()
    }
}
