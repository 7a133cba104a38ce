//! Record output structures for projections

use serde::{Deserialize, Serialize};

use crate::scenario::{ScenarioKind, ScenarioWarning};

/// A single year of projection output
///
/// For drawdown projections `growth` is the interest earned that year. For
/// accumulation projections it carries the year-end balance, the same value
/// as `end_principal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRecord {
    /// Projection year (1-indexed)
    pub year: u32,

    /// Withdrawal taken this year (always 0 for accumulation)
    pub expense: f64,

    /// Interest earned (drawdown) or year-end balance (accumulation)
    pub growth: f64,

    /// Principal remaining at the end of the year
    pub end_principal: f64,
}

impl ProjectionRecord {
    pub fn new(year: u32, expense: f64, growth: f64, end_principal: f64) -> Self {
        Self {
            year,
            expense,
            growth,
            end_principal,
        }
    }

    /// Whether the principal is exhausted at the end of this year
    pub fn is_depleted(&self) -> bool {
        self.end_principal <= 0.0
    }
}

/// Complete projection result for one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    /// Which model produced the records
    pub kind: ScenarioKind,

    /// Principal solved for by the annuity solver (annuity target only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub required_principal: Option<f64>,

    /// Yearly records in chronological order
    pub records: Vec<ProjectionRecord>,

    /// Informational warnings raised for the inputs
    #[serde(default)]
    pub warnings: Vec<ScenarioWarning>,
}

impl ProjectionResult {
    pub fn new(kind: ScenarioKind) -> Self {
        Self {
            kind,
            required_principal: None,
            records: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Final principal, or 0 when no year was projected
    pub fn final_principal(&self) -> f64 {
        self.records.last().map(|r| r.end_principal).unwrap_or(0.0)
    }

    /// First year whose ending principal is at or below zero
    pub fn depletion_year(&self) -> Option<u32> {
        self.records.iter().find(|r| r.is_depleted()).map(|r| r.year)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_expense: f64 = self.records.iter().map(|r| r.expense).sum();

        // Accumulation growth is a running balance; summing it means nothing.
        let total_growth: f64 = match self.kind {
            ScenarioKind::Accumulation => 0.0,
            _ => self.records.iter().map(|r| r.growth).sum(),
        };

        ProjectionSummary {
            years: self.records.len() as u32,
            total_expense,
            total_growth,
            final_principal: self.final_principal(),
            depletion_year: self.depletion_year(),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub years: u32,
    pub total_expense: f64,
    pub total_growth: f64,
    pub final_principal: f64,
    pub depletion_year: Option<u32>,
}
