//! Asset allocation and the weighted nominal return it implies

pub mod loader;

pub use loader::{load_allocation, load_allocation_from_reader};

use serde::{Deserialize, Serialize};

use crate::error::AllocationError;

/// One asset class in a portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Asset class label, e.g. "Equities"
    pub name: String,

    /// Relative weight; percentages and fractions both work
    pub weight: f64,

    /// Expected nominal annual return (decimal)
    pub expected_return: f64,
}

impl Holding {
    pub fn new(name: impl Into<String>, weight: f64, expected_return: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            expected_return,
        }
    }
}

/// Portfolio mix used to derive the engine's nominal return
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetAllocation {
    pub holdings: Vec<Holding>,
}

impl AssetAllocation {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self { holdings }
    }

    /// Check that the weights can be normalized
    pub fn validate(&self) -> Result<(), AllocationError> {
        if self.holdings.is_empty() {
            return Err(AllocationError::Empty);
        }

        for holding in &self.holdings {
            if !holding.weight.is_finite() || !holding.expected_return.is_finite() {
                return Err(AllocationError::NonFinite {
                    name: holding.name.clone(),
                });
            }
            if holding.weight < 0.0 {
                return Err(AllocationError::NegativeWeight {
                    name: holding.name.clone(),
                });
            }
        }

        if self.total_weight() <= 0.0 {
            return Err(AllocationError::ZeroWeight);
        }

        Ok(())
    }

    pub fn total_weight(&self) -> f64 {
        self.holdings.iter().map(|h| h.weight).sum()
    }

    /// Weight-normalized average of the holdings' expected returns
    pub fn weighted_return(&self) -> Result<f64, AllocationError> {
        self.validate()?;

        let weighted: f64 = self
            .holdings
            .iter()
            .map(|h| h.weight * h.expected_return)
            .sum();

        Ok(weighted / self.total_weight())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sixty_forty() -> AssetAllocation {
        AssetAllocation::new(vec![
            Holding::new("Equities", 60.0, 0.08),
            Holding::new("Bonds", 40.0, 0.03),
        ])
    }

    #[test]
    fn test_weighted_return() {
        assert_abs_diff_eq!(sixty_forty().weighted_return().unwrap(), 0.06, epsilon = 1e-12);
    }

    #[test]
    fn test_fraction_and_percent_weights_agree() {
        let fractions = AssetAllocation::new(vec![
            Holding::new("Equities", 0.6, 0.08),
            Holding::new("Bonds", 0.4, 0.03),
        ]);

        assert_abs_diff_eq!(
            fractions.weighted_return().unwrap(),
            sixty_forty().weighted_return().unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_weights_need_not_sum_to_one() {
        let partial = AssetAllocation::new(vec![
            Holding::new("Equities", 30.0, 0.08),
            Holding::new("Cash", 10.0, 0.02),
        ]);
        assert_abs_diff_eq!(partial.weighted_return().unwrap(), 0.065, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_allocations() {
        assert!(matches!(
            AssetAllocation::default().weighted_return(),
            Err(AllocationError::Empty)
        ));

        let zero = AssetAllocation::new(vec![Holding::new("Cash", 0.0, 0.02)]);
        assert!(matches!(zero.weighted_return(), Err(AllocationError::ZeroWeight)));

        let negative = AssetAllocation::new(vec![
            Holding::new("Equities", 120.0, 0.08),
            Holding::new("Short", -20.0, 0.03),
        ]);
        assert!(matches!(
            negative.weighted_return(),
            Err(AllocationError::NegativeWeight { name }) if name == "Short"
        ));

        let nan = AssetAllocation::new(vec![Holding::new("Gold", 10.0, f64::NAN)]);
        assert!(matches!(nan.weighted_return(), Err(AllocationError::NonFinite { .. })));
    }
}
