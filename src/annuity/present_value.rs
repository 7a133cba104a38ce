//! Growing-annuity present value and its inverse
//!
//! The closed forms here are exact counterparts of the drawdown recurrence in
//! [`crate::projection::simulate_forward`]: a principal equal to
//! [`required_principal`] runs down to zero at the end of the horizon.

use crate::projection::Timing;

/// Return and growth rates closer than this use the limiting formula
pub const RATE_EQUALITY_TOLERANCE: f64 = 1e-9;

/// Present value of a withdrawal stream whose first payment is 1.
///
/// Returns 0 when `years <= 0`. The result is not clamped; degenerate rates
/// (e.g. a return of -100%) can produce non-finite values.
pub fn annuity_factor(annual_return: f64, growth_rate: f64, years: i32, timing: Timing) -> f64 {
    if years <= 0 {
        return 0.0;
    }

    let ordinary = if (annual_return - growth_rate).abs() < RATE_EQUALITY_TOLERANCE {
        // Limit of the growing annuity as r -> g
        years as f64 / (1.0 + annual_return)
    } else {
        let ratio = ((1.0 + growth_rate) / (1.0 + annual_return)).powi(years);
        (1.0 - ratio) / (annual_return - growth_rate)
    };

    match timing {
        Timing::End => ordinary,
        Timing::Begin => ordinary * (1.0 + annual_return),
    }
}

/// Principal needed to fund `years` growing withdrawals, exhausting it exactly.
///
/// # Arguments
/// * `first_withdrawal` - Withdrawal in year 1
/// * `annual_return` - Nominal annual return on the principal
/// * `growth_rate` - Annual growth of the withdrawal (inflation)
/// * `years` - Horizon; 0 or negative returns 0
/// * `timing` - Whether withdrawals happen at year end or year start
///
/// # Returns
/// * `f64` - Required principal, never negative
pub fn required_principal(
    first_withdrawal: f64,
    annual_return: f64,
    growth_rate: f64,
    years: i32,
    timing: Timing,
) -> f64 {
    let pv = first_withdrawal * annuity_factor(annual_return, growth_rate, years, timing);

    if pv.is_finite() {
        pv.max(0.0)
    } else {
        0.0
    }
}

/// First-year withdrawal a principal can sustain for exactly `years`.
///
/// Inverse of [`required_principal`]. Returns 0 when the horizon or principal
/// is not positive, or when the annuity factor is degenerate.
pub fn max_first_withdrawal(
    principal: f64,
    annual_return: f64,
    growth_rate: f64,
    years: i32,
    timing: Timing,
) -> f64 {
    if years <= 0 || !principal.is_finite() || principal <= 0.0 {
        return 0.0;
    }

    let factor = annuity_factor(annual_return, growth_rate, years, timing);
    if !factor.is_finite() || factor <= 0.0 {
        return 0.0;
    }

    principal / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_non_positive_horizon() {
        assert_eq!(required_principal(100_000.0, 0.07, 0.03, 0, Timing::End), 0.0);
        assert_eq!(required_principal(100_000.0, 0.07, 0.03, -5, Timing::Begin), 0.0);
    }

    #[test]
    fn test_level_annuity_matches_textbook() {
        // 1000/year for 10 years at 5%: a-angle-n = 7.721735
        let pv = required_principal(1000.0, 0.05, 0.0, 10, Timing::End);
        assert_relative_eq!(pv, 7721.734929, epsilon = 1e-6);

        let due = required_principal(1000.0, 0.05, 0.0, 10, Timing::Begin);
        assert_relative_eq!(due, pv * 1.05, epsilon = 1e-9);
    }

    #[test]
    fn test_growing_annuity() {
        let pv = required_principal(100_000.0, 0.07, 0.03, 30, Timing::End);
        let ratio: f64 = (1.03_f64 / 1.07).powi(30);
        assert_relative_eq!(pv, 100_000.0 * (1.0 - ratio) / 0.04, epsilon = 1e-9);
    }

    #[test]
    fn test_equal_rates_use_limit() {
        let pv = required_principal(1000.0, 0.04, 0.04, 20, Timing::End);
        assert_relative_eq!(pv, 1000.0 * 20.0 / 1.04, epsilon = 1e-12);

        // Within tolerance counts as equal
        let near = required_principal(1000.0, 0.04, 0.04 + 1e-12, 20, Timing::End);
        assert_relative_eq!(near, pv, epsilon = 1e-12);

        let due = required_principal(1000.0, 0.04, 0.04, 20, Timing::Begin);
        assert_relative_eq!(due, 1000.0 * 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_near_equal_rates_are_continuous() {
        let limit = required_principal(1000.0, 0.05, 0.05, 30, Timing::End);
        let close = required_principal(1000.0, 0.05, 0.05 + 1e-6, 30, Timing::End);
        assert_relative_eq!(close, limit, max_relative = 1e-4);
    }

    #[test]
    fn test_never_negative() {
        let cases = [
            (-1000.0, 0.07, 0.03, 30, Timing::End),
            (1000.0, -1.0, 0.03, 10, Timing::End),
            (1000.0, -1.0, 0.03, 10, Timing::Begin),
            (1000.0, -2.0, 0.5, 3, Timing::Begin),
            (1000.0, 0.07, -2.5, 4, Timing::End),
            (0.0, 0.07, 0.03, 30, Timing::End),
        ];

        for (w, r, g, n, timing) in cases {
            let pv = required_principal(w, r, g, n, timing);
            assert!(pv >= 0.0, "pv {} for inputs {:?}", pv, (w, r, g, n, timing));
            assert!(pv.is_finite());
        }
    }

    #[test]
    fn test_return_below_inflation_still_positive() {
        let pv = required_principal(40_000.0, 0.02, 0.04, 25, Timing::End);
        assert!(pv > 40_000.0 * 25.0 / 1.02);
    }

    #[test]
    fn test_max_first_withdrawal_inverts_solver() {
        for timing in [Timing::End, Timing::Begin] {
            let principal = required_principal(36_000.0, 0.06, 0.025, 28, timing);
            let withdrawal = max_first_withdrawal(principal, 0.06, 0.025, 28, timing);
            assert_abs_diff_eq!(withdrawal, 36_000.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_max_first_withdrawal_degenerate() {
        assert_eq!(max_first_withdrawal(1_000_000.0, 0.05, 0.02, 0, Timing::End), 0.0);
        assert_eq!(max_first_withdrawal(0.0, 0.05, 0.02, 30, Timing::End), 0.0);
        assert_eq!(max_first_withdrawal(f64::NAN, 0.05, 0.02, 30, Timing::End), 0.0);
        assert_eq!(max_first_withdrawal(1_000_000.0, -1.0, 0.02, 30, Timing::End), 0.0);
    }
}
