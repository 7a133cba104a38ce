//! Year-over-year state tracking for the two simulators

use serde::{Deserialize, Serialize};

use super::records::ProjectionRecord;

/// When a period's cash flow happens relative to interest accrual
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timing {
    /// Ordinary annuity: interest on the opening balance, flow at year end
    #[default]
    End,
    /// Annuity due: flow at year start, interest on what remains
    Begin,
}

/// State of a drawdown projection between years
#[derive(Debug, Clone)]
pub struct DrawdownState {
    /// Last completed projection year (0 before the first year)
    pub year: u32,

    /// Principal after the last completed year
    pub principal: f64,

    /// First year's withdrawal
    pub first_expense: f64,

    /// Nominal annual return
    pub annual_return: f64,

    /// Annual growth of the withdrawal
    pub growth_rate: f64,

    pub timing: Timing,
}

impl DrawdownState {
    pub fn new(
        principal: f64,
        first_expense: f64,
        annual_return: f64,
        growth_rate: f64,
        timing: Timing,
    ) -> Self {
        Self {
            year: 0,
            principal,
            first_expense,
            annual_return,
            growth_rate,
            timing,
        }
    }

    /// Withdrawal for a 1-indexed year, grown geometrically from the first
    pub fn expense_for_year(&self, year: u32) -> f64 {
        self.first_expense * (1.0 + self.growth_rate).powi(year as i32 - 1)
    }

    /// Advance one year and return its record
    pub fn advance_year(&mut self) -> ProjectionRecord {
        self.year += 1;
        let expense = self.expense_for_year(self.year);

        let growth = match self.timing {
            Timing::End => {
                let growth = self.principal * self.annual_return;
                self.principal = self.principal + growth - expense;
                growth
            }
            Timing::Begin => {
                self.principal -= expense;
                let growth = self.principal * self.annual_return;
                self.principal += growth;
                growth
            }
        };

        ProjectionRecord::new(self.year, expense, growth, self.principal)
    }
}

/// State of an accumulation projection between years
#[derive(Debug, Clone)]
pub struct AccumulationState {
    /// Last completed projection year (0 before the first year)
    pub year: u32,

    /// Balance after the last contribution
    pub balance: f64,

    /// Contribution added each month (negative for withdrawals)
    pub monthly: f64,

    /// Nominal annual return, compounded monthly
    pub annual_return: f64,
}

impl AccumulationState {
    pub fn new(balance: f64, monthly: f64, annual_return: f64) -> Self {
        Self {
            year: 0,
            balance,
            monthly,
            annual_return,
        }
    }

    /// Credit one month of interest, then add the contribution
    pub fn advance_month(&mut self) {
        self.balance = self.balance * (1.0 + self.annual_return / 12.0) + self.monthly;
    }

    /// Advance twelve months and return the year's record
    pub fn advance_year(&mut self) -> ProjectionRecord {
        self.year += 1;
        for _ in 0..12 {
            self.advance_month();
        }

        ProjectionRecord::new(self.year, 0.0, self.balance, self.balance)
    }
}
