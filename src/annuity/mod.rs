//! Present value of growing withdrawal streams

mod present_value;

pub use present_value::{
    required_principal, max_first_withdrawal, annuity_factor, RATE_EQUALITY_TOLERANCE,
};
