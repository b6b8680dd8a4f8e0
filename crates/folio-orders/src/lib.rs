//! Order entry checks.
//!
//! Validates untyped order input into a typed order, estimates its cost and
//! checks it against a portfolio's buying power.

mod buying_power;
mod desk;
mod validator;

pub use buying_power::{
    can_afford_position, check_buying_power, estimate_cost, has_enough_shares,
    validate_buying_power, BuyingPowerCheck,
};
pub use desk::OrderDesk;
pub use validator::{normalize_symbol, validate_order_input};
