//! Aggregate statistics over discharge records
//!
//! Every function here is pure: it takes whatever subset the caller already
//! filtered and never throws on empty input. Callers own filtering.
//!
//! - [`seasonal`] - Volume/discharge statistics over a subset
//! - [`yearly`] - Per-year seasonal comparison and multi-year averages
//! - [`country_share`] - Volume split between countries
//! - [`period`] - Half-period trend and capacity utilization

pub mod country_share;
pub mod period;
pub mod seasonal;
pub mod yearly;

#[cfg(test)]
pub mod tests;

pub use country_share::calculate_country_share;
pub use period::{calculate_capacity_utilization, compare_periods};
pub use seasonal::calculate_seasonal_analytics;
pub use yearly::{calculate_multi_year_average, calculate_yearly_comparison};
