//! Normalization of raw extract values.
//!
//! - **numeric**: float parsing and truncation shared by the numeric encoders
//! - **datetime**: per-source date formats and clock-time durations
//! - **categorical**: fixed label → code tables with miss policies

pub mod categorical;
pub mod datetime;
pub mod numeric;

pub use categorical::{MissPolicy, Normalizer};
pub use datetime::{clock_duration_seconds, parse_clock, parse_date};
pub use numeric::{parse_f64, truncate_to_i64};
