//! Single-feature least-squares regression and its persisted state.

pub use self::error::Error;
pub use self::regression::{Coefficients, Regression};
pub use self::samples::Samples;

pub mod codec;
mod error;
mod regression;
mod samples;
