pub mod api;
pub mod coefficients;
pub mod plot;
pub mod predict;
pub mod train;
