use thiserror::Error;

/// Caller-facing failures of the regression model and its state codec.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("input and output data must have the same length ({n_inputs} vs {n_outputs})")]
    ShapeMismatch { n_inputs: usize, n_outputs: usize },

    #[error("input data must contain at least two distinct values")]
    DegenerateInput,

    #[error("model has not been trained yet")]
    NotTrained,

    #[error("expected exactly one input value, got {0}")]
    InvalidInputShape(usize),

    #[error("input value must be a finite number")]
    NonFiniteInput,

    #[error("prediction is out of the floating-point range")]
    NonFinitePrediction,

    #[error("training samples are not available, train the model again")]
    MissingSamples,

    #[error("corrupt model state: {0}")]
    CorruptState(&'static str),
}
