use serde::Serialize;

use crate::model::Error;

/// Fitted line `y = slope * x + intercept`.
#[derive(Serialize, Copy, Clone, Debug, PartialEq)]
pub struct Coefficients {
    /// Also known as the angular coefficient.
    #[serde(rename = "angular_coefficient")]
    pub slope: f64,

    /// Also known as the linear coefficient.
    #[serde(rename = "linear_coefficient")]
    pub intercept: f64,
}

impl Coefficients {
    /// Closed-form ordinary least squares for a single predictor.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self, Error> {
        if x.len() != y.len() {
            return Err(Error::ShapeMismatch {
                n_inputs: x.len(),
                n_outputs: y.len(),
            });
        }
        match x.split_first() {
            Some((first, rest)) if rest.iter().any(|xi| xi != first) => {}
            _ => return Err(Error::DegenerateInput),
        }

        let n = x.len() as f64;
        let (sum_x, sum_y, sum_xx, sum_xy) = x.iter().zip(y).fold(
            (0.0, 0.0, 0.0, 0.0),
            |(sum_x, sum_y, sum_xx, sum_xy), (xi, yi)| {
                (sum_x + xi, sum_y + yi, sum_xx + xi * xi, sum_xy + xi * yi)
            },
        );

        let denominator = n * sum_xx - sum_x * sum_x;
        if denominator == 0.0 {
            return Err(Error::DegenerateInput);
        }
        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;

        if slope.is_finite() && intercept.is_finite() {
            Ok(Self { slope, intercept })
        } else {
            Err(Error::DegenerateInput)
        }
    }

    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Simple linear regression model.
///
/// The trained state is carried by the variant itself, so a fit which legitimately
/// yields zero coefficients is still reported as trained.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Regression {
    #[default]
    Untrained,

    Trained(Coefficients),
}

impl Regression {
    #[must_use]
    pub const fn new() -> Self {
        Self::Untrained
    }

    /// Fits the model on the samples, replacing any previous coefficients.
    ///
    /// On failure the model is left exactly as it was.
    pub fn fit(&mut self, x: &[f64], y: &[f64]) -> Result<(), Error> {
        *self = Self::Trained(Coefficients::fit(x, y)?);
        Ok(())
    }

    /// Predicts the output for exactly one finite input value.
    ///
    /// A prediction which overflows is an error rather than an infinity.
    pub fn predict(&self, x: &[f64]) -> Result<f64, Error> {
        let x = match x {
            [x] if x.is_finite() => *x,
            [_] => return Err(Error::NonFiniteInput),
            _ => return Err(Error::InvalidInputShape(x.len())),
        };
        let y = self.coefficients()?.evaluate(x);
        if y.is_finite() {
            Ok(y)
        } else {
            Err(Error::NonFinitePrediction)
        }
    }

    pub const fn is_trained(&self) -> bool {
        matches!(self, Self::Trained(_))
    }

    pub const fn coefficients(&self) -> Result<Coefficients, Error> {
        match self {
            Self::Trained(coefficients) => Ok(*coefficients),
            Self::Untrained => Err(Error::NotTrained),
        }
    }

    pub fn slope(&self) -> Result<f64, Error> {
        self.coefficients().map(|coefficients| coefficients.slope)
    }

    pub fn intercept(&self) -> Result<f64, Error> {
        self.coefficients().map(|coefficients| coefficients.intercept)
    }
}
