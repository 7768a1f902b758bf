//! Renders the training data and the fitted line as an SVG image.

use itertools::{Itertools, MinMaxResult};
use maud::{html, Markup};

use crate::model::{Coefficients, Samples};
use crate::prelude::*;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 480.0;
const MARGIN: f64 = 60.0;
const N_TICKS: usize = 5;

/// Data-to-pixel mapping of one axis.
#[derive(Copy, Clone)]
struct Axis {
    min: f64,
    max: f64,
    from: f64,
    to: f64,
}

impl Axis {
    fn new(values: impl Iterator<Item = f64>, from: f64, to: f64) -> Result<Self> {
        let (min, max) = match values.minmax_by(f64::total_cmp) {
            MinMaxResult::NoElements => return Err(anyhow!("nothing to plot")),
            MinMaxResult::OneElement(value) => (value, value),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        if !min.is_finite() || !max.is_finite() {
            return Err(anyhow!("cannot plot non-finite values"));
        }
        let (min, max) = if min == max { (min - 1.0, max + 1.0) } else { (min, max) };
        Ok(Self { min, max, from, to })
    }

    fn include(self, value: f64) -> Self {
        if value.is_finite() {
            Self {
                min: self.min.min(value),
                max: self.max.max(value),
                ..self
            }
        } else {
            self
        }
    }

    fn map(&self, value: f64) -> f64 {
        self.from + (value - self.min) / (self.max - self.min) * (self.to - self.from)
    }

    fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        (0..N_TICKS).map(|i| self.min + (self.max - self.min) * i as f64 / (N_TICKS - 1) as f64)
    }
}

#[instrument(skip_all, fields(n_samples = samples.len()))]
pub fn render(samples: &Samples, coefficients: Coefficients) -> Result<Markup> {
    if samples.x.len() != samples.y.len() {
        return Err(anyhow!("sample lengths differ"));
    }
    let x_axis = Axis::new(samples.x.iter().copied(), MARGIN, WIDTH - MARGIN)?;
    let (x_start, x_end) = (x_axis.min, x_axis.max);
    let (y_start, y_end) = (coefficients.evaluate(x_start), coefficients.evaluate(x_end));
    let y_axis = Axis::new(samples.y.iter().copied(), HEIGHT - MARGIN, MARGIN)?
        .include(y_start)
        .include(y_end);
    let legend = format!(
        "Regression Line: y = {:.2}x + {:.2}",
        coefficients.slope, coefficients.intercept,
    );

    let markup = html! {
        svg xmlns="http://www.w3.org/2000/svg" width=(WIDTH) height=(HEIGHT) viewBox=(format!("0 0 {} {}", WIDTH, HEIGHT)) font-family="sans-serif" font-size="12" {
            rect width="100%" height="100%" fill="white" {}
            text x=(WIDTH / 2.0) y=(MARGIN / 2.0) text-anchor="middle" font-size="16" { "Linear Regression Model" }

            g stroke="#dddddd" {
                @for tick in x_axis.ticks() {
                    line x1=(x_axis.map(tick)) y1=(MARGIN) x2=(x_axis.map(tick)) y2=(HEIGHT - MARGIN) {}
                }
                @for tick in y_axis.ticks() {
                    line x1=(MARGIN) y1=(y_axis.map(tick)) x2=(WIDTH - MARGIN) y2=(y_axis.map(tick)) {}
                }
            }
            g fill="#555555" {
                @for tick in x_axis.ticks() {
                    text x=(x_axis.map(tick)) y=(HEIGHT - MARGIN + 16.0) text-anchor="middle" { (format_tick(tick)) }
                }
                @for tick in y_axis.ticks() {
                    text x=(MARGIN - 6.0) y=(y_axis.map(tick) + 4.0) text-anchor="end" { (format_tick(tick)) }
                }
            }
            text x=(WIDTH / 2.0) y=(HEIGHT - 16.0) text-anchor="middle" { "X (Independent Variable)" }
            text x="16" y=(HEIGHT / 2.0) text-anchor="middle" transform=(format!("rotate(-90 16 {})", HEIGHT / 2.0)) { "y (Dependent Variable)" }

            g fill="blue" {
                @for (x, y) in samples.iter() {
                    circle cx=(x_axis.map(x)) cy=(y_axis.map(y)) r="4" {}
                }
            }
            line x1=(x_axis.map(x_start)) y1=(y_axis.map(y_start)) x2=(x_axis.map(x_end)) y2=(y_axis.map(y_end)) stroke="red" stroke-width="2" {}

            g transform=(format!("translate({} {})", MARGIN + 10.0, MARGIN + 10.0)) {
                circle cx="6" cy="0" r="4" fill="blue" {}
                text x="16" y="4" { "Training Data" }
                line x1="0" y1="18" x2="12" y2="18" stroke="red" stroke-width="2" {}
                text x="16" y="22" { (legend) }
            }
        }
    };
    Ok(markup)
}

fn format_tick(value: f64) -> String {
    if value.abs() >= 1e4 || (value != 0.0 && value.abs() < 1e-2) {
        format!("{:.1e}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COEFFICIENTS: Coefficients = Coefficients {
        slope: 1.0,
        intercept: 1.0,
    };

    #[test]
    fn render_ok() -> Result {
        let samples = Samples {
            x: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            y: vec![2.0, 3.0, 4.0, 5.0, 6.0],
        };
        let svg = render(&samples, COEFFICIENTS)?.into_string();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<circle").count(), samples.len() + 1);
        assert!(svg.contains("Regression Line: y = 1.00x + 1.00"));
        assert!(svg.contains("Linear Regression Model"));
        Ok(())
    }

    #[test]
    fn flat_line_ok() -> Result {
        let samples = Samples {
            x: vec![1.0, 2.0],
            y: vec![2.0, 2.0],
        };
        let coefficients = Coefficients {
            slope: 0.0,
            intercept: 2.0,
        };
        let svg = render(&samples, coefficients)?.into_string();
        assert!(!svg.contains("NaN"));
        Ok(())
    }

    #[test]
    fn empty_samples_fail() {
        assert!(render(&Samples::default(), COEFFICIENTS).is_err());
    }

    #[test]
    fn axis_map_ok() -> Result {
        let axis = Axis::new([0.0, 10.0].into_iter(), 100.0, 200.0)?;
        assert!((axis.map(5.0) - 150.0).abs() < f64::EPSILON);
        let inverted = Axis::new([0.0, 10.0].into_iter(), 200.0, 100.0)?;
        assert!((inverted.map(10.0) - 100.0).abs() < f64::EPSILON);
        Ok(())
    }
}
