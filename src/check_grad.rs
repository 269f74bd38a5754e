use ndarray::{Array1, Array2};
use rand::Rng;
use rand_distr::StandardNormal;

use super::error::{LogisticError, Result};

/// Analytic gradient next to its central finite-difference estimate.
#[derive(Debug, Clone)]
pub struct GradientCheck {
    pub analytic: Array1<f64>,
    pub numeric: Array1<f64>,
}

impl GradientCheck {
    /// `‖numeric - analytic‖ / ‖numeric + analytic‖`, or 0 when both vanish
    pub fn relative_difference(&self) -> f64 {
        let diff = norm(&(&self.numeric - &self.analytic));
        let sum = norm(&(&self.numeric + &self.analytic));
        if sum == 0.0 {
            diff
        } else {
            diff / sum
        }
    }

    pub fn max_abs_difference(&self) -> f64 {
        self.numeric
            .iter()
            .zip(self.analytic.iter())
            .fold(0.0, |max, (n, a)| f64::max(max, (n - a).abs()))
    }
}

fn norm(v: &Array1<f64>) -> f64 {
    v.dot(v).sqrt()
}

/// Compare the gradient `f` reports at `x` against central differences of
/// its value, perturbing one coordinate at a time by `±epsilon`.
pub fn check_grad<F>(f: F, x: &Array1<f64>, epsilon: f64) -> Result<GradientCheck>
where
    F: Fn(&Array1<f64>) -> Result<(f64, Array1<f64>)>,
{
    if !(epsilon > 0.0) {
        return Err(LogisticError::Domain("finite-difference step must be positive"));
    }

    let (_, analytic) = f(x)?;
    if analytic.len() != x.len() {
        return Err(LogisticError::ShapeMismatch { what: "gradient", got: analytic.len(), expected: x.len() });
    }

    let mut numeric = Array1::zeros(x.len());
    let mut probe = x.clone();
    for j in 0..x.len() {
        probe[j] = x[j] + epsilon;
        let (above, _) = f(&probe)?;
        probe[j] = x[j] - epsilon;
        let (below, _) = f(&probe)?;
        probe[j] = x[j];

        numeric[j] = (above - below) / (2.0 * epsilon);
    }

    Ok(GradientCheck { analytic, numeric })
}

/// A random logistic-regression problem with `n` examples and `m` features.
#[derive(Debug, Clone)]
pub struct Problem {
    pub weights: Array1<f64>,
    pub data: Array2<f64>,
    pub targets: Array1<f64>,
}

/// Weights and data drawn from a standard normal, targets from a fair coin.
pub fn random_problem<R: Rng>(rng: &mut R, n: usize, m: usize) -> Problem {
    let weights = Array1::from_shape_fn(m + 1, |_| rng.sample(StandardNormal));
    let data = Array2::from_shape_fn((n, m), |_| rng.sample(StandardNormal));

    let targets = Array1::from_shape_fn(n, |_| if rng.gen_bool(0.5) { 1.0 } else { 0.0 });

    Problem { weights, data, targets }
}
