use ndarray::{Array1, Array2};
use std::f64::consts::PI;

use super::error::{LogisticError, Result};
use super::hyperparameters::Regularization;
use super::logistic::{check_targets, feature_count, with_bias_column};

/// A training objective for logistic regression, evaluated at `weights`.
///
/// `y` must be the predictions for `data` under `weights`, as returned by
/// `logistic_predict`; it is taken as an argument so callers that already
/// have it don't pay for a second forward pass.
pub trait Objective {
    /// The objective value and its gradient with respect to all `M + 1` weights
    fn value_and_gradient(
        &self,
        weights: &Array1<f64>,
        data: &Array2<f64>,
        targets: &Array1<f64>,
        y: &Array1<f64>,
    ) -> Result<(f64, Array1<f64>)>;
}

/// `(Σ t·log(y), Σ (1-t)·log(1-y))`, the two halves of the log-likelihood.
fn log_likelihood_terms(targets: &Array1<f64>, y: &Array1<f64>) -> Result<(f64, f64)> {
    check_targets(targets, y.len())?;

    let mut f1 = 0.0;
    let mut f2 = 0.0;
    for (&t, &p) in targets.iter().zip(y.iter()) {
        if !(p > 0.0 && p < 1.0) {
            return Err(LogisticError::Domain("prediction saturated to 0 or 1"));
        }
        f1 += t * p.ln();
        f2 += (1.0 - t) * (1.0 - p).ln();
    }
    Ok((f1, f2))
}

/// `X1ᵀ(y - t)`, accumulated over examples.
fn likelihood_gradient(weights: &Array1<f64>, data: &Array2<f64>, targets: &Array1<f64>, y: &Array1<f64>) -> Result<Array1<f64>> {
    feature_count(weights, data)?;
    if y.len() != data.nrows() {
        return Err(LogisticError::ShapeMismatch { what: "predictions", got: y.len(), expected: data.nrows() });
    }

    let x1 = with_bias_column(data);
    Ok(x1.t().dot(&(y - targets)))
}

/// Total negative log-likelihood.
#[derive(Debug, Clone, Copy, Default)]
pub struct NegLogLikelihood;

impl Objective for NegLogLikelihood {
    fn value_and_gradient(
        &self,
        weights: &Array1<f64>,
        data: &Array2<f64>,
        targets: &Array1<f64>,
        y: &Array1<f64>,
    ) -> Result<(f64, Array1<f64>)> {
        let (f1, f2) = log_likelihood_terms(targets, y)?;
        let df = likelihood_gradient(weights, data, targets, y)?;
        Ok((-f1 - f2, df))
    }
}

/// Log-likelihood plus the log-density of a zero-mean isotropic Gaussian
/// prior with precision `weight_decay` (the bias included).
///
/// The value has the sign of a log-posterior; the gradient is that of the
/// penalized loss `NLL + ½α‖w‖²`, i.e. of the negated value.
#[derive(Debug, Clone, Copy)]
pub struct GaussianPrior {
    weight_decay: f64,
}

impl GaussianPrior {
    pub fn new(weight_decay: f64) -> GaussianPrior {
        GaussianPrior { weight_decay }
    }

    pub fn weight_decay(&self) -> f64 {
        self.weight_decay
    }

    /// `Σ_j ½(log(2π/α) - α·w_j²)`
    fn log_prior(&self, weights: &Array1<f64>) -> f64 {
        let alpha = self.weight_decay;
        let log_norm = (2.0 * PI / alpha).ln();
        weights.iter().map(|w| 0.5 * (log_norm - alpha * w * w)).sum()
    }
}

impl Objective for GaussianPrior {
    fn value_and_gradient(
        &self,
        weights: &Array1<f64>,
        data: &Array2<f64>,
        targets: &Array1<f64>,
        y: &Array1<f64>,
    ) -> Result<(f64, Array1<f64>)> {
        let (f1, f2) = log_likelihood_terms(targets, y)?;
        let f3 = self.log_prior(weights);

        let df = likelihood_gradient(weights, data, targets, y)? + &(weights * self.weight_decay);
        Ok((f1 + f2 + f3, df))
    }
}

impl Objective for Regularization {
    fn value_and_gradient(
        &self,
        weights: &Array1<f64>,
        data: &Array2<f64>,
        targets: &Array1<f64>,
        y: &Array1<f64>,
    ) -> Result<(f64, Array1<f64>)> {
        match *self {
            Regularization::None => NegLogLikelihood.value_and_gradient(weights, data, targets, y),
            Regularization::Gaussian { weight_decay } => {
                GaussianPrior::new(weight_decay).value_and_gradient(weights, data, targets, y)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn log_prior_of_zero_weights_is_the_normaliser() {
        let prior = GaussianPrior::new(2.0);
        let expected = 3.0 * 0.5 * (PI).ln();
        assert!((prior.log_prior(&Array1::zeros(3)) - expected).abs() < 1e-12);
    }

    #[test]
    fn bias_column_is_ones() {
        let x1 = with_bias_column(&array![[2.0, 3.0], [4.0, 5.0]]);
        assert_eq!(x1, array![[2.0, 3.0, 1.0], [4.0, 5.0, 1.0]]);
    }

    #[test]
    fn gradient_is_summed_not_averaged() {
        // Two identical examples give twice the gradient of one.
        let weights = array![0.5, -0.25];
        let one = array![[1.0]];
        let two = array![[1.0], [1.0]];
        let y1 = array![0.6];
        let y2 = array![0.6, 0.6];

        let (_, g1) = NegLogLikelihood.value_and_gradient(&weights, &one, &array![1.0], &y1).unwrap();
        let (_, g2) = NegLogLikelihood.value_and_gradient(&weights, &two, &array![1.0, 1.0], &y2).unwrap();
        assert!((g2[0] - 2.0 * g1[0]).abs() < 1e-12);
        assert!((g2[1] - 2.0 * g1[1]).abs() < 1e-12);
    }

    #[test]
    fn regularization_dispatches_to_the_matching_objective() {
        let weights = array![0.5, -0.25];
        let data = array![[1.0], [-2.0]];
        let targets = array![1.0, 0.0];
        let y = array![0.3, 0.8];

        let plain = NegLogLikelihood.value_and_gradient(&weights, &data, &targets, &y).unwrap();
        assert_eq!(Regularization::None.value_and_gradient(&weights, &data, &targets, &y).unwrap(), plain);

        let gaussian = Regularization::Gaussian { weight_decay: 0.1 };
        let penalized = GaussianPrior::new(0.1).value_and_gradient(&weights, &data, &targets, &y).unwrap();
        assert_eq!(gaussian.value_and_gradient(&weights, &data, &targets, &y).unwrap(), penalized);
    }

    #[test]
    fn mismatched_predictions_are_rejected() {
        let weights = array![0.5, -0.25];
        let data = array![[1.0], [-2.0]];
        let err = NegLogLikelihood
            .value_and_gradient(&weights, &data, &array![1.0, 0.0], &array![0.5])
            .unwrap_err();
        assert_eq!(err, LogisticError::ShapeMismatch { what: "targets", got: 2, expected: 1 });
    }
}
