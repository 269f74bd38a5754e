use ndarray::{s, Array1, Array2};

use super::error::{LogisticError, Result};
use super::hyperparameters::{Hyperparameters, Regularization};
use super::objective::{GaussianPrior, Objective};

pub fn sigmoid(z: &Array1<f64>) -> Array1<f64> {
    1.0 / (1.0 + z.mapv(|x| (-x).exp()))
}

/// Number of features `M`, after checking that `weights` holds `M` feature
/// weights plus one bias for a data matrix with `M` columns.
pub(crate) fn feature_count(weights: &Array1<f64>, data: &Array2<f64>) -> Result<usize> {
    let m = data.ncols();
    if weights.len() != m + 1 {
        return Err(LogisticError::ShapeMismatch {
            what: "weights",
            got: weights.len(),
            expected: m + 1,
        });
    }
    Ok(m)
}

pub(crate) fn check_targets(targets: &Array1<f64>, n: usize) -> Result<()> {
    if targets.len() != n {
        return Err(LogisticError::ShapeMismatch { what: "targets", got: targets.len(), expected: n });
    }
    Ok(())
}

/// The data matrix with a trailing column of ones, so that the bias is just
/// another weight: `X1 · w = X · wI + w0`.
pub(crate) fn with_bias_column(data: &Array2<f64>) -> Array2<f64> {
    let m = data.ncols();
    Array2::from_shape_fn((data.nrows(), m + 1), |(i, j)| if j < m { data[[i, j]] } else { 1.0 })
}

/// Probability of the positive class for each row of `data`.
///
/// `weights` has length `M + 1` for an `N × M` data matrix: `M` feature
/// weights followed by the bias. Very large logits may saturate to exactly
/// 0 or 1, which is not treated as an error here.
pub fn logistic_predict(weights: &Array1<f64>, data: &Array2<f64>) -> Result<Array1<f64>> {
    let m = feature_count(weights, data)?;
    let w_i = weights.slice(s![..m]);
    let w_0 = weights[m];

    let z = data.dot(&w_i) + w_0;
    Ok(sigmoid(&z))
}

/// Cross entropy `-Σ t·log(y)` and the fraction of examples classified
/// correctly at a 0.5 threshold.
///
/// Only the positive-class term enters the cross entropy, unlike the
/// two-sided log-likelihood the objectives use. An example counts as correct
/// when `t == 1` and `y >= 0.5`, or `t == 0` and `y < 0.5`; soft targets are
/// never counted correct.
pub fn evaluate(targets: &Array1<f64>, y: &Array1<f64>) -> Result<(f64, f64)> {
    check_targets(targets, y.len())?;
    if y.is_empty() {
        return Err(LogisticError::Domain("cannot evaluate an empty set of predictions"));
    }

    let mut ce = 0.0;
    let mut correct = 0usize;
    for (&t, &p) in targets.iter().zip(y.iter()) {
        if !(p > 0.0) {
            return Err(LogisticError::Domain("log of a non-positive prediction"));
        }
        ce -= t * p.ln();

        if (t == 1.0 && p >= 0.5) || (t == 0.0 && p < 0.5) {
            correct += 1;
        }
    }

    Ok((ce, correct as f64 / y.len() as f64))
}

/// The training objective, its gradient with respect to all `M + 1`
/// weights, and the predictions it was computed from.
///
/// With regularization switched off, `f` is the total negative
/// log-likelihood and `df = X1ᵀ(σ(X1·w) - t)`, summed rather than averaged
/// over examples. With it switched on, `f` and `df` come from [`logistic_pen`].
pub fn logistic(
    weights: &Array1<f64>,
    data: &Array2<f64>,
    targets: &Array1<f64>,
    hyperparameters: &Hyperparameters,
) -> Result<(f64, Array1<f64>, Array1<f64>)> {
    let y = logistic_predict(weights, data)?;

    let (f, df) = match hyperparameters.regularization() {
        Regularization::Gaussian { .. } => logistic_pen(weights, data, targets, hyperparameters)?,
        none @ Regularization::None => none.value_and_gradient(weights, data, targets, &y)?,
    };
    log::trace!("logistic objective over {} examples: f = {}", y.len(), f);

    Ok((f, df, y))
}

/// The log-likelihood plus a Gaussian log-prior with precision
/// `alpha = weight_decay` over every weight, bias included:
///
/// ```text
/// f  = Σ t·log(y) + Σ (1-t)·log(1-y) + Σ_j ½(log(2π/α) - α·w_j²)
/// df = X1ᵀ(σ(X1·w) - t) + α·w
/// ```
///
/// `f` has the sign of a log-posterior while `df` is the gradient of its
/// negation, i.e. of the penalized loss. Fails when `weight_decay` is absent,
/// whatever `weight_regularization` says.
pub fn logistic_pen(
    weights: &Array1<f64>,
    data: &Array2<f64>,
    targets: &Array1<f64>,
    hyperparameters: &Hyperparameters,
) -> Result<(f64, Array1<f64>)> {
    let prior = GaussianPrior::new(hyperparameters.weight_decay()?);
    let y = logistic_predict(weights, data)?;
    prior.value_and_gradient(weights, data, targets, &y)
}
