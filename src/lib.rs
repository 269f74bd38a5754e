//! Logistic-regression predictions, evaluation metrics and the (optionally
//! L2-regularized) likelihood objective with its gradient, for use from an
//! external gradient-descent loop.
//!
//! Weights are `M + 1` long for an `N × M` data matrix: the feature weights
//! first, then the bias.

pub mod check_grad;
pub mod error;
pub mod hyperparameters;
pub mod logistic;
pub mod objective;

pub use check_grad::{check_grad, random_problem, GradientCheck, Problem};
pub use error::{LogisticError, Result};
pub use hyperparameters::{Hyperparameters, Regularization};
pub use logistic::{evaluate, logistic, logistic_pen, logistic_predict, sigmoid};
pub use objective::{GaussianPrior, NegLogLikelihood, Objective};
