use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

use super::error::{LogisticError, Result};

/// Options recognised by the objective.
///
/// Always valid once built: `weight_regularization` implies a `weight_decay`,
/// and any `weight_decay` given is a finite positive real.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHyperparameters")]
pub struct Hyperparameters {
    weight_regularization: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight_decay: Option<f64>,
}

/// Which objective a set of hyperparameters selects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Regularization {
    /// Plain negative log-likelihood
    None,
    /// Log-likelihood plus a zero-mean Gaussian log-prior with precision `weight_decay`
    Gaussian { weight_decay: f64 },
}

/// What actually comes off the wire, before validation. Keys we don't know
/// about (an optimizer's `learning_rate`, say) are ignored.
#[derive(Deserialize)]
struct RawHyperparameters {
    #[serde(default)]
    weight_regularization: bool,
    #[serde(default)]
    weight_decay: Option<f64>,
}

impl Hyperparameters {
    pub fn new(weight_regularization: bool, weight_decay: Option<f64>) -> Result<Hyperparameters> {
        if let Some(value) = weight_decay {
            if !(value.is_finite() && value > 0.0) {
                return Err(LogisticError::InvalidHyperparameter { name: "weight_decay", value });
            }
        }
        if weight_regularization && weight_decay.is_none() {
            return Err(LogisticError::MissingHyperparameter("weight_decay"));
        }
        Ok(Hyperparameters { weight_regularization, weight_decay })
    }

    pub fn unregularized() -> Hyperparameters {
        Hyperparameters { weight_regularization: false, weight_decay: None }
    }

    pub fn regularized(weight_decay: f64) -> Result<Hyperparameters> {
        Hyperparameters::new(true, Some(weight_decay))
    }

    /// Parse and validate a JSON object such as `{"weight_regularization": true, "weight_decay": 0.1}`
    pub fn from_json(json: &str) -> serde_json::Result<Hyperparameters> {
        serde_json::from_str(json)
    }

    pub fn weight_regularization(&self) -> bool {
        self.weight_regularization
    }

    /// The prior precision `alpha`, required by the penalized objective.
    pub fn weight_decay(&self) -> Result<f64> {
        self.weight_decay.ok_or(LogisticError::MissingHyperparameter("weight_decay"))
    }

    pub fn regularization(&self) -> Regularization {
        match (self.weight_regularization, self.weight_decay) {
            (true, Some(weight_decay)) => Regularization::Gaussian { weight_decay },
            _ => Regularization::None,
        }
    }
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Hyperparameters::unregularized()
    }
}

impl TryFrom<RawHyperparameters> for Hyperparameters {
    type Error = LogisticError;

    fn try_from(raw: RawHyperparameters) -> Result<Hyperparameters> {
        Hyperparameters::new(raw.weight_regularization, raw.weight_decay)
    }
}
