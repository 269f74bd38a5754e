extern crate env_logger;
extern crate log;
extern crate logreg;
extern crate rand;

use std::env;
use std::fs;
use std::io;

use logreg::{check_grad, evaluate, logistic, logistic_pen, random_problem, Hyperparameters, LogisticError, Regularization};

const NUM_EXAMPLES: usize = 7;
const NUM_FEATURES: usize = 9;
const EPSILON: f64 = 1e-3;
const TOLERANCE: f64 = 1e-4;

fn invalid(err: LogisticError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err)
}

/// Hyperparameters from the JSON file named on the command line, if any
fn load_hyperparameters() -> Result<Hyperparameters, io::Error> {
    match env::args().nth(1) {
        Some(path) => {
            let json = fs::read_to_string(&path)?;
            let hyperparameters = Hyperparameters::from_json(&json)?;
            log::info!("Loaded hyperparameters from {}: {:?}", path, hyperparameters);
            Ok(hyperparameters)
        }
        None => Ok(Hyperparameters::default()),
    }
}

fn main() -> Result<(), io::Error> {
    env_logger::init();

    let hyperparameters = load_hyperparameters()?;
    let problem = random_problem(&mut rand::thread_rng(), NUM_EXAMPLES, NUM_FEATURES);
    log::info!(
        "Checking gradients on {} random examples with {} features ({:?})",
        NUM_EXAMPLES,
        NUM_FEATURES,
        hyperparameters.regularization(),
    );

    // The penalized value is a log-posterior, its gradient that of the negation.
    let check = match hyperparameters.regularization() {
        Regularization::None => check_grad(
            |w| logistic(w, &problem.data, &problem.targets, &hyperparameters).map(|(f, df, _)| (f, df)),
            &problem.weights,
            EPSILON,
        ),
        Regularization::Gaussian { .. } => check_grad(
            |w| logistic_pen(w, &problem.data, &problem.targets, &hyperparameters).map(|(f, df)| (-f, df)),
            &problem.weights,
            EPSILON,
        ),
    }
    .map_err(invalid)?;

    let diff = check.relative_difference();
    if diff > TOLERANCE {
        log::warn!("Gradient check failed: relative difference {:e} > {:e}", diff, TOLERANCE);
    } else {
        log::info!("Gradient check passed: relative difference {:e}", diff);
    }

    let (f, _, y) = logistic(&problem.weights, &problem.data, &problem.targets, &hyperparameters).map_err(invalid)?;
    let (ce, frac_correct) = evaluate(&problem.targets, &y).map_err(invalid)?;
    log::info!("Objective {:.4}, cross entropy {:.4}, {:.1}% correct", f, ce, frac_correct * 100.0);

    Ok(())
}
