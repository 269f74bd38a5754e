use logreg::{
    check_grad, evaluate, logistic, logistic_pen, logistic_predict, random_problem, Hyperparameters, Problem,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const EPSILON: f64 = 1e-5;
const TOLERANCE: f64 = 1e-4;

fn problems() -> Vec<Problem> {
    let mut rng = StdRng::seed_from_u64(411);
    [(1, 1), (2, 3), (7, 9), (20, 4)]
        .iter()
        .map(|&(n, m)| random_problem(&mut rng, n, m))
        .collect()
}

#[test]
fn unregularized_gradient_matches_finite_differences() {
    let hyperparameters = Hyperparameters::unregularized();
    for Problem { weights, data, targets } in problems() {
        let check = check_grad(
            |w| logistic(w, &data, &targets, &hyperparameters).map(|(f, df, _)| (f, df)),
            &weights,
            EPSILON,
        )
        .unwrap();
        assert!(check.max_abs_difference() < TOLERANCE, "{:?}", check);
    }
}

#[test]
fn penalized_gradient_matches_finite_differences_of_the_negated_value() {
    for &alpha in &[0.01, 1.0, 10.0] {
        let hyperparameters = Hyperparameters::regularized(alpha).unwrap();
        for Problem { weights, data, targets } in problems() {
            let check = check_grad(
                |w| logistic_pen(w, &data, &targets, &hyperparameters).map(|(f, df)| (-f, df)),
                &weights,
                EPSILON,
            )
            .unwrap();
            assert!(check.max_abs_difference() < TOLERANCE, "alpha = {}: {:?}", alpha, check);
        }
    }
}

#[test]
fn predictions_stay_in_the_open_unit_interval() {
    for Problem { weights, data, .. } in problems() {
        let y = logistic_predict(&weights, &data).unwrap();
        assert_eq!(y.len(), data.nrows());
        assert!(y.iter().all(|&p| p > 0.0 && p < 1.0));
    }
}

#[test]
fn penalty_adds_the_gaussian_log_prior() {
    let hyperparameters = Hyperparameters::regularized(0.5).unwrap();
    for Problem { weights, data, targets } in problems() {
        let (f_nll, df_nll, y) = logistic(&weights, &data, &targets, &Hyperparameters::unregularized()).unwrap();
        let (f, df, y_pen) = logistic(&weights, &data, &targets, &hyperparameters).unwrap();

        let log_prior: f64 = weights
            .iter()
            .map(|w| 0.5 * ((2.0 * std::f64::consts::PI / 0.5).ln() - 0.5 * w * w))
            .sum();
        assert!((f - (-f_nll + log_prior)).abs() < 1e-9);

        let expected = &df_nll + &(&weights * 0.5);
        for (a, b) in df.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
        assert_eq!(y, y_pen);
    }
}

#[test]
fn evaluation_of_model_predictions() {
    for Problem { weights, data, targets } in problems() {
        let y = logistic_predict(&weights, &data).unwrap();
        let (ce, frac_correct) = evaluate(&targets, &y).unwrap();
        assert!(ce >= 0.0);
        assert!((0.0..=1.0).contains(&frac_correct));
    }
}
