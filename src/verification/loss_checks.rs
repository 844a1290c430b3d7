use std::fmt::{Display, Formatter};

use rand::Rng;

use crate::nn::architectures::{Architecture, Scalar};
use crate::nn::loss::loss_func::LossFunc;
use crate::utils::{Array2F, GenericResult};
use crate::verification::matrix_utils::{maximum_relative_error, random_matrix, reduce_mean, value_error, zip_with_matrix};
use crate::verification::maximum_error::MaximumError;
use crate::verification::trial_shape::TrialShape;
use crate::verification::verifier_config::VerifierConfig;

/// The loss checks a backend has to pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossCheck {
    MeanSquaredError,
    MeanSquaredErrorGradients,
    CrossEntropy,
    CrossEntropyGradients,
}

impl LossCheck {
    pub const ALL: [LossCheck; 4] = [
        LossCheck::MeanSquaredError,
        LossCheck::MeanSquaredErrorGradients,
        LossCheck::CrossEntropy,
        LossCheck::CrossEntropyGradients,
    ];
}

impl Display for LossCheck {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LossCheck::MeanSquaredError => write!(f, "mean squared error"),
            LossCheck::MeanSquaredErrorGradients => write!(f, "mean squared error gradients"),
            LossCheck::CrossEntropy => write!(f, "cross entropy"),
            LossCheck::CrossEntropyGradients => write!(f, "cross entropy gradients"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CheckReport {
    pub check: LossCheck,
    pub max_error: f64,
    pub tolerance: f64,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.max_error <= self.tolerance
    }
}

pub fn mean_squared_error_reference(x: &Array2F, y: &Array2F) -> GenericResult<f64> {
    let z = zip_with_matrix(|a, b| a - b, x, y)?;
    Ok(reduce_mean(|acc, o| acc + o * o, 0.0, &z))
}

pub fn cross_entropy_reference(x: &Array2F, y: &Array2F) -> GenericResult<f64> {
    let z = zip_with_matrix(|a, b| {
        let sig = 1.0 / (1.0 + (-a).exp());
        b * sig.ln() + (1.0 - b) * (1.0 - sig).ln()
    }, x, y)?;
    Ok(-reduce_mean(|acc, o| acc + o, 0.0, &z))
}

/// `2 * (y - x) / (m * n)`, the gradient with respect to `y`
pub fn mean_squared_error_gradients_reference(x: &Array2F, y: &Array2F) -> GenericResult<Array2F> {
    let norm = x.len() as f64;
    zip_with_matrix(|a, b| 2.0 * (b - a) / norm, x, y)
}

/// `(sigmoid(x) - y) / (m * n)`, the gradient with respect to `x`
pub fn cross_entropy_gradients_reference(x: &Array2F, y: &Array2F) -> GenericResult<Array2F> {
    let norm = 1.0 / x.len() as f64;
    zip_with_matrix(|a, b| {
        let sig = 1.0 / (1.0 + (-a).exp());
        (sig - b) * norm
    }, x, y)
}

fn run_trials<R, F>(rng: &mut R, ntests: usize, shape: &TrialShape, mut trial: F) -> GenericResult<f64>
    where R: Rng, F: FnMut(&Array2F, &Array2F) -> GenericResult<f64> {
    let mut max = MaximumError::new();
    for _ in 0..ntests {
        let (m, n) = shape.draw(rng);
        let x = random_matrix(m, n, rng)?;
        let y = random_matrix(m, n, rng)?;
        max.record(trial(&x, &y)?);
    }
    Ok(max.value())
}

fn backend_loss<A: Architecture>(func: &LossFunc, target: &Array2F, output: &Array2F) -> GenericResult<f64> {
    let loss = A::evaluate(func, &A::from_dense(target), &A::from_dense(output))?;
    Ok(loss.cast_into())
}

fn backend_gradients<A: Architecture>(func: &LossFunc, target: &Array2F, output: &Array2F) -> GenericResult<Array2F> {
    let mut grad = A::from_dense(&Array2F::zeros(target.raw_dim()));
    A::evaluate_gradients(&mut grad, func, &A::from_dense(target), &A::from_dense(output))?;
    Ok(A::to_dense(&grad))
}

/// Maximum error between the backend's mean squared error of `(target = Y, output = X)` and the
/// reference, over `ntests` random trials
pub fn check_mean_squared_error<A: Architecture, R: Rng>(rng: &mut R, ntests: usize, shape: &TrialShape) -> GenericResult<f64> {
    run_trials(rng, ntests, shape, |x, y| {
        let mse = backend_loss::<A>(&LossFunc::Mse, y, x)?;
        Ok(value_error(mse, mean_squared_error_reference(x, y)?))
    })
}

pub fn check_mean_squared_error_gradients<A: Architecture, R: Rng>(rng: &mut R, ntests: usize, shape: &TrialShape) -> GenericResult<f64> {
    run_trials(rng, ntests, shape, |x, y| {
        let z = backend_gradients::<A>(&LossFunc::Mse, x, y)?;
        maximum_relative_error(&z, &mean_squared_error_gradients_reference(x, y)?)
    })
}

pub fn check_cross_entropy<A: Architecture, R: Rng>(rng: &mut R, ntests: usize, shape: &TrialShape) -> GenericResult<f64> {
    run_trials(rng, ntests, shape, |x, y| {
        let ce = backend_loss::<A>(&LossFunc::CrossEntropy, y, x)?;
        Ok(value_error(ce, cross_entropy_reference(x, y)?))
    })
}

pub fn check_cross_entropy_gradients<A: Architecture, R: Rng>(rng: &mut R, ntests: usize, shape: &TrialShape) -> GenericResult<f64> {
    run_trials(rng, ntests, shape, |x, y| {
        let z = backend_gradients::<A>(&LossFunc::CrossEntropy, y, x)?;
        maximum_relative_error(&z, &cross_entropy_gradients_reference(x, y)?)
    })
}

pub fn run_check<A: Architecture, R: Rng>(check: LossCheck, rng: &mut R, config: &VerifierConfig) -> GenericResult<CheckReport> {
    use LossCheck::*;
    let ntests = config.ntests;
    let max_error = match check {
        MeanSquaredError => check_mean_squared_error::<A, R>(rng, ntests, &config.shape)?,
        MeanSquaredErrorGradients => check_mean_squared_error_gradients::<A, R>(rng, ntests, &config.shape)?,
        CrossEntropy => check_cross_entropy::<A, R>(rng, ntests, &config.shape)?,
        CrossEntropyGradients => check_cross_entropy_gradients::<A, R>(rng, ntests, &config.cross_entropy_gradient_shape)?,
    };

    Ok(CheckReport {
        check,
        max_error,
        tolerance: config.tolerance,
    })
}

/// Runs every check in the order of `LossCheck::ALL`, sharing the same random generator
pub fn run_all<A: Architecture, R: Rng>(rng: &mut R, config: &VerifierConfig) -> GenericResult<Vec<CheckReport>> {
    LossCheck::ALL
        .iter()
        .map(|&check| run_check::<A, R>(check, rng, config))
        .collect()
}
