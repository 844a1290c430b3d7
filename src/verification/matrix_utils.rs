use ndarray::Zip;
use ndarray_rand::rand_distr::Normal;
use ndarray_rand::RandomExt;
use rand::Rng;

use crate::utils::{ensure_same_shape, Array2F, GenericResult};
use crate::verification::maximum_error::MaximumError;

/// Matrix of shape `rows x cols` with entries drawn independently from N(0, 1)
pub fn random_matrix<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> GenericResult<Array2F> {
    let dist = Normal::new(0.0, 1.0)?;
    Ok(Array2F::random_using((rows, cols), dist, rng))
}

/// Applies `f` to each pair of entries at the same position
pub fn zip_with_matrix(f: impl Fn(f64, f64) -> f64, first: &Array2F, second: &Array2F) -> GenericResult<Array2F> {
    ensure_same_shape(first.shape(), second.shape())?;
    Ok(Zip::from(first).and(second).map_collect(|&a, &b| f(a, b)))
}

/// Folds all entries with `f`, starting from `start`, and divides by the number of entries
pub fn reduce_mean(f: impl Fn(f64, f64) -> f64, start: f64, matrix: &Array2F) -> f64 {
    let total = matrix.iter().fold(start, |acc, &o| f(acc, o));
    total / matrix.len() as f64
}

/// Error between a computed value and its reference: relative when the reference is nonzero,
/// absolute otherwise.
pub fn value_error(value: f64, reference: f64) -> f64 {
    if reference != 0.0 {
        ((value - reference) / reference).abs()
    } else {
        (value - reference).abs()
    }
}

/// Symmetric relative error. Falls back to the absolute difference when either value is zero or
/// the difference is below machine precision, so the denominator is never zero.
pub fn relative_error(x: f64, y: f64) -> f64 {
    if x == y {
        return 0.0;
    }

    let diff = (x - y).abs();
    if x * y == 0.0 || diff < f64::EPSILON {
        diff
    } else {
        diff / (x.abs() + y.abs())
    }
}

pub fn maximum_relative_error(first: &Array2F, second: &Array2F) -> GenericResult<f64> {
    ensure_same_shape(first.shape(), second.shape())?;
    let max: MaximumError = first
        .iter()
        .zip(second.iter())
        .map(|(&x, &y)| relative_error(x, y))
        .collect();
    Ok(max.value())
}
