use std::fmt::{Display, Formatter};

use anyhow::Context;

use crate::nn::loss::cross_entropy_loss::CrossEntropyLoss;
use crate::nn::loss::mse_loss::MseLossFunc;
use crate::utils::{ensure_same_shape, Array2F, GenericResult};

/// Loss implemented directly on dense `f64` matrices. Both inputs must have the same shape.
pub trait LossFuncOps {
    fn calc_loss(expected: &Array2F, actual: &Array2F) -> f64;
    fn calc_loss_grad(expected: &Array2F, actual: &Array2F) -> Array2F;
}

/// Loss functions the backends know how to evaluate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossFunc {
    /// Mean of the squared element-wise differences.
    /// https://en.wikipedia.org/wiki/Mean_squared_error
    Mse,

    /// Binary cross entropy applied on the sigmoid of the outputs, averaged over all entries.
    /// Targets are not required to be in [0, 1].
    /// https://en.wikipedia.org/wiki/Cross-entropy
    CrossEntropy,
}

impl Display for LossFunc {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LossFunc::Mse => write!(f, "mean squared error"),
            LossFunc::CrossEntropy => write!(f, "cross entropy"),
        }
    }
}

pub fn calc_loss(func: &LossFunc, expected: &Array2F, actual: &Array2F) -> GenericResult<f64> {
    use LossFunc::*;
    ensure_same_shape(expected.shape(), actual.shape()).with_context(|| format!("Can't evaluate {}", func))?;
    Ok(match func {
        Mse => MseLossFunc::calc_loss(expected, actual),
        CrossEntropy => CrossEntropyLoss::calc_loss(expected, actual),
    })
}

pub fn calc_loss_grad(func: &LossFunc, expected: &Array2F, actual: &Array2F) -> GenericResult<Array2F> {
    use LossFunc::*;
    ensure_same_shape(expected.shape(), actual.shape())
        .with_context(|| format!("Can't evaluate the gradients of {}", func))?;
    Ok(match func {
        Mse => MseLossFunc::calc_loss_grad(expected, actual),
        CrossEntropy => CrossEntropyLoss::calc_loss_grad(expected, actual),
    })
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn test_dispatch() {
        let expected = array![[1.0, 1.0], [1.0, 1.0]];
        let actual = array![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(calc_loss(&LossFunc::Mse, &expected, &actual).unwrap(), 3.5);

        let expected = array![[1.0]];
        let actual = array![[0.0]];
        let loss = calc_loss(&LossFunc::CrossEntropy, &expected, &actual).unwrap();
        assert!((loss - 0.693147).abs() < 1e-6);
    }

    #[test]
    fn test_shape_mismatch() {
        let expected = Array2F::zeros((2, 3));
        let actual = Array2F::zeros((3, 2));
        let err = calc_loss(&LossFunc::Mse, &expected, &actual).unwrap_err();
        assert_eq!(err.to_string(), "Can't evaluate mean squared error");
        let err = calc_loss_grad(&LossFunc::CrossEntropy, &expected, &actual).unwrap_err();
        assert_eq!(err.to_string(), "Can't evaluate the gradients of cross entropy");
        assert!(format!("{:#}", err).contains("Shapes differ"));
    }

    #[test]
    fn test_display() {
        assert_eq!(LossFunc::Mse.to_string(), "mean squared error");
        assert_eq!(LossFunc::CrossEntropy.to_string(), "cross entropy");
    }
}
