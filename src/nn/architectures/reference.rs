use crate::nn::architectures::Architecture;
use crate::nn::loss::loss_func::{calc_loss, calc_loss_grad, LossFunc};
use crate::utils::{ensure_same_shape, Array2F, EmptyResult, GenericResult};

/// Straightforward sequential backend working directly on dense `f64` matrices
pub struct Reference {}

impl Architecture for Reference {
    type Scalar = f64;
    type Matrix = Array2F;

    fn name() -> String {
        "reference".to_owned()
    }

    fn from_dense(dense: &Array2F) -> Array2F {
        dense.clone()
    }

    fn to_dense(matrix: &Array2F) -> Array2F {
        matrix.clone()
    }

    fn evaluate(func: &LossFunc, target: &Array2F, output: &Array2F) -> GenericResult<f64> {
        calc_loss(func, target, output)
    }

    fn evaluate_gradients(grad: &mut Array2F, func: &LossFunc, target: &Array2F, output: &Array2F) -> EmptyResult {
        let result = calc_loss_grad(func, target, output)?;
        ensure_same_shape(grad.shape(), result.shape())?;
        grad.assign(&result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use crate::utils::arrays_almost_equal;

    use super::*;

    #[test]
    fn test_evaluate() {
        let target = array![[1.0, 1.0], [1.0, 1.0]];
        let output = array![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(Reference::evaluate(&LossFunc::Mse, &target, &output).unwrap(), 3.5);
    }

    #[test]
    fn test_evaluate_gradients() {
        let target = array![[1.0, 0.0]];
        let output = array![[0.0, 0.0]];
        let mut grad = Array2F::zeros((1, 2));
        Reference::evaluate_gradients(&mut grad, &LossFunc::CrossEntropy, &target, &output).unwrap();
        assert!(arrays_almost_equal(&grad, &array![[-0.25, 0.25]]));

        Reference::evaluate_gradients(&mut grad, &LossFunc::Mse, &target, &output).unwrap();
        assert!(arrays_almost_equal(&grad, &array![[-1.0, 0.0]]));
    }

    #[test]
    fn test_evaluate_gradients_wrong_buffer() {
        let target = array![[1.0, 0.0]];
        let output = array![[0.0, 0.0]];
        let mut grad = Array2F::zeros((2, 1));
        assert!(Reference::evaluate_gradients(&mut grad, &LossFunc::Mse, &target, &output).is_err());
    }
}
