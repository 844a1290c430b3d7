pub mod cpu;
pub mod reference;

use ndarray::NdFloat;

use crate::nn::loss::loss_func::LossFunc;
use crate::utils::{Array2F, EmptyResult, GenericResult};

/// Floating point type a backend computes with. Conversions go through `f64`, which is the type
/// of the dense matrices used to build and compare values.
pub trait Scalar: NdFloat {
    fn cast_from(value: f64) -> Self;
    fn cast_into(self) -> f64;
}

impl Scalar for f32 {
    fn cast_from(value: f64) -> Self {
        value as f32
    }

    fn cast_into(self) -> f64 {
        self as f64
    }
}

impl Scalar for f64 {
    fn cast_from(value: f64) -> Self {
        value
    }

    fn cast_into(self) -> f64 {
        self
    }
}

/// Numeric backend that can evaluate losses and their gradients on its own matrix type.
/// Implementations are marker structs; every operation is an associated function, so the loss
/// checks can be written once and run against any backend.
///
/// Gradients are always taken with respect to `output`:
/// * Mse: `2 * (output - target) / len`
/// * CrossEntropy: `(sigmoid(output) - target) / len`
pub trait Architecture {
    type Scalar: Scalar;
    type Matrix;

    fn name() -> String;

    fn from_dense(dense: &Array2F) -> Self::Matrix;

    fn to_dense(matrix: &Self::Matrix) -> Array2F;

    fn evaluate(func: &LossFunc, target: &Self::Matrix, output: &Self::Matrix) -> GenericResult<Self::Scalar>;

    /// Writes the gradient into `grad`, which must already have the shape of `target`
    fn evaluate_gradients(grad: &mut Self::Matrix, func: &LossFunc, target: &Self::Matrix,
                          output: &Self::Matrix) -> EmptyResult;
}
