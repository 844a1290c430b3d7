use std::any::type_name;
use std::marker::PhantomData;

use anyhow::Context;
use ndarray::parallel::prelude::*;
use ndarray::{Array2, ArrayView1, Zip};

use crate::nn::architectures::{Architecture, Scalar};
use crate::nn::loss::cross_entropy_loss::sigmoid;
use crate::nn::loss::loss_func::LossFunc;
use crate::utils::{ensure_same_shape, Array2F, EmptyResult, GenericResult};

/// Multithreaded backend. Rows are reduced in parallel, so sums are accumulated in a different
/// order than in the sequential reference.
pub struct Cpu<T> {
    _scalar: PhantomData<T>,
}

fn squared_error<T: Scalar>(y: T, x: T) -> T {
    let diff = y - x;
    diff * diff
}

fn cross_entropy<T: Scalar>(y: T, x: T) -> T {
    let sig = sigmoid(x);
    -(y * sig.ln() + (T::one() - y) * (T::one() - sig).ln())
}

fn row_sum<T: Scalar>(target: ArrayView1<T>, output: ArrayView1<T>, term: &(impl Fn(T, T) -> T + Sync)) -> T {
    target
        .iter()
        .zip(output.iter())
        .fold(T::zero(), |acc, (&y, &x)| acc + term(y, x))
}

fn par_mean<T: Scalar>(target: &Array2<T>, output: &Array2<T>, term: impl Fn(T, T) -> T + Sync) -> T {
    let sum = target
        .outer_iter()
        .into_par_iter()
        .zip(output.outer_iter().into_par_iter())
        .map(|(t, o)| row_sum(t, o, &term))
        .reduce(|| T::zero(), |a, b| a + b);
    sum / T::cast_from(target.len() as f64)
}

impl<T: Scalar> Architecture for Cpu<T> {
    type Scalar = T;
    type Matrix = Array2<T>;

    fn name() -> String {
        format!("cpu<{}>", type_name::<T>())
    }

    fn from_dense(dense: &Array2F) -> Array2<T> {
        dense.mapv(T::cast_from)
    }

    fn to_dense(matrix: &Array2<T>) -> Array2F {
        matrix.mapv(|o| o.cast_into())
    }

    fn evaluate(func: &LossFunc, target: &Array2<T>, output: &Array2<T>) -> GenericResult<T> {
        ensure_same_shape(target.shape(), output.shape()).with_context(|| format!("Can't evaluate {}", func))?;
        Ok(match func {
            LossFunc::Mse => par_mean(target, output, squared_error),
            LossFunc::CrossEntropy => par_mean(target, output, cross_entropy),
        })
    }

    fn evaluate_gradients(grad: &mut Array2<T>, func: &LossFunc, target: &Array2<T>,
                          output: &Array2<T>) -> EmptyResult {
        ensure_same_shape(target.shape(), output.shape())
            .and_then(|_| ensure_same_shape(grad.shape(), target.shape()))
            .with_context(|| format!("Can't evaluate the gradients of {}", func))?;
        let norm = T::one() / T::cast_from(target.len() as f64);

        match func {
            LossFunc::Mse => {
                let factor = T::cast_from(2.0) * norm;
                Zip::from(grad)
                    .and(target)
                    .and(output)
                    .par_for_each(|g, &y, &x| *g = (x - y) * factor);
            }
            LossFunc::CrossEntropy => {
                Zip::from(grad)
                    .and(target)
                    .and(output)
                    .par_for_each(|g, &y, &x| *g = (sigmoid(x) - y) * norm);
            }
        }
        Ok(())
    }
}
