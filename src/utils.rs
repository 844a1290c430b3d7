use ndarray::{Array, Array2, Dimension};

type F = f64;
pub type ArrayF<D> = Array<F, D>;
pub type Array2F = Array2<F>;

pub type GenericResult<T> = anyhow::Result<T>;
pub type EmptyResult = GenericResult<()>;

pub fn arrays_almost_equal<D: Dimension>(arr1: &ArrayF<D>, arr2: &ArrayF<D>) -> bool {
    arr1.shape() == arr2.shape()
        && arr1.iter().zip(arr2.iter()).all(|(a, b)| (a - b).abs() < 0.001)
}

/// Fails if the two shapes differ. Used by every operation that combines matrices element-wise.
pub fn ensure_same_shape(first: &[usize], second: &[usize]) -> EmptyResult {
    if first != second {
        return Err(anyhow::anyhow!("Shapes differ: {:?} and {:?}", first, second));
    }
    Ok(())
}
