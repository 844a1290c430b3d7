use ndarray::NdFloat;

use crate::nn::loss::loss_func::LossFuncOps;
use crate::utils::Array2F;

pub struct CrossEntropyLoss {}

pub fn sigmoid<T: NdFloat>(x: T) -> T {
    T::one() / (T::one() + (-x).exp())
}

impl LossFuncOps for CrossEntropyLoss {
    fn calc_loss(expected: &Array2F, actual: &Array2F) -> f64 {
        let sum: f64 = expected
            .iter()
            .zip(actual.iter())
            .map(|(y, &x)| {
                let sig = sigmoid(x);
                y * sig.ln() + (1.0 - y) * (1.0 - sig).ln()
            })
            .sum();
        -sum / expected.len() as f64
    }

    fn calc_loss_grad(expected: &Array2F, actual: &Array2F) -> Array2F {
        let norm = 1.0 / expected.len() as f64;
        (actual.mapv(sigmoid) - expected) * norm
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use crate::utils::arrays_almost_equal;

    use super::*;

    #[test]
    fn test_sigmoid() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid::<f64>(2.0) - 0.880797).abs() < 1e-6);
        assert!((sigmoid::<f64>(-2.0) - 0.119203).abs() < 1e-6);

        assert_eq!(sigmoid(0.0f32), 0.5);
        assert!((sigmoid(2.0f32) - 0.880797).abs() < 1e-6);
    }

    #[test]
    fn test_calc_loss() {
        let result = CrossEntropyLoss::calc_loss(&array![[1.0]], &array![[0.0]]);
        assert!((result - 0.693147).abs() < 1e-6);

        let expected = array![[1.0, 0.0], [0.5, 1.0]];
        let actual = array![[2.0, -1.0], [0.0, 0.5]];
        // 0.126928 + 0.313262 + 0.693147 + 0.474077
        let result = CrossEntropyLoss::calc_loss(&expected, &actual);
        assert!((result - 0.401853).abs() < 1e-5);
    }

    #[test]
    fn test_calc_loss_grad() {
        let result = CrossEntropyLoss::calc_loss_grad(&array![[1.0]], &array![[0.0]]);
        assert_eq!(result, array![[-0.5]]);

        let expected = array![[1.0, 0.0], [0.5, 1.0]];
        let actual = array![[0.0, 0.0], [0.0, 0.0]];
        let result = CrossEntropyLoss::calc_loss_grad(&expected, &actual);
        assert!(arrays_almost_equal(&result, &array![[-0.125, 0.125], [0.0, -0.125]]));
    }
}
