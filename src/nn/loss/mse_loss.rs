use crate::nn::loss::loss_func::LossFuncOps;
use crate::utils::Array2F;

pub struct MseLossFunc {}

impl LossFuncOps for MseLossFunc {
    fn calc_loss(expected: &Array2F, actual: &Array2F) -> f64 {
        let squared_sum: f64 = (expected - actual).iter().map(|o| o * o).sum();
        squared_sum / expected.len() as f64
    }

    fn calc_loss_grad(expected: &Array2F, actual: &Array2F) -> Array2F {
        let norm = 2.0 / expected.len() as f64;
        (actual - expected) * norm
    }
}
