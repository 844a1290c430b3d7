pub mod cross_entropy_loss;
pub mod loss_func;
pub mod mse_loss;
