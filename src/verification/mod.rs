pub mod loss_checks;
pub mod matrix_utils;
pub mod maximum_error;
pub mod trial_shape;
pub mod verifier_config;
