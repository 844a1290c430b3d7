pub mod nn;
pub mod utils;
pub mod verification;
