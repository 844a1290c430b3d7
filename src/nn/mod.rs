pub mod architectures;
pub mod loss;
