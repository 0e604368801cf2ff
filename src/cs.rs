pub mod combinatorial;
pub mod error;

pub use combinatorial::*;
