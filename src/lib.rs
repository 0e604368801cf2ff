pub mod cs;

pub use cs::combinatorial;
pub use cs::error::{Error, Result};
