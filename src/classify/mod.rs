pub mod classifier;
pub mod description;

pub use classifier::*;
pub use description::*;
