pub mod names;
pub mod registry;

pub use names::*;
pub use registry::*;
