pub mod segment;
pub mod stats;
pub mod terms;
pub mod text;
pub mod verify;
pub mod walker;

pub use segment::*;
pub use stats::*;
pub use terms::*;
pub use text::*;
pub use verify::*;
pub use walker::*;
