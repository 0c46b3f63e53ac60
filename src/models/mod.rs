pub mod oyez;
pub mod role;
pub mod tenure;

pub use oyez::*;
pub use role::*;
pub use tenure::*;
