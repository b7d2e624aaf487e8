pub mod lending;
pub mod lottery;
pub mod randomness;
pub mod registry;
pub mod vault;

pub use lending::*;
pub use lottery::*;
pub use randomness::*;
pub use registry::*;
pub use vault::*;
