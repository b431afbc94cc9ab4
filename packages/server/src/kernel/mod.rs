//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod snowflake;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use snowflake::{IdGeneratorError, SnowflakeGenerator};
pub use test_dependencies::{SequentialIdGenerator, TestDependencies};
pub use traits::*;
