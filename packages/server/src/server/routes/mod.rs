// HTTP routes
pub mod health;
pub mod reviews;

pub use health::*;
pub use reviews::*;
