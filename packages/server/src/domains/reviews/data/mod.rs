pub mod reply;
pub mod review;

pub use reply::*;
pub use review::*;
