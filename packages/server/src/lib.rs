// Review Service - Core
//
// Backend for order reviews: users review completed orders, merchants reply
// once, operators audit reviews and the appeals merchants file against them.
//
// Business rules live in domains/*/actions; storage sits behind the
// ReviewStore trait in domains/reviews/store.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
