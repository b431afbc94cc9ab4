//! Reviews domain - order reviews, merchant replies, operator audits and appeals

pub mod actions;
pub mod data;
pub mod errors;
pub mod models;
pub mod params;
pub mod store;

pub use data::{ReplyData, ReviewData, ReviewListData};
pub use errors::ReviewError;
pub use models::{Reply, Review, ReviewAction, ReviewStatus};
pub use store::{InMemoryReviewStore, PostgresReviewStore, ReviewStore, StoreError};
