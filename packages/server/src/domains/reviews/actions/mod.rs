//! Review domain actions - business logic functions
//!
//! Actions are async functions called from the HTTP handlers. They validate
//! input, enforce ownership and the status state machine, and go through
//! `ServerDeps` for storage and ID generation.

mod appeal_review;
mod audit;
mod create_reply;
mod create_review;
mod queries;
mod transition;


pub use appeal_review::appeal_review;
pub use audit::{audit_appeal, audit_review};
pub use create_reply::create_reply;
pub use create_review::create_review;
pub use queries::{
    count_reviews_by_user, get_review, get_review_reply, list_reviews_by_user, ReviewPage,
};
