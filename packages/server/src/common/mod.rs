// Common types and utilities shared across the application

pub mod entity_ids;
pub mod id;
pub mod pagination;

pub use entity_ids::{OrderId, ReplyId, ReviewId, StoreId, UserId};
pub use id::Id;
pub use pagination::{PageArgs, ValidatedPageArgs};
