//! Typed ID definitions for all domain entities.
//!
//! # Example
//!
//! ```rust
//! use review_core::common::{OrderId, ReviewId};
//!
//! let review_id = ReviewId::from_raw(1);
//! let order_id = OrderId::from_raw(100);
//!
//! // This would be a compile error:
//! // let wrong: OrderId = review_id;
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Review entities.
pub struct ReviewEntity;

/// Marker type for Reply entities (merchant replies).
pub struct ReplyEntity;

/// Marker type for users (reviewers).
pub struct UserEntity;

/// Marker type for orders being reviewed.
pub struct OrderEntity;

/// Marker type for stores (merchants).
pub struct StoreEntity;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Review entities.
pub type ReviewId = Id<ReviewEntity>;

/// Typed ID for Reply entities.
pub type ReplyId = Id<ReplyEntity>;

/// Typed ID for users.
pub type UserId = Id<UserEntity>;

/// Typed ID for orders.
pub type OrderId = Id<OrderEntity>;

/// Typed ID for stores.
pub type StoreId = Id<StoreEntity>;
