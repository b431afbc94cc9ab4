//! Typed 64-bit ID wrappers for compile-time type safety.
//!
//! This module provides `Id<T>`, a typed wrapper around an `i64` that prevents
//! accidentally mixing up different ID types (e.g., passing a `StoreId` where a
//! `UserId` was expected). Review and reply IDs are snowflake IDs produced by
//! the injected ID generator; user, order and store IDs come from the calling
//! services and are treated as opaque.
//!
//! # Example
//!
//! ```rust
//! use review_core::common::id::Id;
//!
//! pub struct Review;
//! pub struct Store;
//!
//! pub type ReviewId = Id<Review>;
//! pub type StoreId = Id<Store>;
//!
//! let review_id = ReviewId::from_raw(42);
//! assert_eq!(review_id.into_raw(), 42);
//!
//! // This would be a compile error:
//! // let wrong: StoreId = review_id;
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::ParseIntError;
use std::str::FromStr;

/// A typed wrapper around `i64` that provides compile-time type safety.
///
/// The type parameter `T` represents the entity type this ID belongs to.
///
/// ```compile_fail
/// use review_core::common::id::Id;
///
/// struct User;
/// struct Order;
///
/// let user_id: Id<User> = Id::from_raw(1);
/// let order_id: Id<Order> = user_id; // Compile error!
/// ```
#[repr(transparent)]
pub struct Id<T>(i64, PhantomData<fn() -> T>);

// ============================================================================
// Core implementations
// ============================================================================

impl<T> Id<T> {
    /// Creates an `Id` from a raw `i64`.
    ///
    /// This is how generated IDs and IDs loaded from the database or the
    /// wire enter the type system.
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw, PhantomData)
    }

    /// Returns the inner `i64`.
    #[inline]
    pub const fn into_raw(self) -> i64 {
        self.0
    }

    /// Parses an `Id` from a decimal string (path parameters).
    #[inline]
    pub fn parse(s: &str) -> Result<Self, ParseIntError> {
        Ok(Self(s.trim().parse()?, PhantomData))
    }

    /// Returns `true` for the zero ID, which is never handed out by the
    /// generator.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// ============================================================================
// Standard trait implementations
// ============================================================================

impl<T> Clone for Id<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Include type name for debugging clarity
        f.debug_tuple(&format!("Id<{}>", std::any::type_name::<T>()))
            .field(&self.0)
            .finish()
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for Id<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for Id<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> From<i64> for Id<T> {
    #[inline]
    fn from(raw: i64) -> Self {
        Self::from_raw(raw)
    }
}

impl<T> From<Id<T>> for i64 {
    #[inline]
    fn from(id: Id<T>) -> Self {
        id.0
    }
}

impl<T> FromStr for Id<T> {
    type Err = ParseIntError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Serde support
// ============================================================================

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::from_raw)
    }
}

// ============================================================================
// sqlx support (BIGINT columns)
// ============================================================================

use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgHasArrayType, PgTypeInfo, PgValueRef, Postgres};
use sqlx::{Decode, Encode, Type};

impl<T> Type<Postgres> for Id<T> {
    fn type_info() -> PgTypeInfo {
        <i64 as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <i64 as Type<Postgres>>::compatible(ty)
    }
}

impl<T> PgHasArrayType for Id<T> {
    fn array_type_info() -> PgTypeInfo {
        <i64 as PgHasArrayType>::array_type_info()
    }
}

impl<T> Encode<'_, Postgres> for Id<T> {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <i64 as Encode<Postgres>>::encode_by_ref(&self.0, buf)
    }
}

impl<T> Decode<'_, Postgres> for Id<T> {
    fn decode(value: PgValueRef<'_>) -> Result<Self, BoxDynError> {
        <i64 as Decode<Postgres>>::decode(value).map(Self::from_raw)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct User;

    type UserId = Id<User>;

    #[test]
    fn test_parse_and_display_roundtrip() {
        let id = UserId::from_raw(1_234_567_890_123);
        let parsed = UserId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(UserId::parse("abc").is_err());
        assert!(UserId::parse("").is_err());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let id = UserId::from_raw(77);
        assert_eq!(serde_json::to_string(&id).unwrap(), "77");
        let parsed: UserId = serde_json::from_str("77").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_zero() {
        assert!(UserId::from_raw(0).is_zero());
        assert!(!UserId::from_raw(5).is_zero());
    }

    #[test]
    fn test_hash_map_key() {
        use std::collections::HashMap;
        let mut map: HashMap<UserId, &str> = HashMap::new();
        let id = UserId::from_raw(9);
        map.insert(id, "test");
        assert_eq!(map.get(&id), Some(&"test"));
    }

    #[test]
    fn test_debug_includes_type_name() {
        let debug = format!("{:?}", UserId::from_raw(3));
        assert!(debug.contains("User"));
    }
}
