// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The review store trait lives with its domain in domains/reviews/store.
//
// Naming convention: Base* for trait names (e.g., BaseIdGenerator)

// =============================================================================
// ID Generator Trait (Infrastructure)
// =============================================================================

/// Source of globally unique 64-bit identifiers.
///
/// Implementations must never return the same value twice to concurrent
/// callers within a process. Values are roughly time-ordered but callers
/// must not rely on strict monotonicity.
pub trait BaseIdGenerator: Send + Sync {
    /// Produce the next identifier (always non-zero).
    fn generate(&self) -> i64;
}
