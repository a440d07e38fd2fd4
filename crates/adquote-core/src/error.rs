//! # Error Types
//!
//! Domain-specific error types for adquote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  adquote-core errors (this file)                                       │
//! │  └── PricingError     - Price resolution failures                      │
//! │                                                                         │
//! │  quote-cli errors (app crate)                                          │
//! │  ├── ConfigError      - Config file / environment problems             │
//! │  └── AppError         - What the binary reports                        │
//! │                                                                         │
//! │  Flow: PricingError → AppError → stderr                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (the tier that failed)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::types::AdTier;

// =============================================================================
// Pricing Error
// =============================================================================

/// Price resolution errors.
///
/// Adding items, setting a customer and registering special prices cannot
/// fail; only looking a price up can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Neither a special price nor a default price exists for the tier.
    ///
    /// ## When This Occurs
    /// - The default price table was built without an entry for this tier
    /// - A checkout contains an item of that tier
    ///
    /// This is a configuration error, not a transient one. It aborts the
    /// whole checkout total; no partial sum is returned.
    #[error("unknown ad tier: {0}")]
    UnknownTier(AdTier),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PricingError::UnknownTier(AdTier::Premium);
        assert_eq!(err.to_string(), "unknown ad tier: premium");

        let err = PricingError::UnknownTier(AdTier::StandOut);
        assert_eq!(err.to_string(), "unknown ad tier: standout");
    }
}
