//! # adquote-core: Pure Pricing Logic for adquote
//!
//! This crate prices advertisement purchases. It answers one question:
//! what does this list of ads cost this customer?
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        adquote Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  quote-cli (`adquote` binary)                   │   │
//! │  │     config.toml ──► scenarios ──► text / JSON quotes           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ adquote-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   price   │  │  pricing  │  │ checkout  │  │   │
//! │  │   │  AdTier   │  │   Price   │  │  Pricing  │  │ Checkout  │  │   │
//! │  │   │ Customer  │  │           │  │   Rules   │  │  Summary  │  │   │
//! │  │   │   Item    │  │           │  │ InMemory  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO NETWORK • NO FORMATTING FOR HUMANS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (AdTier, Customer, Item)
//! - [`price`] - Price type
//! - [`error`] - Domain error types
//! - [`pricing`] - The `PricingRules` trait and its in-memory store
//! - [`checkout`] - Checkout sessions and totals
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use adquote_core::{AdTier, Checkout, InMemoryPricingRules, Item, Price};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let rules = Arc::new(InMemoryPricingRules::from_tier_prices(
//!         Price::new(1.0),
//!         Price::new(2.0),
//!         Price::new(4.0),
//!     ));
//!
//!     let mut checkout = Checkout::new(rules);
//!     checkout.add(Item::new(AdTier::Premium, "Junior developer wanted"));
//!     assert_eq!(checkout.total().await.unwrap(), Price::new(4.0));
//!
//!     checkout.add(Item::new(AdTier::Classic, "Basket weaver wanted"));
//!     assert_eq!(checkout.total().await.unwrap(), Price::new(5.0));
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod price;
pub mod pricing;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use adquote_core::Price` instead of
// `use adquote_core::price::Price`

pub use checkout::{Checkout, CheckoutSummary, PricedItem};
pub use error::{PricingError, PricingResult};
pub use price::Price;
pub use pricing::{InMemoryPricingRules, PricingRules};
pub use types::*;
