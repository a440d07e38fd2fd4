//! # Pricing Rules
//!
//! Resolves the price of an ad tier, optionally for a specific customer.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get_price(tier, customer)                                             │
//! │       │                                                                 │
//! │       ├── customer is Some AND special price for (customer, tier)?     │
//! │       │        └── yes → special price                                 │
//! │       │                                                                 │
//! │       ├── default price for tier?                                      │
//! │       │        └── yes → default price                                 │
//! │       │                                                                 │
//! │       └── neither → PricingError::UnknownTier(tier)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "No customer" is `None`, never a customer with an empty id. A `None`
//! customer never matches a special price.
//!
//! ## Usage
//! ```rust
//! use adquote_core::{AdTier, Customer, InMemoryPricingRules, Price, PricingRules};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let rules = InMemoryPricingRules::from_tier_prices(
//!         Price::new(269.99),
//!         Price::new(322.99),
//!         Price::new(394.99),
//!     );
//!     let axil = Customer::new("AX-01", "Axil Coffee Roasters");
//!     rules.add_special_price(&axil, AdTier::StandOut, Price::new(299.99)).await;
//!
//!     assert_eq!(rules.get_price(AdTier::StandOut, Some(&axil)).await.unwrap(), Price::new(299.99));
//!     assert_eq!(rules.get_price(AdTier::StandOut, None).await.unwrap(), Price::new(322.99));
//! }
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{PricingError, PricingResult};
use crate::price::Price;
use crate::types::{AdTier, Customer};

// =============================================================================
// PricingRules Trait
// =============================================================================

/// A source of ad prices with per-customer special prices.
///
/// # Implementations
///
/// - [`InMemoryPricingRules`] - process-lifetime maps, nothing persisted
///
/// Implementations must be `Send + Sync` so one instance can back many
/// checkouts through an `Arc<dyn PricingRules>`.
#[async_trait]
pub trait PricingRules: Send + Sync {
    /// Registers a special price for `(customer, tier)`.
    ///
    /// Replaces any earlier special price for the same pair. Any value is
    /// accepted, including NaN and infinities, and is returned unchanged
    /// by [`PricingRules::get_price`].
    async fn add_special_price(&self, customer: &Customer, tier: AdTier, price: Price);

    /// Returns the price of `tier`, for `customer` when one is given.
    ///
    /// # Errors
    ///
    /// [`PricingError::UnknownTier`] when there is neither a special price
    /// for the customer nor a default price for the tier.
    async fn get_price(&self, tier: AdTier, customer: Option<&Customer>) -> PricingResult<Price>;
}

// =============================================================================
// In-Memory Implementation
// =============================================================================

type TierPrices = HashMap<AdTier, Price>;

/// [`PricingRules`] backed by in-memory maps.
///
/// ## Storage
/// - `default_pricing`: fixed at construction
/// - `price_overrides`: customer id → tier → price, grows with each
///   [`PricingRules::add_special_price`] call
#[derive(Debug, Default)]
pub struct InMemoryPricingRules {
    default_pricing: TierPrices,
    price_overrides: RwLock<HashMap<String, TierPrices>>,
}

impl InMemoryPricingRules {
    /// Creates pricing rules from a default price table.
    ///
    /// Every tier should have an entry. A missing tier is allowed, but any
    /// lookup for it without a matching special price fails.
    pub fn new(default_pricing: HashMap<AdTier, Price>) -> Self {
        for tier in AdTier::ALL {
            if !default_pricing.contains_key(&tier) {
                warn!(%tier, "No default price registered for tier");
            }
        }

        InMemoryPricingRules {
            default_pricing,
            price_overrides: RwLock::new(HashMap::new()),
        }
    }

    /// Creates pricing rules with a default price for every tier.
    pub fn from_tier_prices(classic: Price, standout: Price, premium: Price) -> Self {
        Self::new(HashMap::from([
            (AdTier::Classic, classic),
            (AdTier::StandOut, standout),
            (AdTier::Premium, premium),
        ]))
    }

    /// Returns the default price of `tier`, ignoring special prices.
    pub fn default_price(&self, tier: AdTier) -> Option<Price> {
        self.default_pricing.get(&tier).copied()
    }
}

#[async_trait]
impl PricingRules for InMemoryPricingRules {
    async fn add_special_price(&self, customer: &Customer, tier: AdTier, price: Price) {
        let mut overrides = self.price_overrides.write().await;
        let previous = overrides
            .entry(customer.id.clone())
            .or_default()
            .insert(tier, price);

        debug!(
            customer_id = %customer.id,
            %tier,
            price = price.amount(),
            replaced = previous.is_some(),
            "Registered special price"
        );
    }

    async fn get_price(&self, tier: AdTier, customer: Option<&Customer>) -> PricingResult<Price> {
        if let Some(customer) = customer {
            let overrides = self.price_overrides.read().await;
            if let Some(price) = overrides
                .get(&customer.id)
                .and_then(|prices| prices.get(&tier))
            {
                debug!(customer_id = %customer.id, %tier, source = "special", "Resolved price");
                return Ok(*price);
            }
        }

        match self.default_pricing.get(&tier) {
            Some(price) => {
                debug!(%tier, source = "default", "Resolved price");
                Ok(*price)
            }
            None => {
                warn!(%tier, "No price for tier");
                Err(PricingError::UnknownTier(tier))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_customer() -> Customer {
        Customer::new("TEST", "Test Customer")
    }

    fn rules(classic: f64, standout: f64, premium: f64) -> InMemoryPricingRules {
        InMemoryPricingRules::from_tier_prices(
            Price::new(classic),
            Price::new(standout),
            Price::new(premium),
        )
    }

    #[tokio::test]
    async fn test_default_price_per_tier() {
        let subject = rules(13.37, f64::NAN, f64::NAN);
        assert_eq!(subject.get_price(AdTier::Classic, None).await.unwrap(), Price::new(13.37));

        let subject = rules(f64::NAN, 13.37, f64::NAN);
        assert_eq!(subject.get_price(AdTier::StandOut, None).await.unwrap(), Price::new(13.37));

        let subject = rules(f64::NAN, f64::NAN, 13.37);
        assert_eq!(subject.get_price(AdTier::Premium, None).await.unwrap(), Price::new(13.37));
    }

    #[tokio::test]
    async fn test_missing_default_is_unknown_tier() {
        let subject = InMemoryPricingRules::new(HashMap::from([
            (AdTier::Classic, Price::new(1.0)),
            (AdTier::StandOut, Price::new(2.0)),
        ]));

        let err = subject.get_price(AdTier::Premium, None).await.unwrap_err();
        assert_eq!(err, PricingError::UnknownTier(AdTier::Premium));
        assert_eq!(err.to_string(), "unknown ad tier: premium");

        let err = subject
            .get_price(AdTier::Premium, Some(&test_customer()))
            .await
            .unwrap_err();
        assert_eq!(err, PricingError::UnknownTier(AdTier::Premium));
    }

    #[tokio::test]
    async fn test_special_price_per_tier() {
        for tier in AdTier::ALL {
            let customer = test_customer();
            let subject = rules(10.0, 20.0, 30.0);
            subject.add_special_price(&customer, tier, Price::new(1.23)).await;

            assert_eq!(subject.get_price(tier, Some(&customer)).await.unwrap(), Price::new(1.23));
        }
    }

    #[tokio::test]
    async fn test_special_price_beats_default_only_for_its_tier() {
        let customer = test_customer();
        let subject = rules(10.0, 20.0, 30.0);
        subject.add_special_price(&customer, AdTier::StandOut, Price::new(15.0)).await;

        assert_eq!(subject.get_price(AdTier::StandOut, Some(&customer)).await.unwrap(), Price::new(15.0));
        assert_eq!(subject.get_price(AdTier::Classic, Some(&customer)).await.unwrap(), Price::new(10.0));
        assert_eq!(subject.get_price(AdTier::Premium, Some(&customer)).await.unwrap(), Price::new(30.0));
    }

    #[tokio::test]
    async fn test_no_customer_never_matches_special_price() {
        let customer = test_customer();
        let subject = rules(10.0, 20.0, 30.0);
        subject.add_special_price(&customer, AdTier::Classic, Price::new(1.0)).await;

        assert_eq!(subject.get_price(AdTier::Classic, None).await.unwrap(), Price::new(10.0));
    }

    #[tokio::test]
    async fn test_special_price_lifecycle() {
        let customer = test_customer();
        let other = Customer::new("OTH1", "Other Customer");
        let subject = rules(f64::NAN, f64::NAN, f64::NAN);

        // Nothing registered yet: NaN default comes back unchanged
        assert!(subject.get_price(AdTier::Classic, Some(&customer)).await.unwrap().is_nan());

        subject.add_special_price(&customer, AdTier::Classic, Price::new(13.37)).await;
        assert_eq!(subject.get_price(AdTier::Classic, Some(&customer)).await.unwrap(), Price::new(13.37));

        // One customer's special price is not applied to another
        assert!(subject.get_price(AdTier::Classic, Some(&other)).await.unwrap().is_nan());

        // Last write wins
        subject.add_special_price(&customer, AdTier::Classic, Price::new(133.7)).await;
        assert_eq!(subject.get_price(AdTier::Classic, Some(&customer)).await.unwrap(), Price::new(133.7));
    }

    #[tokio::test]
    async fn test_non_finite_special_prices_are_stored_verbatim() {
        let customer = test_customer();
        let subject = rules(1.0, 2.0, 3.0);

        subject.add_special_price(&customer, AdTier::Classic, Price::new(f64::NAN)).await;
        subject.add_special_price(&customer, AdTier::Premium, Price::new(f64::INFINITY)).await;

        assert!(subject.get_price(AdTier::Classic, Some(&customer)).await.unwrap().is_nan());
        assert_eq!(
            subject.get_price(AdTier::Premium, Some(&customer)).await.unwrap().amount(),
            f64::INFINITY
        );
    }

    #[tokio::test]
    async fn test_customer_matched_by_id() {
        let subject = rules(10.0, 20.0, 30.0);
        subject
            .add_special_price(&Customer::new("SB-01", "SecondBite"), AdTier::Classic, Price::new(5.0))
            .await;

        let renamed = Customer::new("SB-01", "Second Bite Ltd");
        assert_eq!(subject.get_price(AdTier::Classic, Some(&renamed)).await.unwrap(), Price::new(5.0));
    }

    #[test]
    fn test_default_price_accessor() {
        let subject = rules(1.0, 2.0, 4.0);
        assert_eq!(subject.default_price(AdTier::Premium), Some(Price::new(4.0)));

        let partial = InMemoryPricingRules::new(HashMap::new());
        assert_eq!(partial.default_price(AdTier::Classic), None);
    }
}
