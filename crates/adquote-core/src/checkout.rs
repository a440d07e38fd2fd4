//! # Checkout
//!
//! Accumulates ad items for one customer and totals their prices.
//!
//! ## Checkout Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Operations                                  │
//! │                                                                         │
//! │  Caller Action            Method                  State Change          │
//! │  ─────────────            ──────                  ────────────          │
//! │                                                                         │
//! │  Add an ad ──────────────► add(item) ───────────► items.push(item)     │
//! │                                                                         │
//! │  Pick customer ──────────► set_customer(c) ─────► customer = c         │
//! │                                                                         │
//! │  Ask for price ──────────► total() ─────────────► (read only)          │
//! │                            summary()                                    │
//! │                                                                         │
//! │  Prices are resolved through the bound PricingRules on every call,     │
//! │  in the order the items were added.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::PricingResult;
use crate::price::Price;
use crate::pricing::PricingRules;
use crate::types::{AdTier, Customer, Item};

/// A checkout session.
///
/// ## Invariants
/// - Items keep insertion order; duplicates are allowed
/// - Items are never removed
/// - Computing a total never changes the checkout
pub struct Checkout {
    pricing_rules: Arc<dyn PricingRules>,

    customer: Option<Customer>,

    items: Vec<Item>,
}

impl Checkout {
    /// Creates an empty checkout with no customer, priced by `pricing_rules`.
    pub fn new(pricing_rules: Arc<dyn PricingRules>) -> Self {
        Checkout {
            pricing_rules,
            customer: None,
            items: Vec::new(),
        }
    }

    /// Appends an item.
    pub fn add(&mut self, item: Item) {
        debug!(tier = %item.tier, position = self.items.len(), "Item added to checkout");
        self.items.push(item);
    }

    /// Replaces the customer prices are resolved for.
    ///
    /// Accepts a `Customer` or an `Option<Customer>`; `None` means default
    /// prices only.
    pub fn set_customer(&mut self, customer: impl Into<Option<Customer>>) {
        self.customer = customer.into();
        debug!(
            customer_id = self.customer.as_ref().map(|c| c.id.as_str()),
            "Checkout customer set"
        );
    }

    /// Returns the current customer, if any.
    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    /// Returns the items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if no items have been added.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Computes the total price of all items for the current customer.
    ///
    /// Returns exactly zero for an empty checkout.
    ///
    /// # Errors
    ///
    /// The first lookup failure, e.g. [`crate::PricingError::UnknownTier`].
    /// No partial total is returned.
    pub async fn total(&self) -> PricingResult<Price> {
        if self.items.is_empty() {
            return Ok(Price::zero());
        }

        let mut total = Price::zero();
        for item in &self.items {
            total += self.price_of(item.tier).await?;
        }

        debug!(items = self.items.len(), total = total.amount(), "Checkout total computed");
        Ok(total)
    }

    /// Prices every item and returns the breakdown with the total.
    ///
    /// Same resolution and failure behavior as [`Checkout::total`].
    pub async fn summary(&self) -> PricingResult<CheckoutSummary> {
        let mut lines = Vec::with_capacity(self.items.len());
        let mut total = Price::zero();

        for item in &self.items {
            let price = self.price_of(item.tier).await?;
            total += price;
            lines.push(PricedItem {
                tier: item.tier,
                text: item.text.clone(),
                price,
            });
        }

        Ok(CheckoutSummary {
            customer_id: self.customer.as_ref().map(|c| c.id.clone()),
            lines,
            total,
        })
    }

    async fn price_of(&self, tier: AdTier) -> PricingResult<Price> {
        self.pricing_rules.get_price(tier, self.customer.as_ref()).await
    }
}

impl fmt::Debug for Checkout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkout")
            .field("customer", &self.customer)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

/// One priced line of a [`CheckoutSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedItem {
    pub tier: AdTier,
    pub text: String,
    pub price: Price,
}

/// Checkout breakdown for display or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutSummary {
    /// Customer the prices were resolved for; `None` means defaults.
    pub customer_id: Option<String>,
    /// One line per item, in insertion order.
    pub lines: Vec<PricedItem>,
    pub total: Price,
}

impl CheckoutSummary {
    /// Returns the number of priced lines.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }
}
