//! # Scenario Runner
//!
//! Turns a [`QuoteConfig`] into pricing rules and quotes every scenario.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  default_prices ──► InMemoryPricingRules                               │
//! │                           │                                             │
//! │  special_prices ──────────┤  add_special_price() in file order         │
//! │                           │  (of_default resolved via get_price)       │
//! │                           ▼                                             │
//! │  scenarios ───────► Checkout per scenario ──► ScenarioQuote            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use adquote_core::{AdTier, Checkout, InMemoryPricingRules, Item, Price, PricingRules};
use tracing::info;

use crate::config::{PriceRule, QuoteConfig, ScenarioEntry};
use crate::error::{AppResult, ConfigError};

/// The priced outcome of one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioQuote {
    /// Display name of the customer; `None` for default pricing.
    pub customer_name: Option<String>,
    /// Tiers of the items, in the order they were added.
    pub tiers: Vec<AdTier>,
    pub total: Price,
}

/// Builds pricing rules with every configured special price registered.
///
/// # Errors
///
/// - `ConfigError::UnknownCustomer` for a special price naming an
///   undefined customer
/// - `PricingError::UnknownTier` for an `of_default` rule on a tier
///   without a default price
pub async fn build_pricing_rules(config: &QuoteConfig) -> AppResult<Arc<InMemoryPricingRules>> {
    let rules = InMemoryPricingRules::new(config.default_prices.to_table());

    for entry in &config.special_prices {
        let customer = config
            .customer(&entry.customer)
            .ok_or_else(|| ConfigError::UnknownCustomer(entry.customer.clone()))?;

        let price = match entry.rule()? {
            PriceRule::Fixed(price) => price,
            PriceRule::OfDefault(ratio) => rules
                .get_price(entry.tier, None)
                .await?
                .scaled(ratio.numerator, ratio.denominator),
        };

        rules.add_special_price(&customer, entry.tier, price).await;
    }

    Ok(Arc::new(rules))
}

/// Quotes one scenario on shared pricing rules.
pub async fn quote_scenario(
    rules: Arc<dyn PricingRules>,
    config: &QuoteConfig,
    scenario: &ScenarioEntry,
) -> AppResult<ScenarioQuote> {
    let customer = match &scenario.customer {
        Some(id) => Some(
            config
                .customer(id)
                .ok_or_else(|| ConfigError::UnknownCustomer(id.clone()))?,
        ),
        None => None,
    };

    let mut checkout = Checkout::new(rules);
    for item in &scenario.items {
        checkout.add(Item::from(item));
    }
    checkout.set_customer(customer.clone());

    let total = checkout.total().await?;
    info!(
        customer_id = customer.as_ref().map(|c| c.id.as_str()),
        items = checkout.item_count(),
        total = total.amount(),
        "Scenario quoted"
    );

    Ok(ScenarioQuote {
        customer_name: customer.map(|c| c.name),
        tiers: checkout.items().iter().map(|item| item.tier).collect(),
        total,
    })
}

/// Quotes every scenario in config order.
pub async fn quote_all(config: &QuoteConfig) -> AppResult<Vec<ScenarioQuote>> {
    let rules = build_pricing_rules(config).await?;

    let mut quotes = Vec::with_capacity(config.scenarios.len());
    for scenario in &config.scenarios {
        quotes.push(quote_scenario(rules.clone(), config, scenario).await?);
    }
    Ok(quotes)
}
