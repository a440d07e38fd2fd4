//! # Presentation
//!
//! Formats scenario quotes for people (text) and programs (JSON).
//!
//! ## Text Layout
//! ```text
//! Customer: SecondBite
//! Items: 'classic', 'classic', 'classic', 'premium'
//! Total: $934.97
//!
//! ```
//!
//! Amounts are shown in Australian dollars with the narrow `$` symbol,
//! rounded to cents and grouped by thousands.

use adquote_core::{AdTier, Price};
use serde::Serialize;

use crate::scenario::ScenarioQuote;

/// Label used when a scenario has no customer.
pub const DEFAULT_CUSTOMER_LABEL: &str = "default";

/// Formats a price as AUD, e.g. `$1,294.96`.
pub fn format_aud(price: Price) -> String {
    let amount = price.amount();
    if amount.is_nan() {
        return "$NaN".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "$∞" } else { "-$∞" }.to_string();
    }

    let cents = (amount.abs() * 100.0).round() as u128;
    let sign = if amount < 0.0 && cents != 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Formats tiers as a quoted list, e.g. `'classic', 'premium'`.
pub fn format_item_list(tiers: &[AdTier]) -> String {
    tiers
        .iter()
        .map(|tier| format!("'{}'", tier))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders one quote as three lines and a blank line.
pub fn render_quote(quote: &ScenarioQuote) -> String {
    format!(
        "Customer: {}\nItems: {}\nTotal: {}\n",
        quote.customer_name.as_deref().unwrap_or(DEFAULT_CUSTOMER_LABEL),
        format_item_list(&quote.tiers),
        format_aud(quote.total),
    )
}

/// JSON shape of a quote.
#[derive(Debug, Serialize)]
pub struct QuoteView<'a> {
    pub customer: &'a str,
    pub items: &'a [AdTier],
    /// Unrounded total; `null` when the total is not finite.
    pub total: Price,
    pub formatted_total: String,
}

impl<'a> From<&'a ScenarioQuote> for QuoteView<'a> {
    fn from(quote: &'a ScenarioQuote) -> Self {
        QuoteView {
            customer: quote.customer_name.as_deref().unwrap_or(DEFAULT_CUSTOMER_LABEL),
            items: &quote.tiers,
            total: quote.total,
            formatted_total: format_aud(quote.total),
        }
    }
}

/// Renders all quotes as a pretty JSON array.
pub fn render_json(quotes: &[ScenarioQuote]) -> serde_json::Result<String> {
    let views: Vec<QuoteView<'_>> = quotes.iter().map(QuoteView::from).collect();
    serde_json::to_string_pretty(&views)
}
