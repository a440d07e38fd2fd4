//! # Domain Types
//!
//! Core domain types used throughout adquote.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     AdTier      │   │    Customer     │   │      Item       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Classic        │   │  id (identity)  │   │  tier           │       │
//! │  │  StandOut       │   │  name           │   │  text           │       │
//! │  │  Premium        │   │                 │   │  logo (URL?)    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All three are immutable once built. A `Customer` is compared by `id`
//! only, so two values with the same id and different names are the same
//! customer for pricing purposes.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

// =============================================================================
// Ad Tier
// =============================================================================

/// The level of prominence of an advertisement.
///
/// Variants are declared in increasing prominence, so the derived `Ord`
/// sorts `Classic < StandOut < Premium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdTier {
    /// The most basic level of advertisement.
    Classic,
    /// Allows a company logo and a longer presentation text.
    StandOut,
    /// Same as StandOut, and placed at the top of the results.
    Premium,
}

impl AdTier {
    /// Every tier, in increasing prominence.
    pub const ALL: [AdTier; 3] = [AdTier::Classic, AdTier::StandOut, AdTier::Premium];

    /// Lowercase name used in config files and listings.
    pub const fn as_str(&self) -> &'static str {
        match self {
            AdTier::Classic => "classic",
            AdTier::StandOut => "standout",
            AdTier::Premium => "premium",
        }
    }
}

impl fmt::Display for AdTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no tier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown ad tier '{0}'. Valid options: classic, standout, premium")]
pub struct ParseAdTierError(pub String);

impl FromStr for AdTier {
    type Err = ParseAdTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(AdTier::Classic),
            "standout" | "stand_out" | "stand-out" => Ok(AdTier::StandOut),
            "premium" => Ok(AdTier::Premium),
            other => Err(ParseAdTierError(other.to_string())),
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer buying advertisements.
///
/// ## Identity
/// Equality and hashing use `id` only. The name is for presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier, e.g. `"SB-01"`.
    pub id: String,

    /// Display name, e.g. `"SecondBite"`.
    pub name: String,
}

impl Customer {
    /// Creates a customer.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Customer {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Customer {}

impl Hash for Customer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// =============================================================================
// Item
// =============================================================================

/// A single advertisement to be purchased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Prominence level; decides the price.
    pub tier: AdTier,

    /// Presentation text of the ad.
    pub text: String,

    /// Optional company logo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<Url>,
}

impl Item {
    /// Creates an item without a logo.
    pub fn new(tier: AdTier, text: impl Into<String>) -> Self {
        Item {
            tier,
            text: text.into(),
            logo: None,
        }
    }

    /// Creates an item from all of its parts.
    pub fn from_parts(tier: AdTier, text: impl Into<String>, logo: Option<Url>) -> Self {
        Item {
            tier,
            text: text.into(),
            logo,
        }
    }

    /// Returns the item with the given logo attached.
    pub fn with_logo(mut self, logo: Url) -> Self {
        self.logo = Some(logo);
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tier_ordering() {
        assert!(AdTier::Classic < AdTier::StandOut);
        assert!(AdTier::StandOut < AdTier::Premium);

        let mut tiers = vec![AdTier::Premium, AdTier::Classic, AdTier::StandOut];
        tiers.sort();
        assert_eq!(tiers, AdTier::ALL.to_vec());
    }

    #[test]
    fn test_tier_parsing() {
        assert_eq!("classic".parse::<AdTier>().unwrap(), AdTier::Classic);
        assert_eq!("StandOut".parse::<AdTier>().unwrap(), AdTier::StandOut);
        assert_eq!("stand_out".parse::<AdTier>().unwrap(), AdTier::StandOut);
        assert_eq!(" premium ".parse::<AdTier>().unwrap(), AdTier::Premium);
        assert!("gold".parse::<AdTier>().is_err());
    }

    #[test]
    fn test_tier_display_matches_serde() {
        for tier in AdTier::ALL {
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, format!("\"{}\"", tier));
        }
    }

    #[test]
    fn test_customer_identity_is_by_id() {
        let a = Customer::new("SB-01", "SecondBite");
        let b = Customer::new("SB-01", "Second Bite Ltd");
        let c = Customer::new("AX-01", "SecondBite");

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Customer> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_item_builder() {
        let logo = Url::parse("https://example.net/logo.png").unwrap();
        let item = Item::new(AdTier::StandOut, "Basket weaver wanted").with_logo(logo.clone());

        assert_eq!(item.tier, AdTier::StandOut);
        assert_eq!(item.text, "Basket weaver wanted");
        assert_eq!(item.logo, Some(logo));

        let plain = Item::from_parts(AdTier::Classic, "Barista", None);
        assert!(plain.logo.is_none());
    }
}
