//! # Quote Configuration
//!
//! Default prices, customers, special prices and checkout scenarios.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ADQUOTE_CLASSIC_PRICE=250                                          │
//! │     ADQUOTE_STANDOUT_PRICE / ADQUOTE_PREMIUM_PRICE                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <PATH>, or ADQUOTE_CONFIG=<PATH>, or                      │
//! │     ~/.config/adquote/quote.toml (Linux)                               │
//! │                                                                         │
//! │  3. Built-in config (lowest priority)                                  │
//! │     quote.toml shipped with the binary                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A config file replaces the built-in config as a whole; environment
//! variables then override single default prices.
//!
//! ## Configuration File Format
//! ```toml
//! [default_prices]
//! classic = 269.99
//! standout = 322.99
//! premium = 394.99
//!
//! [[customers]]
//! id = "SB-01"
//! name = "SecondBite"
//!
//! [[special_prices]]
//! customer = "SB-01"
//! tier = "classic"
//! of_default = { numerator = 2, denominator = 3 }
//!
//! [[scenarios]]
//! customer = "SB-01"
//! [[scenarios.items]]
//! tier = "classic"
//! text = "Volunteer truck-drivers wanted"
//! ```

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use adquote_core::{AdTier, Customer, Item, Price};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ConfigError, ConfigResult};

/// Config shipped with the binary, used when no file is found.
pub const BUILTIN_CONFIG: &str = include_str!("../quote.toml");

/// Environment variable naming a config file.
pub const CONFIG_PATH_VAR: &str = "ADQUOTE_CONFIG";

// =============================================================================
// Default Prices
// =============================================================================

/// Default price per tier.
///
/// A tier may be left out; quoting an item of that tier then fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultPrices {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classic: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standout: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium: Option<f64>,
}

impl DefaultPrices {
    /// Returns the configured default for `tier`.
    pub fn get(&self, tier: AdTier) -> Option<f64> {
        match tier {
            AdTier::Classic => self.classic,
            AdTier::StandOut => self.standout,
            AdTier::Premium => self.premium,
        }
    }

    /// Sets the default for `tier`.
    pub fn set(&mut self, tier: AdTier, price: f64) {
        match tier {
            AdTier::Classic => self.classic = Some(price),
            AdTier::StandOut => self.standout = Some(price),
            AdTier::Premium => self.premium = Some(price),
        }
    }

    /// Builds the tier → price table for the pricing rules.
    pub fn to_table(&self) -> HashMap<AdTier, Price> {
        AdTier::ALL
            .into_iter()
            .filter_map(|tier| self.get(tier).map(|price| (tier, Price::new(price))))
            .collect()
    }
}

// =============================================================================
// Customers and Special Prices
// =============================================================================

/// A customer known to the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerEntry {
    pub id: String,
    pub name: String,
}

impl From<&CustomerEntry> for Customer {
    fn from(entry: &CustomerEntry) -> Self {
        Customer::new(entry.id.clone(), entry.name.clone())
    }
}

/// A fraction of the default price, e.g. 2/3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ratio {
    pub numerator: f64,
    pub denominator: f64,
}

/// How a special price is computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceRule {
    /// Use this price as is.
    Fixed(Price),
    /// Scale the tier's default price.
    OfDefault(Ratio),
}

/// A special price for one customer and tier.
///
/// Exactly one of `price` and `of_default` must be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialPriceEntry {
    pub customer: String,

    pub tier: AdTier,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub of_default: Option<Ratio>,
}

impl SpecialPriceEntry {
    /// Returns the rule this entry describes.
    pub fn rule(&self) -> ConfigResult<PriceRule> {
        match (self.price, self.of_default) {
            (Some(price), None) => Ok(PriceRule::Fixed(Price::new(price))),
            (None, Some(ratio)) => {
                if !ratio.numerator.is_finite() || !ratio.denominator.is_finite() {
                    return Err(self.invalid("of_default must use finite numbers"));
                }
                if ratio.denominator == 0.0 {
                    return Err(self.invalid("of_default denominator must not be 0"));
                }
                Ok(PriceRule::OfDefault(ratio))
            }
            (Some(_), Some(_)) => Err(self.invalid("set either price or of_default, not both")),
            (None, None) => Err(self.invalid("set either price or of_default")),
        }
    }

    fn invalid(&self, reason: &str) -> ConfigError {
        ConfigError::InvalidSpecialPrice {
            customer: self.customer.clone(),
            tier: self.tier,
            reason: reason.to_string(),
        }
    }
}

// =============================================================================
// Scenarios
// =============================================================================

/// An ad in a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub tier: AdTier,

    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<Url>,
}

impl From<&ItemEntry> for Item {
    fn from(entry: &ItemEntry) -> Self {
        Item::from_parts(entry.tier, entry.text.clone(), entry.logo.clone())
    }
}

/// One checkout to quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioEntry {
    /// Customer id; `None` quotes default prices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,

    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

// =============================================================================
// Main Quote Configuration
// =============================================================================

/// Complete quote configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteConfig {
    #[serde(default)]
    pub default_prices: DefaultPrices,

    #[serde(default)]
    pub customers: Vec<CustomerEntry>,

    /// Registered in file order, so a later entry for the same customer
    /// and tier wins.
    #[serde(default)]
    pub special_prices: Vec<SpecialPriceEntry>,

    #[serde(default)]
    pub scenarios: Vec<ScenarioEntry>,
}

impl QuoteConfig {
    /// Parses the built-in config.
    pub fn builtin() -> ConfigResult<Self> {
        Self::from_toml(BUILTIN_CONFIG)
    }

    /// Parses a config from TOML text. Does not validate.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads configuration from file, environment, and the built-in config.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Built-in config
    /// 2. Config file: `config_path`, else `ADQUOTE_CONFIG`, else the
    ///    platform config dir. An explicitly named file must exist.
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.or_else(|| std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::read_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::read_file(path)?,
                path => {
                    debug!(?path, "Config file not found, using built-in config");
                    Self::builtin()?
                }
            },
        };

        config.apply_overrides(|var| std::env::var(var).ok())?;
        config.validate()?;

        Ok(config)
    }

    fn read_file(path: PathBuf) -> ConfigResult<Self> {
        info!(?path, "Loading quote config from file");
        let contents = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::Io { path, source })?;
        Self::from_toml(&contents)
    }

    /// Applies default price overrides.
    ///
    /// `lookup` maps a variable name to its value; `load` passes the
    /// process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for tier in AdTier::ALL {
            let var = price_override_var(tier);
            if let Some(value) = lookup(&var) {
                let price: f64 = value.trim().parse().map_err(|_| ConfigError::InvalidEnvValue {
                    var: var.clone(),
                    value: value.clone(),
                })?;
                debug!(%tier, price, "Overriding default price from environment");
                self.default_prices.set(tier, price);
            }
        }
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// A tier without a default price is only a warning: quoting an item
    /// of that tier will fail later.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut ids = HashSet::new();
        for (index, customer) in self.customers.iter().enumerate() {
            if customer.id.trim().is_empty() {
                return Err(ConfigError::EmptyCustomerId { index });
            }
            if !ids.insert(customer.id.as_str()) {
                return Err(ConfigError::DuplicateCustomer(customer.id.clone()));
            }
        }

        for entry in &self.special_prices {
            if !ids.contains(entry.customer.as_str()) {
                return Err(ConfigError::UnknownCustomer(entry.customer.clone()));
            }
            entry.rule()?;
        }

        for scenario in &self.scenarios {
            if let Some(id) = &scenario.customer {
                if !ids.contains(id.as_str()) {
                    return Err(ConfigError::UnknownCustomer(id.clone()));
                }
            }
        }

        for tier in AdTier::ALL {
            if self.default_prices.get(tier).is_none() {
                warn!(%tier, "No default price configured");
            }
        }

        Ok(())
    }

    /// Looks up a customer by id.
    pub fn customer(&self, id: &str) -> Option<Customer> {
        self.customers
            .iter()
            .find(|entry| entry.id == id)
            .map(Customer::from)
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "adquote", "adquote")
            .map(|dirs| dirs.config_dir().join("quote.toml"))
    }
}

/// Environment variable overriding the default price of `tier`.
pub fn price_override_var(tier: AdTier) -> String {
    format!("ADQUOTE_{}_PRICE", tier.as_str().to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [default_prices]
        classic = 1
        standout = 2
        premium = 4

        [[customers]]
        id = "TEST"
        name = "Test Customer"
    "#;

    #[test]
    fn test_builtin_config_is_valid() {
        let config = QuoteConfig::builtin().unwrap();
        assert!(config.validate().is_ok());

        assert_eq!(config.default_prices.get(AdTier::Classic), Some(269.99));
        assert_eq!(config.default_prices.get(AdTier::StandOut), Some(322.99));
        assert_eq!(config.default_prices.get(AdTier::Premium), Some(394.99));
        assert_eq!(config.customers.len(), 3);
        assert_eq!(config.special_prices.len(), 4);
        assert_eq!(config.scenarios.len(), 3);

        assert!(config.scenarios[0].customer.is_none());
        assert_eq!(config.scenarios[1].customer.as_deref(), Some("SB-01"));
        assert!(config.scenarios[0].items[1].logo.is_some());
    }

    #[test]
    fn test_builtin_special_price_rules() {
        let config = QuoteConfig::builtin().unwrap();
        assert_eq!(
            config.special_prices[0].rule().unwrap(),
            PriceRule::OfDefault(Ratio {
                numerator: 2.0,
                denominator: 3.0
            })
        );
        assert_eq!(
            config.special_prices[1].rule().unwrap(),
            PriceRule::Fixed(Price::new(299.99))
        );
    }

    #[test]
    fn test_missing_default_tier_is_allowed() {
        let config = QuoteConfig::from_toml("[default_prices]\nclassic = 1.5\n").unwrap();
        assert!(config.validate().is_ok());

        let table = config.default_prices.to_table();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&AdTier::Classic), Some(&Price::new(1.5)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = QuoteConfig::from_toml(MINIMAL).unwrap();
        let env = HashMap::from([("ADQUOTE_PREMIUM_PRICE".to_string(), " 9.5 ".to_string())]);

        config.apply_overrides(|var| env.get(var).cloned()).unwrap();
        assert_eq!(config.default_prices.get(AdTier::Premium), Some(9.5));
        assert_eq!(config.default_prices.get(AdTier::Classic), Some(1.0));
    }

    #[test]
    fn test_invalid_env_override() {
        let mut config = QuoteConfig::from_toml(MINIMAL).unwrap();
        let err = config
            .apply_overrides(|var| (var == "ADQUOTE_CLASSIC_PRICE").then(|| "cheap".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvValue { .. }));
    }

    #[test]
    fn test_override_var_names() {
        assert_eq!(price_override_var(AdTier::Classic), "ADQUOTE_CLASSIC_PRICE");
        assert_eq!(price_override_var(AdTier::StandOut), "ADQUOTE_STANDOUT_PRICE");
        assert_eq!(price_override_var(AdTier::Premium), "ADQUOTE_PREMIUM_PRICE");
    }

    #[test]
    fn test_config_validation() {
        let mut config = QuoteConfig::from_toml(MINIMAL).unwrap();
        assert!(config.validate().is_ok());

        // Special price for an unknown customer
        config.special_prices.push(SpecialPriceEntry {
            customer: "NOPE".to_string(),
            tier: AdTier::Classic,
            price: Some(1.0),
            of_default: None,
        });
        assert!(matches!(config.validate(), Err(ConfigError::UnknownCustomer(id)) if id == "NOPE"));

        // Scenario for an unknown customer
        config.special_prices.clear();
        config.scenarios.push(ScenarioEntry {
            customer: Some("GHOST".to_string()),
            items: Vec::new(),
        });
        assert!(matches!(config.validate(), Err(ConfigError::UnknownCustomer(_))));

        // Duplicate customer id
        config.scenarios.clear();
        config.customers.push(CustomerEntry {
            id: "TEST".to_string(),
            name: "Again".to_string(),
        });
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateCustomer(_))));

        // Empty customer id
        config.customers = vec![CustomerEntry {
            id: "  ".to_string(),
            name: "Blank".to_string(),
        }];
        assert!(matches!(config.validate(), Err(ConfigError::EmptyCustomerId { index: 0 })));
    }

    #[test]
    fn test_special_price_rule_validation() {
        let mut entry = SpecialPriceEntry {
            customer: "TEST".to_string(),
            tier: AdTier::StandOut,
            price: None,
            of_default: None,
        };
        assert!(entry.rule().is_err());

        entry.price = Some(3.0);
        entry.of_default = Some(Ratio {
            numerator: 1.0,
            denominator: 2.0,
        });
        assert!(entry.rule().is_err());

        entry.price = None;
        entry.of_default = Some(Ratio {
            numerator: 1.0,
            denominator: 0.0,
        });
        assert!(entry.rule().is_err());

        // Non-finite fixed prices are accepted verbatim
        entry.of_default = None;
        entry.price = Some(f64::NAN);
        assert!(matches!(entry.rule(), Ok(PriceRule::Fixed(p)) if p.is_nan()));
    }

    #[test]
    fn test_customer_lookup() {
        let config = QuoteConfig::builtin().unwrap();
        let customer = config.customer("AX-01").unwrap();
        assert_eq!(customer.name, "Axil Coffee Roasters");
        assert!(config.customer("NOPE").is_none());
    }

    #[test]
    fn test_toml_serialization() {
        let config = QuoteConfig::builtin().unwrap();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[default_prices]"));
        assert!(toml_str.contains("[[special_prices]]"));
        assert!(toml_str.contains("SB-01"));
    }
}
