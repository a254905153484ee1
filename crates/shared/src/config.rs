//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Hierarchy projection settings.
    #[serde(default)]
    pub tree: TreeConfig,
    /// Ledger assembly settings.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Sale/purchase line pricing settings.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Batch expiry settings.
    #[serde(default)]
    pub expiry: ExpiryConfig,
}

/// Hierarchy projection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeConfig {
    /// Seed every node with children as expanded on first load.
    #[serde(default = "default_expand_all_on_load")]
    pub expand_all_on_load: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            expand_all_on_load: default_expand_all_on_load(),
        }
    }
}

fn default_expand_all_on_load() -> bool {
    true
}

/// Ledger assembly configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Largest |debit - credit| difference a journal may carry and still count as balanced.
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: Decimal,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            balance_tolerance: default_balance_tolerance(),
        }
    }
}

fn default_balance_tolerance() -> Decimal {
    Decimal::ZERO
}

/// Line pricing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// VAT rate applied to VAT-inclusive lines (0.13 = 13%).
    #[serde(default = "default_vat_rate")]
    pub vat_rate: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            vat_rate: default_vat_rate(),
        }
    }
}

fn default_vat_rate() -> Decimal {
    Decimal::new(13, 2)
}

/// Batch expiry configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpiryConfig {
    /// Batches expiring within this many days are flagged as expiring soon.
    #[serde(default = "default_warning_days")]
    pub warning_days: i64,
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self {
            warning_days: default_warning_days(),
        }
    }
}

fn default_warning_days() -> i64 {
    90
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Every key is optional; missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MEDISTOCK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
