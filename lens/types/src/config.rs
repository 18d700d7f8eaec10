use {
    crate::{health::BorrowTarget, snapshot::AccountKind, Dec},
    serde::{Deserialize, Serialize},
    std::{collections::BTreeMap, path::PathBuf},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LensConfig {
    pub engine: EngineConfig,
    pub limits: LimitsConfig,
    pub format: FormatConfig,
    pub registry: RegistryConfig,
    pub log_level: String,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            limits: LimitsConfig::default(),
            format: FormatConfig::default(),
            registry: RegistryConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

/// How the risk snapshot is put together for the engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Decimals of the oracle's price basis. A token with more decimals
    /// than this has its price shifted down accordingly.
    pub oracle_base_decimals: u32,
    /// Fractional digits kept in rescaled oracle prices.
    pub price_precision: u32,
    pub account_id: String,
    pub account_kind: AccountKind,
    /// Prices always included in the snapshot, regardless of markets.
    pub base_oracle_prices: BTreeMap<String, Dec>,
    /// Health factors above this are reported as this.
    pub health_factor_cap: Dec,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            oracle_base_decimals: 6,
            price_precision: 18,
            account_id: "1".to_string(),
            account_kind: AccountKind::Default,
            base_oracle_prices: BTreeMap::from([
                ("usd".to_string(), Dec::from(1_000_000u64)),
                ("uusd".to_string(), Dec::one()),
            ]),
            health_factor_cap: Dec::from(10u64),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LimitsConfig {
    /// How many minutes of interest to add on top of the debt when
    /// computing the maximum repay amount.
    pub repay_buffer_minutes: u64,
    pub minutes_per_year: u64,
    pub borrow_target: BorrowTarget,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            repay_buffer_minutes: 1,
            minutes_per_year: 525_600,
            borrow_target: BorrowTarget::Wallet,
        }
    }
}

/// Default options of the number formatter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FormatConfig {
    pub small_value_threshold: Dec,
    pub large_value_threshold: Dec,
    pub significant_digits: u32,
    pub decimal_places: u32,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            small_value_threshold: Dec::from_atomics(1, 4),
            large_value_threshold: Dec::from(1_000u64),
            significant_digits: 4,
            decimal_places: 2,
        }
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Where the registry is cached between runs. No caching if unset.
    pub cache_path: Option<PathBuf>,
}

// ----------------------------------- tests -----------------------------------
