//! Input schema of the risk engine.
//!
//! The engine evaluates an account's health from a single self-contained
//! document describing the account, its positions, and the parameters and
//! prices of every market involved. Field names and nesting must match what
//! the engine expects exactly.

use {
    crate::{feed::Coin, market::MarketParams, Dec, Denom, Json, Uint128},
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
};

/// Oracle denoms the engine always expects to find a price for.
pub const USD_DENOM: &str = "usd";
pub const UUSD_DENOM: &str = "uusd";

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    #[default]
    Default,
    HighLeveredStrategy,
    FundManager {
        vault_addr: String,
    },
}

/// A debt as the engine sees it. Shares aren't tracked by this application
/// and are always sent as zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DebtAmount {
    pub denom: Denom,
    pub amount: Uint128,
    pub shares: Uint128,
}

impl DebtAmount {
    pub fn new(denom: Denom, amount: Uint128) -> Self {
        Self {
            denom,
            amount,
            shares: Uint128::ZERO,
        }
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct Positions {
    pub account_id: String,
    pub account_kind: AccountKind,
    pub debts: Vec<DebtAmount>,
    pub deposits: Vec<Coin>,
    pub lends: Vec<Coin>,
    pub staked_astro_lps: Vec<Coin>,
    pub perps: Vec<Json>,
    pub vaults: Vec<Json>,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct VaultsData {
    pub vault_configs: BTreeMap<String, Json>,
    pub vault_values: BTreeMap<String, Json>,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct PerpsData {
    pub params: BTreeMap<String, Json>,
}

/// A full description of the user's account, ready to be handed to the risk
/// engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RiskSnapshot {
    pub kind: AccountKind,
    pub asset_params: BTreeMap<Denom, MarketParams>,
    /// Price of one base unit, at the oracle's base precision.
    pub oracle_prices: BTreeMap<Denom, Dec>,
    pub vaults_data: VaultsData,
    pub positions: Positions,
    pub perps_data: PerpsData,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotInvalid {
    #[error("missing oracle price for base denom `{denom}`")]
    MissingBasePrice { denom: &'static str },

    #[error("position in `{denom}` has no price")]
    UnpricedPosition { denom: Denom },

    #[error("position in `{denom}` has no asset params")]
    UnknownPosition { denom: Denom },
}

impl RiskSnapshot {
    pub fn empty(account_id: String, kind: AccountKind) -> Self {
        Self {
            kind: kind.clone(),
            asset_params: BTreeMap::new(),
            oracle_prices: BTreeMap::new(),
            vaults_data: VaultsData::default(),
            positions: Positions {
                account_id,
                account_kind: kind,
                ..Default::default()
            },
            perps_data: PerpsData::default(),
        }
    }

    /// Denoms of every lend and debt in the snapshot.
    pub fn position_denoms(&self) -> impl Iterator<Item = &Denom> {
        self.positions
            .lends
            .iter()
            .map(|coin| &coin.denom)
            .chain(self.positions.debts.iter().map(|debt| &debt.denom))
    }

    /// Check the snapshot is self-consistent: the base prices are present,
    /// and every position refers to a market with both params and a price.
    pub fn validate(&self) -> Result<(), SnapshotInvalid> {
        for denom in [USD_DENOM, UUSD_DENOM] {
            if !self.oracle_prices.contains_key(denom) {
                return Err(SnapshotInvalid::MissingBasePrice { denom });
            }
        }

        for denom in self.position_denoms() {
            if !self.oracle_prices.contains_key(denom) {
                return Err(SnapshotInvalid::UnpricedPosition {
                    denom: denom.clone(),
                });
            }

            if !self.asset_params.contains_key(denom) {
                return Err(SnapshotInvalid::UnknownPosition {
                    denom: denom.clone(),
                });
            }
        }

        Ok(())
    }
}

// ----------------------------------- tests -----------------------------------
