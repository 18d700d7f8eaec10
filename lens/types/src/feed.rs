//! Records received from outside the application: token metadata, protocol
//! state feeds, the user's positions and wallet.

use {
    crate::{market::MetricsUpdate, Dec, Denom, Json, Uint128},
    serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize},
    std::collections::BTreeMap,
};

/// An amount of a single token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Coin {
    pub denom: Denom,
    pub amount: Uint128,
}

impl Coin {
    pub fn new(denom: Denom, amount: Uint128) -> Self {
        Self { denom, amount }
    }
}

/// Token metadata from the token list API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    pub denom: Denom,
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub decimals: Option<u32>,
    #[serde(default)]
    pub icon: Option<String>,
    /// USD price of one whole token.
    #[serde(default, rename = "priceUSD")]
    pub price_usd: Option<f64>,
}

/// One entry in the market metrics feed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MetricsFeedItem {
    pub denom: Denom,
    #[serde(flatten)]
    pub update: MetricsUpdate,
}

/// One entry in the oracle price feed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PriceFeedItem {
    pub denom: Denom,
    pub price: Dec,
}

/// A single lend or debt position as reported by the protocol.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserPosition {
    pub denom: Denom,
    pub amount: Uint128,
    #[serde(default)]
    pub amount_scaled: Option<Uint128>,
}

impl UserPosition {
    pub fn new(denom: Denom, amount: Uint128) -> Self {
        Self {
            denom,
            amount,
            amount_scaled: None,
        }
    }
}

/// Every deposit and debt of the current user.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct UserPositions {
    #[serde(default, deserialize_with = "deserialize_lenient_vec")]
    pub deposits: Vec<UserPosition>,
    #[serde(default, deserialize_with = "deserialize_lenient_vec")]
    pub debts: Vec<UserPosition>,
}

impl UserPositions {
    /// Sum of the user's deposits in the given denom.
    pub fn deposit_of(&self, denom: &Denom) -> Uint128 {
        Self::amount_of(&self.deposits, denom)
    }

    /// Sum of the user's debts in the given denom.
    pub fn debt_of(&self, denom: &Denom) -> Uint128 {
        Self::amount_of(&self.debts, denom)
    }

    fn amount_of(positions: &[UserPosition], denom: &Denom) -> Uint128 {
        positions
            .iter()
            .filter(|p| &p.denom == denom)
            .map(|p| p.amount)
            .sum()
    }
}

/// Token balances of the connected wallet, in base units.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct WalletBalances(
    #[serde(deserialize_with = "deserialize_lenient_balances")] BTreeMap<Denom, Uint128>,
);

impl WalletBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, denom: Denom, amount: Uint128) {
        self.0.insert(denom, amount);
    }

    /// Balance of the given denom; zero if the wallet doesn't hold any.
    pub fn balance_of(&self, denom: &Denom) -> Uint128 {
        self.0.get(denom).copied().unwrap_or_default()
    }
}

impl FromIterator<Coin> for WalletBalances {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Coin>,
    {
        let mut balances = Self::new();
        for coin in iter {
            let total = balances.balance_of(&coin.denom).saturating_add(coin.amount);
            balances.insert(coin.denom, total);
        }
        balances
    }
}

// ------------------------------- lenient decoding ----------------------------

/// Decode a JSON array feed entry by entry.
///
/// An entry that doesn't decode, e.g. one with a malformed denom, is dropped
/// with a warning and the rest of the feed is kept. Fails only if the input
/// isn't a JSON array at all.
pub fn decode_feed<T>(json: &[u8]) -> serde_json::Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let entries: Vec<Json> = serde_json::from_slice(json)?;

    Ok(keep_decodable(entries))
}

fn keep_decodable<T>(entries: Vec<Json>) -> Vec<T>
where
    T: DeserializeOwned,
{
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(index, %err, "Dropping malformed feed entry");
                None
            },
        })
        .collect()
}

fn deserialize_lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Vec::<Json>::deserialize(deserializer).map(keep_decodable)
}

fn deserialize_lenient_balances<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<Denom, Uint128>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = BTreeMap::<String, Json>::deserialize(deserializer)?;

    Ok(entries
        .into_iter()
        .filter_map(|(denom, amount)| {
            let parsed = Denom::new(denom.as_str())
                .map_err(|err| err.to_string())
                .and_then(|denom| {
                    serde_json::from_value(amount)
                        .map(|amount| (denom, amount))
                        .map_err(|err| err.to_string())
                });

            match parsed {
                Ok(balance) => Some(balance),
                Err(err) => {
                    let denom = denom.as_str();
                    tracing::warn!(denom, %err, "Dropping malformed wallet balance");
                    None
                },
            }
        })
        .collect())
}

// ----------------------------------- tests -----------------------------------
