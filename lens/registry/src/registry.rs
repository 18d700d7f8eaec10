use {
    lens_math::{Dec, Uint128},
    lens_types::{
        feed::{MetricsFeedItem, PriceFeedItem, TokenMetadata, UserPosition, UserPositions},
        market::{
            Asset, AssetParams, Market, MarketMetrics, MetricsUpdate, PriceData, DEFAULT_DECIMALS,
            MAX_DECIMALS,
        },
        Denom,
    },
    serde::{Deserialize, Serialize},
    std::collections::BTreeSet,
};

/// The set of lending markets known to the application, in the order the
/// protocol lists them.
///
/// No two markets share a denom, and every market's asset and params refer
/// to the same denom. All updates consume the registry and return a new
/// one; a registry is never modified in place.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(from = "Vec<Market>", into = "Vec<Market>")]
pub struct Registry {
    markets: Vec<Market>,
}

impl Registry {
    /// Join the protocol's asset params with token metadata.
    ///
    /// Markets that are not listed (deposits disabled, not whitelisted, or
    /// zero max LTV) are left out, as are markets without token metadata or
    /// with more than [`MAX_DECIMALS`] decimals.
    pub fn build_initial(params: &[AssetParams], tokens: &[TokenMetadata]) -> Self {
        let markets = params
            .iter()
            .filter(|params| params.is_listed())
            .filter_map(|params| {
                let Some(token) = tokens.iter().find(|token| token.denom == params.denom) else {
                    tracing::warn!(denom = %params.denom, "No token metadata for market, skipping");
                    return None;
                };

                Some(new_market(params, token))
            })
            .collect();

        Self::from_markets(markets)
    }

    /// Create a registry from a list of markets, dropping any that violate
    /// the registry's invariants. For duplicate denoms the first one wins.
    pub fn from_markets(markets: Vec<Market>) -> Self {
        let mut seen = BTreeSet::new();

        let markets = markets
            .into_iter()
            .filter(|market| {
                if market.asset.denom != market.params.denom {
                    tracing::warn!(
                        asset = %market.asset.denom,
                        params = %market.params.denom,
                        "Market asset and params disagree on denom, dropping"
                    );
                    return false;
                }

                if market.decimals() > MAX_DECIMALS {
                    tracing::warn!(
                        denom = %market.denom(),
                        decimals = market.decimals(),
                        "Implausible token decimals, dropping market"
                    );
                    return false;
                }

                if !seen.insert(market.denom().clone()) {
                    tracing::warn!(denom = %market.denom(), "Duplicate market, dropping");
                    return false;
                }

                true
            })
            .collect();

        Self { markets }
    }

    pub fn markets(&self) -> &[Market] {
        &self.markets
    }

    pub fn market(&self, denom: &Denom) -> Option<&Market> {
        self.markets.iter().find(|market| market.denom() == denom)
    }

    pub fn denoms(&self) -> impl Iterator<Item = &Denom> {
        self.markets.iter().map(Market::denom)
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }

    /// Apply a function to the market of the given denom. Returns the
    /// registry unchanged, and `false`, if there is no such market.
    pub fn update_market<F>(self, denom: &Denom, action: F) -> (Self, bool)
    where
        F: FnOnce(Market) -> Market,
    {
        let Some(index) = self.markets.iter().position(|m| m.denom() == denom) else {
            return (self, false);
        };

        let mut markets = self.markets;
        let market = markets.remove(index);
        markets.insert(index, action(market));

        (Self { markets }, true)
    }

    /// Merge a partial metrics update into a market. Fields absent from the
    /// update keep their current values.
    pub fn merge_metrics(self, denom: &Denom, update: MetricsUpdate) -> Self {
        let (registry, found) = self.update_market(denom, |market| market.merge_metrics(update));

        if !found {
            tracing::warn!(%denom, "Received metrics for unknown market");
        }

        registry
    }

    /// Merge a full metrics response. Markets it doesn't mention keep their
    /// metrics.
    pub fn merge_metrics_feed<I>(self, feed: I) -> Self
    where
        I: IntoIterator<Item = MetricsFeedItem>,
    {
        feed.into_iter()
            .fold(self, |registry, item| registry.merge_metrics(&item.denom, item.update))
    }

    /// Replace the price of a market.
    pub fn merge_price(self, denom: &Denom, price: Dec) -> Self {
        let price = PriceData {
            denom: denom.clone(),
            price,
        };

        let (registry, found) = self.update_market(denom, |market| market.set_price(price));

        if !found {
            tracing::warn!(%denom, "Received price for unknown market");
        }

        registry
    }

    pub fn merge_price_feed<I>(self, feed: I) -> Self
    where
        I: IntoIterator<Item = PriceFeedItem>,
    {
        feed.into_iter()
            .fold(self, |registry, item| registry.merge_price(&item.denom, item.price))
    }

    /// Replace the user's positions. Every market's deposit and debt is first
    /// reset to zero, so positions missing from the list end up at zero.
    pub fn apply_positions(self, positions: &UserPositions) -> Self {
        for position in positions.deposits.iter().chain(&positions.debts) {
            if self.market(&position.denom).is_none() {
                tracing::warn!(denom = %position.denom, "Position in unknown market, ignoring");
            }
        }

        let markets = self
            .markets
            .into_iter()
            .map(|market| {
                let deposit = positions.deposit_of(market.denom());
                let debt = positions.debt_of(market.denom());
                market.set_position(deposit, debt)
            })
            .collect();

        Self { markets }
    }

    /// Zero every deposit and debt, keeping market data. Used when the
    /// wallet disconnects.
    pub fn reset(self) -> Self {
        let markets = self
            .markets
            .into_iter()
            .map(Market::reset_position)
            .collect();

        Self { markets }
    }

    pub fn has_positions(&self) -> bool {
        self.markets.iter().any(Market::has_position)
    }
}

impl From<Vec<Market>> for Registry {
    fn from(markets: Vec<Market>) -> Self {
        Self::from_markets(markets)
    }
}

impl From<Registry> for Vec<Market> {
    fn from(registry: Registry) -> Self {
        registry.markets
    }
}

fn new_market(params: &AssetParams, token: &TokenMetadata) -> Market {
    let asset = Asset {
        denom: params.denom.clone(),
        symbol: token.symbol.clone(),
        name: token.name.clone().unwrap_or_else(|| token.symbol.clone()),
        description: token.description.clone().unwrap_or_default(),
        decimals: token.decimals.unwrap_or(DEFAULT_DECIMALS),
        icon: token.icon.clone(),
    };

    let price = token
        .price_usd
        .and_then(Dec::from_f64)
        .filter(|price| !price.is_negative())
        .map(|price| PriceData {
            denom: params.denom.clone(),
            price,
        });

    Market {
        asset,
        params: params.clone(),
        metrics: MarketMetrics::default(),
        price,
        deposit: Uint128::ZERO,
        debt: Uint128::ZERO,
    }
}

/// Whether a newly fetched positions payload differs from the one applied
/// last. `None` means nothing has been applied yet.
pub fn positions_changed(previous: Option<&UserPositions>, next: &UserPositions) -> bool {
    let Some(previous) = previous else {
        return true;
    };

    if previous.deposits.len() != next.deposits.len() || previous.debts.len() != next.debts.len()
    {
        return true;
    }

    amounts_differ(&previous.deposits, &next.deposits)
        || amounts_differ(&previous.debts, &next.debts)
}

fn amounts_differ(old: &[UserPosition], new: &[UserPosition]) -> bool {
    new.iter().any(|position| {
        old.iter()
            .find(|p| p.denom == position.denom)
            .map_or(true, |p| p.amount != position.amount)
    })
}

// ----------------------------------- tests -----------------------------------
