use {
    lens_math::Dec,
    lens_registry::Registry,
    lens_types::{
        config::EngineConfig,
        feed::Coin,
        market::Market,
        snapshot::{DebtAmount, Positions, RiskSnapshot, SnapshotInvalid},
        Denom, DenomError,
    },
};

/// Reasons a snapshot can't be handed to the risk engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("no markets loaded")]
    NoMarkets,

    #[error("invalid base oracle denom: {0}")]
    BaseDenom(#[from] DenomError),

    #[error(transparent)]
    Invalid(#[from] SnapshotInvalid),
}

/// Price of one base unit of the market's token in the engine's price basis.
///
/// The oracle quotes prices for tokens with `oracle_base_decimals` decimals;
/// for a token with more (or fewer) decimals the price is shifted down (or
/// up) by the difference, then rounded to `price_precision` digits.
pub fn engine_price(price: &Dec, decimals: u32, cfg: &EngineConfig) -> Dec {
    let exponent = i64::from(decimals) - i64::from(cfg.oracle_base_decimals);

    price
        .shift(-exponent)
        .round_half_up(cfg.price_precision.into())
}

/// The user's positions, as the engine expects them: a lend for every
/// non-zero deposit and a debt for every non-zero debt, in registry order.
pub fn positions_of(registry: &Registry, cfg: &EngineConfig) -> Positions {
    let mut positions = Positions {
        account_id: cfg.account_id.clone(),
        account_kind: cfg.account_kind.clone(),
        ..Default::default()
    };

    for market in registry.markets() {
        if market.deposit.is_non_zero() {
            positions
                .lends
                .push(Coin::new(market.denom().clone(), market.deposit));
        }

        if market.debt.is_non_zero() {
            positions
                .debts
                .push(DebtAmount::new(market.denom().clone(), market.debt));
        }
    }

    positions
}

/// Build the engine's input from the registry.
///
/// Only markets with a usable price are included. If the user has a
/// position in a market without one, the account can't be valued and no
/// snapshot is produced.
pub fn build(
    registry: Option<&Registry>,
    cfg: &EngineConfig,
) -> Result<RiskSnapshot, SnapshotError> {
    let registry = match registry {
        Some(registry) if !registry.is_empty() => registry,
        _ => return Err(SnapshotError::NoMarkets),
    };

    let mut snapshot = RiskSnapshot::empty(cfg.account_id.clone(), cfg.account_kind.clone());

    for (denom, price) in &cfg.base_oracle_prices {
        snapshot
            .oracle_prices
            .insert(Denom::new(denom.as_str())?, price.clone());
    }

    for market in registry.markets() {
        let Some(price) = usable_price(market) else {
            tracing::debug!(denom = %market.denom(), "Market has no usable price, leaving out of snapshot");
            continue;
        };

        snapshot
            .asset_params
            .insert(market.denom().clone(), market.params.clone());
        snapshot.oracle_prices.insert(
            market.denom().clone(),
            engine_price(price, market.decimals(), cfg),
        );
    }

    snapshot.positions = positions_of(registry, cfg);

    if let Err(err) = snapshot.validate() {
        tracing::warn!(%err, "Risk snapshot unavailable");
        return Err(err.into());
    }

    Ok(snapshot)
}

fn usable_price(market: &Market) -> Option<&Dec> {
    market.price.as_ref().and_then(|price| price.usable_price())
}

// ----------------------------------- tests -----------------------------------
