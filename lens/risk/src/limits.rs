use {
    crate::{build, RiskEngine},
    anyhow::{anyhow, bail},
    lens_math::{Dec, Uint128},
    lens_registry::Registry,
    lens_types::{
        action::ActionKind,
        config::{LensConfig, LimitsConfig},
        feed::WalletBalances,
        market::Market,
        snapshot::RiskSnapshot,
        Denom,
    },
};

/// The largest amount, in base units, the user may enter for an action.
///
/// Never fails: if anything needed to bound the amount is missing (unknown
/// market, no snapshot, engine not ready or erroring) the limit is zero.
pub fn max_amount(
    registry: &Registry,
    denom: &Denom,
    kind: ActionKind,
    wallet: &WalletBalances,
    engine: &dyn RiskEngine,
    cfg: &LensConfig,
) -> Uint128 {
    match try_max_amount(registry, denom, kind, wallet, engine, cfg) {
        Ok(amount) => amount,
        Err(err) => {
            tracing::warn!(%denom, action = %kind, %err, "Failed to compute action limit, using zero");
            Uint128::ZERO
        },
    }
}

fn try_max_amount(
    registry: &Registry,
    denom: &Denom,
    kind: ActionKind,
    wallet: &WalletBalances,
    engine: &dyn RiskEngine,
    cfg: &LensConfig,
) -> anyhow::Result<Uint128> {
    let market = registry
        .market(denom)
        .ok_or_else(|| anyhow!("unknown market `{denom}`"))?;

    match kind {
        ActionKind::Supply => Ok(max_supply(market, wallet.balance_of(denom))),
        ActionKind::Repay => max_repay(market, wallet.balance_of(denom), &cfg.limits),
        ActionKind::Withdraw => {
            let snapshot = engine_snapshot(registry, engine, cfg)?;
            let estimate = engine.max_withdraw_estimate(&snapshot, denom)?;

            Ok(estimate.min(market.deposit))
        },
        ActionKind::Borrow => {
            let snapshot = engine_snapshot(registry, engine, cfg)?;
            let estimate = engine.max_borrow_estimate(&snapshot, denom, &cfg.limits.borrow_target)?;

            Ok(estimate.min(available_liquidity(market)))
        },
    }
}

fn engine_snapshot(
    registry: &Registry,
    engine: &dyn RiskEngine,
    cfg: &LensConfig,
) -> anyhow::Result<RiskSnapshot> {
    if !engine.is_ready() {
        bail!("risk engine not ready");
    }

    Ok(build(Some(registry), &cfg.engine)?)
}

/// Wallet balance, bounded by what's left under the market's deposit cap.
pub fn max_supply(market: &Market, balance: Uint128) -> Uint128 {
    match market.params.deposit_cap_limit() {
        Some(cap) => {
            let remaining = cap.saturating_sub(market.metrics.collateral_total_amount);
            balance.min(remaining)
        },
        None => balance,
    }
}

/// What the market can lend out right now: everything supplied that isn't
/// already borrowed.
pub fn available_liquidity(market: &Market) -> Uint128 {
    market
        .metrics
        .collateral_total_amount
        .saturating_sub(market.metrics.debt_total_amount)
}

/// Interest the debt accrues over `repay_buffer_minutes` at the market's
/// current borrow rate, rounded up to a whole base unit.
pub fn repay_buffer(market: &Market, cfg: &LimitsConfig) -> anyhow::Result<Uint128> {
    let minutes = Dec::from(cfg.repay_buffer_minutes);
    let interest = &(&market.debt.to_dec() * &market.metrics.borrow_rate) * &minutes;
    let buffer = interest.checked_div(&Dec::from(cfg.minutes_per_year))?;

    Ok(buffer.to_uint_ceil()?)
}

/// Debt plus a little interest, bounded by the wallet balance, so that
/// repaying the maximum leaves no dust behind.
pub fn max_repay(market: &Market, balance: Uint128, cfg: &LimitsConfig) -> anyhow::Result<Uint128> {
    if market.debt.is_zero() {
        return Ok(balance);
    }

    let owed = market.debt.checked_add(repay_buffer(market, cfg)?)?;

    Ok(balance.min(owed))
}

// ----------------------------------- tests -----------------------------------
