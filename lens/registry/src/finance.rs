//! USD valuations and interest rate figures derived from market data.

use {
    crate::Registry,
    lens_math::{Dec, Uint128},
    lens_types::market::{InterestRateModel, Market, PriceData},
    serde::Serialize,
};

/// Number of compounding periods per year used to turn an APR into an APY.
pub const COMPOUNDING_PERIODS: i32 = 365;

/// USD value of an amount in base units. Zero if the price is missing or
/// unusable.
pub fn usd_value(amount: Uint128, price: Option<&PriceData>, decimals: u32) -> Dec {
    match price.and_then(PriceData::usable_price) {
        Some(price) => &amount.to_dec().shift(-i64::from(decimals)) * price,
        None => Dec::zero(),
    }
}

/// Convert an annual rate into an annual yield with daily compounding.
/// Both are fractions, e.g. 0.05 for 5%.
pub fn apr_to_apy(apr: &Dec) -> Dec {
    if apr.is_zero() {
        return Dec::zero();
    }

    let periods = f64::from(COMPOUNDING_PERIODS);
    let apy = (1.0 + apr.to_f64() / periods).powi(COMPOUNDING_PERIODS) - 1.0;

    Dec::from_f64(apy).unwrap_or_default()
}

/// Percentage with two decimals, e.g. 0.051267 -> 5.13.
fn as_percent(fraction: &Dec) -> Dec {
    fraction.shift(2).round_half_up(2)
}

/// APY earned by suppliers of the market, in percent.
pub fn supply_apy(market: &Market) -> Dec {
    as_percent(&apr_to_apy(&market.metrics.liquidity_rate))
}

/// APY paid by borrowers from the market, in percent.
pub fn borrow_apy(market: &Market) -> Dec {
    as_percent(&apr_to_apy(&market.metrics.borrow_rate))
}

/// Annual borrow rate the interest rate model yields at the given
/// utilization (a fraction).
pub fn borrow_rate_at(model: &InterestRateModel, utilization: &Dec) -> Dec {
    let optimal = &model.optimal_utilization_rate;

    if utilization <= optimal {
        let ratio = utilization.checked_div(optimal).unwrap_or_default();
        return &model.base + &(&ratio * &model.slope_1);
    }

    let excess = utilization - optimal;
    let ratio = excess
        .checked_div(&(&Dec::one() - optimal))
        .unwrap_or_default();

    &(&model.base + &model.slope_1) + &(&ratio * &model.slope_2)
}

/// Annual rate paid to suppliers for a given borrow rate: borrowers' interest
/// spread across all supplied funds, minus the protocol's reserve cut.
pub fn supply_rate_at(borrow_rate: &Dec, utilization: &Dec, reserve_factor: &Dec) -> Dec {
    &(borrow_rate * utilization) * &(&Dec::one() - reserve_factor)
}

/// Figures shown on a market's detail page. USD amounts are in dollars;
/// rates and ratios are in percent.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MarketDetails {
    pub reserve_size_usd: Dec,
    pub available_liquidity_usd: Dec,
    /// `None` if the market is uncapped.
    pub deposit_cap_usd: Option<Dec>,
    pub deposit_cap_usage_percent: Dec,
    pub utilization_rate: Dec,
    pub oracle_price: Dec,
    pub supply_apy: Dec,
    pub borrow_apy: Dec,
    pub max_ltv: Dec,
    pub liquidation_threshold: Dec,
    pub liquidation_penalty: Dec,
    pub reserve_factor: Dec,
}

impl MarketDetails {
    /// Returns `None` if the market has no usable price.
    pub fn new(market: &Market) -> Option<Self> {
        let price = market.price.as_ref().filter(|p| p.usable_price().is_some())?;
        let decimals = market.decimals();
        let metrics = &market.metrics;

        let reserve_size_usd = usd_value(metrics.collateral_total_amount, Some(price), decimals);
        let available = metrics
            .collateral_total_amount
            .saturating_sub(metrics.debt_total_amount);
        let deposit_cap_usd = market
            .params
            .deposit_cap_limit()
            .map(|cap| usd_value(cap, Some(price), decimals));

        let deposit_cap_usage_percent = match &deposit_cap_usd {
            Some(cap) if cap.is_positive() => reserve_size_usd
                .checked_div(cap)
                .map(|usage| as_percent(&usage).min(Dec::from(100u64)))
                .unwrap_or_default(),
            _ => Dec::zero(),
        };

        Some(Self {
            available_liquidity_usd: usd_value(available, Some(price), decimals),
            deposit_cap_usd,
            deposit_cap_usage_percent,
            utilization_rate: as_percent(&metrics.utilization_rate),
            oracle_price: price.price.clone(),
            supply_apy: supply_apy(market),
            borrow_apy: borrow_apy(market),
            max_ltv: market.params.max_loan_to_value.shift(2),
            liquidation_threshold: market.params.liquidation_threshold.shift(2),
            liquidation_penalty: market.params.liquidation_bonus.starting_lb.shift(2),
            reserve_factor: metrics.reserve_factor.shift(2),
            reserve_size_usd,
        })
    }
}

/// The user's totals across all markets, in USD.
#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct PortfolioTotals {
    pub supplied_usd: Dec,
    pub borrowed_usd: Dec,
}

impl PortfolioTotals {
    pub fn new(registry: &Registry) -> Self {
        registry
            .markets()
            .iter()
            .fold(Self::default(), |totals, market| {
                let price = market.price.as_ref();
                Self {
                    supplied_usd: totals.supplied_usd
                        + usd_value(market.deposit, price, market.decimals()),
                    borrowed_usd: totals.borrowed_usd
                        + usd_value(market.debt, price, market.decimals()),
                }
            })
    }

    pub fn net_worth(&self) -> Dec {
        &self.supplied_usd - &self.borrowed_usd
    }
}

/// The user's overall APY, in percent: yearly yield on deposits minus yearly
/// interest on debts, relative to net worth. Zero if net worth isn't
/// positive.
pub fn net_apy(registry: &Registry) -> Dec {
    let mut supplied = Dec::zero();
    let mut borrowed = Dec::zero();
    let mut yearly_yield = Dec::zero();

    for market in registry.markets() {
        let Some(price) = market.price.as_ref().filter(|p| p.usable_price().is_some()) else {
            continue;
        };

        if market.deposit.is_non_zero() {
            let value = usd_value(market.deposit, Some(price), market.decimals());
            yearly_yield = yearly_yield + &value * &apr_to_apy(&market.metrics.liquidity_rate);
            supplied = supplied + value;
        }

        if market.debt.is_non_zero() {
            let value = usd_value(market.debt, Some(price), market.decimals());
            yearly_yield = yearly_yield - &value * &apr_to_apy(&market.metrics.borrow_rate);
            borrowed = borrowed + value;
        }
    }

    let net_worth = supplied - borrowed;
    if !net_worth.is_positive() {
        return Dec::zero();
    }

    yearly_yield
        .checked_div(&net_worth)
        .map(|ratio| ratio.shift(2))
        .unwrap_or_default()
}

// ----------------------------------- tests -----------------------------------
