use {
    lens_math::{Dec, Uint128},
    lens_registry::Registry,
    lens_types::{
        feed::{Coin, MetricsFeedItem, TokenMetadata, UserPosition, UserPositions, WalletBalances},
        market::{
            AssetParams, CreditManagerSettings, InterestRateModelUpdate, LiquidationBonus,
            MetricsUpdate, RedBankSettings,
        },
        Denom,
    },
    std::{str::FromStr, sync::LazyLock},
};

pub static NTRN: LazyLock<Denom> = LazyLock::new(|| Denom::new_unchecked("untrn"));
pub static USDC: LazyLock<Denom> = LazyLock::new(|| Denom::new_unchecked("uusdc"));
pub static WETH: LazyLock<Denom> = LazyLock::new(|| Denom::new_unchecked("uweth"));

/// Parse a decimal literal. Panics on malformed input; tests only.
pub fn dec(value: &str) -> Dec {
    Dec::from_str(value).unwrap_or_else(|err| panic!("invalid decimal `{value}`: {err}"))
}

/// Params of a listed, uncapped market.
pub fn asset_params(denom: &Denom) -> AssetParams {
    AssetParams {
        denom: denom.clone(),
        credit_manager: CreditManagerSettings {
            whitelisted: true,
            withdraw_enabled: true,
            hls: None,
        },
        red_bank: RedBankSettings {
            deposit_enabled: true,
            borrow_enabled: true,
            withdraw_enabled: true,
        },
        max_loan_to_value: dec("0.6"),
        liquidation_threshold: dec("0.65"),
        liquidation_bonus: LiquidationBonus {
            starting_lb: dec("0.01"),
            slope: dec("2"),
            min_lb: dec("0.02"),
            max_lb: dec("0.1"),
        },
        protocol_liquidation_fee: dec("0.25"),
        deposit_cap: Uint128::MAX,
        close_factor: dec("0.9"),
    }
}

pub fn token_metadata(denom: &Denom, symbol: &str, decimals: u32, price: f64) -> TokenMetadata {
    TokenMetadata {
        denom: denom.clone(),
        symbol: symbol.to_string(),
        name: None,
        description: None,
        decimals: Some(decimals),
        icon: None,
        price_usd: Some(price),
    }
}

pub fn metrics(collateral: u128, debt: u128, borrow_rate: &str) -> MetricsUpdate {
    MetricsUpdate {
        collateral_total_amount: Some(Uint128::new(collateral)),
        debt_total_amount: Some(Uint128::new(debt)),
        borrow_rate: Some(dec(borrow_rate)),
        interest_rate_model: Some(InterestRateModelUpdate {
            optimal_utilization_rate: Some(dec("0.8")),
            base: Some(dec("0")),
            slope_1: Some(dec("0.2")),
            slope_2: Some(dec("2")),
        }),
        ..Default::default()
    }
}

/// Three priced markets with live metrics and no user positions:
///
/// | denom | decimals | price | supplied | borrowed |
/// |---|---|---|---|---|
/// | untrn | 6 | 0.5 | 10,000 | 4,000 |
/// | uusdc | 6 | 1 | 1,000,000 | 800,000 |
/// | uweth | 18 | 2000 | 100 | 10 |
pub fn mock_registry() -> Registry {
    let params = [asset_params(&NTRN), asset_params(&USDC), asset_params(&WETH)];
    let tokens = [
        token_metadata(&NTRN, "NTRN", 6, 0.5),
        token_metadata(&USDC, "USDC", 6, 1.0),
        token_metadata(&WETH, "WETH", 18, 2000.0),
    ];

    Registry::build_initial(&params, &tokens).merge_metrics_feed([
        MetricsFeedItem {
            denom: NTRN.clone(),
            update: metrics(10_000_000000, 4_000_000000, "0.05"),
        },
        MetricsFeedItem {
            denom: USDC.clone(),
            update: metrics(1_000_000_000000, 800_000_000000, "0.12"),
        },
        MetricsFeedItem {
            denom: WETH.clone(),
            update: metrics(100 * 10u128.pow(18), 10 * 10u128.pow(18), "0.03"),
        },
    ])
}

/// Set the deposit cap of a market.
pub fn with_deposit_cap(registry: Registry, denom: &Denom, cap: u128) -> Registry {
    let (registry, _) = registry.update_market(denom, |mut market| {
        market.params.deposit_cap = Uint128::new(cap);
        market
    });

    registry
}

pub fn user_positions(deposits: &[(Denom, u128)], debts: &[(Denom, u128)]) -> UserPositions {
    let list = |items: &[(Denom, u128)]| {
        items
            .iter()
            .map(|(denom, amount)| UserPosition::new(denom.clone(), Uint128::new(*amount)))
            .collect()
    };

    UserPositions {
        deposits: list(deposits),
        debts: list(debts),
    }
}

pub fn wallet(balances: &[(Denom, u128)]) -> WalletBalances {
    balances
        .iter()
        .map(|(denom, amount)| Coin::new(denom.clone(), Uint128::new(*amount)))
        .collect()
}
