use {
    anyhow::{anyhow, bail},
    lens_math::{Dec, Uint128},
    lens_registry::Registry,
    lens_types::{
        feed::{TokenMetadata, UserPosition, UserPositions},
        health::{BorrowTarget, HealthResult},
        market::{
            CreditManagerSettings, LiquidationBonus, MarketParams, MetricsUpdate, RedBankSettings,
        },
        snapshot::RiskSnapshot,
        Denom,
    },
};

pub fn denom(s: &str) -> Denom {
    Denom::new_unchecked(s)
}

pub fn params(d: &str) -> MarketParams {
    MarketParams {
        denom: denom(d),
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
        max_loan_to_value: "0.5".parse().unwrap(),
        liquidation_threshold: "0.55".parse().unwrap(),
        liquidation_bonus: LiquidationBonus {
            starting_lb: "0.01".parse().unwrap(),
            slope: "2".parse().unwrap(),
            min_lb: "0.02".parse().unwrap(),
            max_lb: "0.1".parse().unwrap(),
        },
        protocol_liquidation_fee: "0.25".parse().unwrap(),
        deposit_cap: Uint128::MAX,
        close_factor: "0.9".parse().unwrap(),
    }
}

pub fn token(d: &str, decimals: u32, price: Option<f64>) -> TokenMetadata {
    TokenMetadata {
        denom: denom(d),
        symbol: d.trim_start_matches('u').to_uppercase(),
        name: None,
        description: None,
        decimals: Some(decimals),
        icon: None,
        price_usd: price,
    }
}

/// Two markets: `untrn` with 6 decimals at $0.5, `uweth` with 18 decimals
/// at $2000. The user holds nothing.
pub fn registry() -> Registry {
    Registry::build_initial(&[params("untrn"), params("uweth")], &[
        token("untrn", 6, Some(0.5)),
        token("uweth", 18, Some(2000.0)),
    ])
    .merge_metrics(&denom("untrn"), MetricsUpdate {
        collateral_total_amount: Some(Uint128::new(10_000_000)),
        debt_total_amount: Some(Uint128::new(4_000_000)),
        borrow_rate: Some("0.05".parse().unwrap()),
        ..Default::default()
    })
}

pub fn positions(deposits: &[(&str, u128)], debts: &[(&str, u128)]) -> UserPositions {
    let list = |items: &[(&str, u128)]| {
        items
            .iter()
            .map(|(d, amount)| UserPosition::new(denom(d), Uint128::new(*amount)))
            .collect()
    };

    UserPositions {
        deposits: list(deposits),
        debts: list(debts),
    }
}

/// An engine that returns fixed answers, or fails.
#[derive(Default)]
pub struct FixedEngine {
    pub health_factor: Option<Dec>,
    pub estimate: Uint128,
    pub fail: bool,
}

impl crate::RiskEngine for FixedEngine {
    fn compute_health(&self, _snapshot: &RiskSnapshot) -> anyhow::Result<HealthResult> {
        if self.fail {
            bail!("engine failure");
        }

        Ok(HealthResult {
            liquidation_health_factor: self.health_factor.clone(),
            ..Default::default()
        })
    }

    fn max_borrow_estimate(
        &self,
        _snapshot: &RiskSnapshot,
        _denom: &Denom,
        _target: &BorrowTarget,
    ) -> anyhow::Result<Uint128> {
        (!self.fail)
            .then_some(self.estimate)
            .ok_or_else(|| anyhow!("engine failure"))
    }

    fn max_withdraw_estimate(
        &self,
        _snapshot: &RiskSnapshot,
        _denom: &Denom,
    ) -> anyhow::Result<Uint128> {
        (!self.fail)
            .then_some(self.estimate)
            .ok_or_else(|| anyhow!("engine failure"))
    }
}
