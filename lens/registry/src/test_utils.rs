use {
    crate::Registry,
    lens_math::Uint128,
    lens_types::{
        feed::{TokenMetadata, UserPosition, UserPositions},
        market::{CreditManagerSettings, LiquidationBonus, MarketParams, RedBankSettings},
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

pub fn token(d: &str, symbol: &str) -> TokenMetadata {
    TokenMetadata {
        denom: denom(d),
        symbol: symbol.to_string(),
        name: None,
        description: None,
        decimals: None,
        icon: None,
        price_usd: Some(1.5),
    }
}

pub fn registry() -> Registry {
    Registry::build_initial(
        &[params("untrn"), params("uatom"), params("uosmo")],
        &[
            token("uosmo", "OSMO"),
            token("untrn", "NTRN"),
            token("uatom", "ATOM"),
        ],
    )
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
