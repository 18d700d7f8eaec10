use {
    crate::{Dec, Denom, Uint128},
    serde::{Deserialize, Serialize},
};

/// Number of decimal places assumed for a token whose metadata doesn't say.
pub const DEFAULT_DECIMALS: u32 = 6;

/// Tokens claiming more decimal places than this are rejected. No real token
/// comes close, and every price and amount conversion scales with it.
pub const MAX_DECIMALS: u32 = 36;

/// Display metadata of a token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub denom: Denom,
    pub symbol: String,
    pub name: String,
    pub description: String,
    /// Number of decimal places between the base unit and the display unit,
    /// e.g. 6 for `untrn` -> NTRN.
    pub decimals: u32,
    pub icon: Option<String>,
}

// ------------------------------ market params --------------------------------

/// Risk parameters of a market, as configured in the lending protocol.
///
/// This is the same record the protocol's params contract returns, and the
/// same record the risk engine expects under `asset_params`, so it goes in
/// and comes out without transformation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MarketParams {
    pub denom: Denom,
    pub credit_manager: CreditManagerSettings,
    pub red_bank: RedBankSettings,
    pub max_loan_to_value: Dec,
    pub liquidation_threshold: Dec,
    pub liquidation_bonus: LiquidationBonus,
    pub protocol_liquidation_fee: Dec,
    /// Maximum total collateral the market accepts. `Uint128::MAX` if the
    /// protocol doesn't cap it.
    #[serde(default = "uncapped")]
    pub deposit_cap: Uint128,
    pub close_factor: Dec,
}

fn uncapped() -> Uint128 {
    Uint128::MAX
}

/// Asset parameters as received from the protocol. Identical to the params
/// stored in a market.
pub type AssetParams = MarketParams;

impl MarketParams {
    /// Whether the market should be shown to users at all: deposits must be
    /// open, the asset must be usable in credit accounts, and it must count
    /// as collateral.
    pub fn is_listed(&self) -> bool {
        self.red_bank.deposit_enabled
            && self.credit_manager.whitelisted
            && !self.max_loan_to_value.is_zero()
    }

    /// The deposit cap, or `None` if the market is uncapped.
    pub fn deposit_cap_limit(&self) -> Option<Uint128> {
        if self.deposit_cap == Uint128::MAX {
            None
        } else {
            Some(self.deposit_cap)
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreditManagerSettings {
    pub whitelisted: bool,
    #[serde(default)]
    pub withdraw_enabled: bool,
    #[serde(default)]
    pub hls: Option<HlsParams>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RedBankSettings {
    pub deposit_enabled: bool,
    pub borrow_enabled: bool,
    #[serde(default)]
    pub withdraw_enabled: bool,
}

/// Parameters for high levered strategy accounts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HlsParams {
    pub max_loan_to_value: Dec,
    pub liquidation_threshold: Dec,
    pub correlations: Vec<HlsAssetType>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HlsAssetType {
    Coin { denom: Denom },
    Vault { addr: String },
}

/// The liquidation bonus grows linearly with how far the account is below
/// a health factor of one, between `min_lb` and `max_lb`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LiquidationBonus {
    pub starting_lb: Dec,
    pub slope: Dec,
    pub min_lb: Dec,
    pub max_lb: Dec,
}

// ------------------------------ market metrics -------------------------------

/// Parameters of the kinked interest rate curve.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct InterestRateModel {
    pub optimal_utilization_rate: Dec,
    pub base: Dec,
    pub slope_1: Dec,
    pub slope_2: Dec,
}

/// A partial update to an [`InterestRateModel`].
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct InterestRateModelUpdate {
    pub optimal_utilization_rate: Option<Dec>,
    pub base: Option<Dec>,
    pub slope_1: Option<Dec>,
    pub slope_2: Option<Dec>,
}

impl InterestRateModel {
    pub fn merge(self, update: InterestRateModelUpdate) -> Self {
        Self {
            optimal_utilization_rate: update
                .optimal_utilization_rate
                .unwrap_or(self.optimal_utilization_rate),
            base: update.base.unwrap_or(self.base),
            slope_1: update.slope_1.unwrap_or(self.slope_1),
            slope_2: update.slope_2.unwrap_or(self.slope_2),
        }
    }
}

/// Live state of a market. All zero until the first metrics update arrives.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct MarketMetrics {
    /// Total amount deposited into the market, in base units.
    pub collateral_total_amount: Uint128,
    /// Total amount borrowed from the market, in base units.
    pub debt_total_amount: Uint128,
    pub utilization_rate: Dec,
    pub reserve_factor: Dec,
    pub interest_rate_model: InterestRateModel,
    /// Annual borrow rate, as a fraction (0.05 = 5%).
    pub borrow_rate: Dec,
    /// Annual rate paid to lenders, as a fraction.
    pub liquidity_rate: Dec,
}

/// A partial update to [`MarketMetrics`]. Fields left as `None` keep their
/// current value.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MetricsUpdate {
    pub collateral_total_amount: Option<Uint128>,
    pub debt_total_amount: Option<Uint128>,
    pub utilization_rate: Option<Dec>,
    pub reserve_factor: Option<Dec>,
    pub interest_rate_model: Option<InterestRateModelUpdate>,
    pub borrow_rate: Option<Dec>,
    pub liquidity_rate: Option<Dec>,
}

impl MarketMetrics {
    pub fn merge(self, update: MetricsUpdate) -> Self {
        Self {
            collateral_total_amount: update
                .collateral_total_amount
                .unwrap_or(self.collateral_total_amount),
            debt_total_amount: update.debt_total_amount.unwrap_or(self.debt_total_amount),
            utilization_rate: update.utilization_rate.unwrap_or(self.utilization_rate),
            reserve_factor: update.reserve_factor.unwrap_or(self.reserve_factor),
            interest_rate_model: match update.interest_rate_model {
                Some(irm) => self.interest_rate_model.merge(irm),
                None => self.interest_rate_model,
            },
            borrow_rate: update.borrow_rate.unwrap_or(self.borrow_rate),
            liquidity_rate: update.liquidity_rate.unwrap_or(self.liquidity_rate),
        }
    }
}

// ----------------------------------- price -----------------------------------

/// USD price of one whole token, as reported by the oracle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PriceData {
    pub denom: Denom,
    pub price: Dec,
}

impl PriceData {
    /// The price, if it can be used in valuations. Negative prices can't.
    pub fn usable_price(&self) -> Option<&Dec> {
        (!self.price.is_negative()).then_some(&self.price)
    }
}

// ----------------------------------- market ----------------------------------

/// Everything the application knows about one lending market, including the
/// current user's position in it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Market {
    pub asset: Asset,
    pub params: MarketParams,
    pub metrics: MarketMetrics,
    pub price: Option<PriceData>,
    /// The user's deposit, in base units.
    pub deposit: Uint128,
    /// The user's debt, in base units.
    pub debt: Uint128,
}

impl Market {
    pub fn denom(&self) -> &Denom {
        &self.asset.denom
    }

    pub fn decimals(&self) -> u32 {
        self.asset.decimals
    }

    pub fn has_position(&self) -> bool {
        self.deposit.is_non_zero() || self.debt.is_non_zero()
    }

    pub fn merge_metrics(self, update: MetricsUpdate) -> Self {
        let metrics = self.metrics.merge(update);
        Self { metrics, ..self }
    }

    pub fn set_price(self, price: PriceData) -> Self {
        Self {
            price: Some(price),
            ..self
        }
    }

    pub fn set_position(self, deposit: Uint128, debt: Uint128) -> Self {
        Self {
            deposit,
            debt,
            ..self
        }
    }

    pub fn reset_position(self) -> Self {
        self.set_position(Uint128::ZERO, Uint128::ZERO)
    }
}

// ----------------------------------- tests -----------------------------------
