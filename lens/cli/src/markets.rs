use {
    crate::output::{print_json_pretty, RegistryArgs},
    clap::Parser,
    lens_format::{format_token_balance, format_value, FormatSpec},
    lens_math::Uint128,
    lens_registry::finance::{borrow_apy, supply_apy, usd_value, PortfolioTotals},
    lens_types::{
        config::{FormatConfig, LensConfig},
        market::Market,
        Denom,
    },
    serde::Serialize,
};

#[derive(Parser)]
pub struct MarketsCmd {
    #[command(flatten)]
    registry: RegistryArgs,
}

#[derive(Serialize)]
struct PrintableMarket {
    denom: Denom,
    symbol: String,
    price: String,
    supplied: String,
    borrowed: String,
    supply_apy: String,
    borrow_apy: String,
    // The user's own position, if they have one.
    #[serde(skip_serializing_if = "Option::is_none")]
    deposit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    debt: Option<String>,
}

#[derive(Serialize)]
struct PrintableTotals {
    supplied: String,
    borrowed: String,
    net_worth: String,
}

#[derive(Serialize)]
struct PrintableMarkets {
    markets: Vec<PrintableMarket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    totals: Option<PrintableTotals>,
}

impl MarketsCmd {
    pub fn run(self, cfg: &LensConfig) -> anyhow::Result<()> {
        let registry = self.registry.load(cfg)?;
        let usd = FormatSpec::from(&cfg.format).currency();

        let markets = registry
            .markets()
            .iter()
            .map(|market| PrintableMarket::new(market, &usd, &cfg.format))
            .collect();

        let totals = registry.has_positions().then(|| {
            let totals = PortfolioTotals::new(&registry);
            PrintableTotals {
                supplied: format_value(&totals.supplied_usd, &usd).to_plain_string(),
                borrowed: format_value(&totals.borrowed_usd, &usd).to_plain_string(),
                net_worth: format_value(&totals.net_worth(), &usd).to_plain_string(),
            }
        });

        print_json_pretty(PrintableMarkets { markets, totals })
    }
}

impl PrintableMarket {
    fn new(market: &Market, usd: &FormatSpec, cfg: &FormatConfig) -> Self {
        let decimals = market.decimals();
        let price = market.price.as_ref();
        let total = |amount| format_value(&usd_value(amount, price, decimals), usd);
        let position = |amount: Uint128| {
            amount.is_non_zero().then(|| {
                format_token_balance(amount, decimals, cfg.significant_digits, cfg.decimal_places)
            })
        };

        Self {
            denom: market.denom().clone(),
            symbol: market.asset.symbol.clone(),
            price: match price.and_then(|price| price.usable_price()) {
                Some(price) => format_value(price, usd).to_plain_string(),
                None => "n/a".to_string(),
            },
            supplied: total(market.metrics.collateral_total_amount).to_plain_string(),
            borrowed: total(market.metrics.debt_total_amount).to_plain_string(),
            supply_apy: format!("{}%", supply_apy(market)),
            borrow_apy: format!("{}%", borrow_apy(market)),
            deposit: position(market.deposit),
            debt: position(market.debt),
        }
    }
}
