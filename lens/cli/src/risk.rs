use {
    crate::output::{print_json_pretty, RegistryArgs},
    anyhow::Context,
    clap::Parser,
    lens_format::format_max_amount,
    lens_math::Uint128,
    lens_risk::{build, max_amount, simulate_positions, UnavailableEngine},
    lens_types::{
        action::{ActionKind, ActionRequest},
        config::LensConfig,
        feed::WalletBalances,
        market::{Market, DEFAULT_DECIMALS},
        Denom,
    },
    serde::Serialize,
    std::{fs, path::PathBuf},
};

// --------------------------------- snapshot ----------------------------------

#[derive(Parser)]
pub struct SnapshotCmd {
    #[command(flatten)]
    registry: RegistryArgs,
}

impl SnapshotCmd {
    pub fn run(self, cfg: &LensConfig) -> anyhow::Result<()> {
        let registry = self.registry.load(cfg)?;

        match build(Some(&registry), &cfg.engine) {
            Ok(snapshot) => print_json_pretty(snapshot),
            Err(err) => {
                println!("Risk snapshot unavailable: {err}");
                Ok(())
            },
        }
    }
}

// --------------------------------- simulate ----------------------------------

#[derive(Parser)]
pub struct SimulateCmd {
    #[command(flatten)]
    registry: RegistryArgs,

    /// The action: supply, withdraw, borrow or repay
    action: ActionKind,

    /// Token denomination
    denom: Denom,

    /// Amount in base units
    amount: Uint128,
}

impl SimulateCmd {
    pub fn run(self, cfg: &LensConfig) -> anyhow::Result<()> {
        let registry = self.registry.load(cfg)?;
        let action = ActionRequest::new(self.denom, self.action, self.amount);

        match simulate_positions(&registry, &action, &cfg.engine) {
            Ok(positions) => print_json_pretty(positions),
            Err(err) => {
                println!("Action rejected: {err}");
                Ok(())
            },
        }
    }
}

// ---------------------------------- limit ------------------------------------

#[derive(Parser)]
pub struct LimitCmd {
    #[command(flatten)]
    registry: RegistryArgs,

    /// JSON file of the wallet's balances in base units, e.g. `{"untrn":"1000000"}`
    #[arg(long)]
    wallet: PathBuf,

    /// The action: supply, withdraw, borrow or repay
    action: ActionKind,

    /// Token denomination
    denom: Denom,
}

#[derive(Serialize)]
struct PrintableLimit {
    action: ActionKind,
    denom: Denom,
    /// In base units.
    amount: Uint128,
    /// In whole tokens, rounded down.
    display: String,
}

impl LimitCmd {
    pub fn run(self, cfg: &LensConfig) -> anyhow::Result<()> {
        let registry = self.registry.load(cfg)?;

        let wallet = fs::read(&self.wallet)
            .with_context(|| format!("failed to read wallet from {}", self.wallet.display()))?;
        let wallet: WalletBalances = serde_json::from_slice(&wallet)?;

        // No engine is bundled with the CLI, so withdraw and borrow limits
        // come out as zero.
        let amount = max_amount(
            &registry,
            &self.denom,
            self.action,
            &wallet,
            &UnavailableEngine,
            cfg,
        );

        let decimals = registry
            .market(&self.denom)
            .map(Market::decimals)
            .unwrap_or(DEFAULT_DECIMALS);

        print_json_pretty(PrintableLimit {
            action: self.action,
            display: format_max_amount(amount, decimals),
            denom: self.denom,
            amount,
        })
    }
}
