use {
    crate::positions_of,
    lens_math::{MathError, Uint128},
    lens_registry::Registry,
    lens_types::{
        action::{ActionKind, ActionRequest},
        config::EngineConfig,
        snapshot::Positions,
        Denom,
    },
};

/// Reasons an action can't be simulated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("unknown market `{denom}`")]
    UnknownMarket { denom: Denom },

    #[error("insufficient deposit in `{denom}`: {deposit} < {amount}")]
    InsufficientDeposit {
        denom: Denom,
        deposit: Uint128,
        amount: Uint128,
    },

    #[error(transparent)]
    Math(#[from] MathError),
}

/// The registry as it would be after the action goes through.
///
/// Only the user's position in the action's market changes. Amounts aren't
/// checked against any limit; that is the limit calculator's job.
pub fn simulate(registry: &Registry, action: &ActionRequest) -> Result<Registry, SimulationError> {
    let market = registry
        .market(&action.denom)
        .ok_or_else(|| SimulationError::UnknownMarket {
            denom: action.denom.clone(),
        })?;

    let (deposit, debt) = match action.kind {
        ActionKind::Supply => (market.deposit.checked_add(action.amount)?, market.debt),
        ActionKind::Withdraw => {
            if action.amount > market.deposit {
                return Err(SimulationError::InsufficientDeposit {
                    denom: action.denom.clone(),
                    deposit: market.deposit,
                    amount: action.amount,
                });
            }

            (market.deposit.checked_sub(action.amount)?, market.debt)
        },
        ActionKind::Borrow => (market.deposit, market.debt.checked_add(action.amount)?),
        // Repaying more than the debt clears it. Repay amounts usually carry
        // an interest buffer on top.
        ActionKind::Repay => (market.deposit, market.debt.saturating_sub(action.amount)),
    };

    let (registry, _) = registry
        .clone()
        .update_market(&action.denom, |market| market.set_position(deposit, debt));

    Ok(registry)
}

/// The positions the engine would see after the action.
pub fn simulate_positions(
    registry: &Registry,
    action: &ActionRequest,
    cfg: &EngineConfig,
) -> Result<Positions, SimulationError> {
    simulate(registry, action).map(|registry| positions_of(&registry, cfg))
}

// ----------------------------------- tests -----------------------------------
