use {
    anyhow::bail,
    lens_math::Uint128,
    lens_types::{
        health::{BorrowTarget, HealthResult},
        snapshot::RiskSnapshot,
        Denom,
    },
};

/// The external engine that evaluates an account's solvency.
///
/// Calls may fail for any reason (engine not loaded, malformed snapshot,
/// internal error). Callers must turn failures into an unavailable or zero
/// result and never pass them on to the user as a number.
pub trait RiskEngine {
    /// Whether the engine has finished initializing. Calls made before then
    /// are expected to fail.
    fn is_ready(&self) -> bool {
        true
    }

    fn compute_health(&self, snapshot: &RiskSnapshot) -> anyhow::Result<HealthResult>;

    /// Largest amount of `denom`, in base units, the account can borrow
    /// without becoming liquidatable.
    fn max_borrow_estimate(
        &self,
        snapshot: &RiskSnapshot,
        denom: &Denom,
        target: &BorrowTarget,
    ) -> anyhow::Result<Uint128>;

    /// Largest amount of `denom`, in base units, the account can withdraw
    /// without becoming liquidatable.
    fn max_withdraw_estimate(
        &self,
        snapshot: &RiskSnapshot,
        denom: &Denom,
    ) -> anyhow::Result<Uint128>;
}

/// Stands in for the engine before it has been loaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableEngine;

impl RiskEngine for UnavailableEngine {
    fn is_ready(&self) -> bool {
        false
    }

    fn compute_health(&self, _snapshot: &RiskSnapshot) -> anyhow::Result<HealthResult> {
        bail!("risk engine not initialized");
    }

    fn max_borrow_estimate(
        &self,
        _snapshot: &RiskSnapshot,
        _denom: &Denom,
        _target: &BorrowTarget,
    ) -> anyhow::Result<Uint128> {
        bail!("risk engine not initialized");
    }

    fn max_withdraw_estimate(
        &self,
        _snapshot: &RiskSnapshot,
        _denom: &Denom,
    ) -> anyhow::Result<Uint128> {
        bail!("risk engine not initialized");
    }
}
