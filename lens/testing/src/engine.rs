use {
    anyhow::bail,
    lens_math::{Dec, Uint128},
    lens_risk::RiskEngine,
    lens_types::{
        health::{BorrowTarget, HealthResult},
        snapshot::RiskSnapshot,
        Denom,
    },
    std::{cell::RefCell, collections::BTreeMap},
};

/// A call made to the [`MockEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    ComputeHealth,
    MaxBorrowEstimate { denom: Denom, target: BorrowTarget },
    MaxWithdrawEstimate { denom: Denom },
}

// -------------------------------- mock engine --------------------------------

/// A mock implementation of the [`RiskEngine`] trait for testing purpose.
///
/// Answers are configured up front. Estimates for denoms without one are
/// zero. Every call is recorded together with the snapshot it received.
#[derive(Default)]
pub struct MockEngine {
    not_ready: bool,
    failure: Option<String>,
    health: HealthResult,
    borrow_estimates: BTreeMap<Denom, Uint128>,
    withdraw_estimates: BTreeMap<Denom, Uint128>,
    calls: RefCell<Vec<(EngineCall, RiskSnapshot)>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn not_ready(mut self) -> Self {
        self.not_ready = true;
        self
    }

    /// Make every call fail with the given message.
    pub fn failing<M>(mut self, message: M) -> Self
    where
        M: Into<String>,
    {
        self.failure = Some(message.into());
        self
    }

    pub fn with_health(mut self, health: HealthResult) -> Self {
        self.health = health;
        self
    }

    pub fn with_health_factor(mut self, health_factor: Dec) -> Self {
        self.health.liquidation_health_factor = Some(health_factor);
        self
    }

    pub fn with_borrow_estimate<T>(mut self, denom: Denom, amount: T) -> Self
    where
        T: Into<Uint128>,
    {
        self.borrow_estimates.insert(denom, amount.into());
        self
    }

    pub fn with_withdraw_estimate<T>(mut self, denom: Denom, amount: T) -> Self
    where
        T: Into<Uint128>,
    {
        self.withdraw_estimates.insert(denom, amount.into());
        self
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.borrow().iter().map(|(call, _)| call.clone()).collect()
    }

    /// The snapshot passed with the most recent call.
    pub fn last_snapshot(&self) -> Option<RiskSnapshot> {
        self.calls.borrow().last().map(|(_, snapshot)| snapshot.clone())
    }

    fn record(&self, call: EngineCall, snapshot: &RiskSnapshot) -> anyhow::Result<()> {
        self.calls.borrow_mut().push((call, snapshot.clone()));

        if let Some(message) = &self.failure {
            bail!("{message}");
        }

        Ok(())
    }
}

impl RiskEngine for MockEngine {
    fn is_ready(&self) -> bool {
        !self.not_ready
    }

    fn compute_health(&self, snapshot: &RiskSnapshot) -> anyhow::Result<HealthResult> {
        self.record(EngineCall::ComputeHealth, snapshot)?;

        Ok(self.health.clone())
    }

    fn max_borrow_estimate(
        &self,
        snapshot: &RiskSnapshot,
        denom: &Denom,
        target: &BorrowTarget,
    ) -> anyhow::Result<Uint128> {
        self.record(
            EngineCall::MaxBorrowEstimate {
                denom: denom.clone(),
                target: target.clone(),
            },
            snapshot,
        )?;

        Ok(self.borrow_estimates.get(denom).copied().unwrap_or_default())
    }

    fn max_withdraw_estimate(
        &self,
        snapshot: &RiskSnapshot,
        denom: &Denom,
    ) -> anyhow::Result<Uint128> {
        self.record(
            EngineCall::MaxWithdrawEstimate {
                denom: denom.clone(),
            },
            snapshot,
        )?;

        Ok(self.withdraw_estimates.get(denom).copied().unwrap_or_default())
    }
}
