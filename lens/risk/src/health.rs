use {
    crate::{build, simulate_positions, RiskEngine},
    lens_math::Dec,
    lens_registry::Registry,
    lens_types::{action::ActionRequest, config::LensConfig, snapshot::RiskSnapshot},
    serde::Serialize,
};

/// Health factors at or above this are safe.
pub const SAFE_HEALTH_FACTOR: u64 = 25;

/// Health factors at or below this are at risk of liquidation.
pub const AT_RISK_HEALTH_FACTOR: u64 = 12;

/// The account's health, as presented to the user.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "status", content = "health_factor")]
pub enum HealthStatus {
    /// The health factor can't be known right now: markets aren't loaded,
    /// a position can't be priced, or the engine isn't ready or failed.
    /// This is not the same as a health factor of zero.
    Unavailable,
    /// The user holds nothing, so there's nothing to evaluate.
    NoPositions,
    /// The liquidation health factor, capped.
    Factor(Dec),
}

#[derive(Serialize, strum::Display, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskBand {
    Safe,
    Moderate,
    AtRisk,
}

impl HealthStatus {
    pub fn factor(&self) -> Option<&Dec> {
        match self {
            HealthStatus::Factor(factor) => Some(factor),
            _ => None,
        }
    }

    pub fn risk_band(&self) -> Option<RiskBand> {
        let factor = self.factor()?;

        if *factor >= Dec::from_atomics(SAFE_HEALTH_FACTOR.into(), 1) {
            Some(RiskBand::Safe)
        } else if *factor > Dec::from_atomics(AT_RISK_HEALTH_FACTOR.into(), 1) {
            Some(RiskBand::Moderate)
        } else {
            Some(RiskBand::AtRisk)
        }
    }
}

/// Ask the engine for the health of the account described by the snapshot.
///
/// An account without debt has no health factor; it's reported as `cap`,
/// as is any factor above it.
pub fn evaluate_health(
    engine: &dyn RiskEngine,
    snapshot: Option<&RiskSnapshot>,
    cap: &Dec,
) -> HealthStatus {
    let Some(snapshot) = snapshot else {
        return HealthStatus::Unavailable;
    };

    if snapshot.positions.lends.is_empty() && snapshot.positions.debts.is_empty() {
        return HealthStatus::NoPositions;
    }

    if !engine.is_ready() {
        tracing::debug!("Risk engine not ready, health unavailable");
        return HealthStatus::Unavailable;
    }

    match engine.compute_health(snapshot) {
        Ok(result) => {
            let factor = match result.liquidation_health_factor {
                Some(factor) => factor.min(cap.clone()),
                None => cap.clone(),
            };

            HealthStatus::Factor(factor)
        },
        Err(err) => {
            tracing::warn!(%err, "Failed to compute health");
            HealthStatus::Unavailable
        },
    }
}

/// Health of the account as it stands.
pub fn account_health(
    registry: Option<&Registry>,
    engine: &dyn RiskEngine,
    cfg: &LensConfig,
) -> HealthStatus {
    let Some(registry) = registry.filter(|registry| !registry.is_empty()) else {
        return HealthStatus::Unavailable;
    };

    if !registry.has_positions() {
        return HealthStatus::NoPositions;
    }

    let snapshot = build(Some(registry), &cfg.engine).ok();

    evaluate_health(engine, snapshot.as_ref(), &cfg.engine.health_factor_cap)
}

/// Health of the account if the action went through.
///
/// The snapshot is taken from the live registry, so it carries every priced
/// market, then its positions are swapped for the simulated ones.
pub fn projected_health(
    registry: &Registry,
    action: &ActionRequest,
    engine: &dyn RiskEngine,
    cfg: &LensConfig,
) -> HealthStatus {
    let positions = match simulate_positions(registry, action, &cfg.engine) {
        Ok(positions) => positions,
        Err(err) => {
            tracing::debug!(%err, "Action rejected, projected health unavailable");
            return HealthStatus::Unavailable;
        },
    };

    let Ok(mut snapshot) = build(Some(registry), &cfg.engine) else {
        return HealthStatus::Unavailable;
    };

    snapshot.positions = positions;

    if let Err(err) = snapshot.validate() {
        tracing::warn!(%err, "Projected snapshot invalid");
        return HealthStatus::Unavailable;
    }

    evaluate_health(engine, Some(&snapshot), &cfg.engine.health_factor_cap)
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            test_utils::{denom, positions, registry, FixedEngine},
            UnavailableEngine,
        },
        lens_math::Uint128,
        lens_types::action::ActionKind,
        test_case::test_case,
    };

    fn engine(health_factor: Option<&str>) -> FixedEngine {
        FixedEngine {
            health_factor: health_factor.map(|hf| hf.parse().unwrap()),
            ..Default::default()
        }
    }

    fn user_registry() -> Registry {
        registry().apply_positions(&positions(&[("untrn", 1_000_000)], &[("untrn", 100_000)]))
    }

    #[test_case(Some("1.75") => HealthStatus::Factor("1.75".parse().unwrap()); "reported")]
    #[test_case(Some("42") => HealthStatus::Factor(Dec::from(10u64)); "capped")]
    #[test_case(None => HealthStatus::Factor(Dec::from(10u64)); "no debt")]
    #[test_case(Some("0") => HealthStatus::Factor(Dec::zero()); "zero")]
    fn evaluating(health_factor: Option<&str>) -> HealthStatus {
        account_health(Some(&user_registry()), &engine(health_factor), &LensConfig::default())
    }

    #[test]
    fn no_positions() {
        let cfg = LensConfig::default();
        let status = account_health(Some(&registry()), &engine(Some("1")), &cfg);

        assert_eq!(status, HealthStatus::NoPositions);
    }

    #[test_case(None; "no registry")]
    #[test_case(Some(Registry::default()); "markets not loaded")]
    fn missing_markets_are_unavailable(registry: Option<Registry>) {
        let engine = engine(Some("1"));
        let status = account_health(registry.as_ref(), &engine, &LensConfig::default());

        assert_eq!(status, HealthStatus::Unavailable);
    }

    #[test]
    fn unavailable_is_not_zero() {
        let cfg = LensConfig::default();
        let failing = FixedEngine {
            fail: true,
            ..Default::default()
        };

        let unavailable = account_health(Some(&user_registry()), &failing, &cfg);
        let zero = account_health(Some(&user_registry()), &engine(Some("0")), &cfg);

        assert_eq!(unavailable, HealthStatus::Unavailable);
        assert_ne!(unavailable, zero);
        assert!(unavailable.factor().is_none());
    }

    #[test]
    fn engine_not_ready_is_unavailable() {
        let cfg = LensConfig::default();
        let status = account_health(Some(&user_registry()), &UnavailableEngine, &cfg);

        assert_eq!(status, HealthStatus::Unavailable);
    }

    #[test]
    fn projecting_an_action() {
        let cfg = LensConfig::default();
        let action = ActionRequest::new(denom("uweth"), ActionKind::Borrow, Uint128::new(1));
        let status = projected_health(&user_registry(), &action, &engine(Some("1.1")), &cfg);

        assert_eq!(status, HealthStatus::Factor("1.1".parse().unwrap()));
    }

    #[test]
    fn projecting_a_rejected_action() {
        let cfg = LensConfig::default();
        let amount = Uint128::new(2_000_000);
        let action = ActionRequest::new(denom("untrn"), ActionKind::Withdraw, amount);
        let status = projected_health(&user_registry(), &action, &engine(Some("3")), &cfg);

        assert_eq!(status, HealthStatus::Unavailable);
    }

    #[test]
    fn projecting_a_full_exit() {
        let registry = registry().apply_positions(&positions(&[("untrn", 100)], &[]));
        let cfg = LensConfig::default();
        let action = ActionRequest::new(denom("untrn"), ActionKind::Withdraw, Uint128::new(100));
        let status = projected_health(&registry, &action, &engine(Some("3")), &cfg);

        assert_eq!(status, HealthStatus::NoPositions);
    }

    #[test_case("3" => Some(RiskBand::Safe); "safe")]
    #[test_case("2.5" => Some(RiskBand::Safe); "safe boundary")]
    #[test_case("1.5" => Some(RiskBand::Moderate); "moderate")]
    #[test_case("1.2" => Some(RiskBand::AtRisk); "at risk boundary")]
    #[test_case("0.9" => Some(RiskBand::AtRisk); "liquidatable")]
    fn banding(factor: &str) -> Option<RiskBand> {
        HealthStatus::Factor(factor.parse().unwrap()).risk_band()
    }

    #[test]
    fn unavailable_has_no_band() {
        assert_eq!(HealthStatus::Unavailable.risk_band(), None);
        assert_eq!(HealthStatus::NoPositions.risk_band(), None);
    }

    #[test]
    fn status_serialization() {
        let factor = HealthStatus::Factor("1.5".parse().unwrap());

        assert_eq!(
            serde_json::to_value(factor).unwrap(),
            serde_json::json!({ "status": "factor", "health_factor": "1.5" })
        );
        assert_eq!(
            serde_json::to_value(HealthStatus::NoPositions).unwrap(),
            serde_json::json!({ "status": "no_positions" })
        );
    }
}
