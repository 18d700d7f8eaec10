use {
    lens_math::Uint128,
    lens_registry::Registry,
    lens_risk::{account_health, projected_health, HealthStatus, RiskBand},
    lens_testing::{dec, mock_registry, user_positions, EngineCall, MockEngine, NTRN, USDC, WETH},
    lens_types::{
        action::{ActionKind, ActionRequest},
        config::LensConfig,
        health::HealthResult,
        snapshot::DebtAmount,
    },
    test_case::test_case,
};

fn borrower() -> Registry {
    let positions = user_positions(&[(USDC.clone(), 10_000_000)], &[(NTRN.clone(), 4_000_000)]);
    mock_registry().apply_positions(&positions)
}

#[test_case("1.75" => Some(RiskBand::Moderate); "moderate")]
#[test_case("4" => Some(RiskBand::Safe); "safe")]
#[test_case("1.01" => Some(RiskBand::AtRisk); "at risk")]
#[test_case("25" => Some(RiskBand::Safe); "above cap")]
fn banding_reported_health(health_factor: &str) -> Option<RiskBand> {
    let engine = MockEngine::new().with_health_factor(dec(health_factor));

    account_health(Some(&borrower()), &engine, &LensConfig::default()).risk_band()
}

#[test]
fn health_factor_is_capped() {
    let engine = MockEngine::new().with_health_factor(dec("25"));
    let status = account_health(Some(&borrower()), &engine, &LensConfig::default());

    assert_eq!(status, HealthStatus::Factor(dec("10")));
}

#[test]
fn lender_without_debt_is_at_the_cap() {
    let positions = user_positions(&[(USDC.clone(), 10_000_000)], &[]);
    let registry = mock_registry().apply_positions(&positions);
    let engine = MockEngine::new().with_health(HealthResult {
        total_collateral_value: Uint128::new(10_000_000),
        ..Default::default()
    });

    let status = account_health(Some(&registry), &engine, &LensConfig::default());
    assert_eq!(status, HealthStatus::Factor(dec("10")));
}

#[test]
fn no_positions_skips_the_engine() {
    let engine = MockEngine::new().with_health_factor(dec("2"));
    let status = account_health(Some(&mock_registry()), &engine, &LensConfig::default());

    assert_eq!(status, HealthStatus::NoPositions);
    assert!(engine.calls().is_empty());
}

#[test_case(MockEngine::new().not_ready(); "engine not ready")]
#[test_case(MockEngine::new().failing("wasm trap"); "engine error")]
fn engine_problems_are_unavailable(engine: MockEngine) {
    let status = account_health(Some(&borrower()), &engine, &LensConfig::default());

    assert_eq!(status, HealthStatus::Unavailable);
    assert_eq!(status.risk_band(), None);
}

#[test]
fn disconnecting_the_wallet_clears_health() {
    let engine = MockEngine::new().with_health_factor(dec("2"));
    let cfg = LensConfig::default();

    let connected = borrower();
    assert_eq!(
        account_health(Some(&connected), &engine, &cfg),
        HealthStatus::Factor(dec("2"))
    );

    let disconnected = connected.reset();
    assert_eq!(
        account_health(Some(&disconnected), &engine, &cfg),
        HealthStatus::NoPositions
    );
}

#[test]
fn projected_health_sees_the_simulated_positions() {
    let engine = MockEngine::new().with_health_factor(dec("1.3"));
    let action = ActionRequest::new(WETH.clone(), ActionKind::Borrow, Uint128::new(5));

    let status = projected_health(&borrower(), &action, &engine, &LensConfig::default());
    assert_eq!(status, HealthStatus::Factor(dec("1.3")));
    assert_eq!(engine.calls(), [EngineCall::ComputeHealth]);

    let snapshot = engine.last_snapshot().unwrap();
    assert_eq!(snapshot.positions.debts, [
        DebtAmount::new(NTRN.clone(), Uint128::new(4_000_000)),
        DebtAmount::new(WETH.clone(), Uint128::new(5)),
    ]);
    assert_eq!(snapshot.asset_params.len(), 3);
}

#[test]
fn projected_health_of_a_rejected_action_is_unavailable() {
    let engine = MockEngine::new().with_health_factor(dec("3"));
    let action = ActionRequest::new(USDC.clone(), ActionKind::Withdraw, Uint128::new(10_000_001));

    let status = projected_health(&borrower(), &action, &engine, &LensConfig::default());

    assert_eq!(status, HealthStatus::Unavailable);
    assert!(engine.calls().is_empty());
}

#[test]
fn projected_health_leaves_the_registry_alone() {
    let engine = MockEngine::new().with_health_factor(dec("3"));
    let registry = borrower();
    let action = ActionRequest::new(NTRN.clone(), ActionKind::Repay, Uint128::new(4_000_000));

    projected_health(&registry, &action, &engine, &LensConfig::default());

    assert_eq!(registry, borrower());
    assert_eq!(registry.market(&NTRN).unwrap().debt, Uint128::new(4_000_000));
}
