use {
    lens_format::{format_max_amount, normalize_numeric_input},
    lens_math::Uint128,
    lens_risk::max_amount,
    lens_testing::{
        dec, mock_registry, user_positions, wallet, with_deposit_cap, EngineCall, MockEngine,
        NTRN, USDC, WETH,
    },
    lens_types::{
        action::ActionKind, config::LensConfig, feed::WalletBalances, health::BorrowTarget,
        market::MetricsUpdate,
    },
    proptest::prelude::*,
};

#[test]
fn supply_is_bound_by_remaining_deposit_cap() {
    let registry = with_deposit_cap(mock_registry(), &NTRN, 1_000_000_000000).merge_metrics(
        &NTRN,
        MetricsUpdate {
            collateral_total_amount: Some(Uint128::new(900_000_000000)),
            ..Default::default()
        },
    );

    let amount = max_amount(
        &registry,
        &NTRN,
        ActionKind::Supply,
        &wallet(&[(NTRN.clone(), 200_000_000000)]),
        &MockEngine::new(),
        &LensConfig::default(),
    );

    assert_eq!(amount, Uint128::new(100_000_000000));
}

#[test]
fn supply_does_not_consult_the_engine() {
    let engine = MockEngine::new().not_ready();

    let amount = max_amount(
        &mock_registry(),
        &USDC,
        ActionKind::Supply,
        &wallet(&[(USDC.clone(), 42)]),
        &engine,
        &LensConfig::default(),
    );

    assert_eq!(amount, Uint128::new(42));
    assert!(engine.calls().is_empty());
}

#[test]
fn repay_covers_a_minute_of_interest() {
    let positions = user_positions(&[], &[(NTRN.clone(), 1_000_000)]);
    let registry = mock_registry().apply_positions(&positions);

    let amount = max_amount(
        &registry,
        &NTRN,
        ActionKind::Repay,
        &wallet(&[(NTRN.clone(), 2_000_000)]),
        &MockEngine::new(),
        &LensConfig::default(),
    );

    assert_eq!(amount, Uint128::new(1_000_001));
}

#[test]
fn withdraw_is_bound_by_engine_and_deposit() {
    let positions = user_positions(&[(USDC.clone(), 5_000_000)], &[]);
    let registry = mock_registry().apply_positions(&positions);
    let cfg = LensConfig::default();

    let generous = MockEngine::new().with_withdraw_estimate(USDC.clone(), 9_000_000u128);
    let amount = max_amount(
        &registry,
        &USDC,
        ActionKind::Withdraw,
        &WalletBalances::new(),
        &generous,
        &cfg,
    );
    assert_eq!(amount, Uint128::new(5_000_000));

    let strict = MockEngine::new().with_withdraw_estimate(USDC.clone(), 1_234u128);
    let amount = max_amount(
        &registry,
        &USDC,
        ActionKind::Withdraw,
        &WalletBalances::new(),
        &strict,
        &cfg,
    );
    assert_eq!(amount, Uint128::new(1_234));

    assert_eq!(strict.calls(), [EngineCall::MaxWithdrawEstimate {
        denom: USDC.clone()
    }]);
}

#[test]
fn borrow_forwards_the_configured_target() {
    let positions = user_positions(&[(USDC.clone(), 5_000_000)], &[]);
    let registry = mock_registry().apply_positions(&positions);
    let engine = MockEngine::new().with_borrow_estimate(NTRN.clone(), 10u128.pow(15));

    let mut cfg = LensConfig::default();
    cfg.limits.borrow_target = BorrowTarget::Deposit;

    let amount = max_amount(
        &registry,
        &NTRN,
        ActionKind::Borrow,
        &WalletBalances::new(),
        &engine,
        &cfg,
    );

    // Bound by the market's liquidity: 10,000 NTRN supplied, 4,000 borrowed.
    assert_eq!(amount, Uint128::new(6_000_000000));
    assert_eq!(engine.calls(), [EngineCall::MaxBorrowEstimate {
        denom: NTRN.clone(),
        target: BorrowTarget::Deposit,
    }]);

    let snapshot = engine.last_snapshot().unwrap();
    assert_eq!(snapshot.positions.lends.len(), 1);
    assert_eq!(snapshot.oracle_prices["uweth"], dec("0.000000002"));
}

#[test]
fn engine_problems_give_zero() {
    let positions = user_positions(&[(USDC.clone(), 5_000_000)], &[]);
    let registry = mock_registry().apply_positions(&positions);
    let cfg = LensConfig::default();

    for engine in [
        MockEngine::new().not_ready(),
        MockEngine::new()
            .with_withdraw_estimate(USDC.clone(), 100u128)
            .failing("out of gas"),
    ] {
        let amount = max_amount(
            &registry,
            &USDC,
            ActionKind::Withdraw,
            &WalletBalances::new(),
            &engine,
            &cfg,
        );
        assert_eq!(amount, Uint128::ZERO);
    }
}

#[test]
fn unpriced_position_gives_zero() {
    let registry = mock_registry()
        .merge_price(&WETH, dec("-1"))
        .apply_positions(&user_positions(&[(USDC.clone(), 5_000_000), (WETH.clone(), 1)], &[]));
    let engine = MockEngine::new().with_withdraw_estimate(USDC.clone(), 100u128);

    let amount = max_amount(
        &registry,
        &USDC,
        ActionKind::Withdraw,
        &WalletBalances::new(),
        &engine,
        &LensConfig::default(),
    );

    assert_eq!(amount, Uint128::ZERO);
    assert!(engine.calls().is_empty());
}

#[test]
fn max_amount_fills_the_input_field() {
    let positions = user_positions(&[], &[(NTRN.clone(), 1_000_000)]);
    let registry = mock_registry().apply_positions(&positions);
    let max = max_amount(
        &registry,
        &NTRN,
        ActionKind::Repay,
        &wallet(&[(NTRN.clone(), 2_000_000)]),
        &MockEngine::new(),
        &LensConfig::default(),
    );

    let text = format_max_amount(max, 6);
    assert_eq!(text, "1.000001");

    let input = normalize_numeric_input(&text, max, 6);
    assert_eq!(input.amount_raw, Some(max));

    let too_much = normalize_numeric_input("5", max, 6);
    assert_eq!(too_much.amount_raw, Some(max));
}

proptest! {
    #[test]
    fn withdraw_never_exceeds_deposit(deposit in any::<u128>(), estimate in any::<u128>()) {
        let positions = user_positions(&[(WETH.clone(), deposit)], &[]);
        let registry = mock_registry().apply_positions(&positions);
        let engine = MockEngine::new().with_withdraw_estimate(WETH.clone(), estimate);

        let amount = max_amount(
            &registry,
            &WETH,
            ActionKind::Withdraw,
            &WalletBalances::new(),
            &engine,
            &LensConfig::default(),
        );

        prop_assert!(amount <= Uint128::new(deposit));
    }

    #[test]
    fn borrow_never_exceeds_liquidity(
        collateral in any::<u128>(),
        debt in any::<u128>(),
        estimate in any::<u128>(),
    ) {
        let registry = mock_registry().merge_metrics(&WETH, MetricsUpdate {
            collateral_total_amount: Some(Uint128::new(collateral)),
            debt_total_amount: Some(Uint128::new(debt)),
            ..Default::default()
        });
        let engine = MockEngine::new().with_borrow_estimate(WETH.clone(), estimate);

        let amount = max_amount(
            &registry,
            &WETH,
            ActionKind::Borrow,
            &WalletBalances::new(),
            &engine,
            &LensConfig::default(),
        );

        prop_assert!(amount.into_inner() <= collateral.saturating_sub(debt));
    }
}
