use cosmwasm_std::{coin, coins, testing::mock_env};

use crate::{
    context::GrantContext,
    gas::InfiniteGasMeter,
    limit::{GrantLimit, LimitAcceptResult},
    tests::{execute, registry},
    GrantError,
};

#[test]
fn max_calls_counts_down_to_deletion() {
    let mut gas = InfiniteGasMeter::new();
    let contracts = registry();
    let mut ctx = GrantContext::new(mock_env().block, &mut gas, &contracts);

    let mut limit = GrantLimit::max_calls(3);
    let msg = execute(r#"{"foo":{}}"#, vec![]);

    for expected_remaining in [2, 1] {
        let result = limit.accept(&mut ctx, &msg).unwrap();
        assert_eq!(
            result,
            LimitAcceptResult::updated(GrantLimit::max_calls(expected_remaining))
        );
        limit = result.update_limit.unwrap();
    }

    assert_eq!(
        limit.accept(&mut ctx, &msg).unwrap(),
        LimitAcceptResult::exhausted()
    );
}

#[test]
fn max_calls_rejects_any_funds() {
    let mut gas = InfiniteGasMeter::new();
    let contracts = registry();
    let mut ctx = GrantContext::new(mock_env().block, &mut gas, &contracts);

    let limit = GrantLimit::max_calls(5);
    assert_eq!(
        limit
            .accept(&mut ctx, &execute(r#"{"foo":{}}"#, coins(1, "ujuno")))
            .unwrap(),
        LimitAcceptResult::rejected()
    );

    // a stored limit that somehow reached zero never accepts
    assert_eq!(
        GrantLimit::max_calls(0)
            .accept(&mut ctx, &execute(r#"{"foo":{}}"#, vec![]))
            .unwrap(),
        LimitAcceptResult::rejected()
    );
}

#[test]
fn max_funds_spends_down_and_leaves_unknown_denoms_untouched() {
    let mut gas = InfiniteGasMeter::new();
    let contracts = registry();
    let mut ctx = GrantContext::new(mock_env().block, &mut gas, &contracts);

    let limit = GrantLimit::max_funds(coins(100, "ujuno"));

    assert_eq!(
        limit
            .accept(&mut ctx, &execute("{}", coins(30, "ujuno")))
            .unwrap(),
        LimitAcceptResult::updated(GrantLimit::max_funds(coins(70, "ujuno")))
    );

    // unknown denom rejects and the limit itself is left as it was
    assert_eq!(
        limit
            .accept(&mut ctx, &execute("{}", coins(1, "uosmo")))
            .unwrap(),
        LimitAcceptResult::rejected()
    );
    assert_eq!(limit, GrantLimit::max_funds(coins(100, "ujuno")));

    assert_eq!(
        limit
            .accept(&mut ctx, &execute("{}", coins(101, "ujuno")))
            .unwrap(),
        LimitAcceptResult::rejected()
    );
}

#[test]
fn max_funds_drops_spent_denoms_and_deletes_when_empty() {
    let mut gas = InfiniteGasMeter::new();
    let contracts = registry();
    let mut ctx = GrantContext::new(mock_env().block, &mut gas, &contracts);

    let limit = GrantLimit::max_funds(vec![coin(10, "ujuno"), coin(20, "uosmo")]);

    assert_eq!(
        limit
            .accept(&mut ctx, &execute("{}", coins(10, "ujuno")))
            .unwrap(),
        LimitAcceptResult::updated(GrantLimit::max_funds(coins(20, "uosmo")))
    );

    // one denom over budget rejects the whole message
    assert_eq!(
        limit
            .accept(
                &mut ctx,
                &execute("{}", vec![coin(10, "ujuno"), coin(21, "uosmo")])
            )
            .unwrap(),
        LimitAcceptResult::rejected()
    );

    assert_eq!(
        limit
            .accept(
                &mut ctx,
                &execute("{}", vec![coin(10, "ujuno"), coin(20, "uosmo")])
            )
            .unwrap(),
        LimitAcceptResult::exhausted()
    );
}

#[test]
fn combined_limit_consumes_both_dimensions() {
    let mut gas = InfiniteGasMeter::new();
    let contracts = registry();
    let mut ctx = GrantContext::new(mock_env().block, &mut gas, &contracts);

    let limit = GrantLimit::combined(2, coins(100, "ujuno"));

    assert_eq!(
        limit
            .accept(&mut ctx, &execute("{}", coins(40, "ujuno")))
            .unwrap(),
        LimitAcceptResult::updated(GrantLimit::combined(1, coins(60, "ujuno")))
    );
    assert_eq!(
        limit
            .accept(&mut ctx, &execute("{}", coins(101, "ujuno")))
            .unwrap(),
        LimitAcceptResult::rejected()
    );

    // the last call ends the grant even though funds remain
    assert_eq!(
        GrantLimit::combined(1, coins(100, "ujuno"))
            .accept(&mut ctx, &execute("{}", coins(1, "ujuno")))
            .unwrap(),
        LimitAcceptResult::exhausted()
    );
    // spending all of the funds ends the grant even though calls remain
    assert_eq!(
        GrantLimit::combined(10, coins(100, "ujuno"))
            .accept(&mut ctx, &execute("{}", coins(100, "ujuno")))
            .unwrap(),
        LimitAcceptResult::exhausted()
    );
}

#[test]
fn undefined_limit_always_errors() {
    let mut gas = InfiniteGasMeter::new();
    let contracts = registry();
    let mut ctx = GrantContext::new(mock_env().block, &mut gas, &contracts);

    assert!(matches!(
        GrantLimit::Undefined {}.validate_basic(),
        Err(GrantError::UndefinedVariant(_))
    ));
    assert!(matches!(
        GrantLimit::Undefined {}.accept(&mut ctx, &execute("{}", vec![])),
        Err(GrantError::UndefinedVariant(_))
    ));
}

#[test]
fn limit_validation() {
    assert!(GrantLimit::max_calls(1).validate_basic().is_ok());
    assert!(GrantLimit::max_funds(vec![coin(1, "ujuno"), coin(1, "uosmo")])
        .validate_basic()
        .is_ok());
    assert!(GrantLimit::combined(1, coins(1, "ujuno"))
        .validate_basic()
        .is_ok());

    assert!(matches!(
        GrantLimit::max_calls(0).validate_basic(),
        Err(GrantError::InvalidLimit(_))
    ));
    assert!(matches!(
        GrantLimit::max_funds(vec![]).validate_basic(),
        Err(GrantError::InvalidLimit(_))
    ));
    assert!(matches!(
        GrantLimit::max_funds(vec![coin(1, "uosmo"), coin(1, "ujuno")]).validate_basic(),
        Err(GrantError::InvalidCoins(_))
    ));
    assert!(matches!(
        GrantLimit::max_funds(vec![coin(1, "ujuno"), coin(2, "ujuno")]).validate_basic(),
        Err(GrantError::InvalidCoins(_))
    ));
    assert!(matches!(
        GrantLimit::max_funds(coins(0, "ujuno")).validate_basic(),
        Err(GrantError::InvalidCoins(_))
    ));
    assert!(matches!(
        GrantLimit::combined(0, coins(1, "ujuno")).validate_basic(),
        Err(GrantError::InvalidLimit(_))
    ));
    assert!(matches!(
        GrantLimit::combined(1, vec![]).validate_basic(),
        Err(GrantError::InvalidLimit(_))
    ));
}
