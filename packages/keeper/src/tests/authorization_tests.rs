use authzpp_grants::{
    authorization::CodeIdExecutionAuthorization, gas::InfiniteGasMeter, limit::GrantLimit,
    GrantError,
};
use authzpp_utils::msg_gen::{exec_msg, MSG_EXECUTE_CONTRACT_TYPE_URL};
use cosmwasm_std::testing::MockStorage;

use crate::{
    execute::{dispatch_exec, grant_authorization, revoke_authorization, Evaluation},
    queries::query_authorization,
    tests::{
        block_at, claim_authorization, exec_as, exec_batch, grantee, granter, setup_contracts,
        CONTRACT, GRANTEE, GRANTER,
    },
    KeeperError,
};

#[test]
fn exec_consumes_the_authorization() {
    let mut storage = MockStorage::new();
    setup_contracts(&mut storage);
    let mut gas = InfiniteGasMeter::new();
    let mut eval = Evaluation::new(block_at(1_000), &mut gas);

    grant_authorization(&mut storage, &granter(), &grantee(), &claim_authorization(2)).unwrap();

    let events = dispatch_exec(
        &mut storage,
        &mut eval,
        &grantee(),
        &exec_as(GRANTEE, GRANTER, CONTRACT, r#"{"claim":{}}"#),
    )
    .unwrap();
    assert_eq!(events.len(), 1);

    // one call left
    let CodeIdExecutionAuthorization { grants } =
        query_authorization(&storage, &granter(), &grantee(), MSG_EXECUTE_CONTRACT_TYPE_URL)
            .unwrap();
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].limit, GrantLimit::max_calls(1));

    // the last call removes the authorization
    dispatch_exec(
        &mut storage,
        &mut eval,
        &grantee(),
        &exec_as(GRANTEE, GRANTER, CONTRACT, r#"{"claim":{}}"#),
    )
    .unwrap();
    assert!(matches!(
        query_authorization(&storage, &granter(), &grantee(), MSG_EXECUTE_CONTRACT_TYPE_URL),
        Err(KeeperError::AuthorizationNotFound { .. })
    ));

    assert!(matches!(
        dispatch_exec(
            &mut storage,
            &mut eval,
            &grantee(),
            &exec_as(GRANTEE, GRANTER, CONTRACT, r#"{"claim":{}}"#),
        ),
        Err(KeeperError::Unauthorized {})
    ));
}

#[test]
fn rejected_exec_leaves_the_authorization_untouched() {
    let mut storage = MockStorage::new();
    setup_contracts(&mut storage);
    let mut gas = InfiniteGasMeter::new();
    let mut eval = Evaluation::new(block_at(1_000), &mut gas);

    grant_authorization(&mut storage, &granter(), &grantee(), &claim_authorization(2)).unwrap();
    let before =
        query_authorization(&storage, &granter(), &grantee(), MSG_EXECUTE_CONTRACT_TYPE_URL)
            .unwrap();

    assert!(matches!(
        dispatch_exec(
            &mut storage,
            &mut eval,
            &grantee(),
            &exec_as(GRANTEE, GRANTER, CONTRACT, r#"{"withdraw":{}}"#),
        ),
        Err(KeeperError::Unauthorized {})
    ));
    assert!(matches!(
        dispatch_exec(
            &mut storage,
            &mut eval,
            &grantee(),
            &exec_as(GRANTEE, GRANTER, "unknown", r#"{"claim":{}}"#),
        ),
        Err(KeeperError::Grant(GrantError::ContractNotFound(_)))
    ));

    assert_eq!(
        query_authorization(&storage, &granter(), &grantee(), MSG_EXECUTE_CONTRACT_TYPE_URL)
            .unwrap(),
        before
    );
}

#[test]
fn exec_batch_is_all_or_nothing() {
    let mut storage = MockStorage::new();
    setup_contracts(&mut storage);
    let mut gas = InfiniteGasMeter::new();
    let mut eval = Evaluation::new(block_at(1_000), &mut gas);

    grant_authorization(&mut storage, &granter(), &grantee(), &claim_authorization(2)).unwrap();
    let before =
        query_authorization(&storage, &granter(), &grantee(), MSG_EXECUTE_CONTRACT_TYPE_URL)
            .unwrap();

    // the first message would consume a call, the second is refused
    assert!(matches!(
        dispatch_exec(
            &mut storage,
            &mut eval,
            &grantee(),
            &exec_batch(GRANTEE, GRANTER, CONTRACT, &[r#"{"claim":{}}"#, r#"{"withdraw":{}}"#]),
        ),
        Err(KeeperError::Unauthorized {})
    ));
    // the third message finds the authorization used up by the first two
    assert!(matches!(
        dispatch_exec(
            &mut storage,
            &mut eval,
            &grantee(),
            &exec_batch(GRANTEE, GRANTER, CONTRACT, &[r#"{"claim":{}}"#; 3]),
        ),
        Err(KeeperError::Unauthorized {})
    ));
    assert_eq!(
        query_authorization(&storage, &granter(), &grantee(), MSG_EXECUTE_CONTRACT_TYPE_URL)
            .unwrap(),
        before
    );

    let events = dispatch_exec(
        &mut storage,
        &mut eval,
        &grantee(),
        &exec_batch(GRANTEE, GRANTER, CONTRACT, &[r#"{"claim":{}}"#; 2]),
    )
    .unwrap();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        query_authorization(&storage, &granter(), &grantee(), MSG_EXECUTE_CONTRACT_TYPE_URL),
        Err(KeeperError::AuthorizationNotFound { .. })
    ));
}

#[test]
fn exec_batch_sees_its_own_updates() {
    let mut storage = MockStorage::new();
    setup_contracts(&mut storage);
    let mut gas = InfiniteGasMeter::new();
    let mut eval = Evaluation::new(block_at(1_000), &mut gas);

    grant_authorization(&mut storage, &granter(), &grantee(), &claim_authorization(3)).unwrap();
    dispatch_exec(
        &mut storage,
        &mut eval,
        &grantee(),
        &exec_batch(GRANTEE, GRANTER, CONTRACT, &[r#"{"claim":{}}"#; 2]),
    )
    .unwrap();

    let CodeIdExecutionAuthorization { grants } =
        query_authorization(&storage, &granter(), &grantee(), MSG_EXECUTE_CONTRACT_TYPE_URL)
            .unwrap();
    assert_eq!(grants[0].limit, GrantLimit::max_calls(1));
}

#[test]
fn exec_envelope_is_checked() {
    let mut storage = MockStorage::new();
    setup_contracts(&mut storage);
    let mut gas = InfiniteGasMeter::new();
    let mut eval = Evaluation::new(block_at(1_000), &mut gas);

    grant_authorization(&mut storage, &granter(), &grantee(), &claim_authorization(2)).unwrap();

    // sent by someone other than the grantee named in the envelope
    assert!(matches!(
        dispatch_exec(
            &mut storage,
            &mut eval,
            &granter(),
            &exec_as(GRANTEE, GRANTER, CONTRACT, r#"{"claim":{}}"#),
        ),
        Err(KeeperError::Grant(GrantError::GranteeMismatch { .. }))
    ));
    assert!(matches!(
        dispatch_exec(&mut storage, &mut eval, &grantee(), &exec_msg(GRANTEE, vec![])),
        Err(KeeperError::EmptyExec {})
    ));

    // executing for yourself needs no authorization
    let events = dispatch_exec(
        &mut storage,
        &mut eval,
        &grantee(),
        &exec_as(GRANTEE, GRANTEE, CONTRACT, r#"{"withdraw":{}}"#),
    )
    .unwrap();
    assert_eq!(events.len(), 1);
}

#[test]
fn grant_and_revoke() {
    let mut storage = MockStorage::new();

    assert!(matches!(
        grant_authorization(&mut storage, &granter(), &granter(), &claim_authorization(1)),
        Err(KeeperError::SelfGrant(_))
    ));
    assert!(matches!(
        grant_authorization(
            &mut storage,
            &granter(),
            &grantee(),
            &CodeIdExecutionAuthorization::new(vec![]).to_any().unwrap()
        ),
        Err(KeeperError::Grant(GrantError::EmptyGrants))
    ));

    grant_authorization(&mut storage, &granter(), &grantee(), &claim_authorization(1)).unwrap();
    revoke_authorization(
        &mut storage,
        &granter(),
        &grantee(),
        MSG_EXECUTE_CONTRACT_TYPE_URL,
    )
    .unwrap();
    assert!(matches!(
        revoke_authorization(
            &mut storage,
            &granter(),
            &grantee(),
            MSG_EXECUTE_CONTRACT_TYPE_URL
        ),
        Err(KeeperError::AuthorizationNotFound { .. })
    ));
}
