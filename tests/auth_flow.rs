//! Lockout window, session lifetime, and attempt bookkeeping.

mod common;

use chrono::{Duration, Utc};
use darkroom::auth::{SessionAuthenticator, UnlockOutcome};
use darkroom::clock::Clock;
use darkroom::config::AuthConfig;
use darkroom::entity::{login_attempt, session};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

const PASSPHRASE: &str = "open sesame";
const ADDRESS: &str = "203.0.113.7";

async fn authenticator() -> (SessionAuthenticator, Clock, DatabaseConnection) {
    let db = common::memory_db().await;
    let clock = Clock::fixed(Utc::now());
    let auth = SessionAuthenticator::new(db.clone(), AuthConfig::new(PASSPHRASE), clock.clone());
    (auth, clock, db)
}

async fn fail_once(auth: &SessionAuthenticator) -> UnlockOutcome {
    auth.submit_passphrase("wrong", ADDRESS)
        .await
        .expect("submission should not error")
}

#[tokio::test]
async fn correct_passphrase_issues_a_live_session() {
    let (auth, _, _) = authenticator().await;

    let outcome = auth.submit_passphrase(PASSPHRASE, ADDRESS).await.unwrap();
    let UnlockOutcome::Granted(issued) = outcome else {
        panic!("expected a grant, got {outcome:?}");
    };

    assert!(auth.validate_session(Some(&issued.token)).await.unwrap());
}

#[tokio::test]
async fn remaining_attempts_count_down_to_lockout() {
    let (auth, _, _) = authenticator().await;

    for expected in [4u32, 3, 2, 1, 0] {
        let outcome = fail_once(&auth).await;
        let UnlockOutcome::Denied { remaining_attempts } = outcome else {
            panic!("expected a denial, got {outcome:?}");
        };
        assert_eq!(remaining_attempts, expected);
    }

    // Sixth try is rejected before the passphrase is even checked.
    let outcome = auth.submit_passphrase(PASSPHRASE, ADDRESS).await.unwrap();
    assert!(matches!(outcome, UnlockOutcome::LockedOut));
}

#[tokio::test]
async fn lockout_lifts_once_the_window_has_passed() {
    let (auth, clock, _) = authenticator().await;

    for _ in 0..5 {
        fail_once(&auth).await;
    }
    assert!(matches!(
        auth.submit_passphrase(PASSPHRASE, ADDRESS).await.unwrap(),
        UnlockOutcome::LockedOut
    ));

    clock.advance(Duration::minutes(16));

    assert!(matches!(
        auth.submit_passphrase(PASSPHRASE, ADDRESS).await.unwrap(),
        UnlockOutcome::Granted(_)
    ));
}

#[tokio::test]
async fn lockout_is_scoped_to_the_client_address() {
    let (auth, _, _) = authenticator().await;

    for _ in 0..5 {
        fail_once(&auth).await;
    }

    let outcome = auth
        .submit_passphrase(PASSPHRASE, "198.51.100.2")
        .await
        .unwrap();
    assert!(matches!(outcome, UnlockOutcome::Granted(_)));
}

#[tokio::test]
async fn rejected_attempts_while_locked_are_still_recorded() {
    let (auth, _, db) = authenticator().await;

    for _ in 0..5 {
        fail_once(&auth).await;
    }
    auth.submit_passphrase(PASSPHRASE, ADDRESS).await.unwrap();

    let logged = login_attempt::Entity::find()
        .filter(login_attempt::Column::ClientAddress.eq(ADDRESS))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(logged.len(), 6);
    assert!(logged.iter().all(|a| !a.success));
}

#[tokio::test]
async fn expired_session_is_rejected_and_its_row_removed() {
    let (auth, clock, db) = authenticator().await;

    let UnlockOutcome::Granted(issued) =
        auth.submit_passphrase(PASSPHRASE, ADDRESS).await.unwrap()
    else {
        panic!("expected a grant");
    };

    clock.advance(Duration::hours(25));

    assert!(!auth.validate_session(Some(&issued.token)).await.unwrap());
    let row = session::Entity::find_by_id(&issued.token)
        .one(&db)
        .await
        .unwrap();
    assert!(row.is_none(), "expired row should be deleted lazily");
}

#[tokio::test]
async fn missing_empty_and_unknown_tokens_are_invalid() {
    let (auth, _, _) = authenticator().await;

    assert!(!auth.validate_session(None).await.unwrap());
    assert!(!auth.validate_session(Some("")).await.unwrap());
    assert!(!auth.validate_session(Some("no-such-token")).await.unwrap());
}

#[tokio::test]
async fn clear_session_is_idempotent() {
    let (auth, _, _) = authenticator().await;

    let UnlockOutcome::Granted(issued) =
        auth.submit_passphrase(PASSPHRASE, ADDRESS).await.unwrap()
    else {
        panic!("expected a grant");
    };

    auth.clear_session(&issued.token).await.unwrap();
    assert!(!auth.validate_session(Some(&issued.token)).await.unwrap());

    // Clearing again is not an error.
    auth.clear_session(&issued.token).await.unwrap();
}

#[tokio::test]
async fn successful_unlock_prunes_stale_attempt_rows() {
    let (auth, clock, db) = authenticator().await;

    let stale = (clock.now() - Duration::days(31)).fixed_offset();
    login_attempt::ActiveModel {
        client_address: Set(ADDRESS.to_string()),
        success: Set(false),
        attempted_at: Set(stale),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    auth.submit_passphrase(PASSPHRASE, ADDRESS).await.unwrap();

    let remaining = login_attempt::Entity::find()
        .filter(login_attempt::Column::ClientAddress.eq(ADDRESS))
        .filter(login_attempt::Column::AttemptedAt.lt((clock.now() - Duration::days(30)).fixed_offset()))
        .all(&db)
        .await
        .unwrap();
    assert!(remaining.is_empty(), "stale rows should be pruned");
}
