//! Integration tests for the login simulator.
//!
//! Every test runs on a paused Tokio clock: the simulated latency
//! auto-advances instantly, and `Instant::elapsed` reports exactly the
//! delay the simulator chose.

use std::time::Duration;

use loginkit_login::{FakeLogin, LoginApi, LoginConfig, LoginFailure, LoginOutcome};
use loginkit_token::decode;
use tokio::time::Instant;

// =========================================================================
// Helpers
// =========================================================================

fn always_fails() -> LoginConfig {
    LoginConfig {
        failure_rate: 1.0,
        ..LoginConfig::default()
    }
}

fn never_fails() -> LoginConfig {
    LoginConfig {
        failure_rate: 0.0,
        ..LoginConfig::default()
    }
}

// =========================================================================
// Deterministic input checks
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_short_password_always_fails_regardless_of_seed() {
    for seed in 0..20 {
        for config in [always_fails(), never_fails(), LoginConfig::default()] {
            let mut api = FakeLogin::seeded(config, seed);
            for password in ["", "1", "12", "123"] {
                let outcome = api.login("jane@example.com", password).await;
                assert_eq!(
                    outcome.error(),
                    Some(LoginFailure::PasswordTooShort),
                    "seed {seed}, password {password:?}"
                );
            }
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_missing_at_sign_always_fails_regardless_of_seed() {
    for seed in 0..20 {
        let mut api = FakeLogin::seeded(LoginConfig::default(), seed);
        for email in ["", "jane", "jane.example.com"] {
            let outcome = api.login(email, "secret123").await;
            assert_eq!(
                outcome.error(),
                Some(LoginFailure::InvalidEmail),
                "seed {seed}, email {email:?}"
            );
        }
    }
}

// =========================================================================
// Random branch
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_forced_success_returns_decodable_token() {
    let mut api = FakeLogin::seeded(never_fails(), 9);

    let outcome = api.login("Jane.Doe@Example.com", "secret123").await;

    let token = outcome.token().expect("failure_rate 0.0 must succeed");
    let claims = decode(token).expect("token should decode");
    assert_eq!(claims.name, "Jane Doe");
    assert_eq!(claims.email, "jane.doe@example.com");
    assert_eq!(claims.exp, claims.iat + 86_400);
}

#[tokio::test(start_paused = true)]
async fn test_forced_failure_returns_one_of_the_server_errors() {
    let mut api = FakeLogin::seeded(always_fails(), 3);

    for _ in 0..50 {
        let outcome = api.login("jane@example.com", "secret123").await;
        match outcome {
            LoginOutcome::Failure { error } => {
                assert!(LoginFailure::SIMULATED.contains(&error), "{error:?}");
            }
            LoginOutcome::Success { .. } => panic!("failure_rate 1.0 must fail"),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_default_failure_rate_is_roughly_thirty_percent() {
    let mut api = FakeLogin::seeded(LoginConfig::default(), 2024);
    let attempts = 1_000;
    let mut failures = 0;

    for _ in 0..attempts {
        if !api.login("jane@example.com", "secret123").await.is_success() {
            failures += 1;
        }
    }

    assert!(
        (200..=400).contains(&failures),
        "expected ~300 failures out of {attempts}, got {failures}"
    );
}

#[tokio::test(start_paused = true)]
async fn test_same_seed_gives_same_sequence_of_outcomes() {
    let mut a = FakeLogin::seeded(LoginConfig::default(), 77);
    let mut b = FakeLogin::seeded(LoginConfig::default(), 77);

    for _ in 0..30 {
        let oa = a.login("jane@example.com", "secret123").await;
        let ob = b.login("jane@example.com", "secret123").await;
        assert_eq!(oa.error(), ob.error());
        assert_eq!(
            oa.token().and_then(decode).map(|c| c.sub),
            ob.token().and_then(decode).map(|c| c.sub),
        );
    }
}

// =========================================================================
// Latency
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_login_waits_within_the_latency_range() {
    let mut api = FakeLogin::seeded(LoginConfig::default(), 5);

    for _ in 0..20 {
        let started = Instant::now();
        api.login("jane@example.com", "12").await;
        let waited = started.elapsed();

        assert!(waited >= Duration::from_millis(1_200), "waited {waited:?}");
        assert!(waited <= Duration::from_millis(2_200), "waited {waited:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_reliable_config_has_no_latency() {
    let mut api = FakeLogin::seeded(LoginConfig::reliable(), 5);

    let started = Instant::now();
    let outcome = api.login("jane@example.com", "secret").await;

    assert!(outcome.is_success());
    assert_eq!(started.elapsed(), Duration::ZERO);
}
