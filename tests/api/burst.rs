use crate::helpers::{MockAuthService, assert_failed, assert_passed, spawn_service};
use authflow::runner::ScenarioRunner;
use authflow::scenarios::Scenario;
use std::time::Duration;

#[tokio::test]
async fn concurrent_registrations_all_succeed() {
    let app = spawn_service(MockAuthService::compliant()).await;

    let report = app.run(Scenario::ConcurrentRegistration).await;

    assert_passed(&report);
    assert_eq!(app.service.user_count(), 5);
    for i in 0..5 {
        assert!(app.service.has_user(&format!("concurrent{}@example.com", i)));
    }
}

#[tokio::test]
async fn concurrent_registrations_succeed_with_parallel_dispatch() {
    let app = spawn_service(MockAuthService::compliant()).await;

    let report = app
        .parallel_runner()
        .run_scenario(Scenario::ConcurrentRegistration)
        .await;

    assert_passed(&report);
    assert_eq!(app.service.user_count(), 5);
}

#[tokio::test]
async fn concurrent_logins_all_succeed() {
    let app = spawn_service(MockAuthService::compliant()).await;

    let report = app.run(Scenario::ConcurrentLogin).await;

    assert_passed(&report);
}

#[tokio::test]
async fn concurrent_logins_succeed_with_parallel_dispatch() {
    let app = spawn_service(MockAuthService::compliant()).await;

    let report = app
        .parallel_runner()
        .run_scenario(Scenario::ConcurrentLogin)
        .await;

    assert_passed(&report);
}

#[tokio::test]
async fn concurrent_logins_fail_when_credentials_are_rejected() {
    let app = spawn_service(MockAuthService::compliant()).await;
    // The fixture user exists already, so the scenario's own registration is refused
    app.run(Scenario::ConcurrentLogin).await;

    let report = app.run(Scenario::ConcurrentLogin).await;

    let reason = assert_failed(&report);
    assert!(reason.contains("register"), "{}", reason);
}

#[tokio::test]
async fn burst_sizes_follow_the_configuration() {
    let app = spawn_service(MockAuthService::compliant()).await;
    let mut settings = app.settings();
    settings.scenarios.registration_burst = 2;

    let report = ScenarioRunner::new(settings)
        .run_scenario(Scenario::ConcurrentRegistration)
        .await;

    assert_passed(&report);
    assert_eq!(app.service.user_count(), 2);
}

#[tokio::test]
async fn high_volume_registers_every_user_within_budget() {
    let app = spawn_service(MockAuthService::compliant()).await;

    let report = app.run(Scenario::HighVolume).await;

    assert_passed(&report);
    assert_eq!(app.service.user_count(), 50);
}

#[tokio::test]
async fn high_volume_tolerates_partial_rejection() {
    let app = spawn_service(MockAuthService::compliant()).await;
    // Half the load-test users exist before the burst starts
    let mut settings = app.settings();
    settings.scenarios.high_volume_requests = 25;
    ScenarioRunner::new(settings)
        .run_scenario(Scenario::HighVolume)
        .await;

    let report = app.run(Scenario::HighVolume).await;

    assert_passed(&report);
    assert_eq!(app.service.user_count(), 50);
}

#[tokio::test]
async fn high_volume_fails_when_nothing_is_created() {
    let app = spawn_service(MockAuthService::compliant()).await;
    app.run(Scenario::HighVolume).await;

    let report = app.run(Scenario::HighVolume).await;

    let reason = assert_failed(&report);
    assert!(reason.contains("none of 50 registrations returned 201"), "{}", reason);
}

#[tokio::test]
async fn high_volume_fails_when_the_budget_is_exceeded() {
    let app = spawn_service(MockAuthService::compliant()).await;
    let mut settings = app.settings();
    settings.scenarios.high_volume_requests = 3;
    settings.scenarios.high_volume_budget_seconds = 0;

    let report = ScenarioRunner::new(settings)
        .run_scenario(Scenario::HighVolume)
        .await;

    let reason = assert_failed(&report);
    assert!(reason.contains("budget is 0ns"), "{}", reason);
}

#[tokio::test]
async fn response_times_of_a_steady_service_are_consistent() {
    // A large fixed latency keeps scheduler jitter small in comparison
    let app =
        spawn_service(MockAuthService::compliant().with_latency(Duration::from_millis(100))).await;

    let report = app.run(Scenario::ResponseTimeConsistency).await;

    assert_passed(&report);
    assert_eq!(app.service.user_count(), 10);
}
