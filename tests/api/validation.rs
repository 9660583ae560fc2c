use crate::helpers::{
    MockAuthService, assert_failed, assert_passed, settings_for, spawn_service, spawn_stub,
};
use authflow::runner::ScenarioRunner;
use authflow::scenarios::Scenario;

#[tokio::test]
async fn invalid_registration_payloads_are_rejected_by_a_compliant_service() {
    let app = spawn_service(MockAuthService::compliant()).await;

    let report = app.run(Scenario::InvalidRegistrationPayload).await;

    assert_passed(&report);
    assert_eq!(app.service.user_count(), 0);
}

#[tokio::test]
async fn invalid_registration_fails_when_the_service_does_not_validate() {
    let app = spawn_service(MockAuthService::compliant().skipping_validation()).await;

    let report = app.run(Scenario::InvalidRegistrationPayload).await;

    let reason = assert_failed(&report);
    // The first payload carries the malformed email
    assert!(reason.contains("register with malformed email"), "{}", reason);
}

#[tokio::test]
async fn invalid_login_payloads_are_rejected_by_a_compliant_service() {
    let app = spawn_service(MockAuthService::compliant()).await;

    let report = app.run(Scenario::InvalidLoginPayload).await;

    assert_passed(&report);
}

#[tokio::test]
async fn invalid_login_fails_when_the_service_answers_401_instead_of_400() {
    let app = spawn_service(MockAuthService::compliant().skipping_validation()).await;

    let report = app.run(Scenario::InvalidLoginPayload).await;

    let reason = assert_failed(&report);
    assert!(reason.contains("expected status in [400], got 401"), "{}", reason);
}

#[tokio::test]
async fn a_400_without_an_auth_envelope_is_rejected() {
    // Every request answers 400 with `{}`
    let server = spawn_stub(400).await;
    let runner = ScenarioRunner::new(settings_for(server.uri()));

    let report = runner.run_scenario(Scenario::InvalidLoginPayload).await;

    let reason = assert_failed(&report);
    assert!(reason.contains("unexpected response body"), "{}", reason);
    assert!(reason.contains("missing field `success`"), "{}", reason);
}
