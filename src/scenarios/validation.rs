use crate::auth_client::AuthClient;
use crate::domain::{LoginRequest, RegistrationRequest};
use crate::scenarios::assertions::expect_failure;
use crate::scenarios::{PASSWORD, ScenarioError};

fn invalid_registrations() -> Vec<(&'static str, RegistrationRequest)> {
    vec![
        (
            "malformed email",
            RegistrationRequest::new("invalid-email", "testuser", PASSWORD),
        ),
        (
            "short username",
            RegistrationRequest::new("test@example.com", "ab", PASSWORD),
        ),
        (
            "weak password",
            RegistrationRequest::new("test@example.com", "testuser", "weak"),
        ),
        (
            "mismatched confirmation",
            RegistrationRequest::new("test@example.com", "testuser", PASSWORD)
                .with_confirm_password("DifferentPass123!"),
        ),
    ]
}

fn invalid_logins() -> Vec<(&'static str, LoginRequest)> {
    vec![
        (
            "malformed email",
            LoginRequest::new("invalid-email", PASSWORD),
        ),
        ("empty password", LoginRequest::new("test@example.com", "")),
        ("empty email", LoginRequest::new("", PASSWORD)),
    ]
}

pub(crate) async fn invalid_registration_payload(client: &AuthClient) -> Result<(), ScenarioError> {
    for (label, payload) in invalid_registrations() {
        let response = client.register(&payload).await?;
        expect_failure(&format!("register with {}", label), &response, 400)?;
    }
    Ok(())
}

pub(crate) async fn invalid_login_payload(client: &AuthClient) -> Result<(), ScenarioError> {
    for (label, payload) in invalid_logins() {
        let response = client.login(&payload).await?;
        expect_failure(&format!("login with {}", label), &response, 400)?;
    }
    Ok(())
}
