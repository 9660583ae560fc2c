//! Adversarial inputs where the service may be lenient or strict.
//! Only the set of tolerated statuses is checked.

use crate::auth_client::AuthClient;
use crate::scenarios::assertions::expect_status;
use crate::scenarios::{ScenarioContext, ScenarioError};

const TRUNCATED_REGISTRATION: &str = r#"{"email": "test@example.com", "username": "testuser", "password": "SecurePass123!", "confirmPassword": "#;

const SPECIAL_CHARACTERS: &str = "🚀 Special Characters: !@#$%^&*()_+{}|:\"<>?[]\\;'\",./";

pub(crate) async fn malformed_json(client: &AuthClient) -> Result<(), ScenarioError> {
    let response = client
        .register_raw(TRUNCATED_REGISTRATION, Some("application/json"))
        .await?;
    expect_status("truncated JSON", &response, &[200, 201, 400, 500])
}

pub(crate) async fn missing_content_type(
    client: &AuthClient,
    ctx: &ScenarioContext,
) -> Result<(), ScenarioError> {
    let step = "no Content-Type";
    let registration = ctx.registration("notype", "notypeuser");
    let body = serde_json::to_vec(&registration).map_err(|source| ScenarioError::Encoding {
        step: step.to_string(),
        source,
    })?;
    let response = client.register_raw(body, None).await?;
    expect_status(step, &response, &[200, 201, 400, 415, 500])
}

pub(crate) async fn oversized_payload(
    client: &AuthClient,
    ctx: &ScenarioContext,
) -> Result<(), ScenarioError> {
    let registration = ctx
        .registration("large", "largeuser")
        .with_extra("extraData", "x".repeat(ctx.settings.oversized_field_length));
    let response = client.register(&registration).await?;
    expect_status("oversized payload", &response, &[200, 201, 400, 413, 500])
}

pub(crate) async fn special_characters(
    client: &AuthClient,
    ctx: &ScenarioContext,
) -> Result<(), ScenarioError> {
    let registration = ctx
        .registration("special", "specialuser")
        .with_extra("specialField", SPECIAL_CHARACTERS);
    let response = client.register(&registration).await?;
    expect_status("special characters", &response, &[200, 201, 400, 500])
}
