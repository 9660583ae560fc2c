use crate::auth_client::AuthClient;
use crate::domain::{LoginRequest, Token};
use crate::scenarios::assertions::{
    ensure, expect_envelope, expect_error_containing, expect_json, expect_status, expect_success,
};
use crate::scenarios::{ScenarioContext, ScenarioError, WRONG_PASSWORD};
use reqwest::StatusCode;

/// The protected endpoint is optional, so 404 is as acceptable as 401.
const PROTECTED_STATUSES: [u16; 3] = [200, 401, 404];

pub(crate) async fn full_flow(
    client: &AuthClient,
    ctx: &ScenarioContext,
) -> Result<(), ScenarioError> {
    let registration = ctx.registration("fullflow", "fullflowuser");

    let response = client.register(&registration).await?;
    let registered = expect_success("register", &response, 201)?;

    let response = client.login(&LoginRequest::from(&registration)).await?;
    let logged_in = expect_success("login", &response, 200)?;
    ensure("login", logged_in.user == registered.user, || {
        format!(
            "login returned {:?}, registration returned {:?}",
            logged_in.user, registered.user
        )
    })?;

    access_protected(client, registered.token.as_ref()).await
}

pub(crate) async fn duplicate_registration(
    client: &AuthClient,
    ctx: &ScenarioContext,
) -> Result<(), ScenarioError> {
    let registration = ctx.registration("duplicate", "duplicateuser");

    let response = client.register(&registration).await?;
    expect_success("first registration", &response, 201)?;

    let response = client.register(&registration).await?;
    expect_error_containing("second registration", &response, 409, "already exists")
}

pub(crate) async fn invalid_credentials(
    client: &AuthClient,
    ctx: &ScenarioContext,
) -> Result<(), ScenarioError> {
    let registration = ctx.registration("invalid", "invaliduser");

    let response = client.register(&registration).await?;
    expect_status("register", &response, &[201])?;

    let login = LoginRequest::new(registration.email.clone(), WRONG_PASSWORD);
    let response = client.login(&login).await?;
    expect_error_containing(
        "login with wrong password",
        &response,
        401,
        "Invalid email or password",
    )
}

pub(crate) async fn token_shape(
    client: &AuthClient,
    ctx: &ScenarioContext,
) -> Result<(), ScenarioError> {
    let step = "register";
    let registration = ctx.registration("expire", "expireuser");

    let response = client.register(&registration).await?;
    expect_status(step, &response, &[201])?;

    // Inspected by hand so a bad token is reported as such.
    let envelope = expect_envelope(step, &response)?;
    let raw_token = envelope
        .data
        .as_ref()
        .and_then(|data| data.get("token"))
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| ScenarioError::ContractViolation {
            step: step.to_string(),
            message: "`data.token` is missing or not a string".to_string(),
        })?;

    access_protected(client, raw_token).await?;

    Token::parse(raw_token.to_string()).map_err(|message| ScenarioError::ContractViolation {
        step: "token format".to_string(),
        message,
    })?;
    Ok(())
}

pub(crate) async fn token_renewal(
    client: &AuthClient,
    ctx: &ScenarioContext,
) -> Result<(), ScenarioError> {
    let registration = ctx.registration("renew", "renewuser");

    let response = client.register(&registration).await?;
    let first = expect_success("register", &response, 201)?;

    let response = client.login(&LoginRequest::from(&registration)).await?;
    let second = expect_success("login", &response, 200)?;

    ensure("login", first.token != second.token, || {
        "logging in again returned the registration token".to_string()
    })
}

async fn access_protected(client: &AuthClient, token: &str) -> Result<(), ScenarioError> {
    let step = "protected access";
    let response = client.get_protected(token).await?;
    expect_status(step, &response, &PROTECTED_STATUSES)?;
    if response.status != StatusCode::OK {
        tracing::info!(
            status = response.status_code(),
            "Protected resource unavailable or token refused"
        );
        return Ok(());
    }

    let body = expect_json(step, &response)?;
    ensure(step, body["success"].as_bool() == Some(true), || {
        format!("expected success=true, got {}", body["success"])
    })?;
    ensure(step, body["data"]["user"].is_object(), || {
        "`data.user` is missing".to_string()
    })
}
