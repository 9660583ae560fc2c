use crate::auth_client::ServiceResponse;
use crate::domain::{AuthData, AuthEnvelope, AuthResult};
use crate::scenarios::ScenarioError;

const BODY_EXCERPT_CHARS: usize = 200;

pub(crate) fn ensure(
    step: &str,
    condition: bool,
    message: impl FnOnce() -> String,
) -> Result<(), ScenarioError> {
    if condition {
        Ok(())
    } else {
        Err(ScenarioError::ContractViolation {
            step: step.to_string(),
            message: message(),
        })
    }
}

pub(crate) fn expect_status(
    step: &str,
    response: &ServiceResponse,
    accepted: &[u16],
) -> Result<(), ScenarioError> {
    let actual = response.status_code();
    if accepted.contains(&actual) {
        return Ok(());
    }
    Err(ScenarioError::UnexpectedStatus {
        step: step.to_string(),
        expected: accepted.to_vec(),
        actual,
        body: response.body.chars().take(BODY_EXCERPT_CHARS).collect(),
    })
}

pub(crate) fn expect_json(
    step: &str,
    response: &ServiceResponse,
) -> Result<serde_json::Value, ScenarioError> {
    response
        .json()
        .map_err(|source| ScenarioError::MalformedBody {
            step: step.to_string(),
            source,
        })
}

pub(crate) fn expect_envelope(
    step: &str,
    response: &ServiceResponse,
) -> Result<AuthEnvelope, ScenarioError> {
    response
        .envelope()
        .map_err(|source| ScenarioError::MalformedBody {
            step: step.to_string(),
            source,
        })
}

pub(crate) fn expect_auth_result(
    step: &str,
    response: &ServiceResponse,
) -> Result<AuthResult, ScenarioError> {
    let envelope = expect_envelope(step, response)?;
    AuthResult::try_from(envelope).map_err(|message| ScenarioError::ContractViolation {
        step: step.to_string(),
        message,
    })
}

/// Status must match and the envelope must carry a user and a token.
pub(crate) fn expect_success(
    step: &str,
    response: &ServiceResponse,
    status: u16,
) -> Result<AuthData, ScenarioError> {
    expect_status(step, response, &[status])?;
    match expect_auth_result(step, response)? {
        AuthResult::Success(data) => Ok(data),
        AuthResult::Failure { error } => Err(ScenarioError::ContractViolation {
            step: step.to_string(),
            message: format!("expected success=true, got error {:?}", error),
        }),
    }
}

/// Status must match and the envelope must report failure with an error.
pub(crate) fn expect_failure(
    step: &str,
    response: &ServiceResponse,
    status: u16,
) -> Result<String, ScenarioError> {
    expect_status(step, response, &[status])?;
    match expect_auth_result(step, response)? {
        AuthResult::Failure { error } => Ok(error),
        AuthResult::Success(_) => Err(ScenarioError::ContractViolation {
            step: step.to_string(),
            message: "expected success=false, got a successful envelope".to_string(),
        }),
    }
}

pub(crate) fn expect_error_containing(
    step: &str,
    response: &ServiceResponse,
    status: u16,
    needle: &str,
) -> Result<(), ScenarioError> {
    let error = expect_failure(step, response, status)?;
    ensure(step, error.contains(needle), || {
        format!("error {:?} does not contain {:?}", error, needle)
    })
}
