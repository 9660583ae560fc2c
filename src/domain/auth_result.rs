use crate::domain::Token;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_string_from_number;

/// The JSON envelope exactly as the service sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticatedUser {
    #[serde(deserialize_with = "deserialize_string_from_number")]
    pub id: String,
    pub email: String,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct AuthData {
    pub user: AuthenticatedUser,
    pub token: Token,
}

#[derive(Deserialize)]
struct RawAuthData {
    user: AuthenticatedUser,
    token: String,
}

/// Outcome of a register or login call.
#[derive(Debug, Clone)]
pub enum AuthResult {
    Success(AuthData),
    Failure { error: String },
}

impl AuthResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthResult::Success(_))
    }

    pub fn data(&self) -> Option<&AuthData> {
        match self {
            AuthResult::Success(data) => Some(data),
            AuthResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AuthResult::Success(_) => None,
            AuthResult::Failure { error } => Some(error),
        }
    }
}

impl TryFrom<AuthEnvelope> for AuthResult {
    type Error = String;

    fn try_from(envelope: AuthEnvelope) -> Result<Self, Self::Error> {
        match envelope {
            AuthEnvelope {
                success: true,
                data: Some(data),
                ..
            } => {
                let raw: RawAuthData = serde_json::from_value(data)
                    .map_err(|e| format!("`data` is not a user with a token: {}", e))?;
                let token = Token::parse(raw.token)?;
                Ok(AuthResult::Success(AuthData {
                    user: raw.user,
                    token,
                }))
            }
            AuthEnvelope { success: true, .. } => {
                Err("Envelope reports success but carries no `data`.".to_string())
            }
            AuthEnvelope {
                success: false,
                error: Some(error),
                ..
            } => Ok(AuthResult::Failure { error }),
            AuthEnvelope { success: false, .. } => {
                Err("Envelope reports failure but carries no `error`.".to_string())
            }
        }
    }
}
