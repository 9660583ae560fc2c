use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl From<&crate::domain::RegistrationRequest> for LoginRequest {
    fn from(registration: &crate::domain::RegistrationRequest) -> Self {
        Self::new(registration.email.clone(), registration.password.clone())
    }
}
