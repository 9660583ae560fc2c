use crate::domain::{AuthEnvelope, LoginRequest, RegistrationRequest};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};

pub const REGISTER_PATH: &str = "/api/auth/register-mock";
pub const LOGIN_PATH: &str = "/api/auth/login-mock";
pub const PROTECTED_PATH: &str = "/api/auth/protected";

/// HTTP client for the auth service under test.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct AuthClient {
    base_url: String,
    http_client: Client,
}

/// A fully read response together with how long it took to arrive.
#[derive(Debug, Clone)]
pub struct ServiceResponse {
    pub status: StatusCode,
    pub body: String,
    pub elapsed: Duration,
}

impl ServiceResponse {
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    pub fn envelope(&self) -> Result<AuthEnvelope, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

impl AuthClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[tracing::instrument(
        name = "Registering user",
        skip(self, request),
        fields(email = %request.email)
    )]
    pub async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<ServiceResponse, reqwest::Error> {
        let builder = self.http_client.post(self.url(REGISTER_PATH)).json(request);
        Self::execute(builder).await
    }

    #[tracing::instrument(name = "Logging in", skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<ServiceResponse, reqwest::Error> {
        let builder = self.http_client.post(self.url(LOGIN_PATH)).json(request);
        Self::execute(builder).await
    }

    #[tracing::instrument(name = "Accessing protected resource", skip_all)]
    pub async fn get_protected(
        &self,
        token: impl AsRef<str>,
    ) -> Result<ServiceResponse, reqwest::Error> {
        let builder = self
            .http_client
            .get(self.url(PROTECTED_PATH))
            .bearer_auth(token.as_ref());
        Self::execute(builder).await
    }

    /// Post an arbitrary body to the registration endpoint.
    ///
    /// With `content_type` set to `None` no `Content-Type` header is sent.
    #[tracing::instrument(name = "Posting raw registration body", skip(self, body))]
    pub async fn register_raw(
        &self,
        body: impl Into<reqwest::Body>,
        content_type: Option<&str>,
    ) -> Result<ServiceResponse, reqwest::Error> {
        let mut builder = self.http_client.post(self.url(REGISTER_PATH)).body(body);
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        Self::execute(builder).await
    }

    async fn execute(builder: reqwest::RequestBuilder) -> Result<ServiceResponse, reqwest::Error> {
        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            tracing::error!("Failed to reach the auth service: {:?}", e);
            e
        })?;
        let status = response.status();
        let body = response.text().await?;
        let elapsed = started.elapsed();
        tracing::debug!(
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Received response"
        );
        Ok(ServiceResponse {
            status,
            body,
            elapsed,
        })
    }
}
