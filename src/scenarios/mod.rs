//! The fixed catalog of black-box checks against the auth service.

mod assertions;
mod burst;
mod error;
mod flow;
mod robustness;
mod validation;

pub use burst::check_response_times;
pub use error::ScenarioError;

use crate::auth_client::AuthClient;
use crate::configuration::ScenarioSettings;
use crate::domain::RegistrationRequest;
use uuid::Uuid;

/// Password used by every well-formed fixture.
pub const PASSWORD: &str = "SecurePass123!";
pub const WRONG_PASSWORD: &str = "WrongPassword123!";
pub const FIXTURE_DOMAIN: &str = "example.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    FullFlow,
    DuplicateRegistration,
    InvalidCredentials,
    InvalidRegistrationPayload,
    InvalidLoginPayload,
    ConcurrentRegistration,
    ConcurrentLogin,
    MalformedJson,
    MissingContentType,
    OversizedPayload,
    SpecialCharacters,
    HighVolume,
    ResponseTimeConsistency,
    TokenShape,
    TokenRenewal,
}

impl Scenario {
    pub const ALL: [Scenario; 15] = [
        Scenario::FullFlow,
        Scenario::DuplicateRegistration,
        Scenario::InvalidCredentials,
        Scenario::InvalidRegistrationPayload,
        Scenario::InvalidLoginPayload,
        Scenario::ConcurrentRegistration,
        Scenario::ConcurrentLogin,
        Scenario::MalformedJson,
        Scenario::MissingContentType,
        Scenario::OversizedPayload,
        Scenario::SpecialCharacters,
        Scenario::HighVolume,
        Scenario::ResponseTimeConsistency,
        Scenario::TokenShape,
        Scenario::TokenRenewal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::FullFlow => "full_flow",
            Scenario::DuplicateRegistration => "duplicate_registration",
            Scenario::InvalidCredentials => "invalid_credentials",
            Scenario::InvalidRegistrationPayload => "invalid_registration_payload",
            Scenario::InvalidLoginPayload => "invalid_login_payload",
            Scenario::ConcurrentRegistration => "concurrent_registration",
            Scenario::ConcurrentLogin => "concurrent_login",
            Scenario::MalformedJson => "malformed_json",
            Scenario::MissingContentType => "missing_content_type",
            Scenario::OversizedPayload => "oversized_payload",
            Scenario::SpecialCharacters => "special_characters",
            Scenario::HighVolume => "high_volume",
            Scenario::ResponseTimeConsistency => "response_time_consistency",
            Scenario::TokenShape => "token_shape",
            Scenario::TokenRenewal => "token_renewal",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scenario::FullFlow => "register, log in and reach the protected resource",
            Scenario::DuplicateRegistration => "a second registration of one email yields 409",
            Scenario::InvalidCredentials => "a wrong password yields 401",
            Scenario::InvalidRegistrationPayload => "invalid registration payloads yield 400",
            Scenario::InvalidLoginPayload => "invalid login payloads yield 400",
            Scenario::ConcurrentRegistration => "a burst of distinct registrations all succeed",
            Scenario::ConcurrentLogin => "a burst of logins for one user all succeed",
            Scenario::MalformedJson => "a truncated JSON body is handled",
            Scenario::MissingContentType => "a body without Content-Type is handled",
            Scenario::OversizedPayload => "a very large extra field is handled",
            Scenario::SpecialCharacters => "a symbol-heavy extra field is handled",
            Scenario::HighVolume => "many registrations finish within the time budget",
            Scenario::ResponseTimeConsistency => "registration latency stays within 2x of average",
            Scenario::TokenShape => "issued tokens have three dot-delimited segments",
            Scenario::TokenRenewal => "logging in again issues a different token",
        }
    }

    pub async fn run(
        &self,
        client: &AuthClient,
        ctx: &ScenarioContext,
    ) -> Result<(), ScenarioError> {
        match self {
            Scenario::FullFlow => flow::full_flow(client, ctx).await,
            Scenario::DuplicateRegistration => flow::duplicate_registration(client, ctx).await,
            Scenario::InvalidCredentials => flow::invalid_credentials(client, ctx).await,
            Scenario::InvalidRegistrationPayload => {
                validation::invalid_registration_payload(client).await
            }
            Scenario::InvalidLoginPayload => validation::invalid_login_payload(client).await,
            Scenario::ConcurrentRegistration => burst::concurrent_registration(client, ctx).await,
            Scenario::ConcurrentLogin => burst::concurrent_login(client, ctx).await,
            Scenario::MalformedJson => robustness::malformed_json(client).await,
            Scenario::MissingContentType => robustness::missing_content_type(client, ctx).await,
            Scenario::OversizedPayload => robustness::oversized_payload(client, ctx).await,
            Scenario::SpecialCharacters => robustness::special_characters(client, ctx).await,
            Scenario::HighVolume => burst::high_volume(client, ctx).await,
            Scenario::ResponseTimeConsistency => {
                burst::response_time_consistency(client, ctx).await
            }
            Scenario::TokenShape => flow::token_shape(client, ctx).await,
            Scenario::TokenRenewal => flow::token_renewal(client, ctx).await,
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| format!("{} is not a known scenario.", s))
    }
}

/// Run-wide inputs shared by every scenario.
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    pub settings: ScenarioSettings,
    run_id: Option<String>,
}

impl ScenarioContext {
    pub fn new(settings: ScenarioSettings) -> Self {
        let run_id = settings
            .unique_identities
            .then(|| Uuid::new_v4().simple().to_string()[..8].to_string());
        Self { settings, run_id }
    }

    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }

    pub fn email(&self, local_part: &str) -> String {
        match &self.run_id {
            Some(run_id) => format!("{}-{}@{}", local_part, run_id, FIXTURE_DOMAIN),
            None => format!("{}@{}", local_part, FIXTURE_DOMAIN),
        }
    }

    pub fn username(&self, base: &str) -> String {
        match &self.run_id {
            Some(run_id) => format!("{}_{}", base, run_id),
            None => base.to_string(),
        }
    }

    /// A well-formed registration for the fixture identity.
    pub fn registration(&self, local_part: &str, username: &str) -> RegistrationRequest {
        RegistrationRequest::new(self.email(local_part), self.username(username), PASSWORD)
    }
}
