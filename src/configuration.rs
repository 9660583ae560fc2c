use crate::auth_client::AuthClient;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::path::Path;
use std::time::Duration;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub service: ServiceSettings,
    pub scenarios: ScenarioSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ServiceSettings {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_seconds: u64,
}

impl ServiceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn client(&self) -> Result<AuthClient, reqwest::Error> {
        AuthClient::new(self.base_url.clone(), self.timeout())
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ScenarioSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub registration_burst: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub login_burst: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub high_volume_requests: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub high_volume_budget_seconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timing_samples: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub oversized_field_length: usize,
    pub dispatch: DispatchMode,
    pub unique_identities: bool,
}

impl ScenarioSettings {
    pub fn high_volume_budget(&self) -> Duration {
        Duration::from_secs(self.high_volume_budget_seconds)
    }
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            registration_burst: 5,
            login_burst: 10,
            high_volume_requests: 50,
            high_volume_budget_seconds: 30,
            timing_samples: 10,
            oversized_field_length: 10_000,
            dispatch: DispatchMode::Sequential,
            unique_identities: false,
        }
    }
}

/// How burst scenarios issue their requests.
#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    Sequential,
    Parallel,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!(
            "Failed to determine the current directory: {}",
            e
        ))
    })?;
    let configuration_directory = base_path.join("configuration");
    let variables: config::Map<String, String> = std::env::vars().collect();

    load_configuration(&configuration_directory, variables)
}

/// Layer `base.yaml`, the environment file and `APP_`-prefixed variables, in that order.
fn load_configuration(
    configuration_directory: &Path,
    variables: config::Map<String, String>,
) -> Result<Settings, config::ConfigError> {
    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = variables
        .get("APP_ENVIRONMENT")
        .cloned()
        .unwrap_or_else(|| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_SERVICE__BASE_URL=http://auth:3000 would set `Settings.service.base_url`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .source(Some(variables)),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// The possible runtime environment for the scenario suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Ci,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Ci => "ci",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "ci" => Ok(Self::Ci),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `ci`.",
                other
            )),
        }
    }
}
