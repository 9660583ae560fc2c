/// Why a scenario aborted.
#[derive(thiserror::Error)]
pub enum ScenarioError {
    #[error("Failed to build the HTTP client")]
    ClientSetup(#[source] reqwest::Error),
    #[error("Failed to reach the auth service")]
    Transport(#[from] reqwest::Error),
    #[error("{step}: expected status in {expected:?}, got {actual}. Body: {body}")]
    UnexpectedStatus {
        step: String,
        expected: Vec<u16>,
        actual: u16,
        body: String,
    },
    #[error("{step}: unexpected response body")]
    MalformedBody {
        step: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{step}: failed to encode the request body")]
    Encoding {
        step: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{step}: {message}")]
    ContractViolation { step: String, message: String },
    #[error("A dispatched request did not complete")]
    Dispatch(#[from] tokio::task::JoinError),
}

impl std::fmt::Debug for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
