use crate::configuration::{ServiceSettings, Settings};
use crate::scenarios::{Scenario, ScenarioContext, ScenarioError};
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    Passed,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    pub outcome: ScenarioOutcome,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.outcome == ScenarioOutcome::Passed
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports: Vec<ScenarioReport>,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.reports.iter().filter(|r| r.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.reports.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn report(&self, scenario: Scenario) -> Option<&ScenarioReport> {
        self.reports.iter().find(|r| r.scenario == scenario)
    }
}

pub struct ScenarioRunner {
    service: ServiceSettings,
    context: ScenarioContext,
}

impl ScenarioRunner {
    pub fn new(settings: Settings) -> Self {
        Self {
            service: settings.service,
            context: ScenarioContext::new(settings.scenarios),
        }
    }

    /// Run scenarios one after the other. A failure never stops the run.
    pub async fn run(&self, scenarios: &[Scenario]) -> RunSummary {
        let mut summary = RunSummary::default();
        for scenario in scenarios {
            summary.reports.push(self.run_scenario(*scenario).await);
        }
        tracing::info!(
            passed = summary.passed(),
            failed = summary.failed(),
            "Scenario run finished"
        );
        summary
    }

    #[tracing::instrument(
        name = "Running scenario",
        skip(self),
        fields(scenario = %scenario, run_id = ?self.context.run_id())
    )]
    pub async fn run_scenario(&self, scenario: Scenario) -> ScenarioReport {
        let started_at = Utc::now();
        let started = Instant::now();
        let outcome = match self.execute(scenario).await {
            Ok(()) => {
                tracing::info!("Scenario passed");
                ScenarioOutcome::Passed
            }
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Scenario failed"
                );
                ScenarioOutcome::Failed(format!("{:?}", e).trim_end().to_string())
            }
        };
        ScenarioReport {
            scenario,
            outcome,
            started_at,
            elapsed: started.elapsed(),
        }
    }

    async fn execute(&self, scenario: Scenario) -> Result<(), ScenarioError> {
        // The client lives for exactly one scenario and is dropped on every exit path.
        let client = self.service.client().map_err(ScenarioError::ClientSetup)?;
        scenario.run(&client, &self.context).await
    }
}
