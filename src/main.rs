use anyhow::Context;
use authflow::configuration::get_configuration;
use authflow::runner::{ScenarioOutcome, ScenarioRunner};
use authflow::scenarios::Scenario;
use authflow::telemetry::{get_subscriber, init_subscriber};
use clap::Parser;

#[derive(Parser)]
#[command(name = "authflow")]
#[command(about = "Black-box contract checks for an authentication service", long_about = None)]
struct Cli {
    #[arg(long, help = "List the available scenarios and exit")]
    list: bool,

    #[arg(help = "Scenarios to run (all when omitted)")]
    scenarios: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.list {
        for scenario in Scenario::ALL {
            println!("{:<30} {}", scenario.name(), scenario.description());
        }
        return Ok(());
    }

    // Logs go to stderr, the report to stdout.
    let subscriber = get_subscriber("authflow".into(), "info".into(), std::io::stderr);
    init_subscriber(subscriber)?;

    let scenarios = if cli.scenarios.is_empty() {
        Scenario::ALL.to_vec()
    } else {
        cli.scenarios
            .iter()
            .map(|name| name.parse::<Scenario>().map_err(anyhow::Error::msg))
            .collect::<Result<Vec<_>, _>>()?
    };

    let configuration = get_configuration().context("Failed to read configuration.")?;
    tracing::info!(
        base_url = %configuration.service.base_url,
        timeout_seconds = configuration.service.timeout_seconds,
        "Running {} scenario(s)",
        scenarios.len()
    );

    let runner = ScenarioRunner::new(configuration);
    let summary = runner.run(&scenarios).await;

    for report in &summary.reports {
        let started_at = report.started_at.format("%H:%M:%S%.3f");
        match &report.outcome {
            ScenarioOutcome::Passed => println!(
                "PASS {:<30} {} {:>8.2?}",
                report.scenario.name(),
                started_at,
                report.elapsed
            ),
            ScenarioOutcome::Failed(reason) => {
                println!(
                    "FAIL {:<30} {} {:>8.2?}",
                    report.scenario.name(),
                    started_at,
                    report.elapsed
                );
                for line in reason.lines() {
                    println!("     {}", line);
                }
            }
        }
    }
    println!(
        "\n{} passed, {} failed",
        summary.passed(),
        summary.failed()
    );

    if !summary.is_success() {
        anyhow::bail!("{} scenario(s) failed", summary.failed());
    }
    Ok(())
}
