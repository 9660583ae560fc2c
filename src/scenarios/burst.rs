use crate::auth_client::{AuthClient, ServiceResponse};
use crate::configuration::DispatchMode;
use crate::domain::LoginRequest;
use crate::scenarios::assertions::{ensure, expect_status, expect_success};
use crate::scenarios::{ScenarioContext, ScenarioError};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Issue one request per item and return the responses in item order.
///
/// The first transport failure aborts the whole burst.
async fn dispatch<T, F, Fut>(
    client: &AuthClient,
    mode: DispatchMode,
    items: Vec<T>,
    send: F,
) -> Result<Vec<ServiceResponse>, ScenarioError>
where
    T: Send + 'static,
    F: Fn(AuthClient, T) -> Fut,
    Fut: Future<Output = Result<ServiceResponse, reqwest::Error>> + Send + 'static,
{
    match mode {
        DispatchMode::Sequential => {
            let mut responses = Vec::with_capacity(items.len());
            for item in items {
                responses.push(send(client.clone(), item).await?);
            }
            Ok(responses)
        }
        DispatchMode::Parallel => {
            let mut slots: Vec<Option<ServiceResponse>> = vec![None; items.len()];
            let mut set = JoinSet::new();
            for (index, item) in items.into_iter().enumerate() {
                let request = send(client.clone(), item);
                set.spawn(async move { (index, request.await) });
            }
            while let Some(joined) = set.join_next().await {
                let (index, outcome) = joined?;
                slots[index] = Some(outcome?);
            }
            Ok(slots.into_iter().flatten().collect())
        }
    }
}

pub(crate) async fn concurrent_registration(
    client: &AuthClient,
    ctx: &ScenarioContext,
) -> Result<(), ScenarioError> {
    let registrations: Vec<_> = (0..ctx.settings.registration_burst)
        .map(|i| {
            ctx.registration(
                &format!("concurrent{}", i),
                &format!("concurrentuser{}", i),
            )
        })
        .collect();
    let responses = dispatch(
        client,
        ctx.settings.dispatch,
        registrations,
        |client, registration| async move { client.register(&registration).await },
    )
    .await?;

    for (i, response) in responses.iter().enumerate() {
        expect_success(&format!("registration #{}", i), response, 201)?;
    }
    Ok(())
}

pub(crate) async fn concurrent_login(
    client: &AuthClient,
    ctx: &ScenarioContext,
) -> Result<(), ScenarioError> {
    let registration = ctx.registration("concurrentlogin", "concurrentloginuser");
    let response = client.register(&registration).await?;
    expect_status("register", &response, &[201])?;

    let logins = vec![LoginRequest::from(&registration); ctx.settings.login_burst];
    let responses = dispatch(
        client,
        ctx.settings.dispatch,
        logins,
        |client, login| async move { client.login(&login).await },
    )
    .await?;

    for (i, response) in responses.iter().enumerate() {
        expect_success(&format!("login #{}", i), response, 200)?;
    }
    Ok(())
}

pub(crate) async fn high_volume(
    client: &AuthClient,
    ctx: &ScenarioContext,
) -> Result<(), ScenarioError> {
    let step = "high volume";
    let registrations: Vec<_> = (0..ctx.settings.high_volume_requests)
        .map(|i| ctx.registration(&format!("loadtest{}", i), &format!("loadtestuser{}", i)))
        .collect();

    let started = Instant::now();
    let responses = dispatch(
        client,
        ctx.settings.dispatch,
        registrations,
        |client, registration| async move { client.register(&registration).await },
    )
    .await?;
    let duration = started.elapsed();

    let budget = ctx.settings.high_volume_budget();
    ensure(step, duration < budget, || {
        format!(
            "{} registrations took {:?}, budget is {:?}",
            responses.len(),
            duration,
            budget
        )
    })?;

    // Rate limiting may legitimately reject some of them.
    let created = responses
        .iter()
        .filter(|response| response.status_code() == 201)
        .count();
    tracing::info!(
        created,
        total = responses.len(),
        elapsed_ms = duration.as_millis() as u64,
        "High volume burst finished"
    );
    ensure(step, created > 0, || {
        format!("none of {} registrations returned 201", responses.len())
    })
}

pub(crate) async fn response_time_consistency(
    client: &AuthClient,
    ctx: &ScenarioContext,
) -> Result<(), ScenarioError> {
    let mut durations = Vec::with_capacity(ctx.settings.timing_samples);
    for i in 0..ctx.settings.timing_samples {
        let registration =
            ctx.registration(&format!("perftest{}", i), &format!("perftestuser{}", i));
        let response = client.register(&registration).await?;
        expect_status(&format!("timed registration #{}", i), &response, &[201])?;
        durations.push(response.elapsed);
    }
    check_response_times(&durations).map_err(|message| ScenarioError::ContractViolation {
        step: "response times".to_string(),
        message,
    })
}

/// Every sample must be non-zero and the slowest below twice the average.
pub fn check_response_times(durations: &[Duration]) -> Result<(), String> {
    let (Some(min), Some(max)) = (durations.iter().min(), durations.iter().max()) else {
        return Err("No response times were recorded.".to_string());
    };
    let total: Duration = durations.iter().sum();
    let average = total / durations.len() as u32;
    if max >= &(average * 2) {
        return Err(format!(
            "Slowest response took {:?}, more than twice the average of {:?}.",
            max, average
        ));
    }
    if min.is_zero() {
        return Err("A response was recorded as taking no time.".to_string());
    }
    Ok(())
}
