mod history;
mod latest;
mod predict;
mod predict_next;
mod status;

use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use stockcast_core::{ApiError, ClientConfig, Envelope, EnvelopeMeta, StockApiClient};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Outcome of one client call, serialized for output.
pub struct CommandResult {
    pub endpoint: &'static str,
    pub outcome: Result<Value, ApiError>,
}

impl CommandResult {
    pub fn from_outcome<T: Serialize>(
        endpoint: &'static str,
        outcome: Result<T, ApiError>,
    ) -> Result<Self, CliError> {
        let outcome = match outcome {
            Ok(data) => Ok(serde_json::to_value(data)?),
            Err(error) => Err(error),
        };
        Ok(Self { endpoint, outcome })
    }
}

/// Rendered envelope plus the failure that should decide the exit code.
pub struct CommandReport {
    pub envelope: Envelope<Value>,
    pub failure: Option<ApiError>,
}

impl CommandReport {
    /// Process exit status; the failure itself is already in the envelope.
    pub fn exit_code(&self) -> u8 {
        match &self.failure {
            Some(failure) => CliError::from(failure.clone()).exit_code(),
            None => 0,
        }
    }
}

pub async fn run(cli: &Cli) -> Result<CommandReport, CliError> {
    let client = StockApiClient::new(resolve_config(cli)?)?;
    tracing::debug!(base_url = client.config().base_url(), "client configured");

    let started = Instant::now();
    let CommandResult { endpoint, outcome } = match &cli.command {
        Command::Latest(args) => latest::run(args, &client).await?,
        Command::Predict(args) => predict::run(args, &client).await?,
        Command::PredictNext(args) => predict_next::run(args, &client).await?,
        Command::History(args) => history::run(args, &client).await?,
        Command::Status => status::run(&client).await?,
    };
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let meta = EnvelopeMeta::new(endpoint, client.config().base_url(), latency_ms);
    let failure = outcome.as_ref().err().cloned();

    Ok(CommandReport {
        envelope: Envelope::from_result(meta, outcome),
        failure,
    })
}

/// Precedence: `--base-url`, then `STOCKCAST_BASE_URL`, then `--target`.
fn resolve_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let config = match &cli.base_url {
        Some(base_url) => ClientConfig::new(base_url)?,
        None => ClientConfig::from_env_or(cli.target.into())?,
    };
    Ok(config.with_timeout_ms(cli.timeout_ms)?)
}
