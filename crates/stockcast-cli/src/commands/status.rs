use stockcast_core::StockApiClient;

use crate::error::CliError;

use super::CommandResult;

pub async fn run(client: &StockApiClient) -> Result<CommandResult, CliError> {
    CommandResult::from_outcome("status", client.status().await)
}
