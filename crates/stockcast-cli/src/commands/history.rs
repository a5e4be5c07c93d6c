use stockcast_core::{HistoryQuery, StockApiClient, Ticker};

use crate::cli::HistoryArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &HistoryArgs, client: &StockApiClient) -> Result<CommandResult, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let query = HistoryQuery {
        period: args.period.clone(),
        interval: args.interval.clone(),
    };
    CommandResult::from_outcome("history", client.history(&ticker, &query).await)
}
