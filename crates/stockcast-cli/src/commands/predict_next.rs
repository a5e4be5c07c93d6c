use stockcast_core::{StockApiClient, Ticker};

use crate::cli::TickerArgs;
use crate::error::CliError;

use super::CommandResult;

pub async fn run(args: &TickerArgs, client: &StockApiClient) -> Result<CommandResult, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    CommandResult::from_outcome("predict-next", client.predict_next(&ticker).await)
}
