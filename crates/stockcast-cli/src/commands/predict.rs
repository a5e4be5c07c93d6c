use serde::Serialize;
use stockcast_core::{PredictionForm, PredictionInput, PredictionResult, StockApiClient, Ticker};

use crate::cli::PredictArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct PredictResponseData {
    input: PredictionInput,
    prediction: PredictionResult,
}

pub async fn run(args: &PredictArgs, client: &StockApiClient) -> Result<CommandResult, CliError> {
    let base = match &args.from_latest {
        Some(raw) => {
            let ticker = Ticker::parse(raw)?;
            match client.fetch_latest(&ticker).await {
                Ok(quote) => PredictionForm::from(&quote.to_prediction_input()),
                Err(error) => return CommandResult::from_outcome::<()>("latest", Err(error)),
            }
        }
        None => PredictionForm::default(),
    };

    let form = args.overlay(base);
    let input = form.to_input();
    let outcome = client
        .predict_form(&form)
        .await
        .map(|prediction| PredictResponseData { input, prediction });

    CommandResult::from_outcome("predict", outcome)
}
