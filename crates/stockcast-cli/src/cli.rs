//! CLI argument definitions for stockcast.
//!
//! # Commands
//!
//! | Command | Endpoint |
//! |---------|----------|
//! | `latest` | `GET /latest/{ticker}` |
//! | `predict` | `POST /predict` |
//! | `predict-next` | `POST /predict-next` |
//! | `history` | `GET /history/{ticker}` |
//! | `status` | `GET /status` |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--base-url` | `$STOCKCAST_BASE_URL` | Backend address |
//! | `--target` | `local` | Preset used when no base URL is given |
//! | `--timeout-ms` | transport default | Per-request timeout |
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! # Examples
//!
//! ```bash
//! stockcast latest
//! stockcast --target emulator latest GGRM.JK
//! stockcast --base-url http://192.168.1.10:8000 predict --open 17800 --close 17950
//! stockcast predict --from-latest
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

use stockcast_core::{DeploymentTarget, FormField, PredictionForm, DEFAULT_TICKER};

/// Quote and next-close prediction client for the stockcast backend.
#[derive(Debug, Parser)]
#[command(name = "stockcast", author, version, about)]
pub struct Cli {
    /// Backend base URL; overrides STOCKCAST_BASE_URL and --target.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Deployment preset used when no base URL is configured.
    #[arg(long, global = true, value_enum, default_value_t = TargetSelector::Local)]
    pub target: TargetSelector,

    /// Request timeout in milliseconds; unset keeps the transport default.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Key/value listing for terminal display.
    Table,
    /// Single JSON envelope.
    Json,
}

/// Documented deployment presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetSelector {
    /// http://localhost:8000
    Local,
    /// http://10.0.2.2:8000 (Android emulator host alias)
    Emulator,
}

impl From<TargetSelector> for DeploymentTarget {
    fn from(value: TargetSelector) -> Self {
        match value {
            TargetSelector::Local => Self::Local,
            TargetSelector::Emulator => Self::AndroidEmulator,
        }
    }
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the latest daily quote for a ticker.
    Latest(TickerArgs),

    /// Submit a feature vector and get the predicted close.
    ///
    /// Every field is optional; blank or non-numeric values are sent as 0.
    Predict(PredictArgs),

    /// Ask the backend to forecast the next close from its own market data.
    PredictNext(TickerArgs),

    /// Fetch daily history with engineered features.
    History(HistoryArgs),

    /// Show model and scaler status.
    Status,
}

/// Arguments for ticker-scoped commands.
#[derive(Debug, Args)]
pub struct TickerArgs {
    /// Exchange ticker (e.g., GGRM.JK).
    #[arg(default_value = DEFAULT_TICKER)]
    pub ticker: String,
}

/// Arguments for the `predict` command.
#[derive(Debug, Args)]
pub struct PredictArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub open: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub high: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub low: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub close: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub volume: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub return1: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub ma7: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub ma21: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub std7: Option<String>,

    /// Prefill unset fields from the latest quote of this ticker.
    #[arg(long, value_name = "TICKER", num_args = 0..=1, default_missing_value = DEFAULT_TICKER)]
    pub from_latest: Option<String>,
}

impl PredictArgs {
    /// Form snapshot holding only the values given on the command line.
    pub fn to_form(&self) -> PredictionForm {
        self.overlay(PredictionForm::default())
    }

    /// Replaces the fields of `base` that were given on the command line.
    pub fn overlay(&self, base: PredictionForm) -> PredictionForm {
        FormField::ALL.into_iter().fold(base, |form, field| match self.raw(field) {
            Some(value) => form.with(field, value),
            None => form,
        })
    }

    pub fn raw(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Open => self.open.as_deref(),
            FormField::High => self.high.as_deref(),
            FormField::Low => self.low.as_deref(),
            FormField::Close => self.close.as_deref(),
            FormField::Volume => self.volume.as_deref(),
            FormField::Return1 => self.return1.as_deref(),
            FormField::Ma7 => self.ma7.as_deref(),
            FormField::Ma21 => self.ma21.as_deref(),
            FormField::Std7 => self.std7.as_deref(),
        }
    }
}

/// Arguments for the `history` command.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Exchange ticker (e.g., GGRM.JK).
    #[arg(default_value = DEFAULT_TICKER)]
    pub ticker: String,

    /// Lookback period (1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max).
    #[arg(long, default_value = "1mo")]
    pub period: String,

    /// Bar interval.
    #[arg(long, default_value = "1d")]
    pub interval: String,
}
