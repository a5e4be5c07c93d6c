//! # Stockcast Core
//!
//! Typed client for a remote stock quote and price prediction backend.
//!
//! ## Overview
//!
//! All market data retrieval and model inference happen server-side. This
//! crate owns the client half of the contract:
//!
//! - **Typed contracts** for quotes, feature vectors and predictions
//! - **Lenient form coercion**: blank or unreadable numbers become `0.0`
//! - **One error type** separating backend-reported errors from transport failures
//! - **Injected base URL** with documented deployment presets
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | `StockApiClient` and response decoding |
//! | [`config`] | Base URL, deployment targets, timeout |
//! | [`domain`] | Quote, prediction and status models |
//! | [`envelope`] | Output envelope with metadata |
//! | [`error`] | `ApiError` and `ValidationError` |
//! | [`form`] | Raw prediction form and decimal coercion |
//! | [`http_client`] | Transport trait and reqwest implementation |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockcast_core::{ClientConfig, StockApiClient, Ticker};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StockApiClient::new(ClientConfig::new("http://localhost:8000")?)?;
//!     let quote = client.fetch_latest(&Ticker::parse("GGRM.JK")?).await?;
//!     println!("{} close {}", quote.date, quote.close);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use stockcast_core::ApiError;
//!
//! fn describe(error: &ApiError) -> String {
//!     match error {
//!         ApiError::Api { message } => format!("Error: {message}"),
//!         ApiError::Transport { message } => format!("Network error: {message}"),
//!         ApiError::Validation(inner) => format!("Invalid input: {inner}"),
//!     }
//! }
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod form;
pub mod http_client;

pub use client::{decode_response, HistoryQuery, StockApiClient};

pub use config::{ClientConfig, DeploymentTarget, BASE_URL_ENV};

pub use domain::{
    NextCloseForecast, PredictionInput, PredictionResult, PriceHistory, Quote, ServiceStatus,
    TechnicalFeatures, Ticker, DEFAULT_TICKER,
};

pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta, SCHEMA_VERSION};

pub use error::{ApiError, ValidationError};

pub use form::{coerce_decimal, FormField, PredictionForm};

pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpMethod, HttpRequest, HttpResponse,
    ReqwestHttpClient,
};
