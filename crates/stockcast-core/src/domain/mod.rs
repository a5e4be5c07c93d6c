//! # Domain Models
//!
//! Typed request and response contracts for the prediction backend.
//!
//! | Type | Endpoint |
//! |------|----------|
//! | [`Quote`] | `GET /latest/{ticker}`, rows of `GET /history/{ticker}` |
//! | [`PredictionInput`] / [`PredictionResult`] | `POST /predict` |
//! | [`NextCloseForecast`] | `POST /predict-next` |
//! | [`PriceHistory`] | `GET /history/{ticker}` |
//! | [`ServiceStatus`] | `GET /status` |
//! | [`Ticker`] | path segment of the quote endpoints |
//!
//! Responses are snapshots: nothing here is mutated after decoding.

mod models;
mod ticker;

pub use models::{
    NextCloseForecast, PredictionInput, PredictionResult, PriceHistory, Quote, ServiceStatus,
    TechnicalFeatures,
};
pub use ticker::{Ticker, DEFAULT_TICKER};
