use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Engineered indicators the backend attaches to each daily row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalFeatures {
    #[serde(default)]
    pub return1: f64,
    #[serde(default)]
    pub ma7: f64,
    #[serde(default)]
    pub ma21: f64,
    #[serde(default)]
    pub std7: f64,
}

/// Single trading day snapshot for a ticker.
///
/// Deserializes from either the flat shape (`{date, open, close, volume}`)
/// or the nested shape (`{date, ohlcv: {...}, technical_features: {...}}`)
/// and always serializes flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QuotePayload")]
pub struct Quote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    pub date: String,
    pub open: f64,
    pub close: f64,
    pub volume: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<TechnicalFeatures>,
}

impl Quote {
    /// Seeds a prediction request from this snapshot; absent values become 0.
    pub fn to_prediction_input(&self) -> PredictionInput {
        let features = self.features.unwrap_or_default();
        PredictionInput {
            open: self.open,
            high: self.high.unwrap_or(0.0),
            low: self.low.unwrap_or(0.0),
            close: self.close,
            volume: self.volume,
            return1: features.return1,
            ma7: features.ma7,
            ma21: features.ma21,
            std7: features.std7,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OhlcvPayload {
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    volume: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct QuotePayload {
    ticker: Option<String>,
    date: Option<String>,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    volume: Option<f64>,
    ohlcv: Option<OhlcvPayload>,
    #[serde(alias = "features")]
    technical_features: Option<TechnicalFeatures>,
}

impl TryFrom<QuotePayload> for Quote {
    type Error = ValidationError;

    fn try_from(payload: QuotePayload) -> Result<Self, Self::Error> {
        let nested = payload.ohlcv;
        let pick = |flat: Option<f64>, inner: fn(&OhlcvPayload) -> Option<f64>| {
            flat.or_else(|| nested.as_ref().and_then(inner))
        };

        let open = pick(payload.open, |o: &OhlcvPayload| o.open);
        let high = pick(payload.high, |o: &OhlcvPayload| o.high);
        let low = pick(payload.low, |o: &OhlcvPayload| o.low);
        let close = pick(payload.close, |o: &OhlcvPayload| o.close);
        let volume = pick(payload.volume, |o: &OhlcvPayload| o.volume);

        Ok(Self {
            ticker: payload.ticker,
            date: payload
                .date
                .ok_or(ValidationError::MissingQuoteField { field: "date" })?,
            open: open.ok_or(ValidationError::MissingQuoteField { field: "open" })?,
            close: close.ok_or(ValidationError::MissingQuoteField { field: "close" })?,
            volume: volume.ok_or(ValidationError::MissingQuoteField { field: "volume" })?,
            high,
            low,
            features: payload.technical_features,
        })
    }
}

/// Feature vector submitted to `/predict`, fields in wire order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub return1: f64,
    pub ma7: f64,
    pub ma21: f64,
    pub std7: f64,
}

impl PredictionInput {
    /// Copy with every non-finite value (and `-0.0`) replaced by `0.0`.
    ///
    /// JSON has no NaN or infinity, so these would otherwise go out as `null`.
    pub fn sanitized(self) -> Self {
        let finite = |value: f64| if value.is_finite() && value != 0.0 { value } else { 0.0 };
        Self {
            open: finite(self.open),
            high: finite(self.high),
            low: finite(self.low),
            close: finite(self.close),
            volume: finite(self.volume),
            return1: finite(self.return1),
            ma7: finite(self.ma7),
            ma21: finite(self.ma21),
            std7: finite(self.std7),
        }
    }
}

/// Model output for a submitted feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_close: f64,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
}

/// Next-session forecast computed server-side from the latest market data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextCloseForecast {
    pub ticker: String,
    pub current_close: f64,
    pub predicted_close: f64,
    pub price_change: f64,
    pub pct_change: f64,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}

/// Daily rows returned by `/history/{ticker}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub ticker: String,
    pub period: String,
    pub interval: String,
    pub data_points: usize,
    pub history: Vec<Quote>,
}

/// Model and scaler information reported by `/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub model: String,
    pub ticker: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler_type: Option<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}
