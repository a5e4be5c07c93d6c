//! Request/response client for the quote and prediction backend.
//!
//! Every operation is a single attempt. The backend reports failures as a
//! JSON body with an `error` field (usually with status 200), so the body is
//! inspected for that field before the status code or the typed shape.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::form::PredictionForm;
use crate::http_client::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::{
    ApiError, NextCloseForecast, PredictionInput, PredictionResult, PriceHistory, Quote,
    ServiceStatus, Ticker,
};

/// Query parameters for `/history/{ticker}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub period: String,
    pub interval: String,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            period: String::from("1mo"),
            interval: String::from("1d"),
        }
    }
}

/// Stateless API client; cloning shares the transport.
#[derive(Clone)]
pub struct StockApiClient {
    config: ClientConfig,
    http_client: Arc<dyn HttpClient>,
}

impl StockApiClient {
    /// Client over the default reqwest transport.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport =
            ReqwestHttpClient::new().map_err(|error| ApiError::transport(error.message()))?;
        Ok(Self::with_http_client(config, Arc::new(transport)))
    }

    pub fn with_http_client(config: ClientConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET /latest/{ticker}`
    pub async fn fetch_latest(&self, ticker: &Ticker) -> Result<Quote, ApiError> {
        let url = self.config.endpoint(&format!("latest/{}", ticker.encoded()));
        self.send(HttpRequest::get(url)).await
    }

    /// `POST /predict` with the nine-field feature vector. Non-finite values
    /// are sent as `0.0`.
    pub async fn predict(&self, input: &PredictionInput) -> Result<PredictionResult, ApiError> {
        let body = serde_json::to_string(&input.sanitized())
            .map_err(|error| ApiError::transport(format!("failed to encode request: {error}")))?;
        let request = HttpRequest::post(self.config.endpoint("predict")).with_json_body(body);
        self.send(request).await
    }

    /// Coerces the raw form and submits it to `/predict`.
    pub async fn predict_form(&self, form: &PredictionForm) -> Result<PredictionResult, ApiError> {
        for field in form.defaulted_fields() {
            tracing::warn!(
                field = field.as_str(),
                raw = form.get(field),
                "non-numeric input submitted as 0"
            );
        }
        self.predict(&form.to_input()).await
    }

    /// `POST /predict-next?ticker=`; the backend pulls the market data itself.
    pub async fn predict_next(&self, ticker: &Ticker) -> Result<NextCloseForecast, ApiError> {
        let url = format!(
            "{}?ticker={}",
            self.config.endpoint("predict-next"),
            ticker.encoded()
        );
        self.send(HttpRequest::post(url)).await
    }

    /// `GET /history/{ticker}?period=&interval=`
    pub async fn history(
        &self,
        ticker: &Ticker,
        query: &HistoryQuery,
    ) -> Result<PriceHistory, ApiError> {
        let url = format!(
            "{}?period={}&interval={}",
            self.config.endpoint(&format!("history/{}", ticker.encoded())),
            urlencoding::encode(query.period.trim()),
            urlencoding::encode(query.interval.trim()),
        );
        self.send(HttpRequest::get(url)).await
    }

    /// `GET /status`
    pub async fn status(&self) -> Result<ServiceStatus, ApiError> {
        self.send(HttpRequest::get(self.config.endpoint("status")))
            .await
    }

    async fn send<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let request = request.with_timeout_ms(self.config.timeout_ms());
        let method = request.method.as_str();
        let url = request.url.clone();
        tracing::debug!(method, url = %url, "sending request");

        let response = self.http_client.execute(request).await.map_err(|error| {
            tracing::warn!(method, url = %url, kind = ?error.kind(), error = %error, "transport failure");
            ApiError::transport(error.message())
        })?;

        decode_response(&response).inspect_err(|error| {
            tracing::warn!(method, url = %url, code = error.code(), error = %error, "request failed");
        })
    }
}

/// Applies the backend's error-field convention, then the typed contract.
pub fn decode_response<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    let status = response.status;
    let value: Value = serde_json::from_str(&response.body).map_err(|error| {
        ApiError::transport(format!("malformed response (status {status}): {error}"))
    })?;

    if let Some(message) = value.get("error").and_then(error_message) {
        return Err(ApiError::api(message));
    }

    if !response.is_success() {
        return Err(ApiError::transport(format!(
            "backend returned status {status}"
        )));
    }

    serde_json::from_value(value)
        .map_err(|error| ApiError::transport(format!("unexpected response shape: {error}")))
}

/// Message for a truthy `error` value; falsy values (`null`, `""`, `false`,
/// `0`) do not count as an error.
fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    use super::*;
    use crate::form::FormField;
    use crate::http_client::{HttpError, HttpMethod};

    struct RecordingHttpClient {
        responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl RecordingHttpClient {
        fn replying(responses: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into_iter().rev().collect()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for RecordingHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self
                .responses
                .lock()
                .expect("response queue should not be poisoned")
                .pop()
                .unwrap_or_else(|| Err(HttpError::connect("no scripted response")));
            Box::pin(async move { response })
        }
    }

    fn client_for(http: Arc<RecordingHttpClient>) -> StockApiClient {
        let config = ClientConfig::new("http://10.0.2.2:8000/").expect("valid base url");
        StockApiClient::with_http_client(config, http)
    }

    fn ticker(raw: &str) -> Ticker {
        Ticker::parse(raw).expect("valid ticker")
    }

    #[tokio::test]
    async fn fetch_latest_targets_ticker_path() {
        let http = RecordingHttpClient::replying(vec![Ok(HttpResponse::ok_json(
            r#"{"date":"2024-05-02","open":17800,"close":17950,"volume":412300}"#,
        ))]);
        let client = client_for(http.clone());

        let quote = client
            .fetch_latest(&ticker("ggrm.jk"))
            .await
            .expect("quote should decode");

        assert_eq!(quote.close, 17_950.0);
        let requests = http.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].url, "http://10.0.2.2:8000/latest/GGRM.JK");
        assert_eq!(requests[0].body, None);
    }

    #[tokio::test]
    async fn error_field_wins_over_quote_shape() {
        let http = RecordingHttpClient::replying(vec![Ok(HttpResponse::ok_json(
            r#"{"error":"No data found for ZZZZ.JK","ticker":"ZZZZ.JK"}"#,
        ))]);
        let client = client_for(http);

        let error = client
            .fetch_latest(&ticker("ZZZZ.JK"))
            .await
            .expect_err("error body must not decode as a quote");

        assert_eq!(error, ApiError::api("No data found for ZZZZ.JK"));
    }

    #[tokio::test]
    async fn predict_posts_json_with_every_field() {
        let http = RecordingHttpClient::replying(vec![Ok(HttpResponse::ok_json(
            r#"{"predicted_close":9.7,"timestamp":"2024-05-02T10:15:00"}"#,
        ))]);
        let client = client_for(http.clone());
        let form = PredictionForm::default()
            .with(FormField::Open, "10")
            .with(FormField::Low, "9")
            .with(FormField::Close, "9.5")
            .with(FormField::Volume, "1000");

        let result = client.predict_form(&form).await.expect("prediction");
        assert_eq!(result.predicted_close, 9.7);

        let request = &http.recorded_requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "http://10.0.2.2:8000/predict");
        assert_eq!(
            request.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        let body: Value =
            serde_json::from_str(request.body.as_deref().expect("body")).expect("json body");
        assert_eq!(
            body,
            serde_json::json!({
                "open": 10.0, "high": 0.0, "low": 9.0, "close": 9.5, "volume": 1000.0,
                "return1": 0.0, "ma7": 0.0, "ma21": 0.0, "std7": 0.0
            })
        );
    }

    #[tokio::test]
    async fn predict_sends_non_finite_values_as_zero() {
        let http = RecordingHttpClient::replying(vec![Ok(HttpResponse::ok_json(
            r#"{"predicted_close":9.7,"timestamp":"2024-05-02T10:15:00"}"#,
        ))]);
        let client = client_for(http.clone());
        let input = PredictionInput {
            open: f64::NAN,
            high: f64::INFINITY,
            close: 9.5,
            ..PredictionInput::default()
        };

        client.predict(&input).await.expect("prediction");

        let request = &http.recorded_requests()[0];
        let body: Value =
            serde_json::from_str(request.body.as_deref().expect("body")).expect("json body");
        assert_eq!(
            body,
            serde_json::json!({
                "open": 0.0, "high": 0.0, "low": 0.0, "close": 9.5, "volume": 0.0,
                "return1": 0.0, "ma7": 0.0, "ma21": 0.0, "std7": 0.0
            })
        );
    }

    #[tokio::test]
    async fn fetch_latest_percent_encodes_index_and_currency_symbols() {
        let http = RecordingHttpClient::replying(vec![
            Ok(HttpResponse::ok_json(
                r#"{"date":"2024-05-02","open":7100,"close":7120,"volume":0}"#,
            )),
            Ok(HttpResponse::ok_json(
                r#"{"date":"2024-05-02","open":16200,"close":16210,"volume":0}"#,
            )),
        ]);
        let client = client_for(http.clone());

        client
            .fetch_latest(&ticker("^JKSE"))
            .await
            .expect("index quote should decode");
        client
            .fetch_latest(&ticker("idr=x"))
            .await
            .expect("currency quote should decode");

        let requests = http.recorded_requests();
        assert_eq!(requests[0].url, "http://10.0.2.2:8000/latest/%5EJKSE");
        assert_eq!(requests[1].url, "http://10.0.2.2:8000/latest/IDR%3DX");
    }

    #[tokio::test]
    async fn transport_failure_surfaces_as_transport_error() {
        let http = RecordingHttpClient::replying(vec![Err(HttpError::connect(
            "connection failed: connection refused",
        ))]);
        let client = client_for(http);

        let error = client.status().await.expect_err("must fail");
        assert!(error.is_transport());
        assert!(error.message().contains("connection refused"));
    }

    #[tokio::test]
    async fn history_encodes_query_parameters() {
        let http = RecordingHttpClient::replying(vec![Ok(HttpResponse::ok_json(
            r#"{"ticker":"GGRM.JK","period":"3mo","interval":"1d","data_points":0,"history":[]}"#,
        ))]);
        let client = client_for(http.clone());
        let query = HistoryQuery {
            period: String::from("3mo"),
            ..HistoryQuery::default()
        };

        let history = client
            .history(&Ticker::default(), &query)
            .await
            .expect("history should decode");

        assert!(history.history.is_empty());
        assert_eq!(
            http.recorded_requests()[0].url,
            "http://10.0.2.2:8000/history/GGRM.JK?period=3mo&interval=1d"
        );
    }

    #[tokio::test]
    async fn predict_next_sends_ticker_as_query() {
        let http = RecordingHttpClient::replying(vec![Ok(HttpResponse::ok_json(
            r#"{"ticker":"GGRM.JK","current_close":100.0,"predicted_close":102.0,
                "price_change":2.0,"pct_change":2.0,"timestamp":"2024-05-02T10:15:00",
                "last_update":"2024-05-01"}"#,
        ))]);
        let client = client_for(http.clone());

        let forecast = client
            .predict_next(&Ticker::default())
            .await
            .expect("forecast should decode");

        assert_eq!(forecast.last_update.as_deref(), Some("2024-05-01"));
        let request = &http.recorded_requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.url,
            "http://10.0.2.2:8000/predict-next?ticker=GGRM.JK"
        );
    }

    #[test]
    fn falsy_error_values_are_not_errors() {
        let quote: Quote = decode_response(&HttpResponse::ok_json(
            r#"{"error":"","date":"2024-05-02","open":1,"close":2,"volume":3}"#,
        ))
        .expect("empty error string is falsy");
        assert_eq!(quote.open, 1.0);

        let error =
            decode_response::<Quote>(&HttpResponse::ok_json(r#"{"error":{"detail":"boom"}}"#))
                .expect_err("object error is truthy");
        assert_eq!(error.message(), r#"{"detail":"boom"}"#);
    }

    #[test]
    fn non_json_and_non_2xx_bodies_are_transport_errors() {
        let error = decode_response::<Quote>(&HttpResponse::with_status(
            502,
            "<html>Bad Gateway</html>",
        ))
        .expect_err("html");
        assert!(error.is_transport());
        assert!(error.message().contains("status 502"));

        let error =
            decode_response::<Quote>(&HttpResponse::with_status(500, r#"{"detail":"Internal"}"#))
                .expect_err("5xx");
        assert_eq!(error, ApiError::transport("backend returned status 500"));
    }

    #[test]
    fn error_field_is_honoured_on_non_2xx_status() {
        let error = decode_response::<ServiceStatus>(&HttpResponse::with_status(
            422,
            r#"{"error":"bad input"}"#,
        ))
        .expect_err("422");
        assert_eq!(error, ApiError::api("bad input"));
    }
}
