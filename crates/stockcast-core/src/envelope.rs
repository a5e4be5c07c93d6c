use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::ApiError;

pub const SCHEMA_VERSION: &str = "v1.0.0";

/// Standard wrapper for machine-readable `stockcast` output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EnvelopeError>,
}

impl<T> Envelope<T> {
    pub fn success(meta: EnvelopeMeta, data: T) -> Self {
        Self {
            meta,
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn failure(meta: EnvelopeMeta, error: EnvelopeError) -> Self {
        Self {
            meta,
            data: None,
            errors: vec![error],
        }
    }

    /// Wraps a client call outcome.
    pub fn from_result(meta: EnvelopeMeta, result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self::success(meta, data),
            Err(error) => Self::failure(meta, EnvelopeError::from(&error)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub schema_version: String,
    pub generated_at: String,
    pub endpoint: String,
    pub base_url: String,
    pub latency_ms: u64,
}

impl EnvelopeMeta {
    pub fn new(endpoint: impl Into<String>, base_url: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            schema_version: String::from(SCHEMA_VERSION),
            generated_at: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z")),
            endpoint: endpoint.into(),
            base_url: base_url.into(),
            latency_ms,
        }
    }
}

/// Structured error entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub code: String,
    pub message: String,
}

impl From<&ApiError> for EnvelopeError {
    fn from(error: &ApiError) -> Self {
        Self {
            code: String::from(error.code()),
            message: error.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> EnvelopeMeta {
        EnvelopeMeta::new("latest", "http://localhost:8000", 12)
    }

    #[test]
    fn meta_carries_request_id_and_schema() {
        let meta = meta();
        assert_eq!(meta.schema_version, SCHEMA_VERSION);
        assert_eq!(meta.request_id.len(), 36);
        assert!(meta.generated_at.ends_with('Z'));
    }

    #[test]
    fn api_failure_becomes_error_entry() {
        let envelope: Envelope<()> =
            Envelope::from_result(meta(), Err(ApiError::api("Prediction failed")));

        assert!(!envelope.is_success());
        assert_eq!(envelope.data, None);
        assert_eq!(
            envelope.errors,
            vec![EnvelopeError {
                code: String::from("api.error"),
                message: String::from("Prediction failed"),
            }]
        );
    }

    #[test]
    fn meta_records_call_site_and_latency() {
        let meta = EnvelopeMeta::new("predict", "http://10.0.2.2:8000", 340);
        assert_eq!(meta.endpoint, "predict");
        assert_eq!(meta.base_url, "http://10.0.2.2:8000");
        assert_eq!(meta.latency_ms, 340);
        assert_ne!(meta.request_id, EnvelopeMeta::new("predict", "", 0).request_id);
    }

    #[test]
    fn transport_failure_keeps_its_code() {
        let envelope: Envelope<()> =
            Envelope::from_result(meta(), Err(ApiError::transport("connection refused")));
        assert_eq!(envelope.errors[0].code, "api.transport");
        assert_eq!(envelope.errors[0].message, "connection refused");
    }
}
