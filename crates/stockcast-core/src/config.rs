//! Backend address and transport settings.
//!
//! The base URL is always supplied from outside: a flag, the
//! `STOCKCAST_BASE_URL` environment variable, or one of the documented
//! [`DeploymentTarget`] presets.
//!
//! | Target | Base URL | Use |
//! |--------|----------|-----|
//! | `local` | `http://localhost:8000` | backend on the same machine |
//! | `emulator` | `http://10.0.2.2:8000` | host loopback as seen from an Android emulator |
//! | LAN | `http://<host-ip>:8000` | physical device; pass via `--base-url` |

use std::fmt::{Display, Formatter};

use crate::ValidationError;

/// Environment variable consulted when no base URL is given explicitly.
pub const BASE_URL_ENV: &str = "STOCKCAST_BASE_URL";

/// Known places the backend is usually reachable from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeploymentTarget {
    #[default]
    Local,
    AndroidEmulator,
}

impl DeploymentTarget {
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Local => "http://localhost:8000",
            Self::AndroidEmulator => "http://10.0.2.2:8000",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::AndroidEmulator => "emulator",
        }
    }
}

impl Display for DeploymentTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout_ms: Option<u64>,
}

impl ClientConfig {
    /// Validates the scheme and drops trailing slashes.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = base_url.as_ref().trim();
        let lower = raw.to_ascii_lowercase();
        let has_scheme = ["http://", "https://"]
            .iter()
            .any(|scheme| lower.starts_with(scheme) && lower.len() > scheme.len());
        if !has_scheme {
            return Err(ValidationError::InvalidBaseUrl {
                value: raw.to_owned(),
            });
        }

        Ok(Self {
            base_url: raw.trim_end_matches('/').to_owned(),
            timeout_ms: None,
        })
    }

    pub fn for_target(target: DeploymentTarget) -> Self {
        Self {
            base_url: target.base_url().to_owned(),
            timeout_ms: None,
        }
    }

    /// Reads [`BASE_URL_ENV`], falling back to `fallback` when unset or blank.
    pub fn from_env_or(fallback: DeploymentTarget) -> Result<Self, ValidationError> {
        match std::env::var(BASE_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::new(value),
            _ => Ok(Self::for_target(fallback)),
        }
    }

    /// `None` keeps the transport default.
    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Result<Self, ValidationError> {
        if timeout_ms == Some(0) {
            return Err(ValidationError::ZeroTimeout);
        }
        self.timeout_ms = timeout_ms;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }

    /// Joins `path` (with or without a leading slash) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_target(DeploymentTarget::default())
    }
}
