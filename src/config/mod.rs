use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

/// Default backend root used when `BACKEND_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendConfig,
    pub request: RequestConfig,
    pub logging: LoggingConfig,
    pub export: ExportConfig,
}

/// Backend service configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
}

/// HTTP request configuration
///
/// There is deliberately no retry setting: every remote call is attempted
/// exactly once and the user re-triggers on failure.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Per-request timeout. `None` lets a hung call stay in flight.
    pub timeout_ms: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Evaluation export configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend = BackendConfig::new(
            env::var("BACKEND_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        )?;

        let request = RequestConfig {
            timeout_ms: match env::var("REQUEST_TIMEOUT_MS") {
                Ok(raw) => parse_timeout(&raw)?,
                Err(_) => None,
            },
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let export = ExportConfig {
            dir: PathBuf::from(env::var("EXPORT_DIR").unwrap_or_else(|_| ".".to_string())),
        };

        Ok(Config {
            backend,
            request,
            logging,
            export,
        })
    }
}

impl BackendConfig {
    /// Validate and normalise a backend root URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');

        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(AppError::Config {
                message: format!("BACKEND_BASE_URL must be an http(s) URL, got '{}'", base_url),
            });
        }

        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl RequestConfig {
    /// Timeout as a [`Duration`], if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

fn parse_timeout(raw: &str) -> Result<Option<u64>, AppError> {
    let ms: u64 = raw.trim().parse().map_err(|_| AppError::Config {
        message: format!("REQUEST_TIMEOUT_MS must be a whole number of milliseconds, got '{}'", raw),
    })?;
    Ok((ms > 0).then_some(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config_trims_trailing_slash() {
        let config = BackendConfig::new("http://localhost:8000/").unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_backend_config_rejects_non_http_url() {
        let err = BackendConfig::new("ftp://example.com").unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
        assert!(err.to_string().contains("ftp://example.com"));
    }

    #[test]
    fn test_parse_timeout_zero_disables() {
        assert_eq!(parse_timeout("0").unwrap(), None);
        assert_eq!(parse_timeout(" 2500 ").unwrap(), Some(2500));
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn test_request_config_default_has_no_timeout() {
        let config = RequestConfig::default();
        assert!(config.timeout().is_none());

        let config = RequestConfig {
            timeout_ms: Some(1500),
        };
        assert_eq!(config.timeout(), Some(Duration::from_millis(1500)));
    }
}
