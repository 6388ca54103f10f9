use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default database DSN.
const DEFAULT_DSN: &str = "sqlite://picture_retriever.db";
/// Default cookie-signing secret. Override in any real deployment.
const DEFAULT_COOKIE_SECRET: &str = "PKUx8MRof9YDjI3A";
const DEFAULT_HTTP_ADDR: &str = ":8888";
const DEFAULT_DRAIN_INTERVAL: &str = "1s";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SESSION_MAX_AGE_DAYS: i64 = 30;

/// A configuration value that could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Database DSN (`DSN`).
    pub dsn: String,
    /// Secret used to sign session cookies (`COOKIE_SECRET`).
    pub cookie_secret: String,
    /// Listen address (`HTTP_ADDR`). A leading `:` binds all interfaces.
    pub http_addr: SocketAddr,
    /// TLS certificate and key (`HTTP_CERT_FILE`, `HTTP_KEY_FILE`).
    /// Only set when both are non-empty.
    pub tls: Option<TlsPaths>,
    /// How long in-flight requests may run after a shutdown signal
    /// (`HTTP_DRAIN_INTERVAL`).
    pub drain_interval: Duration,
    /// HTTP request timeout in seconds (`REQUEST_TIMEOUT_SECS`).
    pub request_timeout_secs: u64,
    /// Session cookie lifetime in days (`SESSION_MAX_AGE_DAYS`).
    pub session_max_age_days: i64,
    /// Directory holding `<category>.json` files for bulk loading
    /// (`PICTURES_DIR`).
    pub pictures_dir: PathBuf,
    /// Directory served for unmatched paths (`STATIC_DIR`).
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct TlsPaths {
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                         |
    /// |------------------------|---------------------------------|
    /// | `DSN`                  | `sqlite://picture_retriever.db` |
    /// | `COOKIE_SECRET`        | built-in development secret     |
    /// | `HTTP_ADDR`            | `:8888`                         |
    /// | `HTTP_CERT_FILE`       | (empty)                         |
    /// | `HTTP_KEY_FILE`        | (empty)                         |
    /// | `HTTP_DRAIN_INTERVAL`  | `1s`                            |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                            |
    /// | `SESSION_MAX_AGE_DAYS` | `30`                            |
    /// | `PICTURES_DIR`         | `.`                             |
    /// | `STATIC_DIR`           | `static`                        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let dsn = get("DSN", DEFAULT_DSN);
        let cookie_secret = get("COOKIE_SECRET", DEFAULT_COOKIE_SECRET);
        if cookie_secret.is_empty() {
            return Err(ConfigError::Invalid {
                key: "COOKIE_SECRET",
                value: cookie_secret,
                reason: "must not be empty".into(),
            });
        }

        let http_addr = parse_listen_addr(&get("HTTP_ADDR", DEFAULT_HTTP_ADDR))?;

        let cert_file = get("HTTP_CERT_FILE", "");
        let key_file = get("HTTP_KEY_FILE", "");
        let tls = (!cert_file.is_empty() && !key_file.is_empty()).then(|| TlsPaths {
            cert_file: cert_file.into(),
            key_file: key_file.into(),
        });

        let drain_raw = get("HTTP_DRAIN_INTERVAL", DEFAULT_DRAIN_INTERVAL);
        let drain_interval = parse_duration(&drain_raw).map_err(|reason| ConfigError::Invalid {
            key: "HTTP_DRAIN_INTERVAL",
            value: drain_raw.clone(),
            reason,
        })?;

        let request_timeout_secs = parse_number(
            "REQUEST_TIMEOUT_SECS",
            lookup("REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let session_max_age_days = parse_number(
            "SESSION_MAX_AGE_DAYS",
            lookup("SESSION_MAX_AGE_DAYS"),
            DEFAULT_SESSION_MAX_AGE_DAYS,
        )?;

        Ok(Self {
            dsn,
            cookie_secret,
            http_addr,
            tls,
            drain_interval,
            request_timeout_secs,
            session_max_age_days,
            pictures_dir: get("PICTURES_DIR", ".").into(),
            static_dir: get("STATIC_DIR", "static").into(),
        })
    }
}

/// Parse `host:port` or `:port` (all interfaces).
fn parse_listen_addr(raw: &str) -> Result<SocketAddr, ConfigError> {
    let normalized = match raw.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => raw.to_string(),
    };
    normalized.parse().map_err(|e| ConfigError::Invalid {
        key: "HTTP_ADDR",
        value: raw.to_string(),
        reason: format!("{e}"),
    })
}

fn parse_number<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            })
        }
    }
}

/// Parse a duration such as `500ms`, `1s`, `2m` or `1h`.
///
/// A bare number is taken as seconds.
fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);

    let amount: u64 = digits
        .parse()
        .map_err(|_| "expected a number followed by ms, s, m or h".to_string())?;

    let secs = |factor: u64| {
        amount
            .checked_mul(factor)
            .map(Duration::from_secs)
            .ok_or_else(|| format!("{raw} is too large"))
    };

    match unit {
        "ms" => Ok(Duration::from_millis(amount)),
        "" | "s" => Ok(Duration::from_secs(amount)),
        "m" => secs(60),
        "h" => secs(3600),
        other => Err(format!("unknown duration unit '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.dsn, DEFAULT_DSN);
        assert_eq!(config.cookie_secret, DEFAULT_COOKIE_SECRET);
        assert_eq!(config.http_addr, "0.0.0.0:8888".parse().unwrap());
        assert!(config.tls.is_none());
        assert_eq!(config.drain_interval, Duration::from_secs(1));
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.session_max_age_days, 30);
        assert_eq!(config.pictures_dir, PathBuf::from("."));
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("DSN", "sqlite::memory:"),
            ("HTTP_ADDR", "127.0.0.1:9000"),
            ("HTTP_DRAIN_INTERVAL", "250ms"),
            ("SESSION_MAX_AGE_DAYS", "7"),
        ])
        .unwrap();

        assert_eq!(config.dsn, "sqlite::memory:");
        assert_eq!(config.http_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.drain_interval, Duration::from_millis(250));
        assert_eq!(config.session_max_age_days, 7);
    }

    #[test]
    fn tls_requires_both_paths() {
        let only_cert = config_from(&[("HTTP_CERT_FILE", "cert.pem")]).unwrap();
        assert!(only_cert.tls.is_none());

        let both = config_from(&[("HTTP_CERT_FILE", "cert.pem"), ("HTTP_KEY_FILE", "key.pem")])
            .unwrap();
        let tls = both.tls.expect("tls should be enabled");
        assert_eq!(tls.cert_file, PathBuf::from("cert.pem"));
        assert_eq!(tls.key_file, PathBuf::from("key.pem"));
    }

    #[test]
    fn invalid_values_are_errors() {
        assert_matches!(
            config_from(&[("HTTP_ADDR", "not an address")]),
            Err(ConfigError::Invalid { key: "HTTP_ADDR", .. })
        );
        assert_matches!(
            config_from(&[("HTTP_DRAIN_INTERVAL", "soon")]),
            Err(ConfigError::Invalid { key: "HTTP_DRAIN_INTERVAL", .. })
        );
        assert_matches!(
            config_from(&[("REQUEST_TIMEOUT_SECS", "-1")]),
            Err(ConfigError::Invalid { key: "REQUEST_TIMEOUT_SECS", .. })
        );
        assert_matches!(
            config_from(&[("HTTP_DRAIN_INTERVAL", "18446744073709551615h")]),
            Err(ConfigError::Invalid { key: "HTTP_DRAIN_INTERVAL", .. })
        );
        assert_matches!(
            config_from(&[("COOKIE_SECRET", "")]),
            Err(ConfigError::Invalid { key: "COOKIE_SECRET", .. })
        );
    }

    #[test]
    fn durations() {
        assert_eq!(parse_duration("1s").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_duration("5").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert!(parse_duration("1d").is_err());
        assert!(parse_duration(&format!("{}h", u64::MAX)).is_err());
        assert!(parse_duration(&format!("{}m", u64::MAX / 2)).is_err());
        assert!(parse_duration("").is_err());
    }
}
