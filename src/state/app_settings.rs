use cricket_api::client::{ASSETS_URL, ApiConfig, GNEWS_URL, SPORTMONKS_URL};
use log::warn;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3001;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const PLAYERS_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub port: u16,
    pub api: ApiConfig,
    pub players_ttl: Duration,
}

impl AppSettings {
    /// Read settings from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = var("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let timeout = var("CRICKET_HTTP_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let sportmonks_token = var("SPORTMONKS_API_KEY").unwrap_or_else(|| {
            warn!("SPORTMONKS_API_KEY is not set; fixture routes will be rejected upstream");
            String::new()
        });
        let gnews_key = var("GNEWS_API_KEY").unwrap_or_else(|| {
            warn!("GNEWS_API_KEY is not set; /api/news will be rejected upstream");
            String::new()
        });

        let mut assets_url = var("CRICKET_ASSETS_URL").unwrap_or_else(|| ASSETS_URL.into());
        if !assets_url.ends_with('/') {
            assets_url.push('/');
        }

        Self {
            port,
            api: ApiConfig {
                sportmonks_url: var("CRICKET_SPORTMONKS_URL")
                    .unwrap_or_else(|| SPORTMONKS_URL.into()),
                sportmonks_token,
                gnews_url: var("CRICKET_GNEWS_URL").unwrap_or_else(|| GNEWS_URL.into()),
                gnews_key,
                assets_url,
                timeout: Duration::from_secs(timeout),
            },
            players_ttl: PLAYERS_TTL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> AppSettings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let s = settings(&[]);
        assert_eq!(s.port, DEFAULT_PORT);
        assert_eq!(s.api.sportmonks_url, SPORTMONKS_URL);
        assert_eq!(s.api.assets_url, ASSETS_URL);
        assert!(s.api.sportmonks_token.is_empty());
        assert_eq!(s.api.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(s.players_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn environment_overrides() {
        let s = settings(&[
            ("PORT", "8080"),
            ("SPORTMONKS_API_KEY", "abc"),
            ("GNEWS_API_KEY", "def"),
            ("CRICKET_ASSETS_URL", "http://localhost:9000/assets"),
            ("CRICKET_HTTP_TIMEOUT_SECS", "3"),
        ]);
        assert_eq!(s.port, 8080);
        assert_eq!(s.api.sportmonks_token, "abc");
        assert_eq!(s.api.gnews_key, "def");
        assert_eq!(s.api.assets_url, "http://localhost:9000/assets/");
        assert_eq!(s.api.timeout, Duration::from_secs(3));
    }

    #[test]
    fn unparseable_port_falls_back() {
        assert_eq!(settings(&[("PORT", "http")]).port, DEFAULT_PORT);
        assert_eq!(settings(&[("PORT", "  ")]).port, DEFAULT_PORT);
    }
}
