use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Longest TTL the cache builder accepts (1000 years).
pub const MAX_CACHE_TTL_SECS: u64 = 1_000 * 365 * 24 * 3600;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub weather_api_url: String,
    pub weather_hourly_variables: String,
    pub cache_ttl_secs: u64,
    pub upstream_timeout_secs: Option<u64>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cache_ttl_secs = parse_or(&lookup, "CACHE_TTL_SECS", 600)?;
        if cache_ttl_secs > MAX_CACHE_TTL_SECS {
            return Err(anyhow::anyhow!(
                "CACHE_TTL_SECS is out of range: {} (max {})",
                cache_ttl_secs,
                MAX_CACHE_TTL_SECS
            ));
        }

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8000)?,
            weather_api_url: lookup("WEATHER_API_URL")
                .unwrap_or_else(|| "https://api.open-meteo.com/v1/forecast".to_string()),
            weather_hourly_variables: lookup("WEATHER_HOURLY_VARIABLES")
                .unwrap_or_else(|| "temperature_2m,precipitation".to_string()),
            cache_ttl_secs,
            upstream_timeout_secs: lookup("UPSTREAM_TIMEOUT_SECS")
                .map(|raw| {
                    raw.parse()
                        .map_err(|_| anyhow::anyhow!("UPSTREAM_TIMEOUT_SECS is not a number: {}", raw))
                })
                .transpose()?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{} is not a valid value: {}", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.weather_api_url, "https://api.open-meteo.com/v1/forecast");
        assert_eq!(config.weather_hourly_variables, "temperature_2m,precipitation");
        assert_eq!(config.cache_ttl(), Duration::from_secs(600));
        assert!(config.upstream_timeout().is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9090"),
            ("CACHE_TTL_SECS", "5"),
            ("UPSTREAM_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.cache_ttl(), Duration::from_secs(5));
        assert_eq!(config.upstream_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_malformed_numbers_are_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("PORT", "eighty")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("CACHE_TTL_SECS", "-1")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("UPSTREAM_TIMEOUT_SECS", "soon")])).is_err());
    }

    #[test]
    fn test_cache_ttl_upper_bound() {
        let max = MAX_CACHE_TTL_SECS.to_string();
        let config = Config::from_lookup(lookup_from(&[("CACHE_TTL_SECS", max.as_str())])).unwrap();
        assert_eq!(config.cache_ttl_secs, MAX_CACHE_TTL_SECS);

        let over = (MAX_CACHE_TTL_SECS + 1).to_string();
        assert!(Config::from_lookup(lookup_from(&[("CACHE_TTL_SECS", over.as_str())])).is_err());
        assert!(
            Config::from_lookup(lookup_from(&[("CACHE_TTL_SECS", "18446744073709551615")])).is_err()
        );
    }
}
