//! Server configuration.
//!
//! Every setting has a default and can be overridden by an environment
//! variable of the same name as the constant below.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::domain::Network;
use crate::septa::SeptaConfig;
use crate::service::DEFAULT_MAX_DISTANCE_MILES;

pub const BIND_ADDR: &str = "BIND_ADDR";
pub const REGIONAL_RAIL_STATIONS: &str = "REGIONAL_RAIL_STATIONS";
pub const METRO_STATIONS: &str = "METRO_STATIONS";
pub const SEPTA_BASE_URL: &str = "SEPTA_BASE_URL";
pub const SEPTA_TIMEOUT_SECS: &str = "SEPTA_TIMEOUT_SECS";
pub const SEPTA_MAX_CONCURRENT: &str = "SEPTA_MAX_CONCURRENT";
pub const MAX_STATION_DISTANCE_MILES: &str = "MAX_STATION_DISTANCE_MILES";
pub const ARRIVALS_CACHE_TTL_SECS: &str = "ARRIVALS_CACHE_TTL_SECS";
pub const MOCK_ARRIVALS_DIR: &str = "MOCK_ARRIVALS_DIR";

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST), 3000);
const DEFAULT_REGIONAL_RAIL_STATIONS: &str = "data/Regional_Rail_Stations.geojson";
const DEFAULT_METRO_STATIONS: &str = "data/Metro_Stations_Regional.geojson";

/// A variable was set to something that does not parse.
#[derive(Debug, thiserror::Error)]
#[error("invalid value for {var}: {value:?} ({reason})")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Configuration for the whole server.
///
/// There is no time zone setting. Arrivals feed times are naive local times
/// in Philadelphia (America/New_York) and are compared against the server's
/// local clock, so run the server with `TZ=America/New_York` when the host
/// is in another zone. Otherwise every leave-by verdict is off by the zone
/// difference.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,

    /// GeoJSON file of regional rail stations
    pub regional_rail_stations: PathBuf,

    /// GeoJSON file of metro stations
    pub metro_stations: PathBuf,

    /// Live SEPTA API settings
    pub septa: SeptaConfig,

    /// Search radius for nearest-station queries
    pub max_distance_miles: f64,

    /// Arrivals cache settings
    pub cache: CacheConfig,

    /// Serve arrivals from JSON files here instead of the live API
    pub mock_arrivals_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            regional_rail_stations: PathBuf::from(DEFAULT_REGIONAL_RAIL_STATIONS),
            metro_stations: PathBuf::from(DEFAULT_METRO_STATIONS),
            septa: SeptaConfig::default(),
            max_distance_miles: DEFAULT_MAX_DISTANCE_MILES,
            cache: CacheConfig::default(),
            mock_arrivals_dir: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or blank variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = parse_var(&get, BIND_ADDR)? {
            config = config.with_bind_addr(addr);
        }
        if let Some(path) = get(REGIONAL_RAIL_STATIONS) {
            config = config.with_station_file(Network::RegionalRail, path);
        }
        if let Some(path) = get(METRO_STATIONS) {
            config = config.with_station_file(Network::Metro, path);
        }
        if let Some(url) = get(SEPTA_BASE_URL) {
            config.septa = config.septa.with_base_url(url);
        }
        if let Some(secs) = parse_var(&get, SEPTA_TIMEOUT_SECS)? {
            config.septa = config.septa.with_timeout(secs);
        }
        if let Some(n) = parse_var::<usize>(&get, SEPTA_MAX_CONCURRENT)? {
            if n == 0 {
                return Err(ConfigError {
                    var: SEPTA_MAX_CONCURRENT,
                    value: n.to_string(),
                    reason: "must be at least 1".into(),
                });
            }
            config.septa = config.septa.with_max_concurrent(n);
        }
        if let Some(miles) = parse_var::<f64>(&get, MAX_STATION_DISTANCE_MILES)? {
            if !miles.is_finite() || miles < 0.0 {
                return Err(ConfigError {
                    var: MAX_STATION_DISTANCE_MILES,
                    value: miles.to_string(),
                    reason: "must be a non-negative number".into(),
                });
            }
            config = config.with_max_distance(miles);
        }
        if let Some(secs) = parse_var(&get, ARRIVALS_CACHE_TTL_SECS)? {
            config.cache.ttl = Duration::from_secs(secs);
        }
        if let Some(dir) = get(MOCK_ARRIVALS_DIR) {
            config = config.with_mock_arrivals(dir);
        }

        Ok(config)
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn with_station_file(mut self, network: Network, path: impl Into<PathBuf>) -> Self {
        match network {
            Network::RegionalRail => self.regional_rail_stations = path.into(),
            Network::Metro => self.metro_stations = path.into(),
        }
        self
    }

    /// GeoJSON file for `network`.
    pub fn station_file(&self, network: Network) -> &Path {
        match network {
            Network::RegionalRail => &self.regional_rail_stations,
            Network::Metro => &self.metro_stations,
        }
    }

    pub fn with_max_distance(mut self, miles: f64) -> Self {
        self.max_distance_miles = miles;
        self
    }

    /// Use on-disk mock arrivals instead of the live API.
    pub fn with_mock_arrivals(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mock_arrivals_dir = Some(dir.into());
        self
    }
}

fn parse_var<T>(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = get(var) else {
        return Ok(None);
    };

    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError {
            var,
            reason: e.to_string(),
            value,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = from_vars(&[]).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(
            config.regional_rail_stations,
            PathBuf::from("data/Regional_Rail_Stations.geojson")
        );
        assert_eq!(config.septa.base_url, "https://www3.septa.org/api");
        assert_eq!(config.septa.timeout_secs, 30);
        assert_eq!(config.max_distance_miles, 10.0);
        assert_eq!(config.cache.ttl, Duration::from_secs(30));
        assert!(config.mock_arrivals_dir.is_none());
    }

    #[test]
    fn overrides() {
        let config = from_vars(&[
            (BIND_ADDR, "0.0.0.0:8080"),
            (METRO_STATIONS, "/srv/metro.geojson"),
            (SEPTA_BASE_URL, "http://localhost:9999"),
            (SEPTA_TIMEOUT_SECS, " 5 "),
            (SEPTA_MAX_CONCURRENT, "2"),
            (MAX_STATION_DISTANCE_MILES, "2.5"),
            (ARRIVALS_CACHE_TTL_SECS, "0"),
            (MOCK_ARRIVALS_DIR, "fixtures/arrivals"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.metro_stations, PathBuf::from("/srv/metro.geojson"));
        assert_eq!(config.septa.base_url, "http://localhost:9999");
        assert_eq!(config.septa.timeout_secs, 5);
        assert_eq!(config.septa.max_concurrent, 2);
        assert_eq!(config.max_distance_miles, 2.5);
        assert!(config.cache.ttl.is_zero());
        assert_eq!(
            config.mock_arrivals_dir,
            Some(PathBuf::from("fixtures/arrivals"))
        );
    }

    #[test]
    fn blank_means_default() {
        let config = from_vars(&[(SEPTA_TIMEOUT_SECS, "  "), (MOCK_ARRIVALS_DIR, "")]).unwrap();
        assert_eq!(config.septa.timeout_secs, 30);
        assert!(config.mock_arrivals_dir.is_none());
    }

    #[test]
    fn invalid_values() {
        let err = from_vars(&[(SEPTA_TIMEOUT_SECS, "soon")]).unwrap_err();
        assert_eq!(err.var, SEPTA_TIMEOUT_SECS);
        assert!(err.to_string().starts_with("invalid value for SEPTA_TIMEOUT_SECS: \"soon\""));

        assert!(from_vars(&[(BIND_ADDR, "localhost")]).is_err());
        assert!(from_vars(&[(MAX_STATION_DISTANCE_MILES, "-1")]).is_err());
        assert!(from_vars(&[(MAX_STATION_DISTANCE_MILES, "NaN")]).is_err());
        assert!(from_vars(&[(SEPTA_MAX_CONCURRENT, "0")]).is_err());
    }

    #[test]
    fn builders() {
        let config = ServerConfig::default()
            .with_station_file(Network::RegionalRail, "a.geojson")
            .with_station_file(Network::Metro, "b.geojson")
            .with_max_distance(1.0)
            .with_mock_arrivals("mock");
        assert_eq!(config.station_file(Network::RegionalRail), Path::new("a.geojson"));
        assert_eq!(config.station_file(Network::Metro), Path::new("b.geojson"));
        assert_eq!(config.max_distance_miles, 1.0);
        assert_eq!(config.mock_arrivals_dir, Some(PathBuf::from("mock")));
    }
}
