//! Stations and the networks they belong to.

use std::fmt;
use std::str::FromStr;

use super::Point;

/// Error returned when parsing an unknown network name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network {0:?}: expected \"regional-rail\" or \"metro\"")]
pub struct UnknownNetwork(String);

/// A transit network with its own station dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// SEPTA Regional Rail
    RegionalRail,
    /// DC Metro
    Metro,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::RegionalRail => "regional-rail",
            Network::Metro => "metro",
        }
    }
}

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regional-rail" | "septa" => Ok(Network::RegionalRail),
            "metro" | "dcmetro" => Ok(Network::Metro),
            other => Err(UnknownNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A station with an identity, a display name and a location.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Network-specific identity (SEPTA stop id, Metro GIS id)
    pub id: String,
    /// Human-readable name
    pub display_name: String,
    pub location: Point,
}

impl Station {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, location: Point) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            location,
        }
    }
}

/// The stations of one network, in load order.
///
/// Order is significant: nearest-station ties resolve to the earliest entry.
/// Loaders refuse to produce an empty set, but the type itself allows one so
/// that queries can report it rather than panic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationSet {
    stations: Vec<Station>,
}

impl StationSet {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    pub fn as_slice(&self) -> &[Station] {
        &self.stations
    }

    pub fn get(&self, index: usize) -> Option<&Station> {
        self.stations.get(index)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }
}

impl FromIterator<Station> for StationSet {
    fn from_iter<I: IntoIterator<Item = Station>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str, lat: f64, lon: f64) -> Station {
        Station::new(id, format!("Station {id}"), Point::new(lat, lon).unwrap())
    }

    #[test]
    fn network_parse() {
        assert_eq!("regional-rail".parse(), Ok(Network::RegionalRail));
        assert_eq!("septa".parse(), Ok(Network::RegionalRail));
        assert_eq!("metro".parse(), Ok(Network::Metro));
        assert_eq!("dcmetro".parse(), Ok(Network::Metro));
        assert!("subway".parse::<Network>().is_err());
        assert!("Metro".parse::<Network>().is_err());
    }

    #[test]
    fn network_display_roundtrip() {
        for n in [Network::RegionalRail, Network::Metro] {
            assert_eq!(n.to_string().parse(), Ok(n));
        }
    }

    #[test]
    fn station_set_preserves_order() {
        let set: StationSet = vec![station("b", 1.0, 1.0), station("a", 0.0, 0.0)]
            .into_iter()
            .collect();

        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        assert_eq!(set.get(0).map(|s| s.id.as_str()), Some("b"));
        assert_eq!(set.get(1).map(|s| s.id.as_str()), Some("a"));
        assert!(set.get(2).is_none());

        let ids: Vec<_> = set.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn empty_set() {
        let set = StationSet::default();
        assert!(set.is_empty());
        assert_eq!(set.as_slice().len(), 0);
    }
}
