//! Geographic point type.

use std::fmt;

/// Error returned when caller-supplied coordinates cannot form a [`Point`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPoint {
    /// A coordinate was not supplied at all
    #[error("missing {0}")]
    Missing(&'static str),

    /// A coordinate was supplied but is not a number
    #[error("{field} is not a number: {value:?}")]
    NotNumeric { field: &'static str, value: String },

    /// A coordinate parsed to NaN or infinity
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
}

/// A WGS84 latitude/longitude pair.
///
/// Both components are guaranteed finite. There is no altitude; anything that
/// needs one treats it as zero. No range validation is applied, so a latitude
/// of 91 is accepted and simply fed through the spherical formulas.
///
/// # Examples
///
/// ```
/// use next_train_server::domain::Point;
///
/// let p = Point::parse(Some("39.9566"), Some("-75.1820")).unwrap();
/// assert_eq!(p.latitude(), 39.9566);
///
/// assert!(Point::parse(Some("NaN"), Some("0")).is_err());
/// assert!(Point::parse(None, Some("0")).is_err());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Point {
    latitude: f64,
    longitude: f64,
}

impl Point {
    /// Create a point from numeric components.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidPoint> {
        if !latitude.is_finite() {
            return Err(InvalidPoint::NotFinite("latitude"));
        }
        if !longitude.is_finite() {
            return Err(InvalidPoint::NotFinite("longitude"));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a point from raw text, as received in query strings or bodies.
    ///
    /// Every endpoint funnels its coordinates through here.
    pub fn parse(latitude: Option<&str>, longitude: Option<&str>) -> Result<Self, InvalidPoint> {
        let latitude = parse_component("latitude", latitude)?;
        let longitude = parse_component("longitude", longitude)?;
        Self::new(latitude, longitude)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Whether both components are finite.
    ///
    /// Always true for points built through [`Point::new`]; kept for callers
    /// that want to re-check before a query.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

fn parse_component(field: &'static str, raw: Option<&str>) -> Result<f64, InvalidPoint> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(InvalidPoint::Missing(field))?;

    raw.parse::<f64>().map_err(|_| InvalidPoint::NotNumeric {
        field,
        value: raw.to_string(),
    })
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.latitude, self.longitude)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
