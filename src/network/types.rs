//! Core types shared by the road-network loader, gazetteer and resolver.

use geo::{Coord, LineString, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS84 coordinate in degrees. Latitude first, as the dataset stores it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn from_coord(c: Coord<f64>) -> Self {
        Self { lat: c.y, lon: c.x }
    }

    /// Map-query link with 6 decimal places.
    pub fn map_link(&self) -> String {
        format!("https://www.google.com/maps?q={:.6},{:.6}", self.lat, self.lon)
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(p: Point<f64>) -> Self {
        Self::from_coord(p.0)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

/// One named street polyline as delivered by the road network.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedStreet {
    pub name: String,
    pub geometry: LineString<f64>,
}

/// One named station point (a station node or one of its entrances).
#[derive(Debug, Clone, PartialEq)]
pub struct NamedStation {
    pub name: String,
    pub point: Point<f64>,
}

/// Coordinate reference systems the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crs {
    /// EPSG:4326 / OGC CRS84, degrees.
    Wgs84,
    /// EPSG:3857 spherical Web Mercator, meters.
    WebMercator,
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wgs84 => write!(f, "EPSG:4326"),
            Self::WebMercator => write!(f, "EPSG:3857"),
        }
    }
}
