//! GeoJSON road-network provider.
//!
//! Reads a `FeatureCollection` exported from OpenStreetMap (e.g. an osmnx
//! edge/feature dump). Named line features become streets; named point
//! features carrying subway tags become stations. A legacy `crs` member may
//! declare EPSG:3857, in which case coordinates are converted to EPSG:4326.

use super::types::{Crs, NamedStation, NamedStreet};
use super::LoadedNetwork;
use crate::error::{read_source, Error, Result};
use geo::{Coord, LineString, Point};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::f64::consts::PI;
use std::path::Path;

const WEB_MERCATOR_RADIUS: f64 = 6_378_137.0;

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    crs: Option<CrsMember>,
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct CrsMember {
    #[serde(default)]
    properties: Map<String, Value>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    geometry: Option<RawGeometry>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

/// Load and parse a GeoJSON file.
pub fn load(path: &Path) -> Result<LoadedNetwork> {
    let data = read_source(path)?;
    let network = parse(&data)?;
    tracing::info!(
        path = %path.display(),
        streets = network.streets.len(),
        stations = network.stations.len(),
        "loaded road network"
    );
    Ok(network)
}

/// Parse a GeoJSON `FeatureCollection` string.
pub fn parse(data: &str) -> Result<LoadedNetwork> {
    let fc: FeatureCollection = serde_json::from_str(data)
        .map_err(|e| Error::InvalidNetwork(format!("not a FeatureCollection: {}", e)))?;
    let crs = match &fc.crs {
        Some(member) => parse_crs(member)?,
        None => Crs::Wgs84,
    };
    tracing::debug!(%crs, "road network CRS");

    let mut network = LoadedNetwork::default();
    let mut skipped = 0usize;

    for (idx, feature) in fc.features.into_iter().enumerate() {
        let props = feature.properties.unwrap_or_default();
        let Some(name) = feature_name(&props) else {
            skipped += 1;
            continue;
        };
        let Some(geometry) = feature.geometry else {
            skipped += 1;
            continue;
        };

        match geometry.kind.as_str() {
            "LineString" => {
                let line = parse_line(&geometry.coordinates, crs, idx)?;
                network.streets.push(NamedStreet { name, geometry: line });
            }
            "MultiLineString" => {
                let parts = as_array(&geometry.coordinates, idx)?;
                for part in parts {
                    let line = parse_line(part, crs, idx)?;
                    network.streets.push(NamedStreet { name: name.clone(), geometry: line });
                }
            }
            "Point" if is_metro(&props) => {
                let c = parse_position(&geometry.coordinates, crs, idx)?;
                network.stations.push(NamedStation { name, point: Point(c) });
            }
            "MultiPoint" if is_metro(&props) => {
                for pos in as_array(&geometry.coordinates, idx)? {
                    let c = parse_position(pos, crs, idx)?;
                    network.stations.push(NamedStation { name: name.clone(), point: Point(c) });
                }
            }
            other => {
                tracing::debug!(feature = idx, kind = other, "ignoring feature");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "features without a usable name or geometry");
    }
    Ok(network)
}

/// `name` is either a string or, for merged OSM edges, a list of strings.
fn feature_name(props: &Map<String, Value>) -> Option<String> {
    let name = match props.get("name")? {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" "),
        _ => return None,
    };
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn tag<'a>(props: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    props.get(key).and_then(Value::as_str)
}

/// Subway stations and their entrances.
fn is_metro(props: &Map<String, Value>) -> bool {
    tag(props, "station") == Some("subway")
        || (tag(props, "railway") == Some("station") && tag(props, "subway") == Some("yes"))
        || tag(props, "public_transport") == Some("station")
        || tag(props, "railway") == Some("subway_entrance")
}

fn parse_crs(member: &CrsMember) -> Result<Crs> {
    let name = member
        .properties
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("");
    if name.ends_with("4326") || name.ends_with("CRS84") {
        Ok(Crs::Wgs84)
    } else if name.ends_with("3857") || name.ends_with("900913") {
        Ok(Crs::WebMercator)
    } else {
        Err(Error::InvalidNetwork(format!("unsupported CRS '{}'", name)))
    }
}

fn as_array(v: &Value, idx: usize) -> Result<&Vec<Value>> {
    v.as_array()
        .ok_or_else(|| Error::InvalidNetwork(format!("feature {}: coordinates are not an array", idx)))
}

fn parse_position(v: &Value, crs: Crs, idx: usize) -> Result<Coord<f64>> {
    let pos = as_array(v, idx)?;
    let (x, y) = match (pos.first().and_then(Value::as_f64), pos.get(1).and_then(Value::as_f64)) {
        (Some(x), Some(y)) => (x, y),
        _ => {
            return Err(Error::InvalidNetwork(format!(
                "feature {}: position needs two numbers",
                idx
            )))
        }
    };
    Ok(to_wgs84(Coord { x, y }, crs))
}

fn parse_line(v: &Value, crs: Crs, idx: usize) -> Result<LineString<f64>> {
    let coords = as_array(v, idx)?
        .iter()
        .map(|p| parse_position(p, crs, idx))
        .collect::<Result<Vec<_>>>()?;
    if coords.len() < 2 {
        return Err(Error::InvalidNetwork(format!(
            "feature {}: line needs at least two positions",
            idx
        )));
    }
    Ok(LineString::from(coords))
}

/// Convert a coordinate in `crs` to lon/lat degrees.
pub fn to_wgs84(c: Coord<f64>, crs: Crs) -> Coord<f64> {
    match crs {
        Crs::Wgs84 => c,
        Crs::WebMercator => {
            let lon = c.x / WEB_MERCATOR_RADIUS * 180.0 / PI;
            let lat = (2.0 * (c.y / WEB_MERCATOR_RADIUS).exp().atan() - PI / 2.0) * 180.0 / PI;
            Coord { x: lon, y: lat }
        }
    }
}
