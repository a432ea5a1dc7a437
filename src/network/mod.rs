//! Road-network collaborator: the source of named streets and stations.
//!
//! The gazetteer only needs two flat lists, so anything that can produce them
//! (a GeoJSON export, a fixture in a test) implements [`RoadNetwork`].

pub mod geojson;
pub mod types;

pub use types::{Crs, GeoPoint, NamedStation, NamedStreet};

/// Supplies named geometries in EPSG:4326 (x = lon, y = lat).
pub trait RoadNetwork {
    fn named_streets(&self) -> Vec<NamedStreet>;
    fn named_stations(&self) -> Vec<NamedStation>;
}

/// A fully materialized road network.
#[derive(Debug, Clone, Default)]
pub struct LoadedNetwork {
    pub streets: Vec<NamedStreet>,
    pub stations: Vec<NamedStation>,
}

impl RoadNetwork for LoadedNetwork {
    fn named_streets(&self) -> Vec<NamedStreet> {
        self.streets.clone()
    }

    fn named_stations(&self) -> Vec<NamedStation> {
        self.stations.clone()
    }
}
