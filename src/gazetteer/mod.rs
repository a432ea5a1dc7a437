//! The gazetteer: lemmatized street and station names mapped to geometry.
//!
//! Built once from a [`RoadNetwork`](crate::network::RoadNetwork) and never
//! mutated afterwards. All lookups take `&self`.

pub mod builder;

pub use builder::GazetteerBuilder;

use crate::network::RoadNetwork;
use crate::text::Lemmatizer;
use geo::{MultiLineString, MultiPoint};
use serde::Serialize;
use std::collections::BTreeMap;

/// Which half of the gazetteer a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Streets,
    Stations,
}

#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    streets: BTreeMap<String, MultiLineString<f64>>,
    stations: BTreeMap<String, MultiPoint<f64>>,
}

/// Entry counts, for logs and the `/api/gazetteer` endpoint.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GazetteerStats {
    pub street_names: usize,
    pub street_segments: usize,
    pub station_names: usize,
    pub station_points: usize,
}

impl Gazetteer {
    /// Lemmatize every name the network provides and merge equal names.
    pub fn build(network: &dyn RoadNetwork, lemmatizer: &Lemmatizer) -> Self {
        let mut builder = GazetteerBuilder::new(lemmatizer);
        for street in network.named_streets() {
            builder.add_street(&street.name, street.geometry);
        }
        for station in network.named_stations() {
            builder.add_station(&station.name, station.point);
        }
        let gazetteer = builder.finish();
        let stats = gazetteer.stats();
        tracing::info!(
            street_names = stats.street_names,
            station_names = stats.station_names,
            "gazetteer built"
        );
        gazetteer
    }

    pub(crate) fn from_parts(
        streets: BTreeMap<String, MultiLineString<f64>>,
        stations: BTreeMap<String, MultiPoint<f64>>,
    ) -> Self {
        Self { streets, stations }
    }

    /// Exact membership test against lemmatized names.
    pub fn contains(&self, partition: Partition, name: &str) -> bool {
        match partition {
            Partition::Streets => self.streets.contains_key(name),
            Partition::Stations => self.stations.contains_key(name),
        }
    }

    /// Street entries whose name contains `fragment`, case-insensitively.
    pub fn streets_containing<'a>(
        &'a self,
        fragment: &str,
    ) -> impl Iterator<Item = (&'a str, &'a MultiLineString<f64>)> + 'a {
        let needle = fragment.to_lowercase();
        self.streets
            .iter()
            .filter(move |(name, _)| name.to_lowercase().contains(&needle))
            .map(|(name, geom)| (name.as_str(), geom))
    }

    /// Station entries whose name contains `fragment`, case-insensitively.
    pub fn stations_containing<'a>(
        &'a self,
        fragment: &str,
    ) -> impl Iterator<Item = (&'a str, &'a MultiPoint<f64>)> + 'a {
        let needle = fragment.to_lowercase();
        self.stations
            .iter()
            .filter(move |(name, _)| name.to_lowercase().contains(&needle))
            .map(|(name, geom)| (name.as_str(), geom))
    }

    pub fn street_names(&self) -> impl Iterator<Item = &str> {
        self.streets.keys().map(String::as_str)
    }

    pub fn station_names(&self) -> impl Iterator<Item = &str> {
        self.stations.keys().map(String::as_str)
    }

    pub fn stats(&self) -> GazetteerStats {
        GazetteerStats {
            street_names: self.streets.len(),
            street_segments: self.streets.values().map(|m| m.0.len()).sum(),
            station_names: self.stations.len(),
            station_points: self.stations.values().map(|m| m.0.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{LoadedNetwork, NamedStation, NamedStreet};
    use crate::text::IdentityAnalyzer;
    use geo::{line_string, point};
    use std::sync::Arc;

    fn network() -> LoadedNetwork {
        LoadedNetwork {
            streets: vec![
                NamedStreet {
                    name: "Садовая улица".into(),
                    geometry: line_string![(x: 30.36, y: 59.92), (x: 30.36, y: 59.93)],
                },
                NamedStreet {
                    name: "Садовая улица".into(),
                    geometry: line_string![(x: 30.36, y: 59.93), (x: 30.36, y: 59.94)],
                },
                NamedStreet {
                    name: "Большая Садовая улица".into(),
                    geometry: line_string![(x: 30.40, y: 59.90), (x: 30.41, y: 59.90)],
                },
                NamedStreet {
                    name: "!!!".into(),
                    geometry: line_string![(x: 30.0, y: 59.0), (x: 30.1, y: 59.0)],
                },
            ],
            stations: vec![
                NamedStation { name: "Маяковская".into(), point: point!(x: 30.355, y: 59.931) },
                NamedStation { name: "Маяковская".into(), point: point!(x: 30.354, y: 59.932) },
            ],
        }
    }

    fn build() -> Gazetteer {
        let lemmatizer = Lemmatizer::new(Arc::new(IdentityAnalyzer));
        Gazetteer::build(&network(), &lemmatizer)
    }

    #[test]
    fn test_duplicate_names_merge() {
        let g = build();
        let stats = g.stats();
        assert_eq!(stats.street_names, 2);
        assert_eq!(stats.street_segments, 3);
        assert_eq!(stats.station_names, 1);
        assert_eq!(stats.station_points, 2);
    }

    #[test]
    fn test_exact_contains() {
        let g = build();
        assert!(g.contains(Partition::Streets, "садов улиц"));
        assert!(!g.contains(Partition::Streets, "садов"));
        assert!(g.contains(Partition::Stations, "маяковск"));
        assert!(!g.contains(Partition::Streets, "маяковск"));
    }

    #[test]
    fn test_substring_lookup() {
        let g = build();
        let hits: Vec<_> = g.streets_containing("САДОВ").map(|(n, _)| n).collect();
        assert_eq!(hits, vec!["больш садов улиц", "садов улиц"]);
        assert_eq!(g.stations_containing("маяк").count(), 1);
        assert_eq!(g.stations_containing("невск").count(), 0);
    }

    #[test]
    fn test_unnamed_after_lemmatization_skipped() {
        let g = build();
        assert!(g.street_names().all(|n| !n.is_empty()));
    }
}
