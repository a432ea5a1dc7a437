//! One-shot gazetteer construction.

use super::Gazetteer;
use crate::text::Lemmatizer;
use geo::{LineString, MultiLineString, MultiPoint, Point};
use std::collections::BTreeMap;

/// Accumulates lemmatized entries; consumed by [`GazetteerBuilder::finish`].
pub struct GazetteerBuilder<'a> {
    lemmatizer: &'a Lemmatizer,
    streets: BTreeMap<String, MultiLineString<f64>>,
    stations: BTreeMap<String, MultiPoint<f64>>,
    skipped: usize,
}

impl<'a> GazetteerBuilder<'a> {
    pub fn new(lemmatizer: &'a Lemmatizer) -> Self {
        Self {
            lemmatizer,
            streets: BTreeMap::new(),
            stations: BTreeMap::new(),
            skipped: 0,
        }
    }

    /// Add a street segment; segments with the same lemmatized name are unioned.
    pub fn add_street(&mut self, raw_name: &str, line: LineString<f64>) {
        let name = self.lemmatizer.lemmatize_name(&[raw_name]);
        if name.is_empty() {
            self.skipped += 1;
            return;
        }
        self.streets
            .entry(name)
            .or_insert_with(|| MultiLineString::new(Vec::new()))
            .0
            .push(line);
    }

    /// Add a station node or entrance.
    pub fn add_station(&mut self, raw_name: &str, point: Point<f64>) {
        let name = self.lemmatizer.lemmatize_name(&[raw_name]);
        if name.is_empty() {
            self.skipped += 1;
            return;
        }
        self.stations
            .entry(name)
            .or_insert_with(|| MultiPoint::new(Vec::new()))
            .0
            .push(point);
    }

    pub fn finish(self) -> Gazetteer {
        if self.skipped > 0 {
            tracing::warn!(skipped = self.skipped, "names empty after lemmatization");
        }
        Gazetteer::from_parts(self.streets, self.stations)
    }
}
