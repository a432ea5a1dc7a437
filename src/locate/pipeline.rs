//! Sentence-level aggregation: text in, prediction out.

use super::resolver::{Crossing, Prediction, Resolver};
use super::validator::{validate_stations, validate_streets};
use crate::gazetteer::Gazetteer;
use crate::network::GeoPoint;
use crate::text::{windows, Lemmatizer, METRO_TRIGGER_WORDS, STREET_TRIGGER_WORDS};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Trigger lemmas for the two kinds of mentions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triggers {
    pub streets: Vec<String>,
    pub metro: Vec<String>,
}

impl Triggers {
    /// Built-in trigger words, lemmatized the way texts will be.
    pub fn for_lemmatizer(lemmatizer: &Lemmatizer) -> Self {
        Self::from_words(lemmatizer, STREET_TRIGGER_WORDS, METRO_TRIGGER_WORDS)
    }

    /// Lemmatize arbitrary trigger words. Empty results are dropped and
    /// duplicates collapse.
    pub fn from_words<S: AsRef<str>>(lemmatizer: &Lemmatizer, streets: &[S], metro: &[S]) -> Self {
        let lemmas = |words: &[S]| {
            let mut out: Vec<String> = Vec::new();
            for word in words {
                let lemma = lemmatizer.lemmatize(word.as_ref());
                if lemma.contains(' ') {
                    tracing::warn!(word = word.as_ref(), lemma = %lemma, "multi-word trigger never matches a token");
                }
                if !lemma.is_empty() && !out.contains(&lemma) {
                    out.push(lemma);
                }
            }
            out
        };
        Self {
            streets: lemmas(streets),
            metro: lemmas(metro),
        }
    }
}

/// Every crossing of two named streets, without collapsing to one point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreetCrossing {
    /// Lemmatized query names.
    pub streets: [String; 2],
    /// Both names matched at least one gazetteer street.
    pub found: bool,
    /// The streets share a stretch of road.
    pub overlap: bool,
    pub points: Vec<MapPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    #[serde(flatten)]
    pub point: GeoPoint,
    pub link: String,
}

impl From<GeoPoint> for MapPoint {
    fn from(point: GeoPoint) -> Self {
        Self {
            link: point.map_link(),
            point,
        }
    }
}

/// Prediction plus the names that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Located {
    pub prediction: Prediction,
    pub streets: BTreeSet<String>,
    pub stations: BTreeSet<String>,
}

/// Owns everything needed to locate a text. Cheap to share behind an `Arc`;
/// `locate` takes `&self` and touches no shared mutable state.
#[derive(Debug, Clone)]
pub struct Locator {
    gazetteer: Arc<Gazetteer>,
    lemmatizer: Lemmatizer,
    triggers: Triggers,
}

impl Locator {
    pub fn new(gazetteer: Arc<Gazetteer>, lemmatizer: Lemmatizer) -> Self {
        let triggers = Triggers::for_lemmatizer(&lemmatizer);
        Self {
            gazetteer,
            lemmatizer,
            triggers,
        }
    }

    pub fn with_triggers(mut self, triggers: Triggers) -> Self {
        self.triggers = triggers;
        self
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    pub fn triggers(&self) -> &Triggers {
        &self.triggers
    }

    /// Lemmatize two street names and list every point where they cross.
    pub fn intersect(&self, street1: &str, street2: &str) -> StreetCrossing {
        let a = self.lemmatizer.lemmatize(street1);
        let b = self.lemmatizer.lemmatize(street2);
        let crossing = if a.is_empty() || b.is_empty() {
            None
        } else {
            Resolver::new(&self.gazetteer).crossing_of(&a, &b)
        };
        let (found, overlap, points) = match crossing {
            None => (false, false, Vec::new()),
            Some(Crossing::Overlap) => (true, true, Vec::new()),
            Some(Crossing::Points(points)) => (true, false, points.into_iter().map(MapPoint::from).collect()),
        };
        StreetCrossing {
            streets: [a, b],
            found,
            overlap,
            points,
        }
    }

    pub fn locate(&self, text: &str) -> Prediction {
        self.explain(text).prediction
    }

    /// Split on '.', validate each sentence; the first sentence naming exactly
    /// two streets decides, otherwise names from all sentences are pooled.
    pub fn explain(&self, text: &str) -> Located {
        let mut streets: BTreeSet<String> = BTreeSet::new();
        let mut stations: BTreeSet<String> = BTreeSet::new();

        for (idx, sentence) in text.split('.').enumerate() {
            let lemmas = self.lemmatizer.prepare(sentence);
            if lemmas.is_empty() {
                continue;
            }
            let street_windows = windows(&lemmas, self.triggers.streets.as_slice());
            let metro_windows = windows(&lemmas, self.triggers.metro.as_slice());
            let found = validate_streets(&street_windows, &self.gazetteer);
            stations.extend(validate_stations(&metro_windows, &self.gazetteer));

            tracing::debug!(
                sentence = idx,
                lemmas = %lemmas,
                street_windows = street_windows.len(),
                metro_windows = metro_windows.len(),
                streets = ?found,
                "sentence scanned"
            );

            if found.len() == 2 {
                streets = found;
                break;
            }
            streets.extend(found);
        }

        let prediction = Resolver::new(&self.gazetteer).resolve(&streets, &stations);
        Located {
            prediction,
            streets,
            stations,
        }
    }
}
