//! Geometric resolution of validated names.
//!
//! Two streets resolve to their intersection (collapsed to a single centroid
//! when they cross more than once). One station resolves to every point
//! recorded under a matching name. Anything else is no prediction.

use crate::gazetteer::Gazetteer;
use crate::network::GeoPoint;
use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, MultiLineString};
use serde::Serialize;
use std::collections::BTreeSet;

/// Points closer than this (degrees) are the same intersection.
const SAME_POINT_EPS: f64 = 1e-9;

/// Result of resolving one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Prediction {
    None,
    Point(GeoPoint),
    /// Station entrances; every one is a valid answer.
    PointSet(Vec<GeoPoint>),
}

impl Prediction {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// All candidate points, in gazetteer order.
    pub fn points(&self) -> &[GeoPoint] {
        match self {
            Self::None => &[],
            Self::Point(p) => std::slice::from_ref(p),
            Self::PointSet(ps) => ps,
        }
    }

    /// First candidate in gazetteer order; used for display.
    pub fn first_point(&self) -> Option<GeoPoint> {
        self.points().first().copied()
    }
}

/// How two unioned street geometries meet.
#[derive(Debug, Clone, PartialEq)]
pub enum Crossing {
    Points(Vec<GeoPoint>),
    /// The streets share a stretch of road; not a point answer.
    Overlap,
}

pub struct Resolver<'g> {
    gazetteer: &'g Gazetteer,
}

impl<'g> Resolver<'g> {
    pub fn new(gazetteer: &'g Gazetteer) -> Self {
        Self { gazetteer }
    }

    /// Apply the resolution policy to the validated name sets.
    pub fn resolve(&self, streets: &BTreeSet<String>, stations: &BTreeSet<String>) -> Prediction {
        if streets.len() == 2 {
            let mut it = streets.iter();
            if let (Some(a), Some(b)) = (it.next(), it.next()) {
                return self.intersection(a, b);
            }
        }
        if stations.len() == 1 {
            if let Some(name) = stations.iter().next() {
                return self.station(name);
            }
        }
        Prediction::None
    }

    /// Intersection of every street whose name contains `a` with every street
    /// whose name contains `b`.
    pub fn intersection(&self, a: &str, b: &str) -> Prediction {
        let Some(crossing) = self.crossing_of(a, b) else {
            tracing::debug!(a, b, "street missing from gazetteer");
            return Prediction::None;
        };

        match crossing {
            Crossing::Overlap => {
                tracing::debug!(a, b, "streets overlap, no single crossing");
                Prediction::None
            }
            Crossing::Points(points) => match points.as_slice() {
                [] => Prediction::None,
                [p] => Prediction::Point(*p),
                many => Prediction::Point(centroid(many)),
            },
        }
    }

    /// Raw crossing of the unions of streets matching `a` and `b`; `None`
    /// when either side has no street.
    pub fn crossing_of(&self, a: &str, b: &str) -> Option<Crossing> {
        let side_a: Vec<&MultiLineString<f64>> = self.gazetteer.streets_containing(a).map(|(_, g)| g).collect();
        let side_b: Vec<&MultiLineString<f64>> = self.gazetteer.streets_containing(b).map(|(_, g)| g).collect();
        if side_a.is_empty() || side_b.is_empty() {
            return None;
        }
        Some(crossing(&side_a, &side_b))
    }

    /// Every point of every station whose name contains `name`.
    pub fn station(&self, name: &str) -> Prediction {
        let mut points: Vec<GeoPoint> = Vec::new();
        for (_, multi) in self.gazetteer.stations_containing(name) {
            for p in multi.iter() {
                let gp = GeoPoint::from(*p);
                if !points.contains(&gp) {
                    points.push(gp);
                }
            }
        }
        if points.is_empty() {
            Prediction::None
        } else {
            Prediction::PointSet(points)
        }
    }
}

/// Pairwise segment intersection of two unions of polylines.
pub fn crossing(a: &[&MultiLineString<f64>], b: &[&MultiLineString<f64>]) -> Crossing {
    let mut points: Vec<GeoPoint> = Vec::new();
    let mut push = |c: Coord<f64>| {
        let p = GeoPoint::from_coord(c);
        let seen = points
            .iter()
            .any(|q| (q.lat - p.lat).abs() < SAME_POINT_EPS && (q.lon - p.lon).abs() < SAME_POINT_EPS);
        if !seen {
            points.push(p);
        }
    };

    for la in a.iter().flat_map(|m| m.iter()) {
        for lb in b.iter().flat_map(|m| m.iter()) {
            for sa in la.lines() {
                for sb in lb.lines() {
                    match line_intersection(sa, sb) {
                        None => {}
                        Some(LineIntersection::SinglePoint { intersection, .. }) => push(intersection),
                        Some(LineIntersection::Collinear { intersection }) => {
                            if intersection.start == intersection.end {
                                push(intersection.start);
                            } else {
                                return Crossing::Overlap;
                            }
                        }
                    }
                }
            }
        }
    }
    Crossing::Points(points)
}

/// Arithmetic mean of latitudes and longitudes.
pub fn centroid(points: &[GeoPoint]) -> GeoPoint {
    let n = points.len() as f64;
    let lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
    let lon = points.iter().map(|p| p.lon).sum::<f64>() / n;
    GeoPoint::new(lat, lon)
}
