//! Distance scoring and summary statistics.

use crate::locate::Prediction;
use crate::network::GeoPoint;
use serde::Serialize;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A prediction within this distance of ground truth counts as correct.
pub const ACCURACY_RADIUS_M: f64 = 200.0;

/// Great-circle distance in meters (haversine).
pub fn haversine(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lon - a.lon).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// The candidate closest to `truth`, with its distance.
///
/// A station prediction lists every entrance; scoring against the nearest one
/// keeps the result independent of candidate order.
pub fn nearest(prediction: &Prediction, truth: GeoPoint) -> Option<(GeoPoint, f64)> {
    prediction
        .points()
        .iter()
        .map(|p| (*p, haversine(*p, truth)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

/// Aggregate over one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub predicted: usize,
    pub within_radius: usize,
    /// `within_radius / total`
    pub accuracy: f64,
    pub mean_m: Option<f64>,
    pub median_m: Option<f64>,
}

impl Summary {
    /// `distances` holds one entry per case that produced a prediction.
    pub fn from_distances(total: usize, distances: &[f64]) -> Self {
        let within_radius = distances.iter().filter(|d| **d <= ACCURACY_RADIUS_M).count();
        let accuracy = if total == 0 {
            0.0
        } else {
            within_radius as f64 / total as f64
        };
        let mean_m = if distances.is_empty() {
            None
        } else {
            Some(distances.iter().sum::<f64>() / distances.len() as f64)
        };
        Self {
            total,
            predicted: distances.len(),
            within_radius,
            accuracy,
            mean_m,
            median_m: median(distances),
        }
    }
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some(0.5 * (sorted[mid - 1] + sorted[mid]))
    }
}
