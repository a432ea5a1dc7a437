//! Evaluation over a labeled dataset: locate each text, score it against
//! ground truth, aggregate.

pub mod dataset;
pub mod metrics;
pub mod report;

pub use dataset::Case;
pub use metrics::{haversine, Summary, ACCURACY_RADIUS_M};

use crate::locate::{Locator, Prediction};
use crate::network::GeoPoint;
use serde::Serialize;

/// Outcome for one dataset record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseResult {
    /// 1-based position in the dataset.
    pub index: usize,
    pub text: String,
    pub truth: GeoPoint,
    pub prediction: Prediction,
    /// Candidate nearest to the truth.
    pub chosen: Option<GeoPoint>,
    pub distance_m: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub cases: Vec<CaseResult>,
    pub summary: Summary,
}

pub fn score_case(index: usize, case: &Case, prediction: Prediction) -> CaseResult {
    let truth = case.truth();
    let scored = metrics::nearest(&prediction, truth);
    CaseResult {
        index,
        text: case.text.clone(),
        truth,
        prediction,
        chosen: scored.map(|(p, _)| p),
        distance_m: scored.map(|(_, d)| d),
    }
}

/// Run the locator over every case.
pub fn evaluate(locator: &Locator, cases: &[Case]) -> Evaluation {
    let results: Vec<CaseResult> = cases
        .iter()
        .enumerate()
        .map(|(i, case)| {
            let prediction = locator.locate(&case.text);
            let result = score_case(i + 1, case, prediction);
            tracing::debug!(case = result.index, distance_m = ?result.distance_m, "scored");
            result
        })
        .collect();

    let distances: Vec<f64> = results.iter().filter_map(|r| r.distance_m).collect();
    let summary = Summary::from_distances(results.len(), &distances);
    Evaluation {
        cases: results,
        summary,
    }
}
