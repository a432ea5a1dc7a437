//! Human-readable evaluation report.

use super::metrics::{Summary, ACCURACY_RADIUS_M};
use super::CaseResult;
use std::fmt::Write;

const SNIPPET_CHARS: usize = 200;

/// Collapse whitespace and cut to `n` characters, appending `…` when cut.
pub fn shorten(text: &str, n: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= n {
        collapsed
    } else {
        let mut cut: String = collapsed.chars().take(n).collect();
        cut.push('…');
        cut
    }
}

pub fn render_case(case: &CaseResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Case #{} ===", case.index);
    let _ = writeln!(out, "{}", shorten(&case.text, SNIPPET_CHARS));
    let _ = writeln!(out);
    let _ = writeln!(out, "Ground truth:      {}", case.truth);
    let _ = writeln!(out, "Map (truth):       {}", case.truth.map_link());

    match (case.chosen, case.distance_m) {
        (Some(p), Some(d)) => {
            let _ = writeln!(out, "Prediction:        {}", p);
            let _ = writeln!(out, "Map (prediction):  {}", p.map_link());
            if case.prediction.points().len() > 1 {
                let _ = writeln!(out, "Candidates:        {} (nearest scored)", case.prediction.points().len());
            }
            let _ = writeln!(out, "Distance:          {} m", d.round_ties_even() as i64);
        }
        _ => {
            let _ = writeln!(out, "Prediction:        none (no coordinates)");
        }
    }
    out
}

pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Summary ===");
    if summary.total == 0 {
        let _ = writeln!(out, "Dataset is empty.");
        return out;
    }
    let _ = writeln!(out, "Total cases:         {}", summary.total);
    match (summary.mean_m, summary.median_m) {
        (Some(mean), Some(median)) => {
            let _ = writeln!(out, "With prediction:     {}/{}", summary.predicted, summary.total);
            let _ = writeln!(
                out,
                "Accuracy (<={} m):  {}/{} = {:.1}%",
                ACCURACY_RADIUS_M as i64,
                summary.within_radius,
                summary.total,
                summary.accuracy * 100.0
            );
            let _ = writeln!(out, "Mean error:          {:.1} m", mean);
            let _ = writeln!(out, "Median error:        {:.1} m", median);
        }
        _ => {
            let _ = writeln!(out, "No case produced a coordinate prediction.");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::Prediction;
    use crate::network::GeoPoint;

    fn case(prediction: Prediction, chosen: Option<GeoPoint>, distance_m: Option<f64>) -> CaseResult {
        CaseResult {
            index: 3,
            text: "ДТП   на\nНевском".into(),
            truth: GeoPoint::new(59.9311, 30.3609),
            prediction,
            chosen,
            distance_m,
        }
    }

    #[test]
    fn test_shorten() {
        assert_eq!(shorten("  a \n b  ", 10), "a b");
        assert_eq!(shorten("абвгд", 3), "абв…");
        assert_eq!(shorten("абв", 3), "абв");
    }

    #[test]
    fn test_render_case_with_prediction() {
        let p = GeoPoint::new(59.9312, 30.3610);
        let text = render_case(&case(Prediction::Point(p), Some(p), Some(13.4)));
        assert!(text.starts_with("=== Case #3 ===\nДТП на Невском\n"));
        assert!(text.contains("Ground truth:      59.931100, 30.360900"));
        assert!(text.contains("https://www.google.com/maps?q=59.931200,30.361000"));
        assert!(text.contains("Distance:          13 m"));
        assert!(!text.contains("Candidates"));
    }

    #[test]
    fn test_distance_rounds_half_to_even() {
        let p = GeoPoint::new(59.9312, 30.3610);
        let text = render_case(&case(Prediction::Point(p), Some(p), Some(12.5)));
        assert!(text.contains("Distance:          12 m"));
        let text = render_case(&case(Prediction::Point(p), Some(p), Some(13.5)));
        assert!(text.contains("Distance:          14 m"));
    }

    #[test]
    fn test_render_case_without_prediction() {
        let text = render_case(&case(Prediction::None, None, None));
        assert!(text.contains("(no coordinates)"));
        assert!(!text.contains("Distance"));
    }

    #[test]
    fn test_render_summary() {
        let s = Summary::from_distances(4, &[50.0, 150.0, 1000.0]);
        let text = render_summary(&s);
        assert!(text.contains("With prediction:     3/4"));
        assert!(text.contains("Accuracy (<=200 m):  2/4 = 50.0%"));
        assert!(text.contains("Mean error:          400.0 m"));
        assert!(text.contains("Median error:        150.0 m"));
    }

    #[test]
    fn test_render_summary_without_predictions() {
        let text = render_summary(&Summary::from_distances(2, &[]));
        assert!(text.contains("Total cases:         2"));
        assert!(text.contains("No case produced a coordinate prediction."));
    }
}
