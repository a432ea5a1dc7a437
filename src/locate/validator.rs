//! Candidate validation: turn context windows into gazetteer names.
//!
//! Each window yields a short, ordered list of name hypotheses. The first
//! hypothesis that is an exact gazetteer key wins and the rest are skipped.

use crate::gazetteer::{Gazetteer, Partition};
use crate::text::ContextWindow;
use std::collections::BTreeSet;

/// Street hypotheses keep the trigger word: "садовый улица", "улица марат".
fn street_hypotheses(w: &ContextWindow) -> [String; 4] {
    [
        format!("{} {} {}", w.before2(), w.before1(), w.trigger()),
        format!("{} {} {}", w.trigger(), w.after1(), w.after2()),
        format!("{} {}", w.trigger(), w.after1()),
        format!("{} {}", w.before1(), w.trigger()),
    ]
}

/// Station hypotheses drop the trigger: station names never contain "метро".
fn station_hypotheses(w: &ContextWindow) -> [String; 4] {
    [
        format!("{} {}", w.before2(), w.before1()),
        format!("{} {}", w.after1(), w.after2()),
        w.after1().to_string(),
        w.before1().to_string(),
    ]
}

/// Validate windows against one gazetteer partition.
pub fn validate(windows: &[ContextWindow], gazetteer: &Gazetteer, partition: Partition) -> BTreeSet<String> {
    let mut hits = BTreeSet::new();
    for window in windows {
        let hypotheses = match partition {
            Partition::Streets => street_hypotheses(window),
            Partition::Stations => station_hypotheses(window),
        };
        if let Some(hit) = hypotheses.into_iter().find(|h| gazetteer.contains(partition, h)) {
            tracing::trace!(?partition, name = %hit, "validated");
            hits.insert(hit);
        }
    }
    hits
}

pub fn validate_streets(windows: &[ContextWindow], gazetteer: &Gazetteer) -> BTreeSet<String> {
    validate(windows, gazetteer, Partition::Streets)
}

pub fn validate_stations(windows: &[ContextWindow], gazetteer: &Gazetteer) -> BTreeSet<String> {
    validate(windows, gazetteer, Partition::Stations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::GazetteerBuilder;
    use crate::text::{windows, IdentityAnalyzer, Lemmatizer};
    use geo::{line_string, point};
    use std::sync::Arc;

    /// Names are fed pre-lemmatized; the identity analyzer keeps them as-is
    /// as long as no ending gets stripped.
    fn gazetteer(streets: &[&str], stations: &[&str]) -> Gazetteer {
        let lemmatizer = Lemmatizer::new(Arc::new(IdentityAnalyzer));
        let mut b = GazetteerBuilder::new(&lemmatizer);
        for s in streets {
            b.add_street(s, line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]);
        }
        for s in stations {
            b.add_station(s, point!(x: 0.0, y: 0.0));
        }
        b.finish()
    }

    #[test]
    fn test_left_name_street() {
        let g = gazetteer(&["невск проспект", "садов улиц"], &[]);
        let ws = windows("на невск проспект и садов улиц", &["проспект", "улиц"]);
        let got = validate_streets(&ws, &g);
        assert_eq!(got, BTreeSet::from(["невск проспект".to_string(), "садов улиц".to_string()]));
    }

    #[test]
    fn test_first_hit_wins() {
        // both "больш садов улиц" and "садов улиц" exist; the three-word
        // left hypothesis is tried first
        let g = gazetteer(&["больш садов улиц", "садов улиц"], &[]);
        let ws = windows("больш садов улиц", &["улиц"]);
        let got = validate_streets(&ws, &g);
        assert_eq!(got, BTreeSet::from(["больш садов улиц".to_string()]));
    }

    #[test]
    fn test_right_name_street() {
        let g = gazetteer(&["улиц марат"], &[]);
        let ws = windows("дтп улиц марат", &["улиц"]);
        assert_eq!(validate_streets(&ws, &g), BTreeSet::from(["улиц марат".to_string()]));
    }

    #[test]
    fn test_no_hit() {
        let g = gazetteer(&["садов улиц"], &[]);
        let ws = windows("какая-то улиц", &["улиц"]);
        assert!(validate_streets(&ws, &g).is_empty());
    }

    #[test]
    fn test_station_after_trigger() {
        let g = gazetteer(&[], &["маяковск"]);
        let ws = windows("метр маяковск", &["метр"]);
        assert_eq!(validate_stations(&ws, &g), BTreeSet::from(["маяковск".to_string()]));
    }

    #[test]
    fn test_station_two_word_before_trigger() {
        let g = gazetteer(&[], &["площадь ленин"]);
        let ws = windows("у площадь ленин метр", &["метр"]);
        assert_eq!(validate_stations(&ws, &g), BTreeSet::from(["площадь ленин".to_string()]));
    }

    #[test]
    fn test_validation_does_not_touch_gazetteer() {
        let g = gazetteer(&["садов улиц"], &[]);
        let before = g.stats().street_names;
        let ws = windows("невск улиц", &["проспект", "улиц"]);
        let _ = validate_streets(&ws, &g);
        assert_eq!(g.stats().street_names, before);
    }
}
