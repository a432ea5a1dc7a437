//! Morphological analysis: map a word form to its dictionary base forms.
//!
//! The lemmatizer only ever uses the first analysis, so implementations must
//! return analyses best-first and deterministically.

use crate::error::{read_source, Result};
use std::collections::HashMap;
use std::path::Path;

/// One candidate base form for a word.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub normal_form: String,
    pub score: f32,
}

/// A morphological analyzer. Returns an empty vector for unknown words.
pub trait MorphAnalyzer: Send + Sync {
    fn analyze(&self, word: &str) -> Vec<Analysis>;

    /// Best-guess base form; unknown words normalize to their lowercase form.
    fn normal_form(&self, word: &str) -> String {
        self.analyze(word)
            .into_iter()
            .next()
            .map(|a| a.normal_form)
            .unwrap_or_else(|| word.to_lowercase())
    }
}

/// Lowercases and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityAnalyzer;

impl MorphAnalyzer for IdentityAnalyzer {
    fn analyze(&self, _word: &str) -> Vec<Analysis> {
        Vec::new()
    }
}

/// Lexicon-backed analyzer.
///
/// Lexicon format, one entry per line:
///
/// ```text
/// # form<TAB>lemma[<TAB>score]
/// улиц	улица
/// садов	садовый	0.9
/// ```
///
/// Forms are matched case-insensitively. Analyses of one form are ordered by
/// descending score; equal scores keep file order.
#[derive(Debug, Clone, Default)]
pub struct DictionaryAnalyzer {
    entries: HashMap<String, Vec<Analysis>>,
}

const DEFAULT_SCORE: f32 = 1.0;

impl DictionaryAnalyzer {
    pub fn load(path: &Path) -> Result<Self> {
        let data = read_source(path)?;
        let analyzer = Self::from_tsv(&data);
        if analyzer.is_empty() {
            tracing::warn!(path = %path.display(), "lexicon has no entries; forms pass through");
        }
        tracing::info!(
            path = %path.display(),
            forms = analyzer.len(),
            "loaded morphological lexicon"
        );
        Ok(analyzer)
    }

    pub fn from_tsv(data: &str) -> Self {
        let mut analyzer = Self::default();
        for (lineno, line) in data.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut cols = line.split('\t');
            let (form, lemma) = match (cols.next(), cols.next()) {
                (Some(f), Some(l)) if !f.trim().is_empty() && !l.trim().is_empty() => (f.trim(), l.trim()),
                _ => {
                    tracing::warn!(line = lineno + 1, "skipping lexicon line without form and lemma");
                    continue;
                }
            };
            let score = match cols.next().map(str::trim) {
                None | Some("") => DEFAULT_SCORE,
                Some(raw) => match raw.parse::<f32>() {
                    Ok(s) => s,
                    Err(_) => {
                        tracing::warn!(line = lineno + 1, score = raw, "skipping lexicon line with bad score");
                        continue;
                    }
                },
            };
            analyzer.insert(form, lemma, score);
        }
        analyzer
    }

    pub fn insert(&mut self, form: &str, lemma: &str, score: f32) {
        let list = self.entries.entry(form.to_lowercase()).or_default();
        list.push(Analysis {
            normal_form: lemma.to_lowercase(),
            score,
        });
        // stable: equal scores keep insertion order
        list.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    }

    /// Number of distinct word forms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MorphAnalyzer for DictionaryAnalyzer {
    fn analyze(&self, word: &str) -> Vec<Analysis> {
        self.entries
            .get(&word.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_identity_lowercases() {
        assert_eq!(IdentityAnalyzer.normal_form("Невск"), "невск");
    }

    #[test]
    fn test_dictionary_lookup_case_insensitive() {
        let a = DictionaryAnalyzer::from_tsv("улиц\tулица\n");
        assert_eq!(a.normal_form("Улиц"), "улица");
        assert_eq!(a.normal_form("проспект"), "проспект");
    }

    #[test]
    fn test_ranking_by_score_then_file_order() {
        let a = DictionaryAnalyzer::from_tsv("стал\tсталь\t0.4\nстал\tстать\t0.9\nстал\tсталый\t0.9\n");
        let forms: Vec<_> = a.analyze("стал").into_iter().map(|x| x.normal_form).collect();
        assert_eq!(forms, vec!["стать", "сталый", "сталь"]);
        assert_eq!(a.normal_form("стал"), "стать");
    }

    #[test]
    fn test_skips_comments_and_bad_lines() {
        let a = DictionaryAnalyzer::from_tsv("# header\n\nодинокое\nметр\tметр\tnan-ish\nсадов\tсадовый\n");
        assert_eq!(a.len(), 1);
        assert_eq!(a.normal_form("садов"), "садовый");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = DictionaryAnalyzer::load(&dir.path().join("nope.tsv")).unwrap_err();
        assert!(matches!(err, crate::error::Error::SourceUnavailable { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lexicon.tsv");
        fs::write(&path, "маяковск\tмаяковский\n").unwrap();
        let a = DictionaryAnalyzer::load(&path).unwrap();
        assert_eq!(a.normal_form("маяковск"), "маяковский");
    }

    #[test]
    fn test_load_comment_only_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lexicon.tsv");
        fs::write(&path, "# form\tlemma\n").unwrap();
        let a = DictionaryAnalyzer::load(&path).unwrap();
        assert!(a.is_empty());
        assert_eq!(a.normal_form("Садов"), "садов");
    }
}
