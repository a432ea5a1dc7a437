//! Text normalization: suffix stripping followed by dictionary lemmatization.
//!
//! Gazetteer names and incident texts go through the same [`Lemmatizer`], so
//! whatever the stripper and analyzer get wrong, they get wrong on both sides.

use super::morph::MorphAnalyzer;
use regex::Regex;
use std::sync::{Arc, OnceLock};

/// Case and gender endings, in priority order. First match wins.
const ENDINGS: &[&str] = &[
    "ого", "его", "ому", "ему", "ыми", "ими", "ых", "их", "ая", "яя", "ое", "ее", "ую", "юю",
    "ой", "ей", "ою", "ею", "ами", "ями", "ам", "ям", "ах", "ях", "ия", "ья", "ий", "ый", "ой",
    "а", "я", "у", "ю", "ы", "и", "е", "о", "ся", "сь", "им",
];

/// A stem must keep more than this many characters beyond the ending length.
const MIN_STEM_MARGIN: usize = 2;

fn word_re() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"[0-9A-Za-zА-Яа-яЁё\-]+").expect("word pattern is valid"))
}

/// Strip one common ending from a single word, preserving the original case
/// of the remaining stem.
pub fn strip_word(word: &str) -> &str {
    let lower = word.to_lowercase();
    let len = lower.chars().count();
    for ending in ENDINGS {
        let ending_len = ending.chars().count();
        if lower.ends_with(ending) && len > ending_len + MIN_STEM_MARGIN {
            let keep = word.chars().count().saturating_sub(ending_len);
            let cut = word
                .char_indices()
                .nth(keep)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            return &word[..cut];
        }
    }
    word
}

/// Run [`strip_word`] over every word run of `text`; everything else is kept.
pub fn strip_endings(text: &str) -> String {
    word_re()
        .replace_all(text, |caps: &regex::Captures<'_>| strip_word(&caps[0]).to_string())
        .into_owned()
}

/// Extract word tokens, dropping punctuation and whitespace.
pub fn tokenize(text: &str) -> Vec<&str> {
    word_re().find_iter(text).map(|m| m.as_str()).collect()
}

/// Lemmatizer shared by the gazetteer build and the locate pipeline.
#[derive(Clone)]
pub struct Lemmatizer {
    analyzer: Arc<dyn MorphAnalyzer>,
}

impl Lemmatizer {
    pub fn new(analyzer: Arc<dyn MorphAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Lemmatize free text into space-joined base forms.
    pub fn lemmatize(&self, text: &str) -> String {
        let text = text.replace('ё', "е").replace('Ё', "Е");
        let stripped = strip_endings(&text);
        tokenize(&stripped)
            .into_iter()
            .map(|t| self.analyzer.normal_form(t))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Newlines become spaces before lemmatization.
    pub fn prepare(&self, text: &str) -> String {
        self.lemmatize(&text.replace('\n', " "))
    }

    /// Lemmatize a gazetteer name. Multi-valued names are joined by a space first.
    pub fn lemmatize_name<S: AsRef<str>>(&self, parts: &[S]) -> String {
        let joined = parts.iter().map(|p| p.as_ref()).collect::<Vec<_>>().join(" ");
        self.lemmatize(&joined)
    }
}

impl std::fmt::Debug for Lemmatizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lemmatizer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::morph::{DictionaryAnalyzer, IdentityAnalyzer};

    fn identity() -> Lemmatizer {
        Lemmatizer::new(Arc::new(IdentityAnalyzer))
    }

    #[test]
    fn test_strip_word_priority() {
        assert_eq!(strip_word("Невский"), "Невск");
        assert_eq!(strip_word("Садовая"), "Садов");
        assert_eq!(strip_word("улица"), "улиц");
        assert_eq!(strip_word("шоссе"), "шосс");
        assert_eq!(strip_word("метро"), "метр");
        // "ого" beats the single-letter "о"
        assert_eq!(strip_word("Большого"), "Больш");
    }

    #[test]
    fn test_strip_word_keeps_short_stems() {
        // 3 chars is not > 1 + 2
        assert_eq!(strip_word("и"), "и");
        assert_eq!(strip_word("она"), "она");
        assert_eq!(strip_word("река"), "рек");
        assert_eq!(strip_word("проспект"), "проспект");
    }

    #[test]
    fn test_strip_endings_only_touches_words() {
        assert_eq!(strip_endings("Садовая, улица!"), "Садов, улиц!");
    }

    #[test]
    fn test_lemmatize_drops_punctuation() {
        let l = identity();
        assert_eq!(l.lemmatize("ДТП на Невском проспекте!"), "дтп на невском проспект");
    }

    #[test]
    fn test_lemmatize_empty_and_punctuation_only() {
        let l = identity();
        assert_eq!(l.lemmatize(""), "");
        assert_eq!(l.lemmatize(" ,.;!? "), "");
    }

    #[test]
    fn test_lemmatize_yo_replacement() {
        let l = identity();
        assert_eq!(l.lemmatize("Зелёный"), l.lemmatize("Зеленый"));
    }

    #[test]
    fn test_lemmatize_uses_first_analysis() {
        let dict = DictionaryAnalyzer::from_tsv("невск\tневский\nсадов\tсадовый\nулиц\tулица\n");
        let l = Lemmatizer::new(Arc::new(dict));
        assert_eq!(
            l.lemmatize("Пересечение Невский проспект и Садовая улица"),
            "пересечени невский проспект и садовый улица"
        );
    }

    #[test]
    fn test_lemmatize_deterministic() {
        let l = identity();
        let text = "Столкновение на пересечении Садовой улицы и Невского проспекта";
        assert_eq!(l.lemmatize(text), l.lemmatize(text));
    }

    #[test]
    fn test_lemmatize_name_joins_parts() {
        let l = identity();
        assert_eq!(l.lemmatize_name(&["Садовая улица", "Невский"]), "садов улиц невск");
    }

    #[test]
    fn test_prepare_replaces_newlines() {
        let l = identity();
        assert_eq!(l.prepare("Садовая\nулица"), "садов улиц");
    }
}
