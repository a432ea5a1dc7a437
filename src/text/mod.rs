//! Text side of the pipeline: lemmatization and trigger windows.

pub mod lemmatizer;
pub mod morph;
pub mod windows;

pub use lemmatizer::Lemmatizer;
pub use morph::{Analysis, DictionaryAnalyzer, IdentityAnalyzer, MorphAnalyzer};
pub use windows::{windows, ContextWindow, METRO_TRIGGER_WORDS, STREET_TRIGGER_WORDS};
