//! Run configuration: input paths and trigger sets.
//!
//! Read from `--config <path>`, else `<config_dir>/rta-geoparse/config.toml`
//! when it exists, else defaults. Command-line flags win over file values.

use crate::error::{read_source, Error, Result};
use crate::locate::Triggers;
use crate::text::{Lemmatizer, METRO_TRIGGER_WORDS, STREET_TRIGGER_WORDS};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "rta-geoparse";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// GeoJSON road network.
    pub network: PathBuf,
    /// `form<TAB>lemma[<TAB>score]` dictionary. Without one, forms pass through.
    pub lexicon: Option<PathBuf>,
    /// Labeled dataset for `eval`.
    pub dataset: PathBuf,
    /// Trigger words in any form; lemmatized before matching.
    pub street_triggers: Vec<String>,
    pub metro_triggers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: PathBuf::from("spb_drive.geojson"),
            lexicon: None,
            dataset: PathBuf::from("rta_texts.json"),
            street_triggers: STREET_TRIGGER_WORDS.iter().map(|s| s.to_string()).collect(),
            metro_triggers: METRO_TRIGGER_WORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Resolve the config file location and load it.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = read_source(path)?;
        let config = Self::parse(&data).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(data: &str) -> Result<Self> {
        toml::from_str(data).map_err(|e| Error::Config(e.to_string()))
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, network: Option<PathBuf>, lexicon: Option<PathBuf>) -> Self {
        if let Some(network) = network {
            self.network = network;
        }
        if lexicon.is_some() {
            self.lexicon = lexicon;
        }
        self
    }

    pub fn triggers(&self, lemmatizer: &Lemmatizer) -> Triggers {
        Triggers::from_words(lemmatizer, self.street_triggers.as_slice(), self.metro_triggers.as_slice())
    }
}
