//! Labeled dataset of incident texts with ground-truth coordinates.
//!
//! Accepts `{"text_list": [...]}` or a bare array of records. Every record
//! must carry `text` and `rta_coords: [lat, lon]`; anything else fails the run.

use crate::error::{read_source, Error, Result};
use crate::network::GeoPoint;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub text: String,
    /// `[lat, lon]`
    pub rta_coords: [f64; 2],
}

impl Case {
    pub fn truth(&self) -> GeoPoint {
        GeoPoint::new(self.rta_coords[0], self.rta_coords[1])
    }
}

pub fn load(path: &Path) -> Result<Vec<Case>> {
    let data = read_source(path)?;
    let cases = parse(&data)?;
    tracing::info!(path = %path.display(), cases = cases.len(), "loaded dataset");
    Ok(cases)
}

pub fn parse(data: &str) -> Result<Vec<Case>> {
    let root: Value = serde_json::from_str(data).map_err(|e| Error::MalformedDataset(e.to_string()))?;
    let items = match root {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("text_list") {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(Error::MalformedDataset("'text_list' is not an array".into())),
            None => Vec::new(),
        },
        _ => return Err(Error::MalformedDataset("expected an object or an array".into())),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<Case>(item)
                .map_err(|e| Error::MalformedDataset(format!("record #{}: {}", i + 1, e)))
        })
        .collect()
}
