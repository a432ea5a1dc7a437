//! Geoparser for Russian road-traffic-accident reports.
//!
//! Finds the street intersection or metro station an incident text refers to
//! and scores predictions against labeled coordinates.

pub mod config;
pub mod error;
pub mod eval;
pub mod gazetteer;
pub mod locate;
pub mod network;
pub mod server;
pub mod text;

pub use error::{Error, Result};
