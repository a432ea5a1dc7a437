//! The locate pipeline: validated names in, geometry out.

pub mod pipeline;
pub mod resolver;
pub mod validator;

pub use pipeline::{Located, Locator, MapPoint, StreetCrossing, Triggers};
pub use resolver::{Crossing, Prediction, Resolver};
