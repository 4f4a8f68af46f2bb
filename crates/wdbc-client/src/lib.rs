//! Prediction client: a single JSON POST to the classification backend.

pub mod http;

pub use http::{ClientError, PredictClient, resolve_endpoint};
