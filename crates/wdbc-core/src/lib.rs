//! Core types for the WDBC predictor front end: the 30-feature schema,
//! input normalisation, backend wire types, and session state.

mod error;
pub mod paste;
pub mod schema;
pub mod session;
pub mod vector;
pub mod wire;

pub use error::{InputError, SessionError};
pub use schema::{FEATURE_COUNT, FEATURES, Feature};
pub use session::{Outcome, Session, StampedOutcome};
pub use vector::FeatureVector;
pub use wire::{Label, PredictRequest, PredictionResult, Probabilities, RawPrediction};
