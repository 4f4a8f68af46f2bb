use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    #[error("feature index {0} out of range (0..30)")]
    IndexOutOfRange(usize),

    #[error("{feature}: {value:?} is not a finite number")]
    NotANumber { feature: String, value: String },

    #[error("Paste 30 numeric values as JSON array or single CSV row.")]
    PasteShape,

    #[error("invalid JSON array: {0}")]
    PasteJson(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("{missing} of 30 features are unset")]
    NotReady { missing: usize },

    #[error("a prediction is already in flight")]
    Pending,

    #[error("endpoint is empty")]
    EmptyEndpoint,
}
