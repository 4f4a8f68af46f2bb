//! Single-owner front-end state and the transitions that mutate it.
//!
//! Every user action maps to one method here: edit, paste, random fill,
//! submit start/finish, and clear. The in-flight request works on a snapshot,
//! so the vector can never change underneath it.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{InputError, SessionError};
use crate::vector::FeatureVector;
use crate::wire::{PredictRequest, PredictionResult};

/// Last thing shown in the result panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Result(PredictionResult),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StampedOutcome {
    pub outcome: Outcome,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Session {
    vector: FeatureVector,
    endpoint: String,
    source: Option<String>,
    pending: bool,
    last: Option<StampedOutcome>,
}

impl Session {
    pub fn new(endpoint: impl Into<String>, source: Option<String>) -> Self {
        Self {
            vector: FeatureVector::new(),
            endpoint: endpoint.into(),
            source,
            pending: false,
            last: None,
        }
    }

    pub fn vector(&self) -> &FeatureVector {
        &self.vector
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last(&self) -> Option<&StampedOutcome> {
        self.last.as_ref()
    }

    /// Submission is possible when the vector is ready and nothing is in flight.
    pub fn can_submit(&self) -> bool {
        self.vector.is_ready() && !self.pending
    }

    pub fn set_endpoint(&mut self, endpoint: &str) -> Result<(), SessionError> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(SessionError::EmptyEndpoint);
        }
        self.endpoint = endpoint.to_string();
        info!(endpoint = %self.endpoint, "endpoint changed");
        Ok(())
    }

    /// Edit one field. Rejected input leaves the field as it was.
    pub fn edit(&mut self, key: &str, raw: &str) -> Result<(), InputError> {
        self.vector.set_field(key, raw)
    }

    pub fn edit_index(&mut self, index: usize, raw: &str) -> Result<(), InputError> {
        self.vector.set_index(index, raw)
    }

    /// Apply a bulk paste. A failure is recorded as the current error;
    /// success clears the error but keeps any earlier result.
    pub fn paste(&mut self, text: &str) -> Result<(), InputError> {
        match self.vector.apply_paste(text) {
            Ok(()) => {
                debug!("bulk paste applied");
                if matches!(self.last, Some(StampedOutcome { outcome: Outcome::Error(_), .. })) {
                    self.last = None;
                }
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "bulk paste rejected");
                self.record(Outcome::Error(e.to_string()));
                Err(e)
            }
        }
    }

    pub fn fill_random(&mut self) {
        self.vector.fill_random();
    }

    /// Reset every field and forget the last result or error.
    pub fn clear(&mut self) {
        self.vector.clear();
        self.last = None;
    }

    /// Start a submission: mark pending, drop the old outcome, and hand back
    /// the request snapshot.
    pub fn begin_submit(&mut self) -> Result<PredictRequest, SessionError> {
        if self.pending {
            return Err(SessionError::Pending);
        }
        let values = self.vector.values().ok_or(SessionError::NotReady {
            missing: self.vector.missing(),
        })?;
        self.pending = true;
        self.last = None;
        info!(endpoint = %self.endpoint, "submitting prediction");
        Ok(PredictRequest::new(values, self.source.as_deref()))
    }

    /// Finish a submission. The vector is left exactly as the user entered it.
    pub fn finish_submit(&mut self, result: Result<PredictionResult, String>) {
        self.pending = false;
        match result {
            Ok(r) => {
                info!(label = %r.label, "prediction received");
                self.record(Outcome::Result(r));
            }
            Err(msg) => {
                warn!(error = %msg, "prediction failed");
                self.record(Outcome::Error(msg));
            }
        }
    }

    fn record(&mut self, outcome: Outcome) {
        self.last = Some(StampedOutcome {
            outcome,
            at: Utc::now(),
        });
    }
}
