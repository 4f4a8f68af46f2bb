//! JSON request/response types exchanged with the prediction backend.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{self, FEATURE_COUNT};

/// Request body: feature names and values in schema order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub feature_names: Vec<String>,
    pub features: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

/// Informational origin tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub source: String,
}

impl PredictRequest {
    pub fn new(values: [f64; FEATURE_COUNT], source: Option<&str>) -> Self {
        Self {
            feature_names: schema::feature_names(),
            features: values.to_vec(),
            meta: source.map(|s| Meta {
                source: s.to_string(),
            }),
        }
    }
}

/// The `prediction` field as the backend may send it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawPrediction {
    Number(f64),
    Text(String),
    Other(Value),
}

/// Response body as received.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    pub prediction: RawPrediction,
    /// Kept loose: a malformed `proba` drops the probabilities, not the label.
    #[serde(default)]
    pub proba: Option<Value>,
}

/// Normalised outcome label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Label {
    Benign,
    Malignant,
    /// Any other backend value, kept verbatim for display.
    Other(String),
}

impl Label {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Benign => "benign",
            Self::Malignant => "malignant",
            Self::Other(s) => s,
        }
    }

    /// Display heuristic: anything mentioning "malig" is treated as malignant.
    pub fn looks_malignant(&self) -> bool {
        match self {
            Self::Benign => false,
            Self::Malignant => true,
            Self::Other(s) => s.to_lowercase().contains("malig"),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.as_str().to_string()
    }
}

impl From<RawPrediction> for Label {
    fn from(raw: RawPrediction) -> Self {
        match raw {
            RawPrediction::Number(n) if n == 0.0 => Self::Benign,
            RawPrediction::Number(n) if n == 1.0 => Self::Malignant,
            RawPrediction::Number(n) => Self::Other(n.to_string()),
            RawPrediction::Text(s) => match s.as_str() {
                "benign" => Self::Benign,
                "malignant" => Self::Malignant,
                _ => Self::Other(s),
            },
            RawPrediction::Other(v) => Self::Other(v.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Probabilities {
    pub benign: f64,
    pub malignant: f64,
}

/// What gets displayed after a successful round trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: Label,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<Probabilities>,
}

impl From<PredictResponse> for PredictionResult {
    fn from(resp: PredictResponse) -> Self {
        let probabilities = match resp.proba.as_ref().and_then(Value::as_array).map(Vec::as_slice) {
            Some([benign, malignant, ..]) => benign
                .as_f64()
                .zip(malignant.as_f64())
                .map(|(benign, malignant)| Probabilities { benign, malignant }),
            _ => None,
        };
        Self {
            label: resp.prediction.into(),
            probabilities,
        }
    }
}

impl PredictionResult {
    /// Decode a backend response body.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let resp: PredictResponse = serde_json::from_str(body)?;
        Ok(resp.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serialises_in_schema_order() {
        let mut values = [0.0; FEATURE_COUNT];
        values[0] = 17.99;
        values[1] = 10.38;
        let req = PredictRequest::new(values, Some("wdbc-cli"));
        let json: Value = serde_json::to_value(&req).unwrap();
        assert_eq!(json["feature_names"][0], "mean radius");
        assert_eq!(json["feature_names"][29], "worst fractal dimension");
        assert_eq!(json["features"][0], 17.99);
        assert_eq!(json["features"][1], 10.38);
        assert_eq!(json["features"].as_array().unwrap().len(), FEATURE_COUNT);
        assert_eq!(json["meta"]["source"], "wdbc-cli");
    }

    #[test]
    fn request_without_meta_omits_field() {
        let req = PredictRequest::new([1.0; FEATURE_COUNT], None);
        let json: Value = serde_json::to_value(&req).unwrap();
        assert!(json.get("meta").is_none());
    }

    #[test]
    fn zero_is_benign_with_probabilities() {
        let r = PredictionResult::from_json(r#"{"prediction": 0, "proba": [0.91, 0.09]}"#).unwrap();
        assert_eq!(r.label, Label::Benign);
        assert_eq!(r.label.to_string(), "benign");
        let p = r.probabilities.unwrap();
        assert_eq!(format!("{:.3}", p.benign), "0.910");
        assert_eq!(format!("{:.3}", p.malignant), "0.090");
    }

    #[test]
    fn one_is_malignant_without_probabilities() {
        let r = PredictionResult::from_json(r#"{"prediction": 1}"#).unwrap();
        assert_eq!(r.label, Label::Malignant);
        assert!(r.probabilities.is_none());
        assert!(r.label.looks_malignant());
    }

    #[test]
    fn float_zero_is_benign() {
        let r = PredictionResult::from_json(r#"{"prediction": 0.0}"#).unwrap();
        assert_eq!(r.label, Label::Benign);
    }

    #[test]
    fn strings_pass_through_verbatim() {
        let r = PredictionResult::from_json(r#"{"prediction": "Malignant (M)"}"#).unwrap();
        assert_eq!(r.label.to_string(), "Malignant (M)");
        assert!(r.label.looks_malignant());

        let r = PredictionResult::from_json(r#"{"prediction": "B"}"#).unwrap();
        assert_eq!(r.label, Label::Other("B".into()));
        assert!(!r.label.looks_malignant());
    }

    #[test]
    fn other_numbers_and_values_are_stringified() {
        let r = PredictionResult::from_json(r#"{"prediction": 2}"#).unwrap();
        assert_eq!(r.label.to_string(), "2");
        let r = PredictionResult::from_json(r#"{"prediction": null}"#).unwrap();
        assert_eq!(r.label.to_string(), "null");
    }

    #[test]
    fn short_proba_is_ignored() {
        let r = PredictionResult::from_json(r#"{"prediction": 0, "proba": [0.5]}"#).unwrap();
        assert!(r.probabilities.is_none());
    }

    #[test]
    fn malformed_proba_keeps_label() {
        for proba in [r#""n/a""#, r#"{"benign": 0.9}"#, "[0.1, null]", r#"["0.9", "0.1"]"#] {
            let body = format!(r#"{{"prediction": 1, "proba": {proba}}}"#);
            let r = PredictionResult::from_json(&body).unwrap();
            assert_eq!(r.label, Label::Malignant, "proba = {proba}");
            assert!(r.probabilities.is_none(), "proba = {proba}");
        }
    }

    #[test]
    fn extra_proba_entries_are_ignored() {
        let r = PredictionResult::from_json(r#"{"prediction": 0, "proba": [0.7, 0.2, 0.1]}"#)
            .unwrap();
        let p = r.probabilities.unwrap();
        assert_eq!((p.benign, p.malignant), (0.7, 0.2));
    }

    #[test]
    fn missing_prediction_is_an_error() {
        assert!(PredictionResult::from_json(r#"{"proba": [0.5, 0.5]}"#).is_err());
        assert!(PredictionResult::from_json("<html>").is_err());
    }

    #[test]
    fn result_serialises_label_as_string() {
        let r = PredictionResult {
            label: Label::Malignant,
            probabilities: None,
        };
        assert_eq!(
            serde_json::to_string(&r).unwrap(),
            r#"{"label":"malignant"}"#
        );
    }
}
