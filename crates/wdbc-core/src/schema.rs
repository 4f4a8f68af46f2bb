//! The fixed 30-feature schema of the Breast Cancer Wisconsin (Diagnostic) set.
//!
//! Order here is the wire contract with the backend: names and values are
//! always sent positionally in this order. Never reorder or rename.

use arrow::datatypes::{DataType, Field, Schema};

/// Number of features in the schema.
pub const FEATURE_COUNT: usize = 30;

/// One schema entry: display name plus the plausible range used by random fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feature {
    pub name: &'static str,
    pub lo: f64,
    pub hi: f64,
}

const fn feature(name: &'static str, lo: f64, hi: f64) -> Feature {
    Feature { name, lo, hi }
}

/// All features in schema order.
pub const FEATURES: [Feature; FEATURE_COUNT] = [
    feature("mean radius", 6.0, 28.0),
    feature("mean texture", 9.0, 40.0),
    feature("mean perimeter", 40.0, 190.0),
    feature("mean area", 140.0, 2500.0),
    feature("mean smoothness", 0.05, 0.2),
    feature("mean compactness", 0.0, 0.4),
    feature("mean concavity", 0.0, 0.5),
    feature("mean concave points", 0.0, 0.3),
    feature("mean symmetry", 0.1, 0.4),
    feature("mean fractal dimension", 0.04, 0.1),
    feature("radius error", 0.1, 3.0),
    feature("texture error", 0.2, 5.0),
    feature("perimeter error", 0.5, 25.0),
    feature("area error", 5.0, 550.0),
    feature("smoothness error", 0.001, 0.02),
    feature("compactness error", 0.0, 0.1),
    feature("concavity error", 0.0, 0.3),
    feature("concave points error", 0.0, 0.07),
    feature("symmetry error", 0.005, 0.08),
    feature("fractal dimension error", 0.001, 0.03),
    feature("worst radius", 7.0, 40.0),
    feature("worst texture", 10.0, 50.0),
    feature("worst perimeter", 50.0, 260.0),
    feature("worst area", 180.0, 4500.0),
    feature("worst smoothness", 0.07, 0.25),
    feature("worst compactness", 0.02, 1.5),
    feature("worst concavity", 0.02, 1.5),
    feature("worst concave points", 0.0, 0.5),
    feature("worst symmetry", 0.1, 0.6),
    feature("worst fractal dimension", 0.04, 0.2),
];

impl Feature {
    /// Stable key for this feature, see [`to_key`].
    pub fn key(&self) -> String {
        to_key(self.name)
    }
}

/// Derive a stable key from a feature name.
///
/// Runs of non-alphanumeric characters collapse to a single `_` and the
/// result is lowercased: `"mean concave points"` → `"mean_concave_points"`.
pub fn to_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            key.push(c.to_ascii_lowercase());
            in_run = false;
        } else if !in_run {
            key.push('_');
            in_run = true;
        }
    }
    key
}

/// Feature names in schema order.
pub fn feature_names() -> Vec<String> {
    FEATURES.iter().map(|f| f.name.to_string()).collect()
}

/// Position of a feature by key or display name (case-insensitive).
pub fn index_of(key_or_name: &str) -> Option<usize> {
    let wanted = to_key(key_or_name.trim());
    FEATURES.iter().position(|f| f.key() == wanted)
}

/// Arrow schema with one nullable `Float64` column per feature, named by key.
pub fn arrow_schema() -> Schema {
    Schema::new(
        FEATURES
            .iter()
            .map(|f| Field::new(f.key(), DataType::Float64, true))
            .collect::<Vec<_>>(),
    )
}
