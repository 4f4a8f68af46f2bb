//! The 30-slot feature vector the user edits before submitting.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use rand::Rng;

use crate::error::InputError;
use crate::paste::parse_bulk;
use crate::schema::{self, FEATURE_COUNT, FEATURES};

/// Parse trimmed text as a finite `f64`.
pub(crate) fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round to 4 decimal places.
fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Feature values in schema order; `None` marks an unset slot.
///
/// Only finite numbers are ever stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    slots: [Option<f64>; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fully populated vector. Fails if any value is non-finite.
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Result<Self, InputError> {
        let mut v = Self::new();
        for (i, value) in values.into_iter().enumerate() {
            if !value.is_finite() {
                return Err(InputError::NotANumber {
                    feature: FEATURES[i].name.to_string(),
                    value: value.to_string(),
                });
            }
            v.slots[i] = Some(value);
        }
        Ok(v)
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.slots.get(index).copied().flatten()
    }

    /// Edit one field by key or display name.
    ///
    /// Empty input unsets the field. Anything that is not a finite number is
    /// rejected and the previous value stays in place.
    pub fn set_field(&mut self, key: &str, raw: &str) -> Result<(), InputError> {
        let index =
            schema::index_of(key).ok_or_else(|| InputError::UnknownFeature(key.to_string()))?;
        self.set_index(index, raw)
    }

    /// Edit one field by schema position. Same rules as [`set_field`](Self::set_field).
    pub fn set_index(&mut self, index: usize, raw: &str) -> Result<(), InputError> {
        if index >= FEATURE_COUNT {
            return Err(InputError::IndexOutOfRange(index));
        }
        if raw.trim().is_empty() {
            self.slots[index] = None;
            return Ok(());
        }
        let value = parse_finite(raw).ok_or_else(|| InputError::NotANumber {
            feature: FEATURES[index].name.to_string(),
            value: raw.to_string(),
        })?;
        self.slots[index] = Some(value);
        Ok(())
    }

    /// Replace every field from a bulk paste. On failure nothing changes.
    pub fn apply_paste(&mut self, text: &str) -> Result<(), InputError> {
        let values = parse_bulk(text)?;
        self.slots = values.map(Some);
        Ok(())
    }

    /// Fill every field with a random value inside its plausible range.
    pub fn fill_random(&mut self) {
        self.fill_random_with(&mut rand::rng());
    }

    /// [`fill_random`](Self::fill_random) with a caller-supplied generator.
    pub fn fill_random_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for (slot, feature) in self.slots.iter_mut().zip(FEATURES.iter()) {
            let raw = feature.lo + rng.random::<f64>() * (feature.hi - feature.lo);
            *slot = Some(round4(raw).clamp(feature.lo, feature.hi));
        }
    }

    pub fn clear(&mut self) {
        self.slots = [None; FEATURE_COUNT];
    }

    pub fn missing(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    /// True when every slot holds a finite number.
    pub fn is_ready(&self) -> bool {
        self.slots.iter().all(|s| s.is_some_and(f64::is_finite))
    }

    /// Ordered values, only when the vector is ready.
    pub fn values(&self) -> Option<[f64; FEATURE_COUNT]> {
        let mut out = [0.0; FEATURE_COUNT];
        for (dst, slot) in out.iter_mut().zip(&self.slots) {
            *dst = (*slot)?;
        }
        Some(out)
    }

    /// Single-row record batch over [`schema::arrow_schema`]; unset slots are null.
    pub fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        let columns: Vec<ArrayRef> = self
            .slots
            .iter()
            .map(|s| Arc::new(Float64Array::from(vec![*s])) as ArrayRef)
            .collect();
        RecordBatch::try_new(Arc::new(schema::arrow_schema()), columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn full() -> FeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        for (i, v) in values.iter_mut().enumerate() {
            *v = i as f64 + 0.5;
        }
        FeatureVector::from_values(values).unwrap()
    }

    #[test]
    fn new_vector_is_empty_and_not_ready() {
        let v = FeatureVector::new();
        assert_eq!(v.missing(), FEATURE_COUNT);
        assert!(!v.is_ready());
        assert!(v.values().is_none());
    }

    #[test]
    fn set_field_by_key_and_name() {
        let mut v = FeatureVector::new();
        v.set_field("mean_radius", "17.99").unwrap();
        v.set_field("mean texture", " 10.38 ").unwrap();
        assert_eq!(v.get(0), Some(17.99));
        assert_eq!(v.get(1), Some(10.38));
    }

    #[test]
    fn invalid_field_keeps_previous_value() {
        let mut v = FeatureVector::new();
        v.set_field("mean_area", "1001").unwrap();
        let err = v.set_field("mean_area", "10o1").unwrap_err();
        assert!(matches!(err, InputError::NotANumber { .. }));
        assert_eq!(v.get(3), Some(1001.0));

        assert!(v.set_field("mean_area", "NaN").is_err());
        assert!(v.set_field("mean_area", "inf").is_err());
        assert_eq!(v.get(3), Some(1001.0));
    }

    #[test]
    fn empty_field_unsets() {
        let mut v = full();
        v.set_field("worst_area", "   ").unwrap();
        assert_eq!(v.get(23), None);
        assert!(!v.is_ready());
    }

    #[test]
    fn unknown_feature_and_bad_index() {
        let mut v = FeatureVector::new();
        assert_eq!(
            v.set_field("tumour size", "1"),
            Err(InputError::UnknownFeature("tumour size".into()))
        );
        assert_eq!(v.set_index(30, "1"), Err(InputError::IndexOutOfRange(30)));
    }

    #[test]
    fn ready_iff_all_set() {
        let mut v = full();
        assert!(v.is_ready());
        for i in 0..FEATURE_COUNT {
            let mut w = v.clone();
            w.set_index(i, "").unwrap();
            assert!(!w.is_ready(), "slot {i} unset but ready");
        }
        v.clear();
        assert!(!v.is_ready());
    }

    #[test]
    fn failed_paste_leaves_vector_unchanged() {
        let mut v = full();
        let before = v.clone();
        assert!(v.apply_paste("1,2,3").is_err());
        assert!(v.apply_paste("[1, 2, 3]").is_err());
        assert_eq!(v, before);
    }

    #[test]
    fn paste_overwrites_everything() {
        let mut v = FeatureVector::new();
        v.set_field("mean_radius", "99").unwrap();
        let row = vec!["2"; FEATURE_COUNT].join(",");
        v.apply_paste(&row).unwrap();
        assert_eq!(v.values(), Some([2.0; FEATURE_COUNT]));
    }

    #[test]
    fn random_fill_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut v = FeatureVector::new();
        for _ in 0..200 {
            v.fill_random_with(&mut rng);
            assert!(v.is_ready());
            for (i, f) in FEATURES.iter().enumerate() {
                let value = v.get(i).unwrap();
                assert!(value >= f.lo && value <= f.hi, "{} = {value}", f.name);
                assert_eq!(round4(value), value);
            }
        }
    }

    #[test]
    fn record_batch_has_nulls_for_unset() {
        let mut v = FeatureVector::new();
        v.set_field("mean_radius", "12.5").unwrap();
        let batch = v.to_record_batch().unwrap();
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(batch.num_columns(), FEATURE_COUNT);
        let radius = batch
            .column_by_name("mean_radius")
            .unwrap()
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(radius.value(0), 12.5);
        assert!(batch.column(1).is_null(0));
    }

    #[test]
    fn from_values_rejects_nan() {
        let mut values = [1.0; FEATURE_COUNT];
        values[5] = f64::NAN;
        assert!(FeatureVector::from_values(values).is_err());
    }
}
