//! Vertical card display for the feature vector and prediction outcomes.
//!
//! The vector is rendered from its single-row RecordBatch, grouped by the
//! three measurement families of the dataset.

use arrow::array::{Array, Float64Array};
use arrow::record_batch::RecordBatch;
use wdbc_core::{FeatureVector, Outcome, PredictionResult, StampedOutcome, schema};

// ── Schema section groupings ──

const SECTIONS: &[(&str, &str)] = &[
    ("Mean", "mean_"),
    ("Standard Error", "_error"),
    ("Worst", "worst_"),
];

const NOTICE: &str = "This tool is for demonstration only and not a medical device.";

// ── Public API ──

/// Print the vector as a card, one section per measurement family.
pub fn print_vector_card(vector: &FeatureVector) -> anyhow::Result<()> {
    let batch = vector.to_record_batch()?;
    let missing = vector.missing();

    if missing == 0 {
        println!("=== Feature vector (ready) ===");
    } else {
        println!(
            "=== Feature vector ({missing} of {} unset) ===",
            wdbc_core::FEATURE_COUNT
        );
    }
    println!();

    for &(header, marker) in SECTIONS {
        print_section(&batch, header, marker);
    }
    Ok(())
}

/// Print a prediction result the way the result panel shows it.
pub fn print_result(result: &PredictionResult) {
    print!("{}", render_result(result));
}

/// Result panel text: label line, optional probabilities, notice.
pub fn render_result(result: &PredictionResult) -> String {
    let mark = if result.label.looks_malignant() { "✗" } else { "✓" };
    let mut out = format!("{mark} Prediction: {}\n", result.label);
    if let Some(p) = result.probabilities {
        out.push_str(&format!(
            "  Probabilities: Benign {:.3} · Malignant {:.3}\n",
            p.benign, p.malignant
        ));
    }
    out.push_str(&format!("  {NOTICE}\n"));
    out
}

/// Print the last outcome of a session, or the idle hint.
pub fn print_outcome(last: Option<&StampedOutcome>) {
    match last {
        None => println!("Run a prediction to see the output."),
        Some(stamped) => {
            match &stamped.outcome {
                Outcome::Result(r) => print_result(r),
                Outcome::Error(msg) => println!("Error: {msg}"),
            }
            println!("  ({})", stamped.at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
    }
}

/// List the schema: index, name, key and random-fill range.
pub fn print_schema() {
    println!("{:>3}  {:<26} {:<28} range", "#", "name", "key");
    for (i, f) in schema::FEATURES.iter().enumerate() {
        println!("{:>3}  {:<26} {:<28} {}–{}", i, f.name, f.key(), f.lo, f.hi);
    }
}

// ── Section rendering ──

fn section_of(key: &str) -> &'static str {
    if key.ends_with("_error") {
        "Standard Error"
    } else if key.starts_with("worst_") {
        "Worst"
    } else {
        "Mean"
    }
}

fn print_section(batch: &RecordBatch, header: &str, marker: &str) {
    println!("{header}");
    let schema = batch.schema();
    for (idx, field) in schema.fields().iter().enumerate() {
        let key = field.name();
        if section_of(key) != header {
            continue;
        }
        let label = display_name(key, marker);
        match batch.column(idx).as_any().downcast_ref::<Float64Array>() {
            Some(arr) if !arr.is_null(0) => println!("  {:<26} {}", label, arr.value(0)),
            _ => println!("  {:<26} -", label),
        }
    }
    println!();
}

/// Strip the section marker from a key so rows read `radius`, `concave points`, ...
fn display_name(key: &str, marker: &str) -> String {
    let bare = key
        .strip_prefix(marker)
        .or_else(|| key.strip_suffix(marker))
        .unwrap_or(key);
    bare.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_cover_every_feature_once() {
        let mut counts = [0usize; 3];
        for f in &schema::FEATURES {
            let pos = SECTIONS
                .iter()
                .position(|(h, _)| *h == section_of(&f.key()))
                .unwrap();
            counts[pos] += 1;
        }
        assert_eq!(counts, [10, 10, 10]);
    }

    #[test]
    fn result_with_probabilities() {
        let result = PredictionResult::from_json(r#"{"prediction": 0, "proba": [0.91, 0.09]}"#)
            .unwrap();
        let text = render_result(&result);
        assert!(text.starts_with("✓ Prediction: benign\n"));
        assert!(text.contains("  Probabilities: Benign 0.910 · Malignant 0.090\n"));
        assert!(text.ends_with(&format!("  {NOTICE}\n")));
    }

    #[test]
    fn result_without_probabilities() {
        let result = PredictionResult::from_json(r#"{"prediction": 1}"#).unwrap();
        let text = render_result(&result);
        assert!(text.starts_with("✗ Prediction: malignant\n"));
        assert!(!text.contains("Probabilities"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn display_name_strips_marker() {
        assert_eq!(display_name("mean_concave_points", "mean_"), "concave points");
        assert_eq!(display_name("fractal_dimension_error", "_error"), "fractal dimension");
        assert_eq!(display_name("worst_area", "worst_"), "area");
    }
}
