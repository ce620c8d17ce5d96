//! Predictions (`/predictions`): the input form and the latest result.
//!
//! Opening the page pre-fills the form from the sample endpoint. A failed
//! sample load keeps the built-in defaults and shows the error banner above
//! a still-usable form. Submitting posts the current input verbatim and
//! replaces any previous result.

use crate::api::PredictionApi;
use crate::api::types::{PredictionInput, PredictionResult};

pub const SAMPLE_ERROR: &str = "Failed to load sample data. Please make sure the API is running.";
pub const PREDICT_ERROR: &str =
    "Failed to make prediction. Please check your inputs and try again.";

/// Confidence shown when the response carries no usable probability.
pub const FALLBACK_CONFIDENCE: f64 = 0.75;

/// State of the prediction form for one render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionForm {
    pub input: PredictionInput,
    pub result: Option<PredictionResult>,
    pub error: Option<&'static str>,
}

impl PredictionForm {
    /// Open the form, pre-filled from the sample endpoint when it answers.
    pub fn mount(api: &dyn PredictionApi) -> Self {
        let mut form = Self::default();
        match api.sample() {
            Ok(sample) => form.input = sample,
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "error fetching sample");
                form.error = Some(SAMPLE_ERROR);
            }
        }
        form
    }

    /// Rebuild the input from submitted `(name, value)` pairs.
    ///
    /// Fields absent from the submission keep their defaults.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut form = Self::default();
        for (name, value) in fields {
            form.set_field(name, value);
        }
        form
    }

    /// Apply one change event: numeric fields are parsed, the rest stored
    /// as typed. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: &str) {
        let input = &mut self.input;
        match name {
            "temperature" => input.temperature = parse_float(value),
            "pressure" => input.pressure = parse_float(value),
            "vibration" => input.vibration = parse_float(value),
            "humidity" => input.humidity = parse_float(value),
            "equipment" => input.equipment = value.to_string(),
            "location" => input.location = value.to_string(),
            _ => {}
        }
    }

    /// Send the current input to the model and keep the outcome.
    pub fn submit(&mut self, api: &dyn PredictionApi) {
        self.error = None;
        match api.predict(&self.input) {
            Ok(result) => {
                tracing::info!(
                    prediction = result.prediction,
                    equipment = %self.input.equipment,
                    location = %self.input.location,
                    "prediction received"
                );
                self.result = Some(result);
            }
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "prediction error");
                self.error = Some(PREDICT_ERROR);
            }
        }
    }
}

/// How a result is presented.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    /// The model reported an error inside a successful response.
    ModelError(String),
    Outcome(Outcome),
}

/// Presentation of a successful prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub fault: bool,
    pub label: String,
    pub summary: &'static str,
    /// Probability of the predicted class, in `[0, 1]`.
    pub confidence: f64,
    pub fault_probability: f64,
    pub normal_probability: f64,
    pub recommendation: &'static str,
}

impl ResultView {
    pub fn from_result(result: &PredictionResult) -> Self {
        if let Some(err) = &result.error {
            return Self::ModelError(err.clone());
        }

        let fault = result.is_fault();
        let prob = result.probability.unwrap_or_default();
        let label = result.prediction_label.clone().unwrap_or_else(|| {
            let default = if fault { "Fault Detected" } else { "Normal Operation" };
            default.to_string()
        });
        let predicted = if fault { prob.faulty } else { prob.normal };

        Self::Outcome(Outcome {
            fault,
            label,
            summary: if fault {
                "The model has detected a potential fault in the equipment"
            } else {
                "The equipment appears to be operating normally"
            },
            confidence: nonzero_or(predicted, FALLBACK_CONFIDENCE),
            fault_probability: nonzero_or(prob.faulty, 0.0),
            normal_probability: nonzero_or(prob.normal, 0.0),
            recommendation: if fault {
                "It is recommended to schedule a maintenance check for this equipment based on the detected fault probability."
            } else {
                "Regular maintenance schedule can be followed. No immediate action required."
            },
        })
    }
}

/// `value` unless it is missing, zero or NaN.
fn nonzero_or(value: Option<f64>, fallback: f64) -> f64 {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => v,
        _ => fallback,
    }
}

/// Parse the leading decimal number of a form value.
///
/// Leading whitespace is skipped and trailing garbage ignored (`"12.5kg"` →
/// `12.5`). Input with no leading number yields NaN, which is submitted as
/// JSON `null`.
pub fn parse_float(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ClassProbability;

    #[test]
    fn parse_float_plain_numbers() {
        assert_eq!(parse_float("85.5"), 85.5);
        assert_eq!(parse_float("-3"), -3.0);
        assert_eq!(parse_float("  42.30 "), 42.3);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("7."), 7.0);
        assert_eq!(parse_float("1e3"), 1000.0);
    }

    #[test]
    fn parse_float_ignores_trailing_garbage() {
        assert_eq!(parse_float("12.5kg"), 12.5);
        assert_eq!(parse_float("3e"), 3.0);
        assert_eq!(parse_float("2.1.4"), 2.1);
    }

    #[test]
    fn parse_float_non_numeric_is_nan() {
        assert!(parse_float("").is_nan());
        assert!(parse_float("abc").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("nan").is_nan());
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn set_field_parses_numeric_and_keeps_text() {
        let mut form = PredictionForm::default();
        form.set_field("vibration", "3.25");
        form.set_field("equipment", "Pump");
        form.set_field("location", "New York");
        form.set_field("operator", "ignored");
        assert_eq!(form.input.vibration, 3.25);
        assert_eq!(form.input.equipment, "Pump");
        assert_eq!(form.input.location, "New York");
        assert_eq!(form.input.temperature, 85.5);
    }

    #[test]
    fn from_fields_overlays_defaults() {
        let form = PredictionForm::from_fields([("humidity", "70"), ("pressure", "x")]);
        assert_eq!(form.input.humidity, 70.0);
        assert!(form.input.pressure.is_nan());
        assert_eq!(form.input.equipment, "Turbine");
    }

    #[test]
    fn fault_outcome_uses_fault_probability() {
        let result = PredictionResult {
            prediction: 1,
            probability: Some(ClassProbability {
                faulty: Some(0.82),
                normal: Some(0.18),
            }),
            ..PredictionResult::default()
        };
        let ResultView::Outcome(o) = ResultView::from_result(&result) else {
            panic!("expected outcome");
        };
        assert!(o.fault);
        assert_eq!(o.label, "Fault Detected");
        assert_eq!(o.confidence, 0.82);
        assert_eq!(o.normal_probability, 0.18);
    }

    #[test]
    fn normal_outcome_prefers_backend_label() {
        let result = PredictionResult {
            prediction: 0,
            prediction_label: Some("Healthy".into()),
            probability: Some(ClassProbability {
                faulty: Some(0.1),
                normal: Some(0.9),
            }),
            ..PredictionResult::default()
        };
        let ResultView::Outcome(o) = ResultView::from_result(&result) else {
            panic!("expected outcome");
        };
        assert!(!o.fault);
        assert_eq!(o.label, "Healthy");
        assert_eq!(o.confidence, 0.9);
    }

    #[test]
    fn missing_or_zero_probability_falls_back() {
        let result = PredictionResult {
            prediction: 1,
            probability: Some(ClassProbability {
                faulty: Some(0.0),
                normal: None,
            }),
            ..PredictionResult::default()
        };
        let ResultView::Outcome(o) = ResultView::from_result(&result) else {
            panic!("expected outcome");
        };
        assert_eq!(o.confidence, FALLBACK_CONFIDENCE);
        assert_eq!(o.fault_probability, 0.0);
        assert_eq!(o.normal_probability, 0.0);
    }

    #[test]
    fn model_error_wins() {
        let result = PredictionResult {
            prediction: 1,
            error: Some("model not loaded".into()),
            ..PredictionResult::default()
        };
        assert_eq!(
            ResultView::from_result(&result),
            ResultView::ModelError("model not loaded".into())
        );
    }
}
