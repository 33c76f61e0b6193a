//! Body-mass-index classifier.
//!
//! `classify` maps a weight/height pair to one of four categories, the
//! advisory copy shown under the gauge, the plan suggested for that category
//! and two gauge representations:
//!
//! - `bucket_width`: a fixed nominal width per category (20/50/80/100).
//! - `marker_percent`: a linear map of the raw BMI from `[14, 40]` onto
//!   `[0, 100]`, clamped.
//!
//! The two are computed independently and can disagree.
//!
//! Category thresholds are half-open and evaluated in order. Values in
//! `[24.9, 25)` match none of the first three ranges and land in
//! [`BmiCategory::Obese`].

use thiserror::Error;
use v_htmlescape::escape;

use crate::fmt;

/// Lower edge of the gauge (marker at 0%).
pub const GAUGE_MIN_BMI: f64 = 14.0;
/// Upper edge of the gauge (marker at 100%).
pub const GAUGE_MAX_BMI: f64 = 40.0;

const UNDERWEIGHT_BELOW: f64 = 18.5;
const NORMAL_BELOW: f64 = 24.9;
const OVERWEIGHT_FROM: f64 = 25.0;
const OVERWEIGHT_BELOW: f64 = 29.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MeasurementError {
    #[error("{0} is not a number")]
    NotANumber(&'static str),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
}

/// A validated weight/height pair. Both values are finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    weight_kg: f64,
    height_cm: f64,
}

impl Measurement {
    pub fn new(weight_kg: f64, height_cm: f64) -> Result<Self, MeasurementError> {
        Ok(Self {
            weight_kg: check_positive("weight", weight_kg)?,
            height_cm: check_positive("height", height_cm)?,
        })
    }

    /// Reads raw form text with `parseFloat` semantics: leading whitespace is
    /// skipped and the longest numeric prefix is used (`"70kg"` reads as 70).
    pub fn parse(weight: &str, height: &str) -> Result<Self, MeasurementError> {
        let weight_kg = parse_leading_float(weight).ok_or(MeasurementError::NotANumber("weight"))?;
        let height_cm = parse_leading_float(height).ok_or(MeasurementError::NotANumber("height"))?;
        Self::new(weight_kg, height_cm)
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Unrounded BMI.
    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }

    pub fn classify(&self) -> BmiResult {
        let value = self.bmi();
        let category = BmiCategory::from_bmi(value);
        tracing::debug!(bmi = value, category = category.label(), "bmi classified");
        BmiResult {
            value,
            rounded: fmt::round_to(value, 1),
            category,
            status_class: category.status_class(),
            advice: category.advice(),
            bucket_width: category.bucket_width(),
            marker_percent: marker_percent(value),
            plan: category.plan(),
        }
    }
}

fn check_positive(field: &'static str, v: f64) -> Result<f64, MeasurementError> {
    if v.is_nan() {
        Err(MeasurementError::NotANumber(field))
    } else if !v.is_finite() || v <= 0.0 {
        Err(MeasurementError::NotPositive(field))
    } else {
        Ok(v)
    }
}

/// Classifies a raw weight (kg) / height (cm) pair.
///
/// Fails unless both inputs are finite and strictly positive; callers are
/// expected to drop the event in that case.
pub fn classify(weight_kg: f64, height_cm: f64) -> Result<BmiResult, MeasurementError> {
    Measurement::new(weight_kg, height_cm).map(|m| m.classify())
}

/// Linear gauge position for `bmi`, clamped to `[0, 100]`.
pub fn marker_percent(bmi: f64) -> f64 {
    let pos = (bmi - GAUGE_MIN_BMI) / (GAUGE_MAX_BMI - GAUGE_MIN_BMI) * 100.0;
    if pos.is_nan() {
        0.0
    } else {
        pos.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_BELOW {
            BmiCategory::Underweight
        } else if bmi < NORMAL_BELOW {
            BmiCategory::Normal
        } else if (OVERWEIGHT_FROM..OVERWEIGHT_BELOW).contains(&bmi) {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Bajo Peso",
            BmiCategory::Normal => "Peso Normal",
            BmiCategory::Overweight => "Sobrepeso",
            BmiCategory::Obese => "Obesidad",
        }
    }

    /// Class added next to `bmi-status` on the status badge.
    pub fn status_class(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }

    pub fn bucket_width(self) -> u8 {
        match self {
            BmiCategory::Underweight => 20,
            BmiCategory::Normal => 50,
            BmiCategory::Overweight => 80,
            BmiCategory::Obese => 100,
        }
    }

    pub fn plan(self) -> PlanTag {
        match self {
            BmiCategory::Underweight => PlanTag::Trimestral,
            BmiCategory::Normal => PlanTag::Semestral,
            BmiCategory::Overweight | BmiCategory::Obese => PlanTag::Anual,
        }
    }

    pub fn advice(self) -> Advice {
        match self {
            BmiCategory::Underweight => Advice {
                lead: "Es importante ganar masa muscular y fuerza. Nuestro ",
                emphasis: "Plan de Hipertrofia",
                tail: " en la Zona de Pesas es ideal para ti.",
            },
            BmiCategory::Normal => Advice {
                lead: "¡Estás en un excelente estado! Mantén tu salud con nuestro ",
                emphasis: "CrossFit & Entrenamiento Funcional",
                tail: ".",
            },
            BmiCategory::Overweight => Advice {
                lead: "Podemos ayudarte a transformar esa energía extra en músculo. ¡Prueba nuestras clases de ",
                emphasis: "Intense Cycling",
                tail: "!",
            },
            BmiCategory::Obese => Advice {
                lead: "Tu salud es lo primero. Nuestros entrenadores diseñarán un plan de ",
                emphasis: "pérdida de grasa seguro y efectivo",
                tail: " para ti.",
            },
        }
    }

    pub fn all() -> &'static [BmiCategory] {
        &[
            BmiCategory::Underweight,
            BmiCategory::Normal,
            BmiCategory::Overweight,
            BmiCategory::Obese,
        ]
    }
}

/// Membership plan suggested for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanTag {
    Trimestral,
    Semestral,
    Anual,
}

impl PlanTag {
    pub fn as_str(self) -> &'static str {
        match self {
            PlanTag::Trimestral => "trimestral",
            PlanTag::Semestral => "semestral",
            PlanTag::Anual => "anual",
        }
    }
}

/// Advisory copy with one highlighted phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advice {
    pub lead: &'static str,
    pub emphasis: &'static str,
    pub tail: &'static str,
}

impl Advice {
    pub fn plain(&self) -> String {
        format!("{}{}{}", self.lead, self.emphasis, self.tail)
    }

    /// Markup with the emphasised phrase in `<strong>`, escaped for `innerHTML`.
    pub fn to_html(&self) -> String {
        format!(
            "{}<strong>{}</strong>{}",
            escape(self.lead),
            escape(self.emphasis),
            escape(self.tail)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BmiResult {
    /// Unrounded BMI; all classification uses this.
    pub value: f64,
    /// One decimal place, display only.
    pub rounded: f64,
    pub category: BmiCategory,
    pub status_class: &'static str,
    pub advice: Advice,
    pub bucket_width: u8,
    pub marker_percent: f64,
    pub plan: PlanTag,
}

impl BmiResult {
    pub fn display_value(&self) -> String {
        fmt::fixed(self.value, 1)
    }

    /// Inline `left` value for the gauge marker.
    pub fn marker_left(&self) -> String {
        fmt::percent(self.marker_percent, 1)
    }

    pub fn bucket_width_css(&self) -> String {
        format!("{}%", self.bucket_width)
    }
}

/// `parseFloat`-style prefix parse. Returns `None` when no digits lead the
/// (whitespace-trimmed) input.
fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Weight (kg) that yields `bmi` at 1.75 m.
    fn weight_for(bmi: f64) -> f64 {
        bmi * 1.75 * 1.75
    }

    #[test]
    fn classify_reference_adult() {
        let r = classify(70.0, 175.0).unwrap();
        assert_eq!(r.category, BmiCategory::Normal);
        assert_eq!(r.display_value(), "22.9");
        assert_eq!(r.rounded, 22.9);
        assert_eq!(r.plan, PlanTag::Semestral);
        assert_eq!(r.bucket_width, 50);
        assert_eq!(r.status_class, "normal");
    }

    #[test]
    fn underweight_bucket() {
        let r = classify(weight_for(17.0), 175.0).unwrap();
        assert_eq!(r.category, BmiCategory::Underweight);
        assert_eq!(r.bucket_width, 20);
        assert_eq!(r.plan, PlanTag::Trimestral);
        assert_eq!(r.bucket_width_css(), "20%");
    }

    #[test]
    fn overweight_and_obese_share_annual_plan() {
        let over = classify(weight_for(27.0), 175.0).unwrap();
        assert_eq!(over.category, BmiCategory::Overweight);
        assert_eq!(over.bucket_width, 80);
        assert_eq!(over.plan, PlanTag::Anual);

        let obese = classify(weight_for(33.0), 175.0).unwrap();
        assert_eq!(obese.category, BmiCategory::Obese);
        assert_eq!(obese.bucket_width, 100);
        assert_eq!(obese.plan, PlanTag::Anual);
    }

    #[test]
    fn thresholds_are_half_open() {
        assert_eq!(BmiCategory::from_bmi(18.4999), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.8999), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.8999), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.9), BmiCategory::Obese);
    }

    #[test]
    fn gap_between_normal_and_overweight_falls_through_to_obese() {
        assert_eq!(BmiCategory::from_bmi(24.9), BmiCategory::Obese);
        assert_eq!(BmiCategory::from_bmi(24.95), BmiCategory::Obese);
        assert_eq!(BmiCategory::from_bmi(24.9999), BmiCategory::Obese);
    }

    #[test]
    fn display_rounds_the_computed_double() {
        // 80.6 / 2.0^2 is stored just below 20.15.
        let r = classify(80.6, 200.0).unwrap();
        assert_eq!(r.display_value(), "20.1");
        assert_eq!(r.rounded, 20.1);
    }

    #[test]
    fn classification_uses_unrounded_value() {
        // 18.46 displays as 18.5 but is still underweight.
        let r = classify(weight_for(18.46), 175.0).unwrap();
        assert_eq!(r.display_value(), "18.5");
        assert_eq!(r.category, BmiCategory::Underweight);
    }

    #[test]
    fn marker_percent_maps_and_clamps() {
        assert_eq!(marker_percent(14.0), 0.0);
        assert_eq!(marker_percent(40.0), 100.0);
        assert_eq!(marker_percent(50.0), 100.0);
        assert_eq!(marker_percent(0.0), 0.0);
        assert!((marker_percent(27.0) - 50.0).abs() < 1e-9);
        assert_eq!(marker_percent(f64::NAN), 0.0);
    }

    #[test]
    fn marker_and_bucket_are_independent() {
        // Normal bucket says 50%, marker sits well left of that.
        let r = classify(weight_for(19.0), 175.0).unwrap();
        assert_eq!(r.bucket_width, 50);
        assert!(r.marker_percent < 20.0);
        assert_eq!(r.marker_left(), "19.2%");
    }

    #[test]
    fn non_positive_or_non_finite_inputs_are_rejected() {
        assert_eq!(
            classify(0.0, 175.0).unwrap_err(),
            MeasurementError::NotPositive("weight")
        );
        assert_eq!(
            classify(70.0, -1.0).unwrap_err(),
            MeasurementError::NotPositive("height")
        );
        assert_eq!(
            classify(f64::NAN, 175.0).unwrap_err(),
            MeasurementError::NotANumber("weight")
        );
        assert!(classify(70.0, f64::INFINITY).is_err());
    }

    #[test]
    fn parse_reads_leading_number_like_parse_float() {
        let m = Measurement::parse(" 70kg", "175 cm").unwrap();
        assert_eq!(m.weight_kg(), 70.0);
        assert_eq!(m.height_cm(), 175.0);

        let m = Measurement::parse("65.5", ".5e3").unwrap();
        assert_eq!(m.weight_kg(), 65.5);
        assert_eq!(m.height_cm(), 500.0);

        let m = Measurement::parse("80e", "1.8e2x").unwrap();
        assert_eq!(m.weight_kg(), 80.0);
        assert_eq!(m.height_cm(), 180.0);
    }

    #[test]
    fn parse_rejects_empty_and_non_numeric_text() {
        assert_eq!(
            Measurement::parse("", "170").unwrap_err(),
            MeasurementError::NotANumber("weight")
        );
        assert_eq!(
            Measurement::parse("70", "abc").unwrap_err(),
            MeasurementError::NotANumber("height")
        );
        assert_eq!(
            Measurement::parse("-70", "170").unwrap_err(),
            MeasurementError::NotPositive("weight")
        );
        assert!(Measurement::parse(".", "170").is_err());
    }

    #[test]
    fn advice_html_wraps_and_escapes_emphasis() {
        let html = BmiCategory::Normal.advice().to_html();
        assert_eq!(
            html,
            "¡Estás en un excelente estado! Mantén tu salud con nuestro <strong>CrossFit &amp; Entrenamiento Funcional</strong>."
        );
        assert!(BmiCategory::Overweight
            .advice()
            .plain()
            .contains("Intense Cycling"));
    }

    #[test]
    fn category_inventory_is_stable() {
        let all = BmiCategory::all();
        assert_eq!(all.len(), 4);
        let mut classes: Vec<_> = all.iter().map(|c| c.status_class()).collect();
        classes.dedup();
        assert_eq!(classes.len(), 4);
        for c in all {
            assert!(!c.label().is_empty());
            assert!(!c.advice().emphasis.is_empty());
        }
    }

    proptest! {
        #[test]
        fn marker_stays_on_gauge(bmi in -1.0e6f64..1.0e6) {
            let p = marker_percent(bmi);
            prop_assert!((0.0..=100.0).contains(&p));
        }

        #[test]
        fn category_matches_thresholds(weight in 1.0f64..400.0, height in 50.0f64..250.0) {
            let r = classify(weight, height).unwrap();
            let bmi = r.value;
            let expected = if bmi < 18.5 {
                BmiCategory::Underweight
            } else if bmi < 24.9 {
                BmiCategory::Normal
            } else if bmi >= 25.0 && bmi < 29.9 {
                BmiCategory::Overweight
            } else {
                BmiCategory::Obese
            };
            prop_assert_eq!(r.category, expected);
            prop_assert_eq!(r.plan, expected.plan());
            prop_assert_eq!(r.bucket_width, expected.bucket_width());
        }
    }
}
