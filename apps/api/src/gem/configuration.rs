//! Configuration state: the record of user choices that drives assembly.
//!
//! There is no change notification. Anything that mutates a `Configuration`
//! must re-run the assembler before reading output again; `GuidedBuilder`
//! does this inside every mutating method.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::gem::tone::{clamp_intensity, Tone, DEFAULT_INTENSITY};

/// Advisory checklist for the two knowledge-base files. Never read by the assembler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentReadiness {
    pub spsa: bool,
    pub rubric: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    tone: Option<Tone>,
    tone_intensity: u8,
    custom_question1: String,
    custom_question2: String,
    docs_ready: DocumentReadiness,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            tone: None,
            tone_intensity: DEFAULT_INTENSITY,
            custom_question1: String::new(),
            custom_question2: String::new(),
            docs_ready: DocumentReadiness::default(),
        }
    }
}

/// One mutation of a single field.
///
/// JSON form: `{"field": "toneIntensity", "value": 8}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum Change {
    #[serde(deserialize_with = "deserialize_tone")]
    Tone(Option<Tone>),
    ToneIntensity(i64),
    CustomQuestion1(String),
    CustomQuestion2(String),
    SpsaReady(bool),
    RubricReady(bool),
}

/// Tone arrives as a free string from the picker; unknown values mean unset.
fn deserialize_tone<'de, D>(deserializer: D) -> Result<Option<Tone>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Tone::from_value))
}

impl Change {
    /// Builds a change from a form control name and its string value, the way
    /// the builder's inputs report them.
    pub fn from_form(name: &str, value: &str) -> Result<Change, AppError> {
        match name {
            "builder-tone" => Ok(Change::Tone(Tone::from_value(value))),
            "builder-tone-intensity" => value
                .trim()
                .parse::<i64>()
                .map(Change::ToneIntensity)
                .map_err(|_| {
                    AppError::Validation(format!("tone intensity '{value}' is not an integer"))
                }),
            "builder-question-1" => Ok(Change::CustomQuestion1(value.to_string())),
            "builder-question-2" => Ok(Change::CustomQuestion2(value.to_string())),
            "builder-doc-spsa" => parse_checked(name, value).map(Change::SpsaReady),
            "builder-doc-rubric" => parse_checked(name, value).map(Change::RubricReady),
            other => Err(AppError::Validation(format!("unknown input '{other}'"))),
        }
    }

    /// Whether applying this change can alter the assembled document.
    pub fn affects_output(&self) -> bool {
        !matches!(self, Change::SpsaReady(_) | Change::RubricReady(_))
    }
}

/// Checkboxes report their `checked` state, not their `value` attribute,
/// which stays "on" whether or not the box is ticked.
fn parse_checked(name: &str, value: &str) -> Result<bool, AppError> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(AppError::Validation(format!(
            "{name} expects checked state 'true' or 'false', got '{other}'"
        ))),
    }
}

impl Configuration {
    pub fn tone(&self) -> Option<Tone> {
        self.tone
    }

    pub fn tone_intensity(&self) -> u8 {
        self.tone_intensity
    }

    pub fn custom_question1(&self) -> &str {
        &self.custom_question1
    }

    pub fn custom_question2(&self) -> &str {
        &self.custom_question2
    }

    pub fn docs_ready(&self) -> DocumentReadiness {
        self.docs_ready
    }

    /// Custom questions that will appear in the document, paired with their
    /// question number. Blank questions are skipped.
    pub fn active_questions(&self) -> impl Iterator<Item = (usize, &str)> {
        [
            (1, self.custom_question1.as_str()),
            (2, self.custom_question2.as_str()),
        ]
        .into_iter()
        .filter(|(_, q)| !q.trim().is_empty())
    }

    /// Applies one change in place. Intensity is clamped into 1..=10.
    pub fn set(&mut self, change: Change) {
        match change {
            Change::Tone(tone) => self.tone = tone,
            Change::ToneIntensity(raw) => self.tone_intensity = clamp_intensity(raw),
            Change::CustomQuestion1(q) => self.custom_question1 = q,
            Change::CustomQuestion2(q) => self.custom_question2 = q,
            Change::SpsaReady(ready) => self.docs_ready.spsa = ready,
            Change::RubricReady(ready) => self.docs_ready.rubric = ready,
        }
    }

    pub fn reset(&mut self) {
        *self = Configuration::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Configuration::default();
        assert_eq!(c.tone(), None);
        assert_eq!(c.tone_intensity(), 5);
        assert_eq!(c.custom_question1(), "");
        assert_eq!(c.custom_question2(), "");
        assert_eq!(c.docs_ready(), DocumentReadiness { spsa: false, rubric: false });
    }

    #[test]
    fn test_out_of_range_intensity_is_clamped() {
        let mut c = Configuration::default();
        c.set(Change::ToneIntensity(42));
        assert_eq!(c.tone_intensity(), 10);
        c.set(Change::ToneIntensity(0));
        assert_eq!(c.tone_intensity(), 1);
    }

    #[test]
    fn test_reset_restores_defaults_after_mutation() {
        let mut c = Configuration::default();
        c.set(Change::Tone(Some(Tone::SupportiveMentor)));
        c.set(Change::ToneIntensity(9));
        c.set(Change::CustomQuestion1("q1".into()));
        c.set(Change::CustomQuestion2("q2".into()));
        c.set(Change::RubricReady(true));
        c.reset();
        assert_eq!(c, Configuration::default());
    }

    #[test]
    fn test_active_questions_skip_blank() {
        let mut c = Configuration::default();
        c.set(Change::CustomQuestion1("   ".into()));
        c.set(Change::CustomQuestion2("Why?".into()));
        let active: Vec<_> = c.active_questions().collect();
        assert_eq!(active, vec![(2, "Why?")]);
    }

    #[test]
    fn test_change_from_json() {
        let c: Change = serde_json::from_str(r#"{"field":"toneIntensity","value":8}"#).unwrap();
        assert_eq!(c, Change::ToneIntensity(8));

        let c: Change =
            serde_json::from_str(r#"{"field":"tone","value":"direct-analyst"}"#).unwrap();
        assert_eq!(c, Change::Tone(Some(Tone::DirectAnalyst)));

        let c: Change = serde_json::from_str(r#"{"field":"tone","value":"nope"}"#).unwrap();
        assert_eq!(c, Change::Tone(None));

        let c: Change =
            serde_json::from_str(r#"{"field":"customQuestion2","value":"Budget?"}"#).unwrap();
        assert_eq!(c, Change::CustomQuestion2("Budget?".into()));
    }

    #[test]
    fn test_change_from_form_names() {
        assert_eq!(
            Change::from_form("builder-tone-intensity", "3").unwrap(),
            Change::ToneIntensity(3)
        );
        assert_eq!(
            Change::from_form("builder-doc-spsa", "true").unwrap(),
            Change::SpsaReady(true)
        );
        assert_eq!(
            Change::from_form("builder-tone", "reflective-coach").unwrap(),
            Change::Tone(Some(Tone::ReflectiveCoach))
        );
        assert_eq!(
            Change::from_form("builder-doc-rubric", "false").unwrap(),
            Change::RubricReady(false)
        );
        assert!(Change::from_form("builder-tone-intensity", "loud").is_err());
        assert!(Change::from_form("builder-demographics", "x").is_err());
    }

    #[test]
    fn test_checkbox_value_attribute_is_not_a_checked_state() {
        for raw in ["on", "checked", "1", ""] {
            assert!(matches!(
                Change::from_form("builder-doc-spsa", raw),
                Err(AppError::Validation(_))
            ));
        }
        let mut c = Configuration::default();
        c.set(Change::from_form("builder-doc-spsa", "true").unwrap());
        c.set(Change::from_form("builder-doc-spsa", "false").unwrap());
        assert!(!c.docs_ready().spsa);
    }

    #[test]
    fn test_checklist_changes_do_not_affect_output() {
        assert!(!Change::SpsaReady(true).affects_output());
        assert!(Change::CustomQuestion1(String::new()).affects_output());
    }
}
