//! Tone calibration: maps the selected persona tone and the 1–10 intensity to
//! the fixed wording used in the Role & Identity section.
//!
//! Unset tone is not an error. The assembler substitutes the fallback name and
//! description so the Role section is always present.

use serde::Serialize;

pub const FALLBACK_TONE_NAME: &str = "Balanced and professional";
pub const FALLBACK_TONE_DESCRIPTION: &str = "Clear, professional, approachable";

pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 10;
pub const DEFAULT_INTENSITY: u8 = 5;

/// The four persona voices a staff member can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    ReflectiveCoach,
    DirectAnalyst,
    SupportiveMentor,
    ProfessionalStrategist,
}

/// Display data for one tone option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TonePreset {
    pub tone: Tone,
    pub value: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

/// Presets in the order the tone picker shows them.
pub const TONE_PRESETS: [TonePreset; 4] = [
    TonePreset {
        tone: Tone::ReflectiveCoach,
        value: "reflective-coach",
        label: "Reflective Coach",
        icon: "heart-handshake",
        description: "Warm, inquiry-driven, like a trusted thought partner",
    },
    TonePreset {
        tone: Tone::DirectAnalyst,
        value: "direct-analyst",
        label: "Direct Analyst",
        icon: "bar-chart-3",
        description: "Concise, data-focused, gets to the point",
    },
    TonePreset {
        tone: Tone::SupportiveMentor,
        value: "supportive-mentor",
        label: "Supportive Mentor",
        icon: "heart",
        description: "Encouraging, frames gaps as opportunities",
    },
    TonePreset {
        tone: Tone::ProfessionalStrategist,
        value: "professional-strategist",
        label: "Professional Strategist",
        icon: "briefcase",
        description: "Formal, structured, policy-aware",
    },
];

impl Tone {
    /// Parses a picker value. Anything outside the preset table is `None`.
    pub fn from_value(value: &str) -> Option<Tone> {
        TONE_PRESETS
            .iter()
            .find(|p| p.value == value.trim())
            .map(|p| p.tone)
    }

    pub fn preset(self) -> &'static TonePreset {
        TONE_PRESETS
            .iter()
            .find(|p| p.tone == self)
            .unwrap_or(&TONE_PRESETS[0])
    }
}

/// Resolves the (name, description) pair for the Role section.
pub fn tone_display(tone: Option<Tone>) -> (&'static str, &'static str) {
    match tone {
        Some(t) => {
            let p = t.preset();
            (p.label, p.description)
        }
        None => (FALLBACK_TONE_NAME, FALLBACK_TONE_DESCRIPTION),
    }
}

/// The five ranges of the intensity scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntensityBand {
    Faint,
    Gentle,
    Balanced,
    Bold,
    Full,
}

impl IntensityBand {
    pub fn for_intensity(intensity: u8) -> IntensityBand {
        match intensity {
            0..=2 => IntensityBand::Faint,
            3..=4 => IntensityBand::Gentle,
            5..=6 => IntensityBand::Balanced,
            7..=8 => IntensityBand::Bold,
            _ => IntensityBand::Full,
        }
    }

    pub fn guidance(self) -> &'static str {
        match self {
            IntensityBand::Faint => {
                "Keep responses neutral and straightforward. The tone should be a faint background quality."
            }
            IntensityBand::Gentle => {
                "Let personality come through gently. Be polite and measured — noticeable but restrained."
            }
            IntensityBand::Balanced => {
                "Show a clear, balanced personality. Professional but with character — like hearing from a real colleague."
            }
            IntensityBand::Bold => {
                "Be bold and distinctive. Don't hold back — let the tone drive communication. Be opinionated with vivid language."
            }
            IntensityBand::Full => {
                "Go full personality. Be unapologetically expressive, highly opinionated, and push boundaries with your style."
            }
        }
    }
}

/// Guidance sentence appended after "operate at a N." in the Role section.
pub fn intensity_guidance(intensity: u8) -> &'static str {
    IntensityBand::for_intensity(intensity).guidance()
}

/// Slider read-out shown next to the current intensity value.
pub fn intensity_label(intensity: u8) -> &'static str {
    match intensity {
        1 => "Barely there — almost invisible",
        2 => "Very subtle — hint of personality",
        3 => "Gentle — polite and measured",
        4 => "Moderate — present but restrained",
        5 => "Balanced — clear personality, professional",
        6 => "Noticeable — confident and distinct",
        7 => "Strong — clearly opinionated, character-driven",
        8 => "Bold — unapologetic, very distinctive",
        9 => "Intense — pushes boundaries, highly expressive",
        10 => "Maximum — full personality, zero filter",
        _ => "",
    }
}

/// Clamps any programmatic intensity write into the slider's range.
pub fn clamp_intensity(raw: i64) -> u8 {
    raw.clamp(MIN_INTENSITY as i64, MAX_INTENSITY as i64) as u8
}
