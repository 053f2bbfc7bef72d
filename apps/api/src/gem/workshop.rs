//! Section Workshop: the assembled document split into independently editable
//! sections plus a free-text special-instructions block.
//!
//! A workshop is built from a one-way snapshot of a builder configuration taken
//! at `open` time. Later builder changes do not reach it and workshop edits are
//! never written back.

use serde::Serialize;
use tracing::debug;

use crate::clipboard::CopyButton;
use crate::errors::AppError;
use crate::gem::assembler::{assemble_sections, section_bodies};
use crate::gem::configuration::Configuration;

pub const COPY_LABEL: &str = "Copy Final Instructions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Role,
    Task,
    Sources,
    Output,
    Guidelines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTag {
    Pink,
    Teal,
    Blue,
    Amber,
    Green,
}

impl SectionId {
    pub fn title(self) -> &'static str {
        match self {
            SectionId::Role => "Role & Identity",
            SectionId::Task => "Core Task",
            SectionId::Sources => "Source Documents",
            SectionId::Output => "Output Format",
            SectionId::Guidelines => "Guidelines",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SectionId::Role => "user",
            SectionId::Task => "target",
            SectionId::Sources => "database",
            SectionId::Output => "layout",
            SectionId::Guidelines => "shield",
        }
    }

    pub fn color(self) -> ColorTag {
        match self {
            SectionId::Role => ColorTag::Pink,
            SectionId::Task => ColorTag::Teal,
            SectionId::Sources => ColorTag::Blue,
            SectionId::Output => ColorTag::Amber,
            SectionId::Guidelines => ColorTag::Green,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub id: SectionId,
    pub title: &'static str,
    pub icon: &'static str,
    pub color: ColorTag,
    pub content: String,
    pub expanded: bool,
}

#[derive(Debug)]
pub struct Workshop {
    sections: Vec<Section>,
    special_instructions: String,
    output: String,
    copy_button: CopyButton,
}

impl Workshop {
    /// Opens a workshop from `upstream`, or from the default configuration
    /// when no builder is active.
    pub fn open(upstream: Option<&Configuration>) -> Workshop {
        let fallback = Configuration::default();
        let snapshot = upstream.unwrap_or(&fallback);
        debug!(from_builder = upstream.is_some(), "opening workshop");

        let sections = section_bodies(snapshot)
            .into_iter()
            .map(|(id, content)| Section {
                id,
                title: id.title(),
                icon: id.icon(),
                color: id.color(),
                content,
                expanded: false,
            })
            .collect();

        let mut workshop = Workshop {
            sections,
            special_instructions: String::new(),
            output: String::new(),
            copy_button: CopyButton::new(COPY_LABEL),
        };
        workshop.refresh();
        workshop
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn special_instructions(&self) -> &str {
        &self.special_instructions
    }

    /// Flips one section between expanded and collapsed. Content is untouched.
    pub fn toggle_section_expanded(&mut self, index: usize) -> Result<bool, AppError> {
        let section = self.section_mut(index)?;
        section.expanded = !section.expanded;
        Ok(section.expanded)
    }

    /// Replaces a section's content with `text` exactly.
    pub fn edit_section(&mut self, index: usize, text: impl Into<String>) -> Result<(), AppError> {
        self.section_mut(index)?.content = text.into();
        self.refresh();
        Ok(())
    }

    pub fn edit_special_instructions(&mut self, text: impl Into<String>) {
        self.special_instructions = text.into();
        self.refresh();
    }

    /// Combined preview. Always equal to `copy_payload`.
    pub fn preview(&self) -> &str {
        &self.output
    }

    pub fn copy_payload(&self) -> String {
        self.assemble()
    }

    pub fn copy_button(&self) -> &CopyButton {
        &self.copy_button
    }

    fn section_mut(&mut self, index: usize) -> Result<&mut Section, AppError> {
        let count = self.sections.len();
        self.sections
            .get_mut(index)
            .ok_or_else(|| AppError::NotFound(format!("Section {index} not found ({count} sections)")))
    }

    fn assemble(&self) -> String {
        assemble_sections(
            self.sections.iter().map(|s| (s.title, s.content.as_str())),
            &self.special_instructions,
        )
    }

    fn refresh(&mut self) {
        self.output = self.assemble();
    }
}
