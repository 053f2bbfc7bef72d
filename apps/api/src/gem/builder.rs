//! Guided Builder: owns one `Configuration`, renders the host page's slots and
//! keeps the live preview in step with every change.
//!
//! Every mutating method re-runs the assembler before returning, so `preview()`
//! and `copy_payload()` can never disagree.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clipboard::CopyButton;
use crate::errors::AppError;
use crate::gem::assembler::assemble;
use crate::gem::configuration::{Change, Configuration};
use crate::gem::prompts::{EXAMPLES_PER_QUESTION, EXAMPLE_QUESTIONS};
use crate::gem::tone::Tone;
use crate::render::builder::{render_slot, SlotContext};
use crate::render::reveal::RevealTracker;

pub const COPY_LABEL: &str = "Copy Instructions";

/// Named insertion points on the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Role,
    Purpose,
    Context,
    Knowledge,
    Tone,
    Questions,
    Final,
}

impl Slot {
    pub const ALL: [Slot; 7] = [
        Slot::Role,
        Slot::Purpose,
        Slot::Context,
        Slot::Knowledge,
        Slot::Tone,
        Slot::Questions,
        Slot::Final,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Slot::Role => "role",
            Slot::Purpose => "purpose",
            Slot::Context => "context",
            Slot::Knowledge => "knowledge",
            Slot::Tone => "tone",
            Slot::Questions => "questions",
            Slot::Final => "final",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Slot {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.name() == s)
            .ok_or_else(|| AppError::NotFound(format!("Slot '{s}' not found")))
    }
}

/// A slot's freshly rendered markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSlot {
    pub slot: Slot,
    pub html: String,
}

/// What the host must apply after an input event.
#[derive(Debug, Clone, Serialize)]
pub struct BuilderUpdate {
    /// False when the event arrived before `initialize` bound the inputs.
    pub applied: bool,
    pub output: String,
    pub rerendered: Vec<RenderedSlot>,
}

#[derive(Debug)]
pub struct GuidedBuilder {
    config: Configuration,
    host_slots: BTreeSet<Slot>,
    bound: bool,
    output: String,
    reveal: RevealTracker,
    copy_button: CopyButton,
}

impl GuidedBuilder {
    /// A builder for a host page exposing `host_slots`. Slots the page lacks
    /// are skipped on every render.
    pub fn new(host_slots: impl IntoIterator<Item = Slot>) -> Self {
        let config = Configuration::default();
        let output = assemble(&config);
        GuidedBuilder {
            config,
            host_slots: host_slots.into_iter().collect(),
            bound: false,
            output,
            reveal: RevealTracker::default(),
            copy_button: CopyButton::new(COPY_LABEL),
        }
    }

    /// Renders every host slot. Input handling is bound on the first call only;
    /// later calls just re-render.
    pub fn initialize(&mut self) -> Vec<RenderedSlot> {
        if !self.bound {
            self.bound = true;
            info!(slots = self.host_slots.len(), "guided builder initialized");
        }
        self.render_all()
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Markup for one slot, or `None` if the host page does not expose it.
    pub fn render_slot(&self, slot: Slot) -> Option<String> {
        if !self.host_slots.contains(&slot) {
            return None;
        }
        let copy_label = self.copy_button.label();
        Some(render_slot(
            slot,
            &SlotContext {
                config: &self.config,
                preview: &self.output,
                copy_label,
                reveal: &self.reveal,
            },
        ))
    }

    pub fn handle_input(&mut self, change: Change) -> BuilderUpdate {
        if !self.bound {
            debug!(?change, "input before initialize ignored");
            return self.update(false, Vec::new());
        }

        let tone_changed = matches!(change, Change::Tone(_));
        let affects_output = change.affects_output();
        self.config.set(change);
        if affects_output {
            self.refresh();
        }

        let mut rerendered = Vec::new();
        if tone_changed {
            // The slider appears with the first tone pick. Keep the card shown
            // rather than animating it in again.
            self.reveal.reveal(Slot::Tone);
            rerendered.extend(self.rendered(Slot::Tone));
        }
        self.update(true, rerendered)
    }

    /// A change reported by a form control `name` with its raw `value`.
    pub fn handle_form_input(&mut self, name: &str, value: &str) -> Result<BuilderUpdate, AppError> {
        let change = Change::from_form(name, value)?;
        Ok(self.handle_input(change))
    }

    pub fn handle_tone_select(&mut self, value: &str) -> BuilderUpdate {
        self.handle_input(Change::Tone(Tone::from_value(value)))
    }

    /// Fills question `target` (1 or 2) with one of its example chips.
    pub fn apply_example_question(
        &mut self,
        target: usize,
        index: usize,
    ) -> Result<BuilderUpdate, AppError> {
        if !(1..=2).contains(&target) || index >= EXAMPLES_PER_QUESTION {
            return Err(AppError::NotFound(format!(
                "Example {index} for question {target} not found"
            )));
        }
        let question = EXAMPLE_QUESTIONS[(target - 1) * EXAMPLES_PER_QUESTION + index].to_string();
        let change = if target == 1 {
            Change::CustomQuestion1(question)
        } else {
            Change::CustomQuestion2(question)
        };

        let mut update = self.handle_input(change);
        if update.applied {
            update.rerendered.extend(self.rendered(Slot::Questions));
        }
        Ok(update)
    }

    /// Records a scroll reveal. Returns `true` the first time only.
    pub fn mark_revealed(&mut self, slot: Slot) -> bool {
        self.reveal.reveal(slot)
    }

    /// Restores the default configuration and re-renders every slot.
    pub fn reset(&mut self) -> Vec<RenderedSlot> {
        self.config.reset();
        self.copy_button.clear();
        self.refresh();
        info!("guided builder reset");
        self.render_all()
    }

    /// The live preview text.
    pub fn preview(&self) -> &str {
        &self.output
    }

    /// What `copy` writes: a fresh assembly of the current configuration.
    pub fn copy_payload(&self) -> String {
        assemble(&self.config)
    }

    pub fn copy_button(&self) -> &CopyButton {
        &self.copy_button
    }

    fn refresh(&mut self) {
        self.output = assemble(&self.config);
    }

    fn rendered(&self, slot: Slot) -> Option<RenderedSlot> {
        self.render_slot(slot).map(|html| RenderedSlot { slot, html })
    }

    fn render_all(&self) -> Vec<RenderedSlot> {
        Slot::ALL
            .into_iter()
            .filter_map(|slot| self.rendered(slot))
            .collect()
    }

    fn update(&self, applied: bool, rerendered: Vec<RenderedSlot>) -> BuilderUpdate {
        BuilderUpdate {
            applied,
            output: self.output.clone(),
            rerendered,
        }
    }
}
