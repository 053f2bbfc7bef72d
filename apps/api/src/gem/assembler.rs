//! Prompt assembly: configuration (or edited sections) to the final document.
//!
//! Output shape, shared by the builder and the workshop:
//!
//! ```text
//! # SPSA Data Coach
//!
//! ## <section title>
//! <section body>
//!
//! ## <next section title>
//! ...
//! ```
//!
//! Both functions are pure. They never fail and never read the clock.

use crate::gem::configuration::Configuration;
use crate::gem::prompts::{
    ANALYSIS_AREA_TEMPLATE, CORE_TASK, CUSTOM_OUTPUT_TEMPLATE, DOCUMENT_TITLE,
    FIRST_CUSTOM_OUTPUT_ENTRY, GUIDELINES, OUTPUT_FORMAT, ROLE_TEMPLATE, SOURCE_DOCUMENTS,
    SPECIAL_INSTRUCTIONS_TITLE,
};
use crate::gem::tone::{intensity_guidance, tone_display};
use crate::gem::workshop::SectionId;

/// Assembles the builder document for a configuration.
pub fn assemble(config: &Configuration) -> String {
    let bodies = section_bodies(config);
    compose(
        bodies.iter().map(|(id, body)| (id.title(), body.as_str())),
        "",
    )
}

/// Assembles the workshop document from stored section texts, emitted verbatim,
/// followed by the special instructions when they are not blank.
pub fn assemble_sections<'a, I>(sections: I, special_instructions: &str) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    compose(sections, special_instructions)
}

/// The five section bodies in document order, derived from `config`.
pub fn section_bodies(config: &Configuration) -> [(SectionId, String); 5] {
    [
        (SectionId::Role, role_body(config)),
        (SectionId::Task, core_task_body(config)),
        (SectionId::Sources, SOURCE_DOCUMENTS.to_string()),
        (SectionId::Output, output_format_body(config)),
        (SectionId::Guidelines, GUIDELINES.to_string()),
    ]
}

fn role_body(config: &Configuration) -> String {
    let (tone_name, tone_desc) = tone_display(config.tone());
    let intensity = config.tone_intensity();
    ROLE_TEMPLATE
        .replace("{tone_name}", tone_name)
        .replace("{tone_desc}", tone_desc)
        .replace("{intensity}", &intensity.to_string())
        .replace("{guidance}", intensity_guidance(intensity))
}

fn core_task_body(config: &Configuration) -> String {
    let mut body = CORE_TASK.to_string();
    for (n, question) in config.active_questions() {
        body.push_str("\n\n");
        // Question text goes in last so it is never scanned for placeholders.
        body.push_str(
            &ANALYSIS_AREA_TEMPLATE
                .replace("{n}", &n.to_string())
                .replace("{question}", question),
        );
    }
    body
}

fn output_format_body(config: &Configuration) -> String {
    let mut body = OUTPUT_FORMAT.to_string();
    for (offset, (n, _)) in config.active_questions().enumerate() {
        let entry = FIRST_CUSTOM_OUTPUT_ENTRY + offset;
        body.push('\n');
        body.push_str(
            &CUSTOM_OUTPUT_TEMPLATE
                .replace("{entry}", &entry.to_string())
                .replace("{n}", &n.to_string()),
        );
    }
    body
}

fn compose<'a, I>(sections: I, special_instructions: &str) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut doc = format!("# {DOCUMENT_TITLE}\n\n");
    for (title, body) in sections {
        doc.push_str(&format!("## {title}\n{body}\n\n"));
    }

    let special = special_instructions.trim();
    if !special.is_empty() {
        doc.push_str(&format!("## {SPECIAL_INSTRUCTIONS_TITLE}\n{special}\n"));
    }

    doc.trim().to_string()
}
