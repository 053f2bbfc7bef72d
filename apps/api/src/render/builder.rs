//! Markup for the guided builder's seven slots.

use crate::gem::builder::Slot;
use crate::gem::configuration::Configuration;
use crate::gem::prompts::{EXAMPLE_QUESTIONS, EXAMPLES_PER_QUESTION, GEM_CREATE_URL};
use crate::gem::tone::{intensity_label, MAX_INTENSITY, MIN_INTENSITY, TONE_PRESETS};
use crate::render::reveal::RevealTracker;
use crate::render::{escape_html, icon};

/// Everything a slot render reads.
pub struct SlotContext<'a> {
    pub config: &'a Configuration,
    pub preview: &'a str,
    pub copy_label: &'a str,
    pub reveal: &'a RevealTracker,
}

pub fn render_slot(slot: Slot, ctx: &SlotContext<'_>) -> String {
    let visible = ctx.reveal.animate_class(slot);
    match slot {
        Slot::Role => preview_card(
            visible,
            "pink",
            "Your Gem's Role",
            "Expert SPSA Compliance Officer and Data Analyst for VVUSD, specializing in reviewing \
             School Plans for Student Achievement against district rubric standards.",
        ),
        Slot::Purpose => preview_card(
            visible,
            "teal",
            "Your Gem's Purpose",
            "Review SPSA content against the VVUSD SPSA Self-Reflection Tool rubric, enforcing three \
             strict compliance rules around metrics, effectiveness evidence, and equity analysis.",
        ),
        Slot::Context => context_card(visible),
        Slot::Knowledge => knowledge_card(visible, ctx.config),
        Slot::Tone => tone_card(visible, ctx.config),
        Slot::Questions => questions_card(visible, ctx.config),
        Slot::Final => final_card(visible, ctx),
    }
}

fn card_header(color: &str, badge_icon: &str, badge: &str, title: &str) -> String {
    format!(
        r#"<div class="gem-builder-card-header"><div class="gem-builder-badge gem-builder-badge--{color}">{} {badge}</div><span class="gem-builder-card-title">{title}</span></div>"#,
        icon(badge_icon, 14)
    )
}

fn note(text: &str) -> String {
    format!(
        r#"<div class="gem-builder-note">{}<span>{text}</span></div>"#,
        icon("info", 16)
    )
}

fn preview_card(visible: &str, color: &str, title: &str, text: &str) -> String {
    format!(
        r#"<div class="gem-builder-card gem-builder-preview gem-builder-preview--{color}{visible}" data-gem-animate>{}<div class="gem-builder-preview-text">{text}</div></div>"#,
        card_header(color, "check-circle", "Pre-Built", title)
    )
}

fn context_card(visible: &str) -> String {
    format!(
        r#"<div class="gem-builder-card gem-builder-preview gem-builder-preview--purple{visible}" data-gem-animate>{}<p class="gem-builder-card-desc">You don't need to enter school details manually. When you upload your SPSA to the knowledge base, the Gem will read your school's context directly &mdash; including school name, grade levels, demographics, SPSA priorities, and identified needs.</p>{}</div>"#,
        card_header("purple", "check-circle", "Automatic", "Context From Your SPSA"),
        note("This is one of the advantages of a knowledge base &mdash; the Gem already knows your school because it has your plan.")
    )
}

fn checklist_item(name: &str, checked: bool, label: &str, desc: &str) -> String {
    let checked = if checked { " checked" } else { "" };
    format!(
        r#"<label class="gem-builder-checklist-item"><input type="checkbox" name="{name}"{checked}><span class="gem-builder-checklist-check"></span><div class="gem-builder-checklist-content"><span class="gem-builder-checklist-label">{label}</span><span class="gem-builder-checklist-desc">{desc}</span></div></label>"#
    )
}

fn knowledge_card(visible: &str, config: &Configuration) -> String {
    let docs = config.docs_ready();
    format!(
        r#"<div class="gem-builder-card gem-builder-card--blue{visible}" data-gem-animate>{}<p class="gem-builder-card-desc">You'll upload these documents directly to Gemini after creating your Gem.</p><div class="gem-builder-checklist">{}{}</div>{}</div>"#,
        card_header("blue", "clipboard-check", "Document Check", "Get Your Files Ready"),
        checklist_item(
            "builder-doc-spsa",
            docs.spsa,
            "Your School's SPSA",
            "Single Plan for Student Achievement with goals, needs assessment, and action steps"
        ),
        checklist_item(
            "builder-doc-rubric",
            docs.rubric,
            "VVUSD SPSA Self-Reflection Tool",
            "District rubric with &quot;Look Fors&quot; for compliance and quality review"
        ),
        note("These files become your Gem's knowledge base — it will review your SPSA against the rubric standards.")
    )
}

fn tone_card(visible: &str, config: &Configuration) -> String {
    let options: String = TONE_PRESETS
        .iter()
        .map(|p| {
            let selected = config.tone() == Some(p.tone);
            format!(
                r#"<label class="gem-builder-tone-option{}"><input type="radio" name="builder-tone" value="{}"{}><div class="gem-builder-tone-icon">{}</div><div class="gem-builder-tone-label">{}</div><div class="gem-builder-tone-desc">{}</div></label>"#,
                if selected { " gem-builder-tone-option--active" } else { "" },
                p.value,
                if selected { " checked" } else { "" },
                icon(p.icon, 22),
                p.label,
                p.description
            )
        })
        .collect();

    // Intensity only means something once a tone is picked.
    let slider = if config.tone().is_some() {
        let intensity = config.tone_intensity();
        format!(
            r#"<div class="gem-builder-intensity"><div class="gem-builder-intensity-header">{}<span>Personality Intensity</span></div><input type="range" name="builder-tone-intensity" min="{MIN_INTENSITY}" max="{MAX_INTENSITY}" value="{intensity}" class="gem-builder-slider"><div class="gem-builder-intensity-labels"><span>1 — Subtle</span><span>5 — Balanced</span><span>10 — Bold</span></div><div class="gem-builder-intensity-value"><span class="gem-builder-intensity-number" id="builder-intensity-value">{intensity}</span><span class="gem-builder-intensity-desc" id="builder-intensity-label">{}</span></div></div>"#,
            icon("gauge", 18),
            intensity_label(intensity)
        )
    } else {
        String::new()
    };

    format!(
        r#"<div class="gem-builder-card gem-builder-card--amber{visible}" data-gem-animate>{}<p class="gem-builder-card-desc">How should your Gem communicate with your team?</p><div class="gem-builder-tone-grid">{options}</div>{slider}</div>"#,
        card_header("amber", "edit-3", "Your Turn", "Set Your Gem's Voice")
    )
}

fn question_field(target: usize, value: &str, placeholder: &str) -> String {
    let start = (target - 1) * EXAMPLES_PER_QUESTION;
    let chips: String = EXAMPLE_QUESTIONS[start..start + EXAMPLES_PER_QUESTION]
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let q = escape_html(q);
            format!(
                r#"<button type="button" class="gem-builder-example-chip" data-example-question="{q}" data-example-index="{i}" data-question-target="{target}">{q}</button>"#
            )
        })
        .collect();
    format!(
        r#"<div class="gem-builder-field"><label class="gem-builder-label">Question {target} <span class="gem-builder-hint">(optional)</span></label><textarea class="gem-builder-input gem-builder-textarea" name="builder-question-{target}" placeholder="{placeholder}" rows="2">{}</textarea><div class="gem-builder-example-chips" data-question-target="{target}">{chips}</div></div>"#,
        escape_html(value)
    )
}

fn questions_card(visible: &str, config: &Configuration) -> String {
    format!(
        r#"<div class="gem-builder-card gem-builder-card--green{visible}" data-gem-animate>{}<p class="gem-builder-card-desc">Your Gem will already analyze alignment and recommend focus areas. Add up to 2 additional questions you want it to address.</p>{}{}</div>"#,
        card_header("green", "edit-3", "Your Turn", "Add Your Questions"),
        question_field(
            1,
            config.custom_question1(),
            "e.g., Are our SPSA budget allocations aligned with our identified needs?"
        ),
        question_field(
            2,
            config.custom_question2(),
            "e.g., Which strategies lack student group-specific evidence of effectiveness?"
        )
    )
}

fn final_card(visible: &str, ctx: &SlotContext<'_>) -> String {
    let hint = if ctx.config.tone().is_none() {
        format!(
            r#"<div class="gem-builder-final-hint">{}<span>Scroll up to customize your tone and questions — or copy the default version below.</span></div>"#,
            icon("arrow-up", 16)
        )
    } else {
        String::new()
    };

    format!(
        r#"<div class="gem-builder-final{visible}" data-gem-animate><div class="gem-builder-final-header"><div class="gem-builder-final-icon">{}</div><div><h3 class="gem-builder-final-title">Your SPSA Data Coach</h3><p class="gem-builder-final-subtitle">Ready to copy and paste into Gemini</p></div></div>{hint}<div class="gem-builder-final-prompt-wrap"><pre class="gem-builder-final-prompt" id="gem-builder-output">{}</pre></div><div class="gem-builder-final-actions"><button class="btn--shiny gem-builder-copy-btn" data-action="builder-copy">{}<span>{}</span></button><a href="{GEM_CREATE_URL}" target="_blank" class="btn btn--lg gem-builder-gemini-btn">{}<span>Open Gemini</span></a></div><div class="gem-builder-final-steps"><p><strong>Next steps:</strong></p><ol><li>Copy the instructions above</li><li>Open Gemini and create a new Gem</li><li>Paste the instructions into the Gem's instruction field</li><li>Upload your SPSA and the VVUSD SPSA Self-Reflection Tool as knowledge base files</li><li>Save and start chatting with your Gem</li></ol></div><button class="btn btn--ghost gem-builder-reset-btn" data-action="builder-reset">{} Start Over</button></div>"#,
        icon("sparkles", 28),
        escape_html(ctx.preview),
        icon("copy", 18),
        escape_html(ctx.copy_label),
        icon("external-link", 18),
        icon("refresh-cw", 16)
    )
}
