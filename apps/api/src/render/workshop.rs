//! Markup for the standalone workshop container.

use crate::gem::prompts::GEM_CREATE_URL;
use crate::gem::workshop::{ColorTag, Section, Workshop};
use crate::render::{escape_html, icon};

struct Palette {
    bg: &'static str,
    border: &'static str,
    fg: &'static str,
}

fn palette(color: ColorTag) -> Palette {
    match color {
        ColorTag::Pink => Palette {
            bg: "rgba(99,102,241,0.1)",
            border: "rgba(99,102,241,0.2)",
            fg: "var(--pink-400)",
        },
        ColorTag::Blue => Palette {
            bg: "rgba(59,130,246,0.1)",
            border: "rgba(59,130,246,0.2)",
            fg: "var(--blue-400)",
        },
        ColorTag::Teal => Palette {
            bg: "rgba(20,184,166,0.1)",
            border: "rgba(20,184,166,0.2)",
            fg: "var(--teal-400)",
        },
        ColorTag::Amber => Palette {
            bg: "rgba(245,158,11,0.1)",
            border: "rgba(245,158,11,0.2)",
            fg: "var(--amber-400)",
        },
        ColorTag::Green => Palette {
            bg: "rgba(34,197,94,0.1)",
            border: "rgba(34,197,94,0.2)",
            fg: "var(--green-400)",
        },
    }
}

fn render_section(index: usize, section: &Section) -> String {
    let c = palette(section.color);
    let display = if section.expanded { "block" } else { "none" };
    let chevron = if section.expanded {
        " gem-workshop-section-toggle--open"
    } else {
        ""
    };
    let rows = (section.content.lines().count() + 2).max(8);
    format!(
        r#"<div class="gem-workshop-section" style="border-color: {border};"><div class="gem-workshop-section-header" data-toggle-section="{index}"><div class="gem-workshop-section-icon" style="background: {bg}; color: {fg};">{}</div><div class="gem-workshop-section-title">{}</div><div class="gem-workshop-section-toggle{chevron}" data-section-index="{index}">{}</div></div><div class="gem-workshop-section-body" id="workshop-body-{index}" style="display: {display};"><textarea class="gem-workshop-textarea" name="workshop-section-{index}" rows="{rows}">{}</textarea></div></div>"#,
        icon(section.icon, 20),
        escape_html(section.title),
        icon("chevron-down", 18),
        escape_html(&section.content),
        border = c.border,
        bg = c.bg,
        fg = c.fg,
    )
}

pub fn render_workshop(workshop: &Workshop) -> String {
    let sections: String = workshop
        .sections()
        .iter()
        .enumerate()
        .map(|(i, s)| render_section(i, s))
        .collect();

    format!(
        r#"<div class="gem-workshop"><div class="gem-workshop-intro"><p>Review and refine each section of your Gem's instructions. Click any section to edit the wording, then copy when you're ready.</p></div><div class="gem-workshop-sections">{sections}<div class="gem-workshop-section gem-workshop-section--special"><div class="gem-workshop-section-header"><div class="gem-workshop-section-icon">{}</div><div class="gem-workshop-section-title">Special Instructions</div><span class="gem-workshop-optional">Optional</span></div><div class="gem-workshop-section-body" style="display: block;"><textarea class="gem-workshop-textarea" name="workshop-special" placeholder="Add anything else your Gem should know — district priorities, specific protocols, things to avoid, etc." rows="3">{}</textarea></div></div></div><div class="gem-workshop-combined"><div class="gem-workshop-combined-header"><div class="gem-workshop-combined-icon">{}</div><div class="gem-workshop-combined-title">Complete Instructions</div></div><div class="gem-workshop-combined-body"><div class="gem-workshop-combined-prompt" id="workshop-combined-prompt">{}</div></div></div><div class="gem-workshop-final-actions"><button class="btn--shiny" data-action="workshop-copy">{}<span>{}</span></button><a href="{GEM_CREATE_URL}" target="_blank" class="btn btn--lg">{}<span>Open Gemini</span></a></div><div class="gem-workshop-reminder"><p><strong>Remember:</strong> After pasting instructions in Gemini, upload your <strong>SPSA</strong> and <strong>VVUSD SPSA Self-Reflection Tool</strong> as knowledge base files.</p></div></div>"#,
        icon("plus-circle", 20),
        escape_html(workshop.special_instructions()),
        icon("file-text", 20),
        escape_html(workshop.preview()),
        icon("copy", 18),
        escape_html(workshop.copy_button().label()),
        icon("external-link", 18),
    )
}
