//! HTML fragments for the host page's slots. Only markup lives here; the text
//! that ends up on the clipboard is produced by `gem::assembler` and is never
//! escaped.

pub mod builder;
pub mod reveal;
pub mod workshop;

/// Escapes text for element content and double-quoted attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A lucide icon placeholder; the host page's icon library swaps it for an SVG.
pub(crate) fn icon(name: &str, size: u32) -> String {
    format!(r#"<i data-lucide="{name}" style="width: {size}px; height: {size}px;"></i>"#)
}
