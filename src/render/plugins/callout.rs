use std::fmt::Write;

use crate::html::{Element, Node};
use crate::render::{RenderContext, RenderError, RenderOutcome};

const DEFAULT_KIND: &str = "note";

/// Renders `<div class="callout" data-callout="…">` as a `> [!kind]` block.
///
/// Loose text and `p` children become quoted lines (only the paragraph's own
/// text is kept). Any other child goes back through the dispatcher and is
/// not quoted.
pub fn render_callout(
    ctx: &RenderContext<'_>,
    element: &Element,
    out: &mut String,
) -> Result<RenderOutcome, RenderError> {
    if !element.class_contains("callout") {
        return Ok(RenderOutcome::TryNext);
    }

    let kind = element
        .attr("data-callout")
        .map(str::trim)
        .filter(|kind| !kind.is_empty())
        .unwrap_or(DEFAULT_KIND);
    writeln!(out, "> [!{kind}]")?;

    for child in element.children() {
        match child {
            Node::Text(text) => quote_line(text, out)?,
            Node::Element(p) if p.tag() == "p" => {
                let text: String = p.text_children().collect();
                quote_line(&text, out)?;
            }
            Node::Element(other) => ctx.render_element(other, out)?,
        }
    }

    Ok(RenderOutcome::Handled(out.len()))
}

fn quote_line(text: &str, out: &mut String) -> Result<(), RenderError> {
    let text = text.trim();
    if !text.is_empty() {
        writeln!(out, "> {text}")?;
    }
    Ok(())
}
