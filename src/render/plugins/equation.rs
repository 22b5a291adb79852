use crate::html::Element;
use crate::infra::unescape;
use crate::render::{RenderContext, RenderError, RenderOutcome};

/// Renders `<div class="block-equation" data-content="$$…$$">` as display
/// math.
///
/// The LaTeX (delimiters included) lives in `data-content`; the element's
/// children hold a pre-rendered preview and are ignored. Without
/// `data-content` the element falls through to the baseline.
pub fn render_block_equation(
    _ctx: &RenderContext<'_>,
    element: &Element,
    out: &mut String,
) -> Result<RenderOutcome, RenderError> {
    if !element.class_contains("block-equation") {
        return Ok(RenderOutcome::TryNext);
    }
    let Some(content) = element.attr("data-content").filter(|c| !c.is_empty()) else {
        return Ok(RenderOutcome::TryNext);
    };

    out.push('\n');
    out.push_str(&unescape(content));
    out.push_str("\n\n");
    Ok(RenderOutcome::Handled(out.len()))
}

/// Inline equation spans (`<span class="inline-equation">`).
///
/// Registered so inline math has a slot in the rule list, but it currently
/// always declines and the span's text is rendered by the baseline.
pub fn render_inline_equation(
    _ctx: &RenderContext<'_>,
    element: &Element,
    _out: &mut String,
) -> Result<RenderOutcome, RenderError> {
    if element.class_contains("inline-equation") {
        tracing::trace!("inline equation left to the baseline renderer");
    }
    Ok(RenderOutcome::TryNext)
}
