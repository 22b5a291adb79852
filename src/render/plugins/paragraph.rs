use crate::html::{Element, Node};
use crate::infra::unescape;
use crate::render::{RenderContext, RenderError, RenderOutcome};

/// Renders paragraphs that carry raw LaTeX in their text.
///
/// Claims a `p` when one of its direct text children contains a backslash.
/// Text children are unescaped and written without Markdown escaping so the
/// LaTeX survives; element children go back through the dispatcher.
pub fn render_latex_paragraph(
    ctx: &RenderContext<'_>,
    element: &Element,
    out: &mut String,
) -> Result<RenderOutcome, RenderError> {
    if !element.text_children().any(|text| text.contains('\\')) {
        return Ok(RenderOutcome::TryNext);
    }

    for child in element.children() {
        match child {
            Node::Text(text) => out.push_str(&unescape(text)),
            Node::Element(inner) => ctx.render_element(inner, out)?,
        }
    }
    Ok(RenderOutcome::Handled(out.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Renderer;
    use pretty_assertions::assert_eq;

    fn paragraph(element: &Element) -> (RenderOutcome, String) {
        let renderer = Renderer::default();
        let mut out = String::new();
        let outcome =
            render_latex_paragraph(&RenderContext::root(&renderer), element, &mut out).unwrap();
        (outcome, out)
    }

    #[test]
    fn declines_plain_paragraphs() {
        let element = Element::new("p").with_text("no latex_here");
        let (outcome, out) = paragraph(&element);
        assert_eq!(outcome, RenderOutcome::TryNext);
        assert!(out.is_empty());
    }

    #[test]
    fn declines_when_backslash_is_only_in_descendants() {
        let element = Element::new("p")
            .with_text("see ")
            .with_child(Element::new("code").with_text(r"C:\path"));
        assert_eq!(paragraph(&element).0, RenderOutcome::TryNext);
    }

    #[test]
    fn unescapes_text_without_markdown_escaping() {
        let element = Element::new("p").with_text(r"Let $\\alpha_1 = \\{x\\}$");
        let (outcome, out) = paragraph(&element);
        assert_eq!(out, r"Let $\alpha_1 = \{x\}$");
        assert_eq!(outcome, RenderOutcome::Handled(out.len()));
    }

    #[test]
    fn renders_element_children_through_dispatcher() {
        let element = Element::new("p")
            .with_text(r"$\\beta$ is ")
            .with_child(Element::new("strong").with_text("important"));
        assert_eq!(paragraph(&element).1, r"$\beta$ is **important**");
    }

    #[test]
    fn latex_paragraph_through_dispatcher() {
        let html = r"<p>first</p><p>$$\\sum_i x_i$$</p>";
        let markdown = Renderer::default().render_html(html).unwrap();
        assert_eq!(markdown, "first\n\n$$\\sum_i x_i$$");
    }
}
