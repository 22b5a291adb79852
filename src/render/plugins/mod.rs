//! Rules shipped with the renderer.
//!
//! Each rule is a plain function plus a [`RendererRule`] describing the tag
//! it applies to. None of them keep state.

mod callout;
mod equation;
mod paragraph;

pub use callout::render_callout;
pub use equation::{render_block_equation, render_inline_equation};
pub use paragraph::render_latex_paragraph;

use super::RendererRule;
use crate::html::TagType;

/// Obsidian-style callouts from `<div class="callout">`.
pub const CALLOUT: RendererRule = RendererRule::new("callout", "div", TagType::Block, render_callout);

/// Display math stored in `data-content`.
pub const BLOCK_EQUATION: RendererRule =
    RendererRule::new("block-equation", "div", TagType::Block, render_block_equation);

/// Inline math spans. Always declines for now.
pub const INLINE_EQUATION: RendererRule =
    RendererRule::new("inline-equation", "span", TagType::Inline, render_inline_equation);

/// Paragraphs holding raw LaTeX text.
pub const LATEX_PARAGRAPH: RendererRule =
    RendererRule::new("latex-paragraph", "p", TagType::Block, render_latex_paragraph);

/// The shipped rules in registration order.
pub fn default_rules() -> [RendererRule; 4] {
    [CALLOUT, BLOCK_EQUATION, INLINE_EQUATION, LATEX_PARAGRAPH]
}
