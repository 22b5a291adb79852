//! HTML → Markdown rendering.
//!
//! A [`Renderer`] holds an ordered list of [`RendererRule`]s. For each
//! element it tries the rules registered for that element's tag and
//! [`TagType`] in priority order. A rule either claims the element
//! ([`RenderOutcome::Handled`]) or declines ([`RenderOutcome::TryNext`]).
//! When every rule declines, the baseline renderer converts the element the
//! standard way. The baseline never declines.
//!
//! Rules write into a scratch buffer owned by the dispatcher. The buffer is
//! only committed when the rule claims the element, so a declining rule
//! cannot leave partial output behind.
//!
//! # Example
//!
//! ```
//! use zendown::render::Renderer;
//!
//! let renderer = Renderer::default();
//! let markdown = renderer
//!     .render_html(r#"<div class="callout" data-callout="tip"><p>Hi</p></div>"#)
//!     .unwrap();
//! assert_eq!(markdown, "> [!tip]\n> Hi");
//! ```

mod baseline;
pub mod plugins;

use std::fmt;

use thiserror::Error;

use crate::html::{Element, NestingTooDeep, Node, TagType, parse_fragment};

/// Default limit on element nesting.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Errors that can occur while rendering a note.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The tree is nested deeper than the configured limit.
    #[error(transparent)]
    NestingTooDeep(#[from] NestingTooDeep),

    /// Writing into the output buffer failed.
    #[error("failed to write rendered output: {0}")]
    Write(#[from] fmt::Error),
}

/// Result of a rule looking at one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The rule rendered the element; carries the number of bytes written.
    Handled(usize),
    /// The rule does not apply; the next candidate gets the element.
    TryNext,
}

/// Ordering of rules registered for the same tag. Lower runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u16);

impl Priority {
    /// Runs before standard rules.
    pub const EARLY: Priority = Priority(100);
    /// Default priority of every shipped rule.
    pub const STANDARD: Priority = Priority(500);
    /// Runs after standard rules.
    pub const LATE: Priority = Priority(1000);

    /// Creates a custom priority.
    pub const fn new(value: u16) -> Self {
        Priority(value)
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::STANDARD
    }
}

/// A rule handler. Writes into `out` and reports whether it claimed the
/// element.
pub type Handler =
    fn(&RenderContext<'_>, &Element, &mut String) -> Result<RenderOutcome, RenderError>;

/// A rendering rule for one tag name and tag type.
#[derive(Clone, Copy)]
pub struct RendererRule {
    name: &'static str,
    target_tag: &'static str,
    tag_type: TagType,
    priority: Priority,
    handler: Handler,
}

impl RendererRule {
    /// Creates a rule at [`Priority::STANDARD`].
    pub const fn new(
        name: &'static str,
        target_tag: &'static str,
        tag_type: TagType,
        handler: Handler,
    ) -> Self {
        Self {
            name,
            target_tag,
            tag_type,
            priority: Priority::STANDARD,
            handler,
        }
    }

    /// Returns the same rule at a different priority.
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the rule's name (used in logs).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the tag this rule is registered for.
    pub fn target_tag(&self) -> &'static str {
        self.target_tag
    }

    /// Returns the tag type this rule is registered for.
    pub fn tag_type(&self) -> TagType {
        self.tag_type
    }

    /// Returns the rule's priority.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    fn matches(&self, tag: &str, tag_type: TagType) -> bool {
        self.target_tag == tag && self.tag_type == tag_type
    }
}

impl fmt::Debug for RendererRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRule")
            .field("name", &self.name)
            .field("target_tag", &self.target_tag)
            .field("tag_type", &self.tag_type)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Options that apply to every render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Maximum element nesting accepted while parsing and rendering.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The rule dispatcher.
///
/// Built once and immutable afterwards; safe to share between threads.
#[derive(Debug, Clone)]
pub struct Renderer {
    rules: Vec<RendererRule>,
    options: RenderOptions,
}

impl Renderer {
    /// Creates a renderer from a rule list.
    ///
    /// Rules are ordered by priority; rules with equal priority keep the
    /// order they were given in.
    pub fn new(mut rules: Vec<RendererRule>, options: RenderOptions) -> Self {
        rules.sort_by_key(RendererRule::priority);
        Self { rules, options }
    }

    /// Creates a builder with no rules registered.
    pub fn builder() -> RendererBuilder {
        RendererBuilder::default()
    }

    /// Returns the rules in dispatch order.
    pub fn rules(&self) -> &[RendererRule] {
        &self.rules
    }

    /// Returns the render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Parses an HTML fragment and renders it to Markdown.
    pub fn render_html(&self, html: &str) -> Result<String, RenderError> {
        let root = parse_fragment(html, self.options.max_depth)?;
        self.render(&root)
    }

    /// Renders the children of `root` to Markdown.
    ///
    /// The result has runs of blank lines collapsed and surrounding blank
    /// space trimmed.
    pub fn render(&self, root: &Element) -> Result<String, RenderError> {
        let ctx = RenderContext::root(self);
        let mut out = String::new();
        ctx.render_children(root, &mut out)?;
        Ok(tidy(&out))
    }
}

impl Default for Renderer {
    /// A renderer with the callout, equation and LaTeX rules registered.
    fn default() -> Self {
        Renderer::builder().with_default_rules().build()
    }
}

/// Builder for [`Renderer`].
#[derive(Debug, Clone, Default)]
pub struct RendererBuilder {
    rules: Vec<RendererRule>,
    options: RenderOptions,
}

impl RendererBuilder {
    /// Registers the shipped rules.
    pub fn with_default_rules(mut self) -> Self {
        self.rules.extend(plugins::default_rules());
        self
    }

    /// Registers one rule.
    pub fn rule(mut self, rule: RendererRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets all render options.
    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the nesting limit.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    /// Builds the renderer.
    pub fn build(self) -> Renderer {
        Renderer::new(self.rules, self.options)
    }
}

/// Traversal state handed down to rules and the baseline renderer.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    renderer: &'a Renderer,
    depth: usize,
}

impl<'a> RenderContext<'a> {
    /// Context for the children of the root element.
    pub(crate) fn root(renderer: &'a Renderer) -> Self {
        Self { renderer, depth: 0 }
    }

    /// Nesting depth of the element currently being rendered.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Renders any node through the dispatcher.
    pub fn render_node(&self, node: &Node, out: &mut String) -> Result<(), RenderError> {
        match node {
            Node::Text(text) => {
                baseline::render_text(text, out);
                Ok(())
            }
            Node::Element(element) => self.render_element(element, out),
        }
    }

    /// Renders every child of `element` through the dispatcher.
    pub fn render_children(&self, element: &Element, out: &mut String) -> Result<(), RenderError> {
        for child in element.children() {
            self.render_node(child, out)?;
        }
        Ok(())
    }

    /// Renders an element: matching rules in order, then the baseline.
    pub fn render_element(&self, element: &Element, out: &mut String) -> Result<(), RenderError> {
        let ctx = self.descend()?;
        let tag_type = element.tag_type();

        for rule in self
            .renderer
            .rules
            .iter()
            .filter(|rule| rule.matches(element.tag(), tag_type))
        {
            let mut scratch = String::new();
            match (rule.handler)(&ctx, element, &mut scratch)? {
                RenderOutcome::Handled(_) => {
                    tracing::trace!(rule = rule.name, tag = element.tag(), "rule claimed element");
                    commit(tag_type, &scratch, out);
                    return Ok(());
                }
                RenderOutcome::TryNext => {}
            }
        }

        baseline::render_element(&ctx, element, out)
    }

    fn descend(&self) -> Result<RenderContext<'a>, RenderError> {
        let depth = self.depth + 1;
        let limit = self.renderer.options.max_depth;
        if depth > limit {
            return Err(NestingTooDeep { limit }.into());
        }
        Ok(RenderContext {
            renderer: self.renderer,
            depth,
        })
    }
}

/// Appends claimed output; block output is kept apart from its neighbours.
fn commit(tag_type: TagType, scratch: &str, out: &mut String) {
    match tag_type {
        TagType::Block => {
            out.push_str("\n\n");
            out.push_str(scratch);
            out.push_str("\n\n");
        }
        TagType::Inline => out.push_str(scratch),
    }
}

/// Normalizes rendered Markdown.
///
/// Whitespace-only lines become empty, runs of blank lines collapse to one
/// and leading/trailing blank lines are removed. Fenced code blocks are
/// copied verbatim.
pub(crate) fn tidy(markdown: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut previous_blank = true;
    let mut fence: Option<&str> = None;

    for line in markdown.lines() {
        let trimmed = line.trim_start();

        if let Some(marker) = fence {
            lines.push(line);
            if trimmed.trim_end() == marker {
                fence = None;
            }
            previous_blank = false;
            continue;
        }

        if trimmed.starts_with("```") {
            let ticks = trimmed.len() - trimmed.trim_start_matches('`').len();
            fence = Some(&trimmed[..ticks]);
            lines.push(line);
            previous_blank = false;
            continue;
        }

        if trimmed.is_empty() {
            if !previous_blank {
                lines.push("");
                previous_blank = true;
            }
        } else {
            lines.push(line);
            previous_blank = false;
        }
    }

    while lines.last() == Some(&"") {
        lines.pop();
    }
    lines.join("\n")
}
