//! Standard HTML → Markdown conversion.
//!
//! Used for every element no rule claims. Children are rendered back through
//! the dispatcher so rules apply at any depth (a callout inside a list item
//! is still a callout).

use std::fmt::Write;

use super::{RenderContext, RenderError, tidy};
use crate::html::{Element, Node, TagType};

/// Characters escaped in plain text.
const ESCAPED: [char; 6] = ['\\', '*', '_', '`', '[', ']'];

/// Elements whose content never reaches the output.
const DROPPED: [&str; 8] = [
    "head", "link", "meta", "noscript", "script", "style", "template", "title",
];

/// Writes a text node: whitespace runs collapse to one space and Markdown
/// punctuation is escaped.
pub(super) fn render_text(text: &str, out: &mut String) {
    let mut previous_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !previous_space {
                out.push(' ');
            }
            previous_space = true;
            continue;
        }
        previous_space = false;
        if ESCAPED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Renders one element the standard way.
pub(super) fn render_element(
    ctx: &RenderContext<'_>,
    element: &Element,
    out: &mut String,
) -> Result<(), RenderError> {
    match element.tag() {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => render_heading(ctx, element, out),
        "p" => render_paragraph(ctx, element, out),
        "br" => {
            out.push_str("  \n");
            Ok(())
        }
        "hr" => {
            out.push_str("\n\n---\n\n");
            Ok(())
        }
        "strong" | "b" => render_delimited(ctx, element, "**", out),
        "em" | "i" => render_delimited(ctx, element, "*", out),
        "del" | "s" | "strike" => render_delimited(ctx, element, "~~", out),
        "code" => render_inline_code(element, out),
        "pre" => render_code_block(element, out),
        "a" => render_link(ctx, element, out),
        "img" => render_image(element, out),
        "ul" => render_list(ctx, element, false, out),
        "ol" => render_list(ctx, element, true, out),
        "blockquote" => render_blockquote(ctx, element, out),
        "table" => render_table(ctx, element, out),
        tag if DROPPED.contains(&tag) => Ok(()),
        _ => match element.tag_type() {
            TagType::Block => {
                out.push_str("\n\n");
                ctx.render_children(element, out)?;
                out.push_str("\n\n");
                Ok(())
            }
            TagType::Inline => ctx.render_children(element, out),
        },
    }
}

fn render_to_string(ctx: &RenderContext<'_>, element: &Element) -> Result<String, RenderError> {
    let mut inner = String::new();
    ctx.render_children(element, &mut inner)?;
    Ok(inner)
}

/// Joins rendered inline content onto a single line.
fn single_line(content: &str) -> String {
    content.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn render_heading(
    ctx: &RenderContext<'_>,
    element: &Element,
    out: &mut String,
) -> Result<(), RenderError> {
    let level = element.tag()[1..].parse::<usize>().unwrap_or(1);
    let content = single_line(&render_to_string(ctx, element)?);
    if content.is_empty() {
        return Ok(());
    }
    write!(out, "\n\n{} {}\n\n", "#".repeat(level), content)?;
    Ok(())
}

fn render_paragraph(
    ctx: &RenderContext<'_>,
    element: &Element,
    out: &mut String,
) -> Result<(), RenderError> {
    let inner = render_to_string(ctx, element)?;
    let content = inner
        .lines()
        .map(str::trim_start)
        .collect::<Vec<_>>()
        .join("\n");
    let content = content.trim();
    if content.is_empty() {
        return Ok(());
    }
    write!(out, "\n\n{content}\n\n")?;
    Ok(())
}

/// Emphasis-style wrappers. Surrounding whitespace moves outside the
/// delimiters so `<em> x </em>` becomes ` *x* `.
fn render_delimited(
    ctx: &RenderContext<'_>,
    element: &Element,
    delimiter: &str,
    out: &mut String,
) -> Result<(), RenderError> {
    let inner = render_to_string(ctx, element)?;
    let content = inner.trim();
    if content.is_empty() {
        if !inner.is_empty() {
            out.push(' ');
        }
        return Ok(());
    }

    if inner.starts_with(char::is_whitespace) {
        out.push(' ');
    }
    write!(out, "{delimiter}{content}{delimiter}")?;
    if inner.ends_with(char::is_whitespace) {
        out.push(' ');
    }
    Ok(())
}

/// Longest run of consecutive backticks in `text`.
fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn render_inline_code(element: &Element, out: &mut String) -> Result<(), RenderError> {
    let code = single_line(&element.text_content());
    if code.is_empty() {
        return Ok(());
    }

    let fence = "`".repeat(longest_backtick_run(&code) + 1);
    let padding = if code.starts_with('`') || code.ends_with('`') {
        " "
    } else {
        ""
    };
    write!(out, "{fence}{padding}{code}{padding}{fence}")?;
    Ok(())
}

/// Language of a code block, from `class="language-…"` on the `pre` or on a
/// `code` child.
fn code_language(element: &Element) -> Option<&str> {
    fn from_class(element: &Element) -> Option<&str> {
        element
            .attr("class")?
            .split_whitespace()
            .find_map(|class| class.strip_prefix("language-"))
    }

    from_class(element).or_else(|| {
        element
            .children()
            .iter()
            .filter_map(Node::as_element)
            .filter(|child| child.tag() == "code")
            .find_map(from_class)
    })
}

fn render_code_block(element: &Element, out: &mut String) -> Result<(), RenderError> {
    let text = element.text_content();
    let code = text.strip_suffix('\n').unwrap_or(&text);
    let fence = "`".repeat((longest_backtick_run(code) + 1).max(3));
    let language = code_language(element).unwrap_or("");

    write!(out, "\n\n{fence}{language}\n{code}\n{fence}\n\n")?;
    Ok(())
}

/// Wraps a link destination in angle brackets when it would otherwise break
/// the link syntax.
fn destination(url: &str) -> String {
    if url.contains([' ', '(', ')']) {
        format!("<{url}>")
    } else {
        url.to_string()
    }
}

fn title_suffix(element: &Element) -> String {
    match element.attr("title") {
        Some(title) if !title.trim().is_empty() => {
            format!(" \"{}\"", title.replace('"', "\\\""))
        }
        _ => String::new(),
    }
}

fn render_link(
    ctx: &RenderContext<'_>,
    element: &Element,
    out: &mut String,
) -> Result<(), RenderError> {
    let inner = render_to_string(ctx, element)?;
    let href = element.attr("href").map(str::trim).unwrap_or("");
    if href.is_empty() {
        out.push_str(&inner);
        return Ok(());
    }

    let text = single_line(&inner);
    let text = if text.is_empty() { href.to_string() } else { text };
    write!(out, "[{}]({}{})", text, destination(href), title_suffix(element))?;
    Ok(())
}

fn render_image(element: &Element, out: &mut String) -> Result<(), RenderError> {
    let src = element.attr("src").map(str::trim).unwrap_or("");
    if src.is_empty() {
        return Ok(());
    }
    let alt = element.attr("alt").unwrap_or("");
    write!(out, "![{}]({}{})", alt, destination(src), title_suffix(element))?;
    Ok(())
}

/// CommonMark list numbers have at most nine digits.
const MAX_LIST_NUMBER: u64 = 999_999_999;

fn render_list(
    ctx: &RenderContext<'_>,
    element: &Element,
    ordered: bool,
    out: &mut String,
) -> Result<(), RenderError> {
    let start = element
        .attr("start")
        .and_then(|start| start.trim().parse::<i64>().ok())
        .map_or(1, |start| start.clamp(0, MAX_LIST_NUMBER as i64) as u64);

    let mut items: Vec<String> = Vec::new();
    for child in element.children() {
        let Node::Element(child) = child else {
            // Whitespace between items.
            continue;
        };

        let mut body = String::new();
        if child.tag() == "li" {
            ctx.render_children(child, &mut body)?;
            items.push(tidy(&body));
        } else {
            // Stray content between items (often a nested list) belongs to
            // the previous item.
            ctx.render_element(child, &mut body)?;
            let body = tidy(&body);
            match items.last_mut() {
                Some(last) => {
                    last.push_str("\n\n");
                    last.push_str(&body);
                }
                None => items.push(body),
            }
        }
    }

    if items.is_empty() {
        return Ok(());
    }

    out.push_str("\n\n");
    for (index, item) in items.iter().enumerate() {
        let marker = if ordered {
            let number = start.saturating_add(index as u64).min(MAX_LIST_NUMBER);
            format!("{number}. ")
        } else {
            "- ".to_string()
        };
        let indent = " ".repeat(marker.len());

        let mut lines = item.lines();
        match lines.next() {
            Some(first) => {
                out.push_str(&marker);
                out.push_str(first);
            }
            None => out.push_str(marker.trim_end()),
        }
        for line in lines {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&indent);
                out.push_str(line);
            }
        }
        out.push('\n');
    }
    out.push('\n');
    Ok(())
}

fn render_blockquote(
    ctx: &RenderContext<'_>,
    element: &Element,
    out: &mut String,
) -> Result<(), RenderError> {
    let inner = tidy(&render_to_string(ctx, element)?);
    if inner.is_empty() {
        return Ok(());
    }

    out.push_str("\n\n");
    for line in inner.lines() {
        if line.is_empty() {
            out.push_str(">\n");
        } else {
            writeln!(out, "> {line}")?;
        }
    }
    out.push('\n');
    Ok(())
}

/// Collects `tr` elements, looking through `thead`, `tbody` and `tfoot`.
fn table_rows<'e>(element: &'e Element, rows: &mut Vec<&'e Element>) {
    for child in element.children().iter().filter_map(Node::as_element) {
        match child.tag() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => table_rows(child, rows),
            _ => {}
        }
    }
}

fn render_table(
    ctx: &RenderContext<'_>,
    element: &Element,
    out: &mut String,
) -> Result<(), RenderError> {
    let mut rows = Vec::new();
    table_rows(element, &mut rows);

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(rows.len());
    for row in rows {
        let mut rendered = Vec::new();
        for cell in row
            .children()
            .iter()
            .filter_map(Node::as_element)
            .filter(|cell| matches!(cell.tag(), "td" | "th"))
        {
            let content = single_line(&render_to_string(ctx, cell)?);
            rendered.push(content.replace('|', "\\|"));
        }
        cells.push(rendered);
    }

    let width = cells.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return Ok(());
    }

    out.push_str("\n\n");
    for (index, row) in cells.iter().enumerate() {
        out.push('|');
        for column in 0..width {
            let cell = row.get(column).map(String::as_str).unwrap_or("");
            write!(out, " {cell} |")?;
        }
        out.push('\n');

        if index == 0 {
            out.push('|');
            for _ in 0..width {
                out.push_str(" --- |");
            }
            out.push('\n');
        }
    }
    out.push('\n');
    Ok(())
}
