//! HTML document template for raw note exports.

use minijinja::{Environment, context};

/// Default document for raw HTML export.
///
/// `title` and `content` are inserted unescaped: the content is the note's
/// own HTML and is meant to render as-is.
pub const RAW_HTML_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; max-width: 800px; margin: 0 auto; padding: 20px; }
        .callout { border-left: 4px solid #3b82f6; padding: 1rem; margin: 1rem 0; background-color: #f8fafc; }
        .callout.info { border-left-color: #3b82f6; background-color: #eff6ff; }
        .callout.warning { border-left-color: #f59e0b; background-color: #fffbeb; }
        .callout.error { border-left-color: #ef4444; background-color: #fef2f2; }
        .callout.success { border-left-color: #10b981; background-color: #ecfdf5; }
        table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
        th, td { border: 1px solid #d1d5db; padding: 0.5rem; text-align: left; }
        th { background-color: #f9fafb; font-weight: 600; }
        pre { background-color: #f3f4f6; padding: 1rem; border-radius: 0.375rem; overflow-x: auto; }
        code { background-color: #f3f4f6; padding: 0.125rem 0.25rem; border-radius: 0.25rem; font-family: 'Monaco', 'Menlo', monospace; }
    </style>
</head>
<body>
    <h1>{{ title }}</h1>
    {{ content }}
</body>
</html>"##;

/// Renders a raw HTML document.
///
/// `template` replaces [`RAW_HTML_TEMPLATE`] when given. The template is
/// registered without an `.html` extension, so values are not
/// auto-escaped.
pub fn render_raw_html(
    template: Option<&str>,
    title: &str,
    content: &str,
) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("note", template.unwrap_or(RAW_HTML_TEMPLATE))?;
    let tmpl = env.get_template("note")?;

    tmpl.render(context! {
        title => title,
        content => content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_includes_title_twice() {
        let html = render_raw_html(None, "Test Note", "").unwrap();
        assert!(html.contains("<title>Test Note</title>"));
        assert!(html.contains("<h1>Test Note</h1>"));
    }

    #[test]
    fn default_template_includes_content_verbatim() {
        let content = r#"<div class="callout" data-callout="tip"><p>a &amp; b</p></div>"#;
        let html = render_raw_html(None, "T", content).unwrap();
        assert!(html.contains(content));
    }

    #[test]
    fn title_is_not_escaped() {
        let html = render_raw_html(None, "Q&A <draft>", "").unwrap();
        assert!(html.contains("<title>Q&A <draft></title>"));
    }

    #[test]
    fn default_template_includes_doctype_and_viewport() {
        let html = render_raw_html(None, "T", "").unwrap();
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains("width=device-width, initial-scale=1.0"));
        assert!(html.ends_with("</body>\n</html>"));
    }

    #[test]
    fn default_template_styles_callouts_and_tables() {
        let html = render_raw_html(None, "T", "").unwrap();
        for selector in [
            ".callout {",
            ".callout.info",
            ".callout.warning",
            ".callout.error",
            ".callout.success",
            "th, td {",
            "pre {",
            "code {",
        ] {
            assert!(html.contains(selector), "missing {selector}");
        }
        assert!(html.contains("width: 100%;"));
    }

    #[test]
    fn body_layout_matches() {
        let html = render_raw_html(None, "T", "<p>x</p>").unwrap();
        assert!(html.contains("<body>\n    <h1>T</h1>\n    <p>x</p>\n</body>"));
    }

    #[test]
    fn custom_template() {
        let html = render_raw_html(Some("CUSTOM: {{ title }} - {{ content }}"), "Mine", "<p>x</p>")
            .unwrap();
        assert_eq!(html, "CUSTOM: Mine - <p>x</p>");
    }

    #[test]
    fn invalid_custom_template_errors() {
        assert!(render_raw_html(Some("{% if %}"), "T", "").is_err());
    }
}
