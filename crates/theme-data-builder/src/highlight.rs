/*
 * highlight.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Syntax highlighting of sample configuration files to HTML.
 */

use anyhow::{Context, Result, anyhow};
use once_cell::sync::Lazy;
use syntect::html::{ClassedHTMLGenerator, ClassStyle};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// CSS class on the wrapper element; the consuming site styles it.
pub const HIGHLIGHT_CSS_CLASS: &str = "code";

// Loading the default syntax set is expensive; share one per process.
static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// Highlight Python source as class-annotated HTML.
///
/// The markup is a `<div class="code"><pre>...</pre></div>` block whose
/// spans carry syntax classes rather than inline styles, so one
/// stylesheet on the site themes every sample at once.
pub fn highlight_python(source: &str) -> Result<String> {
    let syntax = SYNTAX_SET
        .find_syntax_by_name("Python")
        .ok_or_else(|| anyhow!("Python syntax definition missing from default syntax set"))?;

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, ClassStyle::Spaced);
    for line in LinesWithEndings::from(source) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .context("failed to highlight configuration sample")?;
    }
    let spans = generator.finalize();

    Ok(format!(
        "<div class=\"{HIGHLIGHT_CSS_CLASS}\"><pre>{spans}</pre></div>\n"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_framing() {
        let html = highlight_python("x = 1\n").unwrap();
        assert!(html.starts_with("<div class=\"code\"><pre>"));
        assert!(html.ends_with("</pre></div>\n"));
    }

    #[test]
    fn test_spans_carry_classes_not_styles() {
        let html = highlight_python("def f():\n    return 42\n").unwrap();
        assert!(html.contains("<span class="));
        assert!(!html.contains("style="));
    }

    #[test]
    fn test_source_text_is_preserved() {
        let html = highlight_python("BLOG_TITLE = \"Demo\"\n").unwrap();
        assert!(html.contains("BLOG_TITLE"));
    }

    #[test]
    fn test_empty_source() {
        let html = highlight_python("").unwrap();
        assert!(html.starts_with("<div class=\"code\"><pre>"));
    }
}
