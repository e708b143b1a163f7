//! Export tests for HTML format (Markdown → HTML/XHTML)
//!
//! Markdown is dispatched straight into the HTML handler through the registry.

use crate::common::{convert, options};
use markdom::FormatRegistry;
use pretty_assertions::assert_eq;

#[test]
fn test_paragraph() {
    assert_eq!(convert("Hi\n", "markdown", "html"), "<p>Hi</p>");
}

#[test]
fn test_blocks_and_lists() {
    let html = convert("# T\n\n* a\n* b\n\n---\n", "markdown", "html");
    assert_eq!(
        html,
        "<h1>T</h1>\n<ul>\n<li>\n<p>a</p>\n</li>\n<li>\n<p>b</p>\n</li>\n</ul>\n<hr>"
    );
}

#[test]
fn test_inline_markup() {
    let html = convert(
        "*a* **b** `<c>` [d](http://x \"t\") ![e](i.png)",
        "markdown",
        "html",
    );
    assert_eq!(
        html,
        "<p><em>a</em> <strong>b</strong> <code>&lt;c&gt;</code> \
         <a href=\"http://x\" title=\"t\">d</a> <img src=\"i.png\" alt=\"e\"></p>"
    );
}

#[test]
fn test_xhtml_void_elements() {
    let xhtml = convert("a  \nb\n\n***\n", "markdown", "xhtml");
    assert_eq!(xhtml, "<p>a<br />b</p>\n<hr />");
}

#[test]
fn test_soft_breaks_option() {
    let registry = FormatRegistry::with_defaults();
    let html = registry
        .convert(
            "a\nb",
            "markdown",
            "html",
            &options(&[("break_soft_breaks", "true")]),
        )
        .unwrap();
    assert_eq!(html, "<p>a<br>b</p>");
}

#[test]
fn test_invalid_option_value() {
    let registry = FormatRegistry::with_defaults();
    let result = registry.convert(
        "a",
        "markdown",
        "html",
        &options(&[("escape_html", "maybe")]),
    );
    assert!(result.is_err());
}
