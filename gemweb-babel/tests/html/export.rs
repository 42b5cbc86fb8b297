//! Export tests for HTML format (gemtext → HTML)
//!
//! These tests verify that gemtext documents are correctly converted to HTML
//! by checking the resulting markup.

use crate::gemtext::KITCHENSINK;
use gemweb_babel::format::Format;
use gemweb_babel::formats::html::HtmlFormat;
use gemweb_babel::{to_html, FormatError, FormatRegistry, HtmlOptions};
use insta::assert_snapshot;
use std::collections::HashMap;

fn compact() -> HtmlOptions {
    HtmlOptions {
        pretty: false,
        ..HtmlOptions::default()
    }
}

/// Body markup only, from compact output
fn body(source: &str) -> String {
    let html = to_html(source, &compact()).unwrap();
    let start = html.find("<body>").unwrap() + "<body>".len();
    let end = html.find("</body>").unwrap();
    html[start..end].to_string()
}

#[test]
fn test_worked_example() {
    let html = to_html("# Hi\n\nHello\n=> /x X\n* A\n* B\n", &HtmlOptions::default()).unwrap();
    assert_snapshot!(html.trim_end(), @r#"
<html>
  <head></head>
  <body>
    <h1>Hi</h1>
    <p>Hello<br><a href="/x">X</a></p>
    <ul>
      <li>A</li>
      <li>B</li>
    </ul>
  </body>
</html>
"#);
}

#[test]
fn test_kitchensink_export() {
    let html = to_html(KITCHENSINK, &HtmlOptions::default()).unwrap();
    assert_snapshot!(html.trim_end(), @r##"
<html>
  <head></head>
  <body>
    <h1>Kitchen sink</h1>
    <p>A capsule page exercising every line type.<br>It spans two lines.</p>
    <p><a href="gemini://example.org/">Example capsule</a><br><a href="/relative">/relative</a></p>
    <h2>Lists</h2>
    <ul>
      <li>First</li>
      <li>Second</li>
    </ul>
    <blockquote>Quoted once<br>and again</blockquote>
    <h3>Code</h3>
    <pre aria-label="rust">fn main() {
    println!("# not a heading");
}
</pre>
    <p>Trailing paragraph.</p>
  </body>
</html>
"##);
}

#[test]
fn test_quote_runs_split_on_blank_lines() {
    assert_eq!(
        body("> one\n> two\n\n> three"),
        "<blockquote>one<br>two</blockquote><blockquote>three</blockquote>"
    );
}

#[test]
fn test_heading_closes_paragraph() {
    assert_eq!(body("text\n## Next\nmore"), "<p>text</p><h2>Next</h2><p>more</p>");
}

#[test]
fn test_markup_in_source_is_escaped() {
    assert_eq!(
        body("<script>alert(1)</script>\n=> /a?b=1&c=2 A & B"),
        "<p>&lt;script&gt;alert(1)&lt;/script&gt;<br><a href=\"/a?b=1&amp;c=2\">A &amp; B</a></p>"
    );
}

#[test]
fn test_empty_document() {
    assert_eq!(
        to_html("", &compact()).unwrap(),
        "<html><head></head><body></body></html>\n"
    );
}

#[test]
fn test_conversion_errors_surface_through_to_html() {
    let err = to_html("ok\n=>\n", &HtmlOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "Parse error: line 2: link line has no URL");
}

#[test]
fn test_html_format_rejects_parsing() {
    let err = HtmlFormat::default().parse("<p>hi</p>").unwrap_err();
    assert!(matches!(err, FormatError::NotSupported(_)));
}

#[test]
fn test_registry_options_reach_the_serializer() {
    let registry = FormatRegistry::default();
    let doc = registry.parse("# Notes\nbody", "gemtext").unwrap();

    let mut options = HashMap::new();
    options.insert("pretty".to_string(), "false".to_string());
    options.insert("doctype".to_string(), "true".to_string());
    options.insert("title-from-heading".to_string(), "true".to_string());
    options.insert("lang".to_string(), "en".to_string());

    let html = registry
        .serialize_with_options(&doc, "html", &options)
        .unwrap();
    assert_eq!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\"><head><title>Notes</title></head><body><h1>Notes</h1><p>body</p></body></html>\n"
    );
}

#[test]
fn test_unknown_option_is_rejected() {
    let registry = FormatRegistry::default();
    let doc = registry.parse("hi", "gemtext").unwrap();

    let mut options = HashMap::new();
    options.insert("theme".to_string(), "dark".to_string());

    let err = registry
        .serialize_with_options(&doc, "html", &options)
        .unwrap_err();
    assert!(matches!(err, FormatError::NotSupported(_)));
}
