//! Parsing tests for gemtext (gemtext → Document)
//!
//! These drive whole documents through the public API and check the block
//! tree that comes out.

use super::KITCHENSINK;
use gemweb_babel::format::Format;
use gemweb_babel::formats::gemtext::parser::parse_lines;
use gemweb_babel::formats::gemtext::GemtextFormat;
use gemweb_babel::ir::events::LineEvent;
use gemweb_babel::ir::nodes::{Block, Inline};
use gemweb_babel::{to_document, ConversionError, FormatError, FormatRegistry};

#[test]
fn test_kitchensink_blocks() {
    let doc = to_document(KITCHENSINK).unwrap();
    let kinds: Vec<&str> = doc.body.iter().map(Block::kind).collect();
    assert_eq!(
        kinds,
        vec![
            "heading",
            "paragraph",
            "paragraph",
            "heading",
            "list",
            "quote",
            "heading",
            "preformatted",
            "paragraph",
        ]
    );
}

#[test]
fn test_kitchensink_links_merge_into_paragraph() {
    let doc = to_document(KITCHENSINK).unwrap();
    assert_eq!(
        doc.body[2],
        Block::Paragraph {
            fragments: vec![
                Inline::link("gemini://example.org/", Some("Example capsule")),
                Inline::link("/relative", None),
            ],
        }
    );
}

#[test]
fn test_kitchensink_preformatted_is_verbatim() {
    let doc = to_document(KITCHENSINK).unwrap();
    assert_eq!(
        doc.body[7],
        Block::Preformatted {
            alt_text: Some("rust".to_string()),
            content: "fn main() {\n    println!(\"# not a heading\");\n}\n".to_string(),
        }
    );
}

#[test]
fn test_line_events_are_lazy() {
    // A malformed line late in the document does not stop the early lines
    let mut events = parse_lines("Hello\n=>\nnever reached");
    assert!(matches!(
        events.next(),
        Some(Ok(ref line)) if line.event == LineEvent::Text { text: "Hello".to_string() }
    ));
    assert!(matches!(
        events.next(),
        Some(Err(ConversionError::MalformedLinkLine { line: 2 }))
    ));
    assert!(events.next().is_none());
}

#[test]
fn test_malformed_link_reports_line() {
    let err = to_document("# Title\n\n=>   \n").unwrap_err();
    assert_eq!(err, ConversionError::MalformedLinkLine { line: 3 });
    assert_eq!(err.to_string(), "line 3: link line has no URL");
}

#[test]
fn test_closing_fence_with_alt_text_is_rejected() {
    let err = to_document("```\ncode\n```python\n").unwrap_err();
    assert_eq!(
        err,
        ConversionError::UnexpectedClosingAltText {
            line: 3,
            alt_text: "python".to_string(),
        }
    );
}

#[test]
fn test_format_wraps_conversion_errors() {
    let err = GemtextFormat.parse("=>").unwrap_err();
    assert!(matches!(
        err,
        FormatError::Conversion(ConversionError::MalformedLinkLine { line: 1 })
    ));
}

#[test]
fn test_unterminated_preformatted_region_is_kept() {
    let doc = to_document("```\nstill code").unwrap();
    assert_eq!(
        doc.body,
        vec![Block::Preformatted {
            alt_text: None,
            content: "still code\n".to_string(),
        }]
    );
}

#[test]
fn test_crlf_and_bom_are_ignored() {
    let doc = to_document("\u{feff}# Title\r\nBody\r\n").unwrap();
    assert_eq!(
        doc.body,
        vec![
            Block::Heading {
                level: 1,
                text: "Title".to_string(),
            },
            Block::Paragraph {
                fragments: vec![Inline::text("Body")],
            },
        ]
    );
}

#[test]
fn test_empty_source_gives_empty_document() {
    let doc = to_document("").unwrap();
    assert!(doc.body.is_empty());
    assert!(doc.head.title.is_none());
}

#[test]
fn test_registry_round_trip_through_gemtext() {
    let registry = FormatRegistry::default();
    let doc = registry.parse(KITCHENSINK, "gemtext").unwrap();
    let written = registry.serialize(&doc, "gemtext").unwrap();
    assert_eq!(registry.parse(&written, "gemtext").unwrap(), doc);
}
