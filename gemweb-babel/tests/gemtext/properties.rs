//! Property tests for the classifier and block builder

use gemweb_babel::formats::gemtext::parser::{classify, ClassifierState};
use gemweb_babel::formats::gemtext::serializer::serialize_document;
use gemweb_babel::ir::events::LineEvent;
use gemweb_babel::ir::nodes::{Block, Inline};
use gemweb_babel::to_document;
use proptest::prelude::*;

/// Lines starting with a letter never carry a line marker.
fn plain_line() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ,.]{0,40}"
}

fn any_line() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "",
        "hello world",
        "# Heading",
        "## Sub heading",
        "* item",
        "> quoted",
        "=> gemini://example.org/ Example",
        "=> /bare",
        "```",
        "```rust",
        "    indented code",
    ])
}

/// Joins lines, turning any fence with alt text that would close an open
/// region into a bare fence.
fn balanced(lines: &[&str]) -> String {
    let mut open = false;
    let mut out = Vec::with_capacity(lines.len());
    for &line in lines {
        if line.starts_with("```") {
            out.push(if open { "```" } else { line });
            open = !open;
        } else {
            out.push(line);
        }
    }
    out.join("\n")
}

proptest! {
    #[test]
    fn plain_lines_classify_as_text(line in plain_line()) {
        let (event, next) = classify(&line, 1, &ClassifierState::default()).unwrap();
        prop_assert_eq!(event, LineEvent::Text { text: line.clone() });
        prop_assert_eq!(next, ClassifierState::default());
    }

    #[test]
    fn consecutive_text_lines_form_one_paragraph(lines in prop::collection::vec(plain_line(), 1..12)) {
        let doc = to_document(&lines.join("\n")).unwrap();
        let expected: Vec<Inline> = lines.iter().map(|l| Inline::text(l.as_str())).collect();
        prop_assert_eq!(doc.body, vec![Block::Paragraph { fragments: expected }]);
    }

    #[test]
    fn any_line_inside_preformatting_is_content(line in plain_line().prop_map(|l| format!("=> {l}"))) {
        let state = ClassifierState { preformatting_open: true, pending_alt_text: None };
        let (event, _) = classify(&line, 2, &state).unwrap();
        prop_assert_eq!(event, LineEvent::PreformattedText { text: line.clone() });
    }

    #[test]
    fn canonical_gemtext_reparses_to_same_document(lines in prop::collection::vec(any_line(), 0..30)) {
        let source = balanced(&lines);
        let doc = to_document(&source).unwrap();

        let written = serialize_document(&doc);
        prop_assert_eq!(to_document(&written).unwrap(), doc);
    }

    #[test]
    fn converting_twice_gives_equal_documents(lines in prop::collection::vec(any_line(), 0..30)) {
        let source = balanced(&lines);
        prop_assert_eq!(to_document(&source).unwrap(), to_document(&source).unwrap());
    }

    #[test]
    fn blank_lines_never_produce_blocks(count in 0usize..20) {
        let doc = to_document(&"\n".repeat(count)).unwrap();
        prop_assert!(doc.body.is_empty());
    }
}
