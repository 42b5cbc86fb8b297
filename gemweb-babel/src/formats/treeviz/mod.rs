//! Treeviz formatter for block trees
//!
//! A visual, line based rendering of the block tree, meant for inspecting what
//! the block builder made of a document. Nesting is drawn with box characters,
//! every node is `<icon> <label>`, and labels are truncated to 30 characters.
//!
//! Example:
//!
//! ⧉ Document (3 blocks)
//! ├─ § h1 Welcome
//! ├─ ¶ 2 lines
//! │ ├─ ◦ Hello there
//! │ └─ ⊕ Example → https://e.com
//! └─ ☰ 2 items
//!   ├─ • A
//!   └─ • B

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::{Block, Document, Inline};

const MAX_LABEL: usize = 30;

fn truncate(label: &str) -> String {
    if label.chars().count() > MAX_LABEL {
        let cut: String = label.chars().take(MAX_LABEL - 1).collect();
        format!("{cut}…")
    } else {
        label.to_string()
    }
}

fn push_node(output: &mut String, prefix: &str, is_last: bool, icon: &str, label: &str) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!("{prefix}{connector} {icon} {}\n", truncate(label)));
}

fn format_block(output: &mut String, block: &Block, is_last: bool) {
    let icon = get_icon(block.kind());
    let child_prefix = if is_last { "  " } else { "│ " };

    match block {
        Block::Heading { level, text } => {
            push_node(output, "", is_last, icon, &format!("h{level} {text}"));
        }
        Block::Paragraph { fragments } => {
            push_node(output, "", is_last, icon, &plural(fragments.len(), "line"));
            for (i, fragment) in fragments.iter().enumerate() {
                let last = i == fragments.len() - 1;
                match fragment {
                    Inline::Text { text } => {
                        push_node(output, child_prefix, last, get_icon("text"), text)
                    }
                    Inline::Link { url, .. } => push_node(
                        output,
                        child_prefix,
                        last,
                        get_icon("link"),
                        &format!("{} → {url}", fragment.label()),
                    ),
                }
            }
        }
        Block::List { items } => {
            push_node(output, "", is_last, icon, &plural(items.len(), "item"));
            format_lines(output, child_prefix, get_icon("list-item"), items);
        }
        Block::Quote { lines } => {
            push_node(output, "", is_last, icon, &plural(lines.len(), "line"));
            format_lines(output, child_prefix, get_icon("line"), lines);
        }
        Block::Preformatted { alt_text, content } => {
            let lines: Vec<String> = content.lines().map(str::to_string).collect();
            let label = match alt_text {
                Some(alt) => format!("{alt} ({})", plural(lines.len(), "line")),
                None => plural(lines.len(), "line"),
            };
            push_node(output, "", is_last, icon, &label);
            format_lines(output, child_prefix, get_icon("line"), &lines);
        }
    }
}

fn format_lines(output: &mut String, prefix: &str, icon: &str, lines: &[String]) {
    for (i, line) in lines.iter().enumerate() {
        push_node(output, prefix, i == lines.len() - 1, icon, line);
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let mut output = format!(
        "{} Document ({})\n",
        get_icon("document"),
        plural(doc.body.len(), "block")
    );
    for (i, block) in doc.body.iter().enumerate() {
        format_block(&mut output, block, i == doc.body.len() - 1);
    }
    output
}

/// Format implementation for treeviz format
#[derive(Debug, Default, Clone, Copy)]
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treeviz_layout() {
        let doc = Document::from_blocks(vec![
            Block::Heading {
                level: 1,
                text: "Welcome".to_string(),
            },
            Block::Paragraph {
                fragments: vec![
                    Inline::text("Hello there"),
                    Inline::link("https://e.com", Some("Example")),
                ],
            },
            Block::List {
                items: vec!["A".to_string(), "B".to_string()],
            },
        ]);

        assert_eq!(
            to_treeviz_str(&doc),
            "⧉ Document (3 blocks)\n\
             ├─ § h1 Welcome\n\
             ├─ ¶ 2 lines\n\
             │ ├─ ◦ Hello there\n\
             │ └─ ⊕ Example → https://e.com\n\
             └─ ☰ 2 items\n\
            \x20 ├─ • A\n\
            \x20 └─ • B\n"
        );
    }

    #[test]
    fn test_long_labels_are_truncated() {
        let doc = Document::from_blocks(vec![Block::Quote {
            lines: vec!["x".repeat(40)],
        }]);
        let output = to_treeviz_str(&doc);
        let expected = format!("  └─ ↵ {}…\n", "x".repeat(29));
        assert!(output.ends_with(&expected));
    }

    #[test]
    fn test_preformatted_label_uses_alt_text() {
        let doc = Document::from_blocks(vec![Block::Preformatted {
            alt_text: Some("rust".to_string()),
            content: "fn main() {}\n".to_string(),
        }]);
        assert_eq!(
            to_treeviz_str(&doc),
            "⧉ Document (1 block)\n└─ 𝒱 rust (1 line)\n  └─ ↵ fn main() {}\n"
        );
    }
}
