//! Gemtext serialization (Document → canonical gemtext)
//!
//! Writes every block back with its line markers and separates blocks with a
//! single blank line. Parsing the output again yields the same document, as
//! long as paragraph text does not itself start with a line marker (which the
//! parser never produces).

use crate::ir::nodes::{Block, Document, Inline};

pub fn serialize_document(doc: &Document) -> String {
    let mut out = String::new();
    for (idx, block) in doc.body.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        write_block(&mut out, block);
    }
    out
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Paragraph { fragments } => {
            for fragment in fragments {
                match fragment {
                    Inline::Text { text } => push_line(out, text),
                    Inline::Link { url, name } => {
                        out.push_str("=> ");
                        out.push_str(url);
                        if let Some(name) = name {
                            out.push(' ');
                            out.push_str(name);
                        }
                        out.push('\n');
                    }
                }
            }
        }
        Block::Heading { level, text } => {
            out.push_str(&"#".repeat(*level as usize));
            out.push(' ');
            push_line(out, text);
        }
        Block::List { items } => {
            for item in items {
                out.push_str("* ");
                push_line(out, item);
            }
        }
        Block::Quote { lines } => {
            for line in lines {
                out.push_str("> ");
                push_line(out, line);
            }
        }
        Block::Preformatted { alt_text, content } => {
            out.push_str("```");
            if let Some(alt) = alt_text {
                out.push_str(alt);
            }
            out.push('\n');
            out.push_str(content);
            if !content.is_empty() && !content.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }
    }
}

fn push_line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}
