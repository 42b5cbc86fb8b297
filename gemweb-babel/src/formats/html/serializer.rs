//! HTML serialization (Document → HTML export)
//!
//! Pipeline: Document → RcDom element tree → (optional indentation) → HTML string.
//! The DOM is only ever built and written here; html5ever does the escaping
//! and tag emission.

use crate::error::FormatError;
use crate::formats::html::HtmlOptions;
use crate::ir::nodes::{Block, Document, Inline};
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

const INDENT: &str = "  ";

/// Elements that sit inside text and must never be surrounded by indentation.
const INLINE_ELEMENTS: &[&str] = &["a", "br"];

/// Serialize a document to a complete HTML page
pub fn serialize_to_html(doc: &Document, options: &HtmlOptions) -> Result<String, FormatError> {
    let dom = build_html_dom(doc, options);

    let root = dom
        .document
        .children
        .borrow()
        .first()
        .cloned()
        .ok_or_else(|| FormatError::SerializationError("Empty document".to_string()))?;

    if options.pretty {
        indent(&root, 0);
    }

    let mut html = String::new();
    if options.doctype {
        html.push_str("<!DOCTYPE html>\n");
    }
    html.push_str(&serialize_node(&root)?);
    html.push('\n');

    Ok(html)
}

/// Build the `<html>` element tree for a document
fn build_html_dom(doc: &Document, options: &HtmlOptions) -> RcDom {
    let dom = RcDom::default();

    let mut html_attrs = vec![];
    if let Some(lang) = &options.lang {
        html_attrs.push(("lang", lang.as_str()));
    }
    let html = create_element("html", html_attrs);

    let head = create_element("head", vec![]);
    let title = doc.head.title.as_deref().or_else(|| {
        if options.title_from_heading {
            doc.first_heading()
        } else {
            None
        }
    });
    if let Some(title) = title {
        let title_element = create_element("title", vec![]);
        append(&title_element, create_text(title));
        append(&head, title_element);
    }
    append(&html, head);

    let body = create_element("body", vec![]);
    for block in &doc.body {
        append(&body, render_block(block));
    }
    append(&html, body);

    dom.document.children.borrow_mut().push(html);
    dom
}

fn render_block(block: &Block) -> Handle {
    match block {
        Block::Paragraph { fragments } => {
            let p = create_element("p", vec![]);
            for (idx, fragment) in fragments.iter().enumerate() {
                if idx > 0 {
                    append(&p, create_element("br", vec![]));
                }
                append(&p, render_inline(fragment));
            }
            p
        }

        Block::Heading { level, text } => {
            let tag = format!("h{}", (*level).clamp(1, 6));
            let heading = create_element(&tag, vec![]);
            append(&heading, create_text(text));
            heading
        }

        Block::List { items } => {
            let ul = create_element("ul", vec![]);
            for item in items {
                let li = create_element("li", vec![]);
                append(&li, create_text(item));
                append(&ul, li);
            }
            ul
        }

        Block::Quote { lines } => {
            let blockquote = create_element("blockquote", vec![]);
            for (idx, line) in lines.iter().enumerate() {
                if idx > 0 {
                    append(&blockquote, create_element("br", vec![]));
                }
                append(&blockquote, create_text(line));
            }
            blockquote
        }

        Block::Preformatted { alt_text, content } => {
            let mut attrs = vec![];
            if let Some(alt) = alt_text {
                attrs.push(("aria-label", alt.as_str()));
            }
            let pre = create_element("pre", attrs);
            if content.starts_with('\n') {
                // Parsers drop a newline directly after <pre>
                append(&pre, create_text(&format!("\n{content}")));
            } else if !content.is_empty() {
                append(&pre, create_text(content));
            }
            pre
        }
    }
}

fn render_inline(inline: &Inline) -> Handle {
    match inline {
        Inline::Text { text } => create_text(text),
        Inline::Link { url, .. } => {
            let anchor = create_element("a", vec![("href", url.as_str())]);
            append(&anchor, create_text(inline.label()));
            anchor
        }
    }
}

/// Insert newline + indentation text nodes between the children of block
/// containers. Elements holding text (or inline elements) are left alone so
/// rendered content is never changed.
fn indent(node: &Handle, depth: usize) {
    let children: Vec<Handle> = node.children.borrow().clone();
    if children.is_empty() || !children.iter().all(is_block_element) {
        return;
    }

    let mut indented = Vec::with_capacity(children.len() * 2 + 1);
    for child in children {
        indent(&child, depth + 1);
        indented.push(create_text(&format!("\n{}", INDENT.repeat(depth + 1))));
        indented.push(child);
    }
    indented.push(create_text(&format!("\n{}", INDENT.repeat(depth))));

    *node.children.borrow_mut() = indented;
}

fn is_block_element(node: &Handle) -> bool {
    match &node.data {
        NodeData::Element { name, .. } => !INLINE_ELEMENTS.contains(&&*name.local),
        _ => false,
    }
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize one node, including the node itself, to an HTML string
fn serialize_node(node: &Handle) -> Result<String, FormatError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts).map_err(|e| {
        FormatError::SerializationError(format!("HTML serialization failed: {e}"))
    })?;

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact() -> HtmlOptions {
        HtmlOptions {
            pretty: false,
            ..HtmlOptions::default()
        }
    }

    fn body_of(blocks: Vec<Block>) -> String {
        let html = serialize_to_html(&Document::from_blocks(blocks), &compact()).unwrap();
        let start = html.find("<body>").unwrap() + "<body>".len();
        let end = html.find("</body>").unwrap();
        html[start..end].to_string()
    }

    /// Text content of the first `<pre>` once a browser-style parser has read `html`
    fn parsed_pre_text(html: &str) -> Option<String> {
        use html5ever::parse_document;
        use html5ever::tendril::TendrilSink;

        fn find_pre(node: &Handle) -> Option<Handle> {
            if let NodeData::Element { name, .. } = &node.data {
                if &*name.local == "pre" {
                    return Some(node.clone());
                }
            }
            node.children.borrow().iter().find_map(find_pre)
        }

        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        let pre = find_pre(&dom.document)?;
        let mut text = String::new();
        for child in pre.children.borrow().iter() {
            if let NodeData::Text { contents } = &child.data {
                text.push_str(&contents.borrow());
            }
        }
        Some(text)
    }

    #[test]
    fn test_preformatted_leading_blank_line_survives_parsing() {
        let content = "\nfirst line was blank\n".to_string();
        let doc = Document::from_blocks(vec![Block::Preformatted {
            alt_text: None,
            content: content.clone(),
        }]);

        for options in [compact(), HtmlOptions::default()] {
            let html = serialize_to_html(&doc, &options).unwrap();
            assert_eq!(parsed_pre_text(&html), Some(content.clone()));
        }
    }

    #[test]
    fn test_preformatted_content_survives_parsing() {
        let content = "  indented\n\nafter gap\n".to_string();
        let doc = Document::from_blocks(vec![Block::Preformatted {
            alt_text: Some("txt".to_string()),
            content: content.clone(),
        }]);
        let html = serialize_to_html(&doc, &HtmlOptions::default()).unwrap();
        assert_eq!(parsed_pre_text(&html), Some(content));
    }

    #[test]
    fn test_empty_document_has_empty_head_and_body() {
        let html = serialize_to_html(&Document::default(), &compact()).unwrap();
        assert_eq!(html, "<html><head></head><body></body></html>\n");
    }

    #[test]
    fn test_paragraph_fragments_joined_by_breaks() {
        let body = body_of(vec![Block::Paragraph {
            fragments: vec![
                Inline::text("Hello"),
                Inline::link("gemini://example.org/", Some("Example")),
                Inline::link("/plain", None),
            ],
        }]);
        assert_eq!(
            body,
            "<p>Hello<br><a href=\"gemini://example.org/\">Example</a><br><a href=\"/plain\">/plain</a></p>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let body = body_of(vec![Block::Heading {
            level: 2,
            text: "Fish & <Chips>".to_string(),
        }]);
        assert_eq!(body, "<h2>Fish &amp; &lt;Chips&gt;</h2>");
    }

    #[test]
    fn test_quote_lines_joined_by_breaks() {
        let body = body_of(vec![Block::Quote {
            lines: vec!["one".to_string(), "two".to_string()],
        }]);
        assert_eq!(body, "<blockquote>one<br>two</blockquote>");
    }

    #[test]
    fn test_preformatted_alt_text_becomes_label() {
        let body = body_of(vec![
            Block::Preformatted {
                alt_text: Some("ascii art".to_string()),
                content: " /\\_/\\\n( o.o )\n".to_string(),
            },
            Block::Preformatted {
                alt_text: Some("empty".to_string()),
                content: String::new(),
            },
        ]);
        assert_eq!(
            body,
            "<pre aria-label=\"ascii art\"> /\\_/\\\n( o.o )\n</pre><pre aria-label=\"empty\"></pre>"
        );
    }

    #[test]
    fn test_pretty_output_indents_block_containers() {
        let doc = Document::from_blocks(vec![
            Block::Paragraph {
                fragments: vec![Inline::text("Hi")],
            },
            Block::List {
                items: vec!["A".to_string()],
            },
        ]);
        let html = serialize_to_html(&doc, &HtmlOptions::default()).unwrap();
        assert_eq!(
            html,
            "<html>\n  <head></head>\n  <body>\n    <p>Hi</p>\n    <ul>\n      <li>A</li>\n    </ul>\n  </body>\n</html>\n"
        );
    }

    #[test]
    fn test_title_and_lang_options() {
        let doc = Document::from_blocks(vec![Block::Heading {
            level: 1,
            text: "My capsule".to_string(),
        }]);
        let options = HtmlOptions {
            pretty: false,
            doctype: true,
            title_from_heading: true,
            lang: Some("en".to_string()),
        };
        let html = serialize_to_html(&doc, &options).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains("<head><title>My capsule</title></head>"));
    }

    #[test]
    fn test_explicit_title_wins_over_heading() {
        let mut doc = Document::from_blocks(vec![Block::Heading {
            level: 1,
            text: "Heading".to_string(),
        }]);
        doc.head.title = Some("Explicit".to_string());
        let options = HtmlOptions {
            title_from_heading: true,
            ..compact()
        };
        let html = serialize_to_html(&doc, &options).unwrap();
        assert!(html.contains("<title>Explicit</title>"));
    }
}
