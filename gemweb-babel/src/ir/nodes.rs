//! Core data structures for the block tree.

use serde::Serialize;

/// The root of a converted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub head: Head,
    pub body: Vec<Block>,
}

impl Document {
    /// Wraps a finished block sequence as the body of a document with an
    /// empty head.
    pub fn from_blocks(body: Vec<Block>) -> Self {
        Document {
            head: Head::default(),
            body,
        }
    }

    /// Text of the first heading in the body, if any.
    pub fn first_heading(&self) -> Option<&str> {
        self.body.iter().find_map(|block| match block {
            Block::Heading { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Document metadata. Gemtext has none, so the assembler leaves it empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Head {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A structural unit of the document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Block {
    /// Consecutive text and link lines, rendered with line breaks between
    /// fragments.
    Paragraph { fragments: Vec<Inline> },
    Heading { level: u8, text: String },
    List { items: Vec<String> },
    /// Consecutive quote lines.
    Quote { lines: Vec<String> },
    /// Verbatim content. Every interior line is followed by `\n`.
    Preformatted {
        #[serde(skip_serializing_if = "Option::is_none")]
        alt_text: Option<String>,
        content: String,
    },
}

impl Block {
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph { .. } => "paragraph",
            Block::Heading { .. } => "heading",
            Block::List { .. } => "list",
            Block::Quote { .. } => "quote",
            Block::Preformatted { .. } => "preformatted",
        }
    }
}

/// One line-sized fragment of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Inline {
    Text { text: String },
    Link {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text { text: text.into() }
    }

    pub fn link(url: impl Into<String>, name: Option<&str>) -> Self {
        Inline::Link {
            url: url.into(),
            name: name.map(str::to_string),
        }
    }

    /// The text a reader sees: the link name, falling back to the URL.
    pub fn label(&self) -> &str {
        match self {
            Inline::Text { text } => text,
            Inline::Link { url, name } => name.as_deref().unwrap_or(url),
        }
    }
}
