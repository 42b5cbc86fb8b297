//! Defines the flat line event representation of a gemtext document.

use serde::Serialize;

/// The classification of a single gemtext line.
///
/// A document is a flat sequence of these, one per source line. The set is
/// closed: every consumer matches it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LineEvent {
    /// Any line without a more specific marker. Empty text is a blank line.
    Text { text: String },
    Heading { level: u8, text: String },
    Link {
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    ListItem { text: String },
    Quote { text: String },
    /// Opens or closes a preformatted region. Only an opening toggle may carry
    /// alt text.
    PreformattingToggle {
        #[serde(skip_serializing_if = "Option::is_none")]
        alt_text: Option<String>,
    },
    /// A raw line inside a preformatted region.
    PreformattedText { text: String },
}

impl LineEvent {
    /// True for a `Text` event with no content.
    pub fn is_blank(&self) -> bool {
        matches!(self, LineEvent::Text { text } if text.is_empty())
    }

    /// Short name of the variant, used by the inspect views.
    pub fn kind(&self) -> &'static str {
        match self {
            LineEvent::Text { .. } => "text",
            LineEvent::Heading { .. } => "heading",
            LineEvent::Link { .. } => "link",
            LineEvent::ListItem { .. } => "list-item",
            LineEvent::Quote { .. } => "quote",
            LineEvent::PreformattingToggle { .. } => "preformatting-toggle",
            LineEvent::PreformattedText { .. } => "preformatted-text",
        }
    }
}

/// A line event together with the 1-based line number it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLine {
    pub line: usize,
    pub event: LineEvent,
}

impl SourceLine {
    pub fn new(line: usize, event: LineEvent) -> Self {
        Self { line, event }
    }
}
