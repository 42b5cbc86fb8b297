//! Groups a flat stream of line events into blocks.
//!
//! # The High-Level Concept
//!
//! Gemtext has no explicit block structure: a paragraph is just a run of text
//! lines, a list a run of `* ` lines. The builder walks the line events once,
//! in order, keeping at most one block "open". Each event either extends the
//! open block (same kind of run), or closes it and starts something new.
//!
//! # Transitions
//!
//! | Event                | Open block            | Effect                                   |
//! |----------------------|-----------------------|------------------------------------------|
//! | `Heading`            | any                   | close, emit heading                      |
//! | `Quote`              | `Quote`               | append line                              |
//! | `Quote`              | other                 | close, open `Quote`                      |
//! | `PreformattingToggle`| `Preformatted`        | close (alt text is an error)             |
//! | `PreformattingToggle`| other                 | close, open `Preformatted`               |
//! | `PreformattedText`   | `Preformatted`        | append line + `\n`                       |
//! | `PreformattedText`   | other                 | error                                    |
//! | blank `Text`         | any                   | close                                    |
//! | `Text` / `Link`      | `Paragraph`           | append fragment                          |
//! | `Text` / `Link`      | other                 | close, open `Paragraph`                  |
//! | `ListItem`           | `List`                | append item                              |
//! | `ListItem`           | other                 | close, open `List`                       |
//!
//! Whatever is still open at the end of the stream is closed, including an
//! unterminated preformatted region. Block order always mirrors line order.

use crate::error::ConversionError;
use crate::ir::events::{LineEvent, SourceLine};
use crate::ir::nodes::{Block, Inline};
use tracing::debug;

/// The block currently being accumulated.
#[derive(Debug, Default)]
enum Open {
    #[default]
    None,
    Paragraph(Vec<Inline>),
    List(Vec<String>),
    Quote(Vec<String>),
    Preformatted {
        alt_text: Option<String>,
        content: String,
    },
}

impl Open {
    fn into_block(self) -> Option<Block> {
        match self {
            Open::None => None,
            Open::Paragraph(fragments) => Some(Block::Paragraph { fragments }),
            Open::List(items) => Some(Block::List { items }),
            Open::Quote(lines) => Some(Block::Quote { lines }),
            Open::Preformatted { alt_text, content } => {
                Some(Block::Preformatted { alt_text, content })
            }
        }
    }
}

/// Incremental block builder.
///
/// Feed it events with [`BlockBuilder::push`] and collect the result with
/// [`BlockBuilder::finish`].
#[derive(Debug, Default)]
pub struct BlockBuilder {
    blocks: Vec<Block>,
    open: Open,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one line event.
    pub fn push(&mut self, source: SourceLine) -> Result<(), ConversionError> {
        let SourceLine { line, event } = source;

        if event.is_blank() {
            self.close();
            return Ok(());
        }

        match event {
            LineEvent::Heading { level, text } => {
                self.close();
                self.emit(Block::Heading { level, text });
            }
            LineEvent::Quote { text } => match &mut self.open {
                Open::Quote(lines) => lines.push(text),
                _ => self.reopen(Open::Quote(vec![text])),
            },
            LineEvent::PreformattingToggle { alt_text } => {
                if let Open::Preformatted { .. } = self.open {
                    if let Some(alt_text) = alt_text {
                        return Err(ConversionError::UnexpectedClosingAltText { line, alt_text });
                    }
                    self.close();
                } else {
                    self.reopen(Open::Preformatted {
                        alt_text,
                        content: String::new(),
                    });
                }
            }
            LineEvent::PreformattedText { text } => match &mut self.open {
                Open::Preformatted { content, .. } => {
                    content.push_str(&text);
                    content.push('\n');
                }
                _ => return Err(ConversionError::UnbalancedPreformatting { line }),
            },
            LineEvent::Text { text } => self.push_fragment(Inline::Text { text }),
            LineEvent::Link { url, name } => self.push_fragment(Inline::Link { url, name }),
            LineEvent::ListItem { text } => match &mut self.open {
                Open::List(items) => items.push(text),
                _ => self.reopen(Open::List(vec![text])),
            },
        }

        Ok(())
    }

    /// Close whatever is still open and return the blocks in source order.
    pub fn finish(mut self) -> Vec<Block> {
        self.close();
        self.blocks
    }

    fn push_fragment(&mut self, fragment: Inline) {
        match &mut self.open {
            Open::Paragraph(fragments) => fragments.push(fragment),
            _ => self.reopen(Open::Paragraph(vec![fragment])),
        }
    }

    /// Close the open block and start accumulating `next`.
    fn reopen(&mut self, next: Open) {
        self.close();
        self.open = next;
    }

    fn close(&mut self) {
        if let Some(block) = std::mem::take(&mut self.open).into_block() {
            self.emit(block);
        }
    }

    fn emit(&mut self, block: Block) {
        debug!(kind = block.kind(), index = self.blocks.len(), "block finished");
        self.blocks.push(block);
    }
}

/// Run a whole line event stream through a [`BlockBuilder`].
///
/// Stops at the first error, whether it comes from the stream or from the
/// builder itself.
pub fn build_blocks<I>(lines: I) -> Result<Vec<Block>, ConversionError>
where
    I: IntoIterator<Item = Result<SourceLine, ConversionError>>,
{
    let mut builder = BlockBuilder::new();
    for line in lines {
        builder.push(line?)?;
    }
    Ok(builder.finish())
}
