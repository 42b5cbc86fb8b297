//! Gemtext line classification (text → line events)
//!
//! Gemtext is line oriented: the first characters of a line decide what it
//! is, with a single exception. Inside a preformatted region nothing is
//! interpreted until the closing fence, so the classifier carries one piece of
//! state between lines: whether a region is open (and the alt text it was
//! opened with).
//!
//! Outside a region the markers are tried in this order, first match wins:
//!
//! | Marker              | Event                                   |
//! |---------------------|-----------------------------------------|
//! | "```"               | `PreformattingToggle` (opens a region)  |
//! | `=>`                | `Link`                                  |
//! | `* `                | `ListItem`                              |
//! | `> `                | `Quote`                                 |
//! | `#`, `##`, `###`    | `Heading` (needs text after the marker) |
//! | anything else       | `Text`                                  |

use crate::error::ConversionError;
use crate::ir::events::{LineEvent, SourceLine};
use std::iter::FusedIterator;
use std::str::Lines;
use tracing::trace;

const FENCE_MARKER: &str = "```";
const LINK_MARKER: &str = "=>";
const LIST_MARKER: &str = "* ";
const QUOTE_MARKER: &str = "> ";
const MAX_HEADING_LEVEL: usize = 3;

/// State carried from one line to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierState {
    pub preformatting_open: bool,
    /// Alt text of the region currently open, if it had any
    pub pending_alt_text: Option<String>,
}

/// Classify a single line.
///
/// Returns the event together with the state to use for the next line. The
/// input state is never modified.
pub fn classify(
    line: &str,
    line_no: usize,
    state: &ClassifierState,
) -> Result<(LineEvent, ClassifierState), ConversionError> {
    if state.preformatting_open {
        return match line.strip_prefix(FENCE_MARKER) {
            Some(rest) => {
                let trailing = rest.trim();
                if !trailing.is_empty() {
                    return Err(ConversionError::UnexpectedClosingAltText {
                        line: line_no,
                        alt_text: trailing.to_string(),
                    });
                }
                Ok((
                    LineEvent::PreformattingToggle { alt_text: None },
                    ClassifierState::default(),
                ))
            }
            None => Ok((
                LineEvent::PreformattedText {
                    text: line.to_string(),
                },
                state.clone(),
            )),
        };
    }

    if let Some(rest) = line.strip_prefix(FENCE_MARKER) {
        let alt_text = non_blank(rest);
        let next = ClassifierState {
            preformatting_open: true,
            pending_alt_text: alt_text.clone(),
        };
        return Ok((LineEvent::PreformattingToggle { alt_text }, next));
    }

    let event = if let Some(rest) = line.strip_prefix(LINK_MARKER) {
        parse_link(rest, line_no)?
    } else if let Some(text) = line.strip_prefix(LIST_MARKER) {
        LineEvent::ListItem {
            text: text.to_string(),
        }
    } else if let Some(text) = line.strip_prefix(QUOTE_MARKER) {
        LineEvent::Quote {
            text: text.to_string(),
        }
    } else if let Some(heading) = parse_heading(line) {
        heading
    } else {
        LineEvent::Text {
            text: line.to_string(),
        }
    };

    Ok((event, state.clone()))
}

/// Split the remainder of a link line into URL and optional name.
fn parse_link(rest: &str, line_no: usize) -> Result<LineEvent, ConversionError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(ConversionError::MalformedLinkLine { line: line_no });
    }

    let (url, name) = match rest.split_once(char::is_whitespace) {
        Some((url, name)) => (url, non_blank(name)),
        None => (rest, None),
    };

    Ok(LineEvent::Link {
        url: url.to_string(),
        name,
    })
}

/// A heading is a run of one to three `#` followed by whitespace and some text.
/// `#` alone, `####` and `#Title` are plain text.
fn parse_heading(line: &str) -> Option<LineEvent> {
    if !line.starts_with('#') {
        return None;
    }

    let (marker, rest) = line.split_once(char::is_whitespace)?;
    if marker.len() > MAX_HEADING_LEVEL || !marker.bytes().all(|b| b == b'#') {
        return None;
    }

    let text = rest.trim();
    if text.is_empty() {
        return None;
    }

    Some(LineEvent::Heading {
        level: marker.len() as u8,
        text: text.to_string(),
    })
}

fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Lazy stream of classified lines over a whole document.
///
/// Created with [`parse_lines`]; every call starts again from the first line.
/// The stream ends after yielding its first error.
#[derive(Debug, Clone)]
pub struct LineEvents<'a> {
    lines: Lines<'a>,
    line_no: usize,
    state: ClassifierState,
    failed: bool,
}

impl<'a> LineEvents<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines(),
            line_no: 0,
            state: ClassifierState::default(),
            failed: false,
        }
    }

    /// Classifier state after the lines consumed so far.
    pub fn state(&self) -> &ClassifierState {
        &self.state
    }
}

impl Iterator for LineEvents<'_> {
    type Item = Result<SourceLine, ConversionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let mut raw = self.lines.next()?;
        self.line_no += 1;
        if self.line_no == 1 {
            raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
        }

        match classify(raw, self.line_no, &self.state) {
            Ok((event, state)) => {
                trace!(line = self.line_no, kind = event.kind(), "classified line");
                self.state = state;
                Some(Ok(SourceLine::new(self.line_no, event)))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for LineEvents<'_> {}

/// Classify every line of `source`, lazily.
pub fn parse_lines(source: &str) -> LineEvents<'_> {
    LineEvents::new(source)
}
