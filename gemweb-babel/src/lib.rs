//! Gemtext to HTML conversion
//!
//!     This crate turns gemtext (the line oriented markup of the Gemini protocol) into HTML
//!     documents. It is a pure lib: it powers gemweb-cli but is shell agnostic, so no code here
//!     should suppose a shell environment, be it std print, env vars or the file system.
//!
//! Architecture
//!
//!     Conversion is a pipeline of small stages, each with its own module:
//!
//!         source text
//!           → line classifier       (./formats/gemtext/parser.rs)   one LineEvent per line
//!           → block builder         (./common/block_builder.rs)     LineEvents grouped into Blocks
//!           → document assembly     (./ir/nodes.rs)                  Blocks wrapped in a Document
//!           → serializer            (./formats/<format>/)            Document to text
//!
//!     The classifier is stateful only in one bit: whether a preformatted block is open. Inside
//!     one, every line is content, whatever it looks like. Everything else is decided from the
//!     line alone. The line events are produced lazily, so the builder pulls them one at a time
//!     and the whole source is never held as a list of events.
//!
//!     The block builder is the core state machine. Consecutive text and link lines merge into a
//!     paragraph, consecutive list items into a list, consecutive quote lines into a quote. Blank
//!     lines and headings close whatever is open. See its module docs for the full table.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # ConversionError and FormatError
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── gemtext             # classifier (parser.rs) and canonical writer (serializer.rs)
//!     │   ├── html                # HTML export through html5ever
//!     │   └── treeviz             # block tree dump for debugging
//!     ├── lib.rs
//!     ├── ir                      # LineEvent stream and the Document block tree
//!     └── common                  # The block builder
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # declares the subdirectory modules
//!     ├── gemtext
//!     │   ├── parse.rs
//!     │   ├── properties.rs       # proptest properties
//!     │   └── fixtures
//!     │       └── kitchensink.gmi
//!     └── html
//!         └── export.rs           # insta snapshots
//!
//!     Unit tests live next to each stage. The integration tests in ./tests drive whole
//!     documents through the public API, with snapshots for the HTML output.
//!
//! Formats
//!
//!     Format specific capabilities are implemented with the Format trait. Formats have a
//!     parse() and/or serialize() method, a name and file extensions. See the trait def [./format.rs ]
//!     - gemtext: parse and serialize. Serializing writes the canonical form of a block tree, so
//!       parsing it back gives the same tree.
//!     - html: serialize only. Options (pretty printing, doctype, title, lang) come through
//!       serialize_with_options.
//!     - treeviz: serialize only.
//!
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub mod common;
pub mod ir;

pub use error::{ConversionError, FormatError};
pub use format::Format;
pub use formats::html::HtmlOptions;
pub use ir::nodes::Document;
pub use registry::FormatRegistry;

/// Parses gemtext into a [`Document`].
///
/// Stops at the first malformed line and reports it with its 1-based line number.
pub fn to_document(source: &str) -> Result<Document, ConversionError> {
    let blocks =
        common::block_builder::build_blocks(formats::gemtext::parser::parse_lines(source))?;
    Ok(Document::from_blocks(blocks))
}

/// Converts gemtext straight to an HTML page.
pub fn to_html(source: &str, options: &HtmlOptions) -> Result<String, FormatError> {
    let doc = to_document(source)?;
    formats::html::serialize_to_html(&doc, options)
}
