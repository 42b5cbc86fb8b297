//! Gemtext format implementation
//!
//! Parsing runs the full pipeline: the line classifier ([`parser`]) feeds the
//! block builder (`common::block_builder`), and the blocks are assembled into
//! a [`Document`]. Serialization writes canonical gemtext back out.

pub mod parser;
pub mod serializer;

use crate::common::block_builder::build_blocks;
use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;
use tracing::debug;

/// Format implementation for gemtext (`text/gemini`)
#[derive(Debug, Default, Clone, Copy)]
pub struct GemtextFormat;

impl Format for GemtextFormat {
    fn name(&self) -> &str {
        "gemtext"
    }

    fn description(&self) -> &str {
        "Gemini hypertext format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["gmi", "gemini"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let blocks = build_blocks(parser::parse_lines(source))?;
        debug!(blocks = blocks.len(), "parsed gemtext document");
        Ok(Document::from_blocks(blocks))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::serialize_document(doc))
    }
}
