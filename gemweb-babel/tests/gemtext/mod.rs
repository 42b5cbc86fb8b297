mod parse;
mod properties;

/// The kitchensink document, touching every line type.
pub const KITCHENSINK: &str = include_str!("fixtures/kitchensink.gmi");
