//! HTML format implementation
//!
//! This module renders gemtext documents as HTML5 pages. Export only: there is
//! no HTML → gemtext direction.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` ecosystem to build and
//! serialize the element tree, so escaping and void-element handling follow
//! the WHATWG serialization rules rather than hand-written string pasting.
//!
//! # Element Mapping Table
//!
//! | Block / Inline   | HTML Equivalent                          | Notes                                   |
//! |------------------|------------------------------------------|-----------------------------------------|
//! | Document         | `<html><head></head><body>`              | Head stays empty unless a title is set  |
//! | Paragraph        | `<p>`                                    | Fragments separated by `<br>`           |
//! | Text fragment    | Plain text                               | Escaped                                 |
//! | Link fragment    | `<a href="url">name</a>`                 | URL is the text when there is no name   |
//! | Heading          | `<h1>` .. `<h3>`                         |                                         |
//! | List             | `<ul>` + `<li>`                          |                                         |
//! | Quote            | `<blockquote>`                           | Lines separated by `<br>`               |
//! | Preformatted     | `<pre>`                                  | Alt text → `aria-label`                 |
//!
//! # Options
//!
//! See [`HtmlOptions`]. The same knobs are accepted as string parameters by
//! [`Format::serialize_with_options`]: `pretty`, `doctype`,
//! `title-from-heading` and `lang`.

mod serializer;

pub use serializer::serialize_to_html;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Document;
use std::collections::HashMap;

/// Rendering knobs for HTML export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Indent block containers, two spaces per level
    pub pretty: bool,
    /// Prefix the page with `<!DOCTYPE html>`
    pub doctype: bool,
    /// Use the first heading as `<title>` when the document has none
    pub title_from_heading: bool,
    /// `lang` attribute of the `<html>` element
    pub lang: Option<String>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            doctype: false,
            title_from_heading: false,
            lang: None,
        }
    }
}

impl HtmlOptions {
    /// Apply string parameters on top of these options.
    ///
    /// Unknown keys and malformed booleans are rejected.
    pub fn with_params(mut self, params: &HashMap<String, String>) -> Result<Self, FormatError> {
        for (key, value) in params {
            match key.as_str() {
                "pretty" => self.pretty = parse_bool(key, value)?,
                "doctype" => self.doctype = parse_bool(key, value)?,
                "title-from-heading" => self.title_from_heading = parse_bool(key, value)?,
                "lang" => {
                    self.lang = if value.is_empty() {
                        None
                    } else {
                        Some(value.clone())
                    }
                }
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'html' does not support parameter '{other}'"
                    )))
                }
            }
        }
        Ok(self)
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, FormatError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(FormatError::SerializationError(format!(
            "Invalid boolean value '{other}' for '{key}'"
        ))),
    }
}

/// Format implementation for HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &HtmlOptions {
        &self.options
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 page"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serializer::serialize_to_html(doc, &self.options)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = self.options.clone().with_params(options)?;
        serializer::serialize_to_html(doc, &options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_html_options_default() {
        let options = HtmlOptions::default();
        assert!(options.pretty);
        assert!(!options.doctype);
        assert!(!options.title_from_heading);
        assert!(options.lang.is_none());
    }

    #[test]
    fn test_params_override_options() {
        let options = HtmlOptions::default()
            .with_params(&params(&[("pretty", "false"), ("doctype", "yes"), ("lang", "fr")]))
            .unwrap();
        assert!(!options.pretty);
        assert!(options.doctype);
        assert_eq!(options.lang.as_deref(), Some("fr"));
    }

    #[test]
    fn test_unknown_param_is_rejected() {
        let err = HtmlOptions::default()
            .with_params(&params(&[("theme", "dark")]))
            .unwrap_err();
        assert!(matches!(err, FormatError::NotSupported(_)));
    }

    #[test]
    fn test_bad_boolean_is_rejected() {
        let err = HtmlOptions::default()
            .with_params(&params(&[("pretty", "sometimes")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Serialization error: Invalid boolean value 'sometimes' for 'pretty'"
        );
    }

    #[test]
    fn test_html_format_does_not_parse() {
        let format = HtmlFormat::default();
        assert!(!format.supports_parsing());
        assert!(format.parse("<p>hi</p>").is_err());
    }
}
