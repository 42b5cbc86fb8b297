//! Shared configuration loader for the gemweb toolchain.
//!
//! `defaults/gemweb.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`GemwebConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use gemweb_babel::HtmlOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/gemweb.default.toml");

/// Top-level configuration consumed by gemweb applications.
#[derive(Debug, Clone, Deserialize)]
pub struct GemwebConfig {
    pub convert: ConvertConfig,
    pub build: BuildConfig,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub html: HtmlConfig,
}

/// Mirrors the knobs exposed by the HTML serializer.
#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub pretty: bool,
    pub doctype: bool,
    pub title_from_heading: bool,
    pub lang: String,
}

impl From<&HtmlConfig> for HtmlOptions {
    fn from(config: &HtmlConfig) -> Self {
        HtmlOptions {
            pretty: config.pretty,
            doctype: config.doctype,
            title_from_heading: config.title_from_heading,
            lang: (!config.lang.is_empty()).then(|| config.lang.clone()),
        }
    }
}

impl From<HtmlConfig> for HtmlOptions {
    fn from(config: HtmlConfig) -> Self {
        HtmlOptions::from(&config)
    }
}

/// Settings for mirroring a capsule directory into a web root.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    pub source_extension: String,
    pub target_extension: String,
    pub keep_sources: bool,
    pub on_error: ErrorPolicy,
}

/// What `build` does with a page that fails to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the whole build at the first failure
    Abort,
    /// Log the failure and carry on with the next file
    Skip,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<GemwebConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<GemwebConfig, ConfigError> {
    Loader::new().build()
}
