//! Mirrors a capsule directory into a web root.
//!
//! The whole source tree is copied into a fresh target directory. Every page
//! with the source extension is converted to HTML next to where it lands, and
//! everything else (images, feeds, text files) is copied as is.

use gemweb_babel::{to_html, FormatError, HtmlOptions};
use gemweb_config::{BuildConfig, ErrorPolicy};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("Target already exists: {0}")]
    TargetExists(PathBuf),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to convert {path}: {source}")]
    Conversion {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

impl BuildError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> BuildError + '_ {
        move |source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What a build did, relative to the target directory.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Pages written, as target paths
    pub converted: Vec<PathBuf>,
    /// Files copied verbatim
    pub copied: usize,
    /// Source pages that failed under the skip policy, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

/// Settings for one build run.
pub struct SiteBuilder<'a> {
    settings: &'a BuildConfig,
    options: &'a HtmlOptions,
}

impl<'a> SiteBuilder<'a> {
    pub fn new(settings: &'a BuildConfig, options: &'a HtmlOptions) -> Self {
        Self { settings, options }
    }

    /// Mirror `source` into `target`, which must not exist yet.
    pub fn build(&self, source: &Path, target: &Path) -> Result<BuildReport, BuildError> {
        if !source.is_dir() {
            return Err(BuildError::SourceNotFound(source.to_path_buf()));
        }
        if target.exists() {
            return Err(BuildError::TargetExists(target.to_path_buf()));
        }

        let mut report = BuildReport::default();
        fs::create_dir_all(target).map_err(BuildError::io(target))?;
        self.mirror_directory(source, target, &mut report)?;

        info!(
            converted = report.converted.len(),
            copied = report.copied,
            skipped = report.skipped.len(),
            "build finished"
        );
        Ok(report)
    }

    fn mirror_directory(
        &self,
        source_dir: &Path,
        target_dir: &Path,
        report: &mut BuildReport,
    ) -> Result<(), BuildError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(source_dir).map_err(BuildError::io(source_dir))? {
            entries.push(entry.map_err(BuildError::io(source_dir))?.path());
        }
        entries.sort();

        // Pages are converted after everything else in the directory is copied,
        // so a generated page replaces a same-named file from the source.
        let mut pages = Vec::new();
        for path in entries {
            let Some(name) = path.file_name() else {
                continue;
            };
            let destination = target_dir.join(name);

            if path.is_dir() {
                fs::create_dir(&destination).map_err(BuildError::io(&destination))?;
                self.mirror_directory(&path, &destination, report)?;
                continue;
            }

            if self.is_page(&path) {
                pages.push((path.clone(), destination.clone()));
                if !self.settings.keep_sources {
                    continue;
                }
            }

            fs::copy(&path, &destination).map_err(BuildError::io(&destination))?;
            debug!(path = %destination.display(), "copied file");
            report.copied += 1;
        }

        for (path, destination) in pages {
            self.handle_page(&path, &destination, report)?;
        }

        Ok(())
    }

    fn is_page(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == self.settings.source_extension.as_str())
    }

    /// Convert one page, applying the error policy.
    fn handle_page(
        &self,
        source: &Path,
        destination: &Path,
        report: &mut BuildReport,
    ) -> Result<(), BuildError> {
        let page = destination.with_extension(&self.settings.target_extension);
        match self.convert_page(source, &page) {
            Ok(()) => {
                info!(page = %page.display(), "converted page");
                report.converted.push(page);
                Ok(())
            }
            Err(err) if self.settings.on_error == ErrorPolicy::Skip => {
                warn!(path = %source.display(), error = %err, "skipping page");
                report.skipped.push((source.to_path_buf(), err.to_string()));
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn convert_page(&self, source: &Path, page: &Path) -> Result<(), BuildError> {
        let text = fs::read_to_string(source).map_err(BuildError::io(source))?;
        let html = to_html(&text, self.options).map_err(|source_err| BuildError::Conversion {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        fs::write(page, html).map_err(BuildError::io(page))
    }
}
