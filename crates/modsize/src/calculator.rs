//! Module registry and the scan pipeline.
//!
//! A scan walks the project root, keeps files accepted by the extension
//! filter, classifies each into a module, counts its lines and aggregates the
//! results into a [`ProjectSummary`]. Any I/O error aborts the whole scan.

use std::collections::{HashMap, HashSet};

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{Result, ValidationError};
use crate::lines;
use crate::module::{self, Module};
use crate::summary::{ModuleSummary, ProjectSummary};
use crate::walk::{self, ExtensionFilter};

/// Start configuring a scan of the project rooted at `root_dir`.
///
/// Relative roots resolve against the current directory at scan time.
pub fn project(root_dir: impl Into<Utf8PathBuf>) -> ModuleSizeCalculatorBuilder {
    ModuleSizeCalculatorBuilder::new(root_dir)
}

/// A file seen during one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Path relative to the project root.
    pub path: Utf8PathBuf,
    /// Module the file was classified into.
    pub module: Module,
    /// Number of lines in the file.
    pub lines_of_code: usize,
}

/// Fluent configuration of modules and file filters.
///
/// Building performs no I/O; [`analyze`](Self::analyze) runs the scan and may
/// be called repeatedly.
#[derive(Debug, Clone)]
pub struct ModuleSizeCalculatorBuilder {
    root_dir: Utf8PathBuf,
    modules: Vec<Module>,
    include: ExtensionFilter,
}

impl ModuleSizeCalculatorBuilder {
    /// Create a builder with no modules and no extension filter.
    pub fn new(root_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            modules: Vec::new(),
            include: ExtensionFilter::default(),
        }
    }

    /// Declare a module by dotted package name, e.g. `pl.tfij.orders`.
    ///
    /// The module owns files under `pl/tfij/orders` relative to the root.
    pub fn with_module(mut self, package: impl Into<String>) -> Self {
        self.modules.push(Module::package(package));
        self
    }

    /// Declare a module by root-relative directory.
    pub fn with_dir_module(mut self, path: impl AsRef<Utf8Path>) -> Self {
        self.modules.push(Module::directory(path));
        self
    }

    /// Restrict the scan to files with the given extensions.
    ///
    /// Without any call every file is scanned. Pass `""` to keep files that
    /// have no extension.
    pub fn include<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(extensions);
        self
    }

    /// Project root as configured.
    pub fn root_dir(&self) -> &Utf8Path {
        &self.root_dir
    }

    /// Declared modules in declaration order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Scan the project and summarize it per module.
    ///
    /// Module names must be unique; a repeated name fails with
    /// [`ValidationError::DuplicateModule`] before anything is read.
    #[tracing::instrument(skip(self), fields(root = %self.root_dir, modules = self.modules.len()))]
    pub fn analyze(&self) -> Result<ProjectSummary> {
        self.check_unique_names()?;
        let files = self.scan()?;
        let analyzed = aggregate(files);
        for module in &self.modules {
            if !analyzed.contains_key(module) {
                tracing::warn!(module = module.name(), "module matched no files");
            }
        }
        let summary = ProjectSummary::new(self.modules.clone(), analyzed);
        tracing::info!(
            files = summary.number_of_files(),
            lines = summary.lines_of_code(),
            "project analyzed"
        );
        Ok(summary)
    }

    fn check_unique_names(&self) -> std::result::Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for module in &self.modules {
            if !seen.insert(module.name()) {
                return Err(ValidationError::DuplicateModule {
                    name: module.name().to_string(),
                });
            }
        }
        Ok(())
    }

    fn scan(&self) -> Result<Vec<ScannedFile>> {
        let mut scanned = Vec::new();
        for path in walk::project_files(&self.root_dir)? {
            if !self.include.accepts(&path) {
                tracing::trace!(%path, "skipping excluded file");
                continue;
            }
            let module = module::match_module(&path, &self.modules);
            let lines_of_code = lines::count_lines(&self.root_dir.join(&path))?;
            tracing::trace!(%path, module = module.name(), lines_of_code, "file counted");
            scanned.push(ScannedFile {
                path,
                module,
                lines_of_code,
            });
        }
        Ok(scanned)
    }
}

/// Group scanned files by module.
///
/// Every summary shares the project-wide line total as its denominator.
pub fn aggregate(files: Vec<ScannedFile>) -> HashMap<Module, ModuleSummary> {
    let project_lines: usize = files.iter().map(|f| f.lines_of_code).sum();

    let mut groups: HashMap<Module, (usize, usize)> = HashMap::new();
    for file in files {
        let (count, lines) = groups.entry(file.module).or_default();
        *count += 1;
        *lines += file.lines_of_code;
    }

    groups
        .into_iter()
        .map(|(module, (count, lines))| {
            let summary = ModuleSummary::new(module.clone(), count, lines, project_lines);
            (module, summary)
        })
        .collect()
}
