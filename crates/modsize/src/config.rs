//! Declarative configuration of a module-size check.
//!
//! Instead of spelling out modules and thresholds in code, a project can keep
//! them in a config file next to its sources and run them with
//! [`Config::run`].
//!
//! # Supported formats
//!
//! - TOML (`.toml`)
//! - YAML (`.yaml`, `.yml`)
//! - JSON (`.json`)
//!
//! [`ConfigLoader::in_dir`] picks up `modsize.toml`, `modsize.yaml`,
//! `modsize.yml` or `modsize.json` from one directory (first found wins).
//! Files added with [`ConfigLoader::with_file`] are merged on top.
//!
//! # Example
//!
//! ```toml
//! root = "src/main/java"
//! include = ["java"]
//! chart = "build/modules.mermaid"
//! modules = [
//!     { package = "pl.tfij.orders" },
//!     { package = "pl.tfij.users" },
//!     { dir = "generated" },
//! ]
//!
//! [checks]
//! no_empty_modules = true
//! max_relative_size = 0.3
//! max_undefined_files = 5
//! module_max_relative_size = { "pl.tfij.orders" = 0.2 }
//! ```

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::calculator::{self, ModuleSizeCalculatorBuilder};
use crate::error::{ConfigError, ConfigResult, Result};
use crate::summary::ProjectSummary;

/// A module declaration in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleDeclaration {
    /// Dotted package name, e.g. `pl.tfij.orders`.
    Package(String),
    /// Root-relative directory.
    Dir(Utf8PathBuf),
}

/// Size constraints to verify after a scan.
///
/// Unset constraints are skipped.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Checks {
    /// Fail when a declared module matches no files.
    pub no_empty_modules: bool,
    /// Largest share of the project any single module may hold, in `(0, 1]`.
    pub max_relative_size: Option<f64>,
    /// Per-module share limits, keyed by module name.
    pub module_max_relative_size: BTreeMap<String, f64>,
    /// Largest number of files allowed outside every declared module.
    pub max_undefined_files: Option<usize>,
}

impl Checks {
    /// Returns `true` if no constraint is configured.
    pub fn is_empty(&self) -> bool {
        !self.no_empty_modules
            && self.max_relative_size.is_none()
            && self.module_max_relative_size.is_empty()
            && self.max_undefined_files.is_none()
    }

    /// Verify every configured constraint against `summary`.
    ///
    /// Order: empty modules, overall relative size, per-module sizes (by
    /// name), undefined file count. Stops at the first failure.
    pub fn verify<'a>(&self, summary: &'a ProjectSummary) -> Result<&'a ProjectSummary> {
        if self.no_empty_modules {
            summary.verify_no_empty_modules()?;
        }
        if let Some(threshold) = self.max_relative_size {
            summary.verify_each_module_relative_size_is_smaller_than(threshold)?;
        }
        for (module, threshold) in &self.module_max_relative_size {
            summary.verify_module_relative_size_is_smaller_than(module, *threshold)?;
        }
        if let Some(max) = self.max_undefined_files {
            summary.verify_undefined_module_number_of_files_is_smaller_than(max)?;
        }
        Ok(summary)
    }
}

/// The configuration for modsize.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Project root. Relative paths resolve against the config file's directory.
    pub root: Option<Utf8PathBuf>,
    /// Modules in declaration order.
    pub modules: Vec<ModuleDeclaration>,
    /// Extensions to scan; empty scans every file, `""` keeps extensionless files.
    pub include: Vec<String>,
    /// Constraints to verify.
    pub checks: Checks,
    /// Where to write the Mermaid pie chart, if anywhere.
    pub chart: Option<Utf8PathBuf>,
}

impl Config {
    /// Build a calculator from this configuration.
    ///
    /// Relative `root` paths resolve against `base_dir`; a missing `root`
    /// means `base_dir` itself.
    pub fn calculator(&self, base_dir: &Utf8Path) -> ModuleSizeCalculatorBuilder {
        let root = self
            .root
            .as_deref()
            .map_or_else(|| base_dir.to_path_buf(), |root| resolve(base_dir, root));
        let builder = self
            .modules
            .iter()
            .fold(calculator::project(root), |builder, decl| match decl {
                ModuleDeclaration::Package(name) => builder.with_module(name.as_str()),
                ModuleDeclaration::Dir(dir) => builder.with_dir_module(dir),
            });
        builder.include(self.include.iter().map(String::as_str))
    }

    /// Analyze the project, verify the configured checks and write the chart.
    ///
    /// The chart is only written when every check passes.
    #[tracing::instrument(skip(self))]
    pub fn run(&self, base_dir: &Utf8Path) -> Result<ProjectSummary> {
        let summary = self.calculator(base_dir).analyze()?;
        self.checks.verify(&summary)?;
        if let Some(ref chart) = self.chart {
            summary.save_mermaid_pie_chart(resolve(base_dir, chart))?;
        }
        Ok(summary)
    }
}

fn resolve(base_dir: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_relative() {
        base_dir.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Config files that went into a [`Config`], lowest precedence first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Every merged file: the discovered one, then explicit files.
    pub files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The file with the final say.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.files.last().map(Utf8PathBuf::as_path)
    }

    /// Directory of the primary config file, used to resolve relative paths.
    pub fn base_dir(&self) -> Option<&Utf8Path> {
        self.primary_file().and_then(Utf8Path::parent)
    }
}

/// Looked up in this order; the first existing one wins.
const CONFIG_FILE_NAMES: &[&str] = &[
    "modsize.toml",
    "modsize.yaml",
    "modsize.yml",
    "modsize.json",
];

/// Finds and merges modsize config files.
///
/// A project keeps at most one `modsize.<ext>` next to its sources; explicit
/// files are merged over it in the order they were added.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    project_dir: Option<Utf8PathBuf>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a loader with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look for `modsize.<ext>` in `dir`. Parent directories are not searched.
    pub fn in_dir(mut self, dir: impl AsRef<Utf8Path>) -> Self {
        self.project_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Merge `path` over everything loaded before it.
    pub fn with_file(mut self, path: impl AsRef<Utf8Path>) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge all sources into a [`Config`].
    ///
    /// Fails with [`ConfigError::NotFound`] when there is nothing to load.
    #[tracing::instrument(skip(self), fields(dir = ?self.project_dir))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let mut sources = ConfigSources::default();
        if let Some(found) = self.project_dir.as_deref().and_then(project_config) {
            sources.files.push(found);
        }
        sources.files.extend(self.explicit_files);
        if sources.files.is_empty() {
            return Err(ConfigError::NotFound);
        }

        let figment = sources.files.iter().fold(
            Figment::from(Serialized::defaults(Config::default())),
            |figment, file| figment.merge(provider(file)),
        );
        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            modules = config.modules.len(),
            config_file = ?sources.primary_file(),
            "configuration loaded"
        );
        Ok((config, sources))
    }
}

fn project_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let mut found = CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .filter(|path| path.is_file());
    let first = found.next()?;
    for ignored in found {
        tracing::warn!(used = %first, %ignored, "several modsize config files, using the first");
    }
    Some(first)
}

fn provider(path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => Figment::from(Yaml::file_exact(path.as_str())),
        Some("json") => Figment::from(Json::file_exact(path.as_str())),
        _ => Figment::from(Toml::file_exact(path.as_str())),
    }
}
