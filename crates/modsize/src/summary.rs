//! Aggregated scan results and size assertions.
//!
//! [`ProjectSummary`] is produced by
//! [`ModuleSizeCalculatorBuilder::analyze`](crate::ModuleSizeCalculatorBuilder::analyze)
//! and never changes afterwards. Each `verify_*` method returns `&Self` on
//! success so checks can be chained with `?`:
//!
//! ```no_run
//! # fn main() -> modsize::Result<()> {
//! modsize::project("src/main/java")
//!     .with_module("pl.tfij.orders")
//!     .with_module("pl.tfij.users")
//!     .analyze()?
//!     .verify_no_empty_modules()?
//!     .verify_each_module_relative_size_is_smaller_than(0.3)?
//!     .verify_undefined_module_number_of_files_is_smaller_than(5)?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fs;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::{AssertionFailure, Result, ScanError, ValidationError};
use crate::module::Module;
use crate::report;
use crate::walk;

/// Line and file totals for one module with at least one matched file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSummary {
    module: Module,
    number_of_files: usize,
    lines_of_code: usize,
    project_lines_of_code: usize,
}

impl ModuleSummary {
    /// Create a summary.
    pub const fn new(
        module: Module,
        number_of_files: usize,
        lines_of_code: usize,
        project_lines_of_code: usize,
    ) -> Self {
        Self {
            module,
            number_of_files,
            lines_of_code,
            project_lines_of_code,
        }
    }

    /// The summarized module.
    pub const fn module(&self) -> &Module {
        &self.module
    }

    /// Number of files classified into the module.
    pub const fn number_of_files(&self) -> usize {
        self.number_of_files
    }

    /// Lines across the module's files.
    pub const fn lines_of_code(&self) -> usize {
        self.lines_of_code
    }

    /// Lines across the whole project at scan time.
    pub const fn project_lines_of_code(&self) -> usize {
        self.project_lines_of_code
    }

    /// Module lines divided by project lines.
    ///
    /// `0.0` when the project has no lines at all.
    pub fn relative_size(&self) -> f64 {
        if self.project_lines_of_code == 0 {
            return 0.0;
        }
        self.lines_of_code as f64 / self.project_lines_of_code as f64
    }
}

/// Public per-module record returned by [`ProjectSummary::modules_summary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleStats {
    /// Module name (`undefined` for unclassified files).
    pub module: String,
    /// Number of files in the module.
    pub number_of_files: usize,
    /// Total lines in the module.
    pub lines_of_code: usize,
    /// Share of the project's lines, in `[0, 1]`.
    pub relative_size: f64,
}

impl From<&ModuleSummary> for ModuleStats {
    fn from(summary: &ModuleSummary) -> Self {
        Self {
            module: summary.module().name().to_string(),
            number_of_files: summary.number_of_files(),
            lines_of_code: summary.lines_of_code(),
            relative_size: summary.relative_size(),
        }
    }
}

/// Serialized shape of [`ProjectSummary::to_json`].
#[derive(Serialize)]
struct ProjectReport {
    number_of_files: usize,
    lines_of_code: usize,
    modules: Vec<ModuleStats>,
}

/// Results of one scan plus the module declarations it was run with.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    declared: Vec<Module>,
    analyzed: HashMap<Module, ModuleSummary>,
}

impl ProjectSummary {
    /// Create a summary from declared modules and per-module results.
    pub const fn new(declared: Vec<Module>, analyzed: HashMap<Module, ModuleSummary>) -> Self {
        Self { declared, analyzed }
    }

    /// Modules in declaration order, including ones that matched nothing.
    pub fn declared_modules(&self) -> &[Module] {
        &self.declared
    }

    /// Look up the summary of a module by name.
    pub fn module_summary(&self, name: &str) -> Option<&ModuleSummary> {
        self.analyzed.values().find(|s| s.module().name() == name)
    }

    /// Summary of files that matched no declared module.
    pub fn undefined_summary(&self) -> Option<&ModuleSummary> {
        self.analyzed.get(&Module::Undefined)
    }

    /// Fail if any declared module matched no files.
    ///
    /// Reports the first empty module in declaration order.
    pub fn verify_no_empty_modules(&self) -> Result<&Self> {
        if let Some(empty) = self
            .declared
            .iter()
            .find(|module| !self.analyzed.contains_key(*module))
        {
            return Err(AssertionFailure::EmptyModule {
                name: empty.name().to_string(),
            }
            .into());
        }
        Ok(self)
    }

    /// Fail if any module, the undefined bucket included, holds a larger
    /// share of the project than `threshold`.
    ///
    /// `threshold` must lie in `(0, 1]`.
    pub fn verify_each_module_relative_size_is_smaller_than(&self, threshold: f64) -> Result<&Self> {
        check_threshold(threshold)?;
        let biggest = self
            .analyzed
            .values()
            .max_by(|a, b| a.relative_size().total_cmp(&b.relative_size()));
        if let Some(summary) = biggest {
            check_relative_size(summary, threshold)?;
        }
        Ok(self)
    }

    /// Fail if the named module holds a larger share of the project than
    /// `threshold`.
    ///
    /// The module must have been declared. A declared module that matched no
    /// files passes.
    pub fn verify_module_relative_size_is_smaller_than(
        &self,
        module: &str,
        threshold: f64,
    ) -> Result<&Self> {
        if !self.declared.iter().any(|m| m.name() == module) {
            return Err(ValidationError::UndefinedModule {
                name: module.to_string(),
            }
            .into());
        }
        check_threshold(threshold)?;
        let matched = self
            .analyzed
            .values()
            .find(|s| !s.module().is_undefined() && s.module().name() == module);
        if let Some(summary) = matched {
            check_relative_size(summary, threshold)?;
        }
        Ok(self)
    }

    /// Fail if more than `allowed_file_count` files matched no declared module.
    pub fn verify_undefined_module_number_of_files_is_smaller_than(
        &self,
        allowed_file_count: usize,
    ) -> Result<&Self> {
        let actual = self
            .undefined_summary()
            .map_or(0, ModuleSummary::number_of_files);
        if actual > allowed_file_count {
            return Err(AssertionFailure::TooManyUndefinedFiles {
                actual,
                max: allowed_file_count,
            }
            .into());
        }
        Ok(self)
    }

    /// Render the module sizes as a Mermaid pie chart.
    pub fn create_mermaid_pie_chart(&self) -> String {
        report::mermaid_pie_chart(self.analyzed.values(), self.lines_of_code())
    }

    /// Write the Mermaid pie chart to `target`, replacing any existing file.
    #[tracing::instrument(skip_all, fields(target = %target.as_ref()))]
    pub fn save_mermaid_pie_chart(&self, target: impl AsRef<Utf8Path>) -> Result<&Self> {
        let target = target.as_ref();
        if target.as_str().is_empty() {
            return Err(ValidationError::MissingTarget.into());
        }
        fs::write(target, self.create_mermaid_pie_chart()).map_err(|source| {
            ScanError::WriteChart {
                path: walk::absolute(target),
                source,
            }
        })?;
        tracing::debug!("mermaid chart saved");
        Ok(self)
    }

    /// One record per module with at least one file, in no particular order.
    pub fn modules_summary(&self) -> Vec<ModuleStats> {
        self.analyzed.values().map(ModuleStats::from).collect()
    }

    /// Total number of scanned files.
    pub fn number_of_files(&self) -> usize {
        self.analyzed.values().map(ModuleSummary::number_of_files).sum()
    }

    /// Total number of scanned lines.
    pub fn lines_of_code(&self) -> usize {
        self.analyzed.values().map(ModuleSummary::lines_of_code).sum()
    }

    /// Totals and per-module records as pretty-printed JSON, modules sorted
    /// by name.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut modules = self.modules_summary();
        modules.sort_by(|a, b| a.module.cmp(&b.module));
        serde_json::to_string_pretty(&ProjectReport {
            number_of_files: self.number_of_files(),
            lines_of_code: self.lines_of_code(),
            modules,
        })
    }
}

fn check_threshold(threshold: f64) -> std::result::Result<(), ValidationError> {
    if threshold > 0.0 && threshold <= 1.0 {
        Ok(())
    } else {
        Err(ValidationError::ThresholdOutOfRange {
            value: report::format_ratio(threshold),
        })
    }
}

fn check_relative_size(
    summary: &ModuleSummary,
    threshold: f64,
) -> std::result::Result<(), AssertionFailure> {
    let actual = summary.relative_size();
    if actual > threshold {
        return Err(AssertionFailure::RelativeSizeExceeded {
            name: summary.module().name().to_string(),
            actual: report::format_ratio(actual),
            max: report::format_ratio(threshold),
        });
    }
    Ok(())
}
