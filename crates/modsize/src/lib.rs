//! Module size metrics and size-drift assertions.
//!
//! modsize splits a source tree into declared modules, counts the lines of
//! every file and lets a test assert how the code is distributed: no module
//! bigger than a given share, no declared module left empty, few files outside
//! every module. It can also render the distribution as a Mermaid pie chart.
//!
//! # Modules
//!
//! - [`calculator`] - Module registry and the scan pipeline
//! - [`summary`] - Scan results and `verify_*` assertions
//! - [`config`] - File-based declaration of modules and checks
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> modsize::Result<()> {
//! let summary = modsize::project("src/main/java")
//!     .with_module("pl.tfij.orders")
//!     .with_module("pl.tfij.payments")
//!     .with_dir_module("generated")
//!     .include(["java"])
//!     .analyze()?;
//!
//! summary
//!     .verify_no_empty_modules()?
//!     .verify_each_module_relative_size_is_smaller_than(0.4)?
//!     .save_mermaid_pie_chart("target/modules.mermaid")?;
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]

pub mod calculator;
pub mod config;
pub mod error;
pub mod lines;
pub mod module;
pub mod report;
pub mod summary;
pub mod walk;

pub use calculator::{ModuleSizeCalculatorBuilder, ScannedFile, project};
pub use config::{Checks, Config, ConfigLoader, ConfigSources, ModuleDeclaration};
pub use error::{
    AssertionFailure, ConfigError, ConfigResult, Error, Result, ScanError, ValidationError,
};
pub use module::{Module, UNDEFINED_MODULE_NAME};
pub use summary::{ModuleStats, ModuleSummary, ProjectSummary};
