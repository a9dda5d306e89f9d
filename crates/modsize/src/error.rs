//! Error types for modsize.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// I/O failures while scanning a project or writing a report.
///
/// Any of these aborts the current operation; nothing is retried.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The project root could not be traversed.
    #[error("Error occur on scanning project in `{root}` directory.")]
    Walk {
        /// Absolute path of the project root.
        root: Utf8PathBuf,
        /// Underlying traversal error.
        #[source]
        source: walkdir::Error,
    },

    /// A file could not be opened or read while counting its lines.
    #[error("Error occur on counting lines of `{path}` file.")]
    ReadFile {
        /// Path of the file being counted.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A file under the project root has a name that is not valid UTF-8.
    #[error("Error occur on scanning project: `{}` is not a valid UTF-8 path.", path.display())]
    NonUtf8Path {
        /// The offending path.
        path: std::path::PathBuf,
    },

    /// The Mermaid chart could not be written.
    #[error("IO error occur on saving mermaid chart to {path}.")]
    WriteChart {
        /// Absolute path of the chart target.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Invalid arguments passed to a verification or report method.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A relative-size threshold outside `(0, 1]`.
    #[error("Threshold must be positive number in range (0, 1]. Given value is {value}.")]
    ThresholdOutOfRange {
        /// The rejected threshold, already formatted.
        value: String,
    },

    /// A module name that was never declared on the builder.
    #[error("Module `{name}` was not defined.")]
    UndefinedModule {
        /// The unknown module name.
        name: String,
    },

    /// An empty target path for the chart.
    #[error("The target argument must be not empty.")]
    MissingTarget,

    /// Two declared modules share a name.
    #[error("Module `{name}` was defined more than once.")]
    DuplicateModule {
        /// The repeated module name.
        name: String,
    },
}

/// A measured value violated a configured limit.
///
/// This is the "test failed" signal of every `verify_*` method.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssertionFailure {
    /// A declared module matched no files.
    #[error("Module `{name}` is empty.")]
    EmptyModule {
        /// Name of the empty module.
        name: String,
    },

    /// A module is larger than the allowed share of the project.
    #[error("Module `{name}` relative size is {actual}. Max allowed size is {max}.")]
    RelativeSizeExceeded {
        /// Name of the offending module.
        name: String,
        /// Measured relative size, formatted.
        actual: String,
        /// Configured threshold, formatted.
        max: String,
    },

    /// Too many files matched no declared module.
    #[error("Number of files in undefined module is {actual}. Max allowed count is {max}.")]
    TooManyUndefinedFiles {
        /// Files in the undefined bucket.
        actual: usize,
        /// Configured maximum.
        max: usize,
    },
}

/// Any error produced by modsize.
#[derive(Error, Debug)]
pub enum Error {
    /// Scanning or writing failed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A method was called with invalid arguments.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A size constraint was violated.
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns `true` if this is a violated size constraint.
    pub const fn is_assertion(&self) -> bool {
        matches!(self, Self::Assertion(_))
    }

    /// Returns `true` if this is a caller-usage error.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` if this is an I/O failure.
    pub const fn is_scan(&self) -> bool {
        matches!(self, Self::Scan(_))
    }
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
