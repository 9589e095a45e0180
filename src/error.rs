//! Error handling for sqlpkg
//!
//! This module defines the error type shared by the argument translation
//! library. Fatal conditions abort before the external tool is started, so
//! every variant here represents an invocation that never reaches SqlPackage.
//!
//! The module uses thiserror to keep the boilerplate out of the way.

use thiserror::Error;

/// SqlPkgError represents all failures the translator can report
#[derive(Error, Debug)]
pub enum SqlPkgError {
    /// Error during file system operations (creating output directories)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A timeout override was supplied on the command line but is not an integer
    #[error("Invalid timeout value for {key} '{value}': expected a whole number of seconds")]
    InvalidTimeout { key: String, value: String },

    /// An exclusion pattern uses '*' somewhere other than the supported positions
    #[error(
        "Invalid table exclusion '{0}': a wildcard must be the first or last character of the table name, e.g. [dbo].[Audit*] or [dbo].[*Log]"
    )]
    InvalidExclusionPattern(String),

    /// The table catalog could not be read from the source database
    #[error("Could not list tables in the source database: {0}")]
    Catalog(#[from] tiberius::error::Error),

    /// The external tool could not be started
    #[error(
        "Could not run '{tool}': {source}. Install it with \"dotnet tool install --global microsoft.sqlpackage\" or pass --sqlpackage <PATH>"
    )]
    ToolNotFound {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for operations that can produce a SqlPkgError
pub type SqlPkgResult<T> = std::result::Result<T, SqlPkgError>;
