//! Configuration module for sqlpkg
//!
//! This module provides a centralized configuration structure for the application.
//! It is created once in `main` and passed down, rather than reading global state
//! (the version string included) from wherever it is needed.

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Whether to show debug output
    verbose: bool,

    /// Print the assembled command instead of running it
    dry_run: bool,

    /// Name or path of the SqlPackage executable
    sqlpackage: String,

    /// Version of this tool, shown in the banner and sent as the SQL application name
    version: String,
}

impl AppConfig {
    /// Create a new application configuration
    ///
    /// # Arguments
    /// * `verbose` - Whether to show debug output
    /// * `dry_run` - Whether to stop after printing the assembled command
    /// * `sqlpackage` - Name or path of the SqlPackage executable
    /// * `version` - Version string of this build
    pub fn new(
        verbose: bool,
        dry_run: bool,
        sqlpackage: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            verbose,
            dry_run,
            sqlpackage: sqlpackage.into(),
            version: version.into(),
        }
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn sqlpackage(&self) -> &str {
        &self.sqlpackage
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Name this tool reports to SQL Server when it connects
    pub fn application_name(&self) -> String {
        format!("sqlpkg {}", self.version)
    }
}
