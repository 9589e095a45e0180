//! Process runner for the external SqlPackage tool
//!
//! Arguments are handed over as separate argv entries, so no shell quoting
//! is applied here. Output streams straight to the user's terminal.

use log::debug;
use tokio::process::Command;

use crate::argument::{to_cli_tokens, CliArgument};
use crate::error::{SqlPkgError, SqlPkgResult};

/// Handle on the SqlPackage executable
pub struct SqlPackage {
    program: String,
}

impl SqlPackage {
    pub fn new(program: impl Into<String>) -> Self {
        SqlPackage {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Version reported by `sqlpackage /version:true`
    ///
    /// Fails with `ToolNotFound` when the executable cannot be started.
    pub async fn version(&self) -> SqlPkgResult<String> {
        let output = Command::new(&self.program)
            .arg("/version:true")
            .output()
            .await
            .map_err(|source| self.not_found(source))?;

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run the tool to completion and return its exit code
    pub async fn run(&self, arguments: &[CliArgument]) -> SqlPkgResult<i32> {
        debug!("Starting {} with {} arguments", self.program, arguments.len());

        let status = Command::new(&self.program)
            .args(to_cli_tokens(arguments))
            .status()
            .await
            .map_err(|source| self.not_found(source))?;

        // No code means the process was killed by a signal
        Ok(status.code().unwrap_or(1))
    }

    fn not_found(&self, source: std::io::Error) -> SqlPkgError {
        SqlPkgError::ToolNotFound {
            tool: self.program.clone(),
            source,
        }
    }
}
