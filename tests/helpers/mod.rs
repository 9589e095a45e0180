//! Test helpers for sqlpkg integration tests
//!
//! Every test runs the binary with --dry-run inside its own temporary
//! directory, so relative output paths never touch the project tree and
//! SqlPackage does not need to be installed.

use assert_cmd::Command;
use tempfile::TempDir;

/// Create a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir, Box<dyn std::error::Error>> {
    Ok(TempDir::new()?)
}

/// Build a dry-run command working in `dir` with the given SqlPackage arguments
pub fn dry_run(dir: &TempDir, arguments: &[&str]) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("sqlpkg")?;
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .arg("--dry-run")
        .args(arguments);
    Ok(cmd)
}

/// Run a dry-run command that must succeed and return its stdout
pub fn dry_run_output(arguments: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let output = dry_run(&temp_dir, arguments)?.assert().success().get_output().clone();
    Ok(String::from_utf8(output.stdout)?)
}
