//! Mode argument assembler for sqlpkg
//!
//! Builds the argument list SqlPackage receives for an export or an import.
//! The leading arguments are always, in this order: the action, the
//! connection string, the file path, and the diagnostics file when one was
//! given. User arguments that SqlPackage understands follow unchanged;
//! arguments this tool consumed itself are dropped via the skip-lists.
//!
//! Each call builds a fresh list from the invocation, so calling twice with
//! the same input yields the same output.

use std::fs;
use std::path::Path;

use log::debug;

use crate::argument::CliArgument;
use crate::error::SqlPkgResult;
use crate::invocation::Invocation;
use crate::keys;
use crate::lookup::{set_default, ArgumentLookup};

/// Argument list for an export (database to file)
///
/// Creates the parent directories of the target file and diagnostics file.
pub fn build_export_arguments(invocation: &Invocation) -> SqlPkgResult<Vec<CliArgument>> {
    let mut working = vec![
        CliArgument::new("/a:", "Export"),
        CliArgument::new("/SourceConnectionString:", invocation.source.connection_string()),
        CliArgument::new("/TargetFile:", invocation.target_file.as_str()),
    ];
    push_diagnostics_file(&mut working, &invocation.log_file);
    working.extend(invocation.original.without_keys(keys::EXPORT_SKIPPED_ARGUMENTS));

    ensure_parent_directory(&invocation.target_file)?;
    ensure_parent_directory(&invocation.log_file)?;

    set_default(&mut working, keys::VERIFY_EXTRACTION[0], "false");

    Ok(working)
}

/// Argument list for an import (file to database)
///
/// Creates the parent directory of the diagnostics file.
pub fn build_import_arguments(invocation: &Invocation) -> SqlPkgResult<Vec<CliArgument>> {
    let mut working = vec![
        CliArgument::new("/a:", "Import"),
        CliArgument::new("/TargetConnectionString:", invocation.target.connection_string()),
        CliArgument::new("/SourceFile:", invocation.source_file.as_str()),
    ];
    push_diagnostics_file(&mut working, &invocation.log_file);
    working.extend(invocation.original.without_keys(keys::IMPORT_SKIPPED_ARGUMENTS));

    ensure_parent_directory(&invocation.log_file)?;

    Ok(working)
}

fn push_diagnostics_file(working: &mut Vec<CliArgument>, log_file: &str) {
    if !log_file.is_empty() {
        working.push(CliArgument::new("/DiagnosticsFile:", log_file));
    }
}

/// Create the directory a file will be written into; existing directories are fine
fn ensure_parent_directory(file_path: &str) -> SqlPkgResult<()> {
    if file_path.is_empty() {
        return Ok(());
    }

    match Path::new(file_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            debug!("Ensuring directory exists: {}", parent.display());
            fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}
