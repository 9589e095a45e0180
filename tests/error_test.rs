//! Failure tests for sqlpkg
//!
//! Fatal conditions must stop the run before SqlPackage would be started.

mod helpers;

use assert_cmd::Command;
use predicates::prelude::*;

use helpers::{create_temp_dir, dry_run};

#[test]
fn test_non_numeric_timeout_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    dry_run(&temp_dir, &["/a:Export", "/ssn:db1", "/tf:out.bacpac", "/st:soon"])?
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid timeout value for /SourceTimeout: 'soon'"));
    Ok(())
}

#[test]
fn test_unsupported_wildcard_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    dry_run(
        &temp_dir,
        &["/a:Export", "/ssn:db1", "/tf:out.bacpac", "/p:ExcludeTableData=[*].[Orders]"],
    )?
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid table exclusion '[*].[Orders]'"));
    Ok(())
}

#[test]
fn test_unreachable_catalog_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    dry_run(
        &temp_dir,
        &[
            "/a:Export",
            "/ssn:127.0.0.1,1",
            "/st:2",
            "/tf:out.bacpac",
            "/p:ExcludeTableData=[dbo].[Log*]",
        ],
    )?
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("Could not list tables in the source database"));
    Ok(())
}

#[test]
fn test_missing_tool_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = create_temp_dir()?;
    let mut cmd = Command::cargo_bin("sqlpkg")?;
    cmd.current_dir(temp_dir.path())
        .args(["--sqlpackage", "sqlpkg-test-no-such-binary", "/a:Version"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("dotnet tool install --global microsoft.sqlpackage"));
    Ok(())
}
