//! CLI argument parsing module for sqlpkg
//!
//! Only a handful of double-dash options belong to sqlpkg itself. Everything
//! else on the command line is SqlPackage syntax (`/Action:Export`,
//! `/p:TableData=...`) and is collected verbatim, in order, for the
//! translator to work on.

use anyhow::Result;
use clap::Parser;

/// Command-line arguments for sqlpkg
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Runs SqlPackage exports and imports with friendlier arguments and table exclusions",
    after_help = "Example: sqlpkg /a:Backup /ssn:db1 /sdn:shop /tf:shop.bacpac /p:ExcludeTableData=[dbo].[Audit*]"
)]
pub struct SqlPkgArgs {
    /// Enable debug output
    #[clap(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Print the assembled SqlPackage command line and exit without running it
    #[clap(long, help = "Print the SqlPackage command instead of running it")]
    pub dry_run: bool,

    /// Name or path of the SqlPackage executable
    #[clap(
        long,
        value_name = "PATH",
        default_value = "sqlpackage",
        help = "SqlPackage executable to run"
    )]
    pub sqlpackage: String,

    /// SqlPackage style arguments, e.g. /Action:Export /SourceServerName:db1
    #[clap(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "ARGS",
        help = "SqlPackage arguments such as /Action:Export /TargetFile:db.bacpac"
    )]
    pub arguments: Vec<String>,
}

/// Parse command-line arguments into the SqlPkgArgs structure
pub fn parse_args() -> Result<SqlPkgArgs> {
    Ok(SqlPkgArgs::parse())
}
