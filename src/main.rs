//! sqlpkg - friendlier front end for SqlPackage exports and imports
//!
//! # Program Flow
//!
//! 1. Parse command-line arguments
//! 2. Resolve the action, file paths and both connection descriptors
//! 3. Assemble the SqlPackage argument list for the action
//! 4. For exports, turn table exclusions into explicit table data entries
//! 5. Print the command (`--dry-run`) or run SqlPackage and pass on its exit code

use anyhow::{Context, Result};
use env_logger::Env;
use log::{debug, info};

use sqlpkg::argument::render_command_line;
use sqlpkg::catalog::SqlServerCatalog;
use sqlpkg::cli;
use sqlpkg::config::AppConfig;
use sqlpkg::connection::mask_secrets;
use sqlpkg::invocation::Invocation;
use sqlpkg::pipeline;
use sqlpkg::runner::SqlPackage;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse_args()?;

    let config = AppConfig::new(
        args.verbose,
        args.dry_run,
        args.sqlpackage.clone(),
        env!("CARGO_PKG_VERSION"),
    );

    // Logs go to stderr so --dry-run output stays clean
    let default_level = if config.verbose() { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    info!("sqlpkg {}", config.version());

    let invocation =
        Invocation::from_tokens(&args.arguments).context("Failed to read arguments")?;
    info!("Action: {}", invocation.action);

    let catalog = SqlServerCatalog::new(config.application_name());
    let working = pipeline::prepare(&invocation, &catalog)
        .await
        .context("Failed to prepare SqlPackage arguments")?;

    debug!(
        "Command: {}",
        render_command_line(config.sqlpackage(), &mask_secrets(&working))
    );

    if config.dry_run() {
        println!("{}", render_command_line(config.sqlpackage(), &working));
        return Ok(());
    }

    let sqlpackage = SqlPackage::new(config.sqlpackage());
    let tool_version = sqlpackage.version().await?;
    info!("Using SqlPackage {tool_version}");

    let exit_code = sqlpackage
        .run(&working)
        .await
        .with_context(|| format!("Failed to run {}", sqlpackage.program()))?;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
