//! Parsed state of one sqlpkg invocation
//!
//! Everything the assembler needs is resolved here once from the raw tokens:
//! the action, the file paths, and both connection descriptors. The original
//! argument list is kept as parsed and never modified.

use std::fmt;

use crate::argument::{parse_arguments, remove_wrapped_quotes, CliArgument};
use crate::connection::{build_descriptor, ConnectionDescriptor, Role};
use crate::error::SqlPkgResult;
use crate::keys;
use crate::lookup::ArgumentLookup;

/// What the user asked the external tool to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Database to .bacpac file (`Export` or `Backup`)
    Export,
    /// .bacpac file to database (`Import` or `Restore`)
    Import,
    /// Any other action, passed through untouched
    Other(String),
    /// No `/Action:` argument at all
    Missing,
}

impl Action {
    fn from_value(value: &str) -> Self {
        let name = title_case(remove_wrapped_quotes(value));
        match name.as_str() {
            "Export" | "Backup" => Action::Export,
            "Import" | "Restore" => Action::Import,
            _ => Action::Other(name),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Export => write!(f, "Export"),
            Action::Import => write!(f, "Import"),
            Action::Other(name) => write!(f, "{name}"),
            Action::Missing => write!(f, "(none)"),
        }
    }
}

fn title_case(value: &str) -> String {
    let mut chars = value.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// One invocation's arguments and the values derived from them
#[derive(Debug, Clone)]
pub struct Invocation {
    pub original: Vec<CliArgument>,
    pub action: Action,
    pub source_file: String,
    pub target_file: String,
    pub log_file: String,
    pub source: ConnectionDescriptor,
    pub target: ConnectionDescriptor,
}

impl Invocation {
    /// Parse raw tokens and resolve everything derived from them
    ///
    /// Fails only on a timeout override that is not a number.
    pub fn from_tokens<I, S>(tokens: I) -> SqlPkgResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_arguments(parse_arguments(tokens))
    }

    pub fn from_arguments(original: Vec<CliArgument>) -> SqlPkgResult<Self> {
        let action = original
            .argument_value(keys::ACTION)
            .map_or(Action::Missing, Action::from_value);

        Ok(Invocation {
            action,
            source_file: path_value(&original, keys::SOURCE_FILE),
            target_file: path_value(&original, keys::TARGET_FILE),
            log_file: path_value(&original, keys::DIAGNOSTICS_FILE),
            source: build_descriptor(&original, Role::Source)?,
            target: build_descriptor(&original, Role::Target)?,
            original,
        })
    }
}

fn path_value(arguments: &[CliArgument], spellings: &[&str]) -> String {
    arguments
        .argument_value(spellings)
        .map(remove_wrapped_quotes)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_aliases_and_case() {
        let cases = [
            ("/Action:export", Action::Export),
            ("/a:BACKUP", Action::Export),
            ("/a:Import", Action::Import),
            ("/action:restore", Action::Import),
            ("/a:extract", Action::Other("Extract".to_string())),
        ];
        for (token, expected) in cases {
            assert_eq!(Invocation::from_tokens([token]).unwrap().action, expected);
        }
        assert_eq!(Invocation::from_tokens(["/Quiet"]).unwrap().action, Action::Missing);
    }

    #[test]
    fn test_paths_are_unquoted() {
        let invocation = Invocation::from_tokens([
            "/a:Export",
            "/tf:\"C:\\My Backups\\shop.bacpac\"",
            "/DiagnosticsFile:'logs/run.log'",
        ])
        .unwrap();
        assert_eq!(invocation.target_file, "C:\\My Backups\\shop.bacpac");
        assert_eq!(invocation.log_file, "logs/run.log");
        assert_eq!(invocation.source_file, "");
    }

    #[test]
    fn test_descriptors_resolved_for_both_roles() {
        let invocation = Invocation::from_tokens([
            "/a:Export",
            "/ssn:db1",
            "/sdn:shop",
            "/TargetConnectionString:Server=db2;Database=archive",
        ])
        .unwrap();
        assert_eq!(invocation.source.server_name, "db1");
        assert_eq!(invocation.target.server_name, "db2");
        assert_eq!(invocation.target.database_name, "archive");
    }
}
