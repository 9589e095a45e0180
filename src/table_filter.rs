//! Table filter module for sqlpkg
//!
//! SqlPackage exports every table unless it is given `/p:TableData=` entries.
//! This module adds `/p:ExcludeTableData=` on top of that: the table list is
//! read from the source database, exclusions are removed from it, and the
//! remainder is written back as one `/p:TableData=` entry per table.
//!
//! Table names are compared in the canonical `[schema].[table]` form.
//! Exclusions accept exactly three shapes:
//!
//! - `[dbo].[Orders]` removes that table
//! - `[dbo].[Audit*]` removes every table whose name starts with `[dbo].[Audit`
//! - `[dbo].[*Log]` removes every table whose name ends with `Log]`
//!
//! Any other placement of `*` is rejected.

use std::sync::OnceLock;

use log::{debug, info};
use regex::Regex;

use crate::argument::{remove_wrapped_quotes, CliArgument};
use crate::catalog::TableCatalog;
use crate::connection::ConnectionDescriptor;
use crate::error::{SqlPkgError, SqlPkgResult};
use crate::keys;
use crate::lookup::ArgumentLookup;

const DEFAULT_SCHEMA: &str = "dbo";

/// Normalize a table reference to `[schema].[table]`
///
/// Accepts `dbo.Orders`, `[dbo].[Orders]`, `"dbo"."Orders"`, `[dbo] . [Orders]`
/// and a bare `Orders` (schema `dbo`). Dots inside brackets or quotes belong
/// to the name. An empty input stays empty.
pub fn normalize_table_name(name: &str) -> String {
    let name = strip_outer_quotes(name.trim());
    if name.is_empty() {
        return String::new();
    }

    let mut parts = split_identifier(name);
    if parts.len() == 1 {
        parts.insert(0, DEFAULT_SCHEMA.to_string());
    }

    parts
        .iter()
        .map(|part| format!("[{}]", part.replace(']', "]]")))
        .collect::<Vec<_>>()
        .join(".")
}

/// Remove quotes wrapping the whole value, but not `"schema"."table"` quoting
fn strip_outer_quotes(name: &str) -> &str {
    let inner = remove_wrapped_quotes(name);
    match name.chars().next() {
        Some(quote) if inner.len() < name.len() && !inner.contains(quote) => inner.trim(),
        _ => name,
    }
}

/// Split a multi-part identifier on `.` outside brackets and quotes, with the
/// delimiters and surrounding whitespace removed from each part
///
/// A doubled closing delimiter (`]]` or `""`) inside a part is one literal
/// character, as `QUOTENAME` writes it.
fn split_identifier(name: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut closing: Option<char> = None;
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        match closing {
            Some(end) if c == end => {
                if chars.peek() == Some(&end) {
                    chars.next();
                    current.push(end);
                } else {
                    closing = None;
                }
            }
            Some(_) => current.push(c),
            None => match c {
                '[' => closing = Some(']'),
                '"' => closing = Some('"'),
                '.' => parts.push(std::mem::take(&mut current).trim().to_string()),
                c => current.push(c),
            },
        }
    }
    parts.push(current.trim().to_string());

    parts
}

/// A parsed `/p:ExcludeTableData=` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionPattern {
    /// Case-insensitive equality with a canonical table name
    Exact(String),
    /// Canonical names starting with this text, e.g. `[dbo].[Audit`
    Prefix(String),
    /// Canonical names ending with this text, e.g. `Log]`
    Suffix(String),
}

fn prefix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\[(?:[^\]*]|\]\])*\]\.\[(?:[^\]*]|\]\])*)\*\]$").expect("prefix pattern is valid")
    })
}

fn suffix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\[(?:[^\]*]|\]\])*\]\.\[\*((?:[^\]*]|\]\])*\])$").expect("suffix pattern is valid")
    })
}

impl ExclusionPattern {
    /// Parse an exclusion, normalizing the table name first
    ///
    /// Returns `Ok(None)` for an empty value.
    pub fn parse(raw: &str) -> SqlPkgResult<Option<Self>> {
        let name = normalize_table_name(raw);
        if name.is_empty() {
            return Ok(None);
        }
        if !name.contains('*') {
            return Ok(Some(ExclusionPattern::Exact(name)));
        }

        if let Some(captures) = prefix_pattern().captures(&name) {
            return Ok(Some(ExclusionPattern::Prefix(captures[1].to_string())));
        }
        if let Some(captures) = suffix_pattern().captures(&name) {
            return Ok(Some(ExclusionPattern::Suffix(captures[1].to_string())));
        }

        Err(SqlPkgError::InvalidExclusionPattern(raw.to_string()))
    }

    /// Whether a canonical table name is excluded by this pattern
    pub fn matches(&self, table: &str) -> bool {
        let table = table.to_lowercase();
        match self {
            ExclusionPattern::Exact(name) => table == name.to_lowercase(),
            ExclusionPattern::Prefix(prefix) => table.starts_with(&prefix.to_lowercase()),
            ExclusionPattern::Suffix(suffix) => table.ends_with(&suffix.to_lowercase()),
        }
    }
}

/// Remove every table matched by any exclusion, keeping the original order
pub fn apply_exclusions(tables: Vec<String>, exclusions: &[ExclusionPattern]) -> Vec<String> {
    tables
        .into_iter()
        .filter(|table| {
            let excluded = exclusions.iter().any(|pattern| pattern.matches(table));
            if excluded {
                debug!("Excluding table data for {table}");
            }
            !excluded
        })
        .collect()
}

/// Replace every `/p:TableData=` entry with one entry per table, appended at the end
pub fn replace_table_data(arguments: &[CliArgument], tables: &[String]) -> Vec<CliArgument> {
    let mut result = arguments.without_keys(keys::TABLE_DATA);
    result.extend(
        tables
            .iter()
            .map(|table| CliArgument::new(keys::TABLE_DATA[0], table.as_str())),
    );
    result
}

/// Compute the table data entries of an export
///
/// Explicit `/p:TableData=` entries win outright and are only normalized.
/// Otherwise, when exclusions are present, the source catalog is listed and
/// filtered. With neither, the working list is returned unchanged so that
/// SqlPackage exports every table.
pub async fn resolve_table_data<C: TableCatalog>(
    original: &[CliArgument],
    working: Vec<CliArgument>,
    source: &ConnectionDescriptor,
    catalog: &C,
) -> SqlPkgResult<Vec<CliArgument>> {
    let explicit = original.values_of(keys::TABLE_DATA);
    if !explicit.is_empty() {
        if original.has_argument(keys::EXCLUDE_TABLE_DATA) {
            info!("Explicit /p:TableData= given, ignoring /p:ExcludeTableData=");
        }
        let tables: Vec<String> = explicit
            .into_iter()
            .map(normalize_table_name)
            .filter(|table| !table.is_empty())
            .collect();
        return Ok(replace_table_data(&working, &tables));
    }

    let exclusions = original
        .values_of(keys::EXCLUDE_TABLE_DATA)
        .into_iter()
        .filter_map(|raw| ExclusionPattern::parse(raw).transpose())
        .collect::<SqlPkgResult<Vec<_>>>()?;
    if exclusions.is_empty() {
        return Ok(working);
    }

    let tables: Vec<String> = catalog
        .list_user_tables(source)
        .await?
        .iter()
        .map(|table| normalize_table_name(table))
        .collect();
    let listed = tables.len();
    let tables = apply_exclusions(tables, &exclusions);
    info!(
        "Exporting data for {} of {listed} tables ({} excluded)",
        tables.len(),
        listed - tables.len()
    );

    Ok(replace_table_data(&working, &tables))
}
