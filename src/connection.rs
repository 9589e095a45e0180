//! Connection descriptor module for sqlpkg
//!
//! A connection can be given either as a full connection string
//! (`/SourceConnectionString:"Data Source=db1;Initial Catalog=shop"`) or as
//! discrete fields (`/SourceServerName:db1 /SourceDatabaseName:shop`). This
//! module merges both forms into one `ConnectionDescriptor` per role whose
//! fields and connection string always agree.
//!
//! Malformed pieces of a connection string are never fatal here: missing or
//! unreadable values fall back to the documented defaults and the external
//! tool gets to fail against the real server. A timeout override given on
//! the command line is different, it must be a whole number.

use log::warn;

use crate::argument::{remove_wrapped_quotes, CliArgument};
use crate::error::{SqlPkgError, SqlPkgResult};
use crate::keys;
use crate::lookup::ArgumentLookup;

pub const DEFAULT_CONNECT_TIMEOUT: u32 = 30;
pub const DEFAULT_COMMAND_TIMEOUT: u32 = 120;
pub const DEFAULT_TRUST_SERVER_CERTIFICATE: bool = true;

/// Which side of the operation a descriptor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Source,
    Target,
}

/// Key spellings for one role
struct RoleKeys {
    connection_string: &'static [&'static str],
    server_name: &'static [&'static str],
    database_name: &'static [&'static str],
    user: &'static [&'static str],
    password: &'static [&'static str],
    timeout: &'static [&'static str],
    trust_server_certificate: &'static [&'static str],
}

impl Role {
    fn keys(self) -> RoleKeys {
        match self {
            Role::Source => RoleKeys {
                connection_string: keys::SOURCE_CONNECTION_STRING,
                server_name: keys::SOURCE_SERVER_NAME,
                database_name: keys::SOURCE_DATABASE_NAME,
                user: keys::SOURCE_USER,
                password: keys::SOURCE_PASSWORD,
                timeout: keys::SOURCE_TIMEOUT,
                trust_server_certificate: keys::SOURCE_TRUST_SERVER_CERTIFICATE,
            },
            Role::Target => RoleKeys {
                connection_string: keys::TARGET_CONNECTION_STRING,
                server_name: keys::TARGET_SERVER_NAME,
                database_name: keys::TARGET_DATABASE_NAME,
                user: keys::TARGET_USER,
                password: keys::TARGET_PASSWORD,
                timeout: keys::TARGET_TIMEOUT,
                trust_server_certificate: keys::TARGET_TRUST_SERVER_CERTIFICATE,
            },
        }
    }
}

/// Recognised connection string keywords, canonical spelling first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    DataSource,
    InitialCatalog,
    UserId,
    Password,
    ConnectTimeout,
    CommandTimeout,
    TrustServerCertificate,
}

const KEYWORD_SYNONYMS: &[(Keyword, &[&str])] = &[
    (
        Keyword::DataSource,
        &["Data Source", "Server", "Address", "Addr", "Network Address"],
    ),
    (Keyword::InitialCatalog, &["Initial Catalog", "Database"]),
    (Keyword::UserId, &["User ID", "UID", "User"]),
    (Keyword::Password, &["Password", "PWD"]),
    (
        Keyword::ConnectTimeout,
        &["Connect Timeout", "Connection Timeout", "Timeout"],
    ),
    (Keyword::CommandTimeout, &["Command Timeout"]),
    (
        Keyword::TrustServerCertificate,
        &["Trust Server Certificate", "TrustServerCertificate"],
    ),
];

fn keyword(name: &str) -> Option<Keyword> {
    KEYWORD_SYNONYMS
        .iter()
        .find(|(_, synonyms)| synonyms.iter().any(|s| s.eq_ignore_ascii_case(name)))
        .map(|(keyword, _)| *keyword)
}

/// Canonical connection settings for one side of the operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    pub server_name: String,
    pub database_name: String,
    pub user_name: String,
    pub password: String,
    /// Seconds
    pub connect_timeout: u32,
    /// Seconds
    pub command_timeout: u32,
    pub trust_server_certificate: bool,
    /// Keywords this module does not interpret, kept in their original order
    extra: Vec<(String, String)>,
}

impl Default for ConnectionDescriptor {
    fn default() -> Self {
        ConnectionDescriptor {
            server_name: String::new(),
            database_name: String::new(),
            user_name: String::new(),
            password: String::new(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            trust_server_certificate: DEFAULT_TRUST_SERVER_CERTIFICATE,
            extra: Vec::new(),
        }
    }
}

impl ConnectionDescriptor {
    /// Parse an ADO style connection string
    ///
    /// Unknown keywords are kept and re-emitted; missing or unreadable
    /// timeouts and flags take their defaults.
    pub fn parse(connection_string: &str) -> Self {
        let mut descriptor = ConnectionDescriptor::default();

        for (name, value) in split_pairs(connection_string) {
            match keyword(&name) {
                Some(Keyword::DataSource) => descriptor.server_name = value,
                Some(Keyword::InitialCatalog) => descriptor.database_name = value,
                Some(Keyword::UserId) => descriptor.user_name = value,
                Some(Keyword::Password) => descriptor.password = value,
                Some(Keyword::ConnectTimeout) => {
                    descriptor.connect_timeout =
                        lenient_seconds(&name, &value, DEFAULT_CONNECT_TIMEOUT)
                }
                Some(Keyword::CommandTimeout) => {
                    descriptor.command_timeout =
                        lenient_seconds(&name, &value, DEFAULT_COMMAND_TIMEOUT)
                }
                Some(Keyword::TrustServerCertificate) => {
                    descriptor.trust_server_certificate = lenient_bool(&name, &value)
                }
                None => descriptor.extra.push((name, value)),
            }
        }

        descriptor
    }

    /// Canonical connection string for the current field values
    pub fn connection_string(&self) -> String {
        self.render(&self.password)
    }

    /// Connection string with the password hidden, for log output
    pub fn masked_connection_string(&self) -> String {
        if self.password.is_empty() {
            self.connection_string()
        } else {
            self.render("********")
        }
    }

    /// Value of a keyword kept in `extra`, matched ignoring case and spaces
    pub(crate) fn extra_value(&self, names: &[&str]) -> Option<&str> {
        let squash = |name: &str| name.replace(' ', "").to_ascii_lowercase();
        self.extra
            .iter()
            .find(|(key, _)| names.iter().any(|name| squash(key) == squash(name)))
            .map(|(_, value)| value.as_str())
    }

    fn render(&self, password: &str) -> String {
        let mut pairs: Vec<(&str, String)> = vec![
            ("Data Source", self.server_name.clone()),
            ("Initial Catalog", self.database_name.clone()),
        ];
        if !self.user_name.is_empty() {
            pairs.push(("User ID", self.user_name.clone()));
        }
        if !password.is_empty() {
            pairs.push(("Password", password.to_string()));
        }
        pairs.push(("Connect Timeout", self.connect_timeout.to_string()));
        pairs.push(("Command Timeout", self.command_timeout.to_string()));
        pairs.push((
            "Trust Server Certificate",
            if self.trust_server_certificate { "True" } else { "False" }.to_string(),
        ));

        pairs
            .into_iter()
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.clone())))
            .map(|(name, value)| format!("{name}={}", quote_value(&value)))
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Build the descriptor for `role` from the original command-line arguments
///
/// When a connection string is given it is the source of truth, with the
/// trust-certificate flag, connect timeout and command timeout overridden by
/// explicit arguments. Otherwise each field comes from its own argument.
/// The command timeout always comes from the shared `/p:CommandTimeout=`.
pub fn build_descriptor(arguments: &[CliArgument], role: Role) -> SqlPkgResult<ConnectionDescriptor> {
    let keys = role.keys();
    let connection_string = arguments
        .argument_value(keys.connection_string)
        .map(remove_wrapped_quotes)
        .unwrap_or_default();

    let mut descriptor = if connection_string.is_empty() {
        ConnectionDescriptor {
            server_name: text_field(arguments, keys.server_name),
            database_name: text_field(arguments, keys.database_name),
            user_name: text_field(arguments, keys.user),
            password: text_field(arguments, keys.password),
            ..ConnectionDescriptor::default()
        }
    } else {
        ConnectionDescriptor::parse(connection_string)
    };

    if let Some(value) = arguments.argument_value(keys.trust_server_certificate) {
        descriptor.trust_server_certificate = value.trim().eq_ignore_ascii_case("true");
    }
    if let Some(value) = arguments.argument_value(keys.timeout) {
        descriptor.connect_timeout = strict_seconds(keys.timeout[0], value)?;
    }
    if let Some(value) = arguments.argument_value(keys::COMMAND_TIMEOUT) {
        descriptor.command_timeout = strict_seconds(keys::COMMAND_TIMEOUT[0], value)?;
    }

    Ok(descriptor)
}

/// Copy of `arguments` with passwords hidden, for log output
pub fn mask_secrets(arguments: &[CliArgument]) -> Vec<CliArgument> {
    arguments
        .iter()
        .map(|argument| {
            if key_in(argument, &[keys::SOURCE_CONNECTION_STRING, keys::TARGET_CONNECTION_STRING]) {
                let descriptor = ConnectionDescriptor::parse(remove_wrapped_quotes(&argument.value));
                CliArgument::new(argument.key.as_str(), descriptor.masked_connection_string())
            } else if key_in(argument, &[keys::SOURCE_PASSWORD, keys::TARGET_PASSWORD])
                && !argument.value.is_empty()
            {
                CliArgument::new(argument.key.as_str(), "********")
            } else {
                argument.clone()
            }
        })
        .collect()
}

fn key_in(argument: &CliArgument, groups: &[&[&str]]) -> bool {
    groups.iter().any(|spellings| spellings.iter().any(|key| argument.key_is(key)))
}

fn text_field(arguments: &[CliArgument], keys: &[&str]) -> String {
    arguments
        .argument_value(keys)
        .map(remove_wrapped_quotes)
        .unwrap_or_default()
        .to_string()
}

fn strict_seconds(key: &str, value: &str) -> SqlPkgResult<u32> {
    let value = remove_wrapped_quotes(value);
    value.parse().map_err(|_| SqlPkgError::InvalidTimeout {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn lenient_seconds(name: &str, value: &str, default: u32) -> u32 {
    value.trim().parse().unwrap_or_else(|_| {
        warn!("Ignoring unreadable '{name}' value '{value}' in connection string, using {default}");
        default
    })
}

fn lenient_bool(name: &str, value: &str) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" => true,
        "false" | "no" => false,
        _ => {
            warn!(
                "Ignoring unreadable '{name}' value '{value}' in connection string, using {DEFAULT_TRUST_SERVER_CERTIFICATE}"
            );
            DEFAULT_TRUST_SERVER_CERTIFICATE
        }
    }
}

/// Split a connection string into trimmed `(name, value)` pairs
///
/// Values may be wrapped in `"` or `'`; a doubled quote inside stands for
/// one literal quote. Segments without `=` are skipped.
fn split_pairs(connection_string: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut chars = connection_string.chars().peekable();

    loop {
        let mut name = String::new();
        while let Some(&c) = chars.peek() {
            if c == '=' || c == ';' {
                break;
            }
            name.push(c);
            chars.next();
        }

        match chars.next() {
            None => break,
            Some(';') => continue,
            Some(_) => {}
        }

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let mut value = String::new();
        match chars.peek().copied() {
            Some(quote @ ('"' | '\'')) => {
                chars.next();
                while let Some(c) = chars.next() {
                    if c == quote {
                        if chars.peek() == Some(&quote) {
                            value.push(quote);
                            chars.next();
                        } else {
                            break;
                        }
                    } else {
                        value.push(c);
                    }
                }
                // Anything between the closing quote and the next ';' is dropped
                for c in chars.by_ref() {
                    if c == ';' {
                        break;
                    }
                }
            }
            _ => {
                for c in chars.by_ref() {
                    if c == ';' {
                        break;
                    }
                    value.push(c);
                }
                value = value.trim_end().to_string();
            }
        }

        let name = name.trim();
        if !name.is_empty() {
            pairs.push((name.to_string(), value));
        }
    }

    pairs
}

fn quote_value(value: &str) -> String {
    let needs_quotes = value.contains(';')
        || value.contains('=')
        || value.starts_with('"')
        || value.starts_with('\'')
        || value.trim() != value;

    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::parse_arguments;

    #[test]
    fn test_parse_reads_synonyms_and_defaults() {
        let descriptor =
            ConnectionDescriptor::parse("Server=db1;Database=shop;UID=sa;PWD=secret");
        assert_eq!(descriptor.server_name, "db1");
        assert_eq!(descriptor.database_name, "shop");
        assert_eq!(descriptor.user_name, "sa");
        assert_eq!(descriptor.password, "secret");
        assert_eq!(descriptor.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(descriptor.command_timeout, DEFAULT_COMMAND_TIMEOUT);
        assert!(descriptor.trust_server_certificate);
    }

    #[test]
    fn test_canonical_form_and_extras() {
        let descriptor = ConnectionDescriptor::parse(
            "data source=db1;initial catalog=shop;Encrypt=True;Connect Timeout=5;TrustServerCertificate=false",
        );
        assert_eq!(
            descriptor.connection_string(),
            "Data Source=db1;Initial Catalog=shop;Connect Timeout=5;Command Timeout=120;Trust Server Certificate=False;Encrypt=True"
        );
    }

    #[test]
    fn test_quoted_values_survive_round_trip() {
        let descriptor =
            ConnectionDescriptor::parse("Data Source=db1;Password=\"p;w\"\"d\";User ID='sa'");
        assert_eq!(descriptor.password, "p;w\"d");
        assert_eq!(descriptor.user_name, "sa");

        let reparsed = ConnectionDescriptor::parse(&descriptor.connection_string());
        assert_eq!(reparsed, descriptor);
    }

    #[test]
    fn test_values_with_equals_are_quoted() {
        let descriptor = ConnectionDescriptor {
            server_name: "db1".to_string(),
            password: "a=b".to_string(),
            user_name: "sa".to_string(),
            ..ConnectionDescriptor::default()
        };
        assert!(descriptor
            .connection_string()
            .contains(";Password=\"a=b\";"));
        assert_eq!(ConnectionDescriptor::parse(&descriptor.connection_string()), descriptor);
    }

    #[test]
    fn test_malformed_pieces_fall_back_to_defaults() {
        let descriptor = ConnectionDescriptor::parse(
            "Data Source=db1;;garbage;Connect Timeout=soon;Trust Server Certificate=maybe;",
        );
        assert_eq!(descriptor.server_name, "db1");
        assert_eq!(descriptor.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert!(descriptor.trust_server_certificate);
    }

    #[test]
    fn test_fields_path_synthesizes_connection_string() {
        let args = parse_arguments([
            "/ssn:db1",
            "/SourceDatabaseName:\"my db\"",
            "/su:sa",
            "/sp:secret",
            "/st:45",
            "/stsc:False",
        ]);
        let descriptor = build_descriptor(&args, Role::Source).unwrap();
        assert_eq!(descriptor.database_name, "my db");
        assert_eq!(descriptor.connect_timeout, 45);
        assert!(!descriptor.trust_server_certificate);
        assert_eq!(
            descriptor.connection_string(),
            "Data Source=db1;Initial Catalog=my db;User ID=sa;Password=secret;Connect Timeout=45;Command Timeout=120;Trust Server Certificate=False"
        );
        assert!(descriptor.masked_connection_string().contains("Password=********"));
    }

    #[test]
    fn test_connection_string_overrides() {
        let args = parse_arguments([
            "/tcs:\"Data Source=db2;Initial Catalog=shop;Connect Timeout=10;Trust Server Certificate=False\"",
            "/TargetTimeout:90",
            "/ttsc:true",
            "/TargetServerName:ignored",
        ]);
        let descriptor = build_descriptor(&args, Role::Target).unwrap();
        assert_eq!(descriptor.server_name, "db2");
        assert_eq!(descriptor.connect_timeout, 90);
        assert!(descriptor.trust_server_certificate);
    }

    #[test]
    fn test_command_timeout_is_shared_between_roles() {
        let args = parse_arguments([
            "/scs:Data Source=db1;Initial Catalog=a;Command Timeout=15",
            "/tsn:db2",
            "/p:CommandTimeout=600",
        ]);
        let source = build_descriptor(&args, Role::Source).unwrap();
        let target = build_descriptor(&args, Role::Target).unwrap();
        assert_eq!(source.command_timeout, 600);
        assert_eq!(target.command_timeout, 600);
    }

    #[test]
    fn test_no_overrides_matches_direct_parse() {
        let text = "Server=db1;Database=shop;User=sa;Password=x;Timeout=12;Command Timeout=7";
        let args = parse_arguments([format!("/SourceConnectionString:{text}")]);
        let built = build_descriptor(&args, Role::Source).unwrap();
        assert_eq!(built, ConnectionDescriptor::parse(text));
        assert_eq!(
            ConnectionDescriptor::parse(&built.connection_string()),
            ConnectionDescriptor::parse(text)
        );
    }

    #[test]
    fn test_unparsable_timeout_override_is_fatal() {
        let args = parse_arguments(["/ssn:db1", "/st:soon"]);
        assert!(matches!(
            build_descriptor(&args, Role::Source),
            Err(SqlPkgError::InvalidTimeout { .. })
        ));

        let args = parse_arguments(["/scs:Data Source=db1", "/p:CommandTimeout=-1"]);
        assert!(build_descriptor(&args, Role::Source).is_err());
    }

    #[test]
    fn test_mask_secrets_hides_passwords() {
        let args = parse_arguments([
            "/SourceConnectionString:Data Source=db1;Password=hunter2",
            "/tp:hunter3",
            "/p:Storage=Memory",
        ]);
        let masked = mask_secrets(&args);
        assert!(!masked[0].value.contains("hunter2"));
        assert!(masked[0].value.contains("Password=********"));
        assert_eq!(masked[1].value, "********");
        assert_eq!(masked[2], args[2]);
    }

    #[test]
    fn test_missing_everything_still_builds() {
        let descriptor = build_descriptor(&[], Role::Target).unwrap();
        assert_eq!(descriptor, ConnectionDescriptor::default());
        assert_eq!(
            descriptor.connection_string(),
            "Data Source=;Initial Catalog=;Connect Timeout=30;Command Timeout=120;Trust Server Certificate=True"
        );
    }
}
