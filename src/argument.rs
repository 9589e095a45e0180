//! Argument token module for sqlpkg
//!
//! SqlPackage style arguments look like `/Action:Export`, `/tf:out.bacpac` or
//! `/p:TableData=[dbo].[Orders]`. This module turns raw command-line tokens
//! into key/value pairs and back again.
//!
//! The key keeps its trailing delimiter (`/TargetFile:`, `/p:TableData=`), so
//! re-emitting a token is just `key + value`. Only the first delimiter splits
//! a token; the value may contain further `:` or `=` characters.

use std::fmt;

/// How a raw token is split into key and value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Bare switch with no delimiter, e.g. `/Quiet`
    Flag,
    /// `key:value`, the default SqlPackage form
    Colon,
    /// `key=value`, used by `/p:` properties
    Equals,
}

impl TokenKind {
    /// Delimiter character for the kind, if it has one
    pub fn delimiter(self) -> Option<char> {
        match self {
            TokenKind::Flag => None,
            TokenKind::Colon => Some(':'),
            TokenKind::Equals => Some('='),
        }
    }
}

/// Prefix rules deciding the delimiter, checked in order (case-insensitive)
const PREFIX_RULES: &[(&str, TokenKind)] = &[("/p:", TokenKind::Equals), ("", TokenKind::Colon)];

/// A single parsed command-line argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgument {
    /// Key including its trailing delimiter, e.g. `/SourceFile:`
    pub key: String,
    /// Value after the first delimiter, possibly empty
    pub value: String,
}

impl CliArgument {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        CliArgument {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Parse one raw token
    ///
    /// Returns `None` for tokens shorter than two characters, which carry
    /// nothing the external tool could use.
    pub fn parse(token: &str) -> Option<Self> {
        if token.chars().count() < 2 {
            return None;
        }

        let kind = classify(token);
        let Some(delimiter) = kind.delimiter() else {
            return Some(CliArgument::new(token, ""));
        };

        match token.find(delimiter) {
            Some(index) if index > 0 => {
                let split = index + delimiter.len_utf8();
                Some(CliArgument::new(&token[..split], &token[split..]))
            }
            _ => Some(CliArgument::new(token, "")),
        }
    }

    /// Case-insensitive key comparison
    pub fn key_is(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }

    /// Token form handed to the external tool: key immediately followed by value
    pub fn to_cli_token(&self) -> String {
        format!("{}{}", self.key, self.value)
    }
}

impl fmt::Display for CliArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.key, self.value)
    }
}

/// Decide the token kind from the prefix table
fn classify(token: &str) -> TokenKind {
    let kind = PREFIX_RULES
        .iter()
        .find(|(prefix, _)| starts_with_ignore_case(token, prefix))
        .map(|(_, kind)| *kind)
        .unwrap_or(TokenKind::Colon);

    match kind.delimiter() {
        Some(delimiter) if token.contains(delimiter) => kind,
        _ => TokenKind::Flag,
    }
}

/// Parse every raw token in order, dropping the ones too short to mean anything
pub fn parse_arguments<I, S>(tokens: I) -> Vec<CliArgument>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .filter_map(|token| CliArgument::parse(token.as_ref()))
        .collect()
}

/// Serialize arguments into independent argv entries
pub fn to_cli_tokens(arguments: &[CliArgument]) -> Vec<String> {
    arguments.iter().map(CliArgument::to_cli_token).collect()
}

/// Render arguments as a single printable command line
///
/// Any token containing whitespace is wrapped in double quotes.
pub fn render_command_line(program: &str, arguments: &[CliArgument]) -> String {
    std::iter::once(program.to_string())
        .chain(arguments.iter().map(CliArgument::to_cli_token))
        .map(|token| {
            if token.chars().any(char::is_whitespace) {
                format!("\"{token}\"")
            } else {
                token
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip one pair of matching wrapping quotes (`"` or `'`)
pub fn remove_wrapped_quotes(value: &str) -> &str {
    let trimmed = value.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}

pub(crate) fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}
