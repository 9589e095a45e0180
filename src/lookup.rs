//! Lookup helpers over an ordered argument list
//!
//! All key comparisons are case-insensitive. Callers pass every spelling of a
//! key (long and short form) and the first matching argument wins.

use crate::argument::CliArgument;

/// Read-only queries over an ordered list of arguments
pub trait ArgumentLookup {
    /// True if any argument's key matches one of `keys`
    fn has_argument(&self, keys: &[&str]) -> bool;

    /// Value of the first argument whose key matches one of `keys`
    fn argument_value(&self, keys: &[&str]) -> Option<&str>;

    /// Value of the first matching argument, or `default` when there is none
    fn argument_value_or(&self, keys: &[&str], default: &str) -> String {
        self.argument_value(keys).unwrap_or(default).to_string()
    }

    /// Values of every argument whose key matches, in order
    fn values_of(&self, keys: &[&str]) -> Vec<&str>;

    /// Copy of the list without any argument whose key is in `skipped`
    fn without_keys(&self, skipped: &[&str]) -> Vec<CliArgument>;
}

fn matches(argument: &CliArgument, keys: &[&str]) -> bool {
    keys.iter().any(|key| argument.key_is(key))
}

impl ArgumentLookup for [CliArgument] {
    fn has_argument(&self, keys: &[&str]) -> bool {
        self.iter().any(|argument| matches(argument, keys))
    }

    fn argument_value(&self, keys: &[&str]) -> Option<&str> {
        self.iter()
            .find(|argument| matches(argument, keys))
            .map(|argument| argument.value.as_str())
    }

    fn values_of(&self, keys: &[&str]) -> Vec<&str> {
        self.iter()
            .filter(|argument| matches(argument, keys))
            .map(|argument| argument.value.as_str())
            .collect()
    }

    fn without_keys(&self, skipped: &[&str]) -> Vec<CliArgument> {
        self.iter()
            .filter(|argument| !matches(argument, skipped))
            .cloned()
            .collect()
    }
}

/// Append `key`/`value` unless an argument with that key is already present
pub fn set_default(arguments: &mut Vec<CliArgument>, key: &str, value: &str) {
    if !arguments.has_argument(&[key]) {
        arguments.push(CliArgument::new(key, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::parse_arguments;
    use crate::keys;

    #[test]
    fn test_long_and_short_spellings_are_equivalent() {
        let long = parse_arguments(["/TargetFile:out.bacpac"]);
        let short = parse_arguments(["/tf:out.bacpac"]);
        let shouting = parse_arguments(["/TARGETFILE:out.bacpac"]);

        for args in [&long, &short, &shouting] {
            assert!(args.has_argument(keys::TARGET_FILE));
            assert_eq!(args.argument_value(keys::TARGET_FILE), Some("out.bacpac"));
        }
    }

    #[test]
    fn test_first_match_wins_and_default_applies() {
        let args = parse_arguments(["/sf:first.bacpac", "/SourceFile:second.bacpac"]);
        assert_eq!(args.argument_value_or(keys::SOURCE_FILE, ""), "first.bacpac");
        assert_eq!(args.argument_value_or(keys::SOURCE_TIMEOUT, "30"), "30");
        assert_eq!(args.argument_value(keys::SOURCE_TIMEOUT), None);
    }

    #[test]
    fn test_set_default_only_appends_when_absent() {
        let mut args = parse_arguments(["/p:verifyextraction=true"]);
        set_default(&mut args, "/p:VerifyExtraction=", "false");
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].value, "true");

        let mut args = parse_arguments(["/a:Export"]);
        set_default(&mut args, "/p:VerifyExtraction=", "false");
        assert_eq!(args.last(), Some(&CliArgument::new("/p:VerifyExtraction=", "false")));
    }

    #[test]
    fn test_without_keys_preserves_order_and_input() {
        let args = parse_arguments(["/a:Export", "/p:Storage=Memory", "/SSN:db1", "/Quiet"]);
        let kept = args.without_keys(keys::EXPORT_SKIPPED_ARGUMENTS);
        assert_eq!(
            kept,
            vec![
                CliArgument::new("/p:Storage=", "Memory"),
                CliArgument::new("/Quiet", ""),
            ]
        );
        assert_eq!(args.len(), 4);
    }

    #[test]
    fn test_values_of_collects_repeated_keys() {
        let args = parse_arguments(["/p:TableData=a", "/p:Other=x", "/P:TABLEDATA=b"]);
        assert_eq!(args.values_of(keys::TABLE_DATA), vec!["a", "b"]);
    }
}
