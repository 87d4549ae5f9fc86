//! Declarative option table
//!
//! Every flag the CLI understands is listed once in [`GLOBAL_OPTIONS`]. The
//! dispatcher builds clap arguments from it; the functions below derive the
//! field name, negated form and environment variable of a flag so that none of
//! these names are spelled out twice.
//!
//! Naming rules, all applied to the dashed long name (`completion-script`):
//!
//! - field name: drop each `-` and upper-case the character after it
//!   (`completionScript`)
//! - negated flag: prefix with `no-` (`no-completion-script`)
//! - environment variable: upper-case, `-` becomes `_`, prefixed with
//!   `PRECOMMIT_HOOK_` (`PRECOMMIT_HOOK_COMPLETION_SCRIPT`)

use crate::config::ENV_PREFIX;

/// Help heading shared by the global flags
pub const GLOBAL_GROUP: &str = "Global Options";

/// Metadata for one boolean flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDescriptor {
    /// Dashed long name, without the leading `--`
    pub key: &'static str,
    pub short: Option<char>,
    pub default: bool,
    pub help: &'static str,
    /// Help heading the flag is listed under
    pub group: &'static str,
    /// Inherited by subcommands
    pub global: bool,
    /// Whether the flag must be followed by an explicit value
    pub requires_value: bool,
}

pub const GLOBAL_OPTIONS: [OptionDescriptor; 4] = [
    OptionDescriptor {
        key: "verbose",
        short: Some('v'),
        default: false,
        help: "Enable verbose output",
        group: GLOBAL_GROUP,
        global: true,
        requires_value: false,
    },
    OptionDescriptor {
        key: "help",
        short: Some('h'),
        default: false,
        help: "Show help",
        group: GLOBAL_GROUP,
        global: true,
        requires_value: false,
    },
    OptionDescriptor {
        key: "version",
        short: None,
        default: false,
        help: "Show version number",
        group: GLOBAL_GROUP,
        global: true,
        requires_value: false,
    },
    OptionDescriptor {
        key: "completion-script",
        short: None,
        default: false,
        help: "Print a shell completion script",
        group: GLOBAL_GROUP,
        global: true,
        requires_value: false,
    },
];

/// Resolved values of the global flags for one invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    pub verbose: bool,
    pub help: bool,
    pub version: bool,
    pub completion_script: bool,
}

impl GlobalOptions {
    /// Set the field backing `key`; returns false for keys with no field
    pub fn set(&mut self, key: &str, value: bool) -> bool {
        let slot = match field_name(key).as_str() {
            "verbose" => &mut self.verbose,
            "help" => &mut self.help,
            "version" => &mut self.version,
            "completionScript" => &mut self.completion_script,
            _ => return false,
        };
        *slot = value;
        true
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        match field_name(key).as_str() {
            "verbose" => Some(self.verbose),
            "help" => Some(self.help),
            "version" => Some(self.version),
            "completionScript" => Some(self.completion_script),
            _ => None,
        }
    }
}

/// `completion-script` -> `completionScript`
pub fn field_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    let mut upper = false;
    for ch in key.chars() {
        if ch == '-' {
            upper = !name.is_empty();
            continue;
        }
        if upper {
            name.extend(ch.to_uppercase());
            upper = false;
        } else {
            name.push(ch);
        }
    }
    name
}

/// `verbose` -> `no-verbose`
pub fn negated_flag(key: &str) -> String {
    format!("no-{key}")
}

/// `completion-script` -> `PRECOMMIT_HOOK_COMPLETION_SCRIPT`
pub fn env_var(key: &str) -> String {
    format!("{ENV_PREFIX}{}", key.replace('-', "_").to_uppercase())
}

/// Find the descriptor for a long name, accepting the negated form.
///
/// Returns the descriptor and whether the name was negated.
pub fn lookup_long<'a>(
    options: &'a [OptionDescriptor],
    name: &str,
) -> Option<(&'a OptionDescriptor, bool)> {
    if let Some(option) = options.iter().find(|option| option.key == name) {
        return Some((option, false));
    }
    let positive = name.strip_prefix("no-")?;
    options
        .iter()
        .find(|option| option.key == positive)
        .map(|option| (option, true))
}

pub fn lookup_short(options: &[OptionDescriptor], alias: char) -> Option<&OptionDescriptor> {
    options.iter().find(|option| option.short == Some(alias))
}

/// Parse the boolean literals accepted after `--flag=`
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_camel_cases_dashes() {
        assert_eq!(field_name("completion-script"), "completionScript");
        assert_eq!(field_name("verbose"), "verbose");
        assert_eq!(field_name("dry-run-all"), "dryRunAll");
        assert_eq!(field_name("-leading"), "leading");
    }

    #[test]
    fn test_negated_flag() {
        assert_eq!(negated_flag("verbose"), "no-verbose");
        assert_eq!(negated_flag("completion-script"), "no-completion-script");
    }

    #[test]
    fn test_env_var_names() {
        assert_eq!(env_var("verbose"), "PRECOMMIT_HOOK_VERBOSE");
        assert_eq!(
            env_var("completion-script"),
            "PRECOMMIT_HOOK_COMPLETION_SCRIPT"
        );
    }

    #[test]
    fn test_schema_is_all_boolean_false_flags() {
        for option in &GLOBAL_OPTIONS {
            assert!(!option.default, "{} should default to false", option.key);
            assert!(!option.requires_value);
            assert!(option.global);
            assert_eq!(option.group, GLOBAL_GROUP);
        }
    }

    #[test]
    fn test_every_flag_has_a_field() {
        let mut options = GlobalOptions::default();
        for option in &GLOBAL_OPTIONS {
            assert!(options.set(option.key, true));
            assert_eq!(options.get(option.key), Some(true));
        }
        assert!(!options.set("unknown", true));
        assert_eq!(options.get("unknown"), None);
    }

    #[test]
    fn test_lookup_long_and_negated() {
        let (option, negated) = lookup_long(&GLOBAL_OPTIONS, "verbose").unwrap();
        assert_eq!(option.key, "verbose");
        assert!(!negated);

        let (option, negated) = lookup_long(&GLOBAL_OPTIONS, "no-completion-script").unwrap();
        assert_eq!(option.key, "completion-script");
        assert!(negated);

        assert!(lookup_long(&GLOBAL_OPTIONS, "no-such").is_none());
        assert!(lookup_long(&GLOBAL_OPTIONS, "force").is_none());
    }

    #[test]
    fn test_lookup_short() {
        assert_eq!(lookup_short(&GLOBAL_OPTIONS, 'v').unwrap().key, "verbose");
        assert_eq!(lookup_short(&GLOBAL_OPTIONS, 'h').unwrap().key, "help");
        assert!(lookup_short(&GLOBAL_OPTIONS, 'V').is_none());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
