//! Argument dispatch
//!
//! Turns raw process arguments into an [`Invocation`] and hands it to exactly
//! one handler. Unknown options are dropped before clap sees them; unknown
//! command words are rejected. Nothing in here exits the process.

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::builder::styling::{AnsiColor, Styles};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use clap_complete::{Shell, generate};
use std::ffi::OsString;
use std::future::Future;

use super::schema::{self, GlobalOptions, OptionDescriptor};
use crate::error::DispatchError;

/// Id of the hidden positional collecting command words
const COMMAND_ARG: &str = "command";

/// A validated invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    /// Named command, or `None` for the default command
    pub command: Option<&'static str>,
    pub options: GlobalOptions,
}

/// How a single raw token is treated before clap parses it
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Positional,
    /// Known flag, possibly rewritten (`--verbose=false` -> `--no-verbose`)
    Known(Vec<String>),
    /// Unknown option; `known` keeps the recognised part of a short cluster
    Unknown {
        token: String,
        known: Vec<String>,
        takes_value: bool,
    },
}

/// Binds the option table to the registered commands
#[derive(Debug, Clone)]
pub struct Dispatcher {
    name: &'static str,
    about: &'static str,
    options: &'static [OptionDescriptor],
    commands: Vec<&'static str>,
    default_command: bool,
}

impl Dispatcher {
    pub fn new(
        name: &'static str,
        about: &'static str,
        options: &'static [OptionDescriptor],
    ) -> Self {
        Self {
            name,
            about,
            options,
            commands: Vec::new(),
            default_command: false,
        }
    }

    /// Register a named command
    pub fn command_name(mut self, name: &'static str) -> Self {
        self.commands.push(name);
        self
    }

    /// Run the default command when no command word is given
    pub fn with_default_command(mut self) -> Self {
        self.default_command = true;
        self
    }

    /// Build the clap command for the option table
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(self.name)
            .about(self.about)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .disable_help_subcommand(true)
            .styles(help_styles());

        if let Some((_, columns)) = console::Term::stdout().size_checked() {
            cmd = cmd.term_width(usize::from(columns));
        }

        for option in self.options {
            cmd = cmd.arg(flag_arg(option)).arg(negated_arg(option));
        }

        cmd.arg(
            Arg::new(COMMAND_ARG)
                .value_name("COMMAND")
                .num_args(0..)
                .action(ArgAction::Append)
                .allow_negative_numbers(true)
                .hide(true),
        )
    }

    /// Parse and validate raw arguments (the first element is the program name)
    pub fn parse<I, T>(&self, args: I) -> Result<Invocation, DispatchError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let (args, ignored) = self.partition_args(args.into_iter().map(Into::into).collect());
        if !ignored.is_empty() {
            tracing::debug!(?ignored, "ignoring unknown options");
        }

        let matches = self.command().try_get_matches_from(args)?;

        let mut options = GlobalOptions::default();
        for option in self.options {
            if !options.set(option.key, resolve_flag(&matches, option)) {
                tracing::debug!(key = option.key, "option has no field");
            }
        }

        let words: Vec<String> = matches
            .get_many::<String>(COMMAND_ARG)
            .map(|words| words.cloned().collect())
            .unwrap_or_default();
        let command = self.resolve_command(words)?;

        Ok(Invocation { command, options })
    }

    /// Parse the arguments and run `handler` with the result
    pub async fn dispatch<I, T, F, Fut, R>(&self, args: I, handler: F) -> Result<R>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
        F: FnOnce(Invocation) -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        let invocation = self.parse(args)?;
        tracing::debug!(?invocation, "dispatching");
        handler(invocation).await
    }

    /// Full help text, wrapped to the terminal width
    pub fn render_help(&self, color: bool) -> String {
        let help = self.command().render_help();
        if color {
            help.ansi().to_string()
        } else {
            help.to_string()
        }
    }

    /// Completion script for `shell`
    pub fn completion_script(&self, shell: Shell) -> Result<String> {
        let mut cmd = self.command();
        let mut script = Vec::new();
        generate(shell, &mut cmd, self.name, &mut script);
        String::from_utf8(script).context("Completion script is not valid UTF-8")
    }

    /// Split raw arguments into the ones clap should see and ignored unknown options
    pub fn partition_args(&self, args: Vec<OsString>) -> (Vec<OsString>, Vec<String>) {
        let mut kept = Vec::with_capacity(args.len());
        let mut ignored = Vec::new();
        let mut args = args.into_iter().peekable();
        kept.extend(args.next());

        while let Some(arg) = args.next() {
            let token = match arg.to_str() {
                Some("--") => {
                    kept.push(arg);
                    kept.extend(args.by_ref());
                    break;
                }
                Some(token) => self.classify(token),
                None => Token::Positional,
            };

            match token {
                Token::Positional => kept.push(arg),
                Token::Known(flags) => kept.extend(flags.into_iter().map(OsString::from)),
                Token::Unknown {
                    token,
                    known,
                    takes_value,
                } => {
                    ignored.push(token);
                    kept.extend(known.into_iter().map(OsString::from));
                    let value_follows = args
                        .peek()
                        .and_then(|next| next.to_str())
                        .is_some_and(|next| !next.starts_with('-'));
                    if takes_value && value_follows {
                        if let Some(value) = args.next() {
                            ignored.push(value.to_string_lossy().into_owned());
                        }
                    }
                }
            }
        }

        (kept, ignored)
    }

    fn classify(&self, token: &str) -> Token {
        if !token.starts_with('-') || token == "-" {
            return Token::Positional;
        }

        if let Some(long) = token.strip_prefix("--") {
            let (name, value) = match long.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (long, None),
            };
            return match schema::lookup_long(self.options, name) {
                Some((option, negated)) => match value.map(schema::parse_bool) {
                    None => Token::Known(vec![token.to_string()]),
                    Some(Some(enabled)) if enabled != negated => {
                        Token::Known(vec![format!("--{}", option.key)])
                    }
                    Some(Some(_)) => {
                        Token::Known(vec![format!("--{}", schema::negated_flag(option.key))])
                    }
                    // clap reports the bad value
                    Some(None) => Token::Known(vec![token.to_string()]),
                },
                None => Token::Unknown {
                    token: token.to_string(),
                    known: Vec::new(),
                    takes_value: value.is_none(),
                },
            };
        }

        let cluster = &token[1..];
        if is_number(cluster) {
            return Token::Positional;
        }
        let (aliases, value) = match cluster.split_once('=') {
            Some((aliases, value)) => (aliases, Some(value)),
            None => (cluster, None),
        };

        // `-hv=false`: the value belongs to the last alias only
        let count = aliases.chars().count();
        let mut plain = String::new();
        let mut valued = None;
        let mut any_unknown = aliases.is_empty();
        let mut last_unknown = false;
        for (index, alias) in aliases.chars().enumerate() {
            let last = index + 1 == count;
            match schema::lookup_short(self.options, alias) {
                None => {
                    any_unknown = true;
                    last_unknown = last;
                }
                Some(option) if last && value.is_some() => valued = Some(option),
                Some(_) => plain.push(alias),
            }
        }

        let mut flags = Vec::new();
        if !plain.is_empty() {
            flags.push(format!("-{plain}"));
        }
        if let (Some(option), Some(value)) = (valued, value) {
            flags.push(match schema::parse_bool(value) {
                Some(true) => format!("--{}", option.key),
                Some(false) => format!("--{}", schema::negated_flag(option.key)),
                // clap reports the bad value
                None => format!("--{}={value}", option.key),
            });
        }

        if any_unknown {
            Token::Unknown {
                token: token.to_string(),
                known: flags,
                takes_value: last_unknown && value.is_none(),
            }
        } else {
            Token::Known(flags)
        }
    }

    fn resolve_command(&self, words: Vec<String>) -> Result<Option<&'static str>, DispatchError> {
        let mut words = words.into_iter();
        match (words.next(), words.next()) {
            (None, _) if self.default_command => Ok(None),
            (None, _) => Err(DispatchError::CommandRequired),
            (Some(_), Some(_)) => Err(DispatchError::TooManyCommands),
            (Some(word), None) => self
                .commands
                .iter()
                .find(|name| **name == word)
                .map(|name| Some(*name))
                .ok_or(DispatchError::UnknownCommand(word)),
        }
    }
}

/// `1`, `2.5`: numbers stay positional, never option clusters
fn is_number(text: &str) -> bool {
    text.chars().any(|ch| ch.is_ascii_digit())
        && text.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
        && text.parse::<f64>().is_ok()
}

fn flag_arg(option: &OptionDescriptor) -> Arg {
    let mut arg = Arg::new(option.key)
        .long(option.key)
        .help(option.help)
        .help_heading(option.group)
        .global(option.global)
        .env(schema::env_var(option.key))
        .action(ArgAction::SetTrue)
        .value_parser(BoolishValueParser::new())
        .overrides_with(schema::negated_flag(option.key));
    if let Some(short) = option.short {
        arg = arg.short(short);
    }
    arg
}

fn negated_arg(option: &OptionDescriptor) -> Arg {
    let negated = schema::negated_flag(option.key);
    Arg::new(negated.clone())
        .long(negated)
        .help(format!("Negate --{}", option.key))
        .help_heading(option.group)
        .global(option.global)
        .action(ArgAction::SetTrue)
        .overrides_with(option.key)
        .hide(true)
}

/// Command line beats the environment, which beats the default.
fn resolve_flag(matches: &ArgMatches, option: &OptionDescriptor) -> bool {
    let negated = schema::negated_flag(option.key);
    match (
        matches.value_source(option.key),
        matches.value_source(&negated),
    ) {
        (Some(ValueSource::CommandLine), _) => matches.get_flag(option.key),
        (_, Some(ValueSource::CommandLine)) => false,
        (Some(ValueSource::EnvVariable), _) => matches.get_flag(option.key),
        _ => option.default,
    }
}

fn help_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Blue.on_default().bold())
        .usage(AnsiColor::Magenta.on_default().bold())
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::BrightBlack.on_default())
        .error(AnsiColor::Red.on_default().bold())
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Yellow.on_default())
}
