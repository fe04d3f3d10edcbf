//! Splits a raw argument vector into `--name [arg]*` invocations

use tracing::debug;

const FLAG_PREFIX: &str = "--";

/// One `--name [args]` segment of the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<String>,
}

impl Invocation {
    #[must_use]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }
}

/// Command name carried by a flag token, if `token` is one
///
/// A flag token starts with `--` and has at least one more character. The
/// name is the token with every leading dash stripped, so `---` is a flag
/// with an empty name, which never resolves. A bare `--` is an ordinary
/// argument.
#[must_use]
pub fn flag_name(token: &str) -> Option<&str> {
    if !token.starts_with(FLAG_PREFIX) || token.len() <= FLAG_PREFIX.len() {
        return None;
    }
    Some(token.trim_start_matches('-'))
}

/// Whether the argument vector asks for a command at all
///
/// True when the very first token is a flag token. Hosts use this to decide
/// between command mode and their normal startup.
#[must_use]
pub fn has_command<S: AsRef<str>>(args: &[S]) -> bool {
    args.first()
        .is_some_and(|first| flag_name(first.as_ref()).is_some())
}

/// Tokenize the argument vector into invocations, preserving order
///
/// Arguments that appear before the first flag token are discarded.
#[must_use]
pub fn tokenize<S: AsRef<str>>(args: &[S]) -> Vec<Invocation> {
    let mut invocations: Vec<Invocation> = Vec::new();

    for token in args {
        let token = token.as_ref();
        if let Some(name) = flag_name(token) {
            invocations.push(Invocation::new(name));
        } else if let Some(current) = invocations.last_mut() {
            current.args.push(token.to_owned());
        } else {
            debug!("Ignoring argument before the first command: {}", token);
        }
    }

    invocations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inv(name: &str, args: &[&str]) -> Invocation {
        Invocation {
            name: name.to_owned(),
            args: args.iter().map(|a| (*a).to_owned()).collect(),
        }
    }

    #[test]
    fn arguments_attach_to_the_preceding_command() {
        let parsed = tokenize(&["--a", "1", "2", "--b"]);
        assert_eq!(parsed, vec![inv("a", &["1", "2"]), inv("b", &[])]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let parsed = tokenize::<&str>(&[]);
        assert!(parsed.is_empty());
    }

    #[test]
    fn leading_bare_words_are_dropped() {
        let parsed = tokenize(&["stray", "words", "--seed", "10"]);
        assert_eq!(parsed, vec![inv("seed", &["10"])]);
    }

    #[test]
    fn bare_double_dash_is_an_argument() {
        let parsed = tokenize(&["--run", "--", "-v"]);
        assert_eq!(parsed, vec![inv("run", &["--", "-v"])]);
    }

    #[test]
    fn dashes_only_token_starts_a_nameless_invocation() {
        let parsed = tokenize(&["--a", "---", "x"]);
        assert_eq!(parsed, vec![inv("a", &[]), inv("", &["x"])]);
    }

    #[test]
    fn every_leading_dash_is_stripped() {
        let parsed = tokenize(&["----migrate"]);
        assert_eq!(parsed, vec![inv("migrate", &[])]);
    }

    #[test]
    fn repeated_commands_stay_separate() {
        let parsed = tokenize(&["--seed", "a", "--seed", "b"]);
        assert_eq!(parsed, vec![inv("seed", &["a"]), inv("seed", &["b"])]);
    }

    #[test]
    fn name_case_is_preserved() {
        let parsed = tokenize(&["--HELP"]);
        assert_eq!(parsed, vec![inv("HELP", &[])]);
    }

    #[test]
    fn has_command_looks_at_the_first_token_only() {
        assert!(has_command(&["--migrate"]));
        assert!(!has_command(&["serve", "--migrate"]));
        assert!(!has_command(&["--"]));
        assert!(has_command(&["---"]));
        assert!(!has_command::<String>(&[]));
    }
}
