//! Command-line flags.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Version,
    Help,
    /// A flag the binary does not know; usage is printed instead of running.
    Unknown(String),
    /// No flags: start the interactive drawer shell.
    RunShell,
}

/// Map `argv` onto a command. The first recognized or unknown flag decides;
/// positional arguments are ignored.
///
/// ```
/// use threadline::cli::args::{parse_args, CliCommand};
///
/// let argv = ["threadline", "-V"].map(String::from);
/// assert_eq!(parse_args(argv.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    args.skip(1)
        .find(|arg| arg.starts_with('-'))
        .map(|flag| match flag.as_str() {
            "--version" | "-V" => CliCommand::Version,
            "--help" | "-h" => CliCommand::Help,
            _ => CliCommand::Unknown(flag),
        })
        .unwrap_or(CliCommand::RunShell)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_version_and_help_flags() {
        assert_eq!(parse(&["threadline", "--version"]), CliCommand::Version);
        assert_eq!(parse(&["threadline", "-V"]), CliCommand::Version);
        assert_eq!(parse(&["threadline", "--help"]), CliCommand::Help);
        assert_eq!(parse(&["threadline", "-h"]), CliCommand::Help);
    }

    #[test]
    fn test_no_flags_runs_shell() {
        assert_eq!(parse(&["threadline"]), CliCommand::RunShell);
        assert_eq!(parse(&["threadline", "positional"]), CliCommand::RunShell);
    }

    #[test]
    fn test_unknown_flag_is_reported() {
        assert_eq!(
            parse(&["threadline", "--verbose"]),
            CliCommand::Unknown("--verbose".to_string())
        );
    }
}
