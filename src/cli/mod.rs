//! CLI module for threadline.
//!
//! - Argument parsing
//! - Version and usage output
//! - The interactive drawer shell
//!
//! ```ignore
//! use threadline::cli::{parse_args, run_cli_command, CliCommand};
//!
//! let command = parse_args(std::env::args());
//! if run_cli_command(&command) {
//!     return Ok(());
//! }
//! // otherwise start the shell
//! ```

pub mod args;
pub mod shell;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use shell::{parse_line, run_shell, ShellCommand};
pub use version::{usage, version_line, VERSION};

/// Handle commands that only print something.
///
/// Returns `true` if the command was handled and the process should exit.
pub fn run_cli_command(command: &CliCommand) -> bool {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            true
        }
        CliCommand::Help => {
            println!("{}", usage());
            true
        }
        CliCommand::Unknown(flag) => {
            eprintln!("threadline: unrecognized option '{}'\n", flag);
            eprintln!("{}", usage());
            true
        }
        CliCommand::RunShell => false,
    }
}
