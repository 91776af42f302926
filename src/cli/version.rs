//! Version and usage output.

use crate::config::{ENV_API_URL, ENV_TIMEOUT_SECS, ENV_TOKEN, ENV_USER_ID};
use crate::logging::ENV_LOG_FILE;

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_line() -> String {
    format!("threadline {}", VERSION)
}

pub fn usage() -> String {
    format!(
        "{}\n\n\
         Usage: threadline [--version | --help]\n\n\
         Environment:\n  \
         {:<26}conversation service base URL\n  \
         {:<26}bearer token\n  \
         {:<26}signed-in user id (required)\n  \
         {:<26}request timeout in seconds\n  \
         {:<26}write logs to a file instead of stderr\n",
        version_line(),
        ENV_API_URL,
        ENV_TOKEN,
        ENV_USER_ID,
        ENV_TIMEOUT_SECS,
        ENV_LOG_FILE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
        assert!(version_line().starts_with("threadline "));
    }

    #[test]
    fn test_usage_lists_environment() {
        let text = usage();
        assert!(text.contains(ENV_USER_ID));
        assert!(text.contains(ENV_LOG_FILE));
    }
}
