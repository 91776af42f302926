//! Tracing subscriber setup for the binary.
//!
//! Filtering follows `RUST_LOG` and defaults to `threadline=info`. Output goes
//! to stderr unless `THREADLINE_LOG_FILE` is set; an empty value selects the
//! default file under the user's local data directory.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::{DrawerError, DrawerResult};

pub const ENV_LOG_FILE: &str = "THREADLINE_LOG_FILE";
pub const DEFAULT_FILTER: &str = "threadline=info";

/// `<local data dir>/threadline/threadline.log`
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("threadline").join("threadline.log"))
}

/// Where logs should go according to the environment; `None` means stderr.
pub fn log_file_from_env() -> Option<PathBuf> {
    match std::env::var(ENV_LOG_FILE) {
        Ok(value) if value.trim().is_empty() => default_log_path(),
        Ok(value) => Some(PathBuf::from(value.trim())),
        Err(_) => None,
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Returns the log file in use, if any.
pub fn init_logging() -> DrawerResult<Option<PathBuf>> {
    let registry = tracing_subscriber::registry();

    match log_file_from_env() {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    DrawerError::Config(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| DrawerError::Config(format!("cannot open {}: {}", path.display(), e)))?;

            let file_layer = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_filter(env_filter());
            registry.with(file_layer).init();
            Ok(Some(path))
        }
        None => {
            let stderr_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(env_filter());
            registry.with(stderr_layer).init();
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_log_file_from_env() {
        std::env::remove_var(ENV_LOG_FILE);
        assert_eq!(log_file_from_env(), None);

        std::env::set_var(ENV_LOG_FILE, "/tmp/threadline-test.log");
        assert_eq!(
            log_file_from_env(),
            Some(PathBuf::from("/tmp/threadline-test.log"))
        );

        std::env::set_var(ENV_LOG_FILE, "");
        assert_eq!(log_file_from_env(), default_log_path());

        std::env::remove_var(ENV_LOG_FILE);
    }

    #[test]
    fn test_default_log_path_file_name() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("threadline/threadline.log"));
        }
    }
}
