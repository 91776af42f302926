use std::sync::Arc;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing::info;

use threadline::adapters::{HttpConversationStore, ReqwestHttpClient, StaticSession};
use threadline::cli::{parse_args, CliCommand, run_cli_command, run_shell, version_line};
use threadline::config::DrawerConfig;
use threadline::drawer::Drawer;
use threadline::error::{ErrorContext, ResultExt};
use threadline::logging::init_logging;

fn main() -> Result<()> {
    // Print-only flags run before any initialization
    let command = parse_args(std::env::args());
    if run_cli_command(&command) {
        if let CliCommand::Unknown(_) = command {
            std::process::exit(2);
        }
        return Ok(());
    }

    color_eyre::install()?;
    if let Some(path) = init_logging()
        .context(ErrorContext::new("init_logging"))
        .map_err(|e| eyre!("{}", e))?
    {
        eprintln!("Logging to {}", path.display());
    }

    let config = DrawerConfig::from_env()
        .and_then(|config| config.validate().map(|_| config))
        .context(ErrorContext::new("load_config"))
        .map_err(|e| eyre!("{}", e))?;
    info!(base_url = %config.base_url, user_id = %config.user_id, "{}", version_line());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let client = ReqwestHttpClient::with_timeout(config.request_timeout)
            .map_err(|e| eyre!("failed to build HTTP client: {}", e))?;
        let remote = Arc::new(HttpConversationStore::new(client, &config));
        let session = Arc::new(StaticSession::new(config.user_id.clone()));

        let drawer = Drawer::new(remote, session).with_request_timeout(config.request_timeout);
        run_shell(drawer).await
    })
}
