use folio::cli::{handle_version_command, parse_args, run_command, CliCommand, USAGE};
use folio::logging::init_logging;
use folio::{ApiClient, ClientConfig};

use color_eyre::Result;
use std::sync::Arc;
use tracing::debug;

fn main() -> Result<()> {
    let args = parse_args(std::env::args());

    // Handle flags that need no client before any initialization
    match args.command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Invalid(ref reason) => {
            eprintln!("Error: {}\n\n{}", reason, USAGE);
            std::process::exit(2);
        }
        _ => {}
    }

    color_eyre::install()?;

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("Warning: logging unavailable: {}", e);
    }

    let config = ClientConfig::from_env()?;
    debug!(base_url = %config.base_url, "starting");
    let client = Arc::new(ApiClient::from_config(config)?);

    let runtime = tokio::runtime::Runtime::new()?;
    if let Err(err) = runtime.block_on(run_command(args.command, client)) {
        debug!(code = err.error_code(), error = %err, "command failed");
        eprintln!("Error: {}", err.user_message());
        eprintln!("{}", err.category().recovery_hint());
        std::process::exit(1);
    }

    Ok(())
}
