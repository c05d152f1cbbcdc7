use std::sync::Arc;

use color_eyre::Result;
use streamchat::adapters::{ReqwestHttpClient, TerminalRenderer};
use streamchat::cli::{parse_args, usage, CliCommand, RunOptions, VERSION};
use streamchat::config::ClientConfig;
use streamchat::session::SessionController;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let options = match parse_args(std::env::args()) {
        CliCommand::Version => {
            println!("streamchat {}", VERSION);
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", usage());
            return Ok(());
        }
        CliCommand::Invalid(message) => {
            eprintln!("Error: {}", message);
            eprintln!("{}", usage());
            std::process::exit(2);
        }
        CliCommand::Run(options) => options,
    };

    color_eyre::install()?;

    let config = load_config(options);
    init_tracing(&config);

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(config))
}

/// Defaults, then environment, then command-line flags.
fn load_config(options: RunOptions) -> ClientConfig {
    let config = ClientConfig::from_env();
    match options.endpoint {
        Some(endpoint) => config.with_endpoint(endpoint),
        None => config,
    }
}

/// Logs go to stderr so they never interleave with the conversation.
fn init_tracing(config: &ClientConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(streamchat::config::DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(config: ClientConfig) -> Result<()> {
    let client = Arc::new(ReqwestHttpClient::from_config(&config)?);
    let mut controller = SessionController::new(client, TerminalRenderer::stdout(), &config);
    info!(endpoint = %config.endpoint, "Chat session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    controller.submit(&line);
                }
                None => {
                    debug!("Input closed, waiting for the reply in flight");
                    controller.run_until_idle().await;
                    break;
                }
            },
            Some(update) = controller.next_update() => controller.apply_update(update),
            _ = tokio::signal::ctrl_c() => {
                controller.cancel();
                break;
            }
        }
    }

    controller.renderer().finish_line();
    info!("Chat session ended");
    Ok(())
}
