use clap::Parser;
use cmdutil::cli::{Cli, Command};
use cmdutil::{confirm_stdio, exit_on_broken_pipe, failx, logging};
use cmdutil::{Config, ConfigOptions, ConfirmOptions, Exit, Messenger};
use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
#[error("something went wrong: {0}")]
struct StatError(#[source] io::Error);

fn demo_options() -> ConfigOptions {
    ConfigOptions {
        prog_name: Some("myprog".to_string()),
        usage_message: Some("Fetch or update the contents of a remote URL.".to_string()),
        synopses: Some(vec![
            "fetch  [-v] URL".to_string(),
            "upload [-v] URL FILENAME".to_string(),
        ]),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config, cmdutil::ConfigError> {
    let options = match path {
        Some(path) => Config::load(path)?,
        None => demo_options(),
    };
    Config::default().with(options)
}

async fn run(command: Command, messenger: &mut Messenger) -> Exit {
    match command {
        Command::Usage { warning } => {
            let result = match warning {
                Some(warning) => messenger.usage_with(warning),
                None => messenger.usage(),
            };
            result.unwrap_or_else(|e| failx!(messenger, "{}", e))
        }
        Command::Warn { message } => {
            if let Err(e) = messenger.warn(&message) {
                debug!(error = %e, "Failed to write warning");
            }
            Exit::SUCCESS
        }
        Command::Fail { status, message } => messenger.fail(status, &message),
        Command::Stat { path } => match std::fs::metadata(&path) {
            Ok(metadata) => {
                println!("{}: {} bytes", path.display(), metadata.len());
                Exit::SUCCESS
            }
            Err(e) => messenger.fail(None, StatError(e)),
        },
        Command::Confirm { message } => match confirm_stdio(&ConfirmOptions::new(message)).await {
            Ok(answer) => {
                let shown = if answer {
                    "true".green().bold()
                } else {
                    "false".red().bold()
                };
                eprintln!("result: {}", shown);
                if answer {
                    Exit::SUCCESS
                } else {
                    Exit::FAILURE
                }
            }
            Err(e) => messenger.fail(None, e),
        },
        Command::Yes { text } => {
            let mut out = exit_on_broken_pipe(io::stdout().lock());
            loop {
                if let Err(e) = writeln!(out, "{}", text) {
                    return messenger.fail(None, e);
                }
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init();

    let cli = Cli::parse();
    debug!(?cli, "Parsed CLI arguments");

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            Messenger::default().fail(None, e).exit();
        }
    };

    let mut messenger = Messenger::new(config);
    run(cli.command, &mut messenger).await.exit();
}
