// bizlink CLI - match two business directories from a .link.toml config

mod exit_codes;
mod link;

use std::process::ExitCode;

use clap::Parser;

use exit_codes::EXIT_SUCCESS;
use link::LinkCommands;

#[derive(Parser)]
#[command(name = "bizlink")]
#[command(about = "Entity resolution between two business directories")]
#[command(version, long_version = long_version())]
struct Cli {
    #[command(subcommand)]
    command: LinkCommands,
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("BIZLINK_COMMIT"), ")",
        "\nengine:  bizlink-linkage ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("BIZLINK_TARGET"),
    )
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let result = link::cmd_link(cli.command);

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
