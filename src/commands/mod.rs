mod filter_commands;
mod init;
mod status;

use std::process::ExitCode;

use crate::cli;
use crate::config::{self, ConfigError};
use crate::exit_codes::{self, EXIT_USAGE};

pub fn dispatch(cli: cli::Cli) -> ExitCode {
    let key_path = match config::resolve_key_path(cli.key_file) {
        Ok(path) => path,
        Err(ConfigError::KeyDirUnavailable) => {
            eprintln!("Error: {}", ConfigError::KeyDirUnavailable);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match cli.command {
        cli::Commands::Clean(args) => filter_commands::clean(&args, &key_path),
        cli::Commands::Smudge(args) => filter_commands::smudge(&args, &key_path),
        cli::Commands::Init => init::run(&key_path),
        cli::Commands::Status => status::run(&key_path),
    }
}

pub(crate) fn report(error: &crate::error::GitsealError) -> ExitCode {
    eprintln!("Error: {error}");
    exit_codes::exit_code_for(error)
}
