mod app;
mod cli;
mod cipher;
mod commands;
mod config;
mod engine;
mod error;
mod exit_codes;
mod filter;
mod keystore;

use std::process::ExitCode;

fn main() -> ExitCode {
    app::run()
}
