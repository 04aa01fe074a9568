use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "gitseal",
    author,
    version,
    about = "Transparent authenticated encryption for files tracked in a content-addressed VCS.",
    long_about = "Deterministic six-layer authenticated encryption exposed as clean/smudge \
stream filters: the VCS pipes a staged file's bytes through `clean` to get ciphertext and \
through `smudge` to get plaintext back. Wiring this binary into `.gitattributes` and the \
VCS's filter config is the caller's responsibility; this crate only implements the transform."
)]
pub struct Cli {
    /// Path to the master key file. Defaults to $GITSEAL_KEY, then the
    /// platform config directory.
    #[arg(long, global = true, value_name = "FILE")]
    pub key_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Encrypt stdin (plaintext) to stdout (ciphertext blob). Called by the
    /// VCS as the `clean` filter for a staged path.
    Clean(PathArgs),

    /// Decrypt stdin (ciphertext blob) to stdout (plaintext). Called by the
    /// VCS as the `smudge` filter when materializing a path.
    Smudge(PathArgs),

    /// Generate and persist a new master key, refusing to overwrite one
    /// that already exists.
    Init,

    /// Report whether a master key is present at the resolved key path.
    Status,
}

#[derive(Debug, Args)]
pub struct PathArgs {
    /// The file path to bind as associated data, exactly as the VCS passes
    /// it. Must be non-empty. Taken as raw OS bytes rather than `String` so
    /// a non-UTF-8 path is not rejected before the filter ever runs.
    pub path: OsString,
}
