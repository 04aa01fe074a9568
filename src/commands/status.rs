//! `gitseal status`: reports whether a master key is present, without
//! loading or validating its contents.

use std::path::Path;
use std::process::ExitCode;

use crate::keystore;

pub fn run(key_path: &Path) -> ExitCode {
    if keystore::exists(key_path) {
        println!("Master key present at {}", key_path.display());
    } else {
        println!("No master key at {} (run `gitseal init`)", key_path.display());
    }
    ExitCode::SUCCESS
}
