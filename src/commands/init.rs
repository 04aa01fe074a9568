//! `gitseal init`: the ambient key-lifecycle command wrapping
//! `keystore::init_master` to generate and persist a master key.

use std::path::Path;
use std::process::ExitCode;

use crate::keystore;

pub fn run(key_path: &Path) -> ExitCode {
    match keystore::init_master(key_path) {
        Ok(()) => {
            println!("Initialized master key at {}", key_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => super::report(&err.into()),
    }
}
