//! `gitseal clean`/`gitseal smudge`: the CLI-facing half of the C7 filter.

use std::ffi::OsStr;
use std::path::Path;
use std::process::ExitCode;

use crate::cli::PathArgs;
use crate::filter;

pub fn clean(args: &PathArgs, key_path: &Path) -> ExitCode {
    match filter::clean(&path_bytes(&args.path), key_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => super::report(&err),
    }
}

pub fn smudge(args: &PathArgs, key_path: &Path) -> ExitCode {
    match filter::smudge(&path_bytes(&args.path), key_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => super::report(&err),
    }
}

/// Exposes the path argument's raw bytes, so a non-UTF-8 Unix path is
/// bound to the cascade exactly as the VCS passed it rather than rejected
/// at argument parsing.
#[cfg(unix)]
fn path_bytes(path: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn path_bytes(path: &OsStr) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}
