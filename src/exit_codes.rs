//! Stable process exit codes, one per error kind in `error.rs`. The
//! numeric mapping is an implementation choice but is fixed within this
//! crate's releases.

use std::process::ExitCode;

use crate::error::GitsealError;

pub const EXIT_SOFTWARE: u8 = 1;
pub const EXIT_IO: u8 = 2;
pub const EXIT_AUTH_FAILURE: u8 = 3;
pub const EXIT_MALFORMED_BLOB: u8 = 4;
pub const EXIT_KEY_UNAVAILABLE: u8 = 5;
pub const EXIT_USAGE: u8 = 64;

pub fn exit_code_for(error: &GitsealError) -> ExitCode {
    use GitsealError::*;

    match error {
        AuthenticationFailure => ExitCode::from(EXIT_AUTH_FAILURE),
        MalformedBlob(_) => ExitCode::from(EXIT_MALFORMED_BLOB),
        KeyUnavailable(_) => ExitCode::from(EXIT_KEY_UNAVAILABLE),
        EmptyPath => ExitCode::from(EXIT_USAGE),
        Io(_) => ExitCode::from(EXIT_IO),
        InternalCryptoError => ExitCode::from(EXIT_SOFTWARE),
    }
}
