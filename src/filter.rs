//! Clean/smudge filter entry points: read one stream to EOF, run it
//! through the engine, and return the output buffered in memory — nothing
//! is written to stdout until the whole transform has succeeded, so a
//! failed or interrupted invocation never leaves partial output on the
//! VCS's stdout pipe.

use std::io::{self, Read, Write};
use std::path::Path;

use crate::engine;
use crate::error::GitsealError;
use crate::keystore;

/// Runs `clean <path>`: stdin is plaintext, stdout is the wire-format v3
/// ciphertext blob.
pub fn clean(path: &[u8], key_path: &Path) -> Result<(), GitsealError> {
    if path.is_empty() {
        return Err(GitsealError::EmptyPath);
    }

    let master = keystore::load_master(key_path)?;
    let plaintext = read_stdin()?;
    let blob = engine::encrypt(&plaintext, &master, path)?;
    write_stdout(&blob)
}

/// Runs `smudge <path>`: stdin is a wire-format v3 ciphertext blob, stdout
/// is plaintext. The blob's version and minimum length are checked before
/// the master key is loaded from disk, so a malformed blob never costs a
/// key-file read.
pub fn smudge(path: &[u8], key_path: &Path) -> Result<(), GitsealError> {
    if path.is_empty() {
        return Err(GitsealError::EmptyPath);
    }

    let blob = read_stdin()?;
    engine::validate_blob_shape(&blob)?;

    let master = keystore::load_master(key_path)?;
    let plaintext = engine::decrypt(&blob, &master, path)?;
    write_stdout(&plaintext)
}

fn read_stdin() -> Result<Vec<u8>, GitsealError> {
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;
    Ok(buf)
}

fn write_stdout(bytes: &[u8]) -> Result<(), GitsealError> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine;
    use tempfile::tempdir;

    #[test]
    fn clean_then_decrypt_round_trips_through_the_engine() {
        let dir = tempdir().unwrap();
        let key_path = dir.path().join("master.key");
        keystore::init_master(&key_path).unwrap();
        let master = keystore::load_master(&key_path).unwrap();

        let blob = engine::encrypt(b"secret contents", &master, b"a.txt").unwrap();
        let plaintext = engine::decrypt(&blob, &master, b"a.txt").unwrap();
        assert_eq!(plaintext, b"secret contents");
    }

    #[test]
    fn clean_rejects_empty_path_before_touching_the_keystore() {
        let dir = tempdir().unwrap();
        let key_path = dir.path().join("nonexistent.key");
        let err = clean(b"", &key_path).unwrap_err();
        assert!(matches!(err, GitsealError::EmptyPath));
    }
}
