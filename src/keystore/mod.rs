//! Key storage port: load, check for, and persist the 32-octet
//! master secret. Persistence format and directory layout are this
//! adapter's concern; the core only ever requires that loaded material is
//! exactly 32 octets and that the file is not readable by anyone but its
//! owner.
//!
//! Concurrent filter invocations only ever read the key file, so
//! `load_master` takes a shared advisory lock; `init_master` takes an
//! exclusive one so two concurrent `gitseal init` runs can't interleave
//! their writes. The lock itself is ordinary file-locking plumbing, not
//! cryptographic material, so it lives next to the bytes it protects.

mod lock;

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use rand::RngCore;
use rand::rngs::OsRng;
use secrecy::SecretSlice;
use thiserror::Error;
use zeroize::Zeroize;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use lock::{KeyFileLock, LockMode};

pub const MASTER_SECRET_LEN: usize = 32;

/// The long-lived master secret, zeroized on drop.
pub type MasterSecret = SecretSlice<u8>;

#[derive(Debug, Error)]
pub enum KeyStoreError {
    #[error("master key file not found at {0}")]
    NotFound(String),

    #[error("master key file has an invalid length (expected {MASTER_SECRET_LEN} octets)")]
    InvalidLength,

    #[error("master key file permissions are broader than owner-only")]
    PermissionsTooOpen,

    #[error("master key already exists at {0}")]
    AlreadyExists(String),

    #[error("key file has no parent directory")]
    NoParentDir,

    #[error("failed to acquire a lock on the key file")]
    LockFailed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<lock::LockError> for KeyStoreError {
    fn from(err: lock::LockError) -> Self {
        match err {
            lock::LockError::Io(err) => KeyStoreError::Io(err),
            lock::LockError::NoParentDir => KeyStoreError::NoParentDir,
            lock::LockError::LockFailed | lock::LockError::UnsupportedPlatform => {
                KeyStoreError::LockFailed
            }
        }
    }
}

/// `true` if a master key file is present at `path` (does not validate its
/// contents or permissions).
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Loads the master secret, rejecting a length other than 32 octets and
/// (on unix) any file mode broader than owner read/write.
pub fn load_master(path: &Path) -> Result<MasterSecret, KeyStoreError> {
    let _lock = KeyFileLock::acquire(&lock_path(path), LockMode::Shared)?;

    let mut file = File::open(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            KeyStoreError::NotFound(path.display().to_string())
        } else {
            KeyStoreError::Io(err)
        }
    })?;

    check_permissions(&file)?;

    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;

    if buf.len() != MASTER_SECRET_LEN {
        buf.zeroize();
        return Err(KeyStoreError::InvalidLength);
    }

    Ok(MasterSecret::from(buf))
}

/// Generates a fresh 32-octet master secret and persists it at `path` with
/// owner-only permissions, refusing to overwrite an existing key file.
pub fn init_master(path: &Path) -> Result<(), KeyStoreError> {
    let _lock = KeyFileLock::acquire(&lock_path(path), LockMode::Exclusive)?;

    if path.exists() {
        return Err(KeyStoreError::AlreadyExists(path.display().to_string()));
    }

    let mut secret = [0u8; MASTER_SECRET_LEN];
    OsRng.fill_bytes(&mut secret);
    let result = persist_atomic(path, &secret);
    secret.zeroize();
    result
}

fn persist_atomic(path: &Path, bytes: &[u8]) -> Result<(), KeyStoreError> {
    let parent = path.parent().ok_or(KeyStoreError::NoParentDir)?;
    fs::create_dir_all(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.as_file_mut().write_all(bytes)?;
    temp.as_file_mut().sync_all()?;

    #[cfg(unix)]
    temp.as_file()
        .set_permissions(fs::Permissions::from_mode(0o600))?;

    temp.persist(path).map_err(|err| err.error)?;

    #[cfg(unix)]
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;

    fsync_dir(parent)?;

    Ok(())
}

/// Fsyncs the directory entry itself so the rename in `persist_atomic`
/// survives a crash: without this, a power loss right after the rename
/// can leave the directory pointing at the old (missing) inode on common
/// Linux filesystems.
#[cfg(unix)]
fn fsync_dir(dir: &Path) -> Result<(), KeyStoreError> {
    File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn fsync_dir(_dir: &Path) -> Result<(), KeyStoreError> {
    Ok(())
}

#[cfg(unix)]
fn check_permissions(file: &File) -> Result<(), KeyStoreError> {
    let mode = file.metadata()?.permissions().mode() & 0o777;
    if mode & 0o077 != 0 {
        return Err(KeyStoreError::PermissionsTooOpen);
    }
    Ok(())
}

#[cfg(not(unix))]
fn check_permissions(_file: &File) -> Result<(), KeyStoreError> {
    Ok(())
}

fn lock_path(key_path: &Path) -> PathBuf {
    let mut p = key_path.as_os_str().to_os_string();
    p.push(".lock");
    PathBuf::from(p)
}

/// Default key-file path: `<config dir>/gitseal/master.key`. Overridable by
/// the `GITSEAL_KEY` env var or `--key-file`, both resolved in `config.rs`.
pub fn default_key_path() -> Option<PathBuf> {
    let mut dir = dirs::config_dir()?;
    dir.push("gitseal");
    dir.push("master.key");
    Some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use tempfile::tempdir;

    #[test]
    fn init_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sub").join("master.key");

        init_master(&path).unwrap();
        let loaded = load_master(&path).unwrap();
        assert_eq!(loaded.expose_secret().len(), MASTER_SECRET_LEN);
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("master.key");
        init_master(&path).unwrap();
        let err = init_master(&path).unwrap_err();
        assert!(matches!(err, KeyStoreError::AlreadyExists(_)));
    }

    #[test]
    fn load_rejects_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.key");
        let err = load_master(&path).unwrap_err();
        assert!(matches!(err, KeyStoreError::NotFound(_)));
    }

    #[test]
    fn load_rejects_wrong_length() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("master.key");
        fs::write(&path, [0u8; 16]).unwrap();
        #[cfg(unix)]
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();
        let err = load_master(&path).unwrap_err();
        assert!(matches!(err, KeyStoreError::InvalidLength));
    }

    #[cfg(unix)]
    #[test]
    fn load_rejects_group_readable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("master.key");
        fs::write(&path, [0u8; MASTER_SECRET_LEN]).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();
        let err = load_master(&path).unwrap_err();
        assert!(matches!(err, KeyStoreError::PermissionsTooOpen));
    }

    #[test]
    fn two_generated_masters_are_distinct() {
        let dir = tempdir().unwrap();
        let a_path = dir.path().join("a.key");
        let b_path = dir.path().join("b.key");
        init_master(&a_path).unwrap();
        init_master(&b_path).unwrap();

        let a = load_master(&a_path).unwrap();
        let b = load_master(&b_path).unwrap();
        assert_ne!(a.expose_secret(), b.expose_secret());
    }

    #[test]
    fn concurrent_readers_do_not_block_each_other() {
        use std::sync::Arc;
        use std::thread;

        let dir = tempdir().unwrap();
        let path = Arc::new(dir.path().join("master.key"));
        init_master(&path).unwrap();

        let readers: Vec<_> = (0..8)
            .map(|_| {
                let path = Arc::clone(&path);
                thread::spawn(move || load_master(&path).unwrap())
            })
            .collect();

        for r in readers {
            r.join().unwrap();
        }
    }
}
