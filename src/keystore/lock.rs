//! Advisory file locking for the key file: a sibling `.lock` file held
//! with `flock(2)` for the duration of a read or write, shared for reads
//! and exclusive for writes.

use std::fs::{File, OpenOptions};
use std::path::Path;

use thiserror::Error;

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
#[cfg(unix)]
use std::os::unix::io::AsRawFd;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

#[derive(Debug, Error)]
pub enum LockError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("unsupported platform for file locking")]
    UnsupportedPlatform,

    #[error("failed to acquire file lock")]
    LockFailed,

    #[error("key path has no parent directory")]
    NoParentDir,
}

pub struct KeyFileLock {
    #[allow(dead_code)]
    file: File,
}

impl KeyFileLock {
    pub fn acquire(lock_path: &Path, mode: LockMode) -> Result<Self, LockError> {
        let parent = lock_path.parent().ok_or(LockError::NoParentDir)?;
        std::fs::create_dir_all(parent)?;

        #[cfg(unix)]
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .mode(0o600)
            .open(lock_path)?;

        #[cfg(not(unix))]
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(lock_path)?;

        #[cfg(unix)]
        std::fs::set_permissions(lock_path, std::fs::Permissions::from_mode(0o600))?;

        lock_file(&file, mode)?;
        Ok(Self { file })
    }
}

#[cfg(unix)]
fn lock_file(file: &File, mode: LockMode) -> Result<(), LockError> {
    let op = match mode {
        LockMode::Shared => libc::LOCK_SH,
        LockMode::Exclusive => libc::LOCK_EX,
    };

    let rc = unsafe { libc::flock(file.as_raw_fd(), op) };
    if rc == 0 {
        Ok(())
    } else {
        Err(LockError::LockFailed)
    }
}

#[cfg(not(unix))]
fn lock_file(_file: &File, _mode: LockMode) -> Result<(), LockError> {
    Err(LockError::UnsupportedPlatform)
}
