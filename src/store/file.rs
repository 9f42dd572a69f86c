//! File helpers for keys and artifacts.
//!
//! Artifacts and public keys are written through a temp file in the target
//! directory and renamed into place, so a failed issuance never leaves a
//! partial file behind. Private keys are created exclusively with owner-only
//! permissions.

use crate::crypto::keys::KeyPairPem;
use crate::LicsealError;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Conventional file name for a generated private key.
pub const PRIVATE_KEY_FILE: &str = "private_key.pem";

/// Conventional file name for a generated public key.
pub const PUBLIC_KEY_FILE: &str = "public_key.pem";

/// Read a PEM key file.
pub fn read_key_pem(path: &Path) -> Result<String, LicsealError> {
    fs::read_to_string(path).map_err(|e| {
        LicsealError::KeyRead(format!("Failed to read key {}: {}", path.display(), e))
    })
}

/// Read artifact bytes.
pub fn read_artifact(path: &Path) -> Result<Vec<u8>, LicsealError> {
    fs::read(path).map_err(|e| {
        LicsealError::Io(format!("Failed to read license {}: {}", path.display(), e))
    })
}

fn temp_path_for(path: &Path) -> Result<PathBuf, LicsealError> {
    let file_name = path.file_name().ok_or_else(|| {
        LicsealError::Io(format!("Not a file path: {}", path.display()))
    })?;
    let mut temp_name = file_name.to_os_string();
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

/// Write bytes atomically.
///
/// Uses temp file + rename for atomic write.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), LicsealError> {
    let temp_path = temp_path_for(path)?;

    // Write to temp file
    if let Err(e) = fs::write(&temp_path, bytes) {
        let _ = fs::remove_file(&temp_path);
        return Err(LicsealError::Io(format!(
            "Failed to write temp file {}: {}",
            temp_path.display(),
            e
        )));
    }

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        LicsealError::Io(format!("Failed to rename into {}: {}", path.display(), e))
    })
}

/// Write an issued artifact.
pub fn write_artifact(path: &Path, artifact: &[u8]) -> Result<(), LicsealError> {
    write_atomic(path, artifact)
}

/// Create a new file readable only by its owner. Fails if `path` exists.
fn create_private_file(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

fn write_private_key(path: &Path, pem: &str) -> Result<(), LicsealError> {
    let mut file = create_private_file(path).map_err(|e| {
        if e.kind() == ErrorKind::AlreadyExists {
            LicsealError::Io(format!("Refusing to overwrite existing key {}", path.display()))
        } else {
            LicsealError::Io(format!("Failed to create {}: {}", path.display(), e))
        }
    })?;

    if let Err(e) = file.write_all(pem.as_bytes()).and_then(|()| file.sync_all()) {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(LicsealError::Io(format!(
            "Failed to write {}: {}",
            path.display(),
            e
        )));
    }
    Ok(())
}

/// Write a key pair as `private_key.pem` / `public_key.pem` under `dir`.
///
/// Returns the two paths written. The private key is created with
/// `create_new` and mode `0o600` on unix, so an existing key is never
/// replaced. If the public key cannot be written the private key is removed
/// again and the call can be retried.
pub fn write_keypair(dir: &Path, pair: &KeyPairPem) -> Result<(PathBuf, PathBuf), LicsealError> {
    fs::create_dir_all(dir).map_err(|e| {
        LicsealError::Io(format!("Failed to create {}: {}", dir.display(), e))
    })?;

    let private_path = dir.join(PRIVATE_KEY_FILE);
    let public_path = dir.join(PUBLIC_KEY_FILE);

    write_private_key(&private_path, &pair.private_pem)?;

    if let Err(e) = write_atomic(&public_path, pair.public_pem.as_bytes()) {
        let _ = fs::remove_file(&private_path);
        return Err(e);
    }

    Ok((private_path, public_path))
}
