//! Host capability for reading user-picked content.

use std::collections::HashSet;
use std::fs::File;
use std::io::{ErrorKind, Read};

use parking_lot::Mutex;

use super::error::DecodeError;
use super::reference::ContentLocator;

/// Access to content the user picked through the host.
///
/// Callers must take read permission before opening a stream.
pub trait ContentProvider: Send + Sync {
    /// Ask the host to keep read access to `locator`. Idempotent.
    fn take_persistable_permission(&self, locator: &ContentLocator) -> Result<(), DecodeError>;

    /// Open a byte stream for `locator`.
    fn open(&self, locator: &ContentLocator) -> Result<Box<dyn Read + Send>, DecodeError>;
}

/// Content provider backed by the local file system.
///
/// Locators are bare paths or `file://` URIs. Grants are never revoked and
/// live as long as the provider; each controller builds its own provider,
/// so the set is bounded by what one screen's user picked.
#[derive(Default)]
pub struct FsContentProvider {
    granted: Mutex<HashSet<ContentLocator>>,
}

impl FsContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether read permission has been taken for `locator`.
    pub fn is_granted(&self, locator: &ContentLocator) -> bool {
        self.granted.lock().contains(locator)
    }
}

fn io_error(locator: &ContentLocator, err: std::io::Error) -> DecodeError {
    match err.kind() {
        ErrorKind::PermissionDenied => DecodeError::PermissionDenied {
            locator: locator.to_string(),
            reason: err.to_string(),
        },
        _ => DecodeError::Unreadable {
            locator: locator.to_string(),
            reason: err.to_string(),
        },
    }
}

impl ContentProvider for FsContentProvider {
    fn take_persistable_permission(&self, locator: &ContentLocator) -> Result<(), DecodeError> {
        let mut granted = self.granted.lock();
        if granted.contains(locator) {
            return Ok(());
        }

        let metadata = std::fs::metadata(locator.to_path()).map_err(|e| io_error(locator, e))?;
        if !metadata.is_file() {
            return Err(DecodeError::Unreadable {
                locator: locator.to_string(),
                reason: "not a regular file".to_string(),
            });
        }

        granted.insert(locator.clone());
        tracing::debug!(locator = %locator, "Read permission granted");
        Ok(())
    }

    fn open(&self, locator: &ContentLocator) -> Result<Box<dyn Read + Send>, DecodeError> {
        if !self.is_granted(locator) {
            return Err(DecodeError::PermissionDenied {
                locator: locator.to_string(),
                reason: "read permission was not taken".to_string(),
            });
        }

        let file = File::open(locator.to_path()).map_err(|e| io_error(locator, e))?;
        Ok(Box::new(file))
    }
}
