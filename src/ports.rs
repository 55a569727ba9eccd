//! Port traits — the boundary between the console/config core and the
//! outside world.
//!
//! ```text
//!   Adapter (NVS / flash driver / test double) ──▶ FlashPort ──▶ core
//! ```
//!
//! The actual non-volatile write machinery (flash programming, wear
//! leveling, checksumming) lives behind [`FlashPort`]. The core only hands
//! it the opaque configuration image and interprets the typed result; it
//! never sees sectors, pages or erase cycles.

use core::fmt;

/// Persistent storage for the configuration image.
///
/// Implementations must make `write` atomic: a power loss mid-write must
/// leave either the previous image or the new one, never a torn blob. Any
/// integrity scheme (checksum, double-banking) is the implementation's
/// concern; a blob that fails it is reported as [`StorageError::IoError`]
/// or surfaces at the next `read` as a wrong-sized image.
pub trait FlashPort {
    /// Read the stored image into `buf`. Returns the number of bytes read,
    /// or [`StorageError::NotFound`] when nothing has ever been written.
    fn read(&self, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Persist `image` as one opaque blob, replacing any previous image.
    fn write(&mut self, image: &[u8]) -> Result<(), StorageError>;
}

/// Errors from [`FlashPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// No image has been stored yet (first boot).
    NotFound,
    /// Storage partition is full.
    Full,
    /// Generic I/O error from the storage backend.
    IoError,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "no stored image"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
