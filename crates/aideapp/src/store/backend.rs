use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O of one store image.
///
/// This trait handles the "how" (filesystem vs memory), while
/// [`Store`](super::Store) handles the "what": keys, records, encoding.
pub trait StorageBackend {
    /// Read the full stored image.
    /// Returns Ok(None) when nothing has been stored yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read_image(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the stored image in full.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write_image(&self, image: &[u8]) -> Result<()>;

    /// Move an unreadable image out of the way so the next write does not
    /// destroy it. Returns where it was moved, if anything was there.
    fn quarantine_image(&self) -> Result<Option<PathBuf>>;

    /// Where the image lives. A real path for files, a virtual one otherwise.
    fn location(&self) -> PathBuf;
}
