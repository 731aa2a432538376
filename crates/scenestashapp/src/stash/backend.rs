use crate::error::Result;

/// Raw key-value slot I/O for the stash.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`super::StashStore`] handles the "what" (dedup, change notification, recovery).
pub trait StashBackend {
    /// Read the raw serialized value stored under `key`.
    /// Returns Ok(None) when nothing has been written yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

// A store can borrow its backend, so the caller keeps a handle on it.
impl<B: StashBackend + ?Sized> StashBackend for &B {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}
