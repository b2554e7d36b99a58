use super::backend::StorageBackend;
use crate::error::{AideError, Result};
use std::cell::RefCell;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since aide is single-threaded,
/// which lets the `StorageBackend` trait take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    image: RefCell<Option<Vec<u8>>>,
    quarantined: RefCell<Vec<Vec<u8>>>,
    writes: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
    simulate_read_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing image, as if a previous run had saved it.
    pub fn with_image(image: impl Into<Vec<u8>>) -> Self {
        let backend = Self::default();
        *backend.image.borrow_mut() = Some(image.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Enable read error simulation, as for a file that exists but can't be opened.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    pub fn image(&self) -> Option<Vec<u8>> {
        self.image.borrow().clone()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }

    pub fn quarantined(&self) -> Vec<Vec<u8>> {
        self.quarantined.borrow().clone()
    }
}

impl StorageBackend for MemBackend {
    fn read_image(&self) -> Result<Option<Vec<u8>>> {
        if *self.simulate_read_error.borrow() {
            return Err(AideError::Io(std::io::Error::other("Simulated read error")));
        }
        Ok(self.image.borrow().clone())
    }

    fn write_image(&self, image: &[u8]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(AideError::Io(std::io::Error::other("Simulated write error")));
        }
        *self.image.borrow_mut() = Some(image.to_vec());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn quarantine_image(&self) -> Result<Option<PathBuf>> {
        match self.image.borrow_mut().take() {
            Some(bytes) => {
                self.quarantined.borrow_mut().push(bytes);
                Ok(Some(PathBuf::from("memory://store.corrupt")))
            }
            None => Ok(None),
        }
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://store")
    }
}
