use super::backend::StashBackend;
use crate::error::{Result, SceneError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the stash is single-threaded.
/// Every write is counted so tests can assert "exactly one write per mutation".
#[derive(Default)]
pub struct MemBackend {
    slots: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    simulate_read_error: Cell<bool>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with a raw value, bypassing the write counter.
    pub fn with_value(self, key: &str, raw: &str) -> Self {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
        self
    }

    /// Enable read error simulation for testing load failures.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Raw value currently stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl StashBackend for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(SceneError::Store("Simulated read error".to_string()));
        }
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(SceneError::Store("Simulated write error".to_string()));
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
