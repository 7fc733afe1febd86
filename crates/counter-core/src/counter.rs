//! In-memory click count

/// Number of clicks since the page loaded or since the last reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    value: u64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value
    pub fn get(&self) -> u64 {
        self.value
    }

    /// Add one and return the new value
    pub fn increment(&mut self) -> u64 {
        self.value += 1;
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }
}
