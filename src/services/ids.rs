//! Identifier generation for layouts and widgets.
//!
//! The store takes its id source as an injected capability so tests can use
//! deterministic sequences.

use uuid::Uuid;

/// Source of unique identifiers. Generation is assumed collision-free.
pub trait IdGenerator {
    /// Produce the next identifier.
    fn next_id(&mut self) -> String;
}

/// Random UUID v4 identifiers. The production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-N` identifiers for tests.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
