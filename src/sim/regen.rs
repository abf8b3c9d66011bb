//! Staggered regeneration sequence
//!
//! After a full clear the popped bubbles come back one at a time. The
//! sequence only knows *which* bubble is next; the scheduler driving it
//! (see `tick`) decides *when*.

use serde::{Deserialize, Serialize};

/// Ordered snapshot of the bubbles to reveal, plus a cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regeneration {
    order: Vec<usize>,
    cursor: usize,
}

impl Regeneration {
    /// Start a sequence over `order` (bubble indices, reveal order)
    pub fn new(order: Vec<usize>) -> Self {
        Self { order, cursor: 0 }
    }

    /// Next bubble index to reveal, advancing the cursor
    pub fn next_index(&mut self) -> Option<usize> {
        let index = *self.order.get(self.cursor)?;
        self.cursor += 1;
        Some(index)
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.order.len()
    }

    /// Number of reveals still pending
    pub fn remaining(&self) -> usize {
        self.order.len().saturating_sub(self.cursor)
    }
}
