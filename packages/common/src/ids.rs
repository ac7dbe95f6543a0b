use serde::{Deserialize, Serialize};

/// Monotonically increasing id source.
///
/// Ids handed out are never reused, even after the entity they named is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSource {
    next: u32,
}

impl IdSource {
    /// Create a source whose first id is `first`
    pub const fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Hand out the next id
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call to [`IdSource::next_id`] will return
    pub fn peek(&self) -> u32 {
        self.next
    }
}

impl Default for IdSource {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
