//! Attack identifiers and the seeded stream that allocates them.
//!
//! Attack ids must stay unique and stable across reorders, so they are
//! never derived from list positions. New ids come from a ChaCha8 stream:
//! the same seed yields the same ids, which keeps tests deterministic.
//!
//! ```
//! use rust_cardsmith::core::{AttackId, IdStream};
//!
//! let mut a = IdStream::new(7);
//! let mut b = IdStream::new(7);
//! let none_live = |_: AttackId| false;
//! assert_eq!(a.next_id(none_live), b.next_id(none_live));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Stable identifier of one attack within a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttackId(pub u64);

impl AttackId {
    /// Create a new attack ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AttackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Attack({})", self.0)
    }
}

/// Seeded id allocator.
#[derive(Clone, Debug)]
pub struct IdStream {
    inner: ChaCha8Rng,
    seed: u64,
}

impl IdStream {
    /// Create a stream with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw the next id that `is_live` does not already claim.
    ///
    /// Zero is never returned.
    pub fn next_id(&mut self, is_live: impl Fn(AttackId) -> bool) -> AttackId {
        loop {
            let candidate = AttackId(self.inner.gen_range(1..=u64::MAX));
            if !is_live(candidate) {
                return candidate;
            }
            log::debug!("id collision on {candidate}, drawing again");
        }
    }
}

impl Default for IdStream {
    fn default() -> Self {
        Self::new(0)
    }
}
