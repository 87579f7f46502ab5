//! # Identifier Module
//!
//! 6-digit account identifiers drawn uniformly from `[100000, 999999]`.
//!
//! The generator does not remember what it produced; uniqueness is the
//! store's job (it rejects duplicate keys) and the service retries.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Smallest identifier (inclusive)
pub const MIN_ACCOUNT_ID: u32 = 100_000;
/// Largest identifier (inclusive)
pub const MAX_ACCOUNT_ID: u32 = 999_999;

/// Random account identifier source.
///
/// # Examples
/// ```
/// use branchbank_core::AccountIdGenerator;
///
/// let mut a = AccountIdGenerator::seeded(7);
/// let mut b = AccountIdGenerator::seeded(7);
/// assert_eq!(a.next_id(), b.next_id());
/// ```
#[derive(Debug, Clone)]
pub struct AccountIdGenerator<R = StdRng> {
    rng: R,
}

impl AccountIdGenerator<StdRng> {
    /// Generator seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for tests and replays
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> AccountIdGenerator<R> {
    /// Wrap any random source
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draw the next identifier
    pub fn next_id(&mut self) -> String {
        self.rng
            .gen_range(MIN_ACCOUNT_ID..=MAX_ACCOUNT_ID)
            .to_string()
    }
}

impl Default for AccountIdGenerator<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Whether `id` has the shape of an account identifier.
pub fn is_well_formed(id: &str) -> bool {
    id.len() == 6
        && id.bytes().all(|b| b.is_ascii_digit())
        && id.parse::<u32>().is_ok_and(|n| n >= MIN_ACCOUNT_ID)
}
