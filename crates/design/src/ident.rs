//! Design ID generation
//!
//! IDs look like `250826_K7WRQ2XM`: a local-date prefix and a random
//! suffix drawn from an alphabet without the lookalikes I, L, O, 0 and 1,
//! so operators can read an ID off a printed sheet without ambiguity.

use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Suffix alphabet, lookalike characters removed
pub const ID_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Number of random characters after the date prefix
pub const ID_SUFFIX_LEN: usize = 8;

/// Generator of unique design IDs
///
/// # Example
///
/// ```ignore
/// use design::DesignIdGenerator;
/// use std::collections::HashSet;
///
/// let mut gen = DesignIdGenerator::new();
/// let issued: HashSet<String> = HashSet::new();
/// let id = gen.generate(&issued);
/// assert_eq!(id.len(), 15); // YYMMDD_XXXXXXXX
/// ```
pub struct DesignIdGenerator<R: Rng = StdRng> {
    rng: R,
}

impl DesignIdGenerator<StdRng> {
    /// Create a generator seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a generator with a fixed seed, for reproducible output
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for DesignIdGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> DesignIdGenerator<R> {
    /// Create a generator over an arbitrary RNG
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate an ID not present in `existing`
    ///
    /// Redraws the random suffix until it misses the set. With 31^8
    /// possible suffixes per day collisions are vanishingly rare at
    /// realistic volumes, so the loop almost always runs once.
    pub fn generate(&mut self, existing: &HashSet<String>) -> String {
        let prefix = Local::now().format("%y%m%d").to_string();
        loop {
            let id = format!("{}_{}", prefix, self.suffix());
            if !existing.contains(&id) {
                return id;
            }
        }
    }

    fn suffix(&mut self) -> String {
        (0..ID_SUFFIX_LEN)
            .map(|_| ID_ALPHABET[self.rng.random_range(0..ID_ALPHABET.len())] as char)
            .collect()
    }
}
