// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Random number generation

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use sha3::{Digest, Sha3_256};

use crate::utils::error::Error;

/**
 * Marker trait to require a cryptographically secure random number generator.
 */
pub trait CRng: RngCore + CryptoRng {}

/**
 * `OsRng` is a cryptographically secure random number generator.
 */
impl CRng for OsRng {}

/**
 * Random number generation [context][`crate::context::Context`] dependency.
 *
 * Allows retrieving an rng instance in some [Context][`crate::context::Context`].
 */
pub trait Rng: CRng {
    /// Returns an rng instance.
    fn rng() -> Self;
}

/**
 * Implements the random number generation [context][`crate::context::Context`] dependency with [`OsRng`].
 */
impl Rng for OsRng {
    fn rng() -> OsRng {
        rand::rngs::OsRng
    }
}

/**
 * Source of random bytes consumed by sampling routines.
 *
 * A failure to produce bytes is reported as [`Error::RandomSourceError`] and
 * is never papered over with a weaker source. Retrying is up to the caller.
 */
pub trait RandomSource {
    /// Fills `buffer` with random bytes.
    ///
    /// # Errors
    ///
    /// - `RandomSourceError` if the source cannot deliver the bytes
    fn fill(&mut self, buffer: &mut [u8]) -> Result<(), Error>;
}

impl<R: CRng + ?Sized> RandomSource for R {
    fn fill(&mut self, buffer: &mut [u8]) -> Result<(), Error> {
        self.try_fill_bytes(buffer)?;
        Ok(())
    }
}

/**
 * Deterministic generator: SHA3-256 in counter mode over a hashed seed.
 *
 * Block `i` of the output stream is `SHA3-256(SHA3-256(seed) || i)` with `i`
 * encoded as a big-endian `u64`. Used for reproducible sampling and for
 * deriving Miller-Rabin witnesses from public parameters.
 *
 * # Examples
 *
 * ```
 * use arithm::utils::rng::{HashPrg, RandomSource};
 *
 * let mut a = HashPrg::new(b"seed");
 * let mut b = HashPrg::new(b"seed");
 * let (mut x, mut y) = ([0u8; 40], [0u8; 40]);
 * a.fill(&mut x).unwrap();
 * b.fill(&mut y).unwrap();
 * assert_eq!(x, y);
 * ```
 */
#[derive(Clone, Debug)]
pub struct HashPrg {
    seed: [u8; 32],
    counter: u64,
    block: [u8; 32],
    used: usize,
}

impl HashPrg {
    /// Creates a generator from an arbitrary length seed.
    #[must_use]
    pub fn new(seed: &[u8]) -> Self {
        let seed: [u8; 32] = Sha3_256::digest(seed).into();
        HashPrg {
            seed,
            counter: 0,
            block: [0u8; 32],
            used: 32,
        }
    }

    fn refill(&mut self) {
        let mut hasher = Sha3_256::new();
        hasher.update(self.seed);
        hasher.update(self.counter.to_be_bytes());
        self.block = hasher.finalize().into();
        self.counter = self.counter.wrapping_add(1);
        self.used = 0;
    }
}

impl RngCore for HashPrg {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut written = 0;
        while written < dest.len() {
            if self.used == self.block.len() {
                self.refill();
            }
            let n = (self.block.len() - self.used).min(dest.len() - written);
            dest[written..written + n].copy_from_slice(&self.block[self.used..self.used + n]);
            self.used += n;
            written += n;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for HashPrg {}

impl CRng for HashPrg {}
