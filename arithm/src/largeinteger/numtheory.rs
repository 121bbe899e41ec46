// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Modular arithmetic, primality and random sampling for [`LargeInteger`]

use tracing::{instrument, trace};

use super::LargeInteger;
use crate::li::Digit;
use crate::sli::{self, Sli};
use crate::utils::error::Error;
use crate::utils::rng::RandomSource;

/// Default number of Miller-Rabin rounds used when validating parameters.
///
/// A composite passes a single round with probability at most 1/4.
pub const DEFAULT_CERTAINTY: usize = 50;

/// Primes used for trial division ahead of Miller-Rabin.
const SMALL_PRIMES: [Digit; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

impl LargeInteger {
    /// Returns `self^e mod m` for a non-negative exponent.
    ///
    /// # Panics
    ///
    /// - Panics if `m` is not positive or `e` is negative
    #[must_use]
    pub fn mod_pow(&self, e: &LargeInteger, m: &LargeInteger) -> LargeInteger {
        assert!(m.is_positive(), "LargeInteger::mod_pow: non-positive modulus");
        assert!(!e.is_negative(), "LargeInteger::mod_pow: negative exponent");
        let mut w = Sli::new(m.len());
        sli::modpow(&mut w, &self.inner, &e.inner, &m.inner);
        LargeInteger::from_sli(w)
    }

    /// Returns `self^e mod m`, inverting `self` first when `e` is negative.
    ///
    /// # Errors
    ///
    /// - `NotInvertible` if `e` is negative and `self` is not a unit modulo `m`
    ///
    /// # Panics
    ///
    /// - Panics if `m` is not positive
    pub fn mod_pow_signed(&self, e: &LargeInteger, m: &LargeInteger) -> Result<LargeInteger, Error> {
        if e.is_negative() {
            Ok(self.mod_inv(m)?.mod_pow(&e.abs(), m))
        } else {
            Ok(self.mod_pow(e, m))
        }
    }

    /// Returns the inverse of `self` modulo `m`.
    ///
    /// # Errors
    ///
    /// - `NotInvertible` if `gcd(self, m) != 1`
    ///
    /// # Panics
    ///
    /// - Panics if `m` is not positive
    pub fn mod_inv(&self, m: &LargeInteger) -> Result<LargeInteger, Error> {
        assert!(m.is_positive(), "LargeInteger::mod_inv: non-positive modulus");
        let mut w = Sli::new(m.len());
        sli::modinv(&mut w, &self.inner, &m.inner)?;
        Ok(LargeInteger::from_sli(w))
    }

    /// Extended GCD, returns `(g, a, b)` with `g = gcd(self, other) >= 0` and
    /// `a * self + b * other = g`.
    #[must_use]
    pub fn egcd(&self, other: &LargeInteger) -> (LargeInteger, LargeInteger, LargeInteger) {
        let (g, a, b) = sli::egcd(self.abs().as_sli(), other.abs().as_sli());
        let mut a = LargeInteger::from_sli(a);
        let mut b = LargeInteger::from_sli(b);
        if self.is_negative() {
            a = a.neg();
        }
        if other.is_negative() {
            b = b.neg();
        }
        (LargeInteger::from_sli(g), a, b)
    }

    /// Greatest common divisor, always non-negative.
    #[must_use]
    pub fn gcd(&self, other: &LargeInteger) -> LargeInteger {
        self.egcd(other).0
    }

    /// Legendre symbol `(self / p)` for an odd prime `p`: 0, 1 or -1.
    ///
    /// Computed with Euler's criterion.
    #[must_use]
    pub fn legendre(&self, p: &LargeInteger) -> i32 {
        let a = self.modulo(p);
        if a.is_zero() {
            return 0;
        }
        let e = p.sub(&LargeInteger::one()).shift_right(1);
        if a.mod_pow(&e, p).is_one() {
            1
        } else {
            -1
        }
    }

    /// A square root of `self` modulo the odd prime `p`, or `None` for a non-residue.
    ///
    /// Primes congruent to 3 modulo 4 take the direct exponentiation
    /// `a^((p + 1) / 4)`; all others go through Tonelli-Shanks.
    #[must_use]
    pub fn mod_sqrt(&self, p: &LargeInteger) -> Option<LargeInteger> {
        let a = self.modulo(p);
        if a.is_zero() {
            return Some(a);
        }
        if a.legendre(p) != 1 {
            return None;
        }
        let one = LargeInteger::one();

        if p.rem_digit(4) == 3 {
            let e = p.add(&one).shift_right(2);
            return Some(a.mod_pow(&e, p));
        }

        // p - 1 = q * 2^s with q odd
        let p_minus_one = p.sub(&one);
        let mut s = 0;
        while !p_minus_one.get_bit(s) {
            s += 1;
        }
        let q = p_minus_one.shift_right(s);

        let mut z = LargeInteger::from_u64(2);
        while z.legendre(p) != -1 {
            z = z.add(&one);
        }

        let mut m = s;
        let mut c = z.mod_pow(&q, p);
        let mut t = a.mod_pow(&q, p);
        let mut r = a.mod_pow(&q.add(&one).shift_right(1), p);

        while !t.is_one() {
            // least i with t^(2^i) = 1
            let mut i = 0;
            let mut t2 = t.clone();
            while !t2.is_one() {
                t2 = t2.square().modulo(p);
                i += 1;
            }
            let mut b = c.clone();
            for _ in 0..m - i - 1 {
                b = b.square().modulo(p);
            }
            m = i;
            c = b.square().modulo(p);
            t = t.mul(&c).modulo(p);
            r = r.mul(&b).modulo(p);
        }
        Some(r)
    }

    /**
     * Miller-Rabin probabilistic primality test.
     *
     * Small factors are removed by trial division first. Each of the `rounds`
     * rounds draws a fresh witness from `rs`; a composite survives with
     * probability at most `4^-rounds`.
     *
     * # Errors
     *
     * - `RandomSourceError` if `rs` fails to produce witnesses
     */
    #[instrument(level = "trace", skip_all, fields(bits = self.bitlength(), rounds = rounds))]
    pub fn is_probable_prime<R: RandomSource + ?Sized>(
        &self,
        rounds: usize,
        rs: &mut R,
    ) -> Result<bool, Error> {
        if self <= &LargeInteger::one() {
            return Ok(false);
        }
        for sp in SMALL_PRIMES {
            if self.to_u64() == Some(u64::from(sp)) {
                return Ok(true);
            }
            if self.rem_digit(sp) == 0 {
                return Ok(false);
            }
        }
        if self.to_u64().is_some_and(|v| v < 97 * 97) {
            return Ok(true);
        }

        let one = LargeInteger::one();
        let n_minus_one = self.sub(&one);
        let mut s = 0;
        while !n_minus_one.get_bit(s) {
            s += 1;
        }
        let d = n_minus_one.shift_right(s);
        // witnesses in [2, n - 2]
        let range = self.sub(&LargeInteger::from_u64(3));

        'witness: for round in 0..rounds {
            let a = LargeInteger::random_below(&range, rs)?.add(&LargeInteger::from_u64(2));
            let mut x = a.mod_pow(&d, self);
            if x.is_one() || x == n_minus_one {
                continue;
            }
            for _ in 1..s {
                x = x.square().modulo(self);
                if x == n_minus_one {
                    continue 'witness;
                }
            }
            trace!(round, "composite witness found");
            return Ok(false);
        }
        Ok(true)
    }

    /// A uniformly random integer in `[0, 2^bits)`.
    ///
    /// # Errors
    ///
    /// - `RandomSourceError` if `rs` fails
    pub fn random<R: RandomSource + ?Sized>(bits: usize, rs: &mut R) -> Result<LargeInteger, Error> {
        let mut bytes = vec![0u8; bits.div_ceil(8)];
        rs.fill(&mut bytes)?;
        let excess = 8 * bytes.len() - bits;
        if let Some(top) = bytes.first_mut() {
            *top &= 0xff >> excess;
        }
        Ok(LargeInteger::from_unsigned_bytes(&bytes))
    }

    /// A uniformly random integer in `[0, bound)`, by rejection sampling.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if `bound` is not positive
    /// - `RandomSourceError` if `rs` fails
    pub fn random_below<R: RandomSource + ?Sized>(
        bound: &LargeInteger,
        rs: &mut R,
    ) -> Result<LargeInteger, Error> {
        if !bound.is_positive() {
            return Err(Error::InvalidParameters(format!(
                "random sampling bound must be positive, got {bound}"
            )));
        }
        let bits = bound.bitlength();
        loop {
            let candidate = LargeInteger::random(bits, rs)?;
            if candidate < *bound {
                return Ok(candidate);
            }
        }
    }
}
