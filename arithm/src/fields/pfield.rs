// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! The ring of integers modulo a group order

use crate::largeinteger::LargeInteger;
use crate::utils::error::Error;
use crate::utils::rng::RandomSource;

/**
 * Integers modulo the order of a prime order group.
 *
 * Residues are [`LargeInteger`]s in `[0, order)`. The descriptor is immutable
 * and shared by every [`PRingElement`][`crate::fields::PRingElement`] over it.
 */
#[derive(Debug, Clone)]
pub struct PField {
    order: LargeInteger,
    byte_length: usize,
}

impl PField {
    /// Creates the ring of integers modulo `order`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if `order < 2`
    pub fn new(order: LargeInteger) -> Result<Self, Error> {
        if order <= LargeInteger::one() {
            return Err(Error::InvalidParameters(format!(
                "field order must be at least 2, got {order}"
            )));
        }
        let byte_length = order.bitlength().div_ceil(8);
        Ok(PField { order, byte_length })
    }

    /// The modulus.
    #[inline]
    #[must_use]
    pub fn order(&self) -> &LargeInteger {
        &self.order
    }

    /// Length of a serialized residue.
    #[inline]
    #[must_use]
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    /// Reduces an arbitrary integer into `[0, order)`.
    #[must_use]
    pub fn reduce(&self, x: &LargeInteger) -> LargeInteger {
        x.modulo(&self.order)
    }

    /// Returns `x + y mod order`.
    #[must_use]
    pub fn add(&self, x: &LargeInteger, y: &LargeInteger) -> LargeInteger {
        let s = x.add(y);
        if s >= self.order {
            s.sub(&self.order)
        } else {
            s
        }
    }

    /// Returns `x - y mod order`.
    #[must_use]
    pub fn sub(&self, x: &LargeInteger, y: &LargeInteger) -> LargeInteger {
        let d = x.sub(y);
        if d.is_negative() {
            d.add(&self.order)
        } else {
            d
        }
    }

    /// Returns `x * y mod order`.
    #[must_use]
    pub fn mul(&self, x: &LargeInteger, y: &LargeInteger) -> LargeInteger {
        x.mul(y).modulo(&self.order)
    }

    /// Returns `-x mod order`.
    #[must_use]
    pub fn neg(&self, x: &LargeInteger) -> LargeInteger {
        if x.is_zero() {
            LargeInteger::zero()
        } else {
            self.order.sub(x)
        }
    }

    /// Returns the multiplicative inverse of `x`.
    ///
    /// # Errors
    ///
    /// - `NotInvertible` if `x` shares a factor with the order, in particular
    ///   if it is zero
    pub fn inv(&self, x: &LargeInteger) -> Result<LargeInteger, Error> {
        x.mod_inv(&self.order)
    }

    /**
     * A random residue, sampled as `bitlen(order) + stat_dist` random bits
     * reduced modulo the order.
     *
     * The result is within statistical distance `2^-stat_dist` of uniform.
     *
     * # Errors
     *
     * - `RandomSourceError` if `rs` fails
     */
    pub fn random_residue<R: RandomSource + ?Sized>(
        &self,
        rs: &mut R,
        stat_dist: usize,
    ) -> Result<LargeInteger, Error> {
        let r = LargeInteger::random(self.order.bitlength() + stat_dist, rs)?;
        Ok(r.modulo(&self.order))
    }

    /// Serializes a residue as [`PField::byte_length`] big-endian bytes.
    #[must_use]
    pub fn residue_to_bytes(&self, x: &LargeInteger) -> Vec<u8> {
        let mut out = vec![0u8; self.byte_length];
        let bytes = x.to_unsigned_bytes();
        out[self.byte_length - bytes.len()..].copy_from_slice(&bytes);
        out
    }

    /// Parses a residue serialized by [`PField::residue_to_bytes`].
    ///
    /// # Errors
    ///
    /// - `InvalidElement` if the length is wrong or the value is not below the order
    pub fn residue_from_bytes(&self, bytes: &[u8]) -> Result<LargeInteger, Error> {
        if bytes.len() != self.byte_length {
            return Err(Error::InvalidElement(format!(
                "expected {} bytes for a field element, got {}",
                self.byte_length,
                bytes.len()
            )));
        }
        let x = LargeInteger::from_unsigned_bytes(bytes);
        if x >= self.order {
            return Err(Error::InvalidElement(
                "field element is not below the order".to_string(),
            ));
        }
        Ok(x)
    }
}

impl PartialEq for PField {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for PField {}
