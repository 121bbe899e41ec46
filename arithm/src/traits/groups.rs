// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Capabilities of an atomic prime order group

use std::fmt::Debug;
use std::sync::Arc;

use crate::fields::PField;
use crate::largeinteger::LargeInteger;
use crate::utils::error::Error;
use crate::utils::rng::RandomSource;

/**
 * An atomic group of prime order.
 *
 * Implemented by [`ModPGroup`][`crate::groups::modp::ModPGroup`] and
 * [`ECqPGroup`][`crate::groups::ecq::ECqPGroup`]. The trait works on raw
 * values; [`PGroup`][`crate::groups::PGroup`] wraps them into elements that
 * carry their group, checks domains and lifts everything to products.
 *
 * Values handed to the `*_value` methods are members of the group. Every
 * value returned by them is a member as well.
 */
pub trait PrimeOrderGroup: Debug + Send + Sync {
    /// The raw representation of an element.
    type Value: Clone + Debug + PartialEq + Eq + Send + Sync;

    /// The prime order `q` of the group.
    fn order(&self) -> &LargeInteger;

    /// The field of exponents, integers modulo [`PrimeOrderGroup::order`].
    fn field(&self) -> &Arc<PField>;

    /// The neutral element.
    fn identity_value(&self) -> Self::Value;

    /// The standard generator.
    fn generator_value(&self) -> Self::Value;

    /// The group operation.
    fn operate_values(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// The inverse of `a`.
    ///
    /// # Errors
    ///
    /// - `NotInvertible` if `a` has no inverse, which only happens for
    ///   values that are not members
    fn invert_value(&self, a: &Self::Value) -> Result<Self::Value, Error>;

    /// `a` raised to a non-negative exponent `e`, usually in `[0, order)`.
    fn exp_value(&self, a: &Self::Value, e: &LargeInteger) -> Self::Value;

    /// A random element: the generator raised to a random exponent whose
    /// distribution is within `2^-stat_dist` of uniform.
    ///
    /// # Errors
    ///
    /// - `RandomSourceError` if `rs` fails
    fn random_value<R: RandomSource + ?Sized>(
        &self,
        rs: &mut R,
        stat_dist: usize,
    ) -> Result<Self::Value, Error> {
        let e = self.field().random_residue(rs, stat_dist)?;
        Ok(self.exp_value(&self.generator_value(), &e))
    }

    /// Returns true if `a` is a member of the group.
    fn is_member(&self, a: &Self::Value) -> bool;

    /// Length of a serialized element.
    fn byte_length(&self) -> usize;

    /// Serializes `a` to exactly [`PrimeOrderGroup::byte_length`] bytes.
    fn value_to_bytes(&self, a: &Self::Value) -> Vec<u8>;

    /// Parses and fully validates a serialized element.
    ///
    /// # Errors
    ///
    /// - `InvalidElement` if the bytes do not represent a member
    fn value_from_bytes(&self, bytes: &[u8]) -> Result<Self::Value, Error>;

    /// Maximum number of bytes [`PrimeOrderGroup::encode_value`] accepts.
    fn encode_length(&self) -> usize;

    /// Embeds a byte string of at most [`PrimeOrderGroup::encode_length`]
    /// bytes injectively into the group.
    ///
    /// # Errors
    ///
    /// - `EncodingTooLarge` if `bytes` is too long
    /// - `InvalidParameters` if the group does not support embedding
    fn encode_value(&self, bytes: &[u8]) -> Result<Self::Value, Error>;

    /// Recovers the byte string embedded by [`PrimeOrderGroup::encode_value`].
    ///
    /// # Errors
    ///
    /// - `InvalidElement` if `a` is not the embedding of any byte string
    fn decode_value(&self, a: &Self::Value) -> Result<Vec<u8>, Error>;
}
