// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Product groups

use std::sync::Arc;

use tracing::trace;

use crate::groups::productgroup::PPRing;
use crate::groups::PGroup;
use crate::largeinteger::LargeInteger;
use crate::utils::error::Error;

/**
 * The product of an ordered, non-empty list of groups.
 *
 * Elements are tuples with one component per factor; see
 * [`PGroup`] for the component-wise operations. The ring of exponents is the
 * product of the rings of the factors.
 */
#[derive(Debug)]
pub struct PPGroup {
    factors: Vec<PGroup>,
    ring: Arc<PPRing>,
    order: LargeInteger,
    byte_length: usize,
    encode_length: usize,
}

impl PPGroup {
    /// Creates the product of `factors`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if `factors` is empty
    pub fn new(factors: Vec<PGroup>) -> Result<Self, Error> {
        if factors.is_empty() {
            return Err(Error::InvalidParameters(
                "a product group needs at least one factor".to_string(),
            ));
        }
        let ring = Arc::new(PPRing::new(factors.iter().map(PGroup::pring).collect())?);
        let order = factors
            .iter()
            .fold(LargeInteger::one(), |acc, f| acc.mul(f.order()));
        let byte_length = factors.iter().map(PGroup::byte_length).sum();
        let encode_length = factors.iter().map(PGroup::encode_length).sum();
        trace!(arity = factors.len(), byte_length, "created product group");

        Ok(PPGroup {
            factors,
            ring,
            order,
            byte_length,
            encode_length,
        })
    }

    /// Creates the product of `width` copies of `group`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if `width` is zero
    pub fn power(group: &PGroup, width: usize) -> Result<Self, Error> {
        PPGroup::new(vec![group.clone(); width])
    }

    /// The factor groups, in order.
    #[inline]
    #[must_use]
    pub fn factors(&self) -> &[PGroup] {
        &self.factors
    }

    /// Number of factors.
    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.factors.len()
    }

    /// The product of the factor rings.
    #[inline]
    #[must_use]
    pub fn ring(&self) -> &Arc<PPRing> {
        &self.ring
    }

    /// The product of the factor orders.
    #[inline]
    #[must_use]
    pub fn order(&self) -> &LargeInteger {
        &self.order
    }

    /// Sum of the serialized lengths of the factors.
    #[inline]
    #[must_use]
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    /// Sum of the embedding capacities of the factors.
    #[inline]
    #[must_use]
    pub fn encode_length(&self) -> usize {
        self.encode_length
    }
}

impl PartialEq for PPGroup {
    fn eq(&self, other: &Self) -> bool {
        self.factors == other.factors
    }
}

impl Eq for PPGroup {}
