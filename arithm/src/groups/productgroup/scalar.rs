// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Product rings

use crate::fields::PRing;
use crate::utils::error::Error;

/**
 * The product of an ordered, non-empty list of rings.
 *
 * Elements are tuples with one component per factor and every operation acts
 * component-wise. Factors may themselves be products, to any depth.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PPRing {
    factors: Vec<PRing>,
}

impl PPRing {
    /// Creates the product of `factors`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if `factors` is empty
    pub fn new(factors: Vec<PRing>) -> Result<Self, Error> {
        if factors.is_empty() {
            return Err(Error::InvalidParameters(
                "a product ring needs at least one factor".to_string(),
            ));
        }
        Ok(PPRing { factors })
    }

    /// Creates the product of `width` copies of `ring`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if `width` is zero
    pub fn power(ring: &PRing, width: usize) -> Result<Self, Error> {
        PPRing::new(vec![ring.clone(); width])
    }

    /// The factor rings, in order.
    #[inline]
    #[must_use]
    pub fn factors(&self) -> &[PRing] {
        &self.factors
    }

    /// Number of factors.
    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.factors.len()
    }
}
