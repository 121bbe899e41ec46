// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Prime order groups and products of groups
//!
//! # [`modp`]
//!
//! Subgroups of prime order of `Z_p^*`, over [`LargeInteger`] residues
//!
//! # [`ecq`]
//!
//! Groups of points of elliptic curves, over the Jacobian arithmetic of
//! [`crate::ec`]. Requires the `ecq` feature.
//!
//! # [`productgroup`]
//!
//! Products of groups and rings, nested to any depth
//!
//! [`PGroup`] ties these together: every operation is available on every
//! kind of group and lifts component-wise through products.
//!
//! # Examples
//!
//! ```
//! use arithm::groups::PGroup;
//! use arithm::utils::rng::HashPrg;
//!
//! let mut rng = HashPrg::new(b"groups example");
//! let group = PGroup::named("P-256").unwrap();
//! let pair = group.power(2).unwrap();
//!
//! // a single exponent applies to every component
//! let r = group.pring().random_element(&mut rng, 50).unwrap();
//! let g = pair.generator();
//! let gr = pair.exponentiate(&g, &r).unwrap();
//! assert_eq!(gr.components().unwrap()[1], group.generator().exp(&r).unwrap());
//!
//! // a product exponent applies component-wise
//! let rs = pair.pring().random_element(&mut rng, 50).unwrap();
//! let grs = pair.exponentiate(&g, &rs).unwrap();
//! assert!(pair.contains(&grs));
//! ```

use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

#[cfg(feature = "ecq")]
use crate::groups::ecq::{CurveName, ECqPGroup};
use crate::fields::{PRing, PRingElement};
use crate::groups::element::{same, GroupValue};
use crate::groups::modp::{ModPGroup, ModPGroupName};
use crate::largeinteger::LargeInteger;
use crate::traits::groups::PrimeOrderGroup;
use crate::utils::error::Error;
use crate::utils::rng::RandomSource;

/// Prime order groups over elliptic curves
#[cfg(feature = "ecq")]
pub mod ecq;

/// Elements of [`PGroup`]s
pub mod element;

/// Prime order subgroups of `Z_p^*`
pub mod modp;

/// Products of groups and rings
pub mod productgroup;

pub use element::PGroupElement;
pub use productgroup::PPGroup;

/**
 * A group of prime order, or a product of such groups.
 *
 * Descriptors are immutable and shared behind [`Arc`]; cloning a `PGroup` is
 * cheap. Equality compares parameters, with pointer equality as a fast path.
 */
#[derive(Debug, Clone)]
pub enum PGroup {
    /// A subgroup of `Z_p^*`
    ModP(Arc<ModPGroup>),
    /// A group of curve points
    #[cfg(feature = "ecq")]
    Ecq(Arc<ECqPGroup>),
    /// A product of groups
    Product(Arc<PPGroup>),
}

impl PartialEq for PGroup {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PGroup::ModP(a), PGroup::ModP(b)) => same(a, b),
            #[cfg(feature = "ecq")]
            (PGroup::Ecq(a), PGroup::Ecq(b)) => same(a, b),
            (PGroup::Product(a), PGroup::Product(b)) => same(a, b),
            _ => false,
        }
    }
}

impl Eq for PGroup {}

impl From<ModPGroup> for PGroup {
    fn from(group: ModPGroup) -> Self {
        PGroup::ModP(Arc::new(group))
    }
}

#[cfg(feature = "ecq")]
impl From<ECqPGroup> for PGroup {
    fn from(group: ECqPGroup) -> Self {
        PGroup::Ecq(Arc::new(group))
    }
}

impl From<PPGroup> for PGroup {
    fn from(group: PPGroup) -> Self {
        PGroup::Product(Arc::new(group))
    }
}

impl PGroup {
    /// Looks up a standard group by name, e.g. `"modp2048"` or `"P-256"`.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if the name is unknown
    pub fn named(name: &str) -> Result<PGroup, Error> {
        if let Ok(n) = ModPGroupName::from_str(name) {
            return Ok(ModPGroup::named(n)?.into());
        }
        #[cfg(feature = "ecq")]
        {
            if let Ok(n) = CurveName::from_str(name) {
                return Ok(ECqPGroup::named(n)?.into());
            }
        }
        debug!(name, "unknown group name");
        Err(Error::InvalidParameters(format!("unknown group {name:?}")))
    }

    /// Product of the given groups.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if `factors` is empty
    pub fn product(factors: Vec<PGroup>) -> Result<PGroup, Error> {
        Ok(PPGroup::new(factors)?.into())
    }

    /// Product of `width` copies of this group.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if `width` is zero
    pub fn power(&self, width: usize) -> Result<PGroup, Error> {
        Ok(PPGroup::power(self, width)?.into())
    }

    /// The factor groups of a product group.
    #[must_use]
    pub fn factors(&self) -> Option<&[PGroup]> {
        match self {
            PGroup::Product(p) => Some(p.factors()),
            _ => None,
        }
    }

    /// Number of components: one for an atomic group.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.factors().map_or(1, <[PGroup]>::len)
    }

    /// The order: a prime for atomic groups, the product of the factor
    /// orders for product groups.
    #[must_use]
    pub fn order(&self) -> &LargeInteger {
        match self {
            PGroup::ModP(g) => g.order(),
            #[cfg(feature = "ecq")]
            PGroup::Ecq(g) => g.order(),
            PGroup::Product(p) => p.order(),
        }
    }

    /// The ring of exponents.
    #[must_use]
    pub fn pring(&self) -> PRing {
        match self {
            PGroup::ModP(g) => PRing::Field(g.field().clone()),
            #[cfg(feature = "ecq")]
            PGroup::Ecq(g) => PRing::Field(g.field().clone()),
            PGroup::Product(p) => PRing::Product(p.ring().clone()),
        }
    }

    /// Length of a serialized element.
    #[must_use]
    pub fn byte_length(&self) -> usize {
        match self {
            PGroup::ModP(g) => g.byte_length(),
            #[cfg(feature = "ecq")]
            PGroup::Ecq(g) => g.byte_length(),
            PGroup::Product(p) => p.byte_length(),
        }
    }

    /// Maximum number of bytes [`PGroup::encode`] accepts.
    #[must_use]
    pub fn encode_length(&self) -> usize {
        match self {
            PGroup::ModP(g) => g.encode_length(),
            #[cfg(feature = "ecq")]
            PGroup::Ecq(g) => g.encode_length(),
            PGroup::Product(p) => p.encode_length(),
        }
    }

    /// Returns true if `a` belongs to this group.
    #[must_use]
    pub fn contains(&self, a: &PGroupElement) -> bool {
        a.group() == *self
    }

    fn check(&self, a: &PGroupElement) -> Result<(), Error> {
        if self.contains(a) {
            Ok(())
        } else {
            Err(Error::DomainMismatch(
                "element does not belong to the group".to_string(),
            ))
        }
    }

    /// The neutral element.
    #[must_use]
    pub fn identity(&self) -> PGroupElement {
        let inner = match self {
            PGroup::ModP(g) => GroupValue::ModP(g.clone(), g.identity_value()),
            #[cfg(feature = "ecq")]
            PGroup::Ecq(g) => GroupValue::Ecq(g.clone(), g.identity_value()),
            PGroup::Product(p) => {
                GroupValue::Product(p.clone(), p.factors().iter().map(PGroup::identity).collect())
            }
        };
        PGroupElement { inner }
    }

    /// The standard generator; the tuple of generators for product groups.
    #[must_use]
    pub fn generator(&self) -> PGroupElement {
        let inner = match self {
            PGroup::ModP(g) => GroupValue::ModP(g.clone(), g.generator_value()),
            #[cfg(feature = "ecq")]
            PGroup::Ecq(g) => GroupValue::Ecq(g.clone(), g.generator_value()),
            PGroup::Product(p) => {
                GroupValue::Product(p.clone(), p.factors().iter().map(PGroup::generator).collect())
            }
        };
        PGroupElement { inner }
    }

    /// Returns `a * b`.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if `a` or `b` does not belong to this group
    pub fn operate(&self, a: &PGroupElement, b: &PGroupElement) -> Result<PGroupElement, Error> {
        self.check(a)?;
        a.mul(b)
    }

    /// Returns the inverse of `a`.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if `a` does not belong to this group
    pub fn invert(&self, a: &PGroupElement) -> Result<PGroupElement, Error> {
        self.check(a)?;
        a.inv()
    }

    /// Returns `a^e`, see [`PGroupElement::exp`].
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if `a` does not belong to this group or `e` to its ring
    /// - `ArityMismatch` if a product exponent has the wrong number of components
    pub fn exponentiate(&self, a: &PGroupElement, e: &PRingElement) -> Result<PGroupElement, Error> {
        self.check(a)?;
        a.exp(e)
    }

    /// Returns `a^e` for an integer `e`, reduced modulo the order first.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if `a` does not belong to this group
    pub fn exponentiate_int(&self, a: &PGroupElement, e: &LargeInteger) -> Result<PGroupElement, Error> {
        self.check(a)?;
        Ok(a.exp_int(e))
    }

    /**
     * A random element, within statistical distance `2^-stat_dist` of uniform.
     *
     * Components of product elements are sampled independently.
     *
     * # Errors
     *
     * - `RandomSourceError` if `rs` fails
     */
    pub fn random_element<R: RandomSource + ?Sized>(
        &self,
        rs: &mut R,
        stat_dist: usize,
    ) -> Result<PGroupElement, Error> {
        let inner = match self {
            PGroup::ModP(g) => GroupValue::ModP(g.clone(), g.random_value(rs, stat_dist)?),
            #[cfg(feature = "ecq")]
            PGroup::Ecq(g) => GroupValue::Ecq(g.clone(), g.random_value(rs, stat_dist)?),
            PGroup::Product(p) => {
                let components = p
                    .factors()
                    .iter()
                    .map(|f| f.random_element(rs, stat_dist))
                    .collect::<Result<Vec<_>, _>>()?;
                GroupValue::Product(p.clone(), components)
            }
        };
        Ok(PGroupElement { inner })
    }

    /**
     * Embeds a byte string of at most [`PGroup::encode_length`] bytes.
     *
     * Product groups fill their components in order, each up to its own
     * capacity; components past the end of the input embed the empty string.
     *
     * # Errors
     *
     * - `EncodingTooLarge` if `bytes` is longer than [`PGroup::encode_length`]
     * - `InvalidParameters` if some atomic group does not support embedding
     */
    pub fn encode(&self, bytes: &[u8]) -> Result<PGroupElement, Error> {
        let inner = match self {
            PGroup::ModP(g) => GroupValue::ModP(g.clone(), g.encode_value(bytes)?),
            #[cfg(feature = "ecq")]
            PGroup::Ecq(g) => GroupValue::Ecq(g.clone(), g.encode_value(bytes)?),
            PGroup::Product(p) => {
                if bytes.len() > p.encode_length() {
                    return Err(Error::EncodingTooLarge {
                        length: bytes.len(),
                        max: p.encode_length(),
                    });
                }
                let mut rest = bytes;
                let mut components = Vec::with_capacity(p.factors().len());
                for f in p.factors() {
                    let (head, tail) = rest.split_at(f.encode_length().min(rest.len()));
                    components.push(f.encode(head)?);
                    rest = tail;
                }
                GroupValue::Product(p.clone(), components)
            }
        };
        Ok(PGroupElement { inner })
    }

    /// Recovers the byte string embedded in `a` by [`PGroup::encode`].
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if `a` does not belong to this group
    /// - `InvalidElement` if `a` is not an embedding
    pub fn decode(&self, a: &PGroupElement) -> Result<Vec<u8>, Error> {
        self.check(a)?;
        a.decode()
    }

    /// Serializes `a` as [`PGroup::byte_length`] bytes.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if `a` does not belong to this group
    pub fn element_to_bytes(&self, a: &PGroupElement) -> Result<Vec<u8>, Error> {
        self.check(a)?;
        Ok(a.to_bytes())
    }

    /// Parses and validates a serialized element.
    ///
    /// # Errors
    ///
    /// - `InvalidElement` if the length is wrong or a component is not a member
    pub fn element_from_bytes(&self, bytes: &[u8]) -> Result<PGroupElement, Error> {
        let inner = match self {
            PGroup::ModP(g) => GroupValue::ModP(g.clone(), g.value_from_bytes(bytes)?),
            #[cfg(feature = "ecq")]
            PGroup::Ecq(g) => GroupValue::Ecq(g.clone(), g.value_from_bytes(bytes)?),
            PGroup::Product(p) => {
                if bytes.len() != p.byte_length() {
                    return Err(Error::InvalidElement(format!(
                        "expected {} bytes for a product element, got {}",
                        p.byte_length(),
                        bytes.len()
                    )));
                }
                let mut offset = 0;
                let mut components = Vec::with_capacity(p.factors().len());
                for f in p.factors() {
                    let len = f.byte_length();
                    components.push(f.element_from_bytes(&bytes[offset..offset + len])?);
                    offset += len;
                }
                GroupValue::Product(p.clone(), components)
            }
        };
        Ok(PGroupElement { inner })
    }

    /// Builds a product group element from its components.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if this group is not a product or a component
    ///   belongs to the wrong factor
    /// - `ArityMismatch` if the number of components is wrong
    pub fn product_element(&self, components: Vec<PGroupElement>) -> Result<PGroupElement, Error> {
        let PGroup::Product(p) = self else {
            return Err(Error::DomainMismatch(
                "components given for an atomic group element".to_string(),
            ));
        };
        if p.factors().len() != components.len() {
            return Err(Error::ArityMismatch {
                expected: p.factors().len(),
                actual: components.len(),
            });
        }
        for (f, c) in p.factors().iter().zip(&components) {
            f.check(c)?;
        }
        Ok(PGroupElement {
            inner: GroupValue::Product(p.clone(), components),
        })
    }

    /// The product of `elements`; the identity for an empty slice.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if an element does not belong to this group
    pub fn prod(&self, elements: &[PGroupElement]) -> Result<PGroupElement, Error> {
        elements
            .iter()
            .try_fold(self.identity(), |acc, a| self.operate(&acc, a))
    }

    /// The product of `bases[i]^exponents[i]`.
    ///
    /// # Errors
    ///
    /// - `ArityMismatch` if the slices have different lengths, or as for
    ///   [`PGroup::exponentiate`]
    /// - `DomainMismatch` as for [`PGroup::exponentiate`]
    pub fn exp_prod(
        &self,
        bases: &[PGroupElement],
        exponents: &[PRingElement],
    ) -> Result<PGroupElement, Error> {
        if bases.len() != exponents.len() {
            return Err(Error::ArityMismatch {
                expected: bases.len(),
                actual: exponents.len(),
            });
        }
        bases
            .iter()
            .zip(exponents)
            .try_fold(self.identity(), |acc, (b, e)| {
                self.operate(&acc, &self.exponentiate(b, e)?)
            })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests;
