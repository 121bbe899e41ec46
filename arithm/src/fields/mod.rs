// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Exponent rings: [`PField`] and products of rings.
//!
//! A [`PRing`] is either the field of integers modulo a prime group order or
//! a [product ring][`crate::groups::productgroup::PPRing`] of rings. Exponents
//! of [`PGroup`][`crate::groups::PGroup`] elements are [`PRingElement`]s.

use std::sync::Arc;

use crate::groups::productgroup::PPRing;
use crate::largeinteger::LargeInteger;
use crate::utils::error::Error;
use crate::utils::rng::RandomSource;

mod pfield;

pub use pfield::PField;

/**
 * A ring of exponents.
 *
 * Descriptors are shared behind [`Arc`]; equality compares parameters, with
 * pointer equality as a fast path.
 */
#[derive(Debug, Clone)]
pub enum PRing {
    /// Integers modulo a group order
    Field(Arc<PField>),
    /// A product of rings
    Product(Arc<PPRing>),
}

/**
 * An element of a [`PRing`].
 *
 * Holds a handle to its ring. Operations between elements of different rings
 * fail with [`Error::DomainMismatch`].
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PRingElement {
    inner: RingValue,
}

#[derive(Debug, Clone)]
enum RingValue {
    Residue(Arc<PField>, LargeInteger),
    Product(Arc<PPRing>, Vec<PRingElement>),
}

impl PartialEq for RingValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RingValue::Residue(f, x), RingValue::Residue(g, y)) => {
                (Arc::ptr_eq(f, g) || f == g) && x == y
            }
            (RingValue::Product(r, xs), RingValue::Product(s, ys)) => {
                (Arc::ptr_eq(r, s) || r == s) && xs == ys
            }
            _ => false,
        }
    }
}

impl Eq for RingValue {}

impl PartialEq for PRing {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PRing::Field(a), PRing::Field(b)) => Arc::ptr_eq(a, b) || a == b,
            (PRing::Product(a), PRing::Product(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl Eq for PRing {}

impl From<PField> for PRing {
    fn from(field: PField) -> Self {
        PRing::Field(Arc::new(field))
    }
}

impl From<PPRing> for PRing {
    fn from(ring: PPRing) -> Self {
        PRing::Product(Arc::new(ring))
    }
}

impl PRing {
    /// Product of the given rings.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if `factors` is empty
    pub fn product(factors: Vec<PRing>) -> Result<PRing, Error> {
        Ok(PPRing::new(factors)?.into())
    }

    /// Product of `width` copies of this ring.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if `width` is zero
    pub fn power(&self, width: usize) -> Result<PRing, Error> {
        Ok(PPRing::power(self, width)?.into())
    }

    /// The underlying field of an atomic ring.
    #[must_use]
    pub fn field(&self) -> Option<&Arc<PField>> {
        match self {
            PRing::Field(f) => Some(f),
            PRing::Product(_) => None,
        }
    }

    /// The factor rings of a product ring.
    #[must_use]
    pub fn factors(&self) -> Option<&[PRing]> {
        match self {
            PRing::Field(_) => None,
            PRing::Product(p) => Some(p.factors()),
        }
    }

    /// Number of components: one for a field.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.factors().map_or(1, <[PRing]>::len)
    }

    /// Length of a serialized element.
    #[must_use]
    pub fn byte_length(&self) -> usize {
        match self {
            PRing::Field(f) => f.byte_length(),
            PRing::Product(p) => p.factors().iter().map(PRing::byte_length).sum(),
        }
    }

    /// Builds an element from an integer, reduced into every component.
    #[must_use]
    pub fn from_integer(&self, x: &LargeInteger) -> PRingElement {
        let inner = match self {
            PRing::Field(f) => RingValue::Residue(f.clone(), f.reduce(x)),
            PRing::Product(p) => RingValue::Product(
                p.clone(),
                p.factors().iter().map(|r| r.from_integer(x)).collect(),
            ),
        };
        PRingElement { inner }
    }

    /// The additive identity.
    #[must_use]
    pub fn zero(&self) -> PRingElement {
        self.from_integer(&LargeInteger::zero())
    }

    /// The multiplicative identity.
    #[must_use]
    pub fn one(&self) -> PRingElement {
        self.from_integer(&LargeInteger::one())
    }

    /// Builds a product ring element from its components.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if this ring is not a product or a component
    ///   belongs to the wrong factor
    /// - `ArityMismatch` if the number of components is wrong
    pub fn product_element(&self, components: Vec<PRingElement>) -> Result<PRingElement, Error> {
        let PRing::Product(p) = self else {
            return Err(Error::DomainMismatch(
                "components given for a field element".to_string(),
            ));
        };
        if p.factors().len() != components.len() {
            return Err(Error::ArityMismatch {
                expected: p.factors().len(),
                actual: components.len(),
            });
        }
        for (f, c) in p.factors().iter().zip(&components) {
            if &c.ring() != f {
                return Err(Error::DomainMismatch(
                    "component does not belong to its factor ring".to_string(),
                ));
            }
        }
        Ok(PRingElement {
            inner: RingValue::Product(p.clone(), components),
        })
    }

    /// A random element, each residue within statistical distance
    /// `2^-stat_dist` of uniform.
    ///
    /// # Errors
    ///
    /// - `RandomSourceError` if `rs` fails
    pub fn random_element<R: RandomSource + ?Sized>(
        &self,
        rs: &mut R,
        stat_dist: usize,
    ) -> Result<PRingElement, Error> {
        let inner = match self {
            PRing::Field(f) => RingValue::Residue(f.clone(), f.random_residue(rs, stat_dist)?),
            PRing::Product(p) => {
                let components = p
                    .factors()
                    .iter()
                    .map(|r| r.random_element(rs, stat_dist))
                    .collect::<Result<Vec<_>, _>>()?;
                RingValue::Product(p.clone(), components)
            }
        };
        Ok(PRingElement { inner })
    }

    /// Parses an element serialized by [`PRingElement::to_bytes`].
    ///
    /// # Errors
    ///
    /// - `InvalidElement` if the length is wrong or a residue is out of range
    pub fn element_from_bytes(&self, bytes: &[u8]) -> Result<PRingElement, Error> {
        if bytes.len() != self.byte_length() {
            return Err(Error::InvalidElement(format!(
                "expected {} bytes for a ring element, got {}",
                self.byte_length(),
                bytes.len()
            )));
        }
        let inner = match self {
            PRing::Field(f) => RingValue::Residue(f.clone(), f.residue_from_bytes(bytes)?),
            PRing::Product(p) => {
                let mut offset = 0;
                let mut components = Vec::with_capacity(p.factors().len());
                for r in p.factors() {
                    let len = r.byte_length();
                    components.push(r.element_from_bytes(&bytes[offset..offset + len])?);
                    offset += len;
                }
                RingValue::Product(p.clone(), components)
            }
        };
        Ok(PRingElement { inner })
    }
}

impl PRingElement {
    /// The ring of this element.
    #[must_use]
    pub fn ring(&self) -> PRing {
        match &self.inner {
            RingValue::Residue(f, _) => PRing::Field(f.clone()),
            RingValue::Product(p, _) => PRing::Product(p.clone()),
        }
    }

    /// The residue of a field element.
    #[must_use]
    pub fn as_integer(&self) -> Option<&LargeInteger> {
        match &self.inner {
            RingValue::Residue(_, x) => Some(x),
            RingValue::Product(..) => None,
        }
    }

    /// The field and residue of a field element.
    pub(crate) fn residue(&self) -> Option<(&Arc<PField>, &LargeInteger)> {
        match &self.inner {
            RingValue::Residue(f, x) => Some((f, x)),
            RingValue::Product(..) => None,
        }
    }

    /// The components of a product ring element.
    #[must_use]
    pub fn components(&self) -> Option<&[PRingElement]> {
        match &self.inner {
            RingValue::Residue(..) => None,
            RingValue::Product(_, c) => Some(c),
        }
    }

    /// Number of components: one for a field element.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.components().map_or(1, <[PRingElement]>::len)
    }

    /// Returns true if every residue is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match &self.inner {
            RingValue::Residue(_, x) => x.is_zero(),
            RingValue::Product(_, c) => c.iter().all(PRingElement::is_zero),
        }
    }

    fn zip_with(
        &self,
        other: &PRingElement,
        op: &dyn Fn(&PField, &LargeInteger, &LargeInteger) -> LargeInteger,
    ) -> Result<PRingElement, Error> {
        let inner = match (&self.inner, &other.inner) {
            (RingValue::Residue(f, x), RingValue::Residue(g, y)) if Arc::ptr_eq(f, g) || f == g => {
                RingValue::Residue(f.clone(), op(f, x, y))
            }
            (RingValue::Product(r, xs), RingValue::Product(s, ys)) if Arc::ptr_eq(r, s) || r == s => {
                let components = xs
                    .iter()
                    .zip(ys)
                    .map(|(x, y)| x.zip_with(y, op))
                    .collect::<Result<Vec<_>, _>>()?;
                RingValue::Product(r.clone(), components)
            }
            _ => {
                return Err(Error::DomainMismatch(
                    "ring elements belong to different rings".to_string(),
                ))
            }
        };
        Ok(PRingElement { inner })
    }

    /// Returns `self + other`.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if the elements belong to different rings
    pub fn add(&self, other: &PRingElement) -> Result<PRingElement, Error> {
        self.zip_with(other, &|f, x, y| f.add(x, y))
    }

    /// Returns `self - other`.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if the elements belong to different rings
    pub fn sub(&self, other: &PRingElement) -> Result<PRingElement, Error> {
        self.zip_with(other, &|f, x, y| f.sub(x, y))
    }

    /// Returns `self * other`.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if the elements belong to different rings
    pub fn mul(&self, other: &PRingElement) -> Result<PRingElement, Error> {
        self.zip_with(other, &|f, x, y| f.mul(x, y))
    }

    /// Returns `-self`.
    #[must_use]
    pub fn neg(&self) -> PRingElement {
        let inner = match &self.inner {
            RingValue::Residue(f, x) => RingValue::Residue(f.clone(), f.neg(x)),
            RingValue::Product(r, c) => {
                RingValue::Product(r.clone(), c.iter().map(PRingElement::neg).collect())
            }
        };
        PRingElement { inner }
    }

    /// Returns the multiplicative inverse, component-wise for products.
    ///
    /// # Errors
    ///
    /// - `NotInvertible` if some residue is not a unit
    pub fn inv(&self) -> Result<PRingElement, Error> {
        let inner = match &self.inner {
            RingValue::Residue(f, x) => RingValue::Residue(f.clone(), f.inv(x)?),
            RingValue::Product(r, c) => RingValue::Product(
                r.clone(),
                c.iter().map(PRingElement::inv).collect::<Result<Vec<_>, _>>()?,
            ),
        };
        Ok(PRingElement { inner })
    }

    /// Serializes as big-endian residues concatenated in factor order.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match &self.inner {
            RingValue::Residue(f, x) => f.residue_to_bytes(x),
            RingValue::Product(_, c) => c.iter().flat_map(PRingElement::to_bytes).collect(),
        }
    }
}
