// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Elements of [`PGroup`]s

use std::sync::Arc;

#[cfg(feature = "ecq")]
use crate::groups::ecq::{ECqPGroup, EcPoint};
use crate::fields::PRingElement;
use crate::groups::modp::ModPGroup;
use crate::groups::productgroup::PPGroup;
use crate::groups::PGroup;
use crate::largeinteger::LargeInteger;
use crate::traits::groups::PrimeOrderGroup;
use crate::utils::error::Error;

/**
 * An element of a [`PGroup`].
 *
 * Holds a handle to its group together with the raw value, so an element can
 * never be paired with a group it does not belong to. Elements are immutable;
 * every operation returns a new one. Operations between elements of different
 * groups fail with [`Error::DomainMismatch`].
 *
 * Equality compares the group first, then the value.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PGroupElement {
    pub(super) inner: GroupValue,
}

#[derive(Debug, Clone)]
pub(super) enum GroupValue {
    ModP(Arc<ModPGroup>, LargeInteger),
    #[cfg(feature = "ecq")]
    Ecq(Arc<ECqPGroup>, EcPoint),
    Product(Arc<PPGroup>, Vec<PGroupElement>),
}

/// Descriptor equality with a pointer comparison fast path.
pub(super) fn same<G: PartialEq>(a: &Arc<G>, b: &Arc<G>) -> bool {
    Arc::ptr_eq(a, b) || a == b
}

fn mismatch() -> Error {
    Error::DomainMismatch("elements belong to different groups".to_string())
}

impl PartialEq for GroupValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (GroupValue::ModP(g, x), GroupValue::ModP(h, y)) => same(g, h) && x == y,
            #[cfg(feature = "ecq")]
            (GroupValue::Ecq(g, x), GroupValue::Ecq(h, y)) => same(g, h) && x == y,
            (GroupValue::Product(g, xs), GroupValue::Product(h, ys)) => same(g, h) && xs == ys,
            _ => false,
        }
    }
}

impl Eq for GroupValue {}

impl PGroupElement {
    /// The group of this element.
    #[must_use]
    pub fn group(&self) -> PGroup {
        match &self.inner {
            GroupValue::ModP(g, _) => PGroup::ModP(g.clone()),
            #[cfg(feature = "ecq")]
            GroupValue::Ecq(g, _) => PGroup::Ecq(g.clone()),
            GroupValue::Product(p, _) => PGroup::Product(p.clone()),
        }
    }

    /// The residue of a modular group element.
    #[must_use]
    pub fn as_residue(&self) -> Option<&LargeInteger> {
        match &self.inner {
            GroupValue::ModP(_, x) => Some(x),
            _ => None,
        }
    }

    /// The point of an elliptic curve group element.
    #[cfg(feature = "ecq")]
    #[must_use]
    pub fn as_point(&self) -> Option<&EcPoint> {
        match &self.inner {
            GroupValue::Ecq(_, x) => Some(x),
            _ => None,
        }
    }

    /// The components of a product group element.
    #[must_use]
    pub fn components(&self) -> Option<&[PGroupElement]> {
        match &self.inner {
            GroupValue::Product(_, c) => Some(c),
            _ => None,
        }
    }

    /// Number of components: one for an atomic group element.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.components().map_or(1, <[PGroupElement]>::len)
    }

    /// Returns true if this is the neutral element.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        match &self.inner {
            GroupValue::ModP(_, x) => x.is_one(),
            #[cfg(feature = "ecq")]
            GroupValue::Ecq(_, x) => *x == EcPoint::Infinity,
            GroupValue::Product(_, c) => c.iter().all(PGroupElement::is_identity),
        }
    }

    /// Returns `self * other`.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if the elements belong to different groups
    pub fn mul(&self, other: &PGroupElement) -> Result<PGroupElement, Error> {
        let inner = match (&self.inner, &other.inner) {
            (GroupValue::ModP(g, x), GroupValue::ModP(h, y)) if same(g, h) => {
                GroupValue::ModP(g.clone(), g.operate_values(x, y))
            }
            #[cfg(feature = "ecq")]
            (GroupValue::Ecq(g, x), GroupValue::Ecq(h, y)) if same(g, h) => {
                GroupValue::Ecq(g.clone(), g.operate_values(x, y))
            }
            (GroupValue::Product(g, xs), GroupValue::Product(h, ys)) if same(g, h) => {
                let components = xs
                    .iter()
                    .zip(ys)
                    .map(|(x, y)| x.mul(y))
                    .collect::<Result<Vec<_>, _>>()?;
                GroupValue::Product(g.clone(), components)
            }
            _ => return Err(mismatch()),
        };
        Ok(PGroupElement { inner })
    }

    /// Returns the inverse.
    ///
    /// # Errors
    ///
    /// - `NotInvertible` if the group fails to invert a value, which does not
    ///   happen for members
    pub fn inv(&self) -> Result<PGroupElement, Error> {
        let inner = match &self.inner {
            GroupValue::ModP(g, x) => GroupValue::ModP(g.clone(), g.invert_value(x)?),
            #[cfg(feature = "ecq")]
            GroupValue::Ecq(g, x) => GroupValue::Ecq(g.clone(), g.invert_value(x)?),
            GroupValue::Product(g, c) => GroupValue::Product(
                g.clone(),
                c.iter().map(PGroupElement::inv).collect::<Result<Vec<_>, _>>()?,
            ),
        };
        Ok(PGroupElement { inner })
    }

    /**
     * Raises this element to the exponent `e`.
     *
     * An atomic group element takes an exponent from its own field. A product
     * group element takes either a field element, applied to every component,
     * or a product ring element of the same arity, applied component-wise.
     *
     * # Errors
     *
     * - `DomainMismatch` if the exponent belongs to a different ring
     * - `ArityMismatch` if a product exponent has the wrong number of components
     */
    pub fn exp(&self, e: &PRingElement) -> Result<PGroupElement, Error> {
        let inner = match (&self.inner, e.components()) {
            (GroupValue::Product(g, xs), Some(es)) => {
                if xs.len() != es.len() {
                    return Err(Error::ArityMismatch {
                        expected: xs.len(),
                        actual: es.len(),
                    });
                }
                let components = xs
                    .iter()
                    .zip(es)
                    .map(|(x, e)| x.exp(e))
                    .collect::<Result<Vec<_>, _>>()?;
                GroupValue::Product(g.clone(), components)
            }
            (GroupValue::Product(g, xs), None) => GroupValue::Product(
                g.clone(),
                xs.iter().map(|x| x.exp(e)).collect::<Result<Vec<_>, _>>()?,
            ),
            (_, Some(es)) => {
                return Err(Error::ArityMismatch {
                    expected: 1,
                    actual: es.len(),
                })
            }
            (GroupValue::ModP(g, x), None) => {
                GroupValue::ModP(g.clone(), g.exp_value(x, residue_in(g.as_ref(), e)?))
            }
            #[cfg(feature = "ecq")]
            (GroupValue::Ecq(g, x), None) => {
                GroupValue::Ecq(g.clone(), g.exp_value(x, residue_in(g.as_ref(), e)?))
            }
        };
        Ok(PGroupElement { inner })
    }

    /// Raises this element to an integer exponent, reduced modulo the order
    /// of each atomic component. Negative exponents are allowed.
    #[must_use]
    pub fn exp_int(&self, e: &LargeInteger) -> PGroupElement {
        let inner = match &self.inner {
            GroupValue::ModP(g, x) => GroupValue::ModP(g.clone(), g.exp_value(x, &e.modulo(g.order()))),
            #[cfg(feature = "ecq")]
            GroupValue::Ecq(g, x) => GroupValue::Ecq(g.clone(), g.exp_value(x, &e.modulo(g.order()))),
            GroupValue::Product(g, c) => {
                GroupValue::Product(g.clone(), c.iter().map(|x| x.exp_int(e)).collect())
            }
        };
        PGroupElement { inner }
    }

    /// Serializes as [`PGroup::byte_length`] bytes; product elements are the
    /// concatenation of their components.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        match &self.inner {
            GroupValue::ModP(g, x) => g.value_to_bytes(x),
            #[cfg(feature = "ecq")]
            GroupValue::Ecq(g, x) => g.value_to_bytes(x),
            GroupValue::Product(_, c) => c.iter().flat_map(PGroupElement::to_bytes).collect(),
        }
    }

    /// Recovers the byte string embedded in this element by [`PGroup::encode`].
    ///
    /// # Errors
    ///
    /// - `InvalidElement` if this element is not an embedding
    /// - `InvalidParameters` if the group does not support embedding
    pub fn decode(&self) -> Result<Vec<u8>, Error> {
        match &self.inner {
            GroupValue::ModP(g, x) => g.decode_value(x),
            #[cfg(feature = "ecq")]
            GroupValue::Ecq(g, x) => g.decode_value(x),
            GroupValue::Product(_, c) => {
                let mut out = vec![];
                for x in c {
                    out.extend(x.decode()?);
                }
                Ok(out)
            }
        }
    }
}

/// The residue of `e`, which must belong to the field of `group`.
fn residue_in<'a, G: PrimeOrderGroup>(
    group: &G,
    e: &'a PRingElement,
) -> Result<&'a LargeInteger, Error> {
    match e.residue() {
        Some((f, x)) if same(f, group.field()) => Ok(x),
        _ => Err(Error::DomainMismatch(
            "exponent does not belong to the field of the group".to_string(),
        )),
    }
}
