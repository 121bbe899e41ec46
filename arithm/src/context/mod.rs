// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! A context fixes a standard group and a random number generator.

use std::sync::OnceLock;

use rand::rngs::OsRng;

use crate::fields::PRingElement;
use crate::groups::{PGroup, PGroupElement};
use crate::utils::error::Error;
use crate::utils::rng::Rng;

/// Default bound `2^-DEFAULT_STAT_DIST` on the statistical distance from
/// uniform of sampled exponents and elements.
pub const DEFAULT_STAT_DIST: usize = 50;

/**
 * A context fixes a standard [group][`crate::groups::PGroup`] and a
 * [random number generator][`crate::utils::rng`].
 *
 * The group is built on first use and shared afterwards.
 *
 * # Examples
 *
 * ```
 * use arithm::context::Context;
 * use arithm::context::ModP2048Ctx as Ctx;
 *
 * let group = Ctx::group().unwrap();
 * let x = Ctx::random_exponent().unwrap();
 * let y = Ctx::generator().unwrap().exp(&x).unwrap();
 * assert!(group.contains(&y));
 * ```
 */
pub trait Context: private::Sealed + std::fmt::Debug + PartialEq + Clone + 'static {
    /// The random number generator.
    type Rng: Rng;

    /// Name of the group, as accepted by [`PGroup::named`].
    const GROUP_NAME: &'static str;

    /// Returns the group.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if the group cannot be built
    fn group() -> Result<PGroup, Error>;

    /// Returns a random number generator.
    #[inline]
    #[must_use]
    fn get_rng() -> Self::Rng {
        Self::Rng::rng()
    }

    /// Returns the standard generator of the group.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if the group cannot be built
    #[inline]
    fn generator() -> Result<PGroupElement, Error> {
        Ok(Self::group()?.generator())
    }

    /// Returns a random group element.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if the group cannot be built
    /// - `RandomSourceError` if the generator fails
    #[inline]
    fn random_element() -> Result<PGroupElement, Error> {
        let mut rng = Self::get_rng();
        Self::group()?.random_element(&mut rng, DEFAULT_STAT_DIST)
    }

    /// Returns a random exponent.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if the group cannot be built
    /// - `RandomSourceError` if the generator fails
    #[inline]
    fn random_exponent() -> Result<PRingElement, Error> {
        let mut rng = Self::get_rng();
        Self::group()?.pring().random_element(&mut rng, DEFAULT_STAT_DIST)
    }
}

/// Returns the group cached in `cell`, building it from `name` on first use.
fn cached(cell: &'static OnceLock<PGroup>, name: &str) -> Result<PGroup, Error> {
    if let Some(group) = cell.get() {
        return Ok(group.clone());
    }
    let group = PGroup::named(name)?;
    Ok(cell.get_or_init(|| group).clone())
}

/**
 * Defines the P-256 context.
 *
 * Sets
 * - `P-256` as the underlying group.
 * - `OsRng` as the random number generator.
 */
#[cfg(feature = "ecq")]
#[derive(Debug, PartialEq, Clone, Hash)]
pub struct P256Ctx;

#[cfg(feature = "ecq")]
impl Context for P256Ctx {
    type Rng = OsRng;
    const GROUP_NAME: &'static str = "P-256";

    fn group() -> Result<PGroup, Error> {
        static GROUP: OnceLock<PGroup> = OnceLock::new();
        cached(&GROUP, Self::GROUP_NAME)
    }
}

/**
 * Defines the secp256k1 context.
 *
 * Sets
 * - `secp256k1` as the underlying group.
 * - `OsRng` as the random number generator.
 */
#[cfg(feature = "ecq")]
#[derive(Debug, PartialEq, Clone, Hash)]
pub struct Secp256k1Ctx;

#[cfg(feature = "ecq")]
impl Context for Secp256k1Ctx {
    type Rng = OsRng;
    const GROUP_NAME: &'static str = "secp256k1";

    fn group() -> Result<PGroup, Error> {
        static GROUP: OnceLock<PGroup> = OnceLock::new();
        cached(&GROUP, Self::GROUP_NAME)
    }
}

/**
 * Defines the 2048-bit modular context.
 *
 * Sets
 * - the RFC 3526 2048-bit safe prime group as the underlying group.
 * - `OsRng` as the random number generator.
 */
#[derive(Debug, PartialEq, Clone, Hash)]
pub struct ModP2048Ctx;

impl Context for ModP2048Ctx {
    type Rng = OsRng;
    const GROUP_NAME: &'static str = "modp2048";

    fn group() -> Result<PGroup, Error> {
        static GROUP: OnceLock<PGroup> = OnceLock::new();
        cached(&GROUP, Self::GROUP_NAME)
    }
}

/// Seals the [Context] trait to prevent external implementations.
mod private {
    /// Sealed traits implement this.
    #[allow(unnameable_types)]
    pub trait Sealed {}
}

#[cfg(feature = "ecq")]
impl private::Sealed for P256Ctx {}
#[cfg(feature = "ecq")]
impl private::Sealed for Secp256k1Ctx {}
impl private::Sealed for ModP2048Ctx {}
