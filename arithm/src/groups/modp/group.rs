// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! [`PrimeOrderGroup`] implementation for prime order subgroups of `Z_p^*`

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::fields::PField;
use crate::groups::modp::params::ModPGroupName;
use crate::largeinteger::{LargeInteger, DEFAULT_CERTAINTY};
use crate::traits::groups::PrimeOrderGroup;
use crate::utils::error::Error;
use crate::utils::rng::HashPrg;

/**
 * The subgroup of order `q` of the multiplicative group modulo a prime `p`.
 *
 * Elements are residues in `(0, p)` whose `q`-th power is one. They are
 * serialized as `ceil(bitlen(p) / 8)` big-endian bytes.
 *
 * Byte strings can be embedded only when `p` is a safe prime congruent to 3
 * modulo 4 and `q = (p - 1) / 2`. The map sends `data` to `m = int(0x01 || data)`
 * if `m` is a quadratic residue and to `p - m` otherwise; at most
 * `floor((bitlen(p) - 2) / 8) - 1` bytes fit.
 *
 * # Examples
 *
 * ```
 * use arithm::groups::modp::ModPGroup;
 * use arithm::largeinteger::LargeInteger;
 * use arithm::traits::groups::PrimeOrderGroup;
 *
 * let group = ModPGroup::new(
 *     LargeInteger::from(467u32),
 *     LargeInteger::from(4u32),
 *     LargeInteger::from(233u32),
 * ).unwrap();
 * let g = group.generator_value();
 * assert!(group.exp_value(&g, group.order()).is_one());
 * ```
 */
#[derive(Debug, Clone)]
pub struct ModPGroup {
    modulus: LargeInteger,
    generator: LargeInteger,
    order: LargeInteger,
    cofactor: LargeInteger,
    field: Arc<PField>,
    byte_length: usize,
    // None when the modulus is not a safe prime
    encode_length: Option<usize>,
    name: Option<ModPGroupName>,
}

impl ModPGroup {
    /**
     * Creates the subgroup of order `order` modulo `modulus`, generated by `generator`.
     *
     * The cofactor `(modulus - 1) / order` is derived. Both primes are checked
     * with [`DEFAULT_CERTAINTY`] rounds of Miller-Rabin, drawing witnesses from
     * a [`HashPrg`] seeded with the parameters so that construction is
     * deterministic.
     *
     * # Errors
     *
     * - `InvalidParameters` if `order` does not divide `modulus - 1`, either
     *   number is composite or `generator` does not generate the subgroup
     */
    #[instrument(level = "debug", skip_all, fields(bits = modulus.bitlength()))]
    pub fn new(
        modulus: LargeInteger,
        generator: LargeInteger,
        order: LargeInteger,
    ) -> Result<Self, Error> {
        let two = LargeInteger::from(2u32);
        if modulus <= two || order < two {
            return Err(Error::InvalidParameters(format!(
                "modulus {modulus} and order {order} are too small"
            )));
        }
        let (cofactor, rem) = modulus.sub(&LargeInteger::one()).div_qr(&order);
        if !rem.is_zero() {
            return Err(Error::InvalidParameters(
                "order does not divide modulus - 1".to_string(),
            ));
        }

        let mut seed = modulus.to_unsigned_bytes();
        seed.extend(order.to_unsigned_bytes());
        let mut prg = HashPrg::new(&seed);
        if !modulus.is_probable_prime(DEFAULT_CERTAINTY, &mut prg)? {
            return Err(Error::InvalidParameters("modulus is not prime".to_string()));
        }
        if !order.is_probable_prime(DEFAULT_CERTAINTY, &mut prg)? {
            return Err(Error::InvalidParameters("order is not prime".to_string()));
        }

        let group = Self::build(modulus, generator, order, cofactor, None)?;
        debug!(encode_length = group.encode_length, "validated modular group");
        Ok(group)
    }

    /// Creates a standard group. The primality of its parameters is trusted.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if the stored parameters fail generator validation
    pub fn named(name: ModPGroupName) -> Result<Self, Error> {
        let modulus = LargeInteger::from_hex(name.modulus_hex())?;
        let order = modulus.shift_right(1);
        let generator = LargeInteger::from_u64(name.generator());
        Self::build(modulus, generator, order, LargeInteger::from(2u32), Some(name))
    }

    fn build(
        modulus: LargeInteger,
        generator: LargeInteger,
        order: LargeInteger,
        cofactor: LargeInteger,
        name: Option<ModPGroupName>,
    ) -> Result<Self, Error> {
        if generator <= LargeInteger::one() || generator >= modulus {
            return Err(Error::InvalidParameters(format!(
                "generator {generator} is out of range"
            )));
        }
        if !generator.mod_pow(&order, &modulus).is_one() {
            return Err(Error::InvalidParameters(
                "generator does not have the given order".to_string(),
            ));
        }

        let bits = modulus.bitlength();
        let encode_length = (cofactor == LargeInteger::from(2u32) && modulus.rem_digit(4) == 3)
            .then(|| ((bits - 2) / 8).saturating_sub(1));
        let field = Arc::new(PField::new(order.clone())?);

        Ok(ModPGroup {
            byte_length: bits.div_ceil(8),
            modulus,
            generator,
            order,
            cofactor,
            field,
            encode_length,
            name,
        })
    }

    /// The prime modulus `p`.
    #[inline]
    #[must_use]
    pub fn modulus(&self) -> &LargeInteger {
        &self.modulus
    }

    /// `(p - 1) / q`.
    #[inline]
    #[must_use]
    pub fn cofactor(&self) -> &LargeInteger {
        &self.cofactor
    }

    /// The standard name, for named groups.
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<ModPGroupName> {
        self.name
    }
}

impl PartialEq for ModPGroup {
    fn eq(&self, other: &Self) -> bool {
        self.modulus == other.modulus
            && self.order == other.order
            && self.generator == other.generator
    }
}

impl Eq for ModPGroup {}

impl PrimeOrderGroup for ModPGroup {
    type Value = LargeInteger;

    fn order(&self) -> &LargeInteger {
        &self.order
    }

    fn field(&self) -> &Arc<PField> {
        &self.field
    }

    fn identity_value(&self) -> LargeInteger {
        LargeInteger::one()
    }

    fn generator_value(&self) -> LargeInteger {
        self.generator.clone()
    }

    fn operate_values(&self, a: &LargeInteger, b: &LargeInteger) -> LargeInteger {
        a.mul(b).modulo(&self.modulus)
    }

    fn invert_value(&self, a: &LargeInteger) -> Result<LargeInteger, Error> {
        a.mod_inv(&self.modulus)
    }

    fn exp_value(&self, a: &LargeInteger, e: &LargeInteger) -> LargeInteger {
        a.mod_pow(e, &self.modulus)
    }

    fn is_member(&self, a: &LargeInteger) -> bool {
        a.is_positive() && a < &self.modulus && a.mod_pow(&self.order, &self.modulus).is_one()
    }

    fn byte_length(&self) -> usize {
        self.byte_length
    }

    fn value_to_bytes(&self, a: &LargeInteger) -> Vec<u8> {
        let mut out = vec![0u8; self.byte_length];
        let bytes = a.to_unsigned_bytes();
        out[self.byte_length - bytes.len()..].copy_from_slice(&bytes);
        out
    }

    fn value_from_bytes(&self, bytes: &[u8]) -> Result<LargeInteger, Error> {
        if bytes.len() != self.byte_length {
            return Err(Error::InvalidElement(format!(
                "expected {} bytes for a modular group element, got {}",
                self.byte_length,
                bytes.len()
            )));
        }
        let a = LargeInteger::from_unsigned_bytes(bytes);
        if !self.is_member(&a) {
            return Err(Error::InvalidElement(
                "residue is not in the prime order subgroup".to_string(),
            ));
        }
        Ok(a)
    }

    fn encode_length(&self) -> usize {
        self.encode_length.unwrap_or(0)
    }

    fn encode_value(&self, bytes: &[u8]) -> Result<LargeInteger, Error> {
        let Some(max) = self.encode_length else {
            return Err(Error::InvalidParameters(
                "embedding needs a safe prime modulus congruent to 3 mod 4".to_string(),
            ));
        };
        if bytes.len() > max {
            return Err(Error::EncodingTooLarge {
                length: bytes.len(),
                max,
            });
        }
        let mut prefixed = Vec::with_capacity(bytes.len() + 1);
        prefixed.push(0x01);
        prefixed.extend_from_slice(bytes);
        let m = LargeInteger::from_unsigned_bytes(&prefixed);

        if m.legendre(&self.modulus) == 1 {
            Ok(m)
        } else {
            Ok(self.modulus.sub(&m))
        }
    }

    fn decode_value(&self, a: &LargeInteger) -> Result<Vec<u8>, Error> {
        let Some(max) = self.encode_length else {
            return Err(Error::InvalidParameters(
                "embedding needs a safe prime modulus congruent to 3 mod 4".to_string(),
            ));
        };
        let m = if a <= &self.order {
            a.clone()
        } else {
            self.modulus.sub(a)
        };
        let bytes = m.to_unsigned_bytes();
        match bytes.split_first() {
            Some((0x01, data)) if data.len() <= max => Ok(data.to_vec()),
            _ => Err(Error::InvalidElement(
                "element is not the embedding of a byte string".to_string(),
            )),
        }
    }
}
