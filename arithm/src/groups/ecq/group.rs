// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! [`PrimeOrderGroup`] implementation over short Weierstrass curves

use std::sync::{Arc, Mutex, TryLockError};

use tracing::{debug, instrument, trace};

use crate::ec::{self, Curve, JacobianPoint, Scratch};
use crate::fields::PField;
use crate::groups::ecq::curves::CurveName;
use crate::largeinteger::{LargeInteger, DEFAULT_CERTAINTY};
use crate::sli::{self, Sli};
use crate::traits::groups::PrimeOrderGroup;
use crate::utils::error::Error;
use crate::utils::rng::HashPrg;

/// Explicit parameters of a curve group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveParams {
    /// Prime `p` of the coordinate field
    pub modulus: LargeInteger,
    /// Coefficient `a` of `y^2 = x^3 + ax + b`
    pub a: LargeInteger,
    /// Coefficient `b` of `y^2 = x^3 + ax + b`
    pub b: LargeInteger,
    /// `x` coordinate of the base point
    pub gx: LargeInteger,
    /// `y` coordinate of the base point
    pub gy: LargeInteger,
    /// Prime order of the base point
    pub order: LargeInteger,
    /// Number of points on the curve divided by `order`
    pub cofactor: LargeInteger,
}

/**
 * A point in affine coordinates, or the point at infinity.
 */
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EcPoint {
    /// The neutral element
    Infinity,
    /// A finite point
    Affine {
        /// `x` coordinate in `[0, p)`
        x: LargeInteger,
        /// `y` coordinate in `[0, p)`
        y: LargeInteger,
    },
}

/**
 * The subgroup of prime order generated by a base point of an elliptic curve
 * `y^2 = x^3 + ax + b` over the field of integers modulo a prime.
 *
 * Points are serialized in SEC1 uncompressed form `0x04 || X || Y`, with each
 * coordinate as `ceil(bitlen(p) / 8)` big-endian bytes. The point at infinity
 * is the all zero string of the same length.
 *
 * On curves with cofactor one, byte strings are embedded by searching for a
 * point with `x = int(0x01 || data || counter)` for a one byte counter; `y` is
 * the smaller of the two square roots. At most `floor((bitlen(p) - 1) / 8) - 2`
 * bytes fit.
 *
 * # Examples
 *
 * ```
 * use arithm::groups::ecq::{CurveName, ECqPGroup};
 * use arithm::traits::groups::PrimeOrderGroup;
 *
 * let group = ECqPGroup::named(CurveName::P256).unwrap();
 * let point = group.encode_value(b"hello").unwrap();
 * assert!(group.is_member(&point));
 * assert_eq!(group.decode_value(&point).unwrap(), b"hello");
 * ```
 */
#[derive(Debug)]
pub struct ECqPGroup {
    curve: Curve,
    // reused by every point operation on this descriptor
    scratch: Mutex<Scratch>,
    params: CurveParams,
    generator: EcPoint,
    field: Arc<PField>,
    coordinate_length: usize,
    encode_length: usize,
    name: Option<CurveName>,
}

impl ECqPGroup {
    /**
     * Creates the group of the given curve and base point.
     *
     * Both primes are checked with [`DEFAULT_CERTAINTY`] rounds of
     * Miller-Rabin, with witnesses from a [`HashPrg`] seeded with the
     * parameters.
     *
     * # Errors
     *
     * - `InvalidParameters` if a prime is composite, the curve is singular,
     *   the base point is not on the curve or does not have the given order,
     *   or the number of points `order * cofactor` violates the Hasse bound
     */
    #[instrument(level = "debug", skip_all, fields(bits = params.modulus.bitlength()))]
    pub fn new(params: CurveParams) -> Result<Self, Error> {
        let p = &params.modulus;
        if p <= &LargeInteger::from(3u32) {
            return Err(Error::InvalidParameters(format!("field prime {p} is too small")));
        }
        if !params.cofactor.is_positive() {
            return Err(Error::InvalidParameters("cofactor must be positive".to_string()));
        }

        let mut seed = p.to_unsigned_bytes();
        seed.extend(params.order.to_unsigned_bytes());
        let mut prg = HashPrg::new(&seed);
        if !p.is_probable_prime(DEFAULT_CERTAINTY, &mut prg)? {
            return Err(Error::InvalidParameters("field prime is composite".to_string()));
        }
        if !params.order.is_probable_prime(DEFAULT_CERTAINTY, &mut prg)? {
            return Err(Error::InvalidParameters("group order is composite".to_string()));
        }

        // 4a^3 + 27b^2 != 0 mod p
        let a3 = params.a.square().mul(&params.a);
        let b2 = params.b.square();
        let discriminant = LargeInteger::from(4u32)
            .mul(&a3)
            .add(&LargeInteger::from(27u32).mul(&b2))
            .modulo(p);
        if discriminant.is_zero() {
            return Err(Error::InvalidParameters("curve is singular".to_string()));
        }

        // |order * cofactor - (p + 1)| <= 2 sqrt(p)
        let t = params
            .order
            .mul(&params.cofactor)
            .sub(&p.add(&LargeInteger::one()));
        if t.square() > p.shift_left(2) {
            return Err(Error::InvalidParameters(
                "number of points violates the Hasse bound".to_string(),
            ));
        }

        let group = Self::build(params, None)?;
        if !group.is_torsion_free(&group.generator) {
            return Err(Error::InvalidParameters(
                "base point does not have the given order".to_string(),
            ));
        }

        debug!(encode_length = group.encode_length, "validated curve group");
        Ok(group)
    }

    /// Creates the group of a standard curve. Its parameters are trusted,
    /// except that the base point must lie on the curve.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if the stored base point is not on the curve
    pub fn named(name: CurveName) -> Result<Self, Error> {
        Self::build(name.params()?, Some(name))
    }

    fn build(params: CurveParams, name: Option<CurveName>) -> Result<Self, Error> {
        let p = &params.modulus;
        if params.a.is_negative() || &params.a >= p || params.b.is_negative() || &params.b >= p {
            return Err(Error::InvalidParameters(
                "curve coefficients are not reduced".to_string(),
            ));
        }
        let curve = Curve::new(p.as_sli(), params.a.as_sli(), params.b.as_sli());
        let generator = EcPoint::Affine {
            x: params.gx.clone(),
            y: params.gy.clone(),
        };

        let bits = p.bitlength();
        let encode_length = if params.cofactor.is_one() {
            ((bits - 1) / 8).saturating_sub(2)
        } else {
            0
        };

        let group = ECqPGroup {
            field: Arc::new(PField::new(params.order.clone())?),
            scratch: Mutex::new(Scratch::new(&curve)),
            coordinate_length: bits.div_ceil(8),
            curve,
            params,
            generator,
            encode_length,
            name,
        };
        if !group.is_on_curve(&group.params.gx, &group.params.gy) {
            return Err(Error::InvalidParameters(
                "base point is not on the curve".to_string(),
            ));
        }
        Ok(group)
    }

    /// The curve and base point parameters.
    #[inline]
    #[must_use]
    pub fn params(&self) -> &CurveParams {
        &self.params
    }

    /// The prime of the coordinate field.
    #[inline]
    #[must_use]
    pub fn modulus(&self) -> &LargeInteger {
        &self.params.modulus
    }

    /// The cofactor.
    #[inline]
    #[must_use]
    pub fn cofactor(&self) -> &LargeInteger {
        &self.params.cofactor
    }

    /// The standard name, for named curves.
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<CurveName> {
        self.name
    }

    /// Returns true if `(x, y)` is in range and satisfies the curve equation.
    #[must_use]
    pub fn is_on_curve(&self, x: &LargeInteger, y: &LargeInteger) -> bool {
        if !self.in_field(x) || !self.in_field(y) {
            return false;
        }
        let (x, y) = (self.coordinate(x), self.coordinate(y));
        self.with_scratch(|s| ec::is_on_curve(&self.curve, s, &x, &y))
    }

    /**
     * Runs `f` with this group's scratch space.
     *
     * Callers on other threads that find the scratch busy get a fresh one
     * rather than waiting. The contents are garbage between calls, so a
     * poisoned lock is still usable.
     */
    fn with_scratch<T>(&self, f: impl FnOnce(&mut Scratch) -> T) -> T {
        match self.scratch.try_lock() {
            Ok(mut s) => f(&mut *s),
            Err(TryLockError::Poisoned(poisoned)) => f(&mut *poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => f(&mut Scratch::new(&self.curve)),
        }
    }

    fn in_field(&self, v: &LargeInteger) -> bool {
        !v.is_negative() && v < &self.params.modulus
    }

    // v must be in [0, p)
    fn coordinate(&self, v: &LargeInteger) -> Sli {
        let mut c = self.curve.coordinate();
        sli::set(&mut c, v.as_sli());
        c
    }

    fn to_jacobian(&self, a: &EcPoint) -> JacobianPoint {
        let mut j = JacobianPoint::infinity(&self.curve);
        if let EcPoint::Affine { x, y } = a {
            ec::set_affine(&mut j, &self.coordinate(x), &self.coordinate(y));
        }
        j
    }

    fn to_affine(&self, s: &mut Scratch, j: &JacobianPoint) -> EcPoint {
        match ec::to_affine(&self.curve, s, j) {
            None => EcPoint::Infinity,
            Some((x, y)) => EcPoint::Affine {
                x: LargeInteger::from_sli(x),
                y: LargeInteger::from_sli(y),
            },
        }
    }

    /// Returns true if `order * a` is the point at infinity.
    fn is_torsion_free(&self, a: &EcPoint) -> bool {
        let j = self.to_jacobian(a);
        let mut r = JacobianPoint::infinity(&self.curve);
        self.with_scratch(|s| {
            ec::jmul(&self.curve, s, &mut r, &j, self.params.order.as_sli().digits());
        });
        r.is_infinity()
    }

    /// `x^3 + ax + b mod p`.
    fn rhs(&self, x: &LargeInteger) -> LargeInteger {
        let p = &self.params.modulus;
        x.square()
            .mul(x)
            .add(&self.params.a.mul(x))
            .add(&self.params.b)
            .modulo(p)
    }
}

impl Clone for ECqPGroup {
    fn clone(&self) -> Self {
        ECqPGroup {
            curve: self.curve.clone(),
            scratch: Mutex::new(Scratch::new(&self.curve)),
            params: self.params.clone(),
            generator: self.generator.clone(),
            field: Arc::clone(&self.field),
            coordinate_length: self.coordinate_length,
            encode_length: self.encode_length,
            name: self.name,
        }
    }
}

impl PartialEq for ECqPGroup {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
    }
}

impl Eq for ECqPGroup {}

impl PrimeOrderGroup for ECqPGroup {
    type Value = EcPoint;

    fn order(&self) -> &LargeInteger {
        &self.params.order
    }

    fn field(&self) -> &Arc<PField> {
        &self.field
    }

    fn identity_value(&self) -> EcPoint {
        EcPoint::Infinity
    }

    fn generator_value(&self) -> EcPoint {
        self.generator.clone()
    }

    fn operate_values(&self, a: &EcPoint, b: &EcPoint) -> EcPoint {
        match (a, b) {
            (EcPoint::Infinity, _) => b.clone(),
            (_, EcPoint::Infinity) => a.clone(),
            _ => {
                let mut r = self.to_jacobian(a);
                let q = self.to_jacobian(b);
                self.with_scratch(|s| {
                    ec::jadd(&self.curve, s, &mut r, &q);
                    self.to_affine(s, &r)
                })
            }
        }
    }

    fn invert_value(&self, a: &EcPoint) -> Result<EcPoint, Error> {
        Ok(match a {
            EcPoint::Infinity => EcPoint::Infinity,
            EcPoint::Affine { x, y } => EcPoint::Affine {
                x: x.clone(),
                y: if y.is_zero() {
                    y.clone()
                } else {
                    self.params.modulus.sub(y)
                },
            },
        })
    }

    fn exp_value(&self, a: &EcPoint, e: &LargeInteger) -> EcPoint {
        let j = self.to_jacobian(a);
        let mut r = JacobianPoint::infinity(&self.curve);
        self.with_scratch(|s| {
            ec::jmul(&self.curve, s, &mut r, &j, e.as_sli().digits());
            self.to_affine(s, &r)
        })
    }

    fn is_member(&self, a: &EcPoint) -> bool {
        match a {
            EcPoint::Infinity => true,
            EcPoint::Affine { x, y } => {
                if !self.is_on_curve(x, y) {
                    return false;
                }
                if self.params.cofactor.is_one() {
                    return true;
                }
                self.is_torsion_free(a)
            }
        }
    }

    fn byte_length(&self) -> usize {
        1 + 2 * self.coordinate_length
    }

    fn value_to_bytes(&self, a: &EcPoint) -> Vec<u8> {
        let n = self.coordinate_length;
        let mut out = vec![0u8; 1 + 2 * n];
        if let EcPoint::Affine { x, y } = a {
            out[0] = 0x04;
            let xb = x.to_unsigned_bytes();
            let yb = y.to_unsigned_bytes();
            out[1 + n - xb.len()..1 + n].copy_from_slice(&xb);
            out[1 + 2 * n - yb.len()..].copy_from_slice(&yb);
        }
        out
    }

    fn value_from_bytes(&self, bytes: &[u8]) -> Result<EcPoint, Error> {
        let n = self.coordinate_length;
        if bytes.len() != 1 + 2 * n {
            return Err(Error::InvalidElement(format!(
                "expected {} bytes for a curve point, got {}",
                1 + 2 * n,
                bytes.len()
            )));
        }
        if bytes.iter().all(|b| *b == 0) {
            return Ok(EcPoint::Infinity);
        }
        if bytes[0] != 0x04 {
            return Err(Error::InvalidElement(format!(
                "unsupported point format {:#04x}",
                bytes[0]
            )));
        }
        let x = LargeInteger::from_unsigned_bytes(&bytes[1..=n]);
        let y = LargeInteger::from_unsigned_bytes(&bytes[1 + n..]);
        if !self.is_on_curve(&x, &y) {
            return Err(Error::InvalidElement("point is not on the curve".to_string()));
        }
        let point = EcPoint::Affine { x, y };
        if !self.params.cofactor.is_one() {
            if !self.is_torsion_free(&point) {
                return Err(Error::InvalidElement(
                    "point is not in the prime order subgroup".to_string(),
                ));
            }
        }
        Ok(point)
    }

    fn encode_length(&self) -> usize {
        self.encode_length
    }

    #[instrument(level = "trace", skip_all, fields(len = bytes.len()))]
    fn encode_value(&self, bytes: &[u8]) -> Result<EcPoint, Error> {
        if !self.params.cofactor.is_one() {
            return Err(Error::InvalidParameters(
                "embedding needs a curve with cofactor one".to_string(),
            ));
        }
        if bytes.len() > self.encode_length {
            return Err(Error::EncodingTooLarge {
                length: bytes.len(),
                max: self.encode_length,
            });
        }
        let p = &self.params.modulus;
        let mut candidate = Vec::with_capacity(bytes.len() + 2);
        candidate.push(0x01);
        candidate.extend_from_slice(bytes);
        candidate.push(0x00);

        for counter in 0..=u8::MAX {
            if let Some(last) = candidate.last_mut() {
                *last = counter;
            }
            let x = LargeInteger::from_unsigned_bytes(&candidate);
            if let Some(root) = self.rhs(&x).mod_sqrt(p) {
                trace!(counter, "found a point");
                let other = p.sub(&root).modulo(p);
                let y = if other < root { other } else { root };
                return Ok(EcPoint::Affine { x, y });
            }
        }
        Err(Error::InvalidParameters(
            "no curve point found for the input".to_string(),
        ))
    }

    fn decode_value(&self, a: &EcPoint) -> Result<Vec<u8>, Error> {
        let EcPoint::Affine { x, .. } = a else {
            return Err(Error::InvalidElement(
                "the point at infinity embeds no byte string".to_string(),
            ));
        };
        let bytes = x.to_unsigned_bytes();
        match bytes.as_slice() {
            [0x01, data @ .., _] if data.len() <= self.encode_length => Ok(data.to_vec()),
            _ => Err(Error::InvalidElement(
                "point is not the embedding of a byte string".to_string(),
            )),
        }
    }
}
