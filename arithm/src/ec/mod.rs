// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Short Weierstrass curve arithmetic in Jacobian coordinates.
//!
//! Points on `y^2 = x^3 + ax + b mod p` are kept as `(X, Y, Z)` standing for
//! the affine point `(X / Z^2, Y / Z^3)`; `Z = 0` is the point at infinity.
//! Coordinates are non-negative [`Sli`] values in `[0, p)` with a capacity of
//! one digit more than `p`, fixed when the [`Curve`] is set up.
//!
//! Every operation takes a [`Scratch`] of temporaries sized for the curve.
//! Scratch space is owned by the caller and reused across calls; nothing in
//! this module allocates except [`to_affine`] and the constructors.
//!
//! Doubling is `dbl-2007-bl` style with a general `a`, addition is
//! `add-1998-cmo-2`. Addition of the identity, of a point to itself and of a
//! point to its negation are handled before the generic formula is reached.

use std::cmp::Ordering;

use crate::li::{self, Digit};
use crate::sli::{self, Sli};

/// Number of temporaries in a [`Scratch`].
const TEMPS: usize = 8;

/**
 * Curve parameters in the representation used by the point arithmetic.
 */
#[derive(Debug, Clone)]
pub struct Curve {
    modulus: Sli,
    a: Sli,
    b: Sli,
    p_minus_2: Sli,
    n: usize,
}

impl Curve {
    /// Sets up the curve `y^2 = x^3 + ax + b` over the prime field of order `modulus`.
    ///
    /// `a` and `b` must already be reduced into `[0, modulus)`.
    #[must_use]
    pub fn new(modulus: &Sli, a: &Sli, b: &Sli) -> Curve {
        let n = modulus.msdigits();
        let modulus = modulus.resized(n + 1);
        let mut p_minus_2 = Sli::new(n + 1);
        li::sub(&mut p_minus_2.value, &modulus.value, &[2]);
        p_minus_2.normalize();
        Curve {
            a: a.resized(n + 1),
            b: b.resized(n + 1),
            modulus,
            p_minus_2,
            n,
        }
    }

    /// A zero coordinate with the capacity used by this curve.
    #[must_use]
    pub fn coordinate(&self) -> Sli {
        Sli::new(self.n + 1)
    }

    /// The field modulus.
    #[must_use]
    pub fn modulus(&self) -> &Sli {
        &self.modulus
    }
}

/**
 * A point in Jacobian coordinates.
 */
#[derive(Debug, Clone)]
pub struct JacobianPoint {
    /// `X`
    pub x: Sli,
    /// `Y`
    pub y: Sli,
    /// `Z`, zero for the point at infinity
    pub z: Sli,
}

impl JacobianPoint {
    /// The point at infinity on `curve`.
    #[must_use]
    pub fn infinity(curve: &Curve) -> JacobianPoint {
        let mut p = JacobianPoint {
            x: curve.coordinate(),
            y: curve.coordinate(),
            z: curve.coordinate(),
        };
        p.set_infinity();
        p
    }

    /// Returns true if this is the point at infinity.
    #[inline]
    #[must_use]
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// Sets this point to infinity, represented as `(1, 1, 0)`.
    pub fn set_infinity(&mut self) {
        li::set_digit(&mut self.x.value, 1);
        li::set_digit(&mut self.y.value, 1);
        li::set_zero(&mut self.z.value);
        self.x.normalize();
        self.y.normalize();
        self.z.normalize();
    }

    /// Sets this point to `other`.
    pub fn set(&mut self, other: &JacobianPoint) {
        sli::set(&mut self.x, &other.x);
        sli::set(&mut self.y, &other.y);
        sli::set(&mut self.z, &other.z);
    }
}

#[derive(Debug)]
struct FieldScratch {
    prod: Vec<Digit>,
    quot: Vec<Digit>,
}

/**
 * Temporaries for point arithmetic on one curve.
 *
 * A scratch belongs to a single top-level operation; values left in it
 * between calls are garbage.
 */
#[derive(Debug)]
pub struct Scratch {
    fs: FieldScratch,
    t: [Sli; TEMPS],
}

impl Scratch {
    /// Allocates scratch space sized for `curve`.
    #[must_use]
    pub fn new(curve: &Curve) -> Scratch {
        Scratch {
            fs: FieldScratch {
                prod: vec![0; 2 * curve.n + 2],
                quot: vec![0; curve.n + 2],
            },
            t: std::array::from_fn(|_| curve.coordinate()),
        }
    }
}

/// Sets `w = fs.prod mod p`.
#[inline]
fn reduce_product(c: &Curve, fs: &mut FieldScratch, w: &mut Sli) {
    li::div_qr(&mut fs.quot, &mut fs.prod, &c.modulus.value);
    li::copy(&mut w.value, &fs.prod);
    w.normalize();
}

/// Sets `w = x * y mod p`.
fn mod_mul(c: &Curve, fs: &mut FieldScratch, w: &mut Sli, x: &Sli, y: &Sli) {
    li::mul(&mut fs.prod, &x.value, &y.value);
    reduce_product(c, fs, w);
}

/// Sets `w = x^2 mod p`.
fn mod_sqr(c: &Curve, fs: &mut FieldScratch, w: &mut Sli, x: &Sli) {
    li::square(&mut fs.prod, &x.value);
    reduce_product(c, fs, w);
}

/// Subtracts `p` once if `w >= p`.
#[inline]
fn reduce_once(c: &Curve, w: &mut Sli) {
    if li::cmp(&w.value, &c.modulus.value) != Ordering::Less {
        li::sub_assign(&mut w.value, &c.modulus.value);
    }
    w.normalize();
}

/// Sets `w = w + y mod p`.
fn mod_add_assign(c: &Curve, w: &mut Sli, y: &Sli) {
    li::add_assign(&mut w.value, &y.value);
    reduce_once(c, w);
}

/// Sets `w = w - y mod p`.
fn mod_sub_assign(c: &Curve, w: &mut Sli, y: &Sli) {
    if li::cmp(&w.value, &y.value) == Ordering::Less {
        li::add_assign(&mut w.value, &c.modulus.value);
    }
    li::sub_assign(&mut w.value, &y.value);
    w.normalize();
}

/// Sets `w = 2w mod p`.
fn mod_double(c: &Curve, w: &mut Sli) {
    li::shift_left(&mut w.value, 1);
    reduce_once(c, w);
}

/// Sets `p = 2p`.
pub fn jdouble(c: &Curve, s: &mut Scratch, p: &mut JacobianPoint) {
    if p.is_infinity() {
        return;
    }
    // points of order two
    if p.y.is_zero() {
        p.set_infinity();
        return;
    }
    let Scratch { fs, t } = s;
    let [t1, t2, t3, t4, t5, t6, ..] = t;

    // S = 4XY^2
    mod_sqr(c, fs, t1, &p.y);
    mod_mul(c, fs, t2, &p.x, t1);
    mod_double(c, t2);
    mod_double(c, t2);

    // M = 3X^2 + aZ^4
    mod_sqr(c, fs, t3, &p.x);
    sli::set(t4, t3);
    mod_double(c, t4);
    mod_add_assign(c, t4, t3);
    if !c.a.is_zero() {
        mod_sqr(c, fs, t3, &p.z);
        mod_sqr(c, fs, t5, t3);
        mod_mul(c, fs, t3, t5, &c.a);
        mod_add_assign(c, t4, t3);
    }

    // Z3 = 2YZ
    mod_mul(c, fs, t5, &p.y, &p.z);
    mod_double(c, t5);

    // X3 = M^2 - 2S
    mod_sqr(c, fs, t3, t4);
    mod_sub_assign(c, t3, t2);
    mod_sub_assign(c, t3, t2);

    // Y3 = M(S - X3) - 8Y^4
    mod_sub_assign(c, t2, t3);
    mod_mul(c, fs, t6, t4, t2);
    mod_sqr(c, fs, t2, t1);
    mod_double(c, t2);
    mod_double(c, t2);
    mod_double(c, t2);
    mod_sub_assign(c, t6, t2);

    sli::set(&mut p.x, t3);
    sli::set(&mut p.y, t6);
    sli::set(&mut p.z, t5);
}

/// Sets `p = p + q`.
pub fn jadd(c: &Curve, s: &mut Scratch, p: &mut JacobianPoint, q: &JacobianPoint) {
    if q.is_infinity() {
        return;
    }
    if p.is_infinity() {
        p.set(q);
        return;
    }

    let (h_zero, r_zero) = {
        let Scratch { fs, t } = &mut *s;
        let [t1, t2, t3, t4, t5, t6, t7, _] = t;

        // U1 = X1 Z2^2, U2 = X2 Z1^2
        mod_sqr(c, fs, t1, &p.z);
        mod_sqr(c, fs, t2, &q.z);
        mod_mul(c, fs, t3, &p.x, t2);
        mod_mul(c, fs, t4, &q.x, t1);

        // S1 = Y1 Z2^3, S2 = Y2 Z1^3
        mod_mul(c, fs, t7, &p.y, &q.z);
        mod_mul(c, fs, t5, t7, t2);
        mod_mul(c, fs, t7, &q.y, &p.z);
        mod_mul(c, fs, t6, t7, t1);

        // H = U2 - U1, r = S2 - S1
        mod_sub_assign(c, t4, t3);
        mod_sub_assign(c, t6, t5);
        (t4.is_zero(), t6.is_zero())
    };

    if h_zero {
        if r_zero {
            jdouble(c, s, p);
        } else {
            p.set_infinity();
        }
        return;
    }

    let Scratch { fs, t } = s;
    let [t1, t2, t3, t4, t5, t6, t7, t8] = t;

    // HH = H^2, HHH = H^3, V = U1 HH
    mod_sqr(c, fs, t1, t4);
    mod_mul(c, fs, t2, t4, t1);
    mod_mul(c, fs, t7, t3, t1);

    // X3 = r^2 - HHH - 2V
    mod_sqr(c, fs, t8, t6);
    mod_sub_assign(c, t8, t2);
    mod_sub_assign(c, t8, t7);
    mod_sub_assign(c, t8, t7);

    // Y3 = r(V - X3) - S1 HHH
    mod_sub_assign(c, t7, t8);
    mod_mul(c, fs, t1, t6, t7);
    mod_mul(c, fs, t3, t5, t2);
    mod_sub_assign(c, t1, t3);

    // Z3 = Z1 Z2 H
    mod_mul(c, fs, t3, &p.z, &q.z);
    mod_mul(c, fs, t2, t3, t4);

    sli::set(&mut p.x, t8);
    sli::set(&mut p.y, t1);
    sli::set(&mut p.z, t2);
}

/// Sets `p = -p`.
pub fn jneg(c: &Curve, p: &mut JacobianPoint) {
    if p.is_infinity() || p.y.is_zero() {
        return;
    }
    li::rsub_assign(&mut p.y.value, &c.modulus.value);
    p.y.normalize();
}

/// Sets `r = k * p` for the non-negative scalar with magnitude digits `k`.
///
/// Left-to-right double-and-add over the bits of `k`.
pub fn jmul(c: &Curve, s: &mut Scratch, r: &mut JacobianPoint, p: &JacobianPoint, k: &[Digit]) {
    r.set_infinity();
    for i in (0..li::bitlength(k)).rev() {
        jdouble(c, s, r);
        if li::get_bit(k, i) {
            jadd(c, s, r, p);
        }
    }
}

/// Sets `p` to the affine point `(x, y)`.
pub fn set_affine(p: &mut JacobianPoint, x: &Sli, y: &Sli) {
    sli::set(&mut p.x, x);
    sli::set(&mut p.y, y);
    li::set_digit(&mut p.z.value, 1);
    p.z.normalize();
}

/// Affine coordinates of `p`, or `None` for the point at infinity.
///
/// `Z` is inverted once, as `Z^(p - 2)`.
#[must_use]
pub fn to_affine(c: &Curve, s: &mut Scratch, p: &JacobianPoint) -> Option<(Sli, Sli)> {
    if p.is_infinity() {
        return None;
    }
    let Scratch { fs, t } = s;
    let [t1, t2, t3, ..] = t;

    sli::modpow(t1, &p.z, &c.p_minus_2, &c.modulus);
    mod_sqr(c, fs, t2, t1);
    mod_mul(c, fs, t3, t2, t1);

    let mut x = c.coordinate();
    let mut y = c.coordinate();
    mod_mul(c, fs, &mut x, &p.x, t2);
    mod_mul(c, fs, &mut y, &p.y, t3);
    Some((x, y))
}

/// Returns true if `(x, y)` has coordinates in `[0, p)` and satisfies the curve equation.
#[must_use]
pub fn is_on_curve(c: &Curve, s: &mut Scratch, x: &Sli, y: &Sli) -> bool {
    let in_range = |v: &Sli| {
        v.sign() != sli::Sign::Negative && li::cmp(&v.value, &c.modulus.value) == Ordering::Less
    };
    if !in_range(x) || !in_range(y) {
        return false;
    }
    let Scratch { fs, t } = s;
    let [t1, t2, t3, t4, ..] = t;

    // y^2
    mod_sqr(c, fs, t1, y);

    // x^3 + ax + b
    mod_sqr(c, fs, t2, x);
    mod_mul(c, fs, t3, t2, x);
    mod_mul(c, fs, t4, &c.a, x);
    mod_add_assign(c, t3, t4);
    mod_add_assign(c, t3, &c.b);

    li::cmp(&t1.value, &t3.value) == Ordering::Equal
}
