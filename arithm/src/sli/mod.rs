// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Signed multi-precision arithmetic on fixed-capacity digit vectors.
//!
//! An [`Sli`] is a [`Sign`] together with a magnitude in the [`li`][`crate::li`]
//! representation. The capacity of an `Sli` never changes inside this module;
//! callers size outputs up front exactly as for `li`, and
//! [`LargeInteger`][`crate::largeinteger::LargeInteger`] is the layer that
//! does this automatically.
//!
//! The sign is normalized after every operation: a zero magnitude always has
//! sign [`Sign::Zero`].

use std::cmp::Ordering;

use crate::li::{self, Digit, DIGIT_BITS};
use crate::utils::error::Error;

/// Sign of an [`Sli`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Strictly negative
    Negative,
    /// Zero, the only sign a zero magnitude may carry
    Zero,
    /// Strictly positive
    Positive,
}

impl Sign {
    /// The opposite sign.
    #[inline]
    #[must_use]
    pub fn negate(self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }

    /// The sign of a product of values with signs `self` and `other`.
    #[inline]
    #[must_use]
    pub fn mul(self, other: Sign) -> Sign {
        match (self, other) {
            (Sign::Zero, _) | (_, Sign::Zero) => Sign::Zero,
            (a, b) if a == b => Sign::Positive,
            _ => Sign::Negative,
        }
    }
}

/**
 * A signed integer with a fixed digit capacity.
 */
#[derive(Clone, Debug)]
pub struct Sli {
    pub(crate) sign: Sign,
    pub(crate) value: Vec<Digit>,
}

impl Sli {
    /// Returns zero with room for `capacity` digits.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Sli {
            sign: Sign::Zero,
            value: vec![0; capacity],
        }
    }

    /// Builds a value from a magnitude, negated if `negative` is set.
    #[must_use]
    pub fn from_digits(negative: bool, digits: Vec<Digit>) -> Self {
        let mut ret = Sli {
            sign: if negative { Sign::Negative } else { Sign::Positive },
            value: digits,
        };
        ret.normalize();
        ret
    }

    /// Builds `v` with room for at least `capacity` digits.
    #[must_use]
    pub fn from_i64(v: i64, capacity: usize) -> Self {
        let magnitude = v.unsigned_abs();
        let mut digits = vec![0; capacity.max(2)];
        digits[0] = magnitude as Digit;
        digits[1] = (magnitude >> DIGIT_BITS) as Digit;
        Sli::from_digits(v < 0, digits)
    }

    /// Returns one with room for `capacity` digits, which must be at least one.
    #[must_use]
    pub fn one(capacity: usize) -> Self {
        let mut ret = Sli::new(capacity);
        ret.value[0] = 1;
        ret.sign = Sign::Positive;
        ret
    }

    /// Sets the sign to [`Sign::Zero`] if the magnitude is zero.
    #[inline]
    pub fn normalize(&mut self) {
        if li::is_zero(&self.value) {
            self.sign = Sign::Zero;
        } else if self.sign == Sign::Zero {
            self.sign = Sign::Positive;
        }
    }

    /// The sign.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// The magnitude digits, including the unused capacity.
    #[inline]
    #[must_use]
    pub fn digits(&self) -> &[Digit] {
        &self.value
    }

    /// Number of digits this value can hold.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.value.len()
    }

    /// Number of significant digits of the magnitude.
    #[inline]
    #[must_use]
    pub fn msdigits(&self) -> usize {
        li::msdigits(&self.value)
    }

    /// Returns true if this is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.sign == Sign::Zero
    }

    /// Returns true if this is one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.sign == Sign::Positive && self.msdigits() == 1 && self.value[0] == 1
    }

    /// Returns true if this is even; zero is even.
    #[inline]
    #[must_use]
    pub fn is_even(&self) -> bool {
        self.value.first().map_or(true, |d| d & 1 == 0)
    }

    /// Changes the capacity to `capacity` digits; the value must still fit.
    pub fn resize(&mut self, capacity: usize) {
        debug_assert!(self.msdigits() <= capacity, "sli::resize: value does not fit");
        self.value.resize(capacity, 0);
    }

    /// Drops the capacity above the significant digits.
    pub fn trim(&mut self) {
        let n = self.msdigits();
        self.value.truncate(n);
    }

    /// A copy of this value with capacity `capacity`.
    #[must_use]
    pub fn resized(&self, capacity: usize) -> Sli {
        let mut ret = Sli::new(capacity);
        set(&mut ret, self);
        ret
    }

    /// Negates in place.
    #[inline]
    pub fn negate(&mut self) {
        self.sign = self.sign.negate();
    }

    /// Halves an even value in place.
    fn halve(&mut self) {
        debug_assert!(self.is_even(), "sli::halve: odd value");
        li::shift_right(&mut self.value, 1);
        self.normalize();
    }
}

/// Sets `w = x`.
pub fn set(w: &mut Sli, x: &Sli) {
    li::copy(&mut w.value, &x.value);
    w.sign = x.sign;
}

/// Compares `x` and `y` as signed integers.
#[must_use]
pub fn cmp(x: &Sli, y: &Sli) -> Ordering {
    match x.sign.cmp(&y.sign) {
        Ordering::Equal => match x.sign {
            Sign::Zero => Ordering::Equal,
            Sign::Positive => li::cmp(&x.value, &y.value),
            Sign::Negative => li::cmp(&y.value, &x.value),
        },
        other => other,
    }
}

/// Adds the signed value `(ysign, y)` to `w` in place.
fn add_signed_assign(w: &mut Sli, y: &[Digit], ysign: Sign) {
    if ysign == Sign::Zero {
        return;
    }
    if w.sign == Sign::Zero {
        li::copy(&mut w.value, y);
        w.sign = ysign;
        w.normalize();
        return;
    }
    if w.sign == ysign {
        li::add_assign(&mut w.value, y);
    } else {
        match li::cmp(&w.value, y) {
            Ordering::Greater => li::sub_assign(&mut w.value, y),
            Ordering::Less => {
                li::rsub_assign(&mut w.value, y);
                w.sign = ysign;
            }
            Ordering::Equal => li::set_zero(&mut w.value),
        }
    }
    w.normalize();
}

/// Sets `w = w + y`.
pub fn add_assign(w: &mut Sli, y: &Sli) {
    add_signed_assign(w, &y.value, y.sign);
}

/// Sets `w = w - y`.
pub fn sub_assign(w: &mut Sli, y: &Sli) {
    add_signed_assign(w, &y.value, y.sign.negate());
}

/// Sets `w = x + y`. `w` must hold one digit more than the longer operand.
pub fn add(w: &mut Sli, x: &Sli, y: &Sli) {
    set(w, x);
    add_assign(w, y);
}

/// Sets `w = x - y`. `w` must hold one digit more than the longer operand.
pub fn sub(w: &mut Sli, x: &Sli, y: &Sli) {
    set(w, x);
    sub_assign(w, y);
}

/// Sets `w = x * y`. `w` must hold `x.msdigits() + y.msdigits()` digits.
pub fn mul(w: &mut Sli, x: &Sli, y: &Sli) {
    li::mul(&mut w.value, &x.value, &y.value);
    w.sign = x.sign.mul(y.sign);
    w.normalize();
}

/// Sets `w = x * x`. `w` must hold `2 * x.msdigits()` digits.
pub fn square(w: &mut Sli, x: &Sli) {
    li::square(&mut w.value, &x.value);
    w.sign = if x.is_zero() { Sign::Zero } else { Sign::Positive };
}

/// Truncating division.
///
/// On input `r` holds the dividend, on output the remainder, which carries
/// the sign of the dividend. The quotient, rounded towards zero, is written
/// to `q`. Capacities are as for [`li::div_qr`].
///
/// # Panics
///
/// - Panics if `y` is zero
pub fn div_qr(q: &mut Sli, r: &mut Sli, y: &Sli) {
    let rsign = r.sign;
    li::div_qr(&mut q.value, &mut r.value, &y.value);
    q.sign = rsign.mul(y.sign);
    q.normalize();
    r.sign = rsign;
    r.normalize();
}

/// Reduces `r` in place to the residue in `[0, m)`, using `q` as quotient scratch.
///
/// `m` must be positive. `r` must hold `m.msdigits()` digits besides the
/// headroom [`li::div_qr`] asks for, and `q` must hold the quotient.
///
/// # Panics
///
/// - Panics if `m` is zero
pub fn mod_reduce(r: &mut Sli, m: &Sli, q: &mut Sli) {
    debug_assert!(m.sign == Sign::Positive, "sli::mod_reduce: non-positive modulus");
    li::div_qr(&mut q.value, &mut r.value, &m.value);
    if r.sign == Sign::Negative && !li::is_zero(&r.value) {
        li::rsub_assign(&mut r.value, &m.value);
    }
    r.sign = Sign::Positive;
    r.normalize();
}

/// Number of trailing zero bits of a non-zero magnitude.
fn trailing_zeros(x: &[Digit]) -> usize {
    let mut bits = 0;
    for d in x {
        if *d != 0 {
            return bits + d.trailing_zeros() as usize;
        }
        bits += DIGIT_BITS;
    }
    bits
}

/**
 * Binary extended GCD of non-negative `x` and `y`.
 *
 * Returns `(g, a, b)` with `g = gcd(x, y)` and `a * x + b * y = g`. Follows
 * Menezes, van Oorschot and Vanstone, Handbook of Applied Cryptography,
 * Algorithm 14.61. A zero operand yields the other operand as the gcd.
 */
#[must_use]
pub fn egcd(x: &Sli, y: &Sli) -> (Sli, Sli, Sli) {
    debug_assert!(
        x.sign != Sign::Negative && y.sign != Sign::Negative,
        "sli::egcd: negative operand"
    );
    let n = x.msdigits().max(y.msdigits()) + 2;

    if y.is_zero() {
        let b = Sli::new(n);
        let a = if x.is_zero() { Sli::new(n) } else { Sli::one(n) };
        return (x.resized(n), a, b);
    }
    if x.is_zero() {
        return (y.resized(n), Sli::new(n), Sli::one(n));
    }

    // strip the common power of two
    let k = trailing_zeros(&x.value).min(trailing_zeros(&y.value));
    let mut xs = x.resized(n);
    let mut ys = y.resized(n);
    li::shift_right(&mut xs.value, k);
    li::shift_right(&mut ys.value, k);

    let mut u = xs.clone();
    let mut v = ys.clone();
    let mut a = Sli::one(n);
    let mut b = Sli::new(n);
    let mut c = Sli::new(n);
    let mut d = Sli::one(n);

    loop {
        while u.is_even() {
            u.halve();
            if !(a.is_even() && b.is_even()) {
                add_assign(&mut a, &ys);
                sub_assign(&mut b, &xs);
            }
            a.halve();
            b.halve();
        }
        while v.is_even() {
            v.halve();
            if !(c.is_even() && d.is_even()) {
                add_assign(&mut c, &ys);
                sub_assign(&mut d, &xs);
            }
            c.halve();
            d.halve();
        }
        if li::cmp(&u.value, &v.value) != Ordering::Less {
            sub_assign(&mut u, &v);
            sub_assign(&mut a, &c);
            sub_assign(&mut b, &d);
        } else {
            sub_assign(&mut v, &u);
            sub_assign(&mut c, &a);
            sub_assign(&mut d, &b);
        }
        if u.is_zero() {
            break;
        }
    }

    li::shift_left(&mut v.value, k);
    (v, c, d)
}

/// Sets `w` to the inverse of `x` modulo the positive `m`.
///
/// `w` must hold `m.msdigits()` digits.
///
/// # Errors
///
/// - `NotInvertible` if `gcd(x, m) != 1`
pub fn modinv(w: &mut Sli, x: &Sli, m: &Sli) -> Result<(), Error> {
    debug_assert!(m.sign == Sign::Positive, "sli::modinv: non-positive modulus");
    let n = m.msdigits();
    let mut xr = x.resized(x.msdigits().max(n) + 1);
    let mut q = Sli::new(x.msdigits() + 1);
    mod_reduce(&mut xr, m, &mut q);

    let (g, mut a, _) = egcd(&xr, m);
    if !g.is_one() {
        return Err(Error::NotInvertible);
    }
    let mut q = Sli::new(a.capacity());
    mod_reduce(&mut a, m, &mut q);
    set(w, &a);
    Ok(())
}

/// Sets `w = prod mod m` and leaves garbage in `prod` and `quot`.
#[inline]
fn reduce_into(w: &mut [Digit], prod: &mut [Digit], quot: &mut [Digit], m: &[Digit]) {
    li::div_qr(quot, prod, m);
    li::copy(w, prod);
}

/// Sets `w = b^e mod m` for a non-negative `e` and a positive `m`.
///
/// Square-and-multiply scanning the bits of `e` from the most significant
/// one down. `w` must hold `m.msdigits()` digits.
pub fn modpow(w: &mut Sli, b: &Sli, e: &Sli, m: &Sli) {
    debug_assert!(e.sign != Sign::Negative, "sli::modpow: negative exponent");
    debug_assert!(m.sign == Sign::Positive, "sli::modpow: non-positive modulus");
    let n = m.msdigits();

    let mut base = b.resized(b.msdigits().max(n) + 1);
    let mut q = Sli::new(b.msdigits() + 1);
    mod_reduce(&mut base, m, &mut q);

    let mut acc = vec![0; n];
    if !m.is_one() {
        acc[0] = 1;
    }
    let mut prod = vec![0; 2 * n + 1];
    let mut quot = vec![0; n + 2];

    for i in (0..li::bitlength(&e.value)).rev() {
        li::square(&mut prod, &acc);
        reduce_into(&mut acc, &mut prod, &mut quot, &m.value);
        if li::get_bit(&e.value, i) {
            li::mul(&mut prod, &acc, &base.value);
            reduce_into(&mut acc, &mut prod, &mut quot, &m.value);
        }
    }

    li::copy(&mut w.value, &acc);
    w.sign = Sign::Positive;
    w.normalize();
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests;
