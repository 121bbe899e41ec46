// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Arbitrary precision integers.
//!
//! [`LargeInteger`] wraps an [`Sli`] and takes care of capacities: before
//! delegating to [`sli`][`crate::sli`] every operation allocates a result
//! large enough for the operand sizes, and afterwards the digit vector is
//! trimmed to its significant digits. Values are immutable.
//!
//! # Byte conventions
//!
//! Integers crossing a group or field boundary are unsigned big-endian,
//! left-padded with zeros to the fixed length of the descriptor
//! ([`LargeInteger::from_unsigned_bytes`], [`LargeInteger::to_fixed_bytes`]).
//! [`LargeInteger::to_bytes_be`] and [`LargeInteger::from_bytes_be`] are the
//! minimal two's complement form for free-standing signed integers.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::li::{self, Digit, DIGIT_BITS};
use crate::sli::{self, Sign, Sli};
use crate::utils::error::Error;

mod numtheory;

pub use numtheory::DEFAULT_CERTAINTY;

/**
 * An arbitrary precision signed integer.
 *
 * # Examples
 *
 * ```
 * use arithm::largeinteger::LargeInteger;
 *
 * let p = LargeInteger::from(467u32);
 * let g = LargeInteger::from(4u32);
 * let q = LargeInteger::from(233u32);
 * assert!(g.mod_pow(&q, &p).is_one());
 * ```
 */
#[derive(Clone)]
pub struct LargeInteger {
    inner: Sli,
}

impl LargeInteger {
    /// Wraps `s`, trimming its capacity.
    pub(crate) fn from_sli(mut s: Sli) -> Self {
        s.normalize();
        s.trim();
        LargeInteger { inner: s }
    }

    /// The underlying signed value, without spare capacity.
    pub(crate) fn as_sli(&self) -> &Sli {
        &self.inner
    }

    /// A copy of the underlying value with capacity for `capacity` digits.
    pub(crate) fn to_sli(&self, capacity: usize) -> Sli {
        self.inner.resized(capacity.max(self.len()))
    }

    /// Number of significant digits.
    #[inline]
    fn len(&self) -> usize {
        self.inner.value.len()
    }

    /// Returns zero.
    #[must_use]
    pub fn zero() -> Self {
        LargeInteger {
            inner: Sli::new(0),
        }
    }

    /// Returns one.
    #[must_use]
    pub fn one() -> Self {
        LargeInteger::from_u64(1)
    }

    /// Returns `v`.
    #[must_use]
    pub fn from_u64(v: u64) -> Self {
        LargeInteger::from_sli(Sli::from_digits(
            false,
            vec![v as Digit, (v >> DIGIT_BITS) as Digit],
        ))
    }

    /// Returns `v`.
    #[must_use]
    pub fn from_i64(v: i64) -> Self {
        LargeInteger::from_sli(Sli::from_i64(v, 2))
    }

    /// Returns the value if it is non-negative and fits in a `u64`.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        if self.is_negative() || self.len() > 2 {
            return None;
        }
        let digits = self.inner.digits();
        let low = u64::from(digits.first().copied().unwrap_or(0));
        let high = u64::from(digits.get(1).copied().unwrap_or(0));
        Some(low | (high << DIGIT_BITS))
    }

    /// The sign of this integer.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        self.inner.sign()
    }

    /// Returns true if this is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }

    /// Returns true if this is one.
    #[inline]
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.inner.is_one()
    }

    /// Returns true if this is strictly negative.
    #[inline]
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.sign() == Sign::Negative
    }

    /// Returns true if this is strictly positive.
    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.sign() == Sign::Positive
    }

    /// Returns true if this is even.
    #[inline]
    #[must_use]
    pub fn is_even(&self) -> bool {
        self.inner.is_even()
    }

    /// Number of bits of the absolute value, zero for zero.
    #[inline]
    #[must_use]
    pub fn bitlength(&self) -> usize {
        li::bitlength(self.inner.digits())
    }

    /// Bit `i` of the absolute value.
    #[inline]
    #[must_use]
    pub fn get_bit(&self, i: usize) -> bool {
        li::get_bit(self.inner.digits(), i)
    }

    /// Returns `-self`.
    #[must_use]
    pub fn neg(&self) -> Self {
        let mut inner = self.inner.clone();
        inner.negate();
        LargeInteger { inner }
    }

    /// Returns `|self|`.
    #[must_use]
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            self.neg()
        } else {
            self.clone()
        }
    }

    /// Returns `self + other`.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut w = Sli::new(self.len().max(other.len()) + 1);
        sli::add(&mut w, &self.inner, &other.inner);
        LargeInteger::from_sli(w)
    }

    /// Returns `self - other`.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        let mut w = Sli::new(self.len().max(other.len()) + 1);
        sli::sub(&mut w, &self.inner, &other.inner);
        LargeInteger::from_sli(w)
    }

    /// Returns `self * other`.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let mut w = Sli::new(self.len() + other.len());
        sli::mul(&mut w, &self.inner, &other.inner);
        LargeInteger::from_sli(w)
    }

    /// Returns `self * self`.
    #[must_use]
    pub fn square(&self) -> Self {
        let mut w = Sli::new(2 * self.len());
        sli::square(&mut w, &self.inner);
        LargeInteger::from_sli(w)
    }

    /// Truncating division, returns the quotient and the remainder.
    ///
    /// The quotient is rounded towards zero and the remainder has the sign
    /// of `self`.
    ///
    /// # Panics
    ///
    /// - Panics if `divisor` is zero
    #[must_use]
    pub fn div_qr(&self, divisor: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero(), "LargeInteger::div_qr: division by zero");
        let mut r = self.to_sli(self.len() + 1);
        let mut q = Sli::new(self.len() + 1);
        sli::div_qr(&mut q, &mut r, &divisor.inner);
        (LargeInteger::from_sli(q), LargeInteger::from_sli(r))
    }

    /// Returns the residue of `self` modulo `m` in `[0, m)`.
    ///
    /// # Panics
    ///
    /// - Panics if `m` is not positive
    #[must_use]
    pub fn modulo(&self, m: &Self) -> Self {
        assert!(m.is_positive(), "LargeInteger::modulo: non-positive modulus");
        let mut r = self.to_sli(self.len().max(m.len()) + 1);
        let mut q = Sli::new(self.len() + 1);
        sli::mod_reduce(&mut r, &m.inner, &mut q);
        LargeInteger::from_sli(r)
    }

    /// Returns `self * 2^bits`.
    #[must_use]
    pub fn shift_left(&self, bits: usize) -> Self {
        let mut w = self.to_sli(self.len() + li::digits_for_bits(bits) + 1);
        li::shift_left(&mut w.value, bits);
        LargeInteger::from_sli(w)
    }

    /// Shifts the absolute value right by `bits`, keeping the sign.
    #[must_use]
    pub fn shift_right(&self, bits: usize) -> Self {
        let mut w = self.inner.clone();
        li::shift_right(&mut w.value, bits);
        LargeInteger::from_sli(w)
    }

    /// Remainder of the absolute value modulo a single digit.
    pub(crate) fn rem_digit(&self, d: Digit) -> Digit {
        let d = u64::from(d);
        let mut rem = 0u64;
        for digit in self.inner.digits().iter().rev() {
            rem = ((rem << DIGIT_BITS) | u64::from(*digit)) % d;
        }
        rem as Digit
    }

    /// Parses a hexadecimal string with an optional `-` sign and `0x` prefix.
    ///
    /// # Errors
    ///
    /// - `ParseError` if the string has no digits or a non-hexadecimal character
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let body = body
            .strip_prefix("0x")
            .or_else(|| body.strip_prefix("0X"))
            .unwrap_or(body);
        if body.is_empty() || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::ParseError(format!("invalid hexadecimal integer: {s:?}")));
        }

        let mut digits = Vec::with_capacity(body.len().div_ceil(8));
        let mut end = body.len();
        while end > 0 {
            let start = end.saturating_sub(8);
            let d = Digit::from_str_radix(&body[start..end], 16)
                .map_err(|e| Error::ParseError(e.to_string()))?;
            digits.push(d);
            end = start;
        }
        Ok(LargeInteger::from_sli(Sli::from_digits(negative, digits)))
    }

    /// Lowercase hexadecimal without prefix, `-` for negative values.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let digits = self.inner.digits();
        let Some((top, rest)) = digits.split_last() else {
            return "0".to_string();
        };
        let mut s = String::with_capacity(1 + 8 * digits.len());
        if self.is_negative() {
            s.push('-');
        }
        s.push_str(&format!("{top:x}"));
        for d in rest.iter().rev() {
            s.push_str(&format!("{d:08x}"));
        }
        s
    }

    /// Minimal big-endian two's complement bytes; zero is a single zero byte.
    #[must_use]
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let len = self.bitlength() / 8 + 1;
        let mut out = vec![0u8; len];
        li::to_bytes_be(self.inner.digits(), &mut out);
        if self.is_negative() {
            twos_complement(&mut out);
        }

        let redundant = out
            .windows(2)
            .take_while(|w| (w[0] == 0x00 && w[1] & 0x80 == 0) || (w[0] == 0xff && w[1] & 0x80 != 0))
            .count();
        out.drain(..redundant);
        out
    }

    /// Parses big-endian two's complement bytes; empty input is zero.
    #[must_use]
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        match bytes.first() {
            Some(b) if b & 0x80 != 0 => {
                let mut magnitude = bytes.to_vec();
                twos_complement(&mut magnitude);
                LargeInteger::from_unsigned_bytes(&magnitude).neg()
            }
            _ => LargeInteger::from_unsigned_bytes(bytes),
        }
    }

    /// Parses big-endian unsigned bytes; empty input is zero.
    #[must_use]
    pub fn from_unsigned_bytes(bytes: &[u8]) -> Self {
        let mut digits = vec![0; bytes.len().div_ceil(4)];
        li::from_bytes_be(&mut digits, bytes);
        LargeInteger::from_sli(Sli::from_digits(false, digits))
    }

    /// Minimal big-endian bytes of the absolute value; zero is empty.
    #[must_use]
    pub fn to_unsigned_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.bitlength().div_ceil(8)];
        li::to_bytes_be(self.inner.digits(), &mut out);
        out
    }

    /// Big-endian unsigned bytes left-padded with zeros to exactly `len` bytes.
    ///
    /// # Errors
    ///
    /// - `InvalidElement` if the value is negative
    /// - `EncodingTooLarge` if the value needs more than `len` bytes
    pub fn to_fixed_bytes(&self, len: usize) -> Result<Vec<u8>, Error> {
        if self.is_negative() {
            return Err(Error::InvalidElement(
                "negative integer has no unsigned encoding".to_string(),
            ));
        }
        let needed = self.bitlength().div_ceil(8);
        if needed > len {
            return Err(Error::EncodingTooLarge {
                length: needed,
                max: len,
            });
        }
        let mut out = vec![0u8; len];
        li::to_bytes_be(self.inner.digits(), &mut out);
        Ok(out)
    }
}

/// Negates a big-endian two's complement byte string in place.
fn twos_complement(bytes: &mut [u8]) {
    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        let (v, c) = (!*b).overflowing_add(u8::from(carry));
        *b = v;
        carry = c;
    }
}

impl PartialEq for LargeInteger {
    fn eq(&self, other: &Self) -> bool {
        self.inner.sign == other.inner.sign && self.inner.value == other.inner.value
    }
}

impl Eq for LargeInteger {}

impl Hash for LargeInteger {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.sign.hash(state);
        self.inner.value.hash(state);
    }
}

impl PartialOrd for LargeInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LargeInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        sli::cmp(&self.inner, &other.inner)
    }
}

impl fmt::Display for LargeInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-0x{}", &self.to_hex()[1..])
        } else {
            write!(f, "0x{}", self.to_hex())
        }
    }
}

impl fmt::Debug for LargeInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LargeInteger({self})")
    }
}

impl FromStr for LargeInteger {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LargeInteger::from_hex(s)
    }
}

impl Default for LargeInteger {
    fn default() -> Self {
        LargeInteger::zero()
    }
}

impl From<u64> for LargeInteger {
    fn from(v: u64) -> Self {
        LargeInteger::from_u64(v)
    }
}

impl From<u32> for LargeInteger {
    fn from(v: u32) -> Self {
        LargeInteger::from_u64(u64::from(v))
    }
}

impl From<i64> for LargeInteger {
    fn from(v: i64) -> Self {
        LargeInteger::from_i64(v)
    }
}

macro_rules! impl_binop {
    ($trait:ident, $method:ident) => {
        impl std::ops::$trait<&LargeInteger> for &LargeInteger {
            type Output = LargeInteger;

            fn $method(self, rhs: &LargeInteger) -> LargeInteger {
                LargeInteger::$method(self, rhs)
            }
        }

        impl std::ops::$trait<LargeInteger> for LargeInteger {
            type Output = LargeInteger;

            fn $method(self, rhs: LargeInteger) -> LargeInteger {
                LargeInteger::$method(&self, &rhs)
            }
        }

        impl std::ops::$trait<&LargeInteger> for LargeInteger {
            type Output = LargeInteger;

            fn $method(self, rhs: &LargeInteger) -> LargeInteger {
                LargeInteger::$method(&self, rhs)
            }
        }
    };
}

impl_binop!(Add, add);
impl_binop!(Sub, sub);
impl_binop!(Mul, mul);

impl std::ops::Neg for &LargeInteger {
    type Output = LargeInteger;

    fn neg(self) -> LargeInteger {
        LargeInteger::neg(self)
    }
}

impl std::ops::Neg for LargeInteger {
    type Output = LargeInteger;

    fn neg(self) -> LargeInteger {
        LargeInteger::neg(&self)
    }
}
