// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Raw multi-precision magnitude arithmetic.
//!
//! A magnitude is a slice of [`Digit`]s in little-endian word order. The
//! number of significant digits is given by [`msdigits`]; every digit above
//! it is zero. The length of the slice is its capacity.
//!
//! Nothing in this module allocates. Output slices are sized by the caller
//! and a slice that is too short is a programming error: it trips a
//! `debug_assert!` or an index panic, never a recoverable error. All
//! algorithms are school book; the only optimized piece is the fused
//! multiply-accumulate loop [`muladd_loop`] that dominates multiplication,
//! squaring and therefore modular exponentiation.
//!
//! Division follows Knuth, TAOCP Vol. 2, 4.3.1, Algorithm D.

use std::cmp::Ordering;

/// A single word of a magnitude.
pub type Digit = u32;

/// Twice the width of a [`Digit`], holds any product of two digits plus two carries.
pub type DoubleDigit = u64;

/// Number of bits in a [`Digit`].
pub const DIGIT_BITS: usize = 32;

const BASE: DoubleDigit = 1 << DIGIT_BITS;

/// Number of digits needed to hold `bits` bits.
#[inline]
#[must_use]
pub fn digits_for_bits(bits: usize) -> usize {
    bits.div_ceil(DIGIT_BITS)
}

/// Number of significant digits of `x`.
#[inline]
#[must_use]
pub fn msdigits(x: &[Digit]) -> usize {
    let mut n = x.len();
    while n > 0 && x[n - 1] == 0 {
        n -= 1;
    }
    n
}

/// Returns true if `x` is zero.
#[inline]
#[must_use]
pub fn is_zero(x: &[Digit]) -> bool {
    x.iter().all(|d| *d == 0)
}

/// Number of significant bits of `x`, zero for zero.
#[must_use]
pub fn bitlength(x: &[Digit]) -> usize {
    let n = msdigits(x);
    if n == 0 {
        0
    } else {
        (n - 1) * DIGIT_BITS + (DIGIT_BITS - x[n - 1].leading_zeros() as usize)
    }
}

/// Returns bit `i` of `x`; bits beyond the capacity are zero.
#[inline]
#[must_use]
pub fn get_bit(x: &[Digit], i: usize) -> bool {
    let d = i / DIGIT_BITS;
    d < x.len() && (x[d] >> (i % DIGIT_BITS)) & 1 == 1
}

/// Sets `w` to zero.
#[inline]
pub fn set_zero(w: &mut [Digit]) {
    w.fill(0);
}

/// Sets `w` to the single digit `d`.
pub fn set_digit(w: &mut [Digit], d: Digit) {
    debug_assert!(!w.is_empty() || d == 0, "li::set_digit: no capacity");
    w.fill(0);
    if d != 0 {
        w[0] = d;
    }
}

/// Sets `w = x`. `w` must hold the significant digits of `x`.
pub fn copy(w: &mut [Digit], x: &[Digit]) {
    let n = msdigits(x);
    debug_assert!(w.len() >= n, "li::copy: insufficient capacity");
    w[..n].copy_from_slice(&x[..n]);
    w[n..].fill(0);
}

/// Compares `x` and `y` as magnitudes, regardless of their capacities.
#[must_use]
pub fn cmp(x: &[Digit], y: &[Digit]) -> Ordering {
    let xn = msdigits(x);
    let yn = msdigits(y);
    if xn != yn {
        return xn.cmp(&yn);
    }
    for i in (0..xn).rev() {
        match x[i].cmp(&y[i]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Shifts `x` left by `bits` in place. The result must fit in the capacity of `x`.
pub fn shift_left(x: &mut [Digit], bits: usize) {
    if bits == 0 || x.is_empty() {
        return;
    }
    debug_assert!(
        bitlength(x) + bits <= x.len() * DIGIT_BITS,
        "li::shift_left: insufficient capacity"
    );
    let words = bits / DIGIT_BITS;
    let s = bits % DIGIT_BITS;
    let n = x.len();

    if words > 0 {
        for i in (words..n).rev() {
            x[i] = x[i - words];
        }
        x[..words.min(n)].fill(0);
    }
    if s > 0 {
        for i in (words + 1..n).rev() {
            x[i] = (x[i] << s) | (x[i - 1] >> (DIGIT_BITS - s));
        }
        if words < n {
            x[words] <<= s;
        }
    }
}

/// Shifts `x` right by `bits` in place, discarding the low bits.
pub fn shift_right(x: &mut [Digit], bits: usize) {
    if bits == 0 || x.is_empty() {
        return;
    }
    let words = bits / DIGIT_BITS;
    let s = bits % DIGIT_BITS;
    let n = x.len();
    if words >= n {
        x.fill(0);
        return;
    }

    if words > 0 {
        for i in 0..n - words {
            x[i] = x[i + words];
        }
        x[n - words..].fill(0);
    }
    if s > 0 {
        let top = n - words;
        for i in 0..top - 1 {
            x[i] = (x[i] >> s) | (x[i + 1] << (DIGIT_BITS - s));
        }
        x[top - 1] >>= s;
    }
}

/// Sets `w = x + y`.
pub fn add(w: &mut [Digit], x: &[Digit], y: &[Digit]) {
    let (long, short) = if msdigits(x) >= msdigits(y) {
        (x, y)
    } else {
        (y, x)
    };
    let ln = msdigits(long);
    let sn = msdigits(short);
    debug_assert!(w.len() >= ln, "li::add: insufficient capacity");

    let mut carry: DoubleDigit = 0;
    for i in 0..sn {
        let t = DoubleDigit::from(long[i]) + DoubleDigit::from(short[i]) + carry;
        w[i] = t as Digit;
        carry = t >> DIGIT_BITS;
    }
    for i in sn..ln {
        let t = DoubleDigit::from(long[i]) + carry;
        w[i] = t as Digit;
        carry = t >> DIGIT_BITS;
    }
    let mut end = ln;
    if carry != 0 {
        w[ln] = carry as Digit;
        end += 1;
    }
    w[end..].fill(0);
}

/// Sets `w = w + y`.
pub fn add_assign(w: &mut [Digit], y: &[Digit]) {
    let yn = msdigits(y);
    let mut carry: DoubleDigit = 0;
    let mut i = 0;
    while i < yn {
        let t = DoubleDigit::from(w[i]) + DoubleDigit::from(y[i]) + carry;
        w[i] = t as Digit;
        carry = t >> DIGIT_BITS;
        i += 1;
    }
    while carry != 0 {
        let t = DoubleDigit::from(w[i]) + carry;
        w[i] = t as Digit;
        carry = t >> DIGIT_BITS;
        i += 1;
    }
}

/// Sets `w = x - y`. Requires `x >= y`, otherwise the result is undefined.
pub fn sub(w: &mut [Digit], x: &[Digit], y: &[Digit]) {
    let xn = msdigits(x);
    let yn = msdigits(y);
    debug_assert!(cmp(x, y) != Ordering::Less, "li::sub: x < y");
    debug_assert!(w.len() >= xn, "li::sub: insufficient capacity");

    let mut borrow: DoubleDigit = 0;
    for i in 0..yn {
        let t = DoubleDigit::from(x[i])
            .wrapping_sub(DoubleDigit::from(y[i]))
            .wrapping_sub(borrow);
        w[i] = t as Digit;
        borrow = t >> 63;
    }
    for i in yn..xn {
        let t = DoubleDigit::from(x[i]).wrapping_sub(borrow);
        w[i] = t as Digit;
        borrow = t >> 63;
    }
    w[xn..].fill(0);
}

/// Sets `w = w - y`. Requires `w >= y`, otherwise the result is undefined.
pub fn sub_assign(w: &mut [Digit], y: &[Digit]) {
    debug_assert!(cmp(w, y) != Ordering::Less, "li::sub_assign: w < y");
    let yn = msdigits(y);
    let mut borrow: DoubleDigit = 0;
    let mut i = 0;
    while i < yn {
        let t = DoubleDigit::from(w[i])
            .wrapping_sub(DoubleDigit::from(y[i]))
            .wrapping_sub(borrow);
        w[i] = t as Digit;
        borrow = t >> 63;
        i += 1;
    }
    while borrow != 0 {
        let t = DoubleDigit::from(w[i]).wrapping_sub(borrow);
        w[i] = t as Digit;
        borrow = t >> 63;
        i += 1;
    }
}

/// Sets `w = x - w`. Requires `x >= w`, otherwise the result is undefined.
pub fn rsub_assign(w: &mut [Digit], x: &[Digit]) {
    debug_assert!(cmp(x, w) != Ordering::Less, "li::rsub_assign: x < w");
    let xn = msdigits(x);
    debug_assert!(w.len() >= xn, "li::rsub_assign: insufficient capacity");
    let mut borrow: DoubleDigit = 0;
    for i in 0..xn {
        let t = DoubleDigit::from(x[i])
            .wrapping_sub(DoubleDigit::from(w[i]))
            .wrapping_sub(borrow);
        w[i] = t as Digit;
        borrow = t >> 63;
    }
}

/// Adds `x * y` into `w` starting at digit `offset` and returns the outgoing carry.
///
/// Only `w[offset..offset + x.len()]` is written; the returned carry belongs
/// at `w[offset + x.len()]` and is left for the caller to place.
#[inline]
pub fn muladd_loop(w: &mut [Digit], x: &[Digit], y: Digit, offset: usize) -> Digit {
    let y = DoubleDigit::from(y);
    let mut carry: DoubleDigit = 0;
    for (wi, xi) in w[offset..offset + x.len()].iter_mut().zip(x) {
        // (B - 1)^2 + 2(B - 1) = B^2 - 1, so this never overflows
        let t = DoubleDigit::from(*xi) * y + DoubleDigit::from(*wi) + carry;
        *wi = t as Digit;
        carry = t >> DIGIT_BITS;
    }
    carry as Digit
}

/// Sets `w = x * y`. `w` must hold `msdigits(x) + msdigits(y)` digits.
pub fn mul(w: &mut [Digit], x: &[Digit], y: &[Digit]) {
    let xn = msdigits(x);
    let yn = msdigits(y);
    debug_assert!(w.len() >= xn + yn, "li::mul: insufficient capacity");
    w.fill(0);
    if xn == 0 || yn == 0 {
        return;
    }
    for j in 0..yn {
        let carry = muladd_loop(w, &x[..xn], y[j], j);
        w[j + xn] = carry;
    }
}

/// Sets `w = x * x`. `w` must hold `2 * msdigits(x)` digits.
///
/// Each cross product `x[i] * x[j]` with `i < j` is computed once, the sum is
/// doubled and the diagonal squares are added afterwards.
pub fn square(w: &mut [Digit], x: &[Digit]) {
    let n = msdigits(x);
    debug_assert!(w.len() >= 2 * n, "li::square: insufficient capacity");
    w.fill(0);
    if n == 0 {
        return;
    }
    for i in 0..n - 1 {
        let carry = muladd_loop(w, &x[i + 1..n], x[i], 2 * i + 1);
        w[i + n] = carry;
    }
    shift_left(&mut w[..2 * n], 1);

    let mut carry: DoubleDigit = 0;
    for i in 0..n {
        let sq = DoubleDigit::from(x[i]) * DoubleDigit::from(x[i]);

        let t = DoubleDigit::from(w[2 * i]) + (sq & 0xffff_ffff) + carry;
        w[2 * i] = t as Digit;
        carry = t >> DIGIT_BITS;

        let t = DoubleDigit::from(w[2 * i + 1]) + (sq >> DIGIT_BITS) + carry;
        w[2 * i + 1] = t as Digit;
        carry = t >> DIGIT_BITS;
    }
    debug_assert!(carry == 0, "li::square: carry out of range");
}

/// Digit `i` of `y << s` where `s < DIGIT_BITS`.
#[inline]
fn normalized_digit(y: &[Digit], i: usize, s: u32) -> DoubleDigit {
    if s == 0 {
        DoubleDigit::from(y[i])
    } else {
        let low = if i > 0 { y[i - 1] >> (DIGIT_BITS as u32 - s) } else { 0 };
        DoubleDigit::from((y[i] << s) | low)
    }
}

/// Computes the quotient and remainder of `r / y`.
///
/// On input `r` holds the dividend, on output the remainder. The quotient is
/// written to `q`, which must hold `msdigits(r) - msdigits(y) + 1` digits.
/// `r` needs one digit of headroom above its significant digits, used while
/// the operands are normalized. `y` must be non-zero.
///
/// # Panics
///
/// - Panics if `y` is zero
pub fn div_qr(q: &mut [Digit], r: &mut [Digit], y: &[Digit]) {
    let n = msdigits(y);
    assert!(n > 0, "li::div_qr: division by zero");
    q.fill(0);

    if cmp(r, y) == Ordering::Less {
        return;
    }
    let rn = msdigits(r);

    // single digit divisor
    if n == 1 {
        let d = DoubleDigit::from(y[0]);
        let mut rem: DoubleDigit = 0;
        for i in (0..rn).rev() {
            let cur = (rem << DIGIT_BITS) | DoubleDigit::from(r[i]);
            q[i] = (cur / d) as Digit;
            rem = cur % d;
        }
        set_digit(r, rem as Digit);
        return;
    }

    debug_assert!(r.len() > rn, "li::div_qr: remainder needs one digit of headroom");
    debug_assert!(q.len() > rn - n, "li::div_qr: insufficient quotient capacity");

    let s = y[n - 1].leading_zeros();
    shift_left(&mut r[..=rn], s as usize);

    let v1 = normalized_digit(y, n - 1, s);
    let v2 = normalized_digit(y, n - 2, s);

    for j in (0..=rn - n).rev() {
        let num = (DoubleDigit::from(r[j + n]) << DIGIT_BITS) | DoubleDigit::from(r[j + n - 1]);
        let mut qhat = num / v1;
        let mut rhat = num % v1;
        while qhat >= BASE || qhat * v2 > ((rhat << DIGIT_BITS) | DoubleDigit::from(r[j + n - 2])) {
            qhat -= 1;
            rhat += v1;
            if rhat >= BASE {
                break;
            }
        }

        // r[j..=j + n] -= qhat * (y << s)
        let mut carry: DoubleDigit = 0;
        let mut borrow: DoubleDigit = 0;
        for i in 0..n {
            let p = qhat * normalized_digit(y, i, s) + carry;
            carry = p >> DIGIT_BITS;
            let t = DoubleDigit::from(r[i + j])
                .wrapping_sub(p & 0xffff_ffff)
                .wrapping_sub(borrow);
            r[i + j] = t as Digit;
            borrow = t >> 63;
        }
        let t = DoubleDigit::from(r[j + n])
            .wrapping_sub(carry)
            .wrapping_sub(borrow);
        r[j + n] = t as Digit;

        // qhat was one too large, add the divisor back
        if t >> 63 == 1 {
            qhat -= 1;
            let mut c: DoubleDigit = 0;
            for i in 0..n {
                let t = DoubleDigit::from(r[i + j]) + normalized_digit(y, i, s) + c;
                r[i + j] = t as Digit;
                c = t >> DIGIT_BITS;
            }
            r[j + n] = r[j + n].wrapping_add(c as Digit);
        }
        q[j] = qhat as Digit;
    }

    r[n..].fill(0);
    shift_right(&mut r[..n], s as usize);
}

/// Sets `w` to the big-endian unsigned integer in `bytes`.
pub fn from_bytes_be(w: &mut [Digit], bytes: &[u8]) {
    w.fill(0);
    for (i, byte) in bytes.iter().rev().enumerate() {
        if *byte != 0 {
            w[i / 4] |= Digit::from(*byte) << (8 * (i % 4));
        }
    }
}

/// Writes `x` as a big-endian unsigned integer filling all of `out`.
///
/// The caller guarantees that `x` fits; higher bits are dropped otherwise.
pub fn to_bytes_be(x: &[Digit], out: &mut [u8]) {
    let len = out.len();
    for (i, byte) in out.iter_mut().rev().enumerate() {
        let d = i / 4;
        *byte = if d < x.len() {
            (x[d] >> (8 * (i % 4))) as u8
        } else {
            0
        };
    }
    debug_assert!(bitlength(x) <= 8 * len, "li::to_bytes_be: value does not fit");
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests;
