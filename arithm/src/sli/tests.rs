// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Signed arithmetic tests

use super::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn sli(v: i64) -> Sli {
    Sli::from_i64(v, 6)
}

fn to_i128(x: &Sli) -> i128 {
    let mut m: i128 = 0;
    for d in x.digits().iter().rev() {
        m = (m << 32) | i128::from(*d);
    }
    match x.sign() {
        Sign::Negative => -m,
        _ => m,
    }
}

fn gcd_u64(mut x: u64, mut y: u64) -> u64 {
    while y != 0 {
        (x, y) = (y, x % y);
    }
    x
}

#[test]
fn test_zero_sign_is_canonical() {
    let mut w = Sli::new(4);
    add(&mut w, &sli(5), &sli(-5));
    assert_eq!(w.sign(), Sign::Zero);
    assert!(w.is_zero());

    sub(&mut w, &sli(-9), &sli(-9));
    assert_eq!(w.sign(), Sign::Zero);

    mul(&mut w, &sli(0), &sli(-3));
    assert_eq!(w.sign(), Sign::Zero);

    assert_eq!(Sli::from_digits(true, vec![0, 0]).sign(), Sign::Zero);
}

#[test]
fn test_add_sub_mixed_signs() {
    let cases: [(i64, i64); 7] = [
        (7, 5),
        (-7, 5),
        (7, -5),
        (-7, -5),
        (5, -7),
        (0, -3),
        (i64::MAX, i64::MAX),
    ];
    let mut w = Sli::new(4);
    for (x, y) in cases {
        add(&mut w, &sli(x), &sli(y));
        assert_eq!(to_i128(&w), i128::from(x) + i128::from(y), "{x} + {y}");
        sub(&mut w, &sli(x), &sli(y));
        assert_eq!(to_i128(&w), i128::from(x) - i128::from(y), "{x} - {y}");
    }
}

#[test]
fn test_mul_and_square_signs() {
    let mut w = Sli::new(6);
    mul(&mut w, &sli(-12345678901), &sli(98765));
    assert_eq!(to_i128(&w), -12345678901i128 * 98765);
    assert_eq!(w.sign(), Sign::Negative);

    mul(&mut w, &sli(-4), &sli(-4));
    assert_eq!(to_i128(&w), 16);

    square(&mut w, &sli(-3_000_000_000));
    assert_eq!(to_i128(&w), 9_000_000_000_000_000_000);
    assert_eq!(w.sign(), Sign::Positive);
}

#[test]
fn test_div_qr_truncates() {
    let cases: [(i64, i64); 5] = [(7, 2), (-7, 2), (7, -2), (-7, -2), (3, 10)];
    for (x, y) in cases {
        let mut r = sli(x);
        let mut q = Sli::new(6);
        div_qr(&mut q, &mut r, &sli(y));
        assert_eq!(to_i128(&q), i128::from(x / y), "{x} / {y}");
        assert_eq!(to_i128(&r), i128::from(x % y), "{x} % {y}");
    }
}

#[test]
fn test_mod_reduce_is_non_negative() {
    let cases: [(i64, i64); 5] = [(-7, 5), (7, 5), (-10, 5), (0, 5), (-1, 1 << 40)];
    for (x, m) in cases {
        let mut r = sli(x);
        let mut q = Sli::new(6);
        mod_reduce(&mut r, &sli(m), &mut q);
        assert_eq!(to_i128(&r), i128::from(x.rem_euclid(m)), "{x} mod {m}");
        assert_ne!(r.sign(), Sign::Negative);
    }
}

#[test]
fn test_cmp_signed() {
    assert_eq!(cmp(&sli(-5), &sli(3)), Ordering::Less);
    assert_eq!(cmp(&sli(-5), &sli(-3)), Ordering::Less);
    assert_eq!(cmp(&sli(5), &sli(3)), Ordering::Greater);
    assert_eq!(cmp(&sli(0), &sli(-1)), Ordering::Greater);
    assert_eq!(cmp(&sli(0), &Sli::new(1)), Ordering::Equal);
}

#[test]
fn test_egcd_bezout_identity() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..300 {
        let x: u64 = rng.gen_range(0..1 << 62) << rng.gen_range(0..2);
        let y: u64 = rng.gen_range(0..1 << 62) << rng.gen_range(0..2);
        let (g, a, b) = egcd(&Sli::from_i64(x as i64, 2), &Sli::from_i64(y as i64, 2));
        assert_eq!(to_i128(&g), i128::from(gcd_u64(x, y)), "gcd({x}, {y})");
        assert_eq!(
            to_i128(&a) * i128::from(x) + to_i128(&b) * i128::from(y),
            to_i128(&g),
            "bezout({x}, {y})"
        );
    }
}

#[test]
fn test_egcd_zero_operands() {
    let (g, a, b) = egcd(&sli(12), &sli(0));
    assert_eq!((to_i128(&g), to_i128(&a), to_i128(&b)), (12, 1, 0));

    let (g, a, b) = egcd(&sli(0), &sli(12));
    assert_eq!((to_i128(&g), to_i128(&a), to_i128(&b)), (12, 0, 1));

    let (g, _, _) = egcd(&sli(0), &sli(0));
    assert!(g.is_zero());
}

#[test]
fn test_egcd_common_power_of_two() {
    let (g, a, b) = egcd(&sli(48), &sli(180));
    assert_eq!(to_i128(&g), 12);
    assert_eq!(to_i128(&a) * 48 + to_i128(&b) * 180, 12);
}

#[test]
fn test_modinv() {
    let mut w = Sli::new(2);
    modinv(&mut w, &sli(3), &sli(7)).unwrap();
    assert_eq!(to_i128(&w), 5);

    modinv(&mut w, &sli(-3), &sli(7)).unwrap();
    assert_eq!(to_i128(&w), 2);

    modinv(&mut w, &sli(10), &sli(467)).unwrap();
    assert_eq!((to_i128(&w) * 10) % 467, 1);
}

#[test]
fn test_modinv_not_invertible() {
    let mut w = Sli::new(2);
    assert_eq!(modinv(&mut w, &sli(6), &sli(9)), Err(Error::NotInvertible));
    assert_eq!(modinv(&mut w, &sli(0), &sli(9)), Err(Error::NotInvertible));
    assert_eq!(modinv(&mut w, &sli(18), &sli(9)), Err(Error::NotInvertible));
}

#[test]
fn test_modpow_known_answers() {
    let mut w = Sli::new(2);
    modpow(&mut w, &sli(4), &sli(233), &sli(467));
    assert!(w.is_one());

    modpow(&mut w, &sli(2), &sli(10), &sli(1000));
    assert_eq!(to_i128(&w), 24);

    modpow(&mut w, &sli(-2), &sli(3), &sli(1000));
    assert_eq!(to_i128(&w), 992);

    modpow(&mut w, &sli(12345), &sli(0), &sli(1000));
    assert!(w.is_one());

    modpow(&mut w, &sli(12345), &sli(0), &sli(1));
    assert!(w.is_zero());
}

#[test]
fn test_modpow_multi_digit_modulus() {
    // 3^(p - 1) = 1 mod p for the prime p = 2^61 - 1
    let p = sli((1 << 61) - 1);
    let mut w = Sli::new(2);
    modpow(&mut w, &sli(3), &sli((1 << 61) - 2), &p);
    assert!(w.is_one());

    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..50 {
        let b: i64 = rng.gen_range(0..1 << 61);
        let e: i64 = rng.gen_range(0..1000);
        modpow(&mut w, &sli(b), &sli(e), &p);

        let m = ((1u128 << 61) - 1) as i128;
        let mut expected: i128 = 1;
        for _ in 0..e {
            expected = expected * i128::from(b) % m;
        }
        assert_eq!(to_i128(&w), expected);
    }
}
