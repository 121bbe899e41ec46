// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Magnitude arithmetic tests

use super::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

/// Little-endian digits of a hexadecimal literal.
fn digits(hex: &str) -> Vec<Digit> {
    let hex = hex.trim_start_matches("0x");
    let mut out = Vec::new();
    let mut end = hex.len();
    while end > 0 {
        let start = end.saturating_sub(8);
        out.push(u32::from_str_radix(&hex[start..end], 16).unwrap());
        end = start;
    }
    out
}

fn random_digits(rng: &mut StdRng, max_len: usize) -> Vec<Digit> {
    let len = rng.gen_range(1..=max_len);
    let mut x: Vec<Digit> = (0..len).map(|_| rng.gen()).collect();
    // exercise short top digits and the all-ones pattern
    match rng.gen_range(0..4) {
        0 => x[len - 1] = 1,
        1 => x[len - 1] = u32::MAX,
        _ => {}
    }
    x
}

fn product(x: &[Digit], y: &[Digit]) -> Vec<Digit> {
    let mut w = vec![0; x.len() + y.len()];
    mul(&mut w, x, y);
    w
}

fn quotient_remainder(x: &[Digit], y: &[Digit]) -> (Vec<Digit>, Vec<Digit>) {
    let mut r = x.to_vec();
    r.push(0);
    let mut q = vec![0; x.len() + 1];
    div_qr(&mut q, &mut r, y);
    (q, r)
}

#[test]
fn test_msdigits_and_bitlength() {
    assert_eq!(msdigits(&[0, 0, 0]), 0);
    assert_eq!(msdigits(&[1, 0, 0]), 1);
    assert_eq!(msdigits(&[0, 0, 5]), 3);
    assert_eq!(bitlength(&[]), 0);
    assert_eq!(bitlength(&[0, 0]), 0);
    assert_eq!(bitlength(&[1]), 1);
    assert_eq!(bitlength(&[0, 0x8000_0000]), 64);
    assert!(get_bit(&[0, 2], 33));
    assert!(!get_bit(&[0, 2], 32));
    assert!(!get_bit(&[0, 2], 1000));
}

#[test]
fn test_cmp_ignores_capacity() {
    assert_eq!(cmp(&[5, 0, 0], &[5]), Ordering::Equal);
    assert_eq!(cmp(&[0, 1], &[u32::MAX]), Ordering::Greater);
    assert_eq!(cmp(&[7, 1], &[8, 1, 0]), Ordering::Less);
}

#[test]
fn test_mul_known_answer() {
    let x = digits("0xfedcba9876543210fedcba9876543210aabbccdd");
    let y = digits("0x123456789abcdef011");
    let expected = digits("0x121fa00ad77d74224679d16d4d71da75507e4d9b22e59bc16b5a2dcaad");
    let w = product(&x, &y);
    assert_eq!(cmp(&w, &expected), Ordering::Equal);
}

#[test]
fn test_div_qr_known_answer() {
    let x = digits("0xfedcba9876543210fedcba9876543210aabbccdd");
    let y = digits("0x123456789abcdef011");
    let (q, r) = quotient_remainder(&x, &y);
    assert_eq!(cmp(&q, &digits("0xe0000000000000d2fed2000")), Ordering::Equal);
    assert_eq!(cmp(&r, &digits("0xe1206dfcacdd")), Ordering::Equal);
}

#[test]
fn test_div_qr_needs_add_back_correction() {
    // the top digits of the dividend equal those of the divisor, forcing the
    // quotient digit estimate to be corrected
    let x = digits("0x7fffffffffffffff0000000000000001ffffffff");
    let y = digits("0x7fffffffffffffffffffffff");
    let (q, r) = quotient_remainder(&x, &y);
    assert_eq!(cmp(&q, &digits("0xfffffffffffffffe")), Ordering::Equal);
    assert_eq!(cmp(&r, &digits("0x100000001fffffffd")), Ordering::Equal);
}

#[test]
fn test_div_by_single_digit() {
    let x = digits("0x100000000000000000000000f");
    let (q, r) = quotient_remainder(&x, &[16]);
    assert_eq!(cmp(&q, &digits("0x100000000000000000000000")), Ordering::Equal);
    assert_eq!(cmp(&r, &[15]), Ordering::Equal);
}

#[test]
fn test_div_smaller_dividend() {
    let (q, r) = quotient_remainder(&[3, 0], &[0, 1]);
    assert!(is_zero(&q));
    assert_eq!(cmp(&r, &[3]), Ordering::Equal);
}

#[test]
#[should_panic(expected = "division by zero")]
fn test_div_by_zero_panics() {
    quotient_remainder(&[3], &[0, 0]);
}

#[test]
fn test_mul_div_inverse() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..200 {
        let x = random_digits(&mut rng, 12);
        let y = random_digits(&mut rng, 9);
        if is_zero(&y) {
            continue;
        }
        let xy = product(&x, &y);
        let (q, r) = quotient_remainder(&xy, &y);
        assert_eq!(cmp(&q, &x), Ordering::Equal, "(x * y) / y != x");
        assert!(is_zero(&r), "(x * y) mod y != 0");
    }
}

#[test]
fn test_div_qr_reconstructs_dividend() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..200 {
        let x = random_digits(&mut rng, 16);
        let y = random_digits(&mut rng, 8);
        if is_zero(&y) {
            continue;
        }
        let (q, r) = quotient_remainder(&x, &y);
        assert_eq!(cmp(&r, &y), Ordering::Less);

        let qy = product(&q, &y);
        let mut back = vec![0; qy.len() + 1];
        add(&mut back, &qy, &r);
        assert_eq!(cmp(&back, &x), Ordering::Equal);
    }
}

#[test]
fn test_add_sub_inverse() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let x = random_digits(&mut rng, 10);
        let y = random_digits(&mut rng, 10);
        let mut s = vec![0; x.len().max(y.len()) + 1];
        add(&mut s, &x, &y);
        let mut d = vec![0; s.len()];
        sub(&mut d, &s, &y);
        assert_eq!(cmp(&d, &x), Ordering::Equal, "(x + y) - y != x");

        add_assign(&mut d, &y);
        assert_eq!(cmp(&d, &s), Ordering::Equal);
        sub_assign(&mut d, &x);
        assert_eq!(cmp(&d, &y), Ordering::Equal);
    }
}

#[test]
fn test_rsub_assign() {
    let mut w = digits("0xffffffff00000001");
    w.resize(4, 0);
    let x = digits("0x1000000000000000000000000");
    rsub_assign(&mut w, &x);
    assert_eq!(cmp(&w, &digits("0xffffffff00000000ffffffff")), Ordering::Equal);

    let mut w = vec![7, 0, 0];
    rsub_assign(&mut w, &[7]);
    assert!(is_zero(&w));
}

#[test]
fn test_carry_propagates_through_all_ones() {
    let x = vec![u32::MAX; 5];
    let mut w = vec![0; 6];
    add(&mut w, &x, &[1]);
    assert_eq!(w, vec![0, 0, 0, 0, 0, 1]);

    sub_assign(&mut w, &[1]);
    assert_eq!(w, vec![u32::MAX, u32::MAX, u32::MAX, u32::MAX, u32::MAX, 0]);
}

#[test]
fn test_square_matches_mul() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..100 {
        let x = random_digits(&mut rng, 14);
        let mut sq = vec![0; 2 * x.len()];
        square(&mut sq, &x);
        assert_eq!(cmp(&sq, &product(&x, &x)), Ordering::Equal);
    }
}

#[test]
fn test_muladd_loop_reports_carry() {
    let mut w = vec![1, 0, 0];
    let carry = muladd_loop(&mut w, &[u32::MAX, u32::MAX], u32::MAX, 0);
    // 1 + (2^64 - 1)(2^32 - 1) = 2^96 - 2^64 - 2^32 + 2
    assert_eq!(w[..2], [2, u32::MAX]);
    assert_eq!(carry, u32::MAX - 1);
}

#[test]
fn test_shifts_are_inverse() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..100 {
        let x = random_digits(&mut rng, 6);
        let bits = rng.gen_range(0..100);
        let mut w = x.clone();
        w.resize(x.len() + digits_for_bits(bits) + 1, 0);
        shift_left(&mut w, bits);
        assert_eq!(bitlength(&w), if is_zero(&x) { 0 } else { bitlength(&x) + bits });
        shift_right(&mut w, bits);
        assert_eq!(cmp(&w, &x), Ordering::Equal);
    }
}

#[test]
fn test_shift_right_discards_low_bits() {
    let mut x = digits("0x123456789abcdef0f");
    shift_right(&mut x, 36);
    assert_eq!(cmp(&x, &digits("0x12345678")), Ordering::Equal);
    shift_right(&mut x, 200);
    assert!(is_zero(&x));
}

#[test]
fn test_bytes_round_trip() {
    let bytes = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
    let mut x = vec![0; 3];
    from_bytes_be(&mut x, &bytes);
    assert_eq!(x, vec![0x0506_0708, 0x0102_0304, 0]);

    let mut out = [0u8; 9];
    to_bytes_be(&x, &mut out);
    assert_eq!(out, bytes);

    let mut wide = [0xffu8; 14];
    to_bytes_be(&x, &mut wide);
    assert_eq!(&wide[..5], &[0, 0, 0, 0, 0]);
    assert_eq!(&wide[5..], &bytes);
}
