// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

use p256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use p256::elliptic_curve::PrimeField;
use strum::IntoEnumIterator;

use crate::groups::ecq::{CurveName, CurveParams, ECqPGroup, EcPoint};
use crate::largeinteger::LargeInteger;
use crate::traits::groups::PrimeOrderGroup;
use crate::utils::error::Error;
use crate::utils::rng::HashPrg;

fn int(v: u64) -> LargeInteger {
    LargeInteger::from(v)
}

fn point(x: u64, y: u64) -> EcPoint {
    EcPoint::Affine { x: int(x), y: int(y) }
}

/// `y^2 = x^3 + 2x + 20 mod 10007`, with 10084 = 4 * 2521 points.
fn small_params() -> CurveParams {
    CurveParams {
        modulus: int(10007),
        a: int(2),
        b: int(20),
        gx: int(7345),
        gy: int(5479),
        order: int(2521),
        cofactor: int(4),
    }
}

fn small_group() -> ECqPGroup {
    ECqPGroup::new(small_params()).unwrap()
}

#[test]
fn test_small_curve_group() {
    let group = small_group();
    let g = group.generator_value();
    assert_eq!(group.byte_length(), 5);
    assert_eq!(group.exp_value(&g, &int(2)), point(2356, 3280));
    assert_eq!(group.exp_value(&g, &int(1234)), point(7737, 3798));
    assert_eq!(group.exp_value(&g, &int(2521)), EcPoint::Infinity);
    assert_eq!(group.operate_values(&g, &point(2356, 3280)), point(971, 8902));

    let inv = group.invert_value(&g).unwrap();
    assert_eq!(inv, point(7345, 10007 - 5479));
    assert_eq!(group.operate_values(&g, &inv), EcPoint::Infinity);
    assert_eq!(group.operate_values(&EcPoint::Infinity, &g), g);
}

#[test]
fn test_small_curve_rejects_cofactor_points() {
    let group = small_group();
    assert!(group.is_member(&group.generator_value()));
    assert!(group.is_member(&EcPoint::Infinity));

    // on the curve, but of order 4 * 2521 and 2
    for (x, y) in [(2, 557), (4361, 0)] {
        assert!(group.is_on_curve(&int(x), &int(y)));
        assert!(!group.is_member(&point(x, y)));
        let bytes = group.value_to_bytes(&point(x, y));
        assert!(
            matches!(group.value_from_bytes(&bytes), Err(Error::InvalidElement(_))),
            "({x}, {y})"
        );
    }
}

#[test]
fn test_shared_group_across_threads() {
    let group = small_group();
    let copy = group.clone();
    let g = group.generator_value();
    let expected: Vec<EcPoint> = (0..40u64).map(|k| copy.exp_value(&g, &int(k))).collect();

    // every thread contends for the same descriptor
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for (k, e) in expected.iter().enumerate() {
                    let x = group.exp_value(&g, &int(k as u64));
                    assert_eq!(&x, e);
                    assert!(group.is_member(&x));
                    assert_eq!(group.operate_values(&x, &g), copy.exp_value(&g, &int(k as u64 + 1)));
                }
            });
        }
    });
    assert_eq!(expected[0], EcPoint::Infinity);
    assert_eq!(expected[2], point(2356, 3280));
}

#[test]
fn test_perturbed_point_is_rejected() {
    let group = small_group();
    let bytes = group.value_to_bytes(&point(7345, 5480));
    assert_eq!(bytes, vec![0x04, 0x1c, 0xb1, 0x15, 0x68]);
    assert!(matches!(group.value_from_bytes(&bytes), Err(Error::InvalidElement(_))));

    let bytes = group.value_to_bytes(&point(7346, 5479));
    assert!(matches!(group.value_from_bytes(&bytes), Err(Error::InvalidElement(_))));

    let mut params = small_params();
    params.gy = int(5480);
    assert!(matches!(ECqPGroup::new(params), Err(Error::InvalidParameters(_))));
}

#[test]
fn test_small_curve_has_no_embedding() {
    let group = small_group();
    assert_eq!(group.encode_length(), 0);
    assert!(matches!(group.encode_value(&[]), Err(Error::InvalidParameters(_))));
}

#[test]
fn test_invalid_curve_parameters() {
    let mut cases = vec![];

    let mut p = small_params();
    p.modulus = int(10005);
    cases.push(p);

    let mut p = small_params();
    p.order = int(2531);
    cases.push(p);

    let mut p = small_params();
    p.cofactor = int(40);
    cases.push(p);

    let mut p = small_params();
    p.cofactor = int(0);
    cases.push(p);

    let mut p = small_params();
    p.a = int(0);
    p.b = int(0);
    cases.push(p);

    let mut p = small_params();
    p.b = int(10027);
    cases.push(p);

    for params in cases {
        assert!(
            matches!(ECqPGroup::new(params.clone()), Err(Error::InvalidParameters(_))),
            "{params:?}"
        );
    }
}

#[test]
fn test_named_curves() {
    let capacities = [
        (CurveName::P192, 21),
        (CurveName::P224, 25),
        (CurveName::P256, 29),
        (CurveName::P384, 45),
        (CurveName::P521, 63),
        (CurveName::Secp256k1, 29),
    ];
    assert_eq!(CurveName::iter().count(), capacities.len());

    for (name, capacity) in capacities {
        let group = ECqPGroup::named(name).unwrap();
        assert_eq!(group.name(), Some(name));
        assert_eq!(group.encode_length(), capacity, "{name}");
        assert_eq!(group.byte_length(), 1 + 2 * group.modulus().bitlength().div_ceil(8));

        let g = group.generator_value();
        assert!(group.is_member(&g));
        assert_eq!(group.exp_value(&g, group.order()), EcPoint::Infinity, "{name}");

        let data: Vec<u8> = (0..capacity as u8).collect();
        let e = group.encode_value(&data).unwrap();
        assert!(group.is_member(&e));
        assert_eq!(group.decode_value(&e).unwrap(), data);
        assert_eq!(
            group.encode_value(&vec![0u8; capacity + 1]),
            Err(Error::EncodingTooLarge {
                length: capacity + 1,
                max: capacity
            })
        );
    }
}

#[test]
fn test_explicit_construction_matches_named() {
    for name in [CurveName::P256, CurveName::Secp256k1] {
        let named = ECqPGroup::named(name).unwrap();
        let explicit = ECqPGroup::new(name.params().unwrap()).unwrap();
        assert_eq!(named, explicit);
        assert_eq!(explicit.name(), None);
    }
}

#[test]
fn test_p256_serialization() {
    let group = ECqPGroup::named(CurveName::P256).unwrap();
    let g = group.generator_value();
    let bytes = group.value_to_bytes(&g);
    assert_eq!(bytes.len(), 65);
    assert_eq!(bytes[0], 0x04);
    assert_eq!(group.value_from_bytes(&bytes).unwrap(), g);

    assert_eq!(group.value_to_bytes(&EcPoint::Infinity), vec![0u8; 65]);
    assert_eq!(group.value_from_bytes(&[0u8; 65]).unwrap(), EcPoint::Infinity);

    let mut compressed = bytes.clone();
    compressed[0] = 0x02;
    assert!(matches!(group.value_from_bytes(&compressed), Err(Error::InvalidElement(_))));

    let mut perturbed = bytes.clone();
    perturbed[64] ^= 0x01;
    assert!(matches!(group.value_from_bytes(&perturbed), Err(Error::InvalidElement(_))));

    let mut out_of_range = vec![0x04];
    out_of_range.extend(group.modulus().add(&LargeInteger::one()).to_fixed_bytes(32).unwrap());
    out_of_range.extend_from_slice(&bytes[33..]);
    assert!(matches!(group.value_from_bytes(&out_of_range), Err(Error::InvalidElement(_))));

    assert!(matches!(group.value_from_bytes(&bytes[..64]), Err(Error::InvalidElement(_))));
}

#[test]
fn test_p256_matches_reference_implementation() {
    let group = ECqPGroup::named(CurveName::P256).unwrap();
    let g = group.generator_value();
    let mut prg = HashPrg::new(b"p256 differential");

    for _ in 0..8 {
        let k = group.field().random_residue(&mut prg, 50).unwrap();
        let kb = k.to_fixed_bytes(32).unwrap();

        let scalar = p256::Scalar::from_repr(p256::FieldBytes::clone_from_slice(&kb)).unwrap();
        let expected = (p256::ProjectivePoint::GENERATOR * scalar).to_affine();
        let expected = expected.to_encoded_point(false);

        let actual = group.exp_value(&g, &k);
        assert_eq!(group.value_to_bytes(&actual), expected.as_bytes());
        assert_eq!(group.value_from_bytes(expected.as_bytes()).unwrap(), actual);
    }
}

#[test]
fn test_p256_addition_matches_reference_implementation() {
    let group = ECqPGroup::named(CurveName::P256).unwrap();
    let mut prg = HashPrg::new(b"p256 addition");
    let a = group.random_value(&mut prg, 50).unwrap();
    let b = group.random_value(&mut prg, 50).unwrap();

    let parse = |v: &EcPoint| {
        let encoded = p256::EncodedPoint::from_bytes(group.value_to_bytes(v)).unwrap();
        p256::ProjectivePoint::from(p256::AffinePoint::from_encoded_point(&encoded).unwrap())
    };
    let expected = (parse(&a) + parse(&b)).to_affine().to_encoded_point(false);
    let actual = group.operate_values(&a, &b);
    assert_eq!(group.value_to_bytes(&actual), expected.as_bytes());

    let doubled = (parse(&a) + parse(&a)).to_affine().to_encoded_point(false);
    assert_eq!(group.value_to_bytes(&group.operate_values(&a, &a)), doubled.as_bytes());
}

#[test]
fn test_secp256k1_group_laws() {
    let group = ECqPGroup::named(CurveName::Secp256k1).unwrap();
    let mut prg = HashPrg::new(b"secp256k1 laws");
    let a = group.random_value(&mut prg, 50).unwrap();
    let b = group.random_value(&mut prg, 50).unwrap();
    let c = group.random_value(&mut prg, 50).unwrap();

    let ab_c = group.operate_values(&group.operate_values(&a, &b), &c);
    let a_bc = group.operate_values(&a, &group.operate_values(&b, &c));
    assert_eq!(ab_c, a_bc);
    assert_eq!(group.operate_values(&a, &b), group.operate_values(&b, &a));
    assert_eq!(group.operate_values(&a, &group.invert_value(&a).unwrap()), EcPoint::Infinity);

    let e1 = int(0x1234_5678_9abc_def0);
    let e2 = group.order().sub(&int(17));
    let sum = e1.add(&e2).modulo(group.order());
    assert_eq!(
        group.exp_value(&a, &sum),
        group.operate_values(&group.exp_value(&a, &e1), &group.exp_value(&a, &e2))
    );
    assert_eq!(group.exp_value(&EcPoint::Infinity, &e1), EcPoint::Infinity);
    assert_eq!(group.exp_value(&a, &int(0)), EcPoint::Infinity);
}

#[test]
fn test_decode_rejects_non_embeddings() {
    let group = ECqPGroup::named(CurveName::P256).unwrap();
    assert!(matches!(group.decode_value(&EcPoint::Infinity), Err(Error::InvalidElement(_))));
    assert!(matches!(
        group.decode_value(&group.generator_value()),
        Err(Error::InvalidElement(_))
    ));
}
