// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

use strum::IntoEnumIterator;

use crate::groups::modp::{ModPGroup, ModPGroupName};
use crate::largeinteger::LargeInteger;
use crate::traits::groups::PrimeOrderGroup;
use crate::utils::error::Error;
use crate::utils::rng::HashPrg;

fn int(v: u64) -> LargeInteger {
    LargeInteger::from(v)
}

fn small_group() -> ModPGroup {
    ModPGroup::new(int(467), int(4), int(233)).unwrap()
}

#[test]
fn test_small_group_parameters() {
    let group = small_group();
    assert_eq!(group.cofactor(), &int(2));
    assert_eq!(group.byte_length(), 2);
    assert_eq!(group.field().order(), &int(233));
    assert_eq!(group.name(), None);

    let g = group.generator_value();
    assert!(group.exp_value(&g, &int(233)).is_one());
    assert!(group.exp_value(&g, &int(0)).is_one());
    assert_eq!(group.invert_value(&g).unwrap(), int(117));
    assert_eq!(group.operate_values(&g, &int(117)), group.identity_value());
}

#[test]
fn test_small_group_membership() {
    let group = small_group();
    assert!(group.is_member(&int(1)));
    assert!(group.is_member(&int(4)));
    // 2 and -1 are non-residues modulo 467
    assert!(!group.is_member(&int(2)));
    assert!(!group.is_member(&int(466)));
    assert!(!group.is_member(&int(0)));
    assert!(!group.is_member(&int(467)));
    assert!(!group.is_member(&int(471)));
    assert!(!group.is_member(&LargeInteger::from_i64(-4)));
}

#[test]
fn test_small_group_serialization() {
    let group = small_group();
    assert_eq!(group.value_to_bytes(&int(4)), vec![0x00, 0x04]);
    assert_eq!(group.value_from_bytes(&[0x00, 0x04]).unwrap(), int(4));

    for bad in [&[0x00, 0x02][..], &[0x01, 0xd3], &[0x00, 0x00], &[0x04], &[0x00, 0x00, 0x04]] {
        assert!(matches!(group.value_from_bytes(bad), Err(Error::InvalidElement(_))), "{bad:?}");
    }
}

#[test]
fn test_small_group_has_no_room_for_plaintexts() {
    let group = small_group();
    assert_eq!(group.encode_length(), 0);
    assert_eq!(
        group.encode_value(&[0x41, 0x42]),
        Err(Error::EncodingTooLarge { length: 2, max: 0 })
    );

    let empty = group.encode_value(&[]).unwrap();
    assert!(group.is_member(&empty));
    assert_eq!(group.decode_value(&empty).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_embedding_round_trip() {
    let group = ModPGroup::named(ModPGroupName::ModP768).unwrap();
    assert_eq!(group.encode_length(), 94);

    let e = group.encode_value(&[0x41, 0x42]).unwrap();
    assert!(group.is_member(&e));
    assert_eq!(group.decode_value(&e).unwrap(), vec![0x41, 0x42]);

    let full: Vec<u8> = (0..94u8).map(|i| i.wrapping_mul(37) ^ 0xa5).collect();
    let e = group.encode_value(&full).unwrap();
    assert!(group.is_member(&e));
    assert_eq!(group.decode_value(&e).unwrap(), full);

    for data in [&[][..], &[0x00], &[0xff, 0xff, 0xff], &[0x00, 0x00, 0x01]] {
        let e = group.encode_value(data).unwrap();
        assert_eq!(group.decode_value(&e).unwrap(), data);
    }

    assert_eq!(
        group.encode_value(&[0u8; 95]),
        Err(Error::EncodingTooLarge { length: 95, max: 94 })
    );
}

#[test]
fn test_decode_rejects_non_embeddings() {
    let group = ModPGroup::named(ModPGroupName::ModP768).unwrap();
    assert!(matches!(
        group.decode_value(&group.generator_value()),
        Err(Error::InvalidElement(_))
    ));
    let g = group.generator_value();
    let big = group.exp_value(&g, &int(0xdead_beef));
    assert!(matches!(group.decode_value(&big), Err(Error::InvalidElement(_))));
}

#[test]
fn test_invalid_parameters() {
    let cases = [
        // order does not divide p - 1
        (467, 4, 231),
        // composite modulus, 933 = 3 * 311
        (933, 4, 233),
        // composite order
        (467, 4, 466),
        // 2 has order 466
        (467, 2, 233),
        (467, 1, 233),
        (467, 471, 233),
        (2, 1, 1),
    ];
    for (p, g, q) in cases {
        assert!(
            matches!(ModPGroup::new(int(p), int(g), int(q)), Err(Error::InvalidParameters(_))),
            "({p}, {g}, {q})"
        );
    }
}

#[test]
fn test_trivial_orders_are_rejected() {
    // orders below 2 cannot be prime
    for q in [0, 1] {
        assert!(
            matches!(ModPGroup::new(int(467), int(4), int(q)), Err(Error::InvalidParameters(_))),
            "order {q}"
        );
    }
    assert!(matches!(
        ModPGroup::new(int(467), int(1), int(1)),
        Err(Error::InvalidParameters(_))
    ));
}

#[test]
fn test_non_safe_prime_has_no_embedding() {
    // 1399 = 6 * 233 + 1
    let group = ModPGroup::new(int(1399), int(64), int(233)).unwrap();
    assert_eq!(group.cofactor(), &int(6));
    assert_eq!(group.encode_length(), 0);
    assert!(matches!(group.encode_value(&[]), Err(Error::InvalidParameters(_))));
    assert!(matches!(group.decode_value(&int(64)), Err(Error::InvalidParameters(_))));

    assert!(group.is_member(&int(2)));
    assert!(group.is_member(&int(64)));
    assert!(!group.is_member(&int(3)));
}

#[test]
fn test_named_groups() {
    let expected = [
        (ModPGroupName::ModP768, 768, 94),
        (ModPGroupName::ModP1024, 1024, 126),
        (ModPGroupName::ModP2048, 2048, 254),
    ];
    assert_eq!(ModPGroupName::iter().count(), expected.len());

    for (name, bits, encode_length) in expected {
        let group = ModPGroup::named(name).unwrap();
        assert_eq!(group.name(), Some(name));
        assert_eq!(group.modulus().bitlength(), bits);
        assert_eq!(group.byte_length(), bits / 8);
        assert_eq!(group.encode_length(), encode_length);
        assert_eq!(group.order(), &group.modulus().shift_right(1));
        assert!(group.is_member(&group.generator_value()));
        assert_eq!(name.to_string().parse::<ModPGroupName>().unwrap(), name);
    }
}

#[test]
fn test_named_modulus_is_a_safe_prime() {
    let group = ModPGroup::named(ModPGroupName::ModP768).unwrap();
    let mut prg = HashPrg::new(b"modp768");
    assert!(group.modulus().is_probable_prime(8, &mut prg).unwrap());
    assert!(group.order().is_probable_prime(8, &mut prg).unwrap());

    // explicit construction agrees with the named group
    let explicit = ModPGroup::new(group.modulus().clone(), int(2), group.order().clone()).unwrap();
    assert_eq!(explicit, group);
}

#[test]
fn test_random_values_are_members() {
    let group = small_group();
    let mut prg = HashPrg::new(b"modp random");
    for _ in 0..20 {
        let v = group.random_value(&mut prg, 50).unwrap();
        assert!(group.is_member(&v));
        let bytes = group.value_to_bytes(&v);
        assert_eq!(group.value_from_bytes(&bytes).unwrap(), v);
    }
}
