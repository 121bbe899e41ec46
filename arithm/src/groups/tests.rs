// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

#[cfg(feature = "ecq")]
use crate::groups::ecq::{CurveName, CurveParams, ECqPGroup};
use crate::groups::modp::{ModPGroup, ModPGroupName};
use crate::groups::{PGroup, PGroupElement};
use crate::largeinteger::LargeInteger;
use crate::utils::error::Error;
use crate::utils::rng::HashPrg;

const STAT_DIST: usize = 50;

fn int(v: u64) -> LargeInteger {
    LargeInteger::from(v)
}

fn small_modp() -> PGroup {
    ModPGroup::new(int(467), int(4), int(233)).unwrap().into()
}

fn modp768() -> PGroup {
    PGroup::named("modp768").unwrap()
}

#[cfg(feature = "ecq")]
fn small_curve() -> PGroup {
    ECqPGroup::new(CurveParams {
        modulus: int(10007),
        a: int(2),
        b: int(20),
        gx: int(7345),
        gy: int(5479),
        order: int(2521),
        cofactor: int(4),
    })
    .unwrap()
    .into()
}

fn groups() -> Vec<PGroup> {
    let mut groups = vec![small_modp(), modp768()];
    #[cfg(feature = "ecq")]
    {
        groups.push(small_curve());
        groups.push(PGroup::named("P-256").unwrap());
    }
    let pair = PGroup::product(groups.clone()).unwrap();
    groups.push(small_modp().power(3).unwrap());
    groups.push(PGroup::product(vec![pair, small_modp()]).unwrap());
    groups
}

fn test_group_laws(group: &PGroup, rng: &mut HashPrg) {
    let a = group.random_element(rng, STAT_DIST).unwrap();
    let b = group.random_element(rng, STAT_DIST).unwrap();
    let c = group.random_element(rng, STAT_DIST).unwrap();
    let one = group.identity();

    assert!(group.contains(&a));
    assert!(one.is_identity());
    assert_eq!(group.operate(&a, &one).unwrap(), a);
    assert_eq!(
        group.operate(&a, &group.invert(&a).unwrap()).unwrap(),
        one
    );
    assert_eq!(a.mul(&b).unwrap(), b.mul(&a).unwrap());
    assert_eq!(
        a.mul(&b).unwrap().mul(&c).unwrap(),
        a.mul(&b.mul(&c).unwrap()).unwrap()
    );

    let ring = group.pring();
    let r = ring.random_element(rng, STAT_DIST).unwrap();
    let s = ring.random_element(rng, STAT_DIST).unwrap();
    assert_eq!(
        a.exp(&r.add(&s).unwrap()).unwrap(),
        a.exp(&r).unwrap().mul(&a.exp(&s).unwrap()).unwrap()
    );
    assert_eq!(
        a.exp(&r.mul(&s).unwrap()).unwrap(),
        a.exp(&r).unwrap().exp(&s).unwrap()
    );
    assert_eq!(a.exp(&ring.zero()).unwrap(), one);
    assert_eq!(a.exp(&ring.one()).unwrap(), a);

    assert_eq!(a.exp_int(group.order()), one);
    assert_eq!(a.exp_int(&LargeInteger::from_i64(-1)), a.inv().unwrap());
    assert_eq!(a.exp_int(&int(2)), a.mul(&a).unwrap());

    let bytes = group.element_to_bytes(&a).unwrap();
    assert_eq!(bytes.len(), group.byte_length());
    assert_eq!(group.element_from_bytes(&bytes).unwrap(), a);
}

#[test]
fn test_group_laws_for_all_groups() {
    let mut rng = HashPrg::new(b"test_group_laws_for_all_groups");
    for group in groups() {
        test_group_laws(&group, &mut rng);
    }
}

#[test]
fn test_generator_has_group_order() {
    for group in groups() {
        let g = group.generator();
        assert!(!g.is_identity());
        assert!(g.exp_int(group.order()).is_identity());
        assert_eq!(g.arity(), group.arity());
    }
}

#[test]
fn test_descriptors_compare_by_parameters() {
    let a = small_modp();
    let b = small_modp();
    assert_eq!(a, b);
    assert_ne!(a, modp768());

    // elements of separately built but equal groups interoperate
    let x = a.generator();
    let y = b.generator();
    assert_eq!(x, y);
    assert!(b.contains(&x));
    assert!(x.mul(&y).is_ok());

    assert_eq!(a.power(2).unwrap(), b.power(2).unwrap());
    assert_ne!(a.power(2).unwrap(), a.power(3).unwrap());
    assert_ne!(a.power(1).unwrap(), a);
}

#[test]
fn test_foreign_elements_are_rejected() {
    let mut rng = HashPrg::new(b"test_foreign_elements_are_rejected");
    let group = small_modp();
    let other = modp768();
    let a = group.generator();
    let b = other.generator();

    assert!(!group.contains(&b));
    assert!(matches!(a.mul(&b), Err(Error::DomainMismatch(_))));
    assert!(matches!(group.operate(&b, &b), Err(Error::DomainMismatch(_))));
    assert!(matches!(group.invert(&b), Err(Error::DomainMismatch(_))));
    assert!(matches!(group.element_to_bytes(&b), Err(Error::DomainMismatch(_))));
    assert!(matches!(group.decode(&b), Err(Error::DomainMismatch(_))));
    assert!(matches!(
        group.exponentiate_int(&b, &int(3)),
        Err(Error::DomainMismatch(_))
    ));

    let e = other.pring().random_element(&mut rng, STAT_DIST).unwrap();
    assert!(matches!(a.exp(&e), Err(Error::DomainMismatch(_))));
    assert!(matches!(group.exponentiate(&a, &e), Err(Error::DomainMismatch(_))));

    let pair = group.power(2).unwrap();
    assert!(matches!(pair.generator().mul(&a), Err(Error::DomainMismatch(_))));
}

#[test]
fn test_exponent_arity() {
    let mut rng = HashPrg::new(b"test_exponent_arity");
    let group = small_modp();
    let pair = group.power(2).unwrap();
    let g = pair.generator();

    let r = pair.pring().random_element(&mut rng, STAT_DIST).unwrap();
    let gr = g.exp(&r).unwrap();
    let (rs, grs) = (r.components().unwrap(), gr.components().unwrap());
    for i in 0..2 {
        assert_eq!(grs[i], group.generator().exp(&rs[i]).unwrap());
    }

    let triple = group.pring().power(3).unwrap().one();
    assert_eq!(
        g.exp(&triple),
        Err(Error::ArityMismatch {
            expected: 2,
            actual: 3
        })
    );
    assert_eq!(
        group.generator().exp(&r),
        Err(Error::ArityMismatch {
            expected: 1,
            actual: 2
        })
    );
}

#[test]
fn test_prod_and_exp_prod() {
    let mut rng = HashPrg::new(b"test_prod_and_exp_prod");
    for group in groups() {
        let ring = group.pring();
        let bases: Vec<PGroupElement> = (0..3)
            .map(|_| group.random_element(&mut rng, STAT_DIST).unwrap())
            .collect();
        let exponents: Vec<_> = (0..3)
            .map(|_| ring.random_element(&mut rng, STAT_DIST).unwrap())
            .collect();

        assert_eq!(group.prod(&[]).unwrap(), group.identity());
        let expected = bases[0].mul(&bases[1]).unwrap().mul(&bases[2]).unwrap();
        assert_eq!(group.prod(&bases).unwrap(), expected);

        let mut expected = group.identity();
        for (b, e) in bases.iter().zip(&exponents) {
            expected = expected.mul(&b.exp(e).unwrap()).unwrap();
        }
        assert_eq!(group.exp_prod(&bases, &exponents).unwrap(), expected);
        assert_eq!(
            group.exp_prod(&bases, &exponents[..1]),
            Err(Error::ArityMismatch {
                expected: 3,
                actual: 1
            })
        );
    }
}

#[test]
fn test_named_lookup() {
    assert_eq!(
        PGroup::named("modp1024").unwrap(),
        PGroup::from(ModPGroup::named(ModPGroupName::ModP1024).unwrap())
    );
    #[cfg(feature = "ecq")]
    assert_eq!(
        PGroup::named("secp256k1").unwrap(),
        PGroup::from(ECqPGroup::named(CurveName::Secp256k1).unwrap())
    );
    for name in ["", "modp4096", "p256", "P-255"] {
        assert!(matches!(PGroup::named(name), Err(Error::InvalidParameters(_))), "{name}");
    }
}

#[test]
fn test_product_encoding_fills_components_in_order() {
    let group = modp768();
    let pair = group.power(2).unwrap();
    assert_eq!(pair.encode_length(), 188);

    let data: Vec<u8> = (0..100u8).collect();
    let m = pair.encode(&data).unwrap();
    let components = m.components().unwrap();
    assert_eq!(components[0].decode().unwrap(), data[..94].to_vec());
    assert_eq!(components[1].decode().unwrap(), data[94..].to_vec());
    assert_eq!(pair.decode(&m).unwrap(), data);

    let short = pair.encode(&data[..3]).unwrap();
    assert_eq!(short.components().unwrap()[1].decode().unwrap(), Vec::<u8>::new());
    assert_eq!(pair.decode(&short).unwrap(), data[..3].to_vec());

    assert_eq!(
        pair.encode(&[0u8; 189]),
        Err(Error::EncodingTooLarge {
            length: 189,
            max: 188
        })
    );
}

#[test]
fn test_product_encoding_skips_empty_factors() {
    // the first factor has no room and embeds the empty string
    let group = PGroup::product(vec![small_modp(), modp768()]).unwrap();
    assert_eq!(group.encode_length(), 94);
    let m = group.encode(b"abc").unwrap();
    assert_eq!(m.components().unwrap()[0].decode().unwrap(), Vec::<u8>::new());
    assert_eq!(group.decode(&m).unwrap(), b"abc".to_vec());
}

#[cfg(feature = "ecq")]
#[test]
fn test_product_encoding_needs_embeddable_factors() {
    let group = PGroup::product(vec![modp768(), small_curve()]).unwrap();
    assert!(matches!(group.encode(b"abc"), Err(Error::InvalidParameters(_))));
}

#[test]
fn test_product_element_from_bytes() {
    let group = PGroup::product(vec![small_modp(), modp768()]).unwrap();
    assert_eq!(group.byte_length(), 2 + 96);

    let g = group.generator();
    let mut bytes = g.to_bytes();
    assert_eq!(group.element_from_bytes(&bytes).unwrap(), g);

    assert!(matches!(
        group.element_from_bytes(&bytes[1..]),
        Err(Error::InvalidElement(_))
    ));
    // 2 is not a member of the first factor
    bytes[1] = 0x02;
    assert!(matches!(group.element_from_bytes(&bytes), Err(Error::InvalidElement(_))));
}

#[test]
fn test_product_element() {
    let group = small_modp();
    let other = modp768();
    let pair = PGroup::product(vec![group.clone(), other.clone()]).unwrap();

    let x = pair
        .product_element(vec![group.generator(), other.generator()])
        .unwrap();
    assert_eq!(x, pair.generator());

    assert_eq!(
        pair.product_element(vec![group.generator()]),
        Err(Error::ArityMismatch {
            expected: 2,
            actual: 1
        })
    );
    assert!(matches!(
        pair.product_element(vec![other.generator(), group.generator()]),
        Err(Error::DomainMismatch(_))
    ));
    assert!(matches!(
        group.product_element(vec![group.generator()]),
        Err(Error::DomainMismatch(_))
    ));
}

#[test]
fn test_atomic_accessors() {
    let group = small_modp();
    let g = group.generator();
    assert_eq!(g.as_residue(), Some(&int(4)));
    assert!(g.components().is_none());
    assert_eq!(group.factors(), None);
    assert_eq!(group.order(), &int(233));

    let pair = group.power(2).unwrap();
    assert_eq!(pair.order(), &int(233 * 233));
    assert!(pair.generator().as_residue().is_none());
    assert_eq!(pair.factors().map(<[PGroup]>::len), Some(2));

    #[cfg(feature = "ecq")]
    {
        let curve = small_curve();
        assert!(curve.generator().as_point().is_some());
        assert!(curve.identity().as_point().is_some());
        assert!(g.as_point().is_none());
    }
}
