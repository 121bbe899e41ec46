// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Standard curves: NIST P-192 to P-521 (FIPS 186-4) and secp256k1 (SEC 2)

use strum::{Display, EnumIter, EnumString};

use crate::groups::ecq::group::CurveParams;
use crate::largeinteger::LargeInteger;
use crate::utils::error::Error;

/**
 * Names of the standard curves.
 *
 * All of them have prime order and cofactor one.
 *
 * # Examples
 *
 * ```
 * use arithm::groups::ecq::CurveName;
 *
 * let name: CurveName = "P-256".parse().unwrap();
 * assert_eq!(name, CurveName::P256);
 * assert_eq!(CurveName::Secp256k1.to_string(), "secp256k1");
 * ```
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveName {
    /// NIST P-192
    #[strum(serialize = "P-192")]
    #[cfg_attr(feature = "serde", serde(rename = "P-192"))]
    P192,
    /// NIST P-224
    #[strum(serialize = "P-224")]
    #[cfg_attr(feature = "serde", serde(rename = "P-224"))]
    P224,
    /// NIST P-256
    #[strum(serialize = "P-256")]
    #[cfg_attr(feature = "serde", serde(rename = "P-256"))]
    P256,
    /// NIST P-384
    #[strum(serialize = "P-384")]
    #[cfg_attr(feature = "serde", serde(rename = "P-384"))]
    P384,
    /// NIST P-521
    #[strum(serialize = "P-521")]
    #[cfg_attr(feature = "serde", serde(rename = "P-521"))]
    P521,
    /// The Koblitz curve used by Bitcoin
    #[strum(serialize = "secp256k1")]
    #[cfg_attr(feature = "serde", serde(rename = "secp256k1"))]
    Secp256k1,
}

impl CurveName {
    /// The parameters of this curve.
    ///
    /// # Errors
    ///
    /// - `ParseError` if a stored constant is malformed
    pub fn params(self) -> Result<CurveParams, Error> {
        let c = match self {
            CurveName::P192 => &P192,
            CurveName::P224 => &P224,
            CurveName::P256 => &P256,
            CurveName::P384 => &P384,
            CurveName::P521 => &P521,
            CurveName::Secp256k1 => &SECP256K1,
        };
        Ok(CurveParams {
            modulus: LargeInteger::from_hex(c.modulus)?,
            a: LargeInteger::from_hex(c.a)?,
            b: LargeInteger::from_hex(c.b)?,
            gx: LargeInteger::from_hex(c.gx)?,
            gy: LargeInteger::from_hex(c.gy)?,
            order: LargeInteger::from_hex(c.order)?,
            cofactor: LargeInteger::one(),
        })
    }
}

struct NamedCurve {
    modulus: &'static str,
    a: &'static str,
    b: &'static str,
    gx: &'static str,
    gy: &'static str,
    order: &'static str,
}

const P192: NamedCurve = NamedCurve {
    modulus: "fffffffffffffffffffffffffffffffeffffffffffffffff",
    a: "fffffffffffffffffffffffffffffffefffffffffffffffc",
    b: "64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1",
    gx: "188da80eb03090f67cbf20eb43a18800f4ff0afd82ff1012",
    gy: "07192b95ffc8da78631011ed6b24cdd573f977a11e794811",
    order: "ffffffffffffffffffffffff99def836146bc9b1b4d22831",
};

const P224: NamedCurve = NamedCurve {
    modulus: "ffffffffffffffffffffffffffffffff000000000000000000000001",
    a: "fffffffffffffffffffffffffffffffefffffffffffffffffffffffe",
    b: "b4050a850c04b3abf54132565044b0b7d7bfd8ba270b39432355ffb4",
    gx: "b70e0cbd6bb4bf7f321390b94a03c1d356c21122343280d6115c1d21",
    gy: "bd376388b5f723fb4c22dfe6cd4375a05a07476444d5819985007e34",
    order: "ffffffffffffffffffffffffffff16a2e0b8f03e13dd29455c5c2a3d",
};

const P256: NamedCurve = NamedCurve {
    modulus: "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
    a: "ffffffff00000001000000000000000000000000fffffffffffffffffffffffc",
    b: "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b",
    gx: "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296",
    gy: "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5",
    order: "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
};

const P384: NamedCurve = NamedCurve {
    modulus: concat!(
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe",
        "ffffffff0000000000000000ffffffff",
    ),
    a: concat!(
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe",
        "ffffffff0000000000000000fffffffc",
    ),
    b: concat!(
        "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875a",
        "c656398d8a2ed19d2a85c8edd3ec2aef",
    ),
    gx: concat!(
        "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a38",
        "5502f25dbf55296c3a545e3872760ab7",
    ),
    gy: concat!(
        "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c0",
        "0a60b1ce1d7e819d7a431d7c90ea0e5f",
    ),
    order: concat!(
        "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf",
        "581a0db248b0a77aecec196accc52973",
    ),
};

const P521: NamedCurve = NamedCurve {
    modulus: concat!(
        "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "ffff",
    ),
    a: concat!(
        "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "fffc",
    ),
    b: concat!(
        "0051953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef1",
        "09e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b50",
        "3f00",
    ),
    gx: concat!(
        "00c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d",
        "3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5",
        "bd66",
    ),
    gy: concat!(
        "011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e",
        "662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd1",
        "6650",
    ),
    order: concat!(
        "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "fffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e9138",
        "6409",
    ),
};

const SECP256K1: NamedCurve = NamedCurve {
    modulus: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
    a: "0000000000000000000000000000000000000000000000000000000000000000",
    b: "0000000000000000000000000000000000000000000000000000000000000007",
    gx: "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
    gy: "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
    order: "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
};
