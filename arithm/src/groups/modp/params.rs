// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Standard safe prime groups (RFC 2409, RFC 3526)

use strum::{Display, EnumIter, EnumString};

/**
 * Names of the standard modular groups.
 *
 * Each is the subgroup of quadratic residues modulo a safe prime `p`, of
 * order `(p - 1) / 2` and generated by 2.
 *
 * # Examples
 *
 * ```
 * use std::str::FromStr;
 * use arithm::groups::modp::ModPGroupName;
 *
 * let name = ModPGroupName::from_str("modp2048").unwrap();
 * assert_eq!(name, ModPGroupName::ModP2048);
 * assert_eq!(name.to_string(), "modp2048");
 * ```
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModPGroupName {
    /// 768-bit MODP group, RFC 2409 group 1
    #[strum(serialize = "modp768")]
    #[cfg_attr(feature = "serde", serde(rename = "modp768"))]
    ModP768,
    /// 1024-bit MODP group, RFC 2409 group 2
    #[strum(serialize = "modp1024")]
    #[cfg_attr(feature = "serde", serde(rename = "modp1024"))]
    ModP1024,
    /// 2048-bit MODP group, RFC 3526 group 14
    #[strum(serialize = "modp2048")]
    #[cfg_attr(feature = "serde", serde(rename = "modp2048"))]
    ModP2048,
}

impl ModPGroupName {
    /// The safe prime modulus, in hexadecimal.
    pub(crate) fn modulus_hex(self) -> &'static str {
        match self {
            ModPGroupName::ModP768 => MODP768_P,
            ModPGroupName::ModP1024 => MODP1024_P,
            ModPGroupName::ModP2048 => MODP2048_P,
        }
    }

    /// The standard generator.
    pub(crate) fn generator(self) -> u64 {
        2
    }
}

const MODP768_P: &str = concat!(
    "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74",
    "020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6DF25F1437",
    "4FE1356D6D51C245E485B576625E7EC6F44C42E9A63A3620FFFFFFFFFFFFFFFF",
);

const MODP1024_P: &str = concat!(
    "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74",
    "020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6DF25F1437",
    "4FE1356D6D51C245E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED",
    "EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE65381FFFFFFFFFFFFFFFF",
);

const MODP2048_P: &str = concat!(
    "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD129024E088A67CC74",
    "020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6DF25F1437",
    "4FE1356D6D51C245E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED",
    "EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3DC2007CB8A163BF05",
    "98DA48361C55D39A69163FA8FD24CF5F83655D23DCA3AD961C62F356208552BB",
    "9ED529077096966D670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B",
    "E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9DE2BCBF695581718",
    "3995497CEA956AE515D2261898FA051015728E5A8AACAA68FFFFFFFFFFFFFFFF",
);
