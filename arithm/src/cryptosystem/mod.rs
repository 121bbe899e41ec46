// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Public key cryptosystems.
//!
//! # [`ElGamal`][`crate::cryptosystem::elgamal`]
//!
//! The `ElGamal` cryptosystem over any [`PGroup`][`crate::groups::PGroup`].
//! Messages may be elements of the group of the key or of a power of it, in
//! which case every component is encrypted independently.
//!
//! # Examples
//!
//! ```
//! use arithm::context::Context;
//! use arithm::context::ModP2048Ctx as Ctx;
//! use arithm::cryptosystem::elgamal::KeyPair;
//!
//! let group = Ctx::group().unwrap();
//! let mut rng = Ctx::get_rng();
//! let keypair = KeyPair::generate(&group, &mut rng).unwrap();
//!
//! let ciphertext = keypair.pkey.encrypt_bytes(b"yes", &mut rng).unwrap();
//! assert_eq!(keypair.decrypt_bytes(&ciphertext).unwrap(), b"yes");
//! ```

pub mod elgamal;
