// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! ElGamal cryptosystem

use tracing::{debug, instrument};

use crate::context::DEFAULT_STAT_DIST;
use crate::fields::PRingElement;
use crate::groups::{PGroup, PGroupElement};
use crate::utils::error::Error;
use crate::utils::rng::RandomSource;

/**
 * An `ElGamal` key pair.
 *
 * This struct represents a key pair in the `ElGamal` encryption scheme,
 * including the secret exponent and public group element.
 *
 * # Examples
 *
 * ```
 * use arithm::cryptosystem::elgamal::KeyPair;
 * use arithm::groups::PGroup;
 * use arithm::utils::rng::HashPrg;
 *
 * let mut rng = HashPrg::new(b"elgamal example");
 * let group = PGroup::named("P-256").unwrap();
 * let keypair = KeyPair::generate(&group, &mut rng).unwrap();
 *
 * let message = group.random_element(&mut rng, 50).unwrap();
 * let ciphertext = keypair.encrypt(&message, &mut rng).unwrap();
 * assert_eq!(keypair.decrypt(&ciphertext).unwrap(), message);
 * ```
 */
#[derive(Debug, PartialEq, Clone)]
pub struct KeyPair {
    /// the private key
    pub skey: PRingElement,
    /// the public key
    pub pkey: PublicKey,
}

impl KeyPair {
    /// Construct a key pair from an existing secret exponent.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if `skey` does not belong to the field of `group`
    pub fn new(group: &PGroup, skey: PRingElement) -> Result<KeyPair, Error> {
        let y = group.generator().exp(&skey)?;
        let pkey = PublicKey::new(group, y)?;
        Ok(KeyPair { skey, pkey })
    }

    /// Construct a new key pair, generating fresh key material.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` if `group` is a product group
    /// - `RandomSourceError` if `rs` fails
    #[instrument(level = "debug", skip_all, fields(bits = group.order().bitlength()))]
    pub fn generate<R: RandomSource + ?Sized>(group: &PGroup, rs: &mut R) -> Result<KeyPair, Error> {
        if group.factors().is_some() {
            return Err(Error::InvalidParameters(
                "keys are generated over an atomic group".to_string(),
            ));
        }
        let skey = group.pring().random_element(rs, DEFAULT_STAT_DIST)?;
        let keypair = KeyPair::new(group, skey)?;
        debug!("generated key pair");
        Ok(keypair)
    }

    /// Encrypt the given message with this key pair.
    ///
    /// # Errors
    ///
    /// See [`PublicKey::encrypt`].
    pub fn encrypt<R: RandomSource + ?Sized>(
        &self,
        message: &PGroupElement,
        rs: &mut R,
    ) -> Result<Ciphertext, Error> {
        self.pkey.encrypt(message, rs)
    }

    /// Decrypt the given ciphertext with this key pair.
    ///
    /// Computes the plaintext as `v / u^x`, component-wise.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if the ciphertext is not over the group of this key
    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<PGroupElement, Error> {
        self.pkey.width(&ciphertext.u.group())?;
        let u_x = ciphertext.u.exp(&self.skey)?;
        ciphertext.v.mul(&u_x.inv()?)
    }

    /// Decrypt a ciphertext produced by [`PublicKey::encrypt_bytes`].
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if the ciphertext is not over the group of this key
    /// - `InvalidElement` if the plaintext is not an embedding of bytes
    pub fn decrypt_bytes(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>, Error> {
        self.decrypt(ciphertext)?.decode()
    }
}

/**
 * An `ElGamal` public key.
 *
 * Holds the group element `y = g^x`. Messages are elements of the group of
 * the key or of a power of it; each component is encrypted with its own
 * randomness.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct PublicKey {
    group: PGroup,
    /// the public key as a raw group element
    pub y: PGroupElement,
}

impl PublicKey {
    /// Construct a public key from an existing public value.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if `y` does not belong to `group`
    /// - `InvalidParameters` if `group` is a product group
    pub fn new(group: &PGroup, y: PGroupElement) -> Result<PublicKey, Error> {
        if group.factors().is_some() {
            return Err(Error::InvalidParameters(
                "public keys live in an atomic group".to_string(),
            ));
        }
        if !group.contains(&y) {
            return Err(Error::DomainMismatch(
                "public key does not belong to the group".to_string(),
            ));
        }
        Ok(PublicKey {
            group: group.clone(),
            y,
        })
    }

    /// The group of the key.
    #[must_use]
    pub fn group(&self) -> &PGroup {
        &self.group
    }

    /// Number of components of messages over `group`: one for the group of
    /// the key, `w` for its `w`-th power.
    fn width(&self, group: &PGroup) -> Result<usize, Error> {
        if *group == self.group {
            return Ok(1);
        }
        match group.factors() {
            Some(factors) if factors.iter().all(|f| *f == self.group) => Ok(factors.len()),
            _ => Err(Error::DomainMismatch(
                "message group is not a power of the key group".to_string(),
            )),
        }
    }

    /// `e` replicated into every component of `group`.
    fn lift(&self, group: &PGroup, e: &PGroupElement) -> Result<PGroupElement, Error> {
        match self.width(group)? {
            1 if group.factors().is_none() => Ok(e.clone()),
            w => group.product_element(vec![e.clone(); w]),
        }
    }

    /// Encrypt the given message with fresh randomness.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if the message group is not the key group or a power of it
    /// - `RandomSourceError` if `rs` fails
    pub fn encrypt<R: RandomSource + ?Sized>(
        &self,
        message: &PGroupElement,
        rs: &mut R,
    ) -> Result<Ciphertext, Error> {
        let group = message.group();
        self.width(&group)?;
        let r = group.pring().random_element(rs, DEFAULT_STAT_DIST)?;
        self.encrypt_with_r(message, &r)
    }

    /// Encrypt the given message with the given randomness.
    ///
    /// `r` is an element of the ring of the message group, or a single
    /// exponent applied to every component.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if the message group is not the key group or a
    ///   power of it, or `r` belongs to the wrong ring
    /// - `ArityMismatch` if `r` has the wrong number of components
    pub fn encrypt_with_r(&self, message: &PGroupElement, r: &PRingElement) -> Result<Ciphertext, Error> {
        let group = message.group();
        let g = self.lift(&group, &self.group.generator())?;
        let y = self.lift(&group, &self.y)?;

        let u = g.exp(r)?;
        let v = message.mul(&y.exp(r)?)?;
        Ok(Ciphertext { u, v })
    }

    /**
     * Embeds `bytes` into the smallest power of the key group that holds
     * them and encrypts the result.
     *
     * # Errors
     *
     * - `EncodingTooLarge` if the key group has no embedding capacity and
     *   `bytes` is not empty
     * - `InvalidParameters` if the key group does not support embedding
     * - `RandomSourceError` if `rs` fails
     */
    pub fn encrypt_bytes<R: RandomSource + ?Sized>(
        &self,
        bytes: &[u8],
        rs: &mut R,
    ) -> Result<Ciphertext, Error> {
        let capacity = self.group.encode_length();
        if capacity == 0 && !bytes.is_empty() {
            return Err(Error::EncodingTooLarge {
                length: bytes.len(),
                max: 0,
            });
        }
        let width = bytes.len().div_ceil(capacity.max(1)).max(1);
        let group = if width == 1 {
            self.group.clone()
        } else {
            self.group.power(width)?
        };
        let message = group.encode(bytes)?;
        self.encrypt(&message, rs)
    }
}

/**
 * An `ElGamal` ciphertext.
 *
 * This struct represents a ciphertext in the `ElGamal` encryption scheme
 * as a pair of values `(u, v) = (g^r, m * y^r)`, both in the message group.
 */
#[derive(Debug, PartialEq, Clone)]
pub struct Ciphertext {
    u: PGroupElement,
    v: PGroupElement,
}

impl Ciphertext {
    /// Construct a ciphertext with given values `u` and `v`.
    ///
    /// # Errors
    ///
    /// - `DomainMismatch` if `u` and `v` belong to different groups
    pub fn new(u: PGroupElement, v: PGroupElement) -> Result<Ciphertext, Error> {
        if u.group() != v.group() {
            return Err(Error::DomainMismatch(
                "ciphertext components belong to different groups".to_string(),
            ));
        }
        Ok(Ciphertext { u, v })
    }

    /// Obtain a reference to the first element of the ciphertext, `u`.
    #[must_use]
    pub fn u(&self) -> &PGroupElement {
        &self.u
    }

    /// Obtain a reference to the second element of the ciphertext, `v`.
    #[must_use]
    pub fn v(&self) -> &PGroupElement {
        &self.v
    }

    /// Number of encrypted components.
    #[must_use]
    pub fn width(&self) -> usize {
        self.u.arity()
    }

    /// Re-encrypt the ciphertext with additional randomness `r`.
    ///
    /// # Errors
    ///
    /// As for [`PublicKey::encrypt_with_r`].
    pub fn re_encrypt(&self, r: &PRingElement, pk: &PublicKey) -> Result<Ciphertext, Error> {
        let one = pk.encrypt_with_r(&self.u.group().identity(), r)?;
        Ok(Ciphertext {
            u: self.u.mul(&one.u)?,
            v: self.v.mul(&one.v)?,
        })
    }
}
