// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Error type for this library

use thiserror::Error;

/**
 * Error type for the arithmetic library.
 *
 * Validation errors ([`Error::InvalidElement`], [`Error::InvalidParameters`])
 * abort the operation that produced them; nothing in this crate coerces an
 * invalid input into a valid one.
 */
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Operands belong to different group or ring instances
    #[error("domain mismatch: {0}")]
    DomainMismatch(String),

    /// An element failed validation: not on the curve, outside the prime order
    /// subgroup, zero where disallowed or out of range
    #[error("invalid element: {0}")]
    InvalidElement(String),

    /// Malformed or inconsistent descriptor parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Input is longer than the embedding capacity of the group
    #[error("encoding too large: {length} bytes exceeds the maximum of {max}")]
    EncodingTooLarge {
        /// Length of the rejected input
        length: usize,
        /// Largest accepted length
        max: usize,
    },

    /// An inverse was requested for a non-unit
    #[error("element is not invertible")]
    NotInvertible,

    /// The random source failed to produce the requested bytes
    #[error("random source error: {0}")]
    RandomSourceError(String),

    /// Product operand or exponent tuple length disagrees with the descriptor arity
    #[error("arity mismatch: expected {expected}, got {actual}")]
    ArityMismatch {
        /// Arity of the descriptor
        expected: usize,
        /// Arity of the operand
        actual: usize,
    },

    /// Malformed textual input, e.g. a hexadecimal string
    #[error("{0}")]
    ParseError(String),
}

impl From<rand::Error> for Error {
    fn from(e: rand::Error) -> Self {
        Error::RandomSourceError(e.to_string())
    }
}
