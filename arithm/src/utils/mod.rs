// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Utilities: error handling and random sources

/// Error handling.
pub mod error;

/// Random sources and [context][`crate::context::Context`] dependency.
pub mod rng;

pub use error::Error;
