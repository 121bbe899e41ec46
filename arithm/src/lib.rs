// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Multi-precision arithmetic and prime order groups for the VoteSecure project

#![doc = include_str!("../README.md")]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

/// Defines standard choices of group and random number generator.
pub mod context;
pub mod cryptosystem;
/// Jacobian arithmetic on short Weierstrass curves.
#[cfg(feature = "ecq")]
pub mod ec;
pub mod fields;
pub mod groups;
pub mod largeinteger;
/// Allocation-free arithmetic on little-endian digit slices.
pub mod li;
/// Signed integers of fixed capacity.
pub mod sli;
/// Abstractions for prime order groups.
pub mod traits;
/// Utilities such as error handling and random number generation.
pub mod utils;
