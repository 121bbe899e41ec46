// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Prime order groups over elliptic curves, built on [`crate::ec`]

pub use curves::CurveName;
pub use group::{CurveParams, ECqPGroup, EcPoint};

/// Standard curve parameters
pub mod curves;

/// [`PrimeOrderGroup`](crate::traits::groups::PrimeOrderGroup) implementation over curve points
pub mod group;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests;
