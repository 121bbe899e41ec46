// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Prime order subgroups of the multiplicative group modulo a prime

pub use group::ModPGroup;
pub use params::ModPGroupName;

/// [`PrimeOrderGroup`](crate::traits::groups::PrimeOrderGroup) implementation over residues
pub mod group;

/// Standard parameter sets
pub mod params;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests;
