// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Products of groups and of rings

pub use element::PPGroup;
pub use scalar::PPRing;

/// Product group
pub mod element;

/// Product ring
pub mod scalar;
