// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod session;
pub mod tabs;
pub mod licenses;
pub mod stats;
pub mod income;
pub mod savings;
pub mod theme;
pub mod config;
pub mod doctor;
