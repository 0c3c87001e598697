// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod app;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod cost;
pub mod db;
pub mod errors;
pub mod models;
pub mod schedule;
pub mod seed;
pub mod store;
pub mod theme;
pub mod utils;
