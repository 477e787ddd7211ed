// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod preferences;
pub mod repository;
pub mod storage;
pub mod store;
pub mod utils;
