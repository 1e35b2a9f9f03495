// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod alerts;
pub mod allocation;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod history;
pub mod markers;
pub mod models;
pub mod money;
pub mod seed;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod utils;

pub use error::{Error, Result};
pub use store::Store;
