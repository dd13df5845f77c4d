// SPDX-License-Identifier: GPL-3.0

pub mod database;
pub mod models;
pub mod utils;

pub use database::{Database, init_database};
