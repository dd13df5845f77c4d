// SPDX-License-Identifier: GPL-3.0

use std::time::{SystemTime, UNIX_EPOCH};

pub mod backend;
mod demo;
mod toast;

pub use demo::entries_or_demo;
pub use toast::DeckhandToast;

/// Current time in seconds since the unix epoch
pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs() as i64)
        .unwrap_or_default()
}
