// SPDX-License-Identifier: GPL-3.0

use std::time::Duration;

use cosmic::widget::Toast;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckhandToast {
    pub message: String,
}

impl DeckhandToast {
    pub fn new<T>(message: T) -> Self
    where
        T: ToString,
    {
        Self {
            message: message.to_string(),
        }
    }
}

impl From<DeckhandToast> for Toast<crate::app::Message> {
    fn from(toast: DeckhandToast) -> Self {
        Toast::new(toast.message).duration(Duration::from_secs(5))
    }
}
