// SPDX-License-Identifier: GPL-3.0-only

use cosmic::{
    cosmic_config::{self, Config, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry},
    theme,
};
use serde::{Deserialize, Serialize};

const CONFIG_VERSION: u64 = 1;
const APP_ID: &str = "dev.mariinkys.Deckhand";

#[derive(Debug, Default, Clone, CosmicConfigEntry, Eq, PartialEq)]
pub struct DeckhandConfig {
    pub app_theme: AppTheme,
    pub deck_layout: DeckLayout,
}

impl DeckhandConfig {
    pub fn config_handler() -> Option<Config> {
        Config::new(APP_ID, CONFIG_VERSION).ok()
    }

    pub fn config() -> DeckhandConfig {
        match Self::config_handler() {
            Some(config_handler) => {
                DeckhandConfig::get_entry(&config_handler).unwrap_or_else(|(error, config)| {
                    tracing::error!(?error, "error whilst loading config");
                    config
                })
            }
            None => DeckhandConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum AppTheme {
    Dark,
    Light,
    #[default]
    System,
}

impl AppTheme {
    pub fn theme(&self) -> theme::Theme {
        match self {
            Self::Dark => theme::Theme::dark(),
            Self::Light => theme::Theme::light(),
            Self::System => theme::system_preference(),
        }
    }
}

/// How the decks screen lays out the deck hierarchy
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum DeckLayout {
    /// One tree with the counts next to each deck
    #[default]
    Tree,
    /// A names-only tree and a tree with counts, kept in sync by selection
    Split,
}

impl DeckLayout {
    pub fn toggled(self) -> Self {
        match self {
            DeckLayout::Tree => DeckLayout::Split,
            DeckLayout::Split => DeckLayout::Tree,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_toggles_back_and_forth() {
        assert_eq!(DeckLayout::default(), DeckLayout::Tree);
        assert_eq!(DeckLayout::Tree.toggled(), DeckLayout::Split);
        assert_eq!(DeckLayout::Tree.toggled().toggled(), DeckLayout::Tree);
    }
}
