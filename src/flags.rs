use cosmic::cosmic_config;

use crate::config::DeckhandConfig;

/// Flags given to our COSMIC application to use in it's "init" function.
#[derive(Clone, Debug)]
pub struct Flags {
    pub config_handler: Option<cosmic_config::Config>,
    pub config: DeckhandConfig,
}

pub fn flags() -> Flags {
    let (config_handler, config) = (DeckhandConfig::config_handler(), DeckhandConfig::config());

    Flags {
        config_handler,
        config,
    }
}
