// SPDX-License-Identifier: GPL-3.0-only

use cosmic::{
    app::Settings,
    iced::{Limits, Size},
};
use tracing_subscriber::EnvFilter;

use crate::flags::{Flags, flags};
use crate::i18n;

pub fn init() -> (Settings, Flags) {
    set_logger();
    localize();

    let settings = get_app_settings();
    let flags = flags();

    (settings, flags)
}

pub fn set_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn localize() {
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();
    i18n::init(&requested_languages);
}

pub fn get_app_settings() -> Settings {
    let mut settings = Settings::default();

    settings = settings.size_limits(Limits::NONE.min_width(500.0).min_height(400.0));
    settings = settings.size(Size::new(708.0, 592.0));
    settings = settings.debug(false);
    settings
}
