// SPDX-License-Identifier: GPL-3.0-only

use app::AppModel;
use app::core::utils::backend;

mod app;
mod config;
mod core;
mod flags;
mod i18n;
mod key_binds;

/// The `cosmic::app::run()` function is the starting point of your application.
/// It takes two arguments:
/// - `settings` is a structure that contains everything relevant with your app's configuration, such as antialiasing, themes, icons, etc...
/// - `flags` is the data that your app needs to use before it starts.
fn main() -> cosmic::iced::Result {
    let (settings, flags) = core::settings::init();

    match backend::probe() {
        Ok(backend) => tracing::info!(%backend, "display backend found"),
        Err(err) => {
            tracing::error!(%err, "cannot start");
            eprintln!("{err}");
            std::process::exit(1);
        }
    }

    cosmic::app::run::<AppModel>(settings, flags)
}
