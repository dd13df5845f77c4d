// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashMap;
use std::sync::Arc;

use cosmic::app::{Core, context_drawer};
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::keyboard::{Key, Modifiers};
use cosmic::iced::{Alignment, Background, Border, Color, Event, Font, Length, Size, Subscription, window};
use cosmic::iced_widget::column;
use cosmic::widget::about::About;
use cosmic::widget::menu::Action as _;
use cosmic::widget::{self, ToastId, Toasts, button, container, menu, text};
use cosmic::{Application, ApplicationExt, Element, Task, theme};

use crate::app::app_menu::MenuAction;
use crate::app::context_page::ContextPage;
use crate::app::core::models::deck::Deck;
use crate::app::core::models::deck_tree::DeckEntry;
use crate::app::core::utils::{DeckhandToast, current_timestamp, entries_or_demo};
use crate::app::core::{Database, init_database};
use crate::app::nav::{NavAction, NavBar, NavOutcome};
use crate::app::screen::{Screen, decks, split_decks};
use crate::config::{AppTheme, DeckLayout, DeckhandConfig};
use crate::fl;
use crate::flags::Flags;
use crate::key_binds::key_binds;

pub mod app_menu;
pub mod context_page;
pub mod core;
pub mod nav;
pub mod screen;

const REPOSITORY: &str = env!("CARGO_PKG_REPOSITORY");

const NAV_BACKGROUND: Color = Color {
    r: 58.0 / 255.0,
    g: 58.0 / 255.0,
    b: 58.0 / 255.0,
    a: 1.0,
};

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    core: Core,
    /// Display a context drawer with the designated page if defined.
    context_page: ContextPage,
    /// The about page for this app.
    about: About,
    /// Key bindings for the application's menu bar.
    key_binds: HashMap<menu::KeyBind, MenuAction>,
    /// Configuration handler, used to persist the settings
    config_handler: Option<cosmic_config::Config>,
    /// Configuration data that persists between application runs.
    config: DeckhandConfig,
    /// Application themes
    app_themes: Vec<String>,
    /// Deck layouts
    deck_layouts: Vec<String>,
    /// Top navigation (Decks, Add, Browse, Stats)
    nav_bar: NavBar,
    /// Open blank windows and their titles
    placeholders: HashMap<window::Id, String>,
    /// Application toasts
    toasts: Toasts<Message>,
    /// Deck store, once initialized
    database: Option<Arc<Database>>,
    /// Decks currently shown
    entries: Vec<DeckEntry>,
    /// Current state of the application
    state: State,
}

/// Represents the current state of the application
pub enum State {
    Loading,
    Ready { screen: Screen },
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    LaunchUrl(String),
    ToggleContextPage(ContextPage),
    UpdateConfig(DeckhandConfig),
    UpdateTheme(usize),
    UpdateLayout(usize),
    ToggleLayout,
    Key(Modifiers, Key),

    Nav(NavAction),
    PlaceholderClosed(window::Id),

    AddToast(DeckhandToast),
    CloseToast(ToastId),

    DatabaseLoaded(Result<Arc<Database>, anywho::Error>),
    DecksLoaded(Result<Vec<DeckEntry>, anywho::Error>),

    Decks(decks::Message),
    SplitDecks(split_decks::Message),
}

/// Create a COSMIC application from the app model
impl Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = Flags;

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "dev.mariinkys.Deckhand";

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(core: Core, flags: Self::Flags) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::Named::new(Self::APP_ID))
            .version(env!("CARGO_PKG_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        let mut app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            key_binds: key_binds(),
            config_handler: flags.config_handler,
            config: flags.config,
            app_themes: vec![fl!("match-desktop"), fl!("dark"), fl!("light")],
            deck_layouts: vec![fl!("layout-tree"), fl!("layout-split")],
            nav_bar: NavBar::default(),
            placeholders: HashMap::new(),
            toasts: Toasts::new(Message::CloseToast),
            database: None,
            entries: Vec::new(),
            state: State::Loading,
        };

        let tasks = vec![
            app.update_title(),
            cosmic::command::set_theme(app.config.app_theme.theme()),
            Task::perform(init_database(Self::APP_ID), |result| {
                cosmic::action::app(Message::DatabaseLoaded(result))
            }),
        ];

        (app, Task::batch(tasks))
    }

    /// Elements to pack at the start of the header bar.
    fn header_start(&self) -> Vec<Element<'_, Self::Message>> {
        let menu_bar = menu::bar(vec![menu::Tree::with_children(
            Element::from(menu::root(fl!("view"))),
            menu::items(
                &self.key_binds,
                vec![
                    menu::Item::Button(fl!("toggle-layout"), None, MenuAction::ToggleLayout),
                    menu::Item::Button(fl!("settings"), None, MenuAction::Settings),
                    menu::Item::Button(fl!("about"), None, MenuAction::About),
                ],
            ),
        )]);

        vec![menu_bar.into()]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        self.context_page.display(self)
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        let spacing = theme::active().cosmic().spacing;

        let content: Element<'_, Message> = match &self.state {
            State::Loading => container(text(fl!("loading"))).center(Length::Fill).into(),
            State::Ready { screen } => match screen {
                Screen::Decks(decks_screen) => decks_screen.view().map(Message::Decks),
                Screen::SplitDecks(split_screen) => split_screen.view().map(Message::SplitDecks),
            },
        };

        let page = column![
            container(self.nav_view()).center_x(Length::Fill),
            container(content)
                .center_x(Length::Fill)
                .height(Length::Fill),
        ]
        .spacing(spacing.space_m)
        .padding(spacing.space_s);

        widget::toaster(&self.toasts, page)
    }

    /// Blank placeholder windows opened from the navigation bar
    fn view_window(&self, id: window::Id) -> Element<'_, Self::Message> {
        let title = self.placeholders.get(&id).cloned().unwrap_or_default();

        container(text::title4(fl!("blank-window", title = title)))
            .center(Length::Fill)
            .into()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        Subscription::batch(vec![
            // Watch for key_bind inputs
            cosmic::iced::event::listen_with(|event, status, _| match event {
                Event::Keyboard(cosmic::iced::keyboard::Event::KeyPressed {
                    key,
                    modifiers,
                    ..
                }) => match status {
                    cosmic::iced::event::Status::Ignored => Some(Message::Key(modifiers, key)),
                    cosmic::iced::event::Status::Captured => None,
                },
                _ => None,
            }),
            // Watch for application configuration changes.
            self.core()
                .watch_config::<DeckhandConfig>(Self::APP_ID)
                .map(|update| {
                    for why in update.errors {
                        tracing::error!(?why, "app config error");
                    }

                    Message::UpdateConfig(update.config)
                }),
        ])
    }

    /// Placeholder windows are closed by the app, the main window by the runtime
    fn on_close_requested(&self, id: window::Id) -> Option<Self::Message> {
        self.placeholders
            .contains_key(&id)
            .then_some(Message::PlaceholderClosed(id))
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        match message {
            Message::LaunchUrl(url) => match open::that_detached(&url) {
                Ok(()) => {}
                Err(err) => {
                    tracing::error!(%url, %err, "failed to open url");
                }
            },

            Message::ToggleContextPage(context_page) => {
                if self.context_page == context_page {
                    // Close the context drawer if the toggled context page is the same.
                    self.core.window.show_context = !self.core.window.show_context;
                } else {
                    // Open the context drawer to display the requested context page.
                    self.context_page = context_page;
                    self.core.window.show_context = true;
                }
            }

            Message::UpdateConfig(config) => {
                let layout_changed = config.deck_layout != self.config.deck_layout;
                self.config = config;
                if layout_changed {
                    self.rebuild_screen();
                }
            }

            Message::UpdateTheme(index) => {
                let app_theme = match index {
                    1 => AppTheme::Dark,
                    2 => AppTheme::Light,
                    _ => AppTheme::System,
                };

                if let Some(handler) = &self.config_handler {
                    if let Err(err) = self.config.set_app_theme(handler, app_theme) {
                        tracing::error!(?err, "failed to save theme");
                    }
                } else {
                    self.config.app_theme = app_theme;
                }
                return cosmic::command::set_theme(self.config.app_theme.theme());
            }

            Message::UpdateLayout(index) => {
                let deck_layout = match index {
                    1 => DeckLayout::Split,
                    _ => DeckLayout::Tree,
                };
                self.set_deck_layout(deck_layout);
            }

            Message::ToggleLayout => {
                self.set_deck_layout(self.config.deck_layout.toggled());
            }

            Message::Key(modifiers, key) => {
                for (key_bind, action) in self.key_binds.iter() {
                    if key_bind.matches(modifiers, &key) {
                        return self.update(action.message());
                    }
                }
            }

            Message::Nav(action) => match self.nav_bar.activate(action) {
                NavOutcome::None => {}
                NavOutcome::OpenPlaceholder(title) => return self.open_placeholder(title),
            },

            Message::PlaceholderClosed(id) => {
                self.placeholders.remove(&id);
                return window::close(id);
            }

            Message::AddToast(toast) => {
                return self.toasts.push(toast.into()).map(cosmic::action::app);
            }

            Message::CloseToast(id) => {
                self.toasts.remove(id);
            }

            Message::DatabaseLoaded(result) => match result {
                Ok(database) => {
                    self.database = Some(Arc::clone(&database));
                    return Task::perform(
                        Deck::load_entries(database, current_timestamp()),
                        |result| cosmic::action::app(Message::DecksLoaded(result)),
                    );
                }
                Err(err) => {
                    tracing::error!(%err, "failed to initialize the deck database");
                    self.show_entries(Vec::new());
                    return self.update(Message::AddToast(DeckhandToast::new(fl!(
                        "database-error",
                        error = err.to_string()
                    ))));
                }
            },

            Message::DecksLoaded(result) => match result {
                Ok(entries) => {
                    tracing::info!(decks = entries.len(), "decks loaded");
                    self.show_entries(entries);
                }
                Err(err) => {
                    tracing::error!(%err, "failed to load decks");
                    self.show_entries(Vec::new());
                    return self.update(Message::AddToast(DeckhandToast::new(err)));
                }
            },

            Message::Decks(message) => {
                let State::Ready {
                    screen: Screen::Decks(decks_screen),
                } = &mut self.state
                else {
                    return Task::none();
                };

                match decks_screen.update(message) {
                    decks::Action::None => {}
                    decks::Action::OpenPlaceholder(title) => return self.open_placeholder(title),
                }
            }

            Message::SplitDecks(message) => {
                let State::Ready {
                    screen: Screen::SplitDecks(split_screen),
                } = &mut self.state
                else {
                    return Task::none();
                };

                match split_screen.update(message) {
                    split_decks::Action::None => {}
                    split_decks::Action::AddToast(toast) => {
                        return self.update(Message::AddToast(toast));
                    }
                }
            }
        }

        Task::none()
    }
}

impl AppModel {
    /// Updates the header and window titles.
    pub fn update_title(&mut self) -> Task<cosmic::Action<Message>> {
        let window_title = fl!("app-title");

        if let Some(id) = self.core.main_window_id() {
            self.set_window_title(window_title, id)
        } else {
            Task::none()
        }
    }

    /// The settings page for this app.
    pub fn settings(&self) -> Element<'_, Message> {
        let app_theme_selected = match self.config.app_theme {
            AppTheme::Dark => 1,
            AppTheme::Light => 2,
            AppTheme::System => 0,
        };
        let deck_layout_selected = match self.config.deck_layout {
            DeckLayout::Tree => 0,
            DeckLayout::Split => 1,
        };

        widget::settings::view_column(vec![
            widget::settings::section()
                .title(fl!("appearance"))
                .add(
                    widget::settings::item::builder(fl!("theme")).control(widget::dropdown(
                        &self.app_themes,
                        Some(app_theme_selected),
                        Message::UpdateTheme,
                    )),
                )
                .into(),
            widget::settings::section()
                .title(fl!("layout"))
                .add(
                    widget::settings::item::builder(fl!("deck-layout")).control(
                        widget::dropdown(
                            &self.deck_layouts,
                            Some(deck_layout_selected),
                            Message::UpdateLayout,
                        ),
                    ),
                )
                .into(),
        ])
        .into()
    }

    /// Navigation bar with the Decks, Add, Browse and Stats actions
    fn nav_view(&self) -> Element<'_, Message> {
        let spacing = theme::active().cosmic().spacing;
        let bold = Font {
            weight: cosmic::iced::font::Weight::Bold,
            ..Default::default()
        };

        let mut buttons = widget::row::with_capacity(NavAction::ALL.len())
            .spacing(spacing.space_l)
            .align_y(Alignment::Center);

        for action in NavAction::ALL {
            let class = if self.nav_bar.is_checked(action) {
                theme::Button::Suggested
            } else {
                theme::Button::Text
            };

            buttons = buttons.push(
                button::custom(text::title4(action.label()).font(bold))
                    .class(class)
                    .padding([spacing.space_xxs, spacing.space_s])
                    .on_press(Message::Nav(action)),
            );
        }

        container(buttons)
            .padding([spacing.space_xxs, spacing.space_m])
            .class(theme::Container::custom(|t| {
                let mut style = theme::style::Container::primary(t.cosmic());
                style.background = Some(Background::Color(NAV_BACKGROUND));
                style.text_color = Some(Color::WHITE);
                style.border = Border {
                    radius: 10.0.into(),
                    ..Default::default()
                };
                style
            }))
            .into()
    }

    /// Opens an independent blank window with the given title
    fn open_placeholder(&mut self, title: String) -> Task<cosmic::Action<Message>> {
        let (id, open) = window::open(window::Settings {
            size: Size::new(560.0, 360.0),
            min_size: Some(Size::new(560.0, 360.0)),
            exit_on_close_request: false,
            ..Default::default()
        });

        tracing::debug!(?id, %title, "opening placeholder window");
        self.placeholders.insert(id, title.clone());

        open.discard().chain(self.set_window_title(title, id))
    }

    /// Shows the given decks, or the demonstration decks when there are none
    fn show_entries(&mut self, entries: Vec<DeckEntry>) {
        self.entries = entries_or_demo(entries);
        self.rebuild_screen();
    }

    fn rebuild_screen(&mut self) {
        if matches!(self.state, State::Loading) && self.entries.is_empty() {
            return;
        }

        self.state = State::Ready {
            screen: Screen::new(self.config.deck_layout, &self.entries),
        };
    }

    fn set_deck_layout(&mut self, deck_layout: DeckLayout) {
        if let Some(handler) = &self.config_handler {
            if let Err(err) = self.config.set_deck_layout(handler, deck_layout) {
                tracing::error!(?err, "failed to save deck layout");
            }
        } else {
            self.config.deck_layout = deck_layout;
        }

        self.rebuild_screen();
    }
}
