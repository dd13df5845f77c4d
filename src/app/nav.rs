// SPDX-License-Identifier: GPL-3.0-only

use crate::fl;

/// Top-level actions of the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    Decks,
    Add,
    Browse,
    Stats,
}

impl NavAction {
    pub const ALL: [Self; 4] = [Self::Decks, Self::Add, Self::Browse, Self::Stats];

    pub fn label(&self) -> String {
        match self {
            NavAction::Decks => fl!("decks"),
            NavAction::Add => fl!("add"),
            NavAction::Browse => fl!("browse"),
            NavAction::Stats => fl!("stats"),
        }
    }
}

/// What the app has to do after a [`NavAction`] was activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// Stay on the decks screen
    None,
    /// Open a blank placeholder window with the given title
    OpenPlaceholder(String),
}

/// The navigation bar. Decks is the only screen and can't be unchecked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBar {
    decks_checked: bool,
}

impl Default for NavBar {
    fn default() -> Self {
        Self {
            decks_checked: true,
        }
    }
}

impl NavBar {
    pub fn is_checked(&self, action: NavAction) -> bool {
        action == NavAction::Decks && self.decks_checked
    }

    pub fn activate(&mut self, action: NavAction) -> NavOutcome {
        match action {
            NavAction::Decks => {
                self.decks_checked = true;
                NavOutcome::None
            }
            NavAction::Add | NavAction::Browse | NavAction::Stats => {
                NavOutcome::OpenPlaceholder(action.label())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decks_starts_checked() {
        let nav = NavBar::default();

        assert!(nav.is_checked(NavAction::Decks));
        assert!(!nav.is_checked(NavAction::Add));
    }

    #[test]
    fn other_actions_open_placeholders_and_keep_decks_checked() {
        let mut nav = NavBar::default();

        for action in [NavAction::Add, NavAction::Browse, NavAction::Stats] {
            assert_eq!(
                nav.activate(action),
                NavOutcome::OpenPlaceholder(action.label())
            );
            assert!(nav.is_checked(NavAction::Decks));
            assert!(!nav.is_checked(action));
        }
    }

    #[test]
    fn decks_cannot_be_unchecked() {
        let mut nav = NavBar::default();

        for _ in 0..3 {
            assert_eq!(nav.activate(NavAction::Decks), NavOutcome::None);
            assert!(nav.is_checked(NavAction::Decks));
        }
    }

    #[test]
    fn activating_decks_forces_it_checked() {
        let mut nav = NavBar {
            decks_checked: false,
        };

        nav.activate(NavAction::Decks);
        assert!(nav.is_checked(NavAction::Decks));
    }

    #[test]
    fn placeholder_titles_use_the_action_label() {
        let mut nav = NavBar::default();

        assert_eq!(
            nav.activate(NavAction::Browse),
            NavOutcome::OpenPlaceholder(String::from("Browse"))
        );
    }
}
