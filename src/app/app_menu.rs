// SPDX-License-Identifier: GPL-3.0

use crate::app::Message;
use crate::app::context_page::ContextPage;
use cosmic::widget::menu;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuAction {
    ToggleLayout,
    About,
    Settings,
}

impl menu::action::MenuAction for MenuAction {
    type Message = crate::app::Message;

    fn message(&self) -> Self::Message {
        match self {
            MenuAction::ToggleLayout => Message::ToggleLayout,
            MenuAction::About => Message::ToggleContextPage(ContextPage::About),
            MenuAction::Settings => Message::ToggleContextPage(ContextPage::Settings),
        }
    }
}
