// SPDX-License-Identifier: GPL-3.0-only

use cosmic::cosmic_theme::Spacing;
use cosmic::iced::alignment::{Horizontal, Vertical};
use cosmic::iced::{Alignment, Font, Length};
use cosmic::iced_widget::row;
use cosmic::widget::{Space, button, container, icon, mouse_area, scrollable, text};
use cosmic::{Element, theme};

use crate::app::core::models::deck_counts::{CountColumn, DeckCounts};
use crate::app::core::models::deck_tree::{DeckEntry, DeckNode, DeckRow, DeckTree, NodeId};
use crate::fl;

const INDENTATION: f32 = 16.0;
const COUNT_WIDTH: f32 = 64.0;
const TOGGLE_WIDTH: f32 = 28.0;

/// Single tree of decks with their new, learn and due counts
pub struct DecksScreen {
    tree: DeckTree,
    hovered: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Expand or collapse the children of a deck
    ToggleExpanded(NodeId),
    /// The cursor entered the row of a deck
    Hovered(NodeId),
    /// The cursor left the row of a deck
    Unhovered(NodeId),
    /// Settings button of a deck was pressed
    OpenDeckOptions(NodeId),
}

pub enum Action {
    None,
    OpenPlaceholder(String),
}

impl DecksScreen {
    pub fn new(entries: &[DeckEntry]) -> Self {
        Self {
            tree: DeckTree::build(entries),
            hovered: None,
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let spacing = theme::active().cosmic().spacing;

        if self.tree.is_empty() {
            return container(text(fl!("no-decks"))).center(Length::Fill).into();
        }

        let mut rows = cosmic::widget::column::with_capacity(self.tree.len() + 1)
            .spacing(spacing.space_xxxs)
            .push(header_view(spacing, true));

        for deck_row in self.tree.visible_rows() {
            let Some(node) = self.tree.get(deck_row.id) else {
                continue;
            };
            let show_options = self.hovered == Some(node.id) && node.counts.is_some();
            let row = deck_row_view(spacing, &deck_row, node, show_options);

            rows = rows.push(
                mouse_area(row)
                    .on_enter(Message::Hovered(node.id))
                    .on_exit(Message::Unhovered(node.id)),
            );
        }

        container(scrollable(rows))
            .class(theme::Container::Card)
            .padding(spacing.space_s)
            .max_width(720.0)
            .into()
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::ToggleExpanded(id) => {
                self.tree.toggle_expanded(id);
                Action::None
            }
            Message::Hovered(id) => {
                self.hovered = Some(id);
                Action::None
            }
            Message::Unhovered(id) => {
                if self.hovered == Some(id) {
                    self.hovered = None;
                }
                Action::None
            }
            Message::OpenDeckOptions(id) => {
                let path = self.tree.path_of(id).join(" / ");
                Action::OpenPlaceholder(fl!("deck-options", path = path))
            }
        }
    }
}

//
// VIEWS
//

/// Column titles, `with_counts` adds the New/Learn/Due columns
pub fn header_view<'a, M: 'static>(spacing: Spacing, with_counts: bool) -> Element<'a, M> {
    let bold = Font {
        weight: cosmic::iced::font::Weight::Bold,
        ..Default::default()
    };

    let mut header = cosmic::widget::row::with_capacity(4)
        .align_y(Alignment::Center)
        .spacing(spacing.space_xxs)
        .padding([spacing.space_none, spacing.space_xxs])
        .push(text::title4(fl!("deck")).font(bold).width(Length::Fill));

    if with_counts {
        for label in [fl!("new"), fl!("learn"), fl!("due")] {
            header = header.push(
                text::title4(label)
                    .font(bold)
                    .align_x(Horizontal::Right)
                    .width(Length::Fixed(COUNT_WIDTH)),
            );
        }
    }

    header.into()
}

fn deck_row_view<'a>(
    spacing: Spacing,
    deck_row: &DeckRow,
    node: &'a DeckNode,
    show_options: bool,
) -> Element<'a, Message> {
    let toggle: Element<'a, Message> = if node.children.is_empty() {
        Space::new(Length::Fixed(TOGGLE_WIDTH), Length::Shrink).into()
    } else {
        button::icon(icon::from_name(expander_icon(node.expanded)))
            .on_press(Message::ToggleExpanded(node.id))
            .width(Length::Fixed(TOGGLE_WIDTH))
            .into()
    };

    let options: Element<'a, Message> = if show_options {
        button::icon(icon::from_name("emblem-system-symbolic"))
            .class(theme::Button::Text)
            .on_press(Message::OpenDeckOptions(node.id))
            .into()
    } else {
        Space::new(Length::Fixed(TOGGLE_WIDTH), Length::Shrink).into()
    };

    row![
        Space::new(
            Length::Fixed(INDENTATION * deck_row.depth as f32),
            Length::Shrink
        ),
        toggle,
        text::body(node.name.as_str())
            .align_y(Vertical::Center)
            .width(Length::Fill),
        counts_view(node.counts),
        options,
    ]
    .align_y(Alignment::Center)
    .spacing(spacing.space_xxs)
    .padding([spacing.space_xxs, spacing.space_xxs])
    .into()
}

/// The three count cells of a deck, blank for decks without counts
pub fn counts_view<'a, M: 'static>(counts: Option<DeckCounts>) -> Element<'a, M> {
    let mut cells = cosmic::widget::row::with_capacity(3);

    for column in CountColumn::ALL {
        let cell: Element<'a, M> = match counts {
            Some(counts) => {
                let value = counts.get(column);
                text::body(value.to_string())
                    .class(theme::Text::Color(column.color_for(value)))
                    .align_x(Horizontal::Right)
                    .width(Length::Fixed(COUNT_WIDTH))
                    .into()
            }
            None => Space::new(Length::Fixed(COUNT_WIDTH), Length::Shrink).into(),
        };
        cells = cells.push(cell);
    }

    cells.into()
}

pub fn expander_icon(expanded: bool) -> &'static str {
    if expanded {
        "pan-down-symbolic"
    } else {
        "pan-end-symbolic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> DecksScreen {
        DecksScreen::new(&[
            DeckEntry::new(["Languages", "Japanese"], (3, 1, 0)),
            DeckEntry::new(["Languages", "Spanish"], (0, 0, 7)),
        ])
    }

    #[test]
    fn hover_tracks_the_last_entered_row() {
        let mut screen = screen();
        let japanese = screen.tree.find(&["Languages", "Japanese"]).unwrap();
        let spanish = screen.tree.find(&["Languages", "Spanish"]).unwrap();

        screen.update(Message::Hovered(japanese));
        screen.update(Message::Hovered(spanish));
        screen.update(Message::Unhovered(japanese));
        assert_eq!(screen.hovered, Some(spanish));

        screen.update(Message::Unhovered(spanish));
        assert_eq!(screen.hovered, None);
    }

    #[test]
    fn deck_options_opens_a_placeholder() {
        let mut screen = screen();
        let japanese = screen.tree.find(&["Languages", "Japanese"]).unwrap();

        let Action::OpenPlaceholder(title) = screen.update(Message::OpenDeckOptions(japanese))
        else {
            panic!("expected a placeholder window");
        };
        assert_eq!(title, "Deck options: Languages / Japanese");
    }

    #[test]
    fn toggling_collapses_children() {
        let mut screen = screen();
        let languages = screen.tree.find(&["Languages"]).unwrap();

        screen.update(Message::ToggleExpanded(languages));
        assert_eq!(screen.tree.visible_rows().len(), 1);
    }
}
