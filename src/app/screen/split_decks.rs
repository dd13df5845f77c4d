// SPDX-License-Identifier: GPL-3.0-only

use cosmic::cosmic_theme::Spacing;
use cosmic::iced::alignment::Vertical;
use cosmic::iced::{Alignment, Length};
use cosmic::iced_widget::{column, row};
use cosmic::widget::{Space, button, container, icon, scrollable, text};
use cosmic::{Element, theme};

use crate::app::core::models::deck_tree::{DeckEntry, DeckTree, NodeId};
use crate::app::core::utils::DeckhandToast;
use crate::app::screen::decks::{counts_view, expander_icon, header_view};
use crate::fl;

const INDENTATION: f32 = 16.0;
const TOGGLE_WIDTH: f32 = 28.0;

/// Names-only hierarchy on the left, the same hierarchy with counts on the right
pub struct SplitDecksScreen {
    primary: Pane,
    secondary: Pane,
    status: Option<String>,
}

struct Pane {
    tree: DeckTree,
    selected: Option<NodeId>,
}

impl Pane {
    fn new(tree: DeckTree) -> Self {
        Self {
            tree,
            selected: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Primary,
    Secondary,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// A deck of the given pane was pressed
    Select(Side, NodeId),
    /// Expand or collapse a deck of the given pane
    ToggleExpanded(Side, NodeId),
}

pub enum Action {
    None,
    AddToast(DeckhandToast),
}

/// Result of mirroring a primary selection into the secondary tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Selected(NodeId),
    NotFound(Vec<String>),
}

/// Finds the secondary node at the same name path as the selected primary node
pub fn sync_selection(primary: &DeckTree, secondary: &DeckTree, selected: NodeId) -> SyncOutcome {
    let path = primary.path_of(selected);
    match secondary.find(&path) {
        Some(id) => SyncOutcome::Selected(id),
        None => SyncOutcome::NotFound(path),
    }
}

impl SplitDecksScreen {
    pub fn new(entries: &[DeckEntry]) -> Self {
        let secondary = DeckTree::build(entries);
        Self::with_trees(secondary.without_counts(), secondary)
    }

    pub fn with_trees(primary: DeckTree, secondary: DeckTree) -> Self {
        Self {
            primary: Pane::new(primary),
            secondary: Pane::new(secondary),
            status: None,
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let spacing = theme::active().cosmic().spacing;

        let primary = column![
            text::title4(fl!("deck-hierarchy")),
            pane_view(spacing, &self.primary, Side::Primary)
        ]
        .spacing(spacing.space_xs)
        .width(Length::FillPortion(2));

        let secondary = column![
            text::title4(fl!("deck-counts")),
            header_view(spacing, true),
            pane_view(spacing, &self.secondary, Side::Secondary)
        ]
        .spacing(spacing.space_xs)
        .width(Length::FillPortion(3));

        let status = text::caption(
            self.status
                .clone()
                .unwrap_or_else(|| fl!("select-deck")),
        );

        container(
            column![
                row![primary, secondary].spacing(spacing.space_m),
                status
            ]
            .spacing(spacing.space_s),
        )
        .class(theme::Container::Card)
        .padding(spacing.space_s)
        .max_width(960.0)
        .into()
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::Select(Side::Primary, id) => {
                self.primary.selected = Some(id);

                match sync_selection(&self.primary.tree, &self.secondary.tree, id) {
                    SyncOutcome::Selected(found) => {
                        self.secondary.selected = Some(found);
                        self.secondary.tree.reveal(found);
                        let path = self.primary.tree.path_of(id).join(" / ");
                        self.status = Some(fl!("deck-found", path = path));
                        Action::None
                    }
                    SyncOutcome::NotFound(path) => {
                        self.secondary.selected = None;
                        let status = fl!("deck-not-found", path = path.join(" / "));
                        tracing::info!(?path, "no matching deck in the counts pane");
                        self.status = Some(status.clone());
                        Action::AddToast(DeckhandToast::new(status))
                    }
                }
            }
            Message::Select(Side::Secondary, id) => {
                self.secondary.selected = Some(id);
                Action::None
            }
            Message::ToggleExpanded(side, id) => {
                self.pane_mut(side).tree.toggle_expanded(id);
                Action::None
            }
        }
    }

    fn pane_mut(&mut self, side: Side) -> &mut Pane {
        match side {
            Side::Primary => &mut self.primary,
            Side::Secondary => &mut self.secondary,
        }
    }
}

//
// VIEWS
//

fn pane_view<'a>(spacing: Spacing, pane: &'a Pane, side: Side) -> Element<'a, Message> {
    let mut rows = cosmic::widget::column::with_capacity(pane.tree.len())
        .spacing(spacing.space_xxxs);

    for deck_row in pane.tree.visible_rows() {
        let Some(node) = pane.tree.get(deck_row.id) else {
            continue;
        };

        let toggle: Element<'a, Message> = if node.children.is_empty() {
            Space::new(Length::Fixed(TOGGLE_WIDTH), Length::Shrink).into()
        } else {
            button::icon(icon::from_name(expander_icon(node.expanded)))
                .on_press(Message::ToggleExpanded(side, node.id))
                .width(Length::Fixed(TOGGLE_WIDTH))
                .into()
        };

        let mut label = cosmic::widget::row::with_capacity(2)
            .align_y(Alignment::Center)
            .push(
                text::body(node.name.as_str())
                    .align_y(Vertical::Center)
                    .width(Length::Fill),
            );
        if side == Side::Secondary {
            label = label.push(counts_view(node.counts));
        }

        let class = if pane.selected == Some(node.id) {
            theme::Button::Suggested
        } else {
            theme::Button::Text
        };

        rows = rows.push(
            row![
                Space::new(
                    Length::Fixed(INDENTATION * deck_row.depth as f32),
                    Length::Shrink
                ),
                toggle,
                button::custom(label)
                    .class(class)
                    .width(Length::Fill)
                    .on_press(Message::Select(side, node.id)),
            ]
            .align_y(Alignment::Center)
            .spacing(spacing.space_xxs),
        );
    }

    scrollable(rows).height(Length::Fill).into()
}
