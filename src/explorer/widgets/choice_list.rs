//! Filterable choice list - a searchable dropdown laid out inline.
//!
//! Each list has:
//! 1. A header showing the list title and the current value (or a placeholder)
//! 2. A filter box: click it to focus, then type to filter the entries
//! 3. A scrollable column of entries; clicking one navigates to it
//!
//! Focusing the filter box re-syncs the entries with the live hierarchy, the same
//! way opening a dropdown would.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::ecs::observer::On;
use bevy::feathers::controls::{ButtonProps, button};
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input_focus::{FocusedInput, InputFocus};
use bevy::picking::events::{Click, Pointer};
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy::ui::Val::*;
use bevy::ui_widgets::{Activate, observe};

use crate::explorer::config::ExplorerConfig;
use crate::explorer::core_plugin::ExplorerSet;
use crate::explorer::panels::spawn_scroll_area;
use crate::explorer::state::{ChoiceSet, ExplorerPanes, NavigationRequest};
use crate::fuzzy_filter::{filter_choices, matches_filter};
use crate::hierarchy_navigation::NavigationTarget;

/// Placeholder text of an empty filter box.
const FILTER_PLACEHOLDER: &str = "Type to filter...";

/// Which of the navigation lists a widget belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChoiceListKind {
    /// Children of the selection's parent, with the selection as current value.
    Siblings,
    /// Children of the selection.
    Children,
    /// Entries of the well-known registry.
    WellKnown,
}

impl ChoiceListKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Siblings => "Selected",
            Self::Children => "Children",
            Self::WellKnown => "Well Known",
        }
    }

    /// The rendered entries for this list.
    pub fn choices(self, panes: &ExplorerPanes) -> &ChoiceSet {
        match self {
            Self::Siblings => &panes.siblings,
            Self::Children => &panes.children,
            Self::WellKnown => &panes.well_known,
        }
    }

    /// Navigation target for picking entry `index` labelled `label`.
    pub fn target(self, index: usize, label: &str) -> NavigationTarget {
        match self {
            Self::Siblings => NavigationTarget::Sibling(index),
            Self::Children => NavigationTarget::Child(index),
            Self::WellKnown => NavigationTarget::WellKnown(label.to_string()),
        }
    }
}

/// Header text of a list.
#[derive(Component)]
pub struct ChoiceListHeader(pub ChoiceListKind);

/// The focusable filter box. Holds the typed filter text.
#[derive(Component)]
pub struct ChoiceListFilter {
    pub kind: ChoiceListKind,
    pub text: String,
}

/// Text inside the filter box.
#[derive(Component)]
pub struct ChoiceListFilterText;

/// Scrollable container of the entries.
#[derive(Component)]
pub struct ChoiceListRows(pub ChoiceListKind);

/// One entry. Stores its position in the unfiltered list.
#[derive(Component, Clone, Debug)]
pub struct ChoiceRow {
    pub kind: ChoiceListKind,
    pub index: usize,
    pub label: String,
}

/// Observer: focus the filter box and re-sync the entries.
fn on_filter_click(
    mut click: On<Pointer<Click>>,
    filters: Query<(), With<ChoiceListFilter>>,
    mut input_focus: ResMut<InputFocus>,
    mut commands: Commands,
) {
    if !filters.contains(click.entity) {
        return;
    }
    click.propagate(false);
    input_focus.set(click.entity);
    commands.trigger(NavigationRequest::ResyncLists);
}

/// Observer: edit the focused filter box.
fn on_filter_keyboard_input(
    trigger: On<FocusedInput<KeyboardInput>>,
    mut filters: Query<&mut ChoiceListFilter>,
    mut input_focus: ResMut<InputFocus>,
) {
    if trigger.input.state != ButtonState::Pressed {
        return;
    }

    let Ok(mut filter) = filters.get_mut(trigger.focused_entity) else {
        return;
    };

    match &trigger.input.logical_key {
        Key::Backspace => {
            filter.text.pop();
        }
        Key::Escape => {
            filter.text.clear();
            input_focus.clear();
        }
        Key::Enter => input_focus.clear(),
        Key::Space => filter.text.push(' '),
        Key::Character(c) => filter.text.push_str(c),
        _ => {}
    }
}

/// Observer for entry clicks.
/// Traverses up the parent hierarchy to find the ChoiceRow component.
fn on_choice_row_click(
    activate: On<Activate>,
    rows: Query<&ChoiceRow>,
    parents: Query<&ChildOf>,
    mut commands: Commands,
) {
    let mut current = activate.entity;
    loop {
        if let Ok(row) = rows.get(current) {
            commands.trigger(NavigationRequest::Navigate(
                row.kind.target(row.index, &row.label),
            ));
            return;
        }
        match parents.get(current) {
            Ok(child_of) => current = child_of.parent(),
            Err(_) => break,
        }
    }
    warn!("Could not find ChoiceRow in hierarchy!");
}

fn row_display(visible: bool) -> Display {
    if visible { Display::Flex } else { Display::None }
}

/// Rebuilds list entries whenever the rendered choices change, and keeps headers current.
pub fn sync_choice_lists(
    mut commands: Commands,
    panes: Res<ExplorerPanes>,
    config: Res<ExplorerConfig>,
    lists: Query<(Entity, &ChoiceListRows, Option<&Children>)>,
    filters: Query<&ChoiceListFilter>,
    mut headers: Query<(&ChoiceListHeader, &mut Text)>,
    mut rendered: Local<HashMap<Entity, ChoiceSet>>,
) {
    for (header, mut text) in headers.iter_mut() {
        let set = header.0.choices(&panes);
        let label = format!("{}: {}", header.0.title(), set.current_label());
        if text.0 != label {
            text.0 = label;
        }
    }

    for (list_entity, rows, existing) in lists.iter() {
        let kind = rows.0;
        let set = kind.choices(&panes);
        if rendered.get(&list_entity) == Some(set) {
            continue;
        }

        if let Some(existing) = existing {
            for child in existing.iter() {
                commands.entity(child).despawn();
            }
        }

        let filter = filters
            .iter()
            .find(|f| f.kind == kind)
            .map(|f| f.text.as_str())
            .unwrap_or("");
        let visible = filter_choices(filter, &set.choices);

        commands.entity(list_entity).with_children(|list| {
            for (index, label) in set.choices.iter().enumerate() {
                spawn_choice_row(
                    list,
                    &config,
                    ChoiceRow {
                        kind,
                        index,
                        label: label.clone(),
                    },
                    set.current == Some(index),
                    visible.contains(&index),
                );
            }
        });

        rendered.insert(list_entity, set.clone());
    }
}

fn spawn_choice_row(
    parent: &mut ChildSpawnerCommands<'_>,
    config: &ExplorerConfig,
    row: ChoiceRow,
    is_current: bool,
    visible: bool,
) {
    let label = row.label.clone();

    // Wrap button in container so filtering can hide it (button() already includes Node)
    parent
        .spawn((
            Node {
                display: row_display(visible),
                ..default()
            },
            row,
        ))
        .with_children(|wrapper| {
            wrapper.spawn((
                button(
                    ButtonProps::default(),
                    (),
                    bevy::prelude::Spawn((
                        Text::new(label),
                        TextFont {
                            font_size: config.small_font_size,
                            ..default()
                        },
                        TextColor(if is_current {
                            config.highlight_text_color
                        } else {
                            Color::srgba(0.9, 0.9, 0.9, 1.0)
                        }),
                    )),
                ),
                observe(on_choice_row_click),
            ));
        });
}

/// Applies edited filters: updates the filter box text and hides non-matching entries.
pub fn apply_choice_filters(
    changed: Query<(&ChoiceListFilter, &Children), Changed<ChoiceListFilter>>,
    mut texts: Query<&mut Text, With<ChoiceListFilterText>>,
    mut rows: Query<(&ChoiceRow, &mut Node)>,
) {
    for (filter, children) in changed.iter() {
        for child in children.iter() {
            if let Ok(mut text) = texts.get_mut(child) {
                text.0 = if filter.text.is_empty() {
                    FILTER_PLACEHOLDER.to_string()
                } else {
                    format!("{}|", filter.text)
                };
            }
        }

        for (row, mut node) in rows.iter_mut() {
            if row.kind == filter.kind {
                node.display = row_display(matches_filter(&filter.text, &row.label));
            }
        }
    }
}

/// Spawns a choice list: header, filter box and entries.
pub fn spawn_choice_list(
    parent: &mut ChildSpawnerCommands<'_>,
    config: &ExplorerConfig,
    kind: ChoiceListKind,
) {
    parent
        .spawn(Node {
            width: Percent(100.0),
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            row_gap: config.item_gap,
            ..default()
        })
        .with_children(|list| {
            list.spawn((
                Text::new(format!("{}: {}", kind.title(), ChoiceSet::PLACEHOLDER)),
                TextFont {
                    font_size: config.body_font_size,
                    ..default()
                },
                TextColor(Color::WHITE),
                ChoiceListHeader(kind),
            ));

            list.spawn((
                Node {
                    width: Percent(100.0),
                    padding: UiRect::horizontal(Px(4.0)),
                    border: UiRect::all(Px(1.0)),
                    ..default()
                },
                BorderColor::all(config.border_color),
                BackgroundColor(Color::srgba(0.15, 0.15, 0.15, 1.0)),
                Interaction::default(),
                ChoiceListFilter {
                    kind,
                    text: String::new(),
                },
                observe(on_filter_click),
            ))
            .with_child((
                Text::new(FILTER_PLACEHOLDER),
                TextFont {
                    font_size: config.small_font_size,
                    ..default()
                },
                TextColor(config.muted_text_color),
                ChoiceListFilterText,
            ));

            spawn_scroll_area(
                list,
                config,
                Node {
                    width: Percent(100.0),
                    max_height: config.choice_list_max_height,
                    ..default()
                },
                ChoiceListRows(kind),
                |_| {},
            );
        });
}

/// Plugin that adds the choice list observers and filter system.
pub struct ChoiceListPlugin;

impl Plugin for ChoiceListPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(on_filter_keyboard_input).add_systems(
            Update,
            apply_choice_filters
                .after(sync_choice_lists)
                .in_set(ExplorerSet::SyncUi),
        );
    }
}
