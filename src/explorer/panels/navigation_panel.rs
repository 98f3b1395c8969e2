//! Navigation panel for the left side of the explorer.
//! Holds the sibling, children and well-known lists, the parent button and the
//! breadcrumb of the current selection.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::ecs::observer::On;
use bevy::feathers::controls::{ButtonProps, button};
use bevy::prelude::*;
use bevy::ui::Val::*;
use bevy::ui_widgets::{Activate, observe};

use super::{spawn_scroll_area, spawn_section_title};
use crate::explorer::config::ExplorerConfig;
use crate::explorer::state::{ExplorerPanes, NavigationRequest};
use crate::explorer::widgets::{ChoiceListKind, spawn_choice_list};
use crate::hierarchy_navigation::NavigationTarget;
use crate::node_display::HierarchyView;

/// Marker component for the navigation panel container.
#[derive(Component)]
pub struct NavigationPanel;

/// Marker for the "select parent" button.
#[derive(Component)]
pub struct ParentButton;

/// Marker for the text inside the parent button.
#[derive(Component)]
pub struct ParentButtonLabel;

/// Marker for the scrollable breadcrumb content.
#[derive(Component)]
pub struct HierarchyContent;

/// Marker for a breadcrumb line. Stores the entity it represents.
#[derive(Component)]
pub struct HierarchyNode(pub Entity);

fn on_parent_button_click(_activate: On<Activate>, mut commands: Commands) {
    commands.trigger(NavigationRequest::Navigate(NavigationTarget::Parent));
}

/// Observer for breadcrumb clicks (jump to an ancestor).
fn on_hierarchy_node_click(
    activate: On<Activate>,
    nodes: Query<&HierarchyNode>,
    mut commands: Commands,
) {
    if let Ok(node) = nodes.get(activate.entity) {
        commands.trigger(NavigationRequest::Navigate(NavigationTarget::Entity(
            Some(node.0),
        )));
    }
}

/// Keeps the parent button label in sync with the panes.
pub fn sync_parent_button(
    panes: Res<ExplorerPanes>,
    mut labels: Query<&mut Text, With<ParentButtonLabel>>,
) {
    for mut text in labels.iter_mut() {
        if text.0 != panes.parent_label {
            text.0 = panes.parent_label.clone();
        }
    }
}

/// Rebuilds the breadcrumb whenever the rendered hierarchy changes.
pub fn sync_hierarchy_pane(
    mut commands: Commands,
    panes: Res<ExplorerPanes>,
    config: Res<ExplorerConfig>,
    content: Query<(Entity, Option<&Children>), With<HierarchyContent>>,
    mut rendered: Local<Option<Option<HierarchyView>>>,
) {
    if rendered.as_ref() == Some(&panes.hierarchy) {
        return;
    }

    let Some((content_entity, existing)) = content.iter().next() else {
        return;
    };

    if let Some(existing) = existing {
        for child in existing.iter() {
            commands.entity(child).despawn();
        }
    }

    commands.entity(content_entity).with_children(|list| {
        let Some(view) = &panes.hierarchy else {
            list.spawn((
                Text::new("None selected"),
                TextFont {
                    font_size: config.body_font_size,
                    ..default()
                },
                TextColor(config.muted_text_color),
            ));
            return;
        };

        for (depth, line) in view.lines.iter().enumerate() {
            let indent = Px(depth as f32 * 10.0);
            if line.is_current {
                list.spawn((
                    Text::new(line.to_string()),
                    TextFont {
                        font_size: config.title_font_size,
                        ..default()
                    },
                    TextColor(config.highlight_text_color),
                    Node {
                        margin: UiRect::left(indent),
                        ..default()
                    },
                ));
                continue;
            }

            // Wrap button in container to handle margin (button() already includes Node)
            list.spawn(Node {
                margin: UiRect::left(indent),
                ..default()
            })
            .with_children(|wrapper| {
                wrapper.spawn((
                    button(
                        ButtonProps::default(),
                        HierarchyNode(line.entity),
                        bevy::prelude::Spawn((
                            Text::new(line.to_string()),
                            TextFont {
                                font_size: config.body_font_size,
                                ..default()
                            },
                            TextColor(Color::srgba(0.9, 0.9, 0.9, 1.0)),
                        )),
                    ),
                    observe(on_hierarchy_node_click),
                ));
            });
        }

        list.spawn((
            Text::new(view.children_line()),
            TextFont {
                font_size: config.small_font_size,
                ..default()
            },
            TextColor(config.muted_text_color),
            Node {
                margin: UiRect::left(Px(view.lines.len() as f32 * 10.0)),
                ..default()
            },
        ));
    });

    *rendered = Some(panes.hierarchy.clone());
}

/// Spawns the navigation panel structure.
pub fn spawn_navigation_panel(parent: &mut ChildSpawnerCommands<'_>, config: &ExplorerConfig) {
    parent
        .spawn((
            Node {
                width: config.left_panel_width,
                height: Percent(100.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                row_gap: config.item_gap,
                padding: config.panel_padding,
                border: UiRect::all(Px(1.0)),
                ..default()
            },
            BorderColor::all(config.border_color),
            NavigationPanel,
        ))
        .with_children(|panel| {
            spawn_choice_list(panel, config, ChoiceListKind::Siblings);

            panel.spawn((
                button(
                    ButtonProps::default(),
                    ParentButton,
                    bevy::prelude::Spawn((
                        Text::new("Select parent: (none)"),
                        TextFont {
                            font_size: config.body_font_size,
                            ..default()
                        },
                        ParentButtonLabel,
                    )),
                ),
                observe(on_parent_button_click),
            ));

            spawn_choice_list(panel, config, ChoiceListKind::Children);
            spawn_choice_list(panel, config, ChoiceListKind::WellKnown);

            spawn_section_title(panel, config, "Hierarchy");
            spawn_scroll_area(
                panel,
                config,
                Node {
                    width: Percent(100.0),
                    flex_grow: 1.0,
                    min_height: Px(0.0),
                    border: UiRect::all(Px(1.0)),
                    ..default()
                },
                HierarchyContent,
                |_| {},
            );
        });
}
