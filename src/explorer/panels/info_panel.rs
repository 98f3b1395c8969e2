//! Info panel for the right side of the explorer: transform snapshot and components.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;
use bevy::ui::Val::*;

use super::{spawn_scroll_area, spawn_section_title};
use crate::explorer::config::ExplorerConfig;
use crate::explorer::state::ExplorerPanes;

/// Marker component for the info panel container.
#[derive(Component)]
pub struct InfoPanel;

/// Marker for the transform text.
#[derive(Component)]
pub struct TransformText;

/// Marker for the scrollable components content.
#[derive(Component)]
pub struct ComponentsContent;

/// Marker for the components text.
#[derive(Component)]
pub struct ComponentsText;

/// Copies the polled panes into their text widgets.
pub fn sync_info_panel(
    panes: Res<ExplorerPanes>,
    mut transform_texts: Query<&mut Text, (With<TransformText>, Without<ComponentsText>)>,
    mut component_texts: Query<&mut Text, (With<ComponentsText>, Without<TransformText>)>,
) {
    for mut text in transform_texts.iter_mut() {
        if text.0 != panes.transform {
            text.0 = panes.transform.clone();
        }
    }
    for mut text in component_texts.iter_mut() {
        if text.0 != panes.components {
            text.0 = panes.components.clone();
        }
    }
}

/// Spawns the info panel structure.
pub fn spawn_info_panel(parent: &mut ChildSpawnerCommands<'_>, config: &ExplorerConfig) {
    parent
        .spawn((
            Node {
                flex_grow: 1.0,
                height: Percent(100.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                padding: config.panel_padding,
                border: UiRect::all(Px(1.0)),
                ..default()
            },
            BorderColor::all(config.border_color),
            InfoPanel,
        ))
        .with_children(|panel| {
            spawn_section_title(panel, config, "Transform");
            panel.spawn((
                Text::new(""),
                TextFont {
                    font_size: config.body_font_size,
                    ..default()
                },
                TextColor(Color::srgba(0.9, 0.9, 0.9, 1.0)),
                Node {
                    padding: config.panel_padding,
                    border: UiRect::all(Px(1.0)),
                    ..default()
                },
                BorderColor::all(config.border_color),
                TransformText,
            ));

            spawn_scroll_area(
                panel,
                config,
                Node {
                    width: Percent(100.0),
                    flex_grow: 1.0,
                    min_height: Px(0.0),
                    margin: UiRect::top(config.item_gap),
                    border: UiRect::all(Px(1.0)),
                    ..default()
                },
                ComponentsContent,
                |content| {
                    content.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: config.small_font_size,
                            ..default()
                        },
                        TextColor(config.muted_text_color),
                        ComponentsText,
                    ));
                },
            );
        });
}
