//! UI panels for the explorer.

pub mod info_panel;
pub mod navigation_panel;

pub use info_panel::*;
pub use navigation_panel::*;

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;
use bevy::ui::Val::*;
use bevy::ui_widgets::{ControlOrientation, CoreScrollbarThumb, Scrollbar};

use crate::explorer::config::ExplorerConfig;

/// Spawns a vertically scrolling area with a scrollbar.
///
/// `outer` sizes the area, `content` is added to the scrolling column and `fill`
/// spawns its initial children.
pub(crate) fn spawn_scroll_area(
    parent: &mut ChildSpawnerCommands<'_>,
    config: &ExplorerConfig,
    mut outer: Node,
    content: impl Bundle,
    fill: impl FnOnce(&mut ChildSpawnerCommands<'_>),
) {
    let scrollbar_width = config.scrollbar_width;
    outer.display = Display::Grid;
    outer.grid_template_columns = vec![GridTrack::fr(1.0), GridTrack::px(scrollbar_width)];

    parent.spawn(outer).with_children(|scroll_area| {
        let content_id = scroll_area
            .spawn((
                Node {
                    display: Display::Flex,
                    flex_direction: FlexDirection::Column,
                    row_gap: config.item_gap,
                    padding: config.panel_padding,
                    overflow: Overflow::scroll_y(),
                    ..default()
                },
                ScrollPosition::default(),
                content,
            ))
            .with_children(fill)
            .id();

        scroll_area
            .spawn((
                Scrollbar {
                    target: content_id,
                    orientation: ControlOrientation::Vertical,
                    min_thumb_length: 20.0,
                },
                Node {
                    width: Px(scrollbar_width),
                    height: Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.15, 0.15, 0.15, 0.5)),
            ))
            .with_children(|sb| {
                sb.spawn((
                    CoreScrollbarThumb,
                    Node {
                        width: Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.5, 0.5, 0.5, 0.8)),
                ));
            });
    });
}

/// Spawns a section title.
pub(crate) fn spawn_section_title(
    parent: &mut ChildSpawnerCommands<'_>,
    config: &ExplorerConfig,
    title: &str,
) {
    parent.spawn((
        Text::new(title),
        TextFont {
            font_size: config.title_font_size,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            margin: UiRect::new(Px(0.0), Px(0.0), Px(8.0), Px(4.0)),
            ..default()
        },
    ));
}
