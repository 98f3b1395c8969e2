//! Explorer window plugin and UI scaffold.

use bevy::camera::RenderTarget;
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::feathers::FeathersPlugins;
use bevy::feathers::dark_theme::create_dark_theme;
use bevy::feathers::theme::{ThemeBackgroundColor, UiTheme};
use bevy::feathers::tokens;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::picking::hover::HoverMap;
use bevy::prelude::*;
use bevy::ui::Val::*;
use bevy::window::{WindowRef, WindowResolution};

use super::config::ExplorerConfig;
use super::core_plugin::{ExplorerSet, SceneExplorerCorePlugin};
use super::panels::{
    spawn_info_panel, spawn_navigation_panel, sync_hierarchy_pane, sync_info_panel,
    sync_parent_button,
};
use super::state::{ExplorerInternal, ExplorerVisibility, ExplorerWindowState};
use super::widgets::{ChoiceListPlugin, sync_choice_lists};

/// Marker component for the explorer window.
#[derive(Component)]
pub struct ExplorerWindow;

/// Marker for the root UI node, hidden by the toggle key.
#[derive(Component)]
pub struct ExplorerRoot;

/// Marker to indicate UI has been initialized.
#[derive(Component)]
struct ExplorerUiInitialized;

/// Plugin that opens the explorer window and keeps its UI in sync.
pub struct ExplorerWindowPlugin;

impl Plugin for ExplorerWindowPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(FeathersPlugins)
            .add_plugins(SceneExplorerCorePlugin)
            .add_plugins(ChoiceListPlugin)
            .insert_resource(UiTheme(create_dark_theme()))
            .init_resource::<ExplorerWindowState>()
            // Startup
            .add_systems(Startup, setup_explorer_window)
            // Update systems
            .add_systems(
                Update,
                (
                    // Input handling
                    (
                        handle_mouse_wheel_scroll,
                        toggle_explorer_panel,
                        update_explorer_visibility,
                    )
                        .chain()
                        .in_set(ExplorerSet::Input),
                    // UI sync
                    (
                        setup_explorer_ui,
                        sync_parent_button,
                        sync_choice_lists,
                        sync_hierarchy_pane,
                        sync_info_panel,
                    )
                        .chain()
                        .in_set(ExplorerSet::SyncUi),
                    // Cleanup
                    handle_window_close,
                ),
            );
    }
}

/// Spawns the explorer window on startup.
fn setup_explorer_window(mut commands: Commands, mut window_state: ResMut<ExplorerWindowState>) {
    let window_entity = commands
        .spawn((
            Window {
                title: "Scene Explorer".to_string(),
                resolution: WindowResolution::new(1000, 720),
                ..default()
            },
            ExplorerWindow,
            ExplorerInternal,
            Visibility::Visible,
            InheritedVisibility::default(),
            ViewVisibility::default(),
        ))
        .id();

    window_state.window_entity = Some(window_entity);
    window_state.is_open = true;

    info!("Explorer window created: {:?}", window_entity);
}

/// Sets up the UI scaffold once the window exists.
fn setup_explorer_ui(
    mut commands: Commands,
    mut window_state: ResMut<ExplorerWindowState>,
    config: Res<ExplorerConfig>,
    explorer_windows: Query<Entity, (With<ExplorerWindow>, Without<ExplorerUiInitialized>)>,
) {
    let Some(window_entity) = window_state.window_entity else {
        return;
    };

    if explorer_windows.get(window_entity).is_err() {
        return;
    }

    commands.entity(window_entity).insert(ExplorerUiInitialized);

    let camera_entity = commands
        .spawn((
            Camera2d,
            Camera {
                target: RenderTarget::Window(WindowRef::Entity(window_entity)),
                ..default()
            },
            ExplorerInternal,
        ))
        .id();
    window_state.camera_entity = Some(camera_entity);

    commands
        .spawn((
            Node {
                width: Percent(100.0),
                height: Percent(100.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            ThemeBackgroundColor(tokens::WINDOW_BG),
            UiTargetCamera(camera_entity),
            ExplorerRoot,
            ExplorerInternal,
        ))
        .with_children(|root| {
            spawn_title_bar(root, &config);

            root.spawn(Node {
                width: Percent(100.0),
                flex_grow: 1.0,
                min_height: Px(0.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Row,
                padding: config.panel_padding,
                column_gap: config.column_gap,
                ..default()
            })
            .with_children(|content| {
                // Left: navigation and hierarchy
                spawn_navigation_panel(content, &config);

                // Right: transform and components
                spawn_info_panel(content, &config);
            });
        });

    info!("Explorer UI initialized");
}

fn spawn_title_bar(parent: &mut ChildSpawnerCommands<'_>, config: &ExplorerConfig) {
    parent
        .spawn((
            Node {
                width: Percent(100.0),
                height: config.title_bar_height,
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::SpaceBetween,
                padding: config.panel_padding,
                border: UiRect::bottom(Px(1.0)),
                ..default()
            },
            BorderColor::all(config.border_color),
        ))
        .with_children(|bar| {
            bar.spawn((
                Text::new("Scene Explorer"),
                TextFont {
                    font_size: config.title_font_size + 2.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            bar.spawn((
                Text::new(format!("{:?} to hide", config.toggle_key)),
                TextFont {
                    font_size: config.small_font_size,
                    ..default()
                },
                TextColor(config.muted_text_color),
            ));
        });
}

/// Hides and shows the panel when the toggle key is pressed.
fn toggle_explorer_panel(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<ExplorerConfig>,
    mut window_state: ResMut<ExplorerWindowState>,
    mut roots: Query<&mut Node, With<ExplorerRoot>>,
) {
    if !keys.just_pressed(config.toggle_key) {
        return;
    }

    window_state.panel_hidden = !window_state.panel_hidden;
    let display = if window_state.panel_hidden {
        Display::None
    } else {
        Display::Flex
    };
    for mut node in roots.iter_mut() {
        node.display = display;
    }

    debug!("Explorer panel hidden: {}", window_state.panel_hidden);
}

/// Polling only runs while the window is open and the panel is shown.
fn update_explorer_visibility(
    window_state: Res<ExplorerWindowState>,
    mut visibility: ResMut<ExplorerVisibility>,
) {
    let visible = window_state.is_open && !window_state.panel_hidden;
    if visibility.visible != visible {
        visibility.visible = visible;
    }
}

/// Marks the window closed once its `Window` component is gone, which stops polling.
fn handle_window_close(
    mut window_state: ResMut<ExplorerWindowState>,
    mut removed_windows: RemovedComponents<Window>,
) {
    let Some(window_entity) = window_state.window_entity else {
        return;
    };
    if removed_windows.read().any(|entity| entity == window_entity) {
        window_state.window_entity = None;
        window_state.is_open = false;
        info!("Explorer window closed, polling stopped");
    }
}

/// Clamped scroll offset along one axis of a scrollable node.
fn scrolled(offset: f32, delta: f32, content: f32, size: f32, inverse_scale: f32) -> f32 {
    let max = (content - size).max(0.0) * inverse_scale;
    (offset + delta).clamp(0.0, max)
}

/// Scrolls the nearest scrollable ancestor of each hovered entity.
fn handle_mouse_wheel_scroll(
    mut mouse_wheel_reader: MessageReader<MouseWheel>,
    hover_map: Res<HoverMap>,
    config: Res<ExplorerConfig>,
    parents: Query<&ChildOf>,
    mut scrollables: Query<(&mut ScrollPosition, &Node, &ComputedNode)>,
) {
    for event in mouse_wheel_reader.read() {
        let step = match event.unit {
            MouseScrollUnit::Line => config.line_scroll_step,
            MouseScrollUnit::Pixel => 1.0,
        };
        let delta = -Vec2::new(event.x, event.y) * step;

        let hovered = hover_map.values().flat_map(|pointer_map| pointer_map.keys());
        for &hovered_entity in hovered {
            let target = core::iter::successors(Some(hovered_entity), |&entity| {
                parents.get(entity).ok().map(ChildOf::parent)
            })
            .find(|&entity| scrollables.contains(entity));

            let Some(target) = target else {
                continue;
            };
            let Ok((mut scroll, node, computed)) = scrollables.get_mut(target) else {
                continue;
            };

            let content = computed.content_size();
            let size = computed.size();
            let inverse_scale = computed.inverse_scale_factor();
            if node.overflow.y == OverflowAxis::Scroll && delta.y != 0.0 {
                scroll.y = scrolled(scroll.y, delta.y, content.y, size.y, inverse_scale);
            }
            if node.overflow.x == OverflowAxis::Scroll && delta.x != 0.0 {
                scroll.x = scrolled(scroll.x, delta.x, content.x, size.x, inverse_scale);
            }
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolling_is_clamped_to_the_overflow() {
        assert_eq!(scrolled(0.0, -20.0, 300.0, 100.0, 1.0), 0.0);
        assert_eq!(scrolled(190.0, 20.0, 300.0, 100.0, 1.0), 200.0);
        assert_eq!(scrolled(10.0, 20.0, 300.0, 100.0, 0.5), 30.0);
        assert_eq!(scrolled(0.0, 20.0, 80.0, 100.0, 1.0), 0.0);
    }

    #[test]
    fn closing_the_explorer_window_stops_polling() {
        let mut app = App::new();
        app.init_resource::<ExplorerWindowState>()
            .init_resource::<ExplorerVisibility>()
            .add_systems(Update, (handle_window_close, update_explorer_visibility).chain());

        let window = app.world_mut().spawn(Window::default()).id();
        {
            let mut state = app.world_mut().resource_mut::<ExplorerWindowState>();
            state.window_entity = Some(window);
            state.is_open = true;
        }
        app.update();
        assert!(app.world().resource::<ExplorerVisibility>().visible);

        app.world_mut().despawn(window);
        app.update();

        let state = app.world().resource::<ExplorerWindowState>();
        assert!(!state.is_open);
        assert_eq!(state.window_entity, None);
        assert!(!app.world().resource::<ExplorerVisibility>().visible);
    }
}
