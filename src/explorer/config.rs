//! Configuration for the explorer window and its refresh cadence.

use core::time::Duration;

use bevy::prelude::*;
use bevy::ui::Val;

/// Configuration for explorer UI layout, styling and polling.
///
/// Insert this resource before adding the plugin to override the defaults.
#[derive(Resource, Clone)]
pub struct ExplorerConfig {
    // Polling
    /// How often the transform pane is refreshed while visible.
    pub transform_refresh: Duration,
    /// How often the components pane is refreshed while visible.
    pub components_refresh: Duration,
    /// Key that hides and shows the explorer panel.
    pub toggle_key: KeyCode,

    // Layout
    /// Width of the left panel (navigation).
    pub left_panel_width: Val,
    /// Height of the title bar.
    pub title_bar_height: Val,
    /// Maximum height of a choice list before it scrolls.
    pub choice_list_max_height: Val,
    /// Width of the scrollbars.
    pub scrollbar_width: f32,
    /// Pixels scrolled per mouse wheel line.
    pub line_scroll_step: f32,

    // Spacing
    /// Padding inside panels.
    pub panel_padding: UiRect,
    /// Gap between items in lists.
    pub item_gap: Val,
    /// Gap between columns.
    pub column_gap: Val,

    // Typography
    /// Font size for titles.
    pub title_font_size: f32,
    /// Font size for body text.
    pub body_font_size: f32,
    /// Font size for small/secondary text.
    pub small_font_size: f32,

    // Colors (for non-themed elements)
    /// Border color.
    pub border_color: Color,
    /// Muted text color.
    pub muted_text_color: Color,
    /// Color of the selected entity in the hierarchy pane.
    pub highlight_text_color: Color,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            // Polling
            transform_refresh: Duration::from_secs(1),
            components_refresh: Duration::from_secs(10),
            toggle_key: KeyCode::F12,

            // Layout
            left_panel_width: Val::Percent(40.0),
            title_bar_height: Val::Px(40.0),
            choice_list_max_height: Val::Px(160.0),
            scrollbar_width: 8.0,
            line_scroll_step: 20.0,

            // Spacing
            panel_padding: UiRect::all(Val::Px(8.0)),
            item_gap: Val::Px(4.0),
            column_gap: Val::Px(8.0),

            // Typography
            title_font_size: 16.0,
            body_font_size: 13.0,
            small_font_size: 11.0,

            // Colors
            border_color: Color::srgba(0.3, 0.3, 0.3, 1.0),
            muted_text_color: Color::srgba(0.6, 0.6, 0.6, 1.0),
            highlight_text_color: Color::srgba(0.6, 0.8, 1.0, 1.0),
        }
    }
}
