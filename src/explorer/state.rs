//! Central state for the explorer.

use core::time::Duration;

use bevy::prelude::*;

use super::config::ExplorerConfig;
use crate::hierarchy_navigation::NavigationTarget;
use crate::node_display::HierarchyView;

/// Marker component for explorer-internal entities (cameras, UI roots).
/// They are skipped by the well-known lookups.
#[derive(Component, Default)]
pub struct ExplorerInternal;

/// The current selection.
///
/// Only navigation requests, the initial selection and stale-selection clearing
/// write to it.
#[derive(Resource, Default, Debug)]
pub struct ExplorerState {
    /// Currently selected entity.
    pub selected: Option<Entity>,
    /// Set when a request selected something and the panes must be rebuilt,
    /// even if the selected entity did not change.
    pub needs_render: bool,
    /// Set when the choice lists should be re-synced with the hierarchy.
    pub lists_dirty: bool,
}

impl ExplorerState {
    pub fn select(&mut self, entity: Entity) {
        self.selected = Some(entity);
        self.needs_render = true;
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.needs_render = true;
    }
}

/// Entries of one choice list and the entry currently shown as its value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChoiceSet {
    pub choices: Vec<String>,
    /// `None` shows the placeholder.
    pub current: Option<usize>,
}

impl ChoiceSet {
    /// Placeholder shown when nothing is picked.
    pub const PLACEHOLDER: &'static str = "Select to navigate...";

    pub fn new(choices: Vec<String>, current: Option<usize>) -> Self {
        Self { choices, current }
    }

    /// Label of the current entry, or the placeholder.
    pub fn current_label(&self) -> &str {
        self.current
            .and_then(|index| self.choices.get(index))
            .map(String::as_str)
            .unwrap_or(Self::PLACEHOLDER)
    }
}

/// Rendered text for every pane of the explorer.
///
/// Written by the render system, read by the UI.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct ExplorerPanes {
    /// Label of the parent button, e.g. `Select parent: Root`.
    pub parent_label: String,
    pub siblings: ChoiceSet,
    pub children: ChoiceSet,
    pub well_known: ChoiceSet,
    /// Breadcrumb of the selection, `None` when nothing is selected.
    pub hierarchy: Option<HierarchyView>,
    pub transform: String,
    pub components: String,
}

/// Whether the explorer panel is currently shown. Polling is skipped while hidden.
#[derive(Resource, Debug)]
pub struct ExplorerVisibility {
    pub visible: bool,
}

impl Default for ExplorerVisibility {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// A simple time gate: due once `period` has elapsed since the last refresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshGate {
    pub period: Duration,
    next_due: Duration,
}

impl RefreshGate {
    /// Creates a gate that is due immediately.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: Duration::ZERO,
        }
    }

    pub fn is_due(&self, now: Duration) -> bool {
        now >= self.next_due
    }

    pub fn mark_refreshed(&mut self, now: Duration) {
        self.next_due = now + self.period;
    }

    /// Makes the gate due on the next check.
    pub fn force_due(&mut self) {
        self.next_due = Duration::ZERO;
    }

    pub fn next_due(&self) -> Duration {
        self.next_due
    }
}

/// The two polling gates of the info panel.
#[derive(Resource, Debug)]
pub struct ExplorerRefresh {
    pub transform: RefreshGate,
    pub components: RefreshGate,
}

impl FromWorld for ExplorerRefresh {
    fn from_world(world: &mut World) -> Self {
        let config = world.get_resource_or_init::<ExplorerConfig>();
        Self {
            transform: RefreshGate::new(config.transform_refresh),
            components: RefreshGate::new(config.components_refresh),
        }
    }
}

/// A request from the UI (or any system) to the explorer.
#[derive(Event, Clone, Debug, PartialEq, Eq)]
pub enum NavigationRequest {
    /// Move the selection.
    Navigate(NavigationTarget),
    /// Re-sync the choice lists with the live hierarchy (a list was opened).
    ResyncLists,
}

/// Requests queued by observers, applied once per frame.
#[derive(Resource, Default)]
pub struct PendingNavigation {
    pub requests: Vec<NavigationRequest>,
}

/// Tracks the state of the explorer window.
#[derive(Resource, Default)]
pub struct ExplorerWindowState {
    /// Entity ID of the explorer window, if it exists.
    pub window_entity: Option<Entity>,
    /// Entity ID of the camera rendering to the explorer window.
    pub camera_entity: Option<Entity>,
    /// Whether the explorer window is currently open.
    pub is_open: bool,
    /// Whether the panel was hidden with the toggle key.
    pub panel_hidden: bool,
}
