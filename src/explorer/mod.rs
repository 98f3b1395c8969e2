//! Explorer UI module.
//!
//! Provides a separate window for browsing the entity hierarchy of a Bevy
//! application: navigate to parents, siblings, children and well-known nodes, and
//! watch the selected entity's transform and components.

pub mod config;
pub mod core_plugin;
pub mod panels;
pub mod plugin;
pub mod state;
pub mod widgets;

pub use config::ExplorerConfig;
pub use core_plugin::{ExplorerSet, SceneExplorerCorePlugin};
pub use plugin::{ExplorerRoot, ExplorerWindow, ExplorerWindowPlugin};
pub use state::{
    ChoiceSet, ExplorerInternal, ExplorerPanes, ExplorerRefresh, ExplorerState,
    ExplorerVisibility, ExplorerWindowState, NavigationRequest, RefreshGate,
};
pub use widgets::{ChoiceListKind, ChoiceListPlugin};
