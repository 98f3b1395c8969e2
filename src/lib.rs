//! An in-engine scene explorer for Bevy.
//!
//! Browse the live entity hierarchy, inspect one entity's transform and components,
//! and navigate up, down and sideways through the scene graph.

pub mod component_summary;
pub mod error;
pub mod explorer;
pub mod fuzzy_filter;
pub mod hierarchy_navigation;
pub mod node_display;
pub mod well_known;

// Re-export the main plugins for convenience
pub use error::NavigationError;
pub use explorer::{ExplorerConfig, ExplorerWindowPlugin, SceneExplorerCorePlugin};
pub use hierarchy_navigation::NavigationTarget;
pub use well_known::{ExplorerStart, WellKnownAppExt, WellKnownNodes};
