//! Named shortcuts into the scene graph.
//!
//! Well-known nodes are entries the user can jump to directly, no matter where the
//! current selection is. Each entry is resolved lazily, so it follows the scene as
//! entities come and go.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::error::NavigationError;
use crate::explorer::state::ExplorerInternal;

/// Marks the entity the explorer selects on startup.
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct ExplorerStart;

/// Looks up a well-known node in the current world.
pub type WellKnownResolver = Box<dyn Fn(&mut World) -> Option<Entity> + Send + Sync>;

struct WellKnownEntry {
    label: String,
    resolver: WellKnownResolver,
}

/// Ordered registry of well-known nodes.
#[derive(Resource)]
pub struct WellKnownNodes {
    entries: Vec<WellKnownEntry>,
}

impl Default for WellKnownNodes {
    fn default() -> Self {
        Self::new()
    }
}

impl WellKnownNodes {
    pub const START_NODE: &'static str = "start node";
    pub const PRIMARY_WINDOW: &'static str = "primary window";
    pub const FIRST_CAMERA: &'static str = "first camera";
    pub const FIRST_ROOT: &'static str = "first root";

    /// Creates a registry with the built-in entries.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Self::START_NODE, |world| {
            first_by_index(world.query_filtered::<Entity, With<ExplorerStart>>().iter(world))
        });
        registry.register(Self::PRIMARY_WINDOW, |world| {
            first_by_index(world.query_filtered::<Entity, With<PrimaryWindow>>().iter(world))
        });
        registry.register(Self::FIRST_CAMERA, |world| {
            first_by_index(
                world
                    .query_filtered::<Entity, (With<Camera>, Without<ExplorerInternal>)>()
                    .iter(world),
            )
        });
        registry.register(Self::FIRST_ROOT, |world| {
            first_by_index(
                world
                    .query_filtered::<Entity, (
                        With<Transform>,
                        Without<ChildOf>,
                        Without<Node>,
                        Without<ExplorerInternal>,
                    )>()
                    .iter(world),
            )
        });
        registry
    }

    /// Creates a registry without any entries.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds an entry, replacing any existing entry with the same label.
    pub fn register(
        &mut self,
        label: impl Into<String>,
        resolver: impl Fn(&mut World) -> Option<Entity> + Send + Sync + 'static,
    ) {
        let label = label.into();
        let resolver: WellKnownResolver = Box::new(resolver);
        match self.entries.iter_mut().find(|entry| entry.label == label) {
            Some(entry) => entry.resolver = resolver,
            None => self.entries.push(WellKnownEntry { label, resolver }),
        }
    }

    /// Labels in registration order.
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.label.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves the entry registered under `label`.
    pub fn resolve(&self, label: &str, world: &mut World) -> Result<Entity, NavigationError> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.label == label)
            .ok_or_else(|| NavigationError::UnknownWellKnown(label.to_string()))?;

        (entry.resolver)(world)
            .filter(|&entity| world.entities().contains(entity))
            .ok_or_else(|| NavigationError::WellKnownUnresolved(label.to_string()))
    }

    /// The first entry that currently resolves, used for the initial selection.
    pub fn first_resolvable(&self, world: &mut World) -> Option<Entity> {
        self.entries.iter().find_map(|entry| {
            (entry.resolver)(world).filter(|&entity| world.entities().contains(entity))
        })
    }
}

fn first_by_index(entities: impl Iterator<Item = Entity>) -> Option<Entity> {
    entities.min_by_key(|entity| entity.index())
}

/// Registers well-known nodes on an [`App`].
pub trait WellKnownAppExt {
    fn register_well_known(
        &mut self,
        label: impl Into<String>,
        resolver: impl Fn(&mut World) -> Option<Entity> + Send + Sync + 'static,
    ) -> &mut Self;
}

impl WellKnownAppExt for App {
    fn register_well_known(
        &mut self,
        label: impl Into<String>,
        resolver: impl Fn(&mut World) -> Option<Entity> + Send + Sync + 'static,
    ) -> &mut Self {
        self.world_mut()
            .get_resource_or_init::<WellKnownNodes>()
            .register(label, resolver);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Component)]
    struct Player;

    #[test]
    fn builtins_are_listed_in_order() {
        let nodes = WellKnownNodes::new();
        assert_eq!(
            nodes.labels(),
            vec![
                WellKnownNodes::START_NODE,
                WellKnownNodes::PRIMARY_WINDOW,
                WellKnownNodes::FIRST_CAMERA,
                WellKnownNodes::FIRST_ROOT,
            ]
        );
    }

    #[test]
    fn start_node_resolves_to_marked_entity() {
        let mut world = World::new();
        world.spawn(Name::new("Unmarked"));
        let start = world.spawn((Name::new("Start"), ExplorerStart)).id();

        let nodes = WellKnownNodes::new();
        assert_eq!(nodes.resolve(WellKnownNodes::START_NODE, &mut world), Ok(start));
        assert_eq!(nodes.first_resolvable(&mut world), Some(start));
    }

    #[test]
    fn first_root_skips_children_and_internal_entities() {
        let mut world = World::new();
        world.spawn((ExplorerInternal, Transform::default()));
        let root = world.spawn((Name::new("Root"), Transform::default())).id();
        world.spawn((Name::new("Child"), Transform::default(), ChildOf(root)));

        let nodes = WellKnownNodes::new();
        assert_eq!(nodes.resolve(WellKnownNodes::FIRST_ROOT, &mut world), Ok(root));
    }

    #[test]
    fn first_root_ignores_parentless_bookkeeping_entities() {
        let mut world = World::new();
        world.spawn(Name::new("Pointer"));
        world.spawn(Name::new("Monitor"));
        let scene = world.spawn((Name::new("Scene"), Transform::default())).id();

        let nodes = WellKnownNodes::new();
        assert_eq!(nodes.resolve(WellKnownNodes::FIRST_ROOT, &mut world), Ok(scene));
    }

    #[test]
    fn initial_selection_skips_entries_pointing_at_despawned_entities() {
        let mut world = World::new();
        let gone = world.spawn(Name::new("Gone")).id();
        world.despawn(gone);
        let fallback = world.spawn(Name::new("Fallback")).id();

        let mut nodes = WellKnownNodes::empty();
        nodes.register("gone", move |_| Some(gone));
        nodes.register("fallback", move |_| Some(fallback));

        assert_eq!(nodes.first_resolvable(&mut world), Some(fallback));
    }

    #[test]
    fn unresolved_entries_are_reported() {
        let mut world = World::new();
        let nodes = WellKnownNodes::new();
        assert_eq!(
            nodes.resolve(WellKnownNodes::PRIMARY_WINDOW, &mut world),
            Err(NavigationError::WellKnownUnresolved(
                WellKnownNodes::PRIMARY_WINDOW.to_string()
            ))
        );
    }

    #[test]
    fn registering_an_existing_label_replaces_it() {
        let mut world = World::new();
        let player = world.spawn(Player).id();

        let mut nodes = WellKnownNodes::empty();
        nodes.register("player", |_| None);
        nodes.register("player", |world| {
            world.query_filtered::<Entity, With<Player>>().iter(world).next()
        });

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes.resolve("player", &mut world), Ok(player));
    }

    #[test]
    fn app_extension_registers_entries() {
        let mut app = App::new();
        app.register_well_known("nothing", |_| None);

        let nodes = app.world().resource::<WellKnownNodes>();
        assert_eq!(nodes.labels().last().map(String::as_str), Some("nothing"));
    }
}
