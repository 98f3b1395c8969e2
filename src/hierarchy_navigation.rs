//! Navigation through the live entity hierarchy.
//!
//! The explorer never owns the entities it points at: every lookup goes back to the
//! `World`, and a selection that was despawned behind our back is reported instead of
//! being dereferenced.

use bevy::prelude::*;

use crate::error::NavigationError;
use crate::well_known::WellKnownNodes;

/// Where a navigation request wants the selection to go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationTarget {
    /// Select a specific entity. `None` is accepted and ignored.
    Entity(Option<Entity>),
    /// Select the parent of the current selection.
    Parent,
    /// Select the n-th child of the current selection's parent.
    Sibling(usize),
    /// Select the n-th child of the current selection.
    Child(usize),
    /// Jump to a node registered in [`WellKnownNodes`].
    WellKnown(String),
}

/// Returns the parent of `entity`, if any.
pub fn parent_of(world: &World, entity: Entity) -> Option<Entity> {
    world.get::<ChildOf>(entity).map(|child_of| child_of.parent())
}

/// Returns the ordered children of `entity`.
pub fn children_of(world: &World, entity: Entity) -> Vec<Entity> {
    world
        .get::<Children>(entity)
        .map(|children| children.iter().collect())
        .unwrap_or_default()
}

/// Returns the ordered children of `entity`'s parent.
///
/// A root entity is its own only sibling.
pub fn siblings_of(world: &World, entity: Entity) -> Vec<Entity> {
    match parent_of(world, entity) {
        Some(parent) => children_of(world, parent),
        None => vec![entity],
    }
}

/// Position of `entity` among its siblings.
pub fn sibling_index(world: &World, entity: Entity) -> Option<usize> {
    siblings_of(world, entity)
        .iter()
        .position(|&sibling| sibling == entity)
}

/// Checks that the current selection still points at a live entity.
pub fn validate_selection(
    world: &World,
    selection: Option<Entity>,
) -> Result<Entity, NavigationError> {
    let entity = selection.ok_or(NavigationError::NoSelection)?;
    if world.entities().contains(entity) {
        Ok(entity)
    } else {
        Err(NavigationError::StaleSelection(entity))
    }
}

fn pick(entries: &[Entity], index: usize) -> Result<Entity, NavigationError> {
    entries
        .get(index)
        .copied()
        .ok_or(NavigationError::IndexOutOfRange {
            index,
            len: entries.len(),
        })
}

/// Resolves a navigation target relative to the current selection.
///
/// Takes `&mut World` because well-known resolvers may run queries.
pub fn resolve_target(
    world: &mut World,
    selection: Option<Entity>,
    target: &NavigationTarget,
) -> Result<Entity, NavigationError> {
    match target {
        NavigationTarget::Entity(None) => Err(NavigationError::NoSelection),
        NavigationTarget::Entity(Some(entity)) => {
            if world.entities().contains(*entity) {
                Ok(*entity)
            } else {
                Err(NavigationError::MissingEntity(*entity))
            }
        }
        NavigationTarget::Parent => {
            let current = validate_selection(world, selection)?;
            parent_of(world, current).ok_or(NavigationError::NoParent)
        }
        NavigationTarget::Sibling(index) => {
            let current = validate_selection(world, selection)?;
            pick(&siblings_of(world, current), *index)
        }
        NavigationTarget::Child(index) => {
            let current = validate_selection(world, selection)?;
            pick(&children_of(world, current), *index)
        }
        NavigationTarget::WellKnown(label) => world
            .try_resource_scope(|world, nodes: Mut<WellKnownNodes>| nodes.resolve(label, world))
            .unwrap_or_else(|| Err(NavigationError::UnknownWellKnown(label.clone()))),
    }
}
