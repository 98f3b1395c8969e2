//! Headless part of the explorer: selection, navigation, pane rendering and polling.
//!
//! Nothing in here touches UI entities, so it runs (and is tested) without a window.

use bevy::prelude::*;
use bevy::time::Real;

use super::config::ExplorerConfig;
use super::state::{
    ChoiceSet, ExplorerPanes, ExplorerRefresh, ExplorerState, ExplorerVisibility,
    NavigationRequest, PendingNavigation,
};
use crate::component_summary::{ComponentDetailRegistry, components_pane};
use crate::hierarchy_navigation::{
    children_of, parent_of, resolve_target, sibling_index, siblings_of,
};
use crate::node_display::{HierarchyView, choice_label, display_name, transform_pane};
use crate::well_known::WellKnownNodes;

/// System sets for organizing explorer systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExplorerSet {
    /// Handle input events.
    Input,
    /// Apply queued navigation requests.
    Navigate,
    /// Re-render panes from the world.
    Render,
    /// Sync UI with the rendered panes.
    SyncUi,
}

/// Selection, navigation and pane rendering without any UI.
pub struct SceneExplorerCorePlugin;

impl Plugin for SceneExplorerCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ExplorerConfig>()
            .init_resource::<ExplorerState>()
            .init_resource::<ExplorerPanes>()
            .init_resource::<ExplorerVisibility>()
            .init_resource::<ExplorerRefresh>()
            .init_resource::<PendingNavigation>()
            .init_resource::<WellKnownNodes>()
            .init_resource::<ComponentDetailRegistry>()
            .configure_sets(
                Update,
                (
                    ExplorerSet::Input,
                    ExplorerSet::Navigate,
                    ExplorerSet::Render,
                    ExplorerSet::SyncUi,
                )
                    .chain(),
            )
            .add_observer(queue_navigation_request)
            .add_systems(PostStartup, select_initial_node)
            .add_systems(
                Update,
                (
                    apply_pending_navigation.in_set(ExplorerSet::Navigate),
                    render_panes.in_set(ExplorerSet::Render),
                ),
            );
    }
}

/// Observer that queues navigation requests for the exclusive navigation system.
fn queue_navigation_request(
    trigger: On<NavigationRequest>,
    mut pending: ResMut<PendingNavigation>,
) {
    pending.requests.push(trigger.event().clone());
}

/// Selects the start node, or the first well-known node that resolves.
pub fn select_initial_node(world: &mut World) {
    if world.resource::<ExplorerState>().selected.is_some() {
        return;
    }

    let initial = world
        .try_resource_scope(|world, nodes: Mut<WellKnownNodes>| nodes.first_resolvable(world))
        .flatten();

    match initial {
        Some(entity) => {
            info!("Explorer starting at {}", display_name(world, entity));
            world.resource_mut::<ExplorerState>().select(entity);
        }
        None => {
            world.resource_mut::<ExplorerState>().needs_render = true;
            info!("Explorer starting with nothing selected");
        }
    }
}

/// Exclusive system that applies queued navigation requests in order.
pub fn apply_pending_navigation(world: &mut World) {
    let requests = core::mem::take(&mut world.resource_mut::<PendingNavigation>().requests);

    for request in requests {
        match request {
            NavigationRequest::ResyncLists => {
                world.resource_mut::<ExplorerState>().lists_dirty = true;
            }
            NavigationRequest::Navigate(target) => {
                let current = world.resource::<ExplorerState>().selected;
                match resolve_target(world, current, &target) {
                    Ok(entity) => {
                        debug!("Explorer selected {:?} via {:?}", entity, target);
                        world.resource_mut::<ExplorerState>().select(entity);
                    }
                    Err(err) if err.is_benign() => {
                        debug!("Navigation to {:?} ignored: {}", target, err);
                    }
                    Err(err) => {
                        warn!("Navigation to {:?} failed: {}", target, err);
                    }
                }
            }
        }
    }
}

/// Builds the navigation part of the panes: parent label, choice lists, breadcrumb.
fn navigation_panes(world: &World, selection: Option<Entity>, panes: &mut ExplorerPanes) {
    let Some(entity) = selection else {
        panes.parent_label = "Select parent: (none)".to_string();
        panes.siblings = ChoiceSet::default();
        panes.children = ChoiceSet::default();
        panes.hierarchy = None;
        return;
    };

    let parent_name = parent_of(world, entity)
        .map(|parent| display_name(world, parent))
        .unwrap_or_else(|| "(none)".to_string());
    panes.parent_label = format!("Select parent: {}", parent_name);

    let labels = |entities: Vec<Entity>| -> Vec<String> {
        entities.into_iter().map(|e| choice_label(world, e)).collect()
    };
    panes.siblings = ChoiceSet::new(
        labels(siblings_of(world, entity)),
        sibling_index(world, entity),
    );
    panes.children = ChoiceSet::new(labels(children_of(world, entity)), None);
    panes.hierarchy = Some(HierarchyView::capture(world, entity));
}

/// Exclusive system that re-validates the selection and re-renders due panes.
pub fn render_panes(world: &mut World) {
    // The selection may have been despawned since the last frame.
    let selected = world.resource::<ExplorerState>().selected;
    if let Some(entity) = selected
        && !world.entities().contains(entity)
    {
        warn!("Selected entity {:?} no longer exists, clearing selection", entity);
        world.resource_mut::<ExplorerState>().clear();
    }

    let (selection, needs_render, lists_dirty) = {
        let mut state = world.resource_mut::<ExplorerState>();
        let flags = (state.selected, state.needs_render, state.lists_dirty);
        state.needs_render = false;
        state.lists_dirty = false;
        flags
    };

    let now = world
        .get_resource::<Time<Real>>()
        .map(|time| time.elapsed())
        .unwrap_or_default();
    let visible = world.resource::<ExplorerVisibility>().visible;

    let mut next = world.resource::<ExplorerPanes>().clone();

    if needs_render {
        navigation_panes(world, selection, &mut next);
        next.well_known = ChoiceSet::new(world.resource::<WellKnownNodes>().labels(), None);
    }

    let (transform_due, components_due) = {
        let refresh = world.resource::<ExplorerRefresh>();
        (
            needs_render || (visible && refresh.transform.is_due(now)),
            needs_render || (visible && refresh.components.is_due(now)),
        )
    };

    if !needs_render && (lists_dirty || transform_due) {
        // The sibling list's current value is re-derived, so it follows reordering.
        navigation_panes(world, selection, &mut next);
    }

    if transform_due {
        next.transform = transform_pane(world, selection);
        world
            .resource_mut::<ExplorerRefresh>()
            .transform
            .mark_refreshed(now);
    }

    if components_due {
        next.components = components_pane(
            world,
            selection,
            world.resource::<ComponentDetailRegistry>(),
        );
        world
            .resource_mut::<ExplorerRefresh>()
            .components
            .mark_refreshed(now);
    }

    world.resource_mut::<ExplorerPanes>().set_if_neq(next);
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::hierarchy_navigation::NavigationTarget;
    use crate::node_display::NONE_SELECTED;
    use crate::well_known::ExplorerStart;

    struct Fixture {
        app: App,
        root: Entity,
        left: Entity,
        right: Entity,
        leaf: Entity,
    }

    fn fixture() -> Fixture {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, SceneExplorerCorePlugin));

        let world = app.world_mut();
        let root = world
            .spawn((Name::new("Root"), Transform::from_xyz(1.0, 0.0, 0.0)))
            .id();
        let left = world.spawn((Name::new("Left"), ChildOf(root))).id();
        let right = world
            .spawn((Name::new("Right"), ChildOf(root), ExplorerStart))
            .id();
        let leaf = world.spawn((Name::new("Leaf"), ChildOf(right))).id();

        app.update();
        Fixture {
            app,
            root,
            left,
            right,
            leaf,
        }
    }

    fn navigate(app: &mut App, target: NavigationTarget) {
        app.world_mut().trigger(NavigationRequest::Navigate(target));
        app.update();
    }

    fn selected(app: &App) -> Option<Entity> {
        app.world().resource::<ExplorerState>().selected
    }

    fn panes(app: &App) -> &ExplorerPanes {
        app.world().resource::<ExplorerPanes>()
    }

    #[test]
    fn starts_at_the_start_node() {
        let f = fixture();
        assert_eq!(selected(&f.app), Some(f.right));

        let panes = panes(&f.app);
        assert_eq!(panes.parent_label, "Select parent: Root");
        assert_eq!(
            panes.siblings.choices,
            vec!["Left (\u{260B} 0)".to_string(), "Right (\u{260B} 1)".to_string()]
        );
        assert_eq!(panes.siblings.current, Some(1));
        assert_eq!(panes.children.choices, vec!["Leaf (\u{260B} 0)".to_string()]);
        assert_eq!(panes.children.current, None);
        assert_eq!(panes.well_known.current_label(), ChoiceSet::PLACEHOLDER);
        assert!(panes.components.starts_with("Components\n"));
    }

    #[test]
    fn navigates_through_the_hierarchy() {
        let mut f = fixture();

        navigate(&mut f.app, NavigationTarget::Child(0));
        assert_eq!(selected(&f.app), Some(f.leaf));

        navigate(&mut f.app, NavigationTarget::Parent);
        navigate(&mut f.app, NavigationTarget::Parent);
        assert_eq!(selected(&f.app), Some(f.root));
        assert_eq!(panes(&f.app).parent_label, "Select parent: (none)");
        assert!(panes(&f.app).transform.contains("Local:    (1.00, 0.00, 0.00)"));

        navigate(&mut f.app, NavigationTarget::Child(0));
        navigate(&mut f.app, NavigationTarget::Sibling(1));
        assert_eq!(selected(&f.app), Some(f.right));
    }

    #[test]
    fn failed_navigation_keeps_the_selection() {
        let mut f = fixture();

        navigate(&mut f.app, NavigationTarget::Child(5));
        assert_eq!(selected(&f.app), Some(f.right));

        navigate(&mut f.app, NavigationTarget::Entity(None));
        assert_eq!(selected(&f.app), Some(f.right));
    }

    #[test]
    fn well_known_jump_selects_the_resolved_node() {
        let mut f = fixture();
        navigate(&mut f.app, NavigationTarget::Entity(Some(f.left)));
        assert_eq!(selected(&f.app), Some(f.left));

        navigate(
            &mut f.app,
            NavigationTarget::WellKnown(WellKnownNodes::START_NODE.to_string()),
        );
        assert_eq!(selected(&f.app), Some(f.right));
    }

    #[test]
    fn despawned_selection_is_cleared() {
        let mut f = fixture();
        navigate(&mut f.app, NavigationTarget::Child(0));
        assert_eq!(selected(&f.app), Some(f.leaf));

        f.app.world_mut().despawn(f.leaf);
        f.app.update();

        assert_eq!(selected(&f.app), None);
        let panes = panes(&f.app);
        assert_eq!(panes.transform, NONE_SELECTED);
        assert_eq!(panes.components, NONE_SELECTED);
        assert!(panes.hierarchy.is_none());
        assert!(panes.children.choices.is_empty());
    }

    #[test]
    fn polling_is_skipped_while_hidden() {
        let mut f = fixture();
        let before = panes(&f.app).transform.clone();

        f.app.world_mut().resource_mut::<ExplorerVisibility>().visible = false;
        f.app
            .world_mut()
            .entity_mut(f.right)
            .insert(Transform::from_xyz(9.0, 9.0, 9.0));
        f.app
            .world_mut()
            .resource_mut::<ExplorerRefresh>()
            .transform
            .force_due();
        f.app.update();
        assert_eq!(panes(&f.app).transform, before);

        f.app.world_mut().resource_mut::<ExplorerVisibility>().visible = true;
        f.app.update();
        assert!(panes(&f.app).transform.contains("Local:    (9.00, 9.00, 9.00)"));
    }

    #[test]
    fn resync_picks_up_new_children() {
        let mut f = fixture();
        let right = f.right;
        f.app
            .world_mut()
            .spawn((Name::new("Late"), ChildOf(right)));

        f.app.world_mut().trigger(NavigationRequest::ResyncLists);
        f.app.update();

        assert_eq!(panes(&f.app).children.choices.len(), 2);
        assert_eq!(panes(&f.app).siblings.current, Some(1));
    }

    #[test]
    fn resync_tracks_the_selection_after_an_earlier_sibling_is_removed() {
        let mut f = fixture();
        assert_eq!(panes(&f.app).siblings.current, Some(1));

        f.app.world_mut().despawn(f.left);
        f.app.world_mut().trigger(NavigationRequest::ResyncLists);
        f.app.update();

        let siblings = &panes(&f.app).siblings;
        assert_eq!(siblings.choices, vec!["Right (\u{260B} 1)".to_string()]);
        assert_eq!(siblings.current, Some(0));
        assert_eq!(siblings.current_label(), "Right (\u{260B} 1)");
    }

    #[derive(Component)]
    struct Tracked;

    fn advance(app: &mut App, by: Duration) {
        app.insert_resource(TimeUpdateStrategy::ManualDuration(by));
        app.update();
    }

    #[test]
    fn transform_and_components_poll_at_their_own_rates() {
        let mut f = fixture();
        advance(&mut f.app, Duration::ZERO);
        let components_before = panes(&f.app).components.clone();

        f.app
            .world_mut()
            .entity_mut(f.right)
            .insert((Transform::from_xyz(3.0, 0.0, 0.0), Tracked));

        advance(&mut f.app, Duration::from_millis(1500));
        assert!(panes(&f.app).transform.contains("Local:    (3.00, 0.00, 0.00)"));
        assert_eq!(panes(&f.app).components, components_before);

        advance(&mut f.app, Duration::from_millis(8500));
        assert!(panes(&f.app).components.contains("\nTracked\n"));
    }

    #[test]
    fn selection_restarts_both_poll_gates() {
        let mut f = fixture();
        advance(&mut f.app, Duration::from_millis(2500));

        navigate(&mut f.app, NavigationTarget::Child(0));
        assert_eq!(selected(&f.app), Some(f.leaf));

        let now = f.app.world().resource::<Time<Real>>().elapsed();
        let config = f.app.world().resource::<ExplorerConfig>();
        let refresh = f.app.world().resource::<ExplorerRefresh>();
        assert_eq!(refresh.transform.next_due(), now + config.transform_refresh);
        assert_eq!(refresh.components.next_due(), now + config.components_refresh);
    }
}
