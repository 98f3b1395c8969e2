//! Text rendering of the selected entity: its place in the hierarchy and its transform.
//!
//! Everything here is a pure function of the `World` and an entity, so it can be
//! recomputed at any time without touching UI state.

use core::fmt;

use bevy::prelude::*;

use crate::hierarchy_navigation::{children_of, parent_of};

/// Marker used between a choice's name and its child count.
pub const CHILD_COUNT_GLYPH: char = '\u{260B}';

/// Text shown in every info pane when nothing is selected.
pub const NONE_SELECTED: &str = "None selected";

/// Resolves a human readable name for an entity.
///
/// Uses the `Name` component when present, otherwise falls back to the entity id.
pub fn display_name(world: &World, entity: Entity) -> String {
    world
        .get::<Name>(entity)
        .map(|name| name.as_str().to_string())
        .unwrap_or_else(|| format!("Entity {:?}", entity))
}

/// Label used for an entry in the sibling and children lists.
pub fn choice_label(world: &World, entity: Entity) -> String {
    format!(
        "{} ({} {})",
        display_name(world, entity),
        CHILD_COUNT_GLYPH,
        children_of(world, entity).len()
    )
}

/// One line of the breadcrumb view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HierarchyLine {
    pub entity: Entity,
    pub name: String,
    /// Number of children of this entity's parent, 0 for roots.
    pub sibling_count: usize,
    /// Whether this line is the selected entity.
    pub is_current: bool,
}

impl fmt::Display for HierarchyLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {})",
            self.name, CHILD_COUNT_GLYPH, self.sibling_count
        )
    }
}

/// Breadcrumb view of the selection: ancestors top-down, then the selection itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HierarchyView {
    pub lines: Vec<HierarchyLine>,
    /// Number of children of the selected entity.
    pub child_count: usize,
}

impl HierarchyView {
    /// Walks from `entity` up to its root and records each step.
    pub fn capture(world: &World, entity: Entity) -> Self {
        let mut lines = Vec::new();
        let mut current = Some(entity);
        while let Some(node) = current {
            let parent = parent_of(world, node);
            lines.push(HierarchyLine {
                entity: node,
                name: display_name(world, node),
                sibling_count: parent.map(|p| children_of(world, p).len()).unwrap_or(0),
                is_current: node == entity,
            });
            current = parent;
        }
        lines.reverse();

        Self {
            lines,
            child_count: children_of(world, entity).len(),
        }
    }

    /// Trailing line summarizing the selection's children.
    pub fn children_line(&self) -> String {
        format!("... {} children", self.child_count)
    }

    /// Renders the view as plain text, one line per ancestor.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.to_string());
            out.push('\n');
        }
        out.push_str(&self.children_line());
        out
    }
}

/// Snapshot of an entity's world and local transform.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformSnapshot {
    pub name: String,
    pub world_position: Option<Vec3>,
    pub local_position: Option<Vec3>,
    /// Euler angles in degrees.
    pub world_rotation: Option<Vec3>,
    /// Euler angles in degrees.
    pub local_rotation: Option<Vec3>,
    pub local_scale: Option<Vec3>,
}

impl TransformSnapshot {
    pub fn capture(world: &World, entity: Entity) -> Self {
        let local = world.get::<Transform>(entity);
        let global = world.get::<GlobalTransform>(entity);

        Self {
            name: display_name(world, entity),
            world_position: global.map(|g| g.translation()),
            local_position: local.map(|t| t.translation),
            world_rotation: global.map(|g| euler_degrees(g.rotation())),
            local_rotation: local.map(|t| euler_degrees(t.rotation)),
            local_scale: local.map(|t| t.scale),
        }
    }

    pub fn has_transform(&self) -> bool {
        self.world_position.is_some() || self.local_position.is_some()
    }

    pub fn to_text(&self) -> String {
        if !self.has_transform() {
            return format!("{}\nNo transform", self.name);
        }

        format!(
            "{}\nPosition: {}\nLocal:    {}\nRotation: {}\nLocal:    {}\nScale:    {}",
            self.name,
            format_optional(self.world_position),
            format_optional(self.local_position),
            format_optional(self.world_rotation),
            format_optional(self.local_rotation),
            format_optional(self.local_scale),
        )
    }
}

/// Renders the transform pane for the current selection.
pub fn transform_pane(world: &World, selection: Option<Entity>) -> String {
    match selection {
        Some(entity) if world.entities().contains(entity) => {
            TransformSnapshot::capture(world, entity).to_text()
        }
        _ => NONE_SELECTED.to_string(),
    }
}

/// Converts a rotation to Euler angles (degrees), yaw applied first.
pub fn euler_degrees(rotation: Quat) -> Vec3 {
    let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
    Vec3::new(pitch.to_degrees(), yaw.to_degrees(), roll.to_degrees())
}

/// Formats a vector as `(x, y, z)` with two decimals.
pub fn format_vec3(v: Vec3) -> String {
    format!(
        "({:.2}, {:.2}, {:.2})",
        positive_zero(v.x),
        positive_zero(v.y),
        positive_zero(v.z)
    )
}

fn format_optional(v: Option<Vec3>) -> String {
    v.map(format_vec3).unwrap_or_else(|| "-".to_string())
}

// -0.0 would print as "-0.00"
fn positive_zero(value: f32) -> f32 {
    if value == 0.0 { 0.0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    fn spawn_chain(world: &mut World) -> (Entity, Entity, Entity) {
        let root = world.spawn(Name::new("Root")).id();
        let middle = world.spawn((Name::new("Middle"), ChildOf(root))).id();
        world.spawn((Name::new("Other"), ChildOf(root)));
        let leaf = world.spawn((Name::new("Leaf"), ChildOf(middle))).id();
        world.spawn((Name::new("Grandchild"), ChildOf(leaf)));
        (root, middle, leaf)
    }

    #[test]
    fn unnamed_entities_fall_back_to_their_id() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        assert_eq!(display_name(&world, entity), format!("Entity {:?}", entity));
    }

    #[test]
    fn choice_label_shows_child_count() {
        let mut world = World::new();
        let (root, _, _) = spawn_chain(&mut world);
        assert_eq!(choice_label(&world, root), "Root (\u{260B} 2)");
    }

    #[test]
    fn hierarchy_lists_ancestors_top_down() {
        let mut world = World::new();
        let (root, middle, leaf) = spawn_chain(&mut world);

        let view = HierarchyView::capture(&world, leaf);
        let entities: Vec<Entity> = view.lines.iter().map(|l| l.entity).collect();
        assert_eq!(entities, vec![root, middle, leaf]);
        assert!(view.lines[2].is_current);
        assert!(!view.lines[0].is_current);
        assert_eq!(view.child_count, 1);

        // Each line counts the children of its own parent.
        let counts: Vec<usize> = view.lines.iter().map(|l| l.sibling_count).collect();
        assert_eq!(counts, vec![0, 2, 1]);
    }

    #[test]
    fn hierarchy_text_ends_with_child_summary() {
        let mut world = World::new();
        let (_, middle, _) = spawn_chain(&mut world);

        let text = HierarchyView::capture(&world, middle).to_text();
        assert_eq!(
            text,
            "Root (\u{260B} 0)\nMiddle (\u{260B} 2)\n... 1 children"
        );
    }

    #[test]
    fn euler_angles_are_in_degrees() {
        let angles = euler_degrees(Quat::from_rotation_y(FRAC_PI_2));
        assert!((angles.y - 90.0).abs() < 1e-3);
        assert!(angles.x.abs() < 1e-3);
        assert!(angles.z.abs() < 1e-3);
    }

    #[test]
    fn negative_zero_is_printed_as_zero() {
        assert_eq!(format_vec3(Vec3::new(-0.0, 1.0, -2.5)), "(0.00, 1.00, -2.50)");
    }

    #[test]
    fn transform_text_lists_world_and_local_values() {
        let mut world = World::new();
        let entity = world
            .spawn((
                Name::new("Cube"),
                Transform::from_xyz(1.0, 2.0, 3.0),
                GlobalTransform::from_xyz(4.0, 5.0, 6.0),
            ))
            .id();

        let text = transform_pane(&world, Some(entity));
        assert_eq!(
            text,
            "Cube\n\
             Position: (4.00, 5.00, 6.00)\n\
             Local:    (1.00, 2.00, 3.00)\n\
             Rotation: (0.00, 0.00, 0.00)\n\
             Local:    (0.00, 0.00, 0.00)\n\
             Scale:    (1.00, 1.00, 1.00)"
        );
    }

    #[test]
    fn entities_without_transform_say_so() {
        let mut world = World::new();
        let entity = world.spawn(Name::new("Config")).id();
        assert_eq!(transform_pane(&world, Some(entity)), "Config\nNo transform");
    }

    #[test]
    fn missing_selection_renders_placeholder() {
        let mut world = World::new();
        assert_eq!(transform_pane(&world, None), NONE_SELECTED);

        let entity = world.spawn(Name::new("Gone")).id();
        world.despawn(entity);
        assert_eq!(transform_pane(&world, Some(entity)), NONE_SELECTED);
    }
}
