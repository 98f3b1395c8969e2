//! Listing of the components attached to an entity.
//!
//! Every component is shown by its short type name. A handful of well-known types get
//! extra fields through [`ComponentDetailRegistry`], which maps a component's `TypeId`
//! to a describer function. Types without a describer simply show their name.

use core::any::TypeId;
use core::fmt::{self, Display};

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::node_display::NONE_SELECTED;

/// A `field: value` pair shown under a component name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailLine {
    pub field: String,
    pub value: String,
}

impl DetailLine {
    pub fn new(field: impl Into<String>, value: impl Display) -> Self {
        Self {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

impl Display for DetailLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}: {}", self.field, self.value)
    }
}

/// Extracts extra fields for one component type.
pub type ComponentDescriber = fn(&EntityRef) -> Vec<DetailLine>;

/// Registry of describers keyed by component `TypeId`.
#[derive(Resource)]
pub struct ComponentDetailRegistry {
    describers: HashMap<TypeId, ComponentDescriber>,
}

impl Default for ComponentDetailRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentDetailRegistry {
    /// Creates a registry with describers for common engine components.
    pub fn new() -> Self {
        let mut registry = Self {
            describers: HashMap::default(),
        };

        registry.register::<Camera>(describe_camera);
        registry.register::<Visibility>(describe_visibility);
        registry.register::<PointLight>(describe_point_light);
        registry.register::<DirectionalLight>(describe_directional_light);
        registry.register::<Window>(describe_window);

        registry
    }

    /// Registers a describer for component `T`, replacing any previous one.
    pub fn register<T: Component>(&mut self, describer: ComponentDescriber) {
        self.describers.insert(TypeId::of::<T>(), describer);
    }

    pub fn has_describer(&self, type_id: TypeId) -> bool {
        self.describers.contains_key(&type_id)
    }

    /// Runs the describer for `type_id`, if one is registered.
    pub fn describe(&self, type_id: TypeId, entity: &EntityRef) -> Vec<DetailLine> {
        self.describers
            .get(&type_id)
            .map(|describer| describer(entity))
            .unwrap_or_default()
    }
}

fn describe_camera(entity: &EntityRef) -> Vec<DetailLine> {
    let Some(camera) = entity.get::<Camera>() else {
        return Vec::new();
    };
    vec![
        DetailLine::new("is_active", camera.is_active),
        DetailLine::new("order", camera.order),
    ]
}

fn describe_visibility(entity: &EntityRef) -> Vec<DetailLine> {
    entity
        .get::<Visibility>()
        .map(|visibility| vec![DetailLine::new("visibility", format!("{:?}", visibility))])
        .unwrap_or_default()
}

fn describe_point_light(entity: &EntityRef) -> Vec<DetailLine> {
    let Some(light) = entity.get::<PointLight>() else {
        return Vec::new();
    };
    vec![
        DetailLine::new("intensity", light.intensity),
        DetailLine::new("range", light.range),
    ]
}

fn describe_directional_light(entity: &EntityRef) -> Vec<DetailLine> {
    entity
        .get::<DirectionalLight>()
        .map(|light| vec![DetailLine::new("illuminance", light.illuminance)])
        .unwrap_or_default()
}

fn describe_window(entity: &EntityRef) -> Vec<DetailLine> {
    entity
        .get::<Window>()
        .map(|window| vec![DetailLine::new("title", &window.title)])
        .unwrap_or_default()
}

/// One component attached to the inspected entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentSummary {
    /// Short type name, e.g. `Transform`.
    pub name: String,
    pub details: Vec<DetailLine>,
}

/// Collects the components of `entity`, sorted by name.
///
/// Returns an empty list if the entity does not exist.
pub fn summarize_components(
    world: &World,
    entity: Entity,
    registry: &ComponentDetailRegistry,
) -> Vec<ComponentSummary> {
    let Ok(entity_ref) = world.get_entity(entity) else {
        return Vec::new();
    };

    let components = world.components();
    let mut summaries: Vec<ComponentSummary> = entity_ref
        .archetype()
        .components()
        .filter_map(|component_id| components.get_info(component_id))
        .map(|info| {
            let full_name = info.name().to_string();
            let details = info
                .type_id()
                .map(|type_id| registry.describe(type_id, &entity_ref))
                .unwrap_or_default();
            ComponentSummary {
                name: ShortName::from(full_name.as_str()).to_string(),
                details,
            }
        })
        .collect();

    summaries.sort_by(|a, b| a.name.cmp(&b.name));
    summaries
}

/// Renders a component listing as text.
pub fn format_components(summaries: &[ComponentSummary]) -> String {
    let mut out = String::from("Components\n");
    for summary in summaries {
        out.push('\n');
        out.push_str(&summary.name);
        out.push('\n');
        for detail in &summary.details {
            out.push_str(&detail.to_string());
            out.push('\n');
        }
    }
    out
}

/// Renders the components pane for the current selection.
pub fn components_pane(
    world: &World,
    selection: Option<Entity>,
    registry: &ComponentDetailRegistry,
) -> String {
    match selection {
        Some(entity) if world.entities().contains(entity) => {
            format_components(&summarize_components(world, entity, registry))
        }
        _ => NONE_SELECTED.to_string(),
    }
}
