//! Name-based classification of imported level geometry.
//!
//! Every child of an imported hierarchy is matched, in order, against a fixed
//! rule table. The first matching rule decides the node's role; nodes that
//! match nothing keep their geometry and get the diagnostic material.

use std::f32::consts::FRAC_PI_2;
use std::sync::{Arc, LazyLock};

use folio_materials::{
    Color, MaterialCatalog, MaterialError, MaterialId, MaterialParameterStore, MaterialRole,
    Texture, UniformValue, uniforms,
};
use folio_scene::{Geometry, Mesh, SceneNode, Transform};
use glam::Quat;
use regex::Regex;
use tracing::debug;

/// Subdivisions along each side of a generated floor plane.
pub const FLOOR_SEGMENTS: u32 = 10;

/// What a named node becomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Building matcap, attached in place.
    Building,
    /// Rock matcap, attached in place.
    Rock,
    /// Replaced by a generated floor plane.
    Floor,
    /// Collision placeholder, registered as a static box.
    CollisionBox,
    /// Anything else.
    Unrecognized,
}

/// A name pattern and the role it assigns.
#[derive(Debug)]
pub struct ClassificationRule {
    pub pattern: Regex,
    pub role: Role,
}

const RULE_PATTERNS: [(&str, Role); 4] = [
    (r"(?i)^building[0-9]{0,3}$", Role::Building),
    (r"(?i)^rock[0-9]{0,3}$", Role::Rock),
    (r"(?i)^floor[0-9]{0,3}$", Role::Floor),
    (r"(?i)^(cube|box)[0-9]{0,3}$", Role::CollisionBox),
];

static RULES: LazyLock<Vec<ClassificationRule>> = LazyLock::new(|| {
    RULE_PATTERNS
        .iter()
        .map(|&(pattern, role)| ClassificationRule {
            // Patterns are compile-time constants.
            pattern: Regex::new(pattern).expect("classification pattern is valid"),
            role,
        })
        .collect()
});

/// The ordered rule table.
pub fn rules() -> &'static [ClassificationRule] {
    &RULES
}

/// Role of the first rule whose pattern matches `name`.
pub fn role_for(name: &str) -> Role {
    rules()
        .iter()
        .find(|rule| rule.pattern.is_match(name))
        .map_or(Role::Unrecognized, |rule| rule.role)
}

/// Classifies every child of `base` and returns them, in input order, inside
/// a fresh container node.
///
/// Building and rock nodes get their matcap attached in place. Floor nodes are
/// replaced by a horizontal plane carrying an independent clone of the floor
/// material. Every other node, collision placeholders included, gets the
/// diagnostic material.
///
/// # Errors
///
/// Fails before touching the catalog if the hierarchy contains a floor and
/// the store's shadow color does not parse.
pub fn classify(
    mut base: SceneNode,
    catalog: &mut MaterialCatalog,
    store: &MaterialParameterStore,
    floor_shadow: Option<&Arc<Texture>>,
) -> Result<SceneNode, MaterialError> {
    let children = base.take_children();

    let has_floor = children.iter().any(|c| role_for(&c.name) == Role::Floor);
    let shadow_color = if has_floor {
        Some(store.floor.shadow_color()?)
    } else {
        None
    };

    let mut container = SceneNode::container();
    for mut node in children {
        let role = role_for(&node.name);
        debug!("Classified `{}` as {role:?}", node.name);

        let node = match (role, shadow_color) {
            (Role::Building, _) => {
                attach(&mut node, catalog.role(MaterialRole::Building));
                node
            }
            (Role::Rock, _) => {
                attach(&mut node, catalog.role(MaterialRole::Rock));
                node
            }
            (Role::Floor, Some(shadow_color)) => {
                let floor = FloorInstance {
                    background: store.background_texture(),
                    shadow: floor_shadow,
                    shadow_color,
                };
                floor.replace(node, catalog)?
            }
            _ => {
                attach(&mut node, catalog.role(MaterialRole::Normal));
                node
            }
        };
        container.add_child(node);
    }
    Ok(container)
}

fn attach(node: &mut SceneNode, material: MaterialId) {
    match node.mesh.as_mut() {
        Some(mesh) => mesh.material = Some(material),
        None => debug!("`{}` has no mesh, nothing to attach", node.name),
    }
}

/// Per-instance inputs for a generated floor.
struct FloorInstance<'a> {
    background: Option<&'a Arc<Texture>>,
    shadow: Option<&'a Arc<Texture>>,
    shadow_color: Color,
}

impl FloorInstance<'_> {
    /// Builds the plane that stands in for `node`.
    ///
    /// The plane spans `scale.x * 2` by `scale.z * 2` and lies flat. Only the
    /// node's name and scale carry over.
    fn replace(
        self,
        node: SceneNode,
        catalog: &mut MaterialCatalog,
    ) -> Result<SceneNode, MaterialError> {
        let material = catalog.clone_material(catalog.role(MaterialRole::Floor))?;
        if let Some(m) = catalog.get_mut(material) {
            m.set_name(format!("floor:{}", node.name));
            m.set_uniform(
                uniforms::BACKGROUND,
                UniformValue::Texture(self.background.cloned()),
            );
            m.set_uniform(uniforms::SHADOW, UniformValue::Texture(self.shadow.cloned()));
            m.set_uniform(uniforms::SHADOW_COLOR, UniformValue::Color(self.shadow_color));
        }

        let scale = node.transform.scale;
        let geometry = Geometry::plane(scale.x * 2.0, scale.z * 2.0, FLOOR_SEGMENTS);
        Ok(
            SceneNode::with_mesh(node.name, Mesh::with_material(geometry, material))
                .with_transform(Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2))),
        )
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
