//! The composed level: materials, world objects and the dummy body's node.

use std::sync::Arc;

use folio_config::AssetsConfig;
use folio_materials::{
    MaterialCatalog, MaterialError, MaterialParameterStore, MaterialPreset, MaterialRole,
    ResourceProvider, Texture, require_texture,
};
use folio_physics::{BodyHandle, PhysicsBackend};
use folio_scene::{Geometry, Mesh, SceneNode};
use tracing::{info, warn};

use crate::classify::classify;
use crate::collision::register_colliders;
use crate::error::WorldError;
use crate::registry::{ObjectId, ObjectKind, ObjectRegistry, WorldObject};
use crate::sync::FrameSynchronizer;

/// Segments along each axis of the dummy sphere mesh.
const DUMMY_SEGMENTS: u32 = 32;

/// Input to [`World::add_object`].
#[derive(Debug, Clone)]
pub struct ObjectOptions {
    /// Object type. Only `"static"` is supported.
    pub kind: String,
    /// Imported render hierarchy; its children are classified.
    pub base: SceneNode,
    /// Collision placeholder hierarchy; its children are registered.
    pub collision: SceneNode,
    /// Shadow texture for floors generated from this object.
    pub floor_shadow_texture: Option<Arc<Texture>>,
}

impl ObjectOptions {
    /// Options for a static object.
    pub fn new_static(base: SceneNode, collision: SceneNode) -> Self {
        Self {
            kind: "static".to_string(),
            base,
            collision,
            floor_shadow_texture: None,
        }
    }

    /// Builder-style per-instance floor shadow.
    pub fn with_floor_shadow(mut self, texture: Arc<Texture>) -> Self {
        self.floor_shadow_texture = Some(texture);
        self
    }
}

/// Composition root for a level.
///
/// Owns the material catalog and its parameter store, the object registry
/// and the render nodes that follow dynamic bodies.
pub struct World {
    catalog: MaterialCatalog,
    params: MaterialParameterStore,
    registry: ObjectRegistry,
    synchronizer: FrameSynchronizer,
}

impl World {
    /// Creates the role materials from `resources` and syncs default parameters.
    pub fn new(assets: &AssetsConfig, resources: &dyn ResourceProvider) -> Result<Self, WorldError> {
        Self::with_preset(assets, resources, MaterialPreset::default())
    }

    /// Like [`World::new`] with explicit starting parameters.
    ///
    /// Missing textures are logged and left unbound.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Material`] if a preset color does not parse.
    pub fn with_preset(
        assets: &AssetsConfig,
        resources: &dyn ResourceProvider,
        preset: MaterialPreset,
    ) -> Result<Self, WorldError> {
        let mut catalog = MaterialCatalog::new(
            require_texture(resources, &assets.rock_matcap),
            require_texture(resources, &assets.building_matcap),
        );
        let floor_shadow = require_texture(resources, &assets.floor_shadow);
        let mut params = MaterialParameterStore::with_preset(&catalog, floor_shadow, preset);
        params.sync(&mut catalog)?;

        info!("World materials ready ({} in catalog)", catalog.len());
        Ok(Self {
            catalog,
            params,
            registry: ObjectRegistry::new(),
            synchronizer: FrameSynchronizer::new(),
        })
    }

    /// Adds the render sphere for the simulation's dummy body.
    ///
    /// The sphere uses the rock material and follows `body` on every
    /// [`World::sync_frame`].
    pub fn attach_dummy(&mut self, body: BodyHandle, radius: f32) {
        let mesh = Mesh::with_material(
            Geometry::sphere(radius, DUMMY_SEGMENTS),
            self.catalog.role(MaterialRole::Rock),
        );
        self.synchronizer
            .track(body, SceneNode::with_mesh("dummy", mesh));
        info!("Dummy sphere bound to {body:?}");
    }

    /// Composes one object and appends it to the registry.
    ///
    /// Render children are classified, collision children registered with
    /// `physics`. The object keeps the handle of the last collider only.
    ///
    /// # Errors
    ///
    /// [`WorldError::UnsupportedObjectType`] for any type but `"static"`, or
    /// [`WorldError::Material`] if a floor could not be derived. The registry
    /// is unchanged in both cases.
    pub fn add_object<P>(&mut self, options: ObjectOptions, physics: &mut P) -> Result<ObjectId, WorldError>
    where
        P: PhysicsBackend + ?Sized,
    {
        let Some(kind) = ObjectKind::parse(&options.kind) else {
            warn!("Ignoring object of unsupported type {:?}", options.kind);
            return Err(WorldError::UnsupportedObjectType(options.kind));
        };

        let container = classify(
            options.base,
            &mut self.catalog,
            &self.params,
            options.floor_shadow_texture.as_ref(),
        )
        .inspect_err(|e| warn!("Object not added: {e}"))?;
        let collider = register_colliders(&options.collision, physics).pop();

        let id = self.registry.push(WorldObject {
            kind,
            container,
            collider,
        });
        info!(
            "Added {kind:?} object {} ({} render nodes, collider: {})",
            id.0,
            self.registry.get(id).map_or(0, |o| o.container.children().len()),
            collider.is_some()
        );
        Ok(id)
    }

    /// Copies simulated positions into the tracked render nodes.
    ///
    /// Called once per simulation tick by the frame-loop owner.
    pub fn sync_frame<P>(&mut self, physics: &P) -> usize
    where
        P: PhysicsBackend + ?Sized,
    {
        self.synchronizer.sync(physics)
    }

    /// Pushes the current parameters into every material.
    pub fn sync_materials(&mut self) -> Result<(), MaterialError> {
        self.params.sync(&mut self.catalog)
    }

    /// Inspector hook: sets a numeric parameter and resyncs.
    ///
    /// Returns `Ok(false)` for unknown names.
    pub fn set_parameter_number(&mut self, name: &str, value: f32) -> Result<bool, MaterialError> {
        if !self.params.set_number(name, value) {
            return Ok(false);
        }
        self.params.sync_matcaps(&mut self.catalog)?;
        Ok(true)
    }

    /// Inspector hook: sets a color parameter and resyncs.
    ///
    /// Returns `Ok(false)` for unknown names. A malformed value is rejected
    /// and the previous color stays in effect.
    pub fn set_parameter_color(&mut self, name: &str, value: &str) -> Result<bool, MaterialError> {
        if !self.params.set_color(name, value)? {
            return Ok(false);
        }
        self.sync_materials()?;
        Ok(true)
    }

    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }

    pub fn params(&self) -> &MaterialParameterStore {
        &self.params
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// The dummy sphere's render node, once attached.
    pub fn dummy_node(&self) -> Option<&SceneNode> {
        self.synchronizer.node(0)
    }

    /// Direct children of the scene root: tracked nodes first, then each
    /// object's container in insertion order.
    pub fn top_level_nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.synchronizer
            .nodes()
            .chain(self.registry.iter().map(|o| &o.container))
    }
}

#[cfg(test)]
#[path = "world_tests.rs"]
mod tests;
