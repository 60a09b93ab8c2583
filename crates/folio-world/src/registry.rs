//! Append-only record of composed world objects.

use folio_physics::ColliderHandle;
use folio_scene::SceneNode;

/// Index of an object in the registry. Stable because objects are never removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// Kind of world object. Only static objects are composed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Static,
}

impl ObjectKind {
    /// Parses the object type string used by level descriptions.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "static" => Some(Self::Static),
            _ => None,
        }
    }
}

/// A composed object: its render container and its collider, if any.
#[derive(Clone, Debug)]
pub struct WorldObject {
    pub kind: ObjectKind,
    /// Container holding the classified render nodes.
    pub container: SceneNode,
    /// Handle of the last collider registered for this object.
    pub collider: Option<ColliderHandle>,
}

/// Ordered list of world objects.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: Vec<WorldObject>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `object` and returns its id.
    pub fn push(&mut self, object: WorldObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn get(&self, id: ObjectId) -> Option<&WorldObject> {
        self.objects.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &WorldObject> {
        self.objects.iter()
    }
}
