use glam::Vec3;

use crate::geometry::Mesh;
use crate::transform::Transform;

/// A named transform node owning an optional mesh and ordered children.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    /// Name assigned by the level author. Containers are unnamed.
    pub name: String,
    /// Local transform.
    pub transform: Transform,
    /// Renderable carried by this node, if any.
    pub mesh: Option<Mesh>,
    children: Vec<SceneNode>,
}

impl SceneNode {
    /// Named node with identity transform, no mesh and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            mesh: None,
            children: Vec::new(),
        }
    }

    /// Unnamed grouping node.
    pub fn container() -> Self {
        Self::new("")
    }

    /// Named node carrying `mesh`.
    pub fn with_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            mesh: Some(mesh),
            ..Self::new(name)
        }
    }

    /// Builder-style transform override.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Appends `child` after existing children.
    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Mutable access to the children.
    pub fn children_mut(&mut self) -> &mut [SceneNode] {
        &mut self.children
    }

    /// Detaches and returns every child, leaving this node empty.
    pub fn take_children(&mut self) -> Vec<SceneNode> {
        std::mem::take(&mut self.children)
    }

    /// First direct child called `name`.
    pub fn child(&self, name: &str) -> Option<&SceneNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Sets the local position.
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// Local position.
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Total node count of this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(SceneNode::subtree_len).sum::<usize>()
    }
}
