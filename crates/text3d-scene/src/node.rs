use std::sync::Arc;

use serde::Serialize;
use text3d_core::{BoundingBox, Transform3D, Vec3};

use crate::resource::{MaterialPair, SpriteMaterial, TextGeometry};

/// A node in the scene graph.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneNode {
    Group(SceneGroup),
    Mesh(TextMesh),
    Sprite(Sprite),
}

impl SceneNode {
    pub fn transform(&self) -> &Transform3D {
        match self {
            SceneNode::Group(group) => &group.transform,
            SceneNode::Mesh(mesh) => &mesh.transform,
            SceneNode::Sprite(sprite) => &sprite.transform,
        }
    }

    /// Bounds in this node's own space, before its transform.
    pub fn local_bounds(&self) -> BoundingBox {
        match self {
            SceneNode::Group(group) => group.local_bounds(),
            SceneNode::Mesh(mesh) => mesh.geometry.bounding_box,
            SceneNode::Sprite(sprite) => sprite.unit_bounds(),
        }
    }

    /// Bounds in the parent's space.
    pub fn bounds(&self) -> BoundingBox {
        self.local_bounds().transformed(self.transform())
    }

    pub fn as_group(&self) -> Option<&SceneGroup> {
        match self {
            SceneNode::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut SceneGroup> {
        match self {
            SceneNode::Group(group) => Some(group),
            _ => None,
        }
    }
}

/// A transform applied to an ordered list of children.
#[derive(Debug, Clone, Serialize)]
pub struct SceneGroup {
    pub name: String,
    pub transform: Transform3D,
    pub children: Vec<SceneNode>,
}

impl SceneGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform3D::identity(),
            children: Vec::new(),
        }
    }

    /// Builder: set position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn add(&mut self, node: impl Into<SceneNode>) {
        self.children.push(node.into());
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Union of the children's bounds, in this group's space.
    /// Empty groups contribute nothing.
    pub fn local_bounds(&self) -> BoundingBox {
        let mut bounds = BoundingBox::empty();
        for child in &self.children {
            bounds.union(&child.bounds());
        }
        bounds
    }

    /// Direct child groups, in order.
    pub fn groups(&self) -> impl Iterator<Item = &SceneGroup> {
        self.children.iter().filter_map(SceneNode::as_group)
    }

    /// Sprites directly under this group.
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.children.iter().filter_map(|child| match child {
            SceneNode::Sprite(sprite) => Some(sprite),
            _ => None,
        })
    }

    /// Meshes directly under this group.
    pub fn meshes(&self) -> impl Iterator<Item = &TextMesh> {
        self.children.iter().filter_map(|child| match child {
            SceneNode::Mesh(mesh) => Some(mesh),
            _ => None,
        })
    }

    pub fn child_group_mut(&mut self, index: usize) -> Option<&mut SceneGroup> {
        self.children.get_mut(index).and_then(SceneNode::as_group_mut)
    }
}

/// Extruded text drawn with a front/side material pair.
#[derive(Debug, Clone, Serialize)]
pub struct TextMesh {
    pub transform: Transform3D,
    pub geometry: Arc<TextGeometry>,
    pub materials: Arc<MaterialPair>,
}

impl TextMesh {
    pub fn new(geometry: Arc<TextGeometry>, materials: Arc<MaterialPair>) -> Self {
        Self {
            transform: Transform3D::identity(),
            geometry,
            materials,
        }
    }
}

/// A camera-facing unit quad scaled by its transform.
#[derive(Debug, Clone, Serialize)]
pub struct Sprite {
    pub transform: Transform3D,
    /// Anchor within the quad, (0, 0) = bottom-left.
    pub center: [f32; 2],
    pub material: Arc<SpriteMaterial>,
    /// Stand-in shown until the real texture arrives.
    pub placeholder: bool,
}

impl Sprite {
    pub fn new(material: Arc<SpriteMaterial>) -> Self {
        Self {
            transform: Transform3D::identity(),
            center: [0.5, 0.5],
            material,
            placeholder: false,
        }
    }

    fn unit_bounds(&self) -> BoundingBox {
        let [cx, cy] = self.center;
        BoundingBox::new(Vec3::new(-cx, -cy, 0.0), Vec3::new(1.0 - cx, 1.0 - cy, 0.0))
    }
}

impl From<SceneGroup> for SceneNode {
    fn from(group: SceneGroup) -> Self {
        SceneNode::Group(group)
    }
}

impl From<TextMesh> for SceneNode {
    fn from(mesh: TextMesh) -> Self {
        SceneNode::Mesh(mesh)
    }
}

impl From<Sprite> for SceneNode {
    fn from(sprite: Sprite) -> Self {
        SceneNode::Sprite(sprite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use text3d_core::Color;

    fn sprite_at(x: f32, size: f32) -> Sprite {
        let mut sprite = Sprite::new(Arc::new(SpriteMaterial::solid(Color::WHITE)));
        sprite.center = [0.0, 0.0];
        sprite.transform.position = Vec3::new(x, 0.0, 0.0);
        sprite.transform.scale = Vec3::new(size, size, 1.0);
        sprite
    }

    #[test]
    fn test_sprite_bounds_follow_anchor_and_scale() {
        let node = SceneNode::from(sprite_at(5.0, 10.0));
        let b = node.bounds();
        assert_eq!(b.min, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(b.max, Vec3::new(15.0, 10.0, 0.0));
    }

    #[test]
    fn test_group_bounds_nest_transforms() {
        let mut inner = SceneGroup::new("inner").with_position(Vec3::new(100.0, 0.0, 0.0));
        inner.add(sprite_at(0.0, 10.0));
        let mut outer = SceneGroup::new("outer");
        outer.add(inner);
        outer.add(SceneGroup::new("empty").with_position(Vec3::new(-500.0, 0.0, 0.0)));

        let b = outer.local_bounds();
        assert_eq!(b.min.x, 100.0);
        assert_eq!(b.max.x, 110.0);
    }

    #[test]
    fn test_empty_group_has_empty_bounds() {
        assert!(SceneGroup::new("g").local_bounds().is_empty());
    }

    #[test]
    fn test_child_accessors() {
        let mut group = SceneGroup::new("g");
        group.add(sprite_at(0.0, 1.0));
        group.add(SceneGroup::new("child"));
        assert_eq!(group.sprites().count(), 1);
        assert_eq!(group.groups().count(), 1);
        assert!(group.child_group_mut(1).is_some());
        assert!(group.child_group_mut(0).is_none());
    }
}
