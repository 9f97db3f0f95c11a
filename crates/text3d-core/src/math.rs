use serde::{Deserialize, Serialize};

/// A 3D vector / point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub const fn one() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn add(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Component-wise product.
    pub fn mul(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    pub fn scale(&self, s: f32) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn min(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    pub fn max(&self, other: &Vec3) -> Vec3 {
        Vec3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::zero()
    }
}

/// Position, Euler rotation (radians, XYZ order) and scale of a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform3D {
    /// Identity transform: no translation, no rotation, unit scale.
    pub fn identity() -> Self {
        Self {
            position: Vec3::zero(),
            rotation: Vec3::zero(),
            scale: Vec3::one(),
        }
    }

    /// Identity transform translated to `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Map a point from local into parent space.
    ///
    /// Rotation is not applied; bounds are measured on unrotated layouts.
    pub fn apply(&self, point: &Vec3) -> Vec3 {
        point.mul(&self.scale).add(&self.position)
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

/// Axis-aligned bounding box. An empty box has `min > max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    pub fn expand_by_point(&mut self, point: &Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn union(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.expand_by_point(&other.min);
        self.expand_by_point(&other.max);
    }

    /// Box in parent space after applying `transform`.
    pub fn transformed(&self, transform: &Transform3D) -> BoundingBox {
        if self.is_empty() {
            return *self;
        }
        let mut out = BoundingBox::empty();
        out.expand_by_point(&transform.apply(&self.min));
        out.expand_by_point(&transform.apply(&self.max));
        out
    }

    /// Center point; the origin for an empty box.
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::zero();
        }
        self.min.add(&self.max).scale(0.5)
    }

    /// Extent along each axis; zero for an empty box.
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::zero();
        }
        self.max.sub(&self.min)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_box() {
        let b = BoundingBox::empty();
        assert!(b.is_empty());
        assert_eq!(b.center(), Vec3::zero());
        assert_eq!(b.size(), Vec3::zero());
    }

    #[test]
    fn test_union_ignores_empty() {
        let mut b = BoundingBox::new(Vec3::zero(), Vec3::new(2.0, 4.0, 6.0));
        b.union(&BoundingBox::empty());
        assert_eq!(b.center(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_transformed_box() {
        let b = BoundingBox::new(Vec3::zero(), Vec3::one());
        let mut t = Transform3D::at(Vec3::new(10.0, 0.0, 0.0));
        t.scale = Vec3::new(2.0, 3.0, 1.0);
        let moved = b.transformed(&t);
        assert_eq!(moved.min, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(moved.max, Vec3::new(12.0, 3.0, 1.0));
    }

    #[test]
    fn test_transform_with_negative_scale_keeps_box_ordered() {
        let b = BoundingBox::new(Vec3::zero(), Vec3::one());
        let mut t = Transform3D::identity();
        t.scale = Vec3::new(-1.0, 1.0, 1.0);
        let flipped = b.transformed(&t);
        assert_eq!(flipped.min.x, -1.0);
        assert_eq!(flipped.max.x, 0.0);
    }
}
