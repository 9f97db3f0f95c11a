//! # text3d-scene
//!
//! The abstract scene graph the generator emits: nested groups of extruded
//! text meshes and image sprites, plus the renderer resources they share.
//! Rendering it is left to whichever 3D engine consumes the graph.

pub mod camera;
pub mod motion;
pub mod node;
pub mod resource;

pub use camera::Camera;
pub use motion::{float_rotation, AxisWave, Oscillation, Wave};
pub use node::{SceneGroup, SceneNode, Sprite, TextMesh};
pub use resource::{GlyphBox, Material, MaterialPair, SpriteMaterial, TextGeometry, Texture};
