//! # text3d-core
//!
//! Core types and primitives for the Text3D overlay compiler.
//! This crate contains foundational types shared across all Text3D crates:
//! colors, styles, geometry parameters, 3D math, configuration and errors.

pub mod color;
pub mod config;
pub mod error;
pub mod math;
pub mod types;

pub use config::*;

pub use color::Color;
pub use error::{Text3dError, Text3dResult};
pub use math::{BoundingBox, Transform3D, Vec3};
pub use types::{GeometryParams, Style};
