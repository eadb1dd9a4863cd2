//! Geometry utilities: bounding boxes, face/cell primitives and rotations.

pub mod bounds;
pub mod primitives;
pub mod rotation;

pub use bounds::BoundingBox;
pub use rotation::rotation_tensor;
