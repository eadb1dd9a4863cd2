//! Field data: tensor values and cell/face fields.

pub mod field;
pub mod tensor;

pub use field::{
    FieldLocation, FieldValue, GeometricField, Surface, SurfaceField, Vol, VolField, class_name,
};
pub use tensor::SymmTensor;
