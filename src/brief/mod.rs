//! The client's project brief: fields, validation and normalization.

pub mod model;
pub mod normalize;

pub use model::{Availability, Field, FieldKind, FieldValue, FormData, Plan};
pub use normalize::normalize;
