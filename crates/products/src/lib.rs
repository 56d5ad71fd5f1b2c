//! Products domain module.
//!
//! The perfume catalog record, the input used to create one and the partial
//! update applied to it. Pure data manipulation (no IO, no storage).

pub mod patch;
pub mod product;

pub use patch::ProductPatch;
pub use product::{NewProduct, Product};
