//! Opaque handles and the registries that own what they name.

mod id;
mod registry;

pub use id::{Handle, HandleAllocator};
pub use registry::Registry;
