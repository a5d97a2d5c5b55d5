//! Code generator module.
//!
//! This module defines the generator contract, the registry that binds
//! generators to a diagnostic sink, and the resource-enum generator.

pub mod registry;
pub mod resource_enum;
pub mod traits;

pub use registry::{GeneratorRegistry, GeneratorRegistryBuilder};
pub use resource_enum::ResourceEnumGenerator;
pub use traits::{Artifact, Generator, GeneratorConfig, IndentStyle, LineEnding, Marker};
