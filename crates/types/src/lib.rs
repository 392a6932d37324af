//! Plain types shared by the provider algebra and its ambient configuration.
//!
//! Nothing in this crate evaluates providers; it only names the tokens that cross crate
//! boundaries (evaluation modes, type descriptors, and build-action paths).

mod consumer;
mod task_path;
mod type_descriptor;

pub use consumer::{ParseValueConsumerError, ValueConsumer};
pub use task_path::TaskPath;
pub use type_descriptor::TypeDescriptor;
