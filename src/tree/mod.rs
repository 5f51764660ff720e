//! Generic resource tree for hierarchical management data.
//!
//! A tree node is addressed by `(child-type, child-name)` steps and carries
//! an attribute model plus typed children:
//!
//! ```text
//! root
//! ├── file-handler=srv            # model: {"file": {...}}
//! ├── console-handler=stdout
//! └── log-file=server.log.1       # virtual, synthesized by the overlay
//! ```
//!
//! Three implementations of the [`Resource`] trait live here:
//!
//! - **BasicResource**: in-memory node storing real configuration state
//! - **PlaceholderResource**: immutable, attribute-less stand-in returned
//!   for derived children
//! - the overlay decorator in [`crate::overlay`] wraps any of the above

mod node;
mod placeholder;
mod resource;

pub use node::BasicResource;
pub use placeholder::{PLACEHOLDER, PlaceholderResource};
pub use resource::{PathAddress, PathElement, Resource, ResourceEntry, ResourceError};
