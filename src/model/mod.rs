//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod chunk;
pub mod error;
pub mod geometry;
pub mod key_action;

// Re-export for convenience
pub use chunk::ByteChunk;
pub use error::{AppError, SourceError, ViewError};
pub use geometry::{Geometry, InvalidGeometry};
pub use key_action::KeyAction;
