//! # Shared Types Crate
//!
//! Identity and wire primitives used across the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address`, `Hash` and `Selector` are defined
//!   once here; every crate renders them the same way (`0x`-prefixed hex).
//! - **Fixed Width**: constructors from slices are length-checked, so a value
//!   of one of these types always has exactly its documented size.

pub mod entities;
pub mod errors;
pub mod hex_bytes;

pub use entities::*;
pub use errors::*;
