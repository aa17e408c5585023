//! Type descriptors and naming capabilities.
//!
//! Rust has no runtime reflection, so types opt into naming by implementing
//! [`Describe`] (usually through `#[derive(Describe)]`). A [`TypeDesc`] answers the
//! questions the resolution engine asks about a type: its declared name, its
//! package (module path), and, for containers, the element and key descriptors.
//!
//! Values are seen through [`Subject`], which every `Describe` type gets for free
//! and which also exposes the optional self-naming capability ([`Named`]).

// Lets `#[derive(Describe)]` expand inside this crate's own tests.
extern crate self as nomen_descriptor;

/// `Describe` trait, value view, and impls for std types.
pub mod describe;
/// Static type information and the descriptor handle.
pub mod info;
/// Self-naming and metadata capabilities.
pub mod named;

pub use describe::{Describe, Subject};
pub use info::{Kind, TypeDesc, TypeInfo};
pub use named::{Describer, Identifier, Named, NamedFn, TypeNamer};
pub use nomen_macros::Describe;

#[cfg(test)]
mod tests;
