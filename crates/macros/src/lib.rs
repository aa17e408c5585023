//! Procedural macros for nomen.
//!
//! Provides derive macros:
//! * `#[derive(Describe)]` - generates the type descriptor and optional self-naming

use proc_macro::TokenStream;

/// Describe derive macro implementation.
mod describe;

/// Derives `nomen_descriptor::Describe` for a struct or enum.
///
/// The type is described by its declared path, so `app::billing::Invoice<u8>`
/// resolves to `billing.Invoice` through the reflective fallback.
///
/// Attributes:
/// * `#[entity(name = "billing.invoice")]` - implements `Named` with a fixed name
/// * `#[entity(named)]` - uses a hand-written `Named` impl as the self-naming capability
/// * `#[entity(crate = "nomen::descriptor")]` - path of the descriptor crate when it is
///   reached through a re-export (defaults to `::nomen_descriptor`)
///
/// ```ignore
/// #[derive(Describe)]
/// #[entity(name = "billing.invoice")]
/// pub struct Invoice {
///     id: u64,
/// }
/// ```
#[proc_macro_derive(Describe, attributes(entity))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
	describe::derive_describe(input)
}
