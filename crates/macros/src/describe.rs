//! `#[derive(Describe)]` implementation.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, LitStr, Path, parse_macro_input, parse_quote};

/// Parsed `#[entity(...)]` attributes.
struct EntityAttrs {
	naming: SelfNaming,
	/// Path of the descriptor crate; `crate = "..."` overrides it.
	krate: Path,
}

/// Self-naming requested through `#[entity(...)]`.
enum SelfNaming {
	None,
	/// `#[entity(name = "...")]`: generate the `Named` impl.
	Fixed(LitStr),
	/// `#[entity(named)]`: the type implements `Named` by hand.
	Manual,
}

pub fn derive_describe(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	let ident = &input.ident;

	if let Some(lifetime) = input.generics.lifetimes().next() {
		return syn::Error::new_spanned(
			lifetime,
			"Describe cannot be derived for types with lifetime parameters",
		)
		.to_compile_error()
		.into();
	}

	let EntityAttrs { naming, krate } = match parse_entity_attrs(&input) {
		Ok(attrs) => attrs,
		Err(e) => return e.to_compile_error().into(),
	};

	// `Describe: 'static`, so every type parameter must be too.
	let mut generics = input.generics.clone();
	let params: Vec<_> = generics.type_params().map(|p| p.ident.clone()).collect();
	if !params.is_empty() {
		let where_clause = generics.make_where_clause();
		for param in &params {
			where_clause.predicates.push(parse_quote!(#param: 'static));
		}
	}
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

	let as_named: TokenStream2 = match &naming {
		SelfNaming::None => quote! {},
		SelfNaming::Fixed(_) | SelfNaming::Manual => quote! {
			fn as_named(&self) -> ::core::option::Option<&dyn #krate::Named> {
				::core::option::Option::Some(self)
			}
		},
	};

	let named_impl: TokenStream2 = match &naming {
		SelfNaming::Fixed(name) => quote! {
			impl #impl_generics #krate::Named for #ident #ty_generics #where_clause {
				fn entity_name(&self) -> &str {
					#name
				}
			}
		},
		SelfNaming::None | SelfNaming::Manual => quote! {},
	};

	let expanded = quote! {
		impl #impl_generics #krate::Describe for #ident #ty_generics #where_clause {
			const TYPE: &'static #krate::TypeInfo =
				&#krate::TypeInfo::declared::<Self>();

			#as_named
		}

		#named_impl
	};

	expanded.into()
}

fn parse_entity_attrs(input: &DeriveInput) -> syn::Result<EntityAttrs> {
	let mut naming = SelfNaming::None;
	let mut krate: Option<Path> = None;

	for attr in input.attrs.iter().filter(|a| a.path().is_ident("entity")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("crate") {
				if krate.is_some() {
					return Err(meta.error("duplicate `crate` attribute"));
				}
				let value: LitStr = meta.value()?.parse()?;
				krate = Some(value.parse()?);
				return Ok(());
			}
			if !matches!(naming, SelfNaming::None) {
				return Err(meta.error("only one of `name` or `named` may be given"));
			}
			if meta.path.is_ident("name") {
				let value: LitStr = meta.value()?.parse()?;
				if value.value().is_empty() {
					return Err(syn::Error::new_spanned(&value, "entity name must not be empty"));
				}
				naming = SelfNaming::Fixed(value);
				Ok(())
			} else if meta.path.is_ident("named") {
				naming = SelfNaming::Manual;
				Ok(())
			} else {
				Err(meta.error("unknown entity attribute"))
			}
		})?;
	}

	Ok(EntityAttrs {
		naming,
		krate: krate.unwrap_or_else(|| parse_quote!(::nomen_descriptor)),
	})
}
