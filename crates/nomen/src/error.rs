use nomen_descriptor::TypeDesc;

/// Normalization failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
	/// No type descriptor was supplied.
	#[error("nil type descriptor")]
	NilType,
	/// No named type was found within the unwrap budget, either because the
	/// nesting is too deep or because the type is fundamentally anonymous.
	#[error("type has no name: {0}")]
	NotNamed(TypeDesc),
}

/// Registration failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	#[error("nil type descriptor")]
	NilType,
	#[error("empty name for {0}")]
	EmptyName(TypeDesc),
	#[error("type has no name: {0}")]
	NotNamed(TypeDesc),
	/// The normalized type is already bound to a different name.
	#[error("conflicting registration for {ty}: existing={existing:?} incoming={incoming:?}")]
	Conflict {
		ty: TypeDesc,
		existing: String,
		incoming: String,
	},
}

impl From<NormalizeError> for RegistryError {
	fn from(err: NormalizeError) -> Self {
		match err {
			NormalizeError::NilType => Self::NilType,
			NormalizeError::NotNamed(ty) => Self::NotNamed(ty),
		}
	}
}

/// Failures of a snapshot write. Nothing is published when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NamingError {
	#[error("builder returned no registry")]
	NilRegistry,
	#[error("builder returned no resolver")]
	NilResolver,
}
