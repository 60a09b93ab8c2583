use folio_materials::MaterialError;
use thiserror::Error;

/// Errors raised while composing the world.
#[derive(Debug, Error)]
pub enum WorldError {
    /// `add_object` was given a type other than `static`.
    #[error("unsupported object type `{0}`")]
    UnsupportedObjectType(String),

    /// A material could not be derived or synchronized.
    #[error(transparent)]
    Material(#[from] MaterialError),
}
