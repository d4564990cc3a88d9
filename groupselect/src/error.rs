//! Error types

use thiserror::Error;

/// Errors raised while building or loading a [`Catalog`](crate::Catalog).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two options share a value. Lookups would silently resolve to the first.
    #[error("duplicate option value {value:?} in groups {first_group:?} and {second_group:?}")]
    DuplicateValue {
        value: String,
        first_group: String,
        second_group: String,
    },
    /// An option has an empty value.
    #[error("option {label:?} in group {group:?} has an empty value")]
    EmptyValue { group: String, label: String },
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
}
