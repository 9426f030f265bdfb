use serde::{Deserialize, Serialize};

/// Input for creating a faculty; the id is generated by the store.
/// A missing `color` is stored as an empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFaculty {
    pub name: String,
    #[serde(default)]
    pub color: String,
}
