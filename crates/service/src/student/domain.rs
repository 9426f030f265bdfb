use serde::{Deserialize, Serialize};

/// Input for creating a student; the id is generated by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub age: i32,
    #[serde(default)]
    pub faculty_id: Option<i64>,
}
