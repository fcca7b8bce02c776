use serde::{Deserialize, Serialize};

/// Reference to another entity by id, serialized as `{"id": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i32,
}

impl From<i32> for EntityRef {
    fn from(id: i32) -> Self {
        Self { id }
    }
}
