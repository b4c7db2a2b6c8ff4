use serde::{Deserialize, Serialize};

/// One entry in a user's list. `id` is unique across all users.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub date: String,
}
