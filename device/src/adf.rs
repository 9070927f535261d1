use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An area description file stored on the device. Enabling one localizes the pose against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adf {
    pub uuid: Uuid,
    pub name: String,
    /// Milliseconds since the unix epoch.
    pub creation_time: u64,
}

impl Adf {
    pub fn new(name: impl Into<String>, creation_time: u64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            creation_time,
        }
    }
}
