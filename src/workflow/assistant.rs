//! Assistants as seen by the editor.
//!
//! Assistants are owned elsewhere; the editor only reads their id, name and
//! description when placing a node.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimal assistant reference, also the shape of a drag-and-drop payload.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistantRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Assistant directory entry.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Assistant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub plugins: Vec<AssistantPlugin>,
}

/// Plugin attached to an assistant with its configuration as a key/value map.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AssistantPlugin {
    pub plugin_id: String,
    #[serde(default)]
    pub config: BTreeMap<String, serde_json::Value>,
}

impl AssistantRef {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Parses a drop payload. Anything that is not an assistant reference with
    /// a non-empty id yields `None`.
    pub fn from_drop_payload(payload: &str) -> Option<Self> {
        match serde_json::from_str::<AssistantRef>(payload) {
            Ok(assistant) if !assistant.id.is_empty() => Some(assistant),
            Ok(_) => {
                debug!("drop payload has an empty assistant id");
                None
            }
            Err(e) => {
                debug!("ignoring malformed drop payload: {}", e);
                None
            }
        }
    }
}

impl From<&Assistant> for AssistantRef {
    fn from(assistant: &Assistant) -> Self {
        Self {
            id: assistant.id.clone(),
            name: assistant.name.clone(),
            description: assistant.description.clone(),
        }
    }
}
