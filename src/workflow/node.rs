//! Workflow node definitions.
//!
//! A node places one assistant on the canvas. The kind of node is a closed,
//! tagged set so new kinds can be added without touching graph rules.

use serde::{Deserialize, Serialize};

use crate::workflow::assistant::AssistantRef;

/// node id
pub type NodeId = String;

const NODE_ID_LEN: usize = 12;

/// Canvas coordinates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            x,
            y,
        }
    }
}

/// Discriminant of [`NodeKind`], as written on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeType {
    #[default]
    Assistant,
}

/// Payload of a node, keyed by its type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Assistant(AssistantNode),
}

/// Placed reference to an externally owned assistant.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AssistantNode {
    /// id of the referenced assistant
    pub assistant_id: String,
    /// copy of the assistant name taken when the node was created
    pub label: String,
    /// copy of the assistant description taken when the node was created
    #[serde(default)]
    pub description: String,
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Assistant(_) => NodeType::Assistant,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkflowNode {
    /// node id, stable across save/load
    pub id: NodeId,
    /// what the node represents
    pub kind: NodeKind,
    /// canvas position
    pub position: Position,
    /// workflow entry point flag
    #[serde(default)]
    pub is_start: bool,
    /// editor selection state, never persisted
    #[serde(default, skip_serializing)]
    pub selected: bool,
}

impl WorkflowNode {
    pub fn new(
        id: impl Into<NodeId>,
        kind: NodeKind,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            is_start: false,
            selected: false,
        }
    }

    /// Creates a node for `assistant` with a freshly generated id.
    pub fn for_assistant(
        assistant: &AssistantRef,
        position: Position,
    ) -> Self {
        let id = format!("{}-{}", NodeType::Assistant.as_ref(), nanoid::nanoid!(NODE_ID_LEN));
        Self::new(
            id,
            NodeKind::Assistant(AssistantNode {
                assistant_id: assistant.id.clone(),
                label: assistant.name.clone(),
                description: assistant.description.clone(),
            }),
            position,
        )
    }

    pub fn assistant_id(&self) -> &str {
        match &self.kind {
            NodeKind::Assistant(a) => &a.assistant_id,
        }
    }

    pub fn label(&self) -> &str {
        match &self.kind {
            NodeKind::Assistant(a) => &a.label,
        }
    }

    pub fn description(&self) -> &str {
        match &self.kind {
            NodeKind::Assistant(a) => &a.description,
        }
    }

    pub fn with_start(
        mut self,
        is_start: bool,
    ) -> Self {
        self.is_start = is_start;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_assistant_copies_display_fields() {
        let assistant = AssistantRef::new("asst-1", "Triage", "routes tickets");
        let node = WorkflowNode::for_assistant(&assistant, Position::new(10.0, 20.0));

        assert!(node.id.starts_with("assistant-"));
        assert_eq!(node.assistant_id(), "asst-1");
        assert_eq!(node.label(), "Triage");
        assert_eq!(node.description(), "routes tickets");
        assert_eq!(node.position, Position::new(10.0, 20.0));
        assert!(!node.is_start);
    }

    #[test]
    fn test_for_assistant_generates_unique_ids() {
        let assistant = AssistantRef::new("asst-1", "Triage", "");
        let a = WorkflowNode::for_assistant(&assistant, Position::default());
        let b = WorkflowNode::for_assistant(&assistant, Position::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_node_kind_is_tagged_by_type() {
        let kind = NodeKind::Assistant(AssistantNode {
            assistant_id: "a".to_string(),
            label: "A".to_string(),
            description: String::new(),
        });
        let value = serde_json::to_value(&kind).unwrap();
        assert_eq!(value["type"], "assistant");
        assert_eq!(kind.node_type().as_ref(), "assistant");
    }
}
