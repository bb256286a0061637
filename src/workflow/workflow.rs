use serde::{Deserialize, Serialize};

use crate::workflow::{
    edge::{EdgeId, WorkflowEdge},
    node::{NodeId, WorkflowNode},
};

/// Editable workflow: a named graph of assistant nodes and handoff edges.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Workflow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub edges: Vec<WorkflowEdge>,
    /// creation time in milliseconds
    #[serde(default)]
    pub created_at: i64,
    /// last update time in milliseconds
    #[serde(default)]
    pub updated_at: i64,
}

/// Immutable listing entry used for selection.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct WorkflowSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl Workflow {
    /// create an empty workflow
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn summary(&self) -> WorkflowSummary {
        WorkflowSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn node(
        &self,
        id: &NodeId,
    ) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id.eq(id))
    }

    pub fn edge(
        &self,
        id: &EdgeId,
    ) -> Option<&WorkflowEdge> {
        self.edges.iter().find(|e| e.id.eq(id))
    }

    pub fn start_node(&self) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.is_start)
    }
}

impl From<&WorkflowSummary> for Workflow {
    fn from(summary: &WorkflowSummary) -> Self {
        Self {
            id: summary.id.clone(),
            name: summary.name.clone(),
            description: summary.description.clone(),
            nodes: Vec::new(),
            edges: Vec::new(),
            created_at: summary.created_at,
            updated_at: summary.updated_at,
        }
    }
}
