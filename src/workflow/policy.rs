//! Connect-gesture rules.
//!
//! Checks run in a fixed order for a proposed connection `A -> B`:
//!
//! 1. `A == B` is refused silently.
//! 2. Both endpoints must exist.
//! 3. Nothing may connect into the start node, except upgrading the start
//!    node's own `single` edge `B -> A` to bidirectional.
//! 4. The start node keeps at most one outgoing connection.
//! 5. The pair's existing edge decides the rest: none creates a `single`
//!    edge, the same direction is a duplicate, the opposite `single`
//!    direction is upgraded in place, a bidirectional pair is full.

use serde::{Deserialize, Serialize};

use crate::workflow::{
    edge::{EdgeId, EdgeMode, WorkflowEdge},
    node::{NodeId, WorkflowNode},
    rejection::Rejection,
    start::StartNodeManager,
};

/// A user's attempt to connect two nodes.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Connection {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub source_handle: Option<String>,
    #[serde(default)]
    pub target_handle: Option<String>,
}

impl Connection {
    pub fn new(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn with_handles(
        mut self,
        source_handle: Option<String>,
        target_handle: Option<String>,
    ) -> Self {
        self.source_handle = source_handle;
        self.target_handle = target_handle;
        self
    }
}

/// Accepted outcome of a connect gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionOutcome {
    /// Append this new `single` edge.
    Create(WorkflowEdge),
    /// Switch the pair's existing edge to bidirectional. `source` and
    /// `target` are that edge's endpoints.
    Upgrade {
        id: EdgeId,
        source: NodeId,
        target: NodeId,
    },
}

pub struct ConnectionPolicy;

impl ConnectionPolicy {
    pub fn decide(
        nodes: &[WorkflowNode],
        edges: &[WorkflowEdge],
        connection: &Connection,
    ) -> std::result::Result<ConnectionOutcome, Rejection> {
        let a = connection.source.as_str();
        let b = connection.target.as_str();

        if a == b {
            return Err(Rejection::SelfLoop);
        }
        for id in [a, b] {
            if !nodes.iter().any(|n| n.id == id) {
                return Err(Rejection::UnknownNode(id.to_string()));
            }
        }

        let existing = edges.iter().find(|e| e.connects(a, b));
        let upgrades_start_edge = existing.is_some_and(|e| e.source == b && e.mode == EdgeMode::Single);

        if StartNodeManager::is_start(nodes, b) && !upgrades_start_edge {
            return Err(Rejection::IntoStart);
        }
        if StartNodeManager::is_start(nodes, a) && edges.iter().any(|e| e.is_outgoing_from(a)) {
            return Err(Rejection::StartFanOut);
        }

        match existing {
            None => {
                let edge = WorkflowEdge::new(a, b).with_id(WorkflowEdge::unique_id(edges, a, b)).with_handles(connection.source_handle.clone(), connection.target_handle.clone());
                Ok(ConnectionOutcome::Create(edge))
            }
            Some(e) if e.mode == EdgeMode::Bidirectional => Err(Rejection::AlreadyBidirectional),
            Some(e) if e.source == a => Err(Rejection::DuplicateDirection),
            Some(e) => Ok(ConnectionOutcome::Upgrade {
                id: e.id.clone(),
                source: e.source.clone(),
                target: e.target.clone(),
            }),
        }
    }
}
