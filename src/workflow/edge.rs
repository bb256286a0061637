//! Workflow edge definitions.
//!
//! An edge is a permitted handoff between two nodes. Direction is a property
//! of the single edge record for a node pair: `single` allows
//! `source -> target`, `bidirectional` allows both ways.

use serde::{Deserialize, Serialize};

use crate::workflow::node::NodeId;

/// Unique identifier for an edge within a workflow.
pub type EdgeId = String;

/// Which handoff directions an edge permits.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EdgeMode {
    /// `source -> target` only.
    #[default]
    Single,
    /// Both `source -> target` and `target -> source`.
    Bidirectional,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkflowEdge {
    /// Unique edge identifier.
    pub id: EdgeId,
    /// ID of the source node.
    pub source: NodeId,
    /// ID of the target node.
    pub target: NodeId,
    /// Anchor on the source node the line attaches to.
    #[serde(default)]
    pub source_handle: Option<String>,
    /// Anchor on the target node the line attaches to.
    #[serde(default)]
    pub target_handle: Option<String>,
    /// Permitted directions.
    #[serde(default)]
    pub mode: EdgeMode,
    /// Editor selection state, never persisted.
    #[serde(default, skip_serializing)]
    pub selected: bool,
}

impl WorkflowEdge {
    /// Derives the edge id for a connection created from `source` to `target`.
    pub fn edge_id(
        source: &str,
        target: &str,
    ) -> EdgeId {
        format!("edge-{}-{}", source, target)
    }

    /// Derives an edge id for `source -> target` that no edge in `edges`
    /// carries yet. Hyphenated node ids can make two pairs derive the same
    /// base id, so a numeric suffix is appended until it is free.
    pub fn unique_id(
        edges: &[WorkflowEdge],
        source: &str,
        target: &str,
    ) -> EdgeId {
        let base = Self::edge_id(source, target);
        let taken = |id: &str| edges.iter().any(|e| e.id == id);
        if !taken(&base) {
            return base;
        }
        let mut n = 2;
        loop {
            let id = format!("{}-{}", base, n);
            if !taken(&id) {
                return id;
            }
            n += 1;
        }
    }

    /// Creates a `single` edge `source -> target`.
    pub fn new(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: Self::edge_id(&source, &target),
            source,
            target,
            source_handle: None,
            target_handle: None,
            mode: EdgeMode::Single,
            selected: false,
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

    pub fn with_id(
        mut self,
        id: impl Into<EdgeId>,
    ) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_mode(
        mut self,
        mode: EdgeMode,
    ) -> Self {
        self.mode = mode;
        self
    }

    /// true when this edge joins the unordered pair `{a, b}`
    pub fn connects(
        &self,
        a: &str,
        b: &str,
    ) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }

    /// true when `id` is either endpoint
    pub fn touches(
        &self,
        id: &str,
    ) -> bool {
        self.source == id || self.target == id
    }

    pub fn is_bidirectional(&self) -> bool {
        self.mode == EdgeMode::Bidirectional
    }

    /// true when a handoff `from -> to` is permitted by this edge
    pub fn permits(
        &self,
        from: &str,
        to: &str,
    ) -> bool {
        (self.source == from && self.target == to) || (self.is_bidirectional() && self.source == to && self.target == from)
    }

    /// true when this edge lets `id` hand off to the other endpoint
    pub fn is_outgoing_from(
        &self,
        id: &str,
    ) -> bool {
        self.source == id || (self.is_bidirectional() && self.target == id)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_edge_id_is_derived_from_endpoints() {
        let edge = WorkflowEdge::new("a", "b");
        assert_eq!(edge.id, "edge-a-b");
        assert_eq!(edge.id, WorkflowEdge::edge_id("a", "b"));
        assert_eq!(edge.mode, EdgeMode::Single);
    }

    #[test]
    fn test_unique_id_skips_taken_ids() {
        let edges = vec![WorkflowEdge::new("a", "b-c")];
        assert_eq!(WorkflowEdge::edge_id("a-b", "c"), "edge-a-b-c");
        assert_eq!(WorkflowEdge::unique_id(&edges, "a-b", "c"), "edge-a-b-c-2");
        assert_eq!(WorkflowEdge::unique_id(&edges, "x", "y"), "edge-x-y");

        let edges = vec![WorkflowEdge::new("a", "b-c"), WorkflowEdge::new("a", "b-c").with_id("edge-a-b-c-2")];
        assert_eq!(WorkflowEdge::unique_id(&edges, "a-b", "c"), "edge-a-b-c-3");
    }

    #[test]
    fn test_single_edge_permits_one_direction() {
        let edge = WorkflowEdge::new("a", "b");
        assert!(edge.permits("a", "b"));
        assert!(!edge.permits("b", "a"));
        assert!(edge.is_outgoing_from("a"));
        assert!(!edge.is_outgoing_from("b"));
        assert!(edge.connects("b", "a"));
    }

    #[test]
    fn test_bidirectional_edge_permits_both_directions() {
        let edge = WorkflowEdge::new("a", "b").with_mode(EdgeMode::Bidirectional);
        assert!(edge.permits("a", "b"));
        assert!(edge.permits("b", "a"));
        assert!(edge.is_outgoing_from("b"));
    }

    #[test]
    fn test_edge_mode_strings() {
        assert_eq!(EdgeMode::Bidirectional.as_ref(), "bidirectional");
        assert_eq!(EdgeMode::from_str("single").unwrap(), EdgeMode::Single);
        assert!(EdgeMode::from_str("both").is_err());
    }
}
