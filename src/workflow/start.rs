//! Single start node bookkeeping.
//!
//! A non-empty workflow has exactly one node with `is_start` set.

use tracing::debug;

use crate::workflow::{
    node::{NodeId, WorkflowNode},
    rejection::Rejection,
};

pub struct StartNodeManager;

impl StartNodeManager {
    /// id of the current start node
    pub fn start_id(nodes: &[WorkflowNode]) -> Option<&NodeId> {
        nodes.iter().find(|n| n.is_start).map(|n| &n.id)
    }

    pub fn is_start(
        nodes: &[WorkflowNode],
        id: &str,
    ) -> bool {
        nodes.iter().any(|n| n.is_start && n.id == id)
    }

    /// Makes `id` the only start node.
    pub fn designate(
        nodes: &mut [WorkflowNode],
        id: &str,
    ) -> std::result::Result<(), Rejection> {
        if !nodes.iter().any(|n| n.id == id) {
            return Err(Rejection::UnknownNode(id.to_string()));
        }
        for node in nodes.iter_mut() {
            node.is_start = node.id == id;
        }
        debug!("start node designated: {}", id);
        Ok(())
    }

    /// Repairs the start flag: with none set the first node wins, with several
    /// set only the first keeps it. Returns whether anything changed.
    pub fn ensure_start(nodes: &mut [WorkflowNode]) -> bool {
        let mut seen = false;
        let mut changed = false;
        for node in nodes.iter_mut() {
            if node.is_start {
                if seen {
                    node.is_start = false;
                    changed = true;
                }
                seen = true;
            }
        }
        if !seen {
            if let Some(first) = nodes.first_mut() {
                first.is_start = true;
                changed = true;
            }
        }
        if changed {
            debug!("start node repaired: {:?}", Self::start_id(nodes));
        }
        changed
    }

    /// Refuses removal of the current start node.
    pub fn guard_removal(
        nodes: &[WorkflowNode],
        id: &str,
    ) -> std::result::Result<(), Rejection> {
        if Self::is_start(nodes, id) {
            return Err(Rejection::StartNodeRemoval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::{
        assistant::AssistantRef,
        node::{Position, WorkflowNode},
    };

    fn node(id: &str) -> WorkflowNode {
        let mut n = WorkflowNode::for_assistant(&AssistantRef::new(format!("asst-{}", id), id, ""), Position::default());
        n.id = id.to_string();
        n
    }

    fn starts(nodes: &[WorkflowNode]) -> Vec<&str> {
        nodes.iter().filter(|n| n.is_start).map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_designate_has_exactly_one_winner() {
        let mut nodes = vec![node("a").with_start(true), node("b"), node("c")];
        StartNodeManager::designate(&mut nodes, "c").unwrap();
        assert_eq!(starts(&nodes), vec!["c"]);
    }

    #[test]
    fn test_designate_unknown_node_is_rejected() {
        let mut nodes = vec![node("a").with_start(true)];
        let err = StartNodeManager::designate(&mut nodes, "zzz").unwrap_err();
        assert_eq!(err, Rejection::UnknownNode("zzz".to_string()));
        assert_eq!(starts(&nodes), vec!["a"]);
    }

    #[test]
    fn test_ensure_start_assigns_first_node() {
        let mut nodes = vec![node("a"), node("b")];
        assert!(StartNodeManager::ensure_start(&mut nodes));
        assert_eq!(starts(&nodes), vec!["a"]);
    }

    #[test]
    fn test_ensure_start_keeps_first_of_many() {
        let mut nodes = vec![node("a"), node("b").with_start(true), node("c").with_start(true)];
        assert!(StartNodeManager::ensure_start(&mut nodes));
        assert_eq!(starts(&nodes), vec!["b"]);
    }

    #[test]
    fn test_ensure_start_is_noop_when_valid_or_empty() {
        let mut nodes = vec![node("a"), node("b").with_start(true)];
        assert!(!StartNodeManager::ensure_start(&mut nodes));

        let mut empty: Vec<WorkflowNode> = Vec::new();
        assert!(!StartNodeManager::ensure_start(&mut empty));
    }

    #[test]
    fn test_guard_removal() {
        let nodes = vec![node("a").with_start(true), node("b")];
        assert_eq!(StartNodeManager::guard_removal(&nodes, "a"), Err(Rejection::StartNodeRemoval));
        assert!(StartNodeManager::guard_removal(&nodes, "b").is_ok());
    }
}
