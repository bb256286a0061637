//! Authoritative node/edge collections of the open workflow.
//!
//! Every mutation goes through this store so the graph invariants are
//! enforced in one place:
//! - exactly one start node while the graph is non-empty
//! - no self-loops
//! - at most one edge record per unordered node pair, each with its own id
//! - every edge endpoint references a node of the graph
//! - an assistant is placed at most once
//!
//! Refused edits are never errors. They leave the graph unchanged and are
//! reported through the [`Notifier`].

use std::{collections::HashMap, sync::Arc};

use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::Bfs,
};
use tracing::debug;

use crate::{
    events::Notifier,
    workflow::{
        changes::{EdgeChange, NodeChange},
        edge::{EdgeId, EdgeMode, WorkflowEdge},
        node::{NodeId, WorkflowNode},
        policy::{Connection, ConnectionOutcome, ConnectionPolicy},
        rejection::Rejection,
        start::StartNodeManager,
        workflow::{Workflow, WorkflowSummary},
    },
};

pub struct GraphStore {
    nodes: Vec<WorkflowNode>,
    edges: Vec<WorkflowEdge>,
    /// bumped on every applied content change
    revision: u64,
    notifier: Arc<Notifier>,
}

impl GraphStore {
    pub fn new(notifier: Arc<Notifier>) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            revision: 0,
            notifier,
        }
    }

    pub fn nodes(&self) -> &[WorkflowNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[WorkflowEdge] {
        &self.edges
    }

    pub fn node(
        &self,
        id: &str,
    ) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(
        &self,
        id: &str,
    ) -> Option<&WorkflowEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// edge joining the unordered pair `{a, b}`
    pub fn edge_between(
        &self,
        a: &str,
        b: &str,
    ) -> Option<&WorkflowEdge> {
        self.edges.iter().find(|e| e.connects(a, b))
    }

    pub fn start_node(&self) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.is_start)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn notifier(&self) -> &Arc<Notifier> {
        &self.notifier
    }

    /// Replaces the graph with a copy of `workflow`'s nodes and edges and
    /// repairs whatever violates the graph invariants.
    pub fn load(
        &mut self,
        workflow: &Workflow,
    ) {
        let (nodes, edges) = normalize(workflow.nodes.clone(), workflow.edges.clone());
        debug!("graph::load({}) nodes: {}, edges: {}", workflow.id, nodes.len(), edges.len());
        self.nodes = nodes;
        self.edges = edges;
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.revision += 1;
    }

    /// Writes the current graph into a workflow carrying `summary`'s metadata.
    pub fn to_workflow(
        &self,
        summary: &WorkflowSummary,
    ) -> Workflow {
        let mut workflow = Workflow::from(summary);
        workflow.nodes = self.nodes.clone();
        workflow.edges = self.edges.clone();
        workflow
    }

    /// Appends `candidate`. The first node of an empty graph becomes the
    /// start node, any later node never does.
    pub fn add_node(
        &mut self,
        mut candidate: WorkflowNode,
    ) -> bool {
        if self.nodes.iter().any(|n| n.assistant_id() == candidate.assistant_id()) {
            return self.refuse(Rejection::DuplicateAssistant(candidate.label().to_string()));
        }
        if self.node(&candidate.id).is_some() {
            return self.refuse(Rejection::DuplicateNode(candidate.id));
        }

        candidate.is_start = self.nodes.is_empty();
        debug!("graph::add_node({}) start: {}", candidate.id, candidate.is_start);
        self.nodes.push(candidate);
        self.revision += 1;
        true
    }

    /// Removes a node and every edge touching it.
    pub fn remove_node(
        &mut self,
        id: &str,
    ) -> bool {
        if self.node(id).is_none() {
            return self.refuse(Rejection::UnknownNode(id.to_string()));
        }
        if let Err(rejection) = StartNodeManager::guard_removal(&self.nodes, id) {
            return self.refuse(rejection);
        }
        self.detach(id);
        self.revision += 1;
        true
    }

    /// Applies a batch of node changes and returns how many were applied.
    ///
    /// Removal of the start node is filtered out and reported; changes for
    /// unknown ids are ignored.
    pub fn apply_node_changes(
        &mut self,
        changes: Vec<NodeChange>,
    ) -> usize {
        let mut applied = 0;
        let mut modified = false;

        for change in changes {
            if let NodeChange::Remove {
                id,
            } = &change
            {
                if let Err(rejection) = StartNodeManager::guard_removal(&self.nodes, id) {
                    self.notifier.reject(&rejection);
                    continue;
                }
            }

            let Some(idx) = self.nodes.iter().position(|n| n.id.eq(change.id())) else {
                continue;
            };
            match change {
                NodeChange::Position {
                    position,
                    ..
                } => {
                    self.nodes[idx].position = position;
                    modified = true;
                }
                NodeChange::Select {
                    selected,
                    ..
                } => {
                    self.nodes[idx].selected = selected;
                }
                NodeChange::Remove {
                    id,
                } => {
                    self.detach(&id);
                    modified = true;
                }
            }
            applied += 1;
        }

        if modified {
            self.revision += 1;
        }
        applied
    }

    /// Applies a batch of edge changes and returns how many were applied.
    pub fn apply_edge_changes(
        &mut self,
        changes: Vec<EdgeChange>,
    ) -> usize {
        let mut applied = 0;
        let mut modified = false;

        for change in changes {
            let Some(idx) = self.edges.iter().position(|e| e.id.eq(change.id())) else {
                continue;
            };
            match change {
                EdgeChange::Select {
                    selected,
                    ..
                } => {
                    self.edges[idx].selected = selected;
                }
                EdgeChange::Remove {
                    ..
                } => {
                    let edge = self.edges.remove(idx);
                    debug!("graph::remove_edge({})", edge.id);
                    modified = true;
                }
            }
            applied += 1;
        }

        if modified {
            self.revision += 1;
        }
        applied
    }

    /// Runs a connect gesture through [`ConnectionPolicy`].
    pub fn connect(
        &mut self,
        connection: &Connection,
    ) -> bool {
        match ConnectionPolicy::decide(&self.nodes, &self.edges, connection) {
            Ok(ConnectionOutcome::Create(edge)) => {
                debug!("graph::connect({} -> {}) created {}", edge.source, edge.target, edge.id);
                self.edges.push(edge);
                self.revision += 1;
                true
            }
            Ok(ConnectionOutcome::Upgrade {
                id,
                source,
                target,
            }) => {
                if let Some(edge) = self.edges.iter_mut().find(|e| e.connects(&source, &target)) {
                    edge.mode = EdgeMode::Bidirectional;
                    debug!("graph::connect({} -> {}) upgraded {}", connection.source, connection.target, id);
                }
                self.revision += 1;
                true
            }
            Err(rejection) => self.refuse(rejection),
        }
    }

    /// Makes `id` the single start node.
    pub fn designate_start(
        &mut self,
        id: &str,
    ) -> bool {
        if StartNodeManager::is_start(&self.nodes, id) {
            return true;
        }
        match StartNodeManager::designate(&mut self.nodes, id) {
            Ok(()) => {
                self.revision += 1;
                true
            }
            Err(rejection) => self.refuse(rejection),
        }
    }

    /// Directed graph of permitted handoffs; bidirectional edges contribute
    /// both directions. Node weights are node ids, edge weights edge ids.
    pub fn topology(&self) -> DiGraph<NodeId, EdgeId> {
        let mut graph: DiGraph<NodeId, EdgeId> = DiGraph::new();
        let mut index: HashMap<&str, NodeIndex> = HashMap::new();

        for node in self.nodes.iter() {
            let idx = graph.add_node(node.id.clone());
            index.insert(node.id.as_str(), idx);
        }
        for edge in self.edges.iter() {
            let (Some(&source), Some(&target)) = (index.get(edge.source.as_str()), index.get(edge.target.as_str())) else {
                continue;
            };
            graph.add_edge(source, target, edge.id.clone());
            if edge.is_bidirectional() {
                graph.add_edge(target, source, edge.id.clone());
            }
        }
        graph
    }

    /// Nodes `id` may hand off to.
    pub fn successors(
        &self,
        id: &str,
    ) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|e| e.is_outgoing_from(id))
            .map(|e| if e.source == id { e.target.clone() } else { e.source.clone() })
            .collect()
    }

    /// Nodes no handoff chain from the start node can reach, in node order.
    pub fn unreachable_nodes(&self) -> Vec<NodeId> {
        let graph = self.topology();
        let Some(start) = graph.node_indices().find(|idx| StartNodeManager::is_start(&self.nodes, &graph[*idx])) else {
            return Vec::new();
        };

        let mut reached = vec![false; graph.node_count()];
        let mut bfs = Bfs::new(&graph, start);
        while let Some(idx) = bfs.next(&graph) {
            reached[idx.index()] = true;
        }

        graph.node_indices().filter(|idx| !reached[idx.index()]).map(|idx| graph[idx].clone()).collect()
    }

    /// Output a human-readable representation of the graph
    pub fn schema(&self) -> String {
        let mut lines = Vec::new();

        lines.push("=== Workflow Graph ===".to_string());
        lines.push(format!("Nodes: {}, Edges: {}", self.nodes.len(), self.edges.len()));
        lines.push(String::new());

        lines.push("--- Nodes ---".to_string());
        for node in self.nodes.iter() {
            let marker = if node.is_start { " [start]" } else { "" };
            lines.push(format!("[{}] {} (type: {}, assistant: {}){}", node.id, node.label(), node.kind.node_type().as_ref(), node.assistant_id(), marker));
        }
        lines.push(String::new());

        lines.push("--- Edges ---".to_string());
        for edge in self.edges.iter() {
            let arrow = match edge.mode {
                EdgeMode::Single => "-->",
                EdgeMode::Bidirectional => "<->",
            };
            lines.push(format!("{} {} {} (id: {})", edge.source, arrow, edge.target, edge.id));
        }
        lines.push(String::new());

        lines.push("--- Handoffs ---".to_string());
        for node in self.nodes.iter() {
            let next = self.successors(&node.id);
            if next.is_empty() {
                lines.push(format!("{} -> (end)", node.id));
            } else {
                lines.push(format!("{} -> {}", node.id, next.join(", ")));
            }
        }

        lines.join("\n")
    }

    fn detach(
        &mut self,
        id: &str,
    ) {
        self.nodes.retain(|n| n.id != id);
        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(id));
        debug!("graph::remove_node({}) cascaded edges: {}", id, before - self.edges.len());
    }

    fn refuse(
        &self,
        rejection: Rejection,
    ) -> bool {
        self.notifier.reject(&rejection);
        false
    }
}

/// Load-time repair of foreign data.
fn normalize(
    nodes: Vec<WorkflowNode>,
    edges: Vec<WorkflowEdge>,
) -> (Vec<WorkflowNode>, Vec<WorkflowEdge>) {
    let mut kept_nodes: Vec<WorkflowNode> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if kept_nodes.iter().any(|n| n.id == node.id) {
            debug!("graph::load dropped duplicate node {}", node.id);
            continue;
        }
        if kept_nodes.iter().any(|n| n.assistant_id() == node.assistant_id()) {
            debug!("graph::load dropped node {} placing assistant {} again", node.id, node.assistant_id());
            continue;
        }
        kept_nodes.push(node);
    }
    StartNodeManager::ensure_start(&mut kept_nodes);

    let mut kept_edges: Vec<WorkflowEdge> = Vec::with_capacity(edges.len());
    for edge in edges {
        if edge.source == edge.target {
            debug!("graph::load dropped self-loop {}", edge.id);
            continue;
        }
        let dangling = [&edge.source, &edge.target].into_iter().any(|id| !kept_nodes.iter().any(|n| n.id.eq(id)));
        if dangling {
            debug!("graph::load dropped dangling edge {}", edge.id);
            continue;
        }

        match kept_edges.iter().position(|e| e.connects(&edge.source, &edge.target)) {
            None => {
                let mut edge = edge;
                if kept_edges.iter().any(|e| e.id == edge.id) {
                    let id = WorkflowEdge::unique_id(&kept_edges, &edge.source, &edge.target);
                    debug!("graph::load renamed edge {} to {}", edge.id, id);
                    edge.id = id;
                }
                kept_edges.push(edge);
            }
            Some(idx) => {
                let existing = &mut kept_edges[idx];
                if existing.source != edge.source || edge.is_bidirectional() {
                    existing.mode = EdgeMode::Bidirectional;
                }
                debug!("graph::load merged edge {} into {}", edge.id, existing.id);
            }
        }
    }

    (kept_nodes, kept_edges)
}
